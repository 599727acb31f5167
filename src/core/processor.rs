use crate::models::entry::{Entry, EntryType};
use crate::models::operation::{Action, ActionStack, ClipboardOperation, PendingClipboard};
use crate::system::filesystem::FileSystem;
use crate::utils::error::{Result, TfmError};
use std::path::{Path, PathBuf};

/// 파일 작업 엔진
///
/// 파일 시스템을 바꾸는 모든 명령이 여기를 거친다. 성공한 작업마다
/// 되돌리기 스택에 하나씩 쌓고 결과 문구를 `message`에 남긴다.
#[derive(Debug, Default)]
pub struct FileOperationEngine {
    filesystem: FileSystem,
    clipboard: Option<PendingClipboard>,
    actions: ActionStack,
    message: String,
}

impl FileOperationEngine {
    pub fn new(filesystem: FileSystem) -> Self {
        Self {
            filesystem,
            ..Self::default()
        }
    }

    pub fn filesystem(&self) -> &FileSystem {
        &self.filesystem
    }

    pub fn clipboard(&self) -> Option<&PendingClipboard> {
        self.clipboard.as_ref()
    }

    pub fn actions(&self) -> &ActionStack {
        &self.actions
    }

    /// 마지막 결과 문구
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    // === 클립보드 ===

    /// 복사할 항목 지정
    pub fn copy(&mut self, entry: &Entry) {
        self.set_clipboard(ClipboardOperation::Copy, entry);
        self.message = format!("Copied {}", entry.name);
    }

    /// 잘라낼 항목 지정
    pub fn cut(&mut self, entry: &Entry) {
        self.set_clipboard(ClipboardOperation::Cut, entry);
        self.message = format!("Copied {} for cutting", entry.name);
    }

    fn set_clipboard(&mut self, operation: ClipboardOperation, entry: &Entry) {
        self.clipboard = Some(PendingClipboard {
            operation,
            entry: entry.clone(),
        });
    }

    // === 변경 작업 ===

    /// 클립보드 항목을 `destination_dir`에 붙여넣기
    ///
    /// 대상이 디렉토리가 아니거나 클립보드가 비어 있으면 아무것도 안 한다.
    /// 클립보드는 붙여넣기 후에도 유지된다.
    pub fn paste(&mut self, destination_dir: &Path) -> Result<()> {
        if !self.filesystem.is_directory(destination_dir) {
            return Ok(());
        }
        let Some(pending) = self.clipboard.clone() else {
            return Ok(());
        };

        let result = self.paste_pending(&pending, destination_dir);
        self.finish(result)
    }

    fn paste_pending(&mut self, pending: &PendingClipboard, destination_dir: &Path) -> Result<()> {
        let source = std::path::absolute(&pending.entry.path)
            .unwrap_or_else(|_| pending.entry.path.clone());

        if !self.filesystem.exists(&source) {
            return Err(TfmError::PathNotFound { path: source });
        }
        if self.filesystem.is_directory(&source) {
            // 잘라내기는 원본을 휴지통으로 보내므로 자기 자신 안으로도 옮길 수 없다
            let into_itself = pending.operation == ClipboardOperation::Cut
                && FileSystem::is_same_path(destination_dir, &source);
            if into_itself || FileSystem::is_strict_descendant(destination_dir, &source) {
                return Err(TfmError::RecursiveCopy { path: source });
            }
        }

        let destination = self.unique_destination(destination_dir, &pending.entry.name);
        self.filesystem.copy_path(&source, &destination)?;

        self.record(Action::Paste {
            source: source.clone(),
            destination: destination.clone(),
        });

        let destination_name = file_name_of(&destination);
        match pending.operation {
            ClipboardOperation::Copy => {
                self.message = format!("Pasted {}", destination_name);
            }
            ClipboardOperation::Cut => {
                // 복사가 끝났으므로 작업은 이미 스택에 있다
                self.filesystem.trash(&source)?;
                self.message = format!("Moved {}", destination_name);
            }
        }
        Ok(())
    }

    /// 충돌 없는 대상 경로: `name`, `name(1)`, `name(2)`, ...
    pub fn unique_destination(&self, destination_dir: &Path, name: &str) -> PathBuf {
        let candidate = destination_dir.join(name);
        if !self.filesystem.exists(&candidate) {
            return candidate;
        }

        let mut counter = 1u32;
        loop {
            let candidate = destination_dir.join(format!("{}({})", name, counter));
            if !self.filesystem.exists(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// 휴지통으로 보내기 (되돌리기 대상 아님)
    pub fn delete(&mut self, entry: &Entry) -> Result<()> {
        let result = self.filesystem.trash(&entry.path).map(|()| {
            self.record(Action::Delete {
                source: entry.path.clone(),
            });
            self.message = format!("Deleted {}", entry.name);
        });
        self.finish(result)
    }

    /// 빈 디렉토리 또는 빈 파일 생성
    pub fn create(&mut self, entry: &Entry) -> Result<()> {
        let created = match entry.entry_type {
            EntryType::Folder => self.filesystem.create_directory(&entry.path),
            EntryType::Executable | EntryType::Text | EntryType::Encoded | EntryType::Other => {
                self.filesystem.create_file(&entry.path)
            }
        };

        let result = created.map(|()| {
            self.record(Action::Create {
                source: entry.path.clone(),
            });
            self.message = format!("Created {}", entry.name);
        });
        self.finish(result)
    }

    /// 가장 최근 작업 되돌리기
    ///
    /// 되돌리기에 실패해도 작업은 스택에서 빠진다.
    pub fn undo(&mut self) -> Result<()> {
        let Some(action) = self.actions.pop() else {
            self.message = "Nothing to undo".to_string();
            return Ok(());
        };

        let result = action.undo(&self.filesystem).map(|message| {
            tracing::info!(action = %action.describe(), "undone");
            self.message = message;
        });
        self.finish(result)
    }

    /// OS 기본 프로그램으로 열기 (디렉토리는 무시)
    pub fn open(&mut self, entry: &Entry) -> Result<()> {
        if entry.is_folder() {
            return Ok(());
        }

        let result = self
            .filesystem
            .open_with_default_app(&entry.path)
            .map(|()| self.message = format!("Opened {}", entry.name));
        self.finish(result)
    }

    fn record(&mut self, action: Action) {
        tracing::info!(action = %action.describe(), "committed");
        self.actions.push(action);
    }

    fn finish(&mut self, result: Result<()>) -> Result<()> {
        if let Err(e) = &result {
            tracing::warn!(error = %e, "file operation failed");
            self.message = e.to_string();
        }
        result
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::trash::TrashBin;
    use std::fs;
    use tempfile::TempDir;

    fn engine(temp: &TempDir) -> FileOperationEngine {
        FileOperationEngine::new(FileSystem::new(TrashBin::Staging(
            temp.path().join(".staging"),
        )))
    }

    fn work_dir(temp: &TempDir) -> PathBuf {
        let dir = temp.path().join("work");
        fs::create_dir(&dir).unwrap();
        dir
    }

    #[test]
    fn test_copy_and_cut_set_clipboard() {
        let temp = TempDir::new().unwrap();
        let mut engine = engine(&temp);
        let entry = Entry::new_for_creation("/x/a.txt", EntryType::Text);

        engine.copy(&entry);
        assert_eq!(engine.message(), "Copied a.txt");
        assert_eq!(
            engine.clipboard().unwrap().operation,
            ClipboardOperation::Copy
        );

        engine.cut(&entry);
        assert_eq!(engine.message(), "Copied a.txt for cutting");
        assert_eq!(engine.clipboard().unwrap().operation, ClipboardOperation::Cut);
        assert!(engine.actions().is_empty());
    }

    #[test]
    fn test_collision_naming() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let source = dir.join("X");
        fs::write(&source, "x").unwrap();
        let mut engine = engine(&temp);

        engine.copy(&Entry::classify(&source, EntryType::Text));
        engine.paste(&dir).unwrap();
        engine.paste(&dir).unwrap();

        assert!(dir.join("X(1)").exists());
        assert!(dir.join("X(2)").exists());
        assert_eq!(engine.actions().len(), 2);
        assert_eq!(engine.message(), "Pasted X(2)");
        // 클립보드는 유지
        assert!(engine.clipboard().is_some());
    }

    #[test]
    fn test_smallest_unused_suffix() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        fs::write(dir.join("X"), "").unwrap();
        fs::write(dir.join("X(2)"), "").unwrap();

        let engine = engine(&temp);
        assert_eq!(engine.unique_destination(&dir, "X"), dir.join("X(1)"));
        assert_eq!(engine.unique_destination(&dir, "Y"), dir.join("Y"));
    }

    #[test]
    fn test_paste_without_clipboard_or_into_file_is_noop() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let file = dir.join("a.txt");
        fs::write(&file, "a").unwrap();
        let mut engine = engine(&temp);

        engine.paste(&dir).unwrap();
        assert!(engine.actions().is_empty());

        engine.copy(&Entry::classify(&file, EntryType::Text));
        engine.paste(&file).unwrap();
        assert!(engine.actions().is_empty());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_paste_missing_source_reports() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let file = dir.join("a.txt");
        fs::write(&file, "a").unwrap();
        let mut engine = engine(&temp);

        engine.copy(&Entry::classify(&file, EntryType::Text));
        fs::remove_file(&file).unwrap();

        let result = engine.paste(&dir);
        assert!(matches!(result, Err(TfmError::PathNotFound { .. })));
        assert!(engine.actions().is_empty());
        assert!(engine.message().starts_with("Path not found"));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_paste_folder_into_itself() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let folder = dir.join("b");
        fs::create_dir(&folder).unwrap();
        let mut engine = engine(&temp);

        engine.copy(&Entry::classify(&folder, EntryType::Text));
        engine.paste(&folder).unwrap();

        assert!(folder.join("b").is_dir());
        assert_eq!(fs::read_dir(folder.join("b")).unwrap().count(), 0);
    }

    #[test]
    fn test_paste_into_descendant_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let folder = dir.join("b");
        let nested = folder.join("c");
        fs::create_dir_all(&nested).unwrap();
        let mut engine = engine(&temp);

        engine.copy(&Entry::classify(&folder, EntryType::Text));
        let result = engine.paste(&nested);

        assert!(matches!(result, Err(TfmError::RecursiveCopy { .. })));
        assert!(engine.actions().is_empty());
        assert_eq!(fs::read_dir(&nested).unwrap().count(), 0);
    }

    #[test]
    fn test_cut_folder_into_itself_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let folder = dir.join("b");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("keep.txt"), "k").unwrap();
        let mut engine = engine(&temp);

        engine.cut(&Entry::classify(&folder, EntryType::Text));
        let result = engine.paste(&folder);

        assert!(matches!(result, Err(TfmError::RecursiveCopy { .. })));
        assert!(engine.actions().is_empty());
        assert!(!folder.join("b").exists());
        assert_eq!(fs::read_to_string(folder.join("keep.txt")).unwrap(), "k");

        // 다른 곳으로는 그대로 옮겨지고 되돌릴 수 있다
        let other = dir.join("other");
        fs::create_dir(&other).unwrap();
        engine.paste(&other).unwrap();
        assert!(!folder.exists());
        engine.undo().unwrap();
        assert_eq!(fs::read_to_string(folder.join("keep.txt")).unwrap(), "k");
        assert!(!other.join("b").exists());
    }

    #[test]
    fn test_create_and_existing_path() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let mut engine = engine(&temp);

        let folder = Entry::new_for_creation(dir.join("docs"), EntryType::Folder);
        let file = Entry::new_for_creation(dir.join("todo.txt"), EntryType::Text);
        engine.create(&folder).unwrap();
        engine.create(&file).unwrap();

        assert!(dir.join("docs").is_dir());
        assert!(dir.join("todo.txt").is_file());
        assert_eq!(engine.message(), "Created todo.txt");
        assert_eq!(engine.actions().len(), 2);

        let result = engine.create(&file);
        assert!(matches!(result, Err(TfmError::FileExists { .. })));
        assert_eq!(engine.actions().len(), 2);
    }

    #[test]
    fn test_undo_empty_stack() {
        let temp = TempDir::new().unwrap();
        let mut engine = engine(&temp);

        engine.undo().unwrap();
        assert_eq!(engine.message(), "Nothing to undo");
    }

    #[test]
    fn test_undo_create() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let mut engine = engine(&temp);
        let entry = Entry::new_for_creation(dir.join("scratch"), EntryType::Folder);

        engine.create(&entry).unwrap();
        engine.undo().unwrap();

        assert!(!dir.join("scratch").exists());
        assert!(engine.actions().is_empty());
    }

    #[test]
    fn test_failed_undo_still_pops() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let mut engine = engine(&temp);
        let entry = Entry::new_for_creation(dir.join("short_lived"), EntryType::Text);

        engine.create(&entry).unwrap();
        fs::remove_file(dir.join("short_lived")).unwrap();

        assert!(engine.undo().is_err());
        assert!(engine.actions().is_empty());
        assert!(!engine.message().is_empty());
    }

    #[test]
    fn test_delete_is_not_undone() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let file = dir.join("old.log");
        fs::write(&file, "log").unwrap();
        let mut engine = engine(&temp);

        engine.delete(&Entry::classify(&file, EntryType::Text)).unwrap();
        assert!(!file.exists());
        assert_eq!(engine.actions().len(), 1);

        engine.undo().unwrap();
        assert!(!file.exists());
        assert!(engine.actions().is_empty());
        assert_eq!(engine.message(), "Deleting old.log cannot be undone");
    }

    #[test]
    fn test_open_folder_is_noop() {
        let temp = TempDir::new().unwrap();
        let dir = work_dir(&temp);
        let mut engine = engine(&temp);

        engine.open(&Entry::classify(&dir, EntryType::Text)).unwrap();
        assert!(engine.message().is_empty());
    }
}
