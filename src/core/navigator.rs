use crate::models::listing::{DirectoryListing, ListingOptions};
use crate::models::selection::SelectableListing;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 루트의 부모는 루트 자신
fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// 탐색 컨트롤러
///
/// 메인 목록과 부모 목록을 항상 한 쌍으로 옮긴다. 둘 중 하나라도 실패하면
/// 마지막 정상 경로로 둘 다 되돌린다.
#[derive(Debug, Clone)]
pub struct NavigationController {
    current_path: PathBuf,
    parent_path: PathBuf,
    /// 현재 디렉토리 (선택 커서 포함)
    pub main: SelectableListing,
    /// 부모 디렉토리
    pub parent: DirectoryListing,
    path_changed: bool,
}

impl NavigationController {
    /// 시작 경로에서 컨트롤러를 연다.
    ///
    /// 시작 경로를 읽을 수 없으면 에러 (되돌릴 이전 상태가 없음).
    pub fn open(
        start: &Path,
        main_height: usize,
        parent_height: usize,
        options: ListingOptions,
        filesystem: &FileSystem,
    ) -> Result<Self> {
        let parent_path = parent_of(start);
        let mut main = SelectableListing::new(DirectoryListing::new(start, main_height, options));
        let mut parent = DirectoryListing::new(&parent_path, parent_height, options);

        main.rescan(start, filesystem)?;
        parent.rescan(&parent_path, filesystem)?;
        main.reset();

        let mut controller = Self {
            current_path: start.to_path_buf(),
            parent_path,
            main,
            parent,
            path_changed: true,
        };
        controller.focus_current_in_parent();
        Ok(controller)
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn parent_path(&self) -> &Path {
        &self.parent_path
    }

    /// 경로 표시 갱신 요청을 꺼낸다 (한 번 읽으면 지워짐)
    pub fn take_path_changed(&mut self) -> bool {
        std::mem::take(&mut self.path_changed)
    }

    /// 새 경로로 이동 (전부 성공하거나 아무것도 바뀌지 않음)
    pub fn navigate(&mut self, new_path: &Path, filesystem: &FileSystem) -> Result<()> {
        let new_parent = parent_of(new_path);
        let selected_name = self.main.selected_entry().map(|e| e.name.clone());

        let result = self
            .main
            .rescan(new_path, filesystem)
            .and_then(|()| self.parent.rescan(&new_parent, filesystem));

        if let Err(e) = result {
            tracing::warn!(path = %new_path.display(), error = %e, "navigation rolled back");
            self.rollback(selected_name.as_deref(), filesystem);
            return Err(e);
        }

        self.current_path = new_path.to_path_buf();
        self.parent_path = new_parent;
        self.main.reset();
        self.focus_current_in_parent();
        self.path_changed = true;
        tracing::debug!(path = %self.current_path.display(), "navigated");
        Ok(())
    }

    /// 선택 항목이 디렉토리면 들어간다. 아니면 아무것도 안 함.
    pub fn enter_selected(&mut self, filesystem: &FileSystem) -> Result<()> {
        let Some(entry) = self.main.selected_entry() else {
            return Ok(());
        };
        // 스캔 이후 바뀌었을 수 있으므로 디스크에서 다시 확인
        if !entry.is_folder() || !filesystem.is_directory(&entry.path) {
            return Ok(());
        }
        let target = entry.path.clone();
        self.navigate(&target, filesystem)
    }

    /// 부모로 이동하고 방금 나온 디렉토리에 커서를 둔다.
    pub fn leave_to_parent(&mut self, filesystem: &FileSystem) -> Result<()> {
        if self.parent_path == self.current_path {
            return Ok(());
        }
        let child_name = self
            .current_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        let target = self.parent_path.clone();

        self.navigate(&target, filesystem)?;
        if let Some(name) = child_name {
            self.main.focus_name(&name);
        }
        Ok(())
    }

    /// 새로고침 주기
    ///
    /// 현재 경로가 사라졌으면 존재하는 조상까지 올라간 뒤 두 목록을 제자리에서
    /// 다시 읽는다. 선택 인덱스는 잘라서 유지한다.
    pub fn refresh(&mut self, filesystem: &FileSystem) -> Result<()> {
        let mut healed = false;
        while !filesystem.is_directory(&self.current_path) {
            let Some(parent) = self.current_path.parent() else {
                break;
            };
            self.current_path = parent.to_path_buf();
            healed = true;
        }
        if healed {
            tracing::info!(path = %self.current_path.display(), "current folder vanished, moved up");
            self.parent_path = parent_of(&self.current_path);
            self.path_changed = true;
        }

        let current = self.current_path.clone();
        let parent = self.parent_path.clone();
        let main_result = self.main.rescan(&current, filesystem);
        let parent_result = self.parent.rescan(&parent, filesystem);
        if healed {
            self.main.reset();
        }
        self.focus_current_in_parent();
        main_result.and(parent_result)
    }

    /// 창 높이 변경
    pub fn resize(&mut self, main_height: usize, parent_height: usize) {
        self.main.resize(main_height);
        self.parent.resize(parent_height);
        self.focus_current_in_parent();
    }

    /// 부모 목록에서 현재 디렉토리의 인덱스 (강조 표시용)
    pub fn current_index_in_parent(&self) -> Option<usize> {
        let name = self.current_path.file_name()?;
        self.parent
            .entries
            .iter()
            .position(|e| e.path.file_name() == Some(name))
    }

    fn focus_current_in_parent(&mut self) {
        if let Some(index) = self.current_index_in_parent() {
            self.parent.scroll_to(index);
        }
    }

    fn rollback(&mut self, selected_name: Option<&str>, filesystem: &FileSystem) {
        let current = self.current_path.clone();
        let parent = self.parent_path.clone();

        let _ = self.main.rescan(&current, filesystem);
        let _ = self.parent.rescan(&parent, filesystem);
        if let Some(name) = selected_name {
            self.main.focus_name(name);
        }
        self.focus_current_in_parent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileSystem) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("alpha").join("inner")).unwrap();
        fs::create_dir(temp.path().join("beta")).unwrap();
        fs::write(temp.path().join("alpha").join("note.txt"), "hi").unwrap();
        fs::write(temp.path().join("readme.md"), "# hi").unwrap();
        (temp, FileSystem::default())
    }

    fn open(path: &Path, filesystem: &FileSystem) -> NavigationController {
        NavigationController::open(path, 20, 20, ListingOptions::default(), filesystem).unwrap()
    }

    #[test]
    fn test_open_scans_both_panes() {
        let (temp, filesystem) = setup();
        let mut nav = open(temp.path(), &filesystem);

        assert_eq!(nav.current_path(), temp.path());
        assert_eq!(nav.parent_path(), temp.path().parent().unwrap());
        assert_eq!(nav.main.listing.len(), 3);
        assert!(!nav.parent.is_empty());
        assert!(nav.take_path_changed());
        assert!(!nav.take_path_changed());
    }

    #[test]
    fn test_open_invalid_start_fails() {
        let filesystem = FileSystem::default();
        let result = NavigationController::open(
            Path::new("/nonexistent/tfm/start"),
            20,
            20,
            ListingOptions::default(),
            &filesystem,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_enter_and_leave() {
        let (temp, filesystem) = setup();
        let mut nav = open(temp.path(), &filesystem);

        // dirs_first: alpha, beta, readme.md
        assert_eq!(nav.main.selected_entry().unwrap().name, "alpha");
        nav.enter_selected(&filesystem).unwrap();
        assert_eq!(nav.current_path(), temp.path().join("alpha"));
        assert_eq!(nav.parent_path(), temp.path());
        assert_eq!(nav.main.selected(), Some(0));

        nav.main.select_down();
        nav.main.select_down();
        nav.leave_to_parent(&filesystem).unwrap();
        assert_eq!(nav.current_path(), temp.path());
        assert_eq!(nav.main.selected_entry().unwrap().name, "alpha");
    }

    #[test]
    fn test_enter_on_file_is_noop() {
        let (temp, filesystem) = setup();
        let mut nav = open(temp.path(), &filesystem);

        nav.main.focus_name("readme.md");
        nav.take_path_changed();
        nav.enter_selected(&filesystem).unwrap();

        assert_eq!(nav.current_path(), temp.path());
        assert!(!nav.take_path_changed());
    }

    #[test]
    fn test_navigate_failure_rolls_back() {
        let (temp, filesystem) = setup();
        let mut nav = open(temp.path(), &filesystem);
        nav.main.focus_name("beta");

        let result = nav.navigate(&temp.path().join("missing"), &filesystem);

        assert!(result.is_err());
        assert_eq!(nav.current_path(), temp.path());
        assert_eq!(nav.parent_path(), temp.path().parent().unwrap());
        assert_eq!(nav.main.listing.len(), 3);
        assert!(nav.main.listing.error.is_none());
        assert_eq!(nav.main.selected_entry().unwrap().name, "beta");
    }

    #[test]
    fn test_root_parent_is_root() {
        let root = Path::new("/");
        assert_eq!(parent_of(root), root);
    }

    #[test]
    fn test_refresh_self_heals() {
        let (temp, filesystem) = setup();
        let deep = temp.path().join("alpha").join("inner");
        let mut nav = open(&deep, &filesystem);
        nav.take_path_changed();

        fs::remove_dir_all(temp.path().join("alpha")).unwrap();
        nav.refresh(&filesystem).unwrap();

        assert_eq!(nav.current_path(), temp.path());
        assert_eq!(nav.parent_path(), temp.path().parent().unwrap());
        assert!(nav.take_path_changed());
        assert_eq!(nav.main.listing.len(), 2);
    }

    #[test]
    fn test_refresh_keeps_clamped_selection() {
        let (temp, filesystem) = setup();
        let mut nav = open(temp.path(), &filesystem);
        nav.main.focus_name("readme.md");

        fs::remove_file(temp.path().join("readme.md")).unwrap();
        nav.refresh(&filesystem).unwrap();

        assert_eq!(nav.main.selected(), Some(1));
        assert_eq!(nav.main.selected_entry().unwrap().name, "beta");
    }

    #[test]
    fn test_current_index_in_parent() {
        let (temp, filesystem) = setup();
        let nav = open(&temp.path().join("beta"), &filesystem);

        let index = nav.current_index_in_parent().unwrap();
        assert_eq!(nav.parent.entries[index].name, "beta");
    }

    #[cfg(unix)]
    #[test]
    fn test_navigate_unreadable_rolls_back() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, filesystem) = setup();
        let locked = temp.path().join("beta");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root는 권한 비트를 무시한다
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut nav = open(temp.path(), &filesystem);
        let result = nav.navigate(&locked, &filesystem);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_err());
        assert_eq!(nav.current_path(), temp.path());
        assert_eq!(nav.parent_path(), temp.path().parent().unwrap());
        assert_eq!(nav.main.listing.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_navigate_unlistable_parent_rolls_back() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, filesystem) = setup();
        let vault = temp.path().join("vault");
        let open_child = vault.join("open");
        fs::create_dir_all(&open_child).unwrap();
        fs::write(open_child.join("inside.txt"), "i").unwrap();

        let mut nav = open(temp.path(), &filesystem);
        nav.main.focus_name("vault");
        let parent_len = nav.parent.len();

        // 들어갈 수는 있지만 목록은 못 읽는 부모
        fs::set_permissions(&vault, fs::Permissions::from_mode(0o311)).unwrap();
        if fs::read_dir(&vault).is_ok() {
            fs::set_permissions(&vault, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }
        assert!(fs::read_dir(&open_child).is_ok());

        let result = nav.navigate(&open_child, &filesystem);
        fs::set_permissions(&vault, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_err());
        assert_eq!(nav.current_path(), temp.path());
        assert_eq!(nav.parent_path(), temp.path().parent().unwrap());
        assert_eq!(nav.main.listing.len(), 4);
        assert!(nav.main.listing.error.is_none());
        assert_eq!(nav.main.selected_entry().unwrap().name, "vault");
        assert_eq!(nav.parent.len(), parent_len);
        assert!(nav.parent.error.is_none());
    }
}
