use super::*;
use crate::app::text_edit::{PromptKind, PromptOutcome};
use crate::models::entry::Entry;
use crate::models::operation::Action;
use crossterm::event::KeyEvent;

impl App {
    // === 클립보드 ===

    pub fn copy_selected(&mut self) {
        if let Some(entry) = self.navigator.main.selected_entry().cloned() {
            self.engine.copy(&entry);
        }
    }

    pub fn cut_selected(&mut self) {
        if let Some(entry) = self.navigator.main.selected_entry().cloned() {
            self.engine.cut(&entry);
        }
    }

    /// 현재 디렉토리에 붙여넣기
    pub fn paste_here(&mut self) {
        let destination_dir = self.navigator.current_path().to_path_buf();
        let before = self.engine.actions().len();
        let pasted = self.engine.paste(&destination_dir).is_ok();
        self.refresh();
        if pasted {
            self.focus_committed(before);
        }
    }

    // === 변경 작업 ===

    /// 선택 항목을 휴지통으로
    pub fn delete_selected(&mut self) {
        let Some(entry) = self.navigator.main.selected_entry().cloned() else {
            return;
        };
        // 실패 문구는 엔진이 남긴다
        let _ = self.engine.delete(&entry);
        self.refresh();
    }

    pub fn undo_last(&mut self) {
        let _ = self.engine.undo();
        self.refresh();
    }

    /// 기본 프로그램으로 열기
    pub fn open_selected(&mut self) {
        if let Some(entry) = self.navigator.main.selected_entry().cloned() {
            let _ = self.engine.open(&entry);
        }
    }

    // === 이름 입력 ===

    pub fn start_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(NamePrompt::new(kind));
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    /// 입력 상자가 열려 있을 때의 키 처리
    pub fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let kind = prompt.kind;
        match prompt.handle_key(key) {
            PromptOutcome::Editing => {}
            PromptOutcome::Cancelled => self.prompt = None,
            PromptOutcome::Confirmed(name) => {
                self.prompt = None;
                self.create_named(kind, &name);
            }
        }
    }

    /// 현재 디렉토리에 `name`으로 생성하고 새 항목에 커서를 둔다.
    pub fn create_named(&mut self, kind: PromptKind, name: &str) {
        if name.is_empty() {
            self.engine.set_message("Name cannot be empty");
            return;
        }
        if name == "." || name == ".." {
            self.engine.set_message(format!("Invalid name: {}", name));
            return;
        }

        let path = self.navigator.current_path().join(name);
        let entry = Entry::new_for_creation(path, kind.entry_type());
        let created = self.engine.create(&entry).is_ok();
        self.refresh();
        if created {
            self.navigator.main.focus_name(name);
            self.update_preview();
        }
    }

    /// 방금 쌓인 작업의 결과물이 현재 디렉토리에 있으면 커서를 옮긴다.
    fn focus_committed(&mut self, stack_len_before: usize) {
        if self.engine.actions().len() <= stack_len_before {
            return;
        }
        let target = match self.engine.actions().peek() {
            Some(Action::Paste { destination, .. }) => destination.clone(),
            Some(Action::Create { source }) => source.clone(),
            _ => return,
        };
        if target.parent() != Some(self.navigator.current_path()) {
            return;
        }
        if let Some(name) = target.file_name().map(|n| n.to_string_lossy().to_string()) {
            self.navigator.main.focus_name(&name);
            self.update_preview();
        }
    }
}
