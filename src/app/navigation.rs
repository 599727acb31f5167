use super::*;
use crate::core::commands::Command;
use crate::app::text_edit::PromptKind;
use ratatui::layout::Rect;

impl App {
    /// 논리 명령 하나 실행
    pub fn execute(&mut self, command: Command) {
        tracing::debug!(command = command.id(), "execute");
        match command {
            Command::NavigateParent => self.go_to_parent(),
            Command::NavigateEnter => self.enter_selected(),
            Command::MoveUp => self.move_selection_up(),
            Command::MoveDown => self.move_selection_down(),
            Command::Copy => self.copy_selected(),
            Command::Cut => self.cut_selected(),
            Command::Paste => self.paste_here(),
            Command::Delete => self.delete_selected(),
            Command::Undo => self.undo_last(),
            Command::CreateFolder => self.start_prompt(PromptKind::Folder),
            Command::CreateFile => self.start_prompt(PromptKind::File),
            Command::Open => self.open_selected(),
            Command::Refresh => self.refresh(),
            Command::Quit => self.quit(),
        }
    }

    // === 커서 이동 ===

    pub fn move_selection_up(&mut self) {
        self.navigator.main.select_up();
        self.update_preview();
    }

    pub fn move_selection_down(&mut self) {
        self.navigator.main.select_down();
        self.update_preview();
    }

    // === 디렉토리 이동 ===

    /// 선택한 디렉토리로 들어가기 (파일이면 무시)
    pub fn enter_selected(&mut self) {
        let result = self.navigator.enter_selected(self.engine.filesystem());
        self.report(result);
        self.update_preview();
    }

    /// 부모 디렉토리로 이동
    pub fn go_to_parent(&mut self) {
        let result = self.navigator.leave_to_parent(self.engine.filesystem());
        self.report(result);
        self.update_preview();
    }

    /// 두 목록 다시 읽기
    ///
    /// 읽기 실패는 목록 안에 표시되므로 상태 문구는 건드리지 않는다.
    pub fn refresh(&mut self) {
        if let Err(e) = self.navigator.refresh(self.engine.filesystem()) {
            tracing::debug!(error = %e, "refresh left an inline error");
        }
        self.update_preview();
    }

    /// 터미널 크기 변경
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout.update(Rect::new(0, 0, width, height));
        let pane_height = self.layout.pane_height();
        self.navigator.resize(pane_height, pane_height);
        self.update_preview();
        self.update_path_display();
    }

    /// 선택 항목 기준으로 미리보기 다시 만들기
    pub fn update_preview(&mut self) {
        let area = self.layout.areas().preview_pane;
        self.preview = Preview::load(
            self.navigator.main.selected_entry(),
            usize::from(area.height),
            usize::from(area.width),
            self.settings.listing_options(),
            self.engine.filesystem(),
        );
    }

    /// 실패를 상태 문구로 남긴다
    pub(super) fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "command failed");
            self.engine.set_message(e.to_string());
        }
    }
}
