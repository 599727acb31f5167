use crate::config::Settings;
use crate::core::commands::hint_line;
use crate::core::navigator::NavigationController;
use crate::core::processor::FileOperationEngine;
use crate::models::preview::Preview;
use crate::system::filesystem::FileSystem;
use crate::ui::{LayoutManager, Theme};
use crate::utils::error::Result;
use crate::utils::formatter::{format_access, format_date, format_size_detail};
use crate::utils::path_display::truncate_path_buf;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

mod navigation;
mod operations;
pub mod text_edit;

use text_edit::NamePrompt;

/// 애플리케이션 상태
///
/// 명령 하나를 끝까지 처리한 뒤 다음 입력을 받는다 (단일 스레드).
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 설정 파일 내용
    pub settings: Settings,
    /// 색상
    pub theme: Theme,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 부모 / 현재 디렉토리 목록
    pub navigator: NavigationController,
    /// 클립보드, 되돌리기 스택, 상태 문구
    pub engine: FileOperationEngine,
    /// 선택 항목 미리보기
    pub preview: Preview,
    /// 이름 입력 중이면 Some
    pub prompt: Option<NamePrompt>,
    /// 상단 바에 그릴 경로 (경로나 폭이 바뀔 때만 다시 만든다)
    pub path_display: String,
}

impl App {
    /// 시작 디렉토리로 앱을 만든다.
    ///
    /// `notice`는 첫 화면 하단 바에 보일 문구 (설정 파일 경고 등).
    pub fn new(
        start: &Path,
        settings: Settings,
        notice: Option<String>,
        (width, height): (u16, u16),
    ) -> Result<Self> {
        let filesystem = FileSystem::new(settings.trash_bin());
        tracing::debug!(trash = ?filesystem.trash_bin(), "file system ready");
        let layout = LayoutManager::new(width, height);
        let pane_height = layout.pane_height();
        let navigator = NavigationController::open(
            start,
            pane_height,
            pane_height,
            settings.listing_options(),
            &filesystem,
        )?;
        let theme = Theme::default().with_overrides(&settings.theme);

        let mut engine = FileOperationEngine::new(filesystem);
        if let Some(notice) = notice {
            engine.set_message(notice);
        }

        let mut app = Self {
            should_quit: false,
            settings,
            theme,
            layout,
            navigator,
            engine,
            preview: Preview::Nothing,
            prompt: None,
            path_display: String::new(),
        };
        app.update_preview();
        app.sync_path_display();
        Ok(app)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn filesystem(&self) -> &FileSystem {
        self.engine.filesystem()
    }

    /// 상단 바 오른쪽 단축키 안내 (좁으면 생략)
    pub fn top_bar_hints(&self) -> String {
        let hints = hint_line();
        if hints.width() + 12 <= usize::from(self.layout.areas().top_bar.width) {
            hints
        } else {
            String::new()
        }
    }

    /// 현재 경로가 바뀌었으면 상단 바 경로를 다시 만든다.
    ///
    /// 반환값: 다시 만들었는지 여부
    pub fn sync_path_display(&mut self) -> bool {
        if !self.navigator.take_path_changed() {
            return false;
        }
        tracing::debug!(path = %self.navigator.current_path().display(), "current folder changed");
        self.update_path_display();
        true
    }

    /// 상단 바 폭에 맞춰 경로 문자열 계산
    pub(crate) fn update_path_display(&mut self) {
        let width = usize::from(self.layout.areas().top_bar.width);
        let hints_width = self.top_bar_hints().width();
        let path_width = width.saturating_sub(hints_width + 1);
        self.path_display = truncate_path_buf(self.navigator.current_path(), path_width);
    }

    /// 하단 바 세 칸: 권한 / 상태 문구 / 수정 시각과 크기
    ///
    /// 선택이 없으면 좌우는 빈 문자열.
    pub fn bottom_bar_sections(&self) -> (String, String, String) {
        let message = self.engine.message().to_string();
        let Some(entry) = self.navigator.main.selected_entry() else {
            return (String::new(), message, String::new());
        };

        let flags = self.filesystem().access_flags(&entry.path);
        let left = format!(
            "Permissions: {}",
            format_access(flags.readable, flags.writable, flags.executable)
        );
        let size = format!("Size: {}", format_size_detail(entry.size));
        let right = match self.filesystem().modified(&entry.path) {
            Some(time) => format!("{}  {}", format_date(time), size),
            None => size,
        };
        (left, message, right)
    }
}
