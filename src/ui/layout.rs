// Layout system - 3열 레이아웃
//
// 상단 바 | [부모 1/5 | 메인 2/5 | 미리보기 나머지] | 하단 바
// 최소 크기보다 작으면 경고 화면만 그린다.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 3열 화면
    Columns,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    /// 현재 경로 바
    pub top_bar: Rect,
    /// 부모 디렉토리
    pub parent_pane: Rect,
    /// 현재 디렉토리
    pub main_pane: Rect,
    /// 미리보기
    pub preview_pane: Rect,
    /// 권한 / 메시지 / 크기 바
    pub bottom_bar: Rect,
}

/// 레이아웃 매니저
#[derive(Debug, Clone)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        let mut manager = Self {
            mode: LayoutMode::Columns,
            terminal_size: (0, 0),
            areas: LayoutAreas::default(),
        };
        manager.update(Rect::new(0, 0, 80, 24));
        manager
    }
}

impl LayoutManager {
    pub fn new(width: u16, height: u16) -> Self {
        let mut manager = Self::default();
        manager.update(Rect::new(0, 0, width, height));
        manager
    }

    /// 터미널 크기에 따라 레이아웃 모드 결정
    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else {
            LayoutMode::Columns
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    ///
    /// 경고 모드에서도 열 크기는 계산해 두어 목록 용량이 항상 정의되게 한다.
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = Self::calculate_areas(area);
    }

    fn calculate_areas(area: Rect) -> LayoutAreas {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // 상단 바
                Constraint::Min(0),    // 3열
                Constraint::Length(1), // 하단 바
            ])
            .split(area);

        let parent_width = area.width / 5;
        let main_width = area.width * 2 / 5;
        let column_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(parent_width),
                Constraint::Length(main_width),
                Constraint::Min(0),
            ])
            .split(vertical_chunks[1]);

        LayoutAreas {
            top_bar: vertical_chunks[0],
            parent_pane: column_chunks[0],
            main_pane: column_chunks[1],
            preview_pane: column_chunks[2],
            bottom_bar: vertical_chunks[2],
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// 세 열 공통 높이 (테두리 포함)
    pub fn pane_height(&self) -> usize {
        usize::from(self.areas.main_pane.height)
    }
}
