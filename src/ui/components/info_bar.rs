// Info bar component - 한 줄 정보 바
//
// 왼쪽 / 가운데 / 오른쪽 세 칸. 공간이 모자라면 가운데부터 자른다.

use crate::utils::path_display::truncate_end;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// 정보 바 컴포넌트
#[derive(Default)]
pub struct InfoBar<'a> {
    left: &'a str,
    middle: &'a str,
    right: &'a str,
    style: Style,
    left_style: Option<Style>,
}

impl<'a> InfoBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, text: &'a str) -> Self {
        self.left = text;
        self
    }

    pub fn middle(mut self, text: &'a str) -> Self {
        self.middle = text;
        self
    }

    pub fn right(mut self, text: &'a str) -> Self {
        self.right = text;
        self
    }

    /// 바 전체 스타일
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// 왼쪽 칸만 다른 스타일 (상단 경로)
    pub fn left_style(mut self, style: Style) -> Self {
        self.left_style = Some(style);
        self
    }
}

impl Widget for InfoBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.style);

        let width = usize::from(area.width);
        let right = truncate_end(self.right, width);
        let right_width = right.width();
        let left = truncate_end(self.left, width.saturating_sub(right_width + 1));
        let left_width = left.width();

        // 좌우 사이에 가운데 칸을 둔다 (양쪽 최소 한 칸 여백)
        let free = width.saturating_sub(left_width + right_width);
        let middle = truncate_end(self.middle, free.saturating_sub(2));
        let middle_width = middle.width();
        let gap = free.saturating_sub(middle_width) / 2;

        let y = area.y;
        buf.set_string(area.x, y, &left, self.left_style.unwrap_or(self.style));
        if !middle.is_empty() {
            let x = area.x + (left_width + gap) as u16;
            buf.set_string(x, y, &middle, self.style);
        }
        if !right.is_empty() {
            let x = area.x + (width - right_width) as u16;
            buf.set_string(x, y, &right, self.style);
        }
    }
}
