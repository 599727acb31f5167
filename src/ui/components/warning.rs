// Warning screen component - 경고 화면 컴포넌트
//
// 터미널이 너무 작을 때 표시되는 경고 화면

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::theme::Theme;

/// 경고 화면 컴포넌트
pub struct WarningScreen<'a> {
    /// 현재 터미널 크기
    current_size: (u16, u16),
    theme: &'a Theme,
}

impl<'a> WarningScreen<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            current_size: (0, 0),
            theme,
        }
    }

    /// 현재 터미널 크기 설정
    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }
}

impl Widget for WarningScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = self.theme.bar_style();
        buf.set_style(area, base);

        let alert = self.theme.error_style().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled("Terminal too small", alert)),
            Line::from(vec![
                Span::styled("Current: ", base),
                Span::styled(
                    format!("{}x{}", self.current_size.0, self.current_size.1),
                    base.add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Required: ", base),
                Span::styled(
                    format!("{}x{}", MIN_WIDTH, MIN_HEIGHT),
                    base.add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "q to quit",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];

        // 세로 가운데 정렬
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let body = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(body, buf);
    }
}
