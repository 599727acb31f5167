// Name prompt component - 이름 입력 상자
//
// 화면 중앙의 3줄 상자. 제목은 테두리에, 값은 가운데 줄에 그린다.

use crate::app::text_edit::{NamePrompt, NAME_MAX_CHARS};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 상자 높이 (테두리 포함)
const BOX_HEIGHT: u16 = 3;

/// 이름 입력 상자
pub struct PromptBox<'a> {
    prompt: &'a NamePrompt,
    theme: &'a Theme,
}

impl<'a> PromptBox<'a> {
    pub fn new(prompt: &'a NamePrompt, theme: &'a Theme) -> Self {
        Self { prompt, theme }
    }

    /// 상자 영역 계산 (화면 중앙)
    pub fn area(&self, screen: Rect) -> Rect {
        let title_width = self.prompt.kind.title().width() + 4;
        let wanted = (NAME_MAX_CHARS + 4)
            .max(self.prompt.value().width() + 4)
            .max(title_width) as u16;
        let width = wanted.min(screen.width);
        let height = BOX_HEIGHT.min(screen.height);
        Rect::new(
            screen.x + (screen.width - width) / 2,
            screen.y + (screen.height - height) / 2,
            width,
            height,
        )
    }

    /// 터미널 커서 위치 (입력 줄 안)
    pub fn cursor_position(&self, screen: Rect) -> Position {
        let area = self.area(screen);
        let before: usize = self
            .prompt
            .value()
            .chars()
            .take(self.prompt.cursor_chars())
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let max_x = (area.x + area.width).saturating_sub(2);
        let x = (area.x + 2 + before as u16).min(max_x);
        Position::new(x, area.y + 1)
    }
}

impl Widget for PromptBox<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let area = self.area(screen);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.prompt.kind.title()))
            .border_style(self.theme.border_style())
            .style(self.theme.bar_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height == 0 {
            return;
        }
        buf.set_stringn(
            inner.x + 1,
            inner.y,
            self.prompt.value(),
            usize::from(inner.width - 1),
            self.theme.bar_style(),
        );
    }
}
