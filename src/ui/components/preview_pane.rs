// Preview pane component - 선택 항목 미리보기 창

use crate::models::preview::Preview;
use crate::ui::components::folder_pane::FolderPane;
use crate::ui::theme::Theme;
use crate::models::entry::EntryType;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Widget},
};

/// 미리보기 창
pub struct PreviewPane<'a> {
    preview: &'a Preview,
    theme: &'a Theme,
}

impl<'a> PreviewPane<'a> {
    pub fn new(preview: &'a Preview, theme: &'a Theme) -> Self {
        Self { preview, theme }
    }
}

impl Widget for PreviewPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // 디렉토리는 목록 창을 그대로 쓴다
        if let Preview::Folder(listing) = self.preview {
            FolderPane::new(listing, self.theme).render(area, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        match self.preview {
            Preview::Text(lines) => {
                let style = self.theme.entry_style(EntryType::Text, false);
                for (row, line) in lines.iter().take(usize::from(inner.height)).enumerate() {
                    buf.set_stringn(
                        inner.x,
                        inner.y + row as u16,
                        line,
                        usize::from(inner.width),
                        style,
                    );
                }
            }
            Preview::Error(message) if inner.height > 0 => {
                buf.set_stringn(
                    inner.x,
                    inner.y,
                    message,
                    usize::from(inner.width),
                    self.theme.error_style(),
                );
            }
            _ => {}
        }
    }
}
