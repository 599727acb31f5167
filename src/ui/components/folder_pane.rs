// Folder pane component - 디렉토리 목록 창
//
// 뷰포트 구간만 그리고, 선택/강조 행은 창 너비 전체를 칠한다.

use crate::models::listing::DirectoryListing;
use crate::ui::theme::Theme;
use crate::utils::path_display::truncate_end;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Widget},
};

/// 디렉토리 목록 창
pub struct FolderPane<'a> {
    listing: &'a DirectoryListing,
    /// 선택 커서 (메인 창)
    selected: Option<usize>,
    /// 커서 대신 강조할 행 (부모 창의 현재 디렉토리)
    highlighted: Option<usize>,
    theme: &'a Theme,
}

impl<'a> FolderPane<'a> {
    pub fn new(listing: &'a DirectoryListing, theme: &'a Theme) -> Self {
        Self {
            listing,
            selected: None,
            highlighted: None,
            theme,
        }
    }

    /// 선택 인덱스 설정
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    /// 강조 인덱스 설정
    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }
}

impl Widget for FolderPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if let Some(ref error) = self.listing.error {
            let text = truncate_end(error, usize::from(inner.width));
            buf.set_string(inner.x, inner.y, text, self.theme.error_style());
            return;
        }

        let width = usize::from(area.width);
        for (row, (index, entry)) in self
            .listing
            .visible_entries()
            .take(usize::from(inner.height))
            .enumerate()
        {
            let y = inner.y + row as u16;
            let marked = Some(index) == self.selected || Some(index) == self.highlighted;
            let style = self.theme.entry_style(entry.entry_type, marked);
            let name = DirectoryListing::display_name(entry, width);

            if marked {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            }
            buf.set_stringn(inner.x, y, &name, usize::from(inner.width), style);
        }
    }
}
