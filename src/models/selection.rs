use crate::models::entry::Entry;
use crate::models::listing::DirectoryListing;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use std::path::Path;

/// 선택 커서가 붙은 디렉토리 목록
///
/// 목록이 비어 있지 않으면 커서는 항상 `[0, len-1]` 안에 있고
/// 뷰포트 구간 안에 보인다. 비어 있으면 커서는 `None`이다.
#[derive(Debug, Clone)]
pub struct SelectableListing {
    pub listing: DirectoryListing,
    cursor: Option<usize>,
}

impl SelectableListing {
    pub fn new(listing: DirectoryListing) -> Self {
        let mut selectable = Self {
            listing,
            cursor: None,
        };
        selectable.reset();
        selectable
    }

    /// 다시 스캔하고 기존 커서를 새 목록에 맞춰 자른다.
    pub fn rescan(&mut self, path: &Path, filesystem: &FileSystem) -> Result<()> {
        let result = self.listing.rescan(path, filesystem);
        self.clamp();
        result
    }

    /// 선택 인덱스
    pub fn selected(&self) -> Option<usize> {
        self.cursor
    }

    /// 선택된 엔트리
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.cursor.and_then(|index| self.listing.entries.get(index))
    }

    /// 첫 항목으로 이동 (새 디렉토리 진입 시)
    pub fn reset(&mut self) {
        self.cursor = if self.listing.is_empty() { None } else { Some(0) };
        self.listing.scroll_to(0);
    }

    /// 아래로 한 칸
    pub fn select_down(&mut self) {
        let Some(index) = self.cursor else { return };
        let last = self.listing.len() - 1;
        self.move_to(index.saturating_add(1).min(last));
    }

    /// 위로 한 칸
    pub fn select_up(&mut self) {
        let Some(index) = self.cursor else { return };
        self.move_to(index.saturating_sub(1));
    }

    /// 이름이 같은 엔트리로 커서 이동
    ///
    /// 반환값: 찾았는지 여부
    pub fn focus_name(&mut self, name: &str) -> bool {
        match self.listing.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                self.move_to(index);
                true
            }
            None => false,
        }
    }

    /// 창 높이 변경 후에도 선택 항목이 보이도록 한다.
    pub fn resize(&mut self, height: usize) {
        self.listing.resize(height);
        if let Some(index) = self.cursor {
            self.listing.scroll_to(index);
        }
    }

    fn move_to(&mut self, index: usize) {
        self.cursor = Some(index);
        self.listing.scroll_to(index);
    }

    fn clamp(&mut self) {
        if self.listing.is_empty() {
            self.cursor = None;
            return;
        }
        let last = self.listing.len() - 1;
        let index = self.cursor.unwrap_or(0).min(last);
        self.move_to(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{ListingOptions, Viewport};
    use std::fs;
    use tempfile::TempDir;

    fn selectable(count: usize, height: usize) -> (TempDir, SelectableListing) {
        let temp = TempDir::new().unwrap();
        for i in 0..count {
            fs::write(temp.path().join(format!("item{:02}", i)), "x").unwrap();
        }
        let mut listing =
            SelectableListing::new(DirectoryListing::new(temp.path(), height, ListingOptions::default()));
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();
        listing.reset();
        (temp, listing)
    }

    fn assert_visible(listing: &SelectableListing) {
        let index = listing.selected().unwrap();
        let viewport = listing.listing.viewport().unwrap();
        assert!(viewport.contains(index), "{:?} does not contain {}", viewport, index);
        assert!(viewport.len() <= listing.listing.capacity());
    }

    #[test]
    fn test_select_bounds() {
        let (_temp, mut listing) = selectable(3, 12);

        listing.select_up();
        assert_eq!(listing.selected(), Some(0));

        listing.select_down();
        listing.select_down();
        listing.select_down();
        assert_eq!(listing.selected(), Some(2));
        assert_eq!(listing.selected_entry().unwrap().name, "item02");
    }

    #[test]
    fn test_selection_stays_in_viewport() {
        let (_temp, mut listing) = selectable(20, 7);

        for _ in 0..25 {
            listing.select_down();
            assert_visible(&listing);
        }
        assert_eq!(listing.selected(), Some(19));
        assert_eq!(listing.listing.viewport(), Some(Viewport { top: 15, bottom: 19 }));

        for _ in 0..25 {
            listing.select_up();
            assert_visible(&listing);
        }
        assert_eq!(listing.listing.viewport(), Some(Viewport { top: 0, bottom: 4 }));
    }

    #[test]
    fn test_scroll_shifts_by_one() {
        let (_temp, mut listing) = selectable(10, 7);

        for _ in 0..5 {
            listing.select_down();
        }
        assert_eq!(listing.selected(), Some(5));
        assert_eq!(listing.listing.viewport(), Some(Viewport { top: 1, bottom: 5 }));
    }

    #[test]
    fn test_empty_listing_no_selection() {
        let (_temp, mut listing) = selectable(0, 12);

        assert_eq!(listing.selected(), None);
        listing.select_down();
        listing.select_up();
        assert_eq!(listing.selected(), None);
        assert!(listing.selected_entry().is_none());
    }

    #[test]
    fn test_rescan_clamps_and_keeps_visible() {
        let (temp, mut listing) = selectable(20, 7);
        for _ in 0..19 {
            listing.select_down();
        }

        for i in 5..20 {
            fs::remove_file(temp.path().join(format!("item{:02}", i))).unwrap();
        }
        listing
            .rescan(temp.path(), &FileSystem::default())
            .unwrap();

        assert_eq!(listing.selected(), Some(4));
        assert_visible(&listing);
    }

    #[test]
    fn test_rescan_failure_drops_selection() {
        let (temp, mut listing) = selectable(3, 12);

        let missing = temp.path().join("gone");
        assert!(listing.rescan(&missing, &FileSystem::default()).is_err());
        assert_eq!(listing.selected(), None);
    }

    #[test]
    fn test_focus_name() {
        let (_temp, mut listing) = selectable(20, 7);

        assert!(listing.focus_name("item12"));
        assert_eq!(listing.selected(), Some(12));
        assert_visible(&listing);

        assert!(!listing.focus_name("nope"));
        assert_eq!(listing.selected(), Some(12));
    }

    #[test]
    fn test_resize_keeps_selection_visible() {
        let (_temp, mut listing) = selectable(20, 12);
        listing.focus_name("item09");

        listing.resize(5);
        assert_visible(&listing);
    }
}
