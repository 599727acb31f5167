use crate::models::entry::Entry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use crate::utils::path_display::truncate_end;
use serde::Deserialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// 목록 정렬 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrder {
    /// OS 열거 순서 그대로
    Raw,
    /// 이름 (대소문자 무시)
    Name,
    /// 디렉토리 먼저, 그 다음 이름
    #[default]
    DirsFirst,
}

/// 스캔 옵션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    pub order: ListingOrder,
    pub show_hidden: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            order: ListingOrder::DirsFirst,
            show_hidden: true,
        }
    }
}

/// 화면에 보이는 인덱스 구간 (양 끝 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: usize,
    pub bottom: usize,
}

impl Viewport {
    /// 구간에 포함된 항목 수
    pub fn len(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.top <= index && index <= self.bottom
    }
}

/// 디렉토리 목록 상태
///
/// 한 디렉토리의 직계 자식과 스크롤 구간을 가진다. 목록이 비었거나
/// 스캔에 실패하면 `viewport`는 `None`이다.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    /// 마지막으로 스캔한 경로
    pub path: PathBuf,
    /// 엔트리 목록
    pub entries: Vec<Entry>,
    /// 스캔 실패 시 인라인으로 보여줄 문구
    pub error: Option<String>,
    viewport: Option<Viewport>,
    /// 테두리 포함 창 높이
    height: usize,
    options: ListingOptions,
}

impl DirectoryListing {
    /// 빈 목록 생성 (아직 스캔 전)
    pub fn new(path: impl Into<PathBuf>, height: usize, options: ListingOptions) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            error: None,
            viewport: None,
            height,
            options,
        }
    }

    /// 경로를 다시 읽는다.
    ///
    /// 실패하면 엔트리를 비우고 `error`에 문구를 남긴 뒤 에러를 그대로 돌려준다.
    pub fn rescan(&mut self, path: &Path, filesystem: &FileSystem) -> Result<()> {
        self.path = path.to_path_buf();

        match filesystem.read_directory(path) {
            Ok(mut entries) => {
                if !self.options.show_hidden {
                    entries.retain(|entry| !entry.name.starts_with('.'));
                }
                sort_entries(&mut entries, self.options.order);

                self.entries = entries;
                self.error = None;
                self.reset_viewport();
                Ok(())
            }
            Err(e) => {
                self.entries.clear();
                self.error = Some(e.inline_message());
                self.viewport = None;
                Err(e)
            }
        }
    }

    /// 테두리 2줄을 뺀 표시 가능 행 수 (최소 1)
    pub fn capacity(&self) -> usize {
        self.height.saturating_sub(2).max(1)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 창 높이 변경
    ///
    /// `top`은 유지하고 `bottom`만 새 용량에 맞게 늘이거나 줄인다.
    pub fn resize(&mut self, height: usize) {
        self.height = height;
        let capacity = self.capacity();
        if let Some(viewport) = self.viewport.as_mut() {
            let last = self.entries.len() - 1;
            viewport.bottom = last.min(viewport.top + capacity - 1);
            // 끝에서 줄어든 경우 앞쪽 여백을 채운다
            let filled = viewport.bottom - viewport.top + 1;
            if filled < capacity {
                viewport.top = viewport.bottom.saturating_sub(capacity - 1);
            }
        }
    }

    /// 구간을 `delta`만큼 평행 이동 (목록 밖으로는 나가지 않음)
    pub fn scroll_by(&mut self, delta: isize) {
        let len = self.entries.len();
        if let Some(viewport) = self.viewport.as_mut() {
            let window = viewport.len();
            let max_top = len - window;
            let top = viewport.top.saturating_add_signed(delta).min(max_top);
            viewport.top = top;
            viewport.bottom = top + window - 1;
        }
    }

    /// `index`가 보이도록 최소한으로 스크롤
    pub fn scroll_to(&mut self, index: usize) {
        let Some(viewport) = self.viewport else {
            return;
        };
        if index < viewport.top {
            self.scroll_by(-((viewport.top - index) as isize));
        } else if index > viewport.bottom {
            self.scroll_by((index - viewport.bottom) as isize);
        }
    }

    /// 화면에 보이는 (인덱스, 엔트리)
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &Entry)> {
        let (skip, take) = match self.viewport {
            Some(viewport) => (viewport.top, viewport.len()),
            None => (0, 0),
        };
        self.entries.iter().enumerate().skip(skip).take(take)
    }

    /// 창 너비에 맞춘 표시 이름
    ///
    /// 이름이 `width - 2`를 넘으면 `width - 5`칸 접두사 뒤에 `...`을 붙인다.
    pub fn display_name(entry: &Entry, width: usize) -> String {
        truncate_end(&entry.name, width.saturating_sub(2))
    }

    fn reset_viewport(&mut self) {
        self.viewport = if self.entries.is_empty() {
            None
        } else {
            Some(Viewport {
                top: 0,
                bottom: (self.entries.len() - 1).min(self.capacity() - 1),
            })
        };
    }
}

fn sort_entries(entries: &mut [Entry], order: ListingOrder) {
    let by_name = |a: &Entry, b: &Entry| -> Ordering {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    };

    match order {
        ListingOrder::Raw => {}
        ListingOrder::Name => entries.sort_by(by_name),
        ListingOrder::DirsFirst => entries.sort_by(|a, b| {
            b.is_folder()
                .cmp(&a.is_folder())
                .then_with(|| by_name(a, b))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::EntryType;
    use std::fs;
    use tempfile::TempDir;

    fn populated(count: usize) -> TempDir {
        let temp = TempDir::new().unwrap();
        for i in 0..count {
            fs::write(temp.path().join(format!("file{:02}.txt", i)), "x").unwrap();
        }
        temp
    }

    #[test]
    fn test_rescan_sets_viewport() {
        let temp = populated(20);
        let mut listing = DirectoryListing::new(temp.path(), 12, ListingOptions::default());

        listing.rescan(temp.path(), &FileSystem::default()).unwrap();

        assert_eq!(listing.len(), 20);
        assert_eq!(listing.capacity(), 10);
        assert_eq!(listing.viewport(), Some(Viewport { top: 0, bottom: 9 }));
        assert!(listing.error.is_none());
    }

    #[test]
    fn test_short_listing_viewport() {
        let temp = populated(3);
        let mut listing = DirectoryListing::new(temp.path(), 12, ListingOptions::default());

        listing.rescan(temp.path(), &FileSystem::default()).unwrap();
        assert_eq!(listing.viewport(), Some(Viewport { top: 0, bottom: 2 }));
    }

    #[test]
    fn test_empty_listing_has_no_viewport() {
        let temp = TempDir::new().unwrap();
        let mut listing = DirectoryListing::new(temp.path(), 12, ListingOptions::default());

        listing.rescan(temp.path(), &FileSystem::default()).unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.viewport(), None);
        assert_eq!(listing.visible_entries().count(), 0);
    }

    #[test]
    fn test_tiny_height_keeps_one_row() {
        let temp = populated(5);
        let mut listing = DirectoryListing::new(temp.path(), 1, ListingOptions::default());

        listing.rescan(temp.path(), &FileSystem::default()).unwrap();
        assert_eq!(listing.capacity(), 1);
        assert_eq!(listing.viewport(), Some(Viewport { top: 0, bottom: 0 }));
    }

    #[test]
    fn test_failed_rescan_records_error() {
        let temp = populated(2);
        let mut listing = DirectoryListing::new(temp.path(), 12, ListingOptions::default());
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();

        let missing = temp.path().join("missing");
        assert!(listing.rescan(&missing, &FileSystem::default()).is_err());
        assert!(listing.entries.is_empty());
        assert_eq!(listing.viewport(), None);
        assert_eq!(listing.error.as_deref(), Some("Folder no longer exists"));
    }

    #[test]
    fn test_dirs_first_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();
        fs::write(temp.path().join("A.txt"), "").unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("Alpha")).unwrap();

        let mut listing = DirectoryListing::new(temp.path(), 12, ListingOptions::default());
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();

        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta", "A.txt", "b.txt"]);
        assert_eq!(listing.entries[0].entry_type, EntryType::Folder);
    }

    #[test]
    fn test_hidden_entries_filtered() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".hidden"), "").unwrap();
        fs::write(temp.path().join("shown"), "").unwrap();

        let options = ListingOptions {
            show_hidden: false,
            ..ListingOptions::default()
        };
        let mut listing = DirectoryListing::new(temp.path(), 12, options);
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();
        assert_eq!(listing.len(), 1);

        let mut all = DirectoryListing::new(temp.path(), 12, ListingOptions::default());
        all.rescan(temp.path(), &FileSystem::default()).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_scroll_by_stays_in_bounds() {
        let temp = populated(20);
        let mut listing = DirectoryListing::new(temp.path(), 7, ListingOptions::default());
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();

        listing.scroll_by(3);
        assert_eq!(listing.viewport(), Some(Viewport { top: 3, bottom: 7 }));

        listing.scroll_by(100);
        assert_eq!(listing.viewport(), Some(Viewport { top: 15, bottom: 19 }));

        listing.scroll_by(-100);
        assert_eq!(listing.viewport(), Some(Viewport { top: 0, bottom: 4 }));
    }

    #[test]
    fn test_scroll_to_is_minimal() {
        let temp = populated(20);
        let mut listing = DirectoryListing::new(temp.path(), 7, ListingOptions::default());
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();

        listing.scroll_to(6);
        assert_eq!(listing.viewport(), Some(Viewport { top: 2, bottom: 6 }));

        listing.scroll_to(4);
        assert_eq!(listing.viewport(), Some(Viewport { top: 2, bottom: 6 }));

        listing.scroll_to(0);
        assert_eq!(listing.viewport(), Some(Viewport { top: 0, bottom: 4 }));
    }

    #[test]
    fn test_resize() {
        let temp = populated(20);
        let mut listing = DirectoryListing::new(temp.path(), 12, ListingOptions::default());
        listing.rescan(temp.path(), &FileSystem::default()).unwrap();
        listing.scroll_by(5);

        listing.resize(7);
        assert_eq!(listing.viewport(), Some(Viewport { top: 5, bottom: 9 }));

        listing.scroll_by(100);
        listing.resize(12);
        assert_eq!(listing.viewport(), Some(Viewport { top: 10, bottom: 19 }));
    }

    #[test]
    fn test_display_name_truncation() {
        let entry = Entry::new_for_creation("/tmp/a_rather_long_name.txt", EntryType::Text);

        assert_eq!(
            DirectoryListing::display_name(&entry, 40),
            "a_rather_long_name.txt"
        );
        // width 12: 10칸 초과 → 7칸 + "..."
        assert_eq!(DirectoryListing::display_name(&entry, 12), "a_rathe...");
    }
}
