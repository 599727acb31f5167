use crate::models::entry::Entry;
use crate::models::listing::{DirectoryListing, ListingOptions};
use crate::system::filesystem::FileSystem;
use std::io::ErrorKind;

/// 미리보기 창 내용
#[derive(Debug, Clone)]
pub enum Preview {
    /// 선택 없음
    Nothing,
    /// 디렉토리 내용
    Folder(DirectoryListing),
    /// 텍스트 앞부분
    Text(Vec<String>),
    /// 읽기 실패 문구
    Error(String),
}

impl Preview {
    /// 선택된 엔트리로 미리보기를 만든다. 실패는 `Error`로 담고 전파하지 않는다.
    ///
    /// `height`/`width`는 테두리를 포함한 창 크기다.
    pub fn load(
        entry: Option<&Entry>,
        height: usize,
        width: usize,
        options: ListingOptions,
        filesystem: &FileSystem,
    ) -> Self {
        let Some(entry) = entry else {
            return Preview::Nothing;
        };

        if entry.is_folder() {
            let mut listing = DirectoryListing::new(&entry.path, height, options);
            // 실패해도 listing.error에 문구가 남는다
            let _ = listing.rescan(&entry.path, filesystem);
            return Preview::Folder(listing);
        }

        let max_lines = height.saturating_sub(2);
        let max_chars = width.saturating_sub(2);
        match filesystem.read_text_head(&entry.path, max_lines) {
            Ok(lines) => Preview::Text(
                lines
                    .into_iter()
                    .map(|line| line.replace('\t', "    ").chars().take(max_chars).collect())
                    .collect(),
            ),
            Err(e) => Preview::Error(
                match e.kind() {
                    ErrorKind::InvalidData => "Bad encoding",
                    ErrorKind::PermissionDenied => "Permission denied",
                    ErrorKind::Unsupported => "Not a regular file",
                    _ => "Unknown error",
                }
                .to_string(),
            ),
        }
    }
}
