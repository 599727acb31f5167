//! 파일 작업 모델
//!
//! 되돌리기 스택과 클립보드. 각 작업은 자기 되돌리기 방식을 직접 가진다.

use crate::models::entry::Entry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 클립보드 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOperation {
    /// 복사
    Copy,
    /// 잘라내기 (붙여넣기 후 원본은 휴지통으로)
    Cut,
}

/// 붙여넣기를 기다리는 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClipboard {
    pub operation: ClipboardOperation,
    pub entry: Entry,
}

/// 완료된 파일 작업 (되돌리기 단위)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `source`를 `destination`으로 붙여넣음
    Paste {
        source: PathBuf,
        destination: PathBuf,
    },
    /// `source`를 휴지통으로 보냄
    Delete { source: PathBuf },
    /// `source`를 새로 만듦
    Create { source: PathBuf },
}

impl Action {
    /// 작업을 되돌린다.
    ///
    /// 반환값: 상태 표시줄에 보여줄 문구
    pub fn undo(&self, filesystem: &FileSystem) -> Result<String> {
        match self {
            Action::Paste {
                source,
                destination,
            } => {
                // 잘라내기였다면 원본이 없으므로 사본에서 복원
                if !filesystem.exists(source) {
                    filesystem.copy_path(destination, source)?;
                }
                filesystem.trash(destination)?;
                Ok(format!("Undid paste of {}", display_name(destination)))
            }
            Action::Create { source } => {
                filesystem.trash(source)?;
                Ok(format!("Undid creation of {}", display_name(source)))
            }
            Action::Delete { source } => Ok(format!(
                "Deleting {} cannot be undone",
                display_name(source)
            )),
        }
    }

    /// 로그/메시지용 짧은 설명
    pub fn describe(&self) -> String {
        match self {
            Action::Paste {
                source,
                destination,
            } => format!("paste {} -> {}", source.display(), destination.display()),
            Action::Delete { source } => format!("delete {}", source.display()),
            Action::Create { source } => format!("create {}", source.display()),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 되돌리기 스택 (LIFO, 병합 없음)
#[derive(Debug, Clone, Default)]
pub struct ActionStack {
    actions: Vec<Action>,
}

impl ActionStack {
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn pop(&mut self) -> Option<Action> {
        self.actions.pop()
    }

    pub fn peek(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
