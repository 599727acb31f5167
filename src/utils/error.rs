use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TfmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("Copy failed: {} ({reason})", path.display())]
    CopyFailed { path: PathBuf, reason: String },

    #[error("Move to trash failed: {} ({reason})", path.display())]
    TrashFailed { path: PathBuf, reason: String },

    #[error("Create failed: {} ({reason})", path.display())]
    CreateFailed { path: PathBuf, reason: String },

    #[error("Cannot paste {} into itself", path.display())]
    RecursiveCopy { path: PathBuf },

    #[error("Open failed: {} ({reason})", path.display())]
    ExternalOpenFailed { path: PathBuf, reason: String },
}

impl TfmError {
    /// io::Error를 경로 정보가 담긴 에러로 변환
    ///
    /// 권한/존재 여부는 별도 변형으로 분리하고 나머지는 `Io`로 남깁니다.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => TfmError::PermissionDenied {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::NotFound => TfmError::PathNotFound {
                path: path.to_path_buf(),
            },
            _ => TfmError::Io(err),
        }
    }

    /// 패널에 인라인으로 보여줄 짧은 문구
    pub fn inline_message(&self) -> String {
        match self {
            TfmError::PermissionDenied { .. } => "Not enough permissions".to_string(),
            TfmError::PathNotFound { .. } => "Folder no longer exists".to_string(),
            TfmError::NotADirectory { .. } => "Not a folder".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TfmError>;
