// Trash - 복구 가능한 삭제 (이동)
//
// System: 플랫폼 휴지통 (trash crate)
// Staging: 로컬 보관 디렉토리로 이동 (휴지통이 없는 환경/테스트용)

use crate::system::filesystem::{copy_symlink, remove_path};
use crate::utils::error::{Result, TfmError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// 휴지통 백엔드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrashBin {
    /// 플랫폼 휴지통
    #[default]
    System,
    /// 지정한 디렉토리로 이동
    Staging(PathBuf),
}

impl TrashBin {
    /// 기본 보관 디렉토리 (`<data_local_dir>/tfm/trash`)
    pub fn default_staging_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("tfm")
            .join("trash")
    }

    /// 경로를 휴지통으로 보낸다.
    pub fn discard(&self, path: &Path) -> Result<()> {
        if fs::symlink_metadata(path).is_err() {
            return Err(TfmError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        match self {
            TrashBin::System => trash::delete(path).map_err(|e| TfmError::TrashFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
            TrashBin::Staging(dir) => move_to_staging(dir, path).map(|_| ()),
        }
    }
}

/// 보관 디렉토리로 이동하고 이동된 위치를 반환
fn move_to_staging(dir: &Path, path: &Path) -> Result<PathBuf> {
    let trash_failed = |reason: String| TfmError::TrashFailed {
        path: path.to_path_buf(),
        reason,
    };

    fs::create_dir_all(dir).map_err(|e| trash_failed(e.to_string()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| trash_failed("path has no file name".to_string()))?
        .to_string_lossy()
        .to_string();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    // 같은 밀리초에 같은 이름이 들어오면 카운터를 붙인다
    let mut target = dir.join(format!("{}.{}", timestamp, file_name));
    let mut counter = 1u32;
    while fs::symlink_metadata(&target).is_ok() {
        target = dir.join(format!("{}-{}.{}", timestamp, counter, file_name));
        counter += 1;
    }

    // 다른 파일시스템이면 rename이 실패하므로 복사 후 삭제
    if fs::rename(path, &target).is_err() {
        if let Err(e) = copy_recursive(path, &target) {
            let _ = remove_path(&target);
            return Err(trash_failed(e.to_string()));
        }
        remove_path(path).map_err(|e| trash_failed(e.to_string()))?;
    }

    Ok(target)
}

/// 링크는 따라가지 않고 링크로 옮긴다
fn copy_recursive(source: &Path, dest: &Path) -> std::io::Result<()> {
    let file_type = fs::symlink_metadata(source)?.file_type();
    if file_type.is_symlink() {
        copy_symlink(source, dest)
    } else if file_type.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        fs::copy(source, dest).map(|_| ())
    }
}
