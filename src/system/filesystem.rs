use crate::models::entry::{Entry, EntryType};
use crate::system::trash::TrashBin;
use crate::utils::error::{Result, TfmError};
use std::fs::{self, FileTimes, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 미리보기로 읽는 최대 바이트 수
pub const MAX_PREVIEW_BYTES: u64 = 64 * 1024;

/// 현재 사용자 기준 접근 가능 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessFlags {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

/// 파일 시스템 모듈
///
/// 코어가 쓰는 외부 협력자(열거, stat, 생성, 복사, 휴지통, 기본 앱 열기)를
/// 한곳에 모은다.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    trash: TrashBin,
}

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new(trash: TrashBin) -> Self {
        Self { trash }
    }

    /// 사용 중인 휴지통 백엔드
    pub fn trash_bin(&self) -> &TrashBin {
        &self.trash
    }

    /// 디렉토리 읽기
    ///
    /// 직계 자식마다 엔트리 하나를 OS 열거 순서대로 반환합니다.
    /// 개별 항목의 읽기 에러는 건너뜁니다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<Entry>> {
        if !path.exists() {
            return Err(TfmError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(TfmError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| TfmError::from_io(e, path))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            entries.push(Entry::classify(entry.path(), EntryType::Text));
        }
        Ok(entries)
    }

    /// 경로 존재 확인 (깨진 심볼릭 링크도 존재로 본다)
    #[allow(clippy::unused_self)]
    pub fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    /// 디렉토리 여부 확인
    #[allow(clippy::unused_self)]
    pub fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// `inner`가 `outer` 아래(자기 자신 제외)에 있는지
    pub fn is_strict_descendant(inner: &Path, outer: &Path) -> bool {
        let inner = fs::canonicalize(inner).unwrap_or_else(|_| inner.to_path_buf());
        let outer = fs::canonicalize(outer).unwrap_or_else(|_| outer.to_path_buf());
        inner != outer && inner.starts_with(&outer)
    }

    /// 텍스트 파일 앞부분 읽기 (최대 `max_lines`줄)
    ///
    /// 일반 파일만 열고 앞 `MAX_PREVIEW_BYTES`까지만 읽는다.
    /// UTF-8이 아니면 `InvalidData`, 장치/FIFO 등이면 `Unsupported` 에러.
    #[allow(clippy::unused_self)]
    pub fn read_text_head(&self, path: &Path, max_lines: usize) -> io::Result<Vec<String>> {
        if !fs::metadata(path)?.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "not a regular file",
            ));
        }

        let mut bytes = Vec::new();
        fs::File::open(path)?
            .take(MAX_PREVIEW_BYTES)
            .read_to_end(&mut bytes)?;

        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text,
            // 상한에서 잘린 마지막 글자는 버린다
            Err(e) if e.error_len().is_none() => {
                std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default()
            }
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };
        Ok(text.lines().take(max_lines).map(str::to_string).collect())
    }

    /// 두 경로가 같은 위치인지 (심볼릭 링크 해석 후 비교)
    pub fn is_same_path(a: &Path, b: &Path) -> bool {
        let a = fs::canonicalize(a).unwrap_or_else(|_| a.to_path_buf());
        let b = fs::canonicalize(b).unwrap_or_else(|_| b.to_path_buf());
        a == b
    }

    // === 복사 ===

    /// 파일이면 메타데이터 보존 복사, 디렉토리면 트리 전체 복사
    ///
    /// 실패하면 새로 만들던 대상을 지운다. 되돌리기 스택에 오르지 않은
    /// 반쯤 복사된 트리가 남지 않는다.
    pub fn copy_path(&self, src: &Path, dest: &Path) -> Result<()> {
        let Ok(meta) = fs::symlink_metadata(src) else {
            return Err(TfmError::PathNotFound {
                path: src.to_path_buf(),
            });
        };
        let dest_existed = fs::symlink_metadata(dest).is_ok();

        let file_type = meta.file_type();
        let result = if file_type.is_symlink() {
            copy_symlink(src, dest).map_err(|e| copy_error(src, e))
        } else if file_type.is_dir() {
            self.copy_tree(src, dest)
        } else if file_type.is_file() {
            self.copy_file_preserving(src, dest).map(|_| ())
        } else {
            Err(TfmError::CopyFailed {
                path: src.to_path_buf(),
                reason: "not a regular file".to_string(),
            })
        };

        if result.is_err() && !dest_existed {
            if let Err(e) = remove_path(dest) {
                tracing::warn!(path = %dest.display(), error = %e, "partial copy left behind");
            }
        }
        result
    }

    /// 디렉토리 트리 복사
    ///
    /// 대상 디렉토리를 만들기 전에 원본 자식 목록을 먼저 읽어 두므로
    /// 폴더를 자기 자신 안으로 붙여넣어도 끝난다. 심볼릭 링크는 따라가지
    /// 않고 링크로 다시 만들며, 장치/FIFO/소켓은 건너뛴다.
    pub fn copy_tree(&self, src: &Path, dest: &Path) -> Result<()> {
        let children: Vec<(PathBuf, fs::FileType)> = fs::read_dir(src)
            .map_err(|e| copy_error(src, e))?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                Some((entry.path(), entry.file_type().ok()?))
            })
            .collect();

        fs::create_dir_all(dest).map_err(|e| copy_error(dest, e))?;

        for (child, file_type) in children {
            let Some(name) = child.file_name() else {
                continue;
            };
            let target = dest.join(name);
            if file_type.is_symlink() {
                copy_symlink(&child, &target).map_err(|e| copy_error(&child, e))?;
            } else if file_type.is_dir() {
                self.copy_tree(&child, &target)?;
            } else if file_type.is_file() {
                self.copy_file_preserving(&child, &target)?;
            } else {
                tracing::debug!(path = %child.display(), "skipped special file");
            }
        }

        // 자식을 모두 쓴 뒤에 권한을 맞춘다 (읽기 전용 디렉토리 대비)
        if let Ok(meta) = fs::metadata(src) {
            let _ = fs::set_permissions(dest, meta.permissions());
        }
        Ok(())
    }

    /// 파일 복사 (권한 + 접근/수정 시각 보존)
    ///
    /// 반환값: 복사된 바이트 수
    #[allow(clippy::unused_self)]
    pub fn copy_file_preserving(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src == dest {
            return Err(TfmError::CopyFailed {
                path: src.to_path_buf(),
                reason: "source and destination are the same".to_string(),
            });
        }

        let bytes = fs::copy(src, dest).map_err(|e| copy_error(src, e))?;

        // 시각 보존은 best-effort
        if let Ok(meta) = fs::metadata(src) {
            let mut times = FileTimes::new();
            if let Ok(modified) = meta.modified() {
                times = times.set_modified(modified);
            }
            if let Ok(accessed) = meta.accessed() {
                times = times.set_accessed(accessed);
            }
            let handle = OpenOptions::new()
                .write(true)
                .open(dest)
                .or_else(|_| fs::File::open(dest));
            if let Ok(file) = handle {
                let _ = file.set_times(times);
            }
        }

        Ok(bytes)
    }

    // === 생성 ===

    /// 빈 파일 생성 (이미 있으면 에러)
    #[allow(clippy::unused_self)]
    pub fn create_file(&self, path: &Path) -> Result<()> {
        if fs::symlink_metadata(path).is_ok() {
            return Err(TfmError::FileExists {
                path: path.to_path_buf(),
            });
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| create_error(path, e))
    }

    /// 빈 디렉토리 생성 (이미 있으면 에러)
    #[allow(clippy::unused_self)]
    pub fn create_directory(&self, path: &Path) -> Result<()> {
        if fs::symlink_metadata(path).is_ok() {
            return Err(TfmError::FileExists {
                path: path.to_path_buf(),
            });
        }

        fs::create_dir(path).map_err(|e| create_error(path, e))
    }

    // === 휴지통 ===

    /// 휴지통으로 이동
    pub fn trash(&self, path: &Path) -> Result<()> {
        self.trash.discard(path)
    }

    // === 외부 프로그램 ===

    /// OS 기본 프로그램으로 파일 열기
    ///
    /// 프로세스를 띄우기만 하고 종료를 기다리지 않는다.
    #[allow(clippy::unused_self)]
    pub fn open_with_default_app(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(TfmError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut command = launcher_command(path);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        command
            .spawn()
            .map(|_| ())
            .map_err(|e| TfmError::ExternalOpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// 수정 시각 (stat 실패 시 None)
    #[allow(clippy::unused_self)]
    pub fn modified(&self, path: &Path) -> Option<std::time::SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    /// 현재 사용자 기준 R/W/X (best-effort)
    #[allow(clippy::unused_self)]
    pub fn access_flags(&self, path: &Path) -> AccessFlags {
        let Ok(meta) = fs::metadata(path) else {
            return AccessFlags::default();
        };

        let writable = !meta.permissions().readonly();

        // 파일은 열지 않고 권한 비트로만 판단한다 (FIFO를 열면 멈춘다)
        #[cfg(unix)]
        let (readable, executable) = {
            use std::os::unix::fs::PermissionsExt;
            let mode = meta.permissions().mode();
            let readable = if meta.is_dir() {
                fs::read_dir(path).is_ok()
            } else {
                mode & 0o444 != 0
            };
            (readable, mode & 0o111 != 0)
        };
        #[cfg(not(unix))]
        let (readable, executable) = {
            let readable = !meta.is_dir() || fs::read_dir(path).is_ok();
            let executable = meta.is_dir()
                || Entry::classify(path, EntryType::Other).entry_type == EntryType::Executable;
            (readable, executable)
        };

        AccessFlags {
            readable,
            writable,
            executable,
        }
    }
}

#[cfg(target_os = "macos")]
fn launcher_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(windows)]
fn launcher_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", windows)))]
fn launcher_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// 심볼릭 링크를 같은 대상을 가리키는 링크로 다시 만든다
pub(crate) fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(fs::read_link(src)?, dest)
    }
    #[cfg(not(unix))]
    {
        if src.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Directory symlink is not supported for copy",
            ));
        }
        fs::copy(src, dest).map(|_| ())
    }
}

/// 링크를 따라가지 않고 경로 하나를 지운다
pub(crate) fn remove_path(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn copy_error(path: &Path, e: io::Error) -> TfmError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        TfmError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        TfmError::CopyFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

fn create_error(path: &Path, e: io::Error) -> TfmError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => TfmError::PermissionDenied {
            path: path.to_path_buf(),
        },
        io::ErrorKind::AlreadyExists => TfmError::FileExists {
            path: path.to_path_buf(),
        },
        _ => TfmError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}
