use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// 엔트리 타입
///
/// 새 변형을 추가하면 테마 매핑, 미리보기, 생성 로직의 `match`가 모두
/// 컴파일 에러로 알려준다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// 실행 파일
    Executable,
    /// 디렉토리
    Folder,
    /// 텍스트 (스캔 시 기본값)
    Text,
    /// 인코딩된 바이너리
    Encoded,
    /// 기타
    Other,
}

/// POSIX 권한 비트가 없는 플랫폼에서 실행 파일로 취급할 확장자
#[cfg(not(unix))]
const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com", "ps1"];

/// 경로 하나의 분류된 스냅샷
///
/// 스캔마다 새로 만든다. 스캔 사이에 재사용하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 전체 경로
    pub path: PathBuf,
    /// 파일/디렉토리 이름
    pub name: String,
    /// 분류 결과
    pub entry_type: EntryType,
    /// 바이트 단위 크기 (stat 실패 시 0)
    pub size: u64,
}

impl Entry {
    /// 경로를 분류한다.
    ///
    /// 우선순위: 디렉토리 → 실행 권한 → `default_type`.
    /// 존재하지 않는 경로여도 실패하지 않고 크기 0의 엔트리를 돌려준다.
    pub fn classify(path: impl Into<PathBuf>, default_type: EntryType) -> Self {
        let path = path.into();
        let metadata = path.metadata().ok();

        let entry_type = match &metadata {
            Some(m) if m.is_dir() => EntryType::Folder,
            Some(m) if m.is_file() && is_executable(&path, m) => EntryType::Executable,
            _ => default_type,
        };
        let size = metadata.as_ref().map_or(0, Metadata::len);

        Self {
            name: file_name_of(&path),
            path,
            entry_type,
            size,
        }
    }

    /// 아직 존재하지 않는 경로에 대한 엔트리 (생성 요청용)
    pub fn new_for_creation(path: impl Into<PathBuf>, entry_type: EntryType) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            path,
            entry_type,
            size: 0,
        }
    }

    /// 디렉토리 여부
    pub fn is_folder(&self) -> bool {
        self.entry_type == EntryType::Folder
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(unix)]
fn is_executable(_path: &Path, metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    // owner, group, other 중 하나라도
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(path: &Path, _metadata: &Metadata) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            EXECUTABLE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
