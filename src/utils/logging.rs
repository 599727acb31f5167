// File logging - TUI가 stdout을 점유하므로 로그는 파일로만 기록
//
// TFM_LOG 환경변수가 있을 때만 활성화 (예: TFM_LOG=debug, TFM_LOG=tfm=trace)

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TFM_LOG";

/// 로그 파일 경로 (`<data_local_dir>/tfm/tfm.log`)
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("tfm").join("tfm.log"))
}

/// 파일 로거 초기화
///
/// 반환값: 로그가 기록되는 경로 (비활성 시 None)
pub fn init() -> anyhow::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let Some(path) = log_file_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_new(directives.trim()).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(Some(path))
}
