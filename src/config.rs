// Settings - `config.toml` 로드
//
// 모든 키는 선택 항목이다. 파일이 없으면 기본값, 읽기/파싱에 실패하면
// 기본값과 함께 상태 표시줄에 보여줄 문구를 돌려준다.

use crate::models::listing::{ListingOptions, ListingOrder};
use crate::system::trash::TrashBin;
use crate::ui::theme::ThemeOverrides;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 설정 파일 경로를 바꾸는 환경변수
pub const CONFIG_ENV: &str = "TFM_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listing: ListingSettings,
    pub trash: TrashSettings,
    pub theme: ThemeOverrides,
}

/// `[listing]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    pub order: ListingOrder,
    pub show_hidden: bool,
}

impl Default for ListingSettings {
    fn default() -> Self {
        let options = ListingOptions::default();
        Self {
            order: options.order,
            show_hidden: options.show_hidden,
        }
    }
}

/// 휴지통 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashMode {
    #[default]
    System,
    Staging,
}

/// `[trash]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrashSettings {
    pub mode: TrashMode,
    pub staging_dir: Option<PathBuf>,
}

impl Settings {
    /// 설정 파일 위치 (`$TFM_CONFIG` 우선)
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("tfm").join("config.toml"))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid {}", path.display()))
    }

    /// 설정 로드
    ///
    /// 반환값: (설정, 사용자에게 보여줄 경고)
    pub fn load() -> (Self, Option<String>) {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), None),
        }
    }

    /// 지정 경로에서 로드 (파일이 없으면 조용히 기본값)
    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::from_file(path) {
            Ok(settings) => (settings, None),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "settings ignored");
                (
                    Self::default(),
                    Some(format!("Config ignored, using defaults: {}", e)),
                )
            }
        }
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            order: self.listing.order,
            show_hidden: self.listing.show_hidden,
        }
    }

    pub fn trash_bin(&self) -> TrashBin {
        match self.trash.mode {
            TrashMode::System => TrashBin::System,
            TrashMode::Staging => TrashBin::Staging(
                self.trash
                    .staging_dir
                    .clone()
                    .unwrap_or_else(TrashBin::default_staging_dir),
            ),
        }
    }
}
