use crate::models::entry::EntryType;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// 색상 테마
///
/// 엔트리 종류별 색과 바/강조 색을 가진다. 설정 파일의 `[theme]`
/// 섹션으로 항목별로 덮어쓸 수 있다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 엔트리 종류
    pub executable: ColorDef,
    pub folder: ColorDef,
    pub text: ColorDef,
    pub encoded: ColorDef,
    pub other: ColorDef,

    // 선택 항목
    pub selected_fg: ColorDef,
    pub selected_bg: ColorDef,

    // 인라인 에러
    pub error_fg: ColorDef,
    pub error_bg: ColorDef,

    // 상/하단 바, 테두리
    pub bar_fg: ColorDef,
    pub bar_bg: ColorDef,
    pub border: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    /// ColorDef를 ratatui의 Color로 변환
    ///
    /// 역직렬화 시 어느 변형으로 들어왔든 `#` 접두사로 판별한다.
    pub fn to_color(&self) -> Color {
        let (ColorDef::Hex(value) | ColorDef::Named(value)) = self;
        if value.starts_with('#') {
            parse_hex_color(value)
        } else {
            parse_named_color(value)
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

/// 색상 이름을 Color로 파싱
fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

/// 설정 파일의 `[theme]` 섹션 (모든 항목 선택)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub executable: Option<ColorDef>,
    pub folder: Option<ColorDef>,
    pub text: Option<ColorDef>,
    pub encoded: Option<ColorDef>,
    pub other: Option<ColorDef>,
    pub selected_fg: Option<ColorDef>,
    pub selected_bg: Option<ColorDef>,
    pub error_fg: Option<ColorDef>,
    pub error_bg: Option<ColorDef>,
    pub bar_fg: Option<ColorDef>,
    pub bar_bg: Option<ColorDef>,
    pub border: Option<ColorDef>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// 기본 16색 테마
    pub fn classic() -> Self {
        Theme {
            executable: "green".into(),
            folder: "blue".into(),
            text: "white".into(),
            encoded: "red".into(),
            other: "white".into(),

            selected_fg: "black".into(),
            selected_bg: "white".into(),

            error_fg: "white".into(),
            error_bg: "red".into(),

            bar_fg: "white".into(),
            bar_bg: "reset".into(),
            border: "gray".into(),
        }
    }

    /// 설정에 있는 항목만 덮어쓴 테마
    pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
        let slots: [(&mut ColorDef, &Option<ColorDef>); 12] = [
            (&mut self.executable, &overrides.executable),
            (&mut self.folder, &overrides.folder),
            (&mut self.text, &overrides.text),
            (&mut self.encoded, &overrides.encoded),
            (&mut self.other, &overrides.other),
            (&mut self.selected_fg, &overrides.selected_fg),
            (&mut self.selected_bg, &overrides.selected_bg),
            (&mut self.error_fg, &overrides.error_fg),
            (&mut self.error_bg, &overrides.error_bg),
            (&mut self.bar_fg, &overrides.bar_fg),
            (&mut self.bar_bg, &overrides.bar_bg),
            (&mut self.border, &overrides.border),
        ];
        for (slot, value) in slots {
            if let Some(color) = value {
                *slot = color.clone();
            }
        }
        self
    }

    /// 엔트리 종류별 전경색
    pub fn entry_color(&self, entry_type: EntryType) -> Color {
        match entry_type {
            EntryType::Executable => self.executable.to_color(),
            EntryType::Folder => self.folder.to_color(),
            EntryType::Text => self.text.to_color(),
            EntryType::Encoded => self.encoded.to_color(),
            EntryType::Other => self.other.to_color(),
        }
    }

    /// 목록 한 줄 스타일
    pub fn entry_style(&self, entry_type: EntryType, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.selected_fg.to_color())
                .bg(self.selected_bg.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.entry_color(entry_type))
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error_fg.to_color())
            .bg(self.error_bg.to_color())
    }

    pub fn bar_style(&self) -> Style {
        Style::default()
            .fg(self.bar_fg.to_color())
            .bg(self.bar_bg.to_color())
    }

    /// 상단 경로 표시 스타일 (디렉토리 색)
    pub fn path_style(&self) -> Style {
        self.bar_style().fg(self.folder.to_color())
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border.to_color())
    }
}
