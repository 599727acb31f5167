//! 커맨드 레지스트리
//!
//! 키 바인딩과 상단 바 단축키 안내가 모두 이 테이블을 참조합니다.

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 사용자가 내릴 수 있는 논리 명령
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Navigation
    NavigateParent,
    NavigateEnter,
    MoveUp,
    MoveDown,
    // File Operations
    Copy,
    Cut,
    Paste,
    Delete,
    Undo,
    CreateFolder,
    CreateFile,
    Open,
    // System
    Refresh,
    Quit,
}

/// 커맨드 정의 (메타데이터)
pub struct CommandDef {
    pub command: Command,
    pub id: &'static str,
    pub label: &'static str,
    /// 상단 바 안내에 쓰는 키 표기 (None이면 안내하지 않음)
    pub hint: Option<&'static str>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub command: Command,
}

pub static COMMAND_DEFS: &[CommandDef] = &[
    CommandDef {
        command: Command::NavigateParent,
        id: "navigate_parent",
        label: "Parent",
        hint: Some("h"),
    },
    CommandDef {
        command: Command::NavigateEnter,
        id: "navigate_enter",
        label: "Enter",
        hint: Some("l"),
    },
    CommandDef {
        command: Command::MoveUp,
        id: "move_up",
        label: "Up",
        hint: None,
    },
    CommandDef {
        command: Command::MoveDown,
        id: "move_down",
        label: "Down",
        hint: None,
    },
    CommandDef {
        command: Command::Copy,
        id: "copy",
        label: "Copy",
        hint: Some("y"),
    },
    CommandDef {
        command: Command::Cut,
        id: "cut",
        label: "Cut",
        hint: Some("c"),
    },
    CommandDef {
        command: Command::Paste,
        id: "paste",
        label: "Paste",
        hint: Some("p"),
    },
    CommandDef {
        command: Command::Delete,
        id: "delete",
        label: "Delete",
        hint: Some("d"),
    },
    CommandDef {
        command: Command::Undo,
        id: "undo",
        label: "Undo",
        hint: Some("u"),
    },
    CommandDef {
        command: Command::CreateFolder,
        id: "create_folder",
        label: "Folder",
        hint: Some("f"),
    },
    CommandDef {
        command: Command::CreateFile,
        id: "create_file",
        label: "File",
        hint: Some("n"),
    },
    CommandDef {
        command: Command::Open,
        id: "open",
        label: "Open",
        hint: Some("o"),
    },
    CommandDef {
        command: Command::Refresh,
        id: "refresh",
        label: "Refresh",
        hint: None,
    },
    CommandDef {
        command: Command::Quit,
        id: "quit",
        label: "Quit",
        hint: Some("q"),
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    let plain = Some(KeyModifiers::NONE);
    let char_binding = |c: char, command: Command| KeyBinding {
        code: KeyCode::Char(c),
        modifiers: plain,
        command,
    };

    vec![
        // 탐색: Vim + 화살표
        char_binding('h', Command::NavigateParent),
        KeyBinding {
            code: KeyCode::Left,
            modifiers: None,
            command: Command::NavigateParent,
        },
        char_binding('l', Command::NavigateEnter),
        KeyBinding {
            code: KeyCode::Right,
            modifiers: None,
            command: Command::NavigateEnter,
        },
        char_binding('k', Command::MoveUp),
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            command: Command::MoveUp,
        },
        char_binding('j', Command::MoveDown),
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            command: Command::MoveDown,
        },
        // 파일 작업
        char_binding('y', Command::Copy),
        char_binding('c', Command::Cut),
        char_binding('p', Command::Paste),
        char_binding('d', Command::Delete),
        char_binding('u', Command::Undo),
        char_binding('f', Command::CreateFolder),
        char_binding('n', Command::CreateFile),
        char_binding('o', Command::Open),
        // 시스템
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            command: Command::Refresh,
        },
        char_binding('q', Command::Quit),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력에 해당하는 커맨드 찾기
pub fn find_command(modifiers: KeyModifiers, code: KeyCode) -> Option<Command> {
    // 대문자 입력은 SHIFT가 함께 오므로 문자 키는 SHIFT를 무시한다
    let modifiers = match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    };

    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && binding
                    .modifiers
                    .map_or(true, |required| modifiers == required)
        })
        .map(|binding| binding.command)
}

impl Command {
    pub fn def(self) -> Option<&'static CommandDef> {
        COMMAND_DEFS.iter().find(|d| d.command == self)
    }

    /// 로그용 식별자
    pub fn id(self) -> &'static str {
        self.def().map_or("unknown", |d| d.id)
    }
}

/// 상단 바 단축키 안내 (`h:Parent l:Enter ...`)
pub fn hint_line() -> String {
    COMMAND_DEFS
        .iter()
        .filter_map(|def| def.hint.map(|key| format!("{}:{}", key, def.label)))
        .collect::<Vec<_>>()
        .join(" ")
}
