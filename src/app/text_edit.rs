use crate::models::entry::EntryType;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 이름 입력 최대 글자 수
pub const NAME_MAX_CHARS: usize = 18;

/// 무엇을 만들지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Folder,
    File,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Folder => "Folder name",
            PromptKind::File => "File name",
        }
    }

    /// 생성할 엔트리 종류
    pub fn entry_type(self) -> EntryType {
        match self {
            PromptKind::Folder => EntryType::Folder,
            PromptKind::File => EntryType::Text,
        }
    }
}

/// 키 입력 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// 계속 입력 중
    Editing,
    /// Enter: 앞뒤 공백을 뗀 이름
    Confirmed(String),
    /// Esc
    Cancelled,
}

/// 한 줄 이름 입력 상태
///
/// 커서는 바이트 오프셋이며 항상 문자 경계에 있다.
#[derive(Debug, Clone)]
pub struct NamePrompt {
    pub kind: PromptKind,
    value: String,
    cursor: usize,
}

impl NamePrompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// 커서 앞의 글자 수 (화면 커서 위치 계산용)
    pub fn cursor_chars(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return PromptOutcome::Confirmed(self.value.trim().to_string()),
            KeyCode::Esc => return PromptOutcome::Cancelled,
            KeyCode::Char('w') if ctrl => self.delete_prev_word(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.len(),
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => {}
        }
        PromptOutcome::Editing
    }

    fn insert_char(&mut self, c: char) {
        // 경로 구분자는 이름에 들어갈 수 없다
        if c == '/' || c == '\\' || c.is_control() {
            return;
        }
        if self.value.chars().count() >= NAME_MAX_CHARS {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_start(self.cursor);
        self.value.remove(prev);
        self.cursor = prev;
    }

    fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    fn left(&mut self) {
        self.cursor = self.prev_char_start(self.cursor);
    }

    fn right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn delete_prev_word(&mut self) {
        let end = self.cursor;
        let mut start = end;

        // 커서 왼쪽 구분자를 건너뛴 뒤 단어 시작까지
        let mut seen_word = false;
        while start > 0 {
            let prev = self.prev_char_start(start);
            let is_delimiter = self.value[prev..start]
                .chars()
                .next()
                .is_some_and(is_word_delimiter);
            if is_delimiter && seen_word {
                break;
            }
            seen_word |= !is_delimiter;
            start = prev;
        }

        self.value.replace_range(start..end, "");
        self.cursor = start;
    }

    fn prev_char_start(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

fn is_word_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '-' | '_' | '(' | ')' | '[' | ']')
}
