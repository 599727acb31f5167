// Formatters - 하단 정보바용 크기, 날짜, 권한 포맷팅

use chrono::{DateTime, Local};
use std::time::SystemTime;

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 바이트 크기 표시: "1,234 bytes (1.2 KB)"
pub fn format_size_detail(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", format_number_with_commas(bytes))
    } else {
        format!(
            "{} bytes ({})",
            format_number_with_commas(bytes),
            format_file_size(bytes)
        )
    }
}

/// 시스템 시간을 "YYYY-MM-DD HH:MM" 형식으로 포맷팅
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// 숫자를 천단위 콤마로 포맷팅
pub fn format_number_with_commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}

/// 현재 사용자 기준 접근 권한 (R/W/X 조합, 하나도 없으면 "-")
pub fn format_access(readable: bool, writable: bool, executable: bool) -> String {
    let mut out = String::new();
    if readable {
        out.push('R');
    }
    if writable {
        out.push('W');
    }
    if executable {
        out.push('X');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}
