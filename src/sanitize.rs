//! Character sanitization for generated post bodies.
//!
//! Gemini occasionally leaks Chinese or Japanese characters into Korean
//! output. Two passes clean this up:
//!
//! 1. A substitution table maps known foreign substrings to their Korean
//!    equivalents, so recognizable terms are recovered rather than dropped.
//! 2. An allow-list character filter keeps ASCII, the Hangul blocks, general
//!    punctuation, and a fixed set of box-drawing and arrow characters used
//!    for ASCII-art diagrams. Everything else is removed.
//!
//! The filter is a pure single pass and idempotent. The number of removed
//! characters is returned so the caller can log the loss instead of
//! swallowing it silently.

use once_cell::sync::Lazy;

/// Known foreign substrings Gemini has produced in Korean posts, with their
/// Korean replacements. Applied before the character filter so these terms
/// survive instead of being dropped.
static SUBSTITUTIONS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("変数", "변수"),
        ("関数", "함수"),
        ("配列", "배열"),
        ("数据库", "데이터베이스"),
        ("服务器", "서버"),
        ("缓存", "캐시"),
        ("キャッシュ", "캐시"),
        ("スレッド", "스레드"),
        ("プロセス", "프로세스"),
        ("同期", "동기"),
    ]
});

/// Box-drawing, arrow, and shape characters allowed through for ASCII-art
/// diagrams.
const DIAGRAM_CHARS: &[char] = &[
    '─', '━', '│', '┃', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼', '═', '║', '╔', '╗', '╚', '╝',
    '╠', '╣', '→', '←', '↑', '↓', '↔', '⇒', '⇐', '⇔', '▲', '▼', '◀', '▶', '■', '□', '●', '○',
    '◆', '◇', '★', '☆',
];

/// Result of a sanitization pass.
#[derive(Debug)]
pub struct Sanitized {
    /// The filtered text.
    pub text: String,
    /// How many characters the allow-list filter dropped.
    pub removed: usize,
}

fn is_allowed(c: char) -> bool {
    let cp = c as u32;
    cp < 0x80
        || (0xAC00..=0xD7AF).contains(&cp)
        || (0x1100..=0x11FF).contains(&cp)
        || (0x3130..=0x318F).contains(&cp)
        || (0x2000..=0x206F).contains(&cp)
        || DIAGRAM_CHARS.contains(&c)
}

/// Sanitize generated text down to ASCII, Hangul, punctuation, and diagram
/// characters.
///
/// Substitutions run first; the allow-list filter then drops anything still
/// outside the permitted ranges. Never fails; the output is never longer
/// than the substituted input.
pub fn sanitize(input: &str) -> Sanitized {
    let mut substituted = input.to_string();
    for (foreign, korean) in SUBSTITUTIONS.iter() {
        if substituted.contains(foreign) {
            substituted = substituted.replace(foreign, korean);
        }
    }

    let mut text = String::with_capacity(substituted.len());
    let mut removed = 0usize;
    for c in substituted.chars() {
        if is_allowed(c) {
            text.push(c);
        } else {
            removed += 1;
        }
    }

    Sanitized { text, removed }
}
