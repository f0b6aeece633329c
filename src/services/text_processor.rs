// Text Processing Service
// Language detection, tokenization and review block splitting

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Language;

const DEVANAGARI_START: char = '\u{0900}';
const DEVANAGARI_END: char = '\u{097F}';

#[inline]
fn is_devanagari(c: char) -> bool {
    (DEVANAGARI_START..=DEVANAGARI_END).contains(&c)
}

/// Hindi when any Devanagari char is present, English otherwise.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_devanagari) {
        Language::Hindi
    } else {
        Language::English
    }
}

/// Lowercase, blank out everything but ASCII alphanumerics, Devanagari
/// and whitespace, then split on whitespace runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_digit() || c.is_ascii_lowercase() || is_devanagari(c) || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

fn block_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}|[\r\n]{2,}").expect("block separator regex"))
}

/// Trimmable whitespace: Unicode White_Space except NEL (U+0085), plus BOM.
#[inline]
fn is_trim_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn trim_block(s: &str) -> &str {
    s.trim_matches(is_trim_char)
}

/// True when nothing but trimmable whitespace is left.
pub fn is_blank(s: &str) -> bool {
    trim_block(s).is_empty()
}

/// Split multi-review input on blank lines (CR/LF runs of two or more),
/// trimming each block and dropping empty ones.
pub fn split_review_blocks(raw: &str) -> Vec<&str> {
    block_separator_re()
        .split(raw)
        .map(trim_block)
        .filter(|b| !b.is_empty())
        .collect()
}

/// Cut `text` to at most `max_chars` chars. Returns the slice and whether
/// anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Single-line preview for logs and terminal output.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("यह उत्पाद बहुत अच्छा है"), Language::Hindi);
        assert_eq!(detect_language("Nice phone, यह अच्छा"), Language::Hindi);
        assert_eq!(detect_language("Great product"), Language::English);
        assert_eq!(detect_language(""), Language::English);
        assert_eq!(detect_language("!!! ???"), Language::English);
        assert_eq!(detect_language("这是中文"), Language::English);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Hello, WORLD!! 5-star"), vec!["hello", "world", "5", "star"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! ... ???").is_empty());
        assert_eq!(tokenize("  spaced\t\nout  "), vec!["spaced", "out"]);
    }

    #[test]
    fn test_tokenize_keeps_devanagari_and_drops_other_scripts() {
        assert_eq!(tokenize("बहुत अच्छा!"), vec!["बहुत", "अच्छा"]);
        assert_eq!(tokenize("café 👍 ok"), vec!["caf", "ok"]);
    }

    #[test]
    fn test_split_review_blocks() {
        let blocks = split_review_blocks("First review.\n\nSecond review.\n\n\n  \n\nThird.");
        assert_eq!(blocks, vec!["First review.", "Second review.", "Third."]);
    }

    #[test]
    fn test_split_review_blocks_single_newline_stays_together() {
        let blocks = split_review_blocks("line one\nline two");
        assert_eq!(blocks, vec!["line one\nline two"]);
    }

    #[test]
    fn test_split_review_blocks_carriage_returns() {
        assert_eq!(split_review_blocks("a\r\n\r\nb"), vec!["a", "b"]);
        // A CR/LF pair is itself a run of two line-break chars.
        assert_eq!(split_review_blocks("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_review_blocks_empty() {
        assert!(split_review_blocks("").is_empty());
        assert!(split_review_blocks("   \n\n  \t ").is_empty());
    }

    #[test]
    fn test_trim_keeps_nel_and_strips_bom() {
        assert_eq!(split_review_blocks("x\u{85}"), vec!["x\u{85}"]);
        assert_eq!(split_review_blocks("\u{85}"), vec!["\u{85}"]);
        assert_eq!(split_review_blocks("\u{feff}\u{a0}x\u{3000}"), vec!["x"]);
        assert!(is_blank(" \u{feff}\u{2028}\t"));
        assert!(!is_blank("\u{85}"));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("अच्छा", 2), ("अच", true));
        assert_eq!(truncate_chars("short", 10), ("short", false));
        assert_eq!(truncate_chars("exact", 5), ("exact", false));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("abc\ndef", 10), "abc def");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
