//! Inline styling sequences and helpers for measuring styled text

use regex::Regex;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Matches SGR styling sequences such as `\x1b[1m` or `\x1b[38;5;208m`
pub fn styling_regex() -> &'static Regex {
    static STYLING: OnceLock<Regex> = OnceLock::new();
    STYLING.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("styling pattern is valid"))
}

/// Remove every styling sequence from `text`
pub fn strip_styling(text: &str) -> String {
    styling_regex().replace_all(text, "").into_owned()
}

/// Number of visible characters in `text`
pub fn display_width(text: &str) -> usize {
    strip_styling(text).chars().count()
}

/// Length in bytes of a styling sequence starting exactly at the beginning of `text`
pub fn styling_prefix_len(text: &str) -> Option<usize> {
    styling_regex()
        .find(text)
        .filter(|m| m.start() == 0)
        .map(|m| m.end())
}
