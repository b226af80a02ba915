//! Line normalization applied before any scanning
//!
//! Plan output indents every header line by two spaces (`  # aws_instance.web will be created`).
//! Removing that indent lets the scanners anchor headers at column zero
//! regardless of whether the text was copied from a terminal, a log or a file
//! that was already dedented. Terminal color escapes are dropped as well.

use lazy_static::lazy_static;
use regex::Regex;

/// Indent the plan renderer puts in front of header lines
pub const HEADER_INDENT: &str = "  ";

lazy_static! {
    static ref ANSI_ESCAPE: Regex =
        Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("Invalid ANSI escape regex");
}

/// Split plan text into normalized lines
pub fn normalize(text: &str) -> Vec<String> {
    let stripped = ANSI_ESCAPE.replace_all(text, "");

    stripped.lines().map(normalize_line).collect()
}

fn normalize_line(line: &str) -> String {
    match line.strip_prefix(HEADER_INDENT) {
        Some(rest) if rest.starts_with('#') => rest.to_string(),
        _ => line.to_string(),
    }
}

/// Number of leading whitespace characters
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
