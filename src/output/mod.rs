//! Terminal output styling for plansum
//!
//! Pastel palette shared with the plan renderers. Warnings and dimmed notes go
//! to stderr so `plansum summarize > report.txt` holds only the report; status
//! lines from `check` and `success` confirmations stay on stdout.

use owo_colors::OwoColorize;

/// Pastel mint green
const GREEN: (u8, u8, u8) = (152, 225, 152);
/// Pastel coral/salmon
const RED: (u8, u8, u8) = (255, 160, 160);
/// Pastel cream/yellow
const YELLOW: (u8, u8, u8) = (255, 230, 160);
/// Pastel sky blue
const BLUE: (u8, u8, u8) = (160, 200, 255);
/// Pastel lavender
const LAVENDER: (u8, u8, u8) = (181, 174, 254);
/// Brighter grey
const GREY: (u8, u8, u8) = (160, 160, 160);

fn mark(symbol: &str, (r, g, b): (u8, u8, u8)) -> String {
    symbol.truecolor(r, g, b).bold().to_string()
}

fn muted(text: &str) -> String {
    let (r, g, b) = GREY;
    text.truecolor(r, g, b).to_string()
}

/// Print a success message with a green checkmark
pub fn success(message: &str) {
    println!("{} {}", mark("✓", GREEN), message.bright_white());
}

/// Print a warning to stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", mark("⚠", YELLOW), message.bright_white());
}

/// Print an info message with a blue info symbol
pub fn info(message: &str) {
    println!("{} {}", mark("ℹ", BLUE), message.bright_white());
}

/// Print a section header with a separator line
pub fn section(title: &str) {
    let (r, g, b) = LAVENDER;
    println!("\n{}", title.truecolor(r, g, b).bold());
    println!("{}", muted(&"─".repeat(50)));
}

/// Print a key-value pair with styled key and value
pub fn key_value(key: &str, value: &str) {
    println!("  {} {}", muted(&format!("{}:", key)), value.bright_white());
}

/// Print a dimmed/muted message to stderr
pub fn dimmed(message: &str) {
    eprintln!("{}", muted(message));
}

/// Print pre-rendered text as is
pub fn plain(text: &str) {
    print!("{}", text);
}

/// Print the outcome of an input check
pub fn check_result(item: &str, passed: bool) {
    let (symbol, color, verdict) = if passed {
        ("✓", GREEN, "recognized")
    } else {
        ("✗", RED, "not recognized")
    };

    println!("  {} {} {}", mark(symbol, color), item.bright_white(), muted(verdict));
}
