//! Stop predicates for forward scans
//!
//! Bodies, replacement-direction lookups and the outputs section all scan
//! forward line by line and stop at the first line satisfying one of these
//! predicates. End of input is the implicit last boundary.

use super::normalize::indent_of;

/// Deepest indent at which a `#` line still counts as a header
const MAX_HEADER_INDENT: usize = 3;

/// Fixed word introducing the final plan summary
pub const PLAN_SUMMARY_PREFIX: &str = "Plan:";

/// A line that looks like a change header (`# <something>`)
///
/// Parenthetical notes directly under a header, such as
/// `# (because aws_instance.x is not in configuration)`, belong to the header
/// above them and are not boundaries. Comment lines nested inside a body
/// (`# (2 unchanged attributes hidden)`) sit deeper than the header indent
/// and never match.
pub fn is_header_like(line: &str) -> bool {
    if indent_of(line) > MAX_HEADER_INDENT {
        return false;
    }

    match line.trim_start().strip_prefix('#') {
        Some(rest) => !rest.trim_start().starts_with('('),
        None => false,
    }
}

/// The terminal `Plan: N to add, ...` line, always at column 0
///
/// Indented `Plan:` text is body content (heredocs, descriptions).
pub fn is_plan_summary(line: &str) -> bool {
    line.starts_with(PLAN_SUMMARY_PREFIX)
}

/// A zero-indent prose line that starts a new report section
///
/// Examples: `Changes to Outputs:`, `Terraform will perform the following actions:`,
/// the `─────` separator. Diff lines and closing braces never qualify.
pub fn is_section_break(line: &str) -> bool {
    match line.chars().next() {
        Some(c) => c.is_alphanumeric() || c == '─',
        None => false,
    }
}

/// Any line a resource body must not extend past
pub fn is_body_boundary(line: &str) -> bool {
    is_header_like(line) || is_plan_summary(line) || is_section_break(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_like() {
        assert!(is_header_like("# aws_instance.web will be created"));
        assert!(is_header_like("  # aws_instance.web will be created"));
        assert!(is_header_like("   # anything"));
        assert!(!is_header_like("      # (1 unchanged attribute hidden)"));
        assert!(!is_header_like("    # nested comment"));
        assert!(!is_header_like("  + resource \"a\" \"b\" {"));
    }

    #[test]
    fn test_parenthetical_note_is_not_header() {
        assert!(!is_header_like("# (because aws_instance.x is not in configuration)"));
        assert!(!is_header_like("  # (moved from aws_instance.y)"));
    }

    #[test]
    fn test_plan_summary() {
        assert!(is_plan_summary("Plan: 1 to add, 0 to change, 0 to destroy."));
        assert!(!is_plan_summary("  Plan: 0 to add"));
        assert!(!is_plan_summary("            Plan: deploy"));
        assert!(!is_plan_summary("  + plan = \"x\""));
    }

    #[test]
    fn test_section_break() {
        assert!(is_section_break("Changes to Outputs:"));
        assert!(is_section_break("─────────────────────────"));
        assert!(is_section_break("Terraform will perform the following actions:"));
        assert!(!is_section_break(""));
        assert!(!is_section_break("    }"));
        assert!(!is_section_break("}"));
        assert!(!is_section_break("+ resource \"a\" \"b\" {"));
        assert!(!is_section_break("  Plan: indented"));
    }

    #[test]
    fn test_body_boundary() {
        assert!(is_body_boundary("# next will be created"));
        assert!(is_body_boundary("Plan: 1 to add, 0 to change, 0 to destroy."));
        assert!(is_body_boundary("Changes to Outputs:"));
        assert!(!is_body_boundary("      + ami = \"x\""));
        assert!(!is_body_boundary(""));
    }
}
