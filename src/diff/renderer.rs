//! Renderers for parsed plans
//!
//! Both renderers consume a [`PlanView`], so groups always come out in
//! presentation order regardless of the format.

use owo_colors::OwoColorize;

use super::presentation::{GroupKind, PlanView, PresentationGroup, ViewEntry};
use super::types::{ChangeSet, GroupCounts};

/// Message shown when a plan contains nothing to display
pub const NO_CHANGES_MESSAGE: &str = "No changes detected in plan";

/// Options for rendering
#[derive(Debug, Clone)]
pub struct DiffRenderOptions {
    /// Include resource and output bodies under each entry
    pub show_bodies: bool,

    /// Emit ANSI colors (ASCII only)
    pub color: bool,

    /// Maximum body lines before truncation (0 = unlimited)
    pub max_body_lines: usize,

    /// Terminal width for separators
    pub terminal_width: usize,
}

impl Default for DiffRenderOptions {
    fn default() -> Self {
        Self {
            show_bodies: false,
            color: false,
            max_body_lines: 0,
            terminal_width: 100,
        }
    }
}

/// Width of the attached terminal, if any
pub fn detect_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
}

/// Trait for plan renderers
pub trait DiffRenderer {
    /// Render the change set to a string
    fn render(&self, set: &ChangeSet, options: &DiffRenderOptions) -> String;
}

/// ASCII renderer for terminal output
pub struct AsciiRenderer;

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }

    fn paint(&self, text: &str, rgb: (u8, u8, u8), options: &DiffRenderOptions) -> String {
        if options.color {
            text.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render summary section
    fn render_summary(&self, counts: &GroupCounts) -> String {
        let mut output = String::new();

        output.push_str("Plan Summary:\n");

        let mut parts = Vec::new();

        if counts.create > 0 {
            parts.push(format!("+{} to add", counts.create));
        }

        if counts.update > 0 {
            parts.push(format!("~{} to change", counts.update));
        }

        if counts.replacements() > 0 {
            parts.push(format!("±{} to replace", counts.replacements()));
        }

        if counts.destroy > 0 {
            parts.push(format!("-{} to destroy", counts.destroy));
        }

        if counts.output_changes > 0 {
            parts.push(format!("{} output changes", counts.output_changes));
        }

        let drift = counts.drift_changed + counts.drift_deleted;
        if drift > 0 {
            parts.push(format!("{} drifted", drift));
        }

        if parts.is_empty() {
            output.push_str(&format!("  {}.\n", NO_CHANGES_MESSAGE));
        } else {
            output.push_str(&format!("  {}\n", parts.join(", ")));
        }

        output.push('\n');
        output
    }

    fn render_group(
        &self,
        set: &ChangeSet,
        group: &PresentationGroup,
        options: &DiffRenderOptions,
    ) -> String {
        let mut output = String::new();
        let color = group.kind.color();

        output.push_str(&self.paint(&group.heading, color, options));
        output.push('\n');
        output.push_str(&"─".repeat(options.terminal_width.min(50)));
        output.push('\n');

        for entry in &group.entries {
            output.push_str(&self.render_entry(set, group.kind, entry, options));
        }

        output.push('\n');
        output
    }

    fn render_entry(
        &self,
        set: &ChangeSet,
        kind: GroupKind,
        entry: &ViewEntry,
        options: &DiffRenderOptions,
    ) -> String {
        let symbol = self.paint(&format!("{:>3}", entry.symbol), entry.action.color(), options);
        let record = PlanView::record(set, entry);

        // Scalar outputs read best on one line
        if kind == GroupKind::OutputChanges
            && let Some(record) = record
            && !record.collapsible
        {
            return format!("{} {} = {}\n", symbol, entry.label, record.body);
        }

        let mut output = format!("{} {}\n", symbol, entry.label);

        if !options.show_bodies {
            return output;
        }

        match record {
            Some(record) if !record.body.is_empty() => {
                let (shown, hidden) = truncate_lines(&record.body, options.max_body_lines);

                for line in shown {
                    output.push_str(&format!("      {}\n", line));
                }

                if hidden > 0 {
                    output.push_str(&format!("      ... ({} more lines)\n", hidden));
                }
            }
            _ => output.push_str("      (no details found)\n"),
        }

        output
    }
}

impl DiffRenderer for AsciiRenderer {
    fn render(&self, set: &ChangeSet, options: &DiffRenderOptions) -> String {
        let mut output = String::new();
        let view = PlanView::build(set);

        output.push_str(&self.render_summary(&set.counts()));

        for group in &view.groups {
            output.push_str(&self.render_group(set, group, options));
        }

        output
    }
}

/// HTML renderer for file export
///
/// Entries with a body become `<details>` elements keyed by `data-address`.
pub struct HtmlRenderer;

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Generate CSS styles
    fn generate_styles(&self) -> String {
        r#"
<style>
    body {
        font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
        background-color: #1e1e1e;
        color: #d4d4d4;
        padding: 20px;
        line-height: 1.5;
    }
    .group {
        background-color: #2d2d2d;
        padding: 15px;
        border-radius: 5px;
        margin-bottom: 15px;
        border-left: 4px solid;
    }
    .group.create { border-left-color: rgb(152, 225, 152); }
    .group.update { border-left-color: rgb(255, 230, 160); }
    .group.destroy { border-left-color: rgb(255, 160, 160); }
    .group.output { border-left-color: rgb(160, 200, 255); }
    .group.drift { border-left-color: rgb(120, 180, 195); }
    .group h3 { margin: 0 0 10px 0; color: #ffffff; }
    .entry { padding: 2px 0; margin-left: 20px; }
    .symbol {
        display: inline-block;
        width: 30px;
        text-align: center;
        font-weight: bold;
    }
    summary { cursor: pointer; }
    pre { margin: 5px 0 5px 30px; color: #ce9178; }
    .no-changes { color: rgb(160, 160, 160); }
</style>
"#
        .to_string()
    }

    fn render_group(&self, set: &ChangeSet, group: &PresentationGroup) -> String {
        let mut output = String::new();

        output.push_str(&format!("<div class=\"group {}\">\n", group.kind.css_class()));
        output.push_str(&format!("  <h3>{}</h3>\n", html_escape(&group.heading)));

        for entry in &group.entries {
            output.push_str(&self.render_entry(set, entry));
        }

        output.push_str("</div>\n\n");
        output
    }

    fn render_entry(&self, set: &ChangeSet, entry: &ViewEntry) -> String {
        let symbol = format!("<span class=\"symbol\">{}</span>", html_escape(&entry.symbol));
        let label = html_escape(&entry.label);
        let address = html_escape(&entry.key);

        match PlanView::record(set, entry) {
            Some(record) if record.body.is_empty() => format!(
                "  <div class=\"entry\" data-address=\"{}\">{} {}</div>\n",
                address, symbol, label
            ),
            Some(record) if record.action.symbol().is_none() && !record.collapsible => format!(
                "  <div class=\"entry\" data-address=\"{}\">{} {} = {}</div>\n",
                address,
                symbol,
                label,
                html_escape(&record.body)
            ),
            Some(record) => format!(
                "  <details class=\"entry\" data-address=\"{}\">\n    <summary>{} {}</summary>\n    <pre>{}</pre>\n  </details>\n",
                address,
                symbol,
                label,
                html_escape(&record.body)
            ),
            None => format!(
                "  <div class=\"entry\" data-address=\"{}\">{} {}</div>\n",
                address, symbol, label
            ),
        }
    }
}

impl DiffRenderer for HtmlRenderer {
    fn render(&self, set: &ChangeSet, _options: &DiffRenderOptions) -> String {
        let mut output = String::new();
        let view = PlanView::build(set);

        output.push_str("<!DOCTYPE html>\n");
        output.push_str("<html lang=\"en\">\n");
        output.push_str("<head>\n");
        output.push_str("  <meta charset=\"UTF-8\">\n");
        output.push_str("  <title>Plan Summary</title>\n");
        output.push_str(&self.generate_styles());
        output.push_str("</head>\n");
        output.push_str("<body>\n\n");

        if view.is_empty() {
            output.push_str(&format!("<p class=\"no-changes\">{}</p>\n", NO_CHANGES_MESSAGE));
        }

        for group in &view.groups {
            output.push_str(&self.render_group(set, group));
        }

        output.push_str("</body>\n");
        output.push_str("</html>\n");

        output
    }
}

/// Split a body into the lines to show and the number of lines cut off
fn truncate_lines(body: &str, max_lines: usize) -> (Vec<&str>, usize) {
    let lines: Vec<&str> = body.lines().collect();

    if max_lines == 0 || lines.len() <= max_lines {
        return (lines, 0);
    }

    let hidden = lines.len() - max_lines;
    (lines[..max_lines].to_vec(), hidden)
}

/// Helper function to escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
