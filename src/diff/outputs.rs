//! "Changes to Outputs:" section parser
//!
//! Each output starts with a `<symbol> <name> = <value>` line. Lines indented
//! deeper than that opener are continuation text for the same output; the first
//! line that is not (blank lines included) closes it and is looked at again as
//! a possible new opener.

use regex::Regex;

use super::boundary::is_section_break;
use super::normalize::indent_of;
use super::types::{ActionKind, ChangeRecord};

/// Heading that introduces the outputs section
pub const OUTPUTS_HEADER: &str = "Changes to Outputs:";

/// One parsed output change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChange {
    pub symbol: String,
    pub name: String,
    pub body: String,
    pub collapsible: bool,
}

impl OutputChange {
    fn open(symbol: &str, name: &str, value: &str) -> Self {
        let value = value.trim_end();

        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            body: value.to_string(),
            collapsible: value.starts_with('[') || value.starts_with('{'),
        }
    }

    fn append(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }

    /// Rank used for presentation: deletions, then updates, then creations
    pub fn severity_rank(symbol: &str) -> u8 {
        match symbol {
            "-" => 0,
            "~" => 1,
            "+" => 2,
            _ => 3,
        }
    }

    /// Convert into a change record keyed by the output name
    pub fn into_record(self) -> ChangeRecord {
        ChangeRecord::new(&self.name, ActionKind::OutputChange, &self.symbol)
            .with_body(self.body)
            .with_collapsible(self.collapsible)
    }
}

/// Parser state
enum State {
    Idle,
    InBody(OutputChange),
}

/// Line-oriented parser for the outputs section
pub struct OutputParser {
    opener_pattern: Regex,
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputParser {
    pub fn new() -> Self {
        Self {
            // Match output openers:
            // + instance_ip = (known after apply)
            // ~ list_output = [
            opener_pattern: Regex::new(r"^(\s*)([+~-])\s+([A-Za-z_][A-Za-z0-9_-]*)\s+=\s*(.*)$")
                .expect("Invalid output opener regex"),
        }
    }

    /// Parse the outputs section, returning outputs in source order
    ///
    /// Text without the section heading yields no outputs.
    pub fn parse(&self, lines: &[String]) -> Vec<OutputChange> {
        let Some(start) = lines.iter().position(|l| l.trim() == OUTPUTS_HEADER) else {
            return Vec::new();
        };

        let mut outputs = Vec::new();
        let mut base_indent: Option<usize> = None;
        let mut state = State::Idle;

        for line in &lines[start + 1..] {
            let is_continuation = !line.trim().is_empty()
                && base_indent.is_some_and(|base| indent_of(line) > base);

            if let State::InBody(current) = &mut state
                && is_continuation
            {
                current.append(line);
                continue;
            }

            if let State::InBody(done) = std::mem::replace(&mut state, State::Idle) {
                outputs.push(done);
            }

            if let Some(change) = self.parse_opener(line, &mut base_indent) {
                state = State::InBody(change);
                continue;
            }

            if is_section_break(line) {
                break;
            }
        }

        if let State::InBody(done) = state {
            outputs.push(done);
        }

        outputs
    }

    fn parse_opener(&self, line: &str, base_indent: &mut Option<usize>) -> Option<OutputChange> {
        let caps = self.opener_pattern.captures(line)?;
        let indent = caps.get(1).map(|m| m.as_str().len()).unwrap_or(0);

        match *base_indent {
            None => *base_indent = Some(indent),
            Some(base) if base != indent => return None,
            Some(_) => {}
        }

        let symbol = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let name = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        let value = caps.get(4).map(|m| m.as_str()).unwrap_or("");

        Some(OutputChange::open(symbol, name, value))
    }
}

/// Order outputs for presentation: `-`, then `~`, then `+`, stable within a symbol
pub fn sort_by_severity<T, F>(items: &mut [T], symbol_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| OutputChange::severity_rank(symbol_of(item)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::normalize::normalize;

    fn parse(text: &str) -> Vec<OutputChange> {
        OutputParser::new().parse(&normalize(text))
    }

    #[test]
    fn test_no_section() {
        assert!(parse("  + ip = \"1.2.3.4\"\n").is_empty());
    }

    #[test]
    fn test_scalar_outputs() {
        let outputs = parse(
            r#"
Changes to Outputs:
  + instance_ip = (known after apply)
  ~ region      = "us-east-1" -> "us-west-2"
  - legacy      = "x" -> null
"#,
        );

        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].symbol, "+");
        assert_eq!(outputs[0].name, "instance_ip");
        assert_eq!(outputs[0].body, "(known after apply)");
        assert!(!outputs[0].collapsible);
        assert_eq!(outputs[1].body, "\"us-east-1\" -> \"us-west-2\"");
        assert_eq!(outputs[2].name, "legacy");
    }

    #[test]
    fn test_list_output_with_continuations() {
        let outputs = parse("Changes to Outputs:\n~ list_output = [\n    \"a\",\n    \"b\",\n  ]\n\n");

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].symbol, "~");
        assert_eq!(outputs[0].body, "[\n    \"a\",\n    \"b\",\n  ]");
        assert!(outputs[0].collapsible);
    }

    #[test]
    fn test_continuations_are_not_split() {
        let outputs = parse(
            r#"Changes to Outputs:
  + tags = {
      + "env"  = "prod"
      + "team" = "core"
    }
  + name = "web"
"#,
        );

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].name, "tags");
        assert_eq!(outputs[0].body.lines().count(), 4);
        assert_eq!(
            outputs[0].body,
            "{\n      + \"env\"  = \"prod\"\n      + \"team\" = \"core\"\n    }"
        );
        assert!(outputs[0].collapsible);
        assert_eq!(outputs[1].name, "name");
        assert_eq!(outputs[1].body, "\"web\"");
    }

    #[test]
    fn test_blank_line_closes_body() {
        let outputs = parse("Changes to Outputs:\n  + a = [\n      1,\n\n      2,\n");

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].body, "[\n      1,");
    }

    #[test]
    fn test_stops_at_section_break() {
        let outputs = parse(
            r#"Changes to Outputs:
  + a = 1

─────────────────────────────────────────────
Note: You didn't use the -out option
  + b = 2
"#,
        );

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].name, "a");
    }

    #[test]
    fn test_sort_by_severity() {
        let mut outputs = parse(
            r#"Changes to Outputs:
  + a = 1
  ~ b = 1 -> 2
  - c = 3 -> null
  + d = 4
"#,
        );

        sort_by_severity(&mut outputs, |o| o.symbol.as_str());
        let names: Vec<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_into_record() {
        let outputs = parse("Changes to Outputs:\n  + ids = [\n      \"i-1\",\n    ]\n");
        let record = outputs.into_iter().next().unwrap().into_record();

        assert_eq!(record.address, "ids");
        assert_eq!(record.action, ActionKind::OutputChange);
        assert_eq!(record.symbol, "+");
        assert!(record.collapsible);
        assert!(record.resource_type.is_none());
    }
}
