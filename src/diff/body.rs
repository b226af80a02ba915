//! Resource body extraction
//!
//! For a header at line `n`, the body is found by scanning forward from `n`
//! for the declaration opener `<symbol> resource "<type>" "<name>" {` and then
//! collecting lines until the first boundary (see [`super::boundary`]).
//! The search never starts before the header, so two resources that share a
//! type/name prefix cannot pick up each other's blocks.
//!
//! Boundaries are textual, not brace-balanced: a line inside a body that looks
//! like a header ends the body early.

use regex::Regex;

use super::boundary::is_body_boundary;

/// A resource declaration and the verbatim text belonging to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBody {
    pub resource_type: String,
    pub resource_name: String,
    pub body: String,
}

/// Extractor for `<symbol> resource "<type>" "<name>" {` blocks
pub struct BodyExtractor {
    opener_pattern: Regex,
}

impl Default for BodyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyExtractor {
    pub fn new() -> Self {
        Self {
            // Match resource declaration openers:
            //   + resource "aws_instance" "web" {
            // -/+ resource "aws_instance" "web" {
            opener_pattern: Regex::new(r#"^\s*(\S+)\s+resource\s+"([^"]+)"\s+"([^"]+)"\s+\{(.*)$"#)
                .expect("Invalid resource opener regex"),
        }
    }

    /// Extract the body belonging to the header at `header_line`
    ///
    /// Returns `None` when no opener with the given symbol appears before the
    /// next boundary line.
    pub fn extract(&self, lines: &[String], header_line: usize, symbol: &str) -> Option<ResourceBody> {
        let (opener_line, resource_type, resource_name, remainder) =
            self.find_opener(lines, header_line, symbol)?;

        let mut body_lines = vec![format!(
            "  {} resource \"{}\" \"{}\" {{{}",
            symbol, resource_type, resource_name, remainder
        )];

        body_lines.extend(
            lines
                .iter()
                .skip(opener_line + 1)
                .take_while(|line| !is_body_boundary(line))
                .cloned(),
        );

        while body_lines.len() > 1 && body_lines.last().is_some_and(|l| l.trim().is_empty()) {
            body_lines.pop();
        }

        Some(ResourceBody {
            resource_type,
            resource_name,
            body: body_lines.join("\n"),
        })
    }

    fn find_opener(
        &self,
        lines: &[String],
        header_line: usize,
        symbol: &str,
    ) -> Option<(usize, String, String, String)> {
        for (index, line) in lines.iter().enumerate().skip(header_line + 1) {
            if is_body_boundary(line) {
                return None;
            }

            let Some(caps) = self.opener_pattern.captures(line) else {
                continue;
            };

            if caps.get(1).map(|m| m.as_str()) != Some(symbol) {
                continue;
            }

            let resource_type = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let resource_name = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            let remainder = caps.get(4).map(|m| m.as_str()).unwrap_or("");

            return Some((
                index,
                resource_type.to_string(),
                resource_name.to_string(),
                remainder.to_string(),
            ));
        }

        None
    }
}
