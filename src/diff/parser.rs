//! Plan output parser for OpenTofu/Terraform
//!
//! This module turns the text output of `tofu plan` / `terraform plan` into a
//! [`ChangeSet`]. Parsing is total: unknown headers are skipped, missing bodies
//! and undecidable replacements are reported as diagnostics, and text that is
//! not a plan at all simply produces an empty change set.
//!
//! Records are merged in a fixed order (destroy, replace create-first, replace
//! destroy-first, update, create, drift changed, drift deleted, outputs); a
//! later step overwrites an earlier record with the same address.

use regex::Regex;

use super::body::BodyExtractor;
use super::direction::{ClassifiedReplacement, DirectionBuckets};
use super::header::{HeaderMatch, HeaderScanner};
use super::normalize::normalize;
use super::outputs::OutputParser;
use super::types::{ActionKind, ChangeRecord, ChangeSet, Diagnostic, PlanSummary};

/// Parser for OpenTofu/Terraform plan output
pub struct PlanParser {
    headers: HeaderScanner,
    bodies: BodyExtractor,
    outputs: OutputParser,
    summary_pattern: Regex,
}

impl Default for PlanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanParser {
    /// Create a new plan parser with compiled regex patterns
    pub fn new() -> Self {
        Self {
            headers: HeaderScanner::new(),
            bodies: BodyExtractor::new(),
            outputs: OutputParser::new(),

            // Match summary line: Plan: 3 to add, 2 to change, 1 to destroy.
            // Newer versions prefix it with "N to import, "
            summary_pattern: Regex::new(
                r"^Plan:\s*(?:(\d+)\s*to import,\s*)?(\d+)\s*to add,\s*(\d+)\s*to change,\s*(\d+)\s*to destroy",
            )
            .expect("Invalid summary pattern regex"),
        }
    }

    /// Parse plan output and return a structured ChangeSet
    pub fn parse(&self, output: &str) -> ChangeSet {
        let lines = normalize(output);
        let scan = self.headers.scan(&lines);
        let buckets = DirectionBuckets::partition(&lines, &scan);

        let mut set = ChangeSet::new();

        for header in scan.by_action(ActionKind::Destroy) {
            self.extract_managed(&mut set, &lines, header, ActionKind::Destroy);
        }

        for replacement in buckets.create_first.iter().chain(&buckets.destroy_first) {
            self.extract_replacement(&mut set, &lines, replacement);
        }

        for header in buckets.undetermined {
            set.push_diagnostic(Diagnostic::undetermined_replacement(&header.address));
        }

        for header in scan.by_action(ActionKind::Update) {
            self.extract_managed(&mut set, &lines, header, ActionKind::Update);
        }

        for header in scan.by_action(ActionKind::Create) {
            self.extract_managed(&mut set, &lines, header, ActionKind::Create);
        }

        for action in [ActionKind::DriftChanged, ActionKind::DriftDeleted] {
            for header in scan.by_action(action) {
                self.extract_drift(&mut set, &lines, header, action);
            }
        }

        for output in self.outputs.parse(&lines) {
            set.insert_output(output.into_record());
        }

        set.reported_summary = self.parse_summary(&lines);

        set
    }

    fn extract_managed(
        &self,
        set: &mut ChangeSet,
        lines: &[String],
        header: &HeaderMatch,
        action: ActionKind,
    ) {
        let symbol = action.symbol().unwrap_or_default();
        set.record_header(&header.address, action);

        match self.bodies.extract(lines, header.line, symbol) {
            Some(body) => set.insert(
                ChangeRecord::new(&header.address, action, symbol)
                    .with_resource(&body.resource_type, &body.resource_name)
                    .with_body(body.body),
            ),
            None => set.push_diagnostic(Diagnostic::missing_body(&header.address, symbol)),
        }
    }

    fn extract_replacement(
        &self,
        set: &mut ChangeSet,
        lines: &[String],
        replacement: &ClassifiedReplacement<'_>,
    ) {
        self.extract_managed(set, lines, replacement.header, replacement.action());
    }

    /// Drift records are kept even when no body follows the header
    fn extract_drift(
        &self,
        set: &mut ChangeSet,
        lines: &[String],
        header: &HeaderMatch,
        action: ActionKind,
    ) {
        let symbol = action.symbol().unwrap_or_default();
        set.record_header(&header.address, action);

        let mut record = ChangeRecord::new(&header.address, action, symbol);

        if let Some(body) = self.bodies.extract(lines, header.line, symbol) {
            record = record
                .with_resource(&body.resource_type, &body.resource_name)
                .with_body(body.body);
        }

        set.insert(record);
    }

    /// Parse the trailing `Plan:` line, if any
    fn parse_summary(&self, lines: &[String]) -> Option<PlanSummary> {
        let caps = lines
            .iter()
            .rev()
            .find_map(|line| self.summary_pattern.captures(line))?;

        let count = |index: usize| {
            caps.get(index)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        Some(PlanSummary {
            to_import: count(1),
            to_add: count(2),
            to_change: count(3),
            to_destroy: count(4),
        })
    }
}

/// Parse plan text with a freshly built parser
pub fn parse_plan(output: &str) -> ChangeSet {
    PlanParser::new().parse(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::DiagnosticKind;
    use crate::test_helpers::PlanTextBuilder;

    fn sample_plan_output() -> &'static str {
        r#"
Terraform used the selected providers to generate the following execution
plan. Resource actions are indicated with the following symbols:
  + create
  ~ update in-place
  - destroy
-/+ destroy and then create replacement

Terraform will perform the following actions:

  # aws_instance.web_server will be created
  + resource "aws_instance" "web_server" {
      + ami                          = "ami-12345678"
      + instance_type                = "t3.micro"
      + id                           = (known after apply)
      + tags                         = {
          + "Name" = "web-server"
        }
    }

  # aws_security_group.main will be updated in-place
  ~ resource "aws_security_group" "main" {
      ~ ingress.0.from_port = "80" -> "443"
        name                = "main-sg"
    }

  # aws_instance.old_server will be destroyed
  - resource "aws_instance" "old_server" {
      - ami           = "ami-old12345"
      - instance_type = "t2.micro"
    }

  # aws_instance.db must be replaced
-/+ resource "aws_instance" "db" {
      ~ ami = "ami-old" -> "ami-new" # forces replacement
    }

Plan: 2 to add, 1 to change, 2 to destroy.

Changes to Outputs:
  + web_ip = (known after apply)
"#
    }

    #[test]
    fn test_parse_create_resource() {
        let set = parse_plan(sample_plan_output());
        let record = set.get("aws_instance.web_server").unwrap();

        assert_eq!(record.action, ActionKind::Create);
        assert_eq!(record.symbol, "+");
        assert_eq!(record.resource_type.as_deref(), Some("aws_instance"));
        assert_eq!(record.resource_name.as_deref(), Some("web_server"));
        assert!(record.body.starts_with("  + resource \"aws_instance\" \"web_server\" {"));
        assert!(record.body.contains("\"Name\" = \"web-server\""));
        assert!(record.body.ends_with("    }"));
    }

    #[test]
    fn test_parse_update_resource() {
        let set = parse_plan(sample_plan_output());
        let record = set.get("aws_security_group.main").unwrap();

        assert_eq!(record.action, ActionKind::Update);
        assert_eq!(record.symbol, "~");
        assert!(record.body.contains("\"80\" -> \"443\""));
    }

    #[test]
    fn test_parse_destroy_resource() {
        let set = parse_plan(sample_plan_output());
        let record = set.get("aws_instance.old_server").unwrap();

        assert_eq!(record.action, ActionKind::Destroy);
        assert_eq!(record.symbol, "-");
    }

    #[test]
    fn test_parse_replace_resource() {
        let set = parse_plan(sample_plan_output());
        let record = set.get("aws_instance.db").unwrap();

        assert_eq!(record.action, ActionKind::ReplaceDestroyFirst);
        assert_eq!(record.symbol, "-/+");
        assert!(record.body.contains("# forces replacement"));
    }

    #[test]
    fn test_parse_outputs_and_summary() {
        let set = parse_plan(sample_plan_output());
        let output = set.get("web_ip").unwrap();

        assert_eq!(output.action, ActionKind::OutputChange);
        assert_eq!(output.body, "(known after apply)");
        assert_eq!(set.outputs, vec!["web_ip".to_string()]);

        let summary = set.reported_summary.clone().unwrap();
        assert_eq!(summary.to_add, 2);
        assert_eq!(summary.to_change, 1);
        assert_eq!(summary.to_destroy, 2);
        assert!(summary.has_changes());
    }

    #[test]
    fn test_counts() {
        let counts = parse_plan(sample_plan_output()).counts();

        assert_eq!(counts.create, 1);
        assert_eq!(counts.update, 1);
        assert_eq!(counts.destroy, 1);
        assert_eq!(counts.replace_destroy_first, 1);
        assert_eq!(counts.output_changes, 1);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_scenario_single_create() {
        let text = "# aws_instance.web will be created\n  + resource \"aws_instance\" \"web\" {\n    ami = \"x\"\n  }\nPlan: 1 to add, 0 to change, 0 to destroy.\n";
        let set = parse_plan(text);

        assert_eq!(set.records.len(), 1);
        let record = set.get("aws_instance.web").unwrap();
        assert_eq!(record.address, "aws_instance.web");
        assert_eq!(record.action, ActionKind::Create);
        assert_eq!(record.symbol, "+");
        assert_eq!(record.resource_type.as_deref(), Some("aws_instance"));
        assert_eq!(record.resource_name.as_deref(), Some("web"));
        assert!(record.body.contains("    ami = \"x\""));
        assert!(record.body.contains("  }"));
        assert!(set.diagnostics.is_empty());
    }

    #[test]
    fn test_scenario_replace_create_first() {
        let text = "# x must be replaced\n+/- resource \"null_resource\" \"x\" {\n    }\n";
        let set = parse_plan(text);

        assert_eq!(set.get("x").unwrap().action, ActionKind::ReplaceCreateFirst);
        assert_eq!(set.counts().replace_create_first, 1);
        assert_eq!(set.counts().replace_destroy_first, 0);
    }

    #[test]
    fn test_tainted_replacement() {
        let text = PlanTextBuilder::new()
            .resource("aws_instance.web", "is tainted, so must be replaced", "-/+", "aws_instance", "web")
            .build();
        let set = parse_plan(&text);

        let record = set.get("aws_instance.web").unwrap();
        assert_eq!(record.action, ActionKind::ReplaceTaintedDestroyFirst);
        assert_eq!(record.symbol, "-/+");
        assert_eq!(set.counts().replace_tainted_destroy_first, 1);
        assert_eq!(set.counts().replace_destroy_first, 0);
    }

    #[test]
    fn test_undetermined_replacement_excluded() {
        let text = "# x must be replaced\n  ~ resource \"t\" \"x\" {\n    }\n";
        let set = parse_plan(text);

        assert!(set.records.is_empty());
        assert!(set.headers.is_empty());
        assert_eq!(set.counts().replacements(), 0);
        assert_eq!(set.diagnostics.len(), 1);
        assert_eq!(set.diagnostics[0].kind, DiagnosticKind::UndeterminedReplacement);
    }

    #[test]
    fn test_missing_body_still_counted() {
        let text = r#"
  # aws_instance.a will be created
  # aws_instance.b will be created
  + resource "aws_instance" "b" {
      + ami = "x"
    }
"#;
        let set = parse_plan(text);

        assert_eq!(set.counts().create, 2);
        assert!(set.get("aws_instance.a").is_none());
        assert!(set.get("aws_instance.b").is_some());
        assert_eq!(set.diagnostics.len(), 1);
        assert_eq!(set.diagnostics[0].kind, DiagnosticKind::MissingBody);
        assert_eq!(set.diagnostics[0].address, "aws_instance.a");
    }

    #[test]
    fn test_quoted_address_key() {
        let text = PlanTextBuilder::new()
            .resource(r#"aws_instance.web["blue"]"#, "will be created", "+", "aws_instance", "web")
            .build();
        let set = parse_plan(&text);

        let record = set.get(r#"aws_instance.web["blue"]"#).unwrap();
        assert_eq!(record.address, r#"aws_instance.web["blue"]"#);
        assert!(set.records.contains_key("aws_instance.web[blue]"));
    }

    #[test]
    fn test_drift_records() {
        let text = r#"
Terraform detected the following changes made outside of Terraform since the
last "terraform apply" which may have affected this plan:

  # aws_instance.a has changed
  ~ resource "aws_instance" "a" {
        id   = "i-1"
      ~ tags = {
          + "Owner" = "ops"
        }
    }

  # aws_instance.b has been deleted
  - resource "aws_instance" "b" {
      - id = "i-2" -> null
    }

  # aws_instance.c has been changed

Unless you have made equivalent changes to your configuration, or ignored the
relevant attributes using ignore_changes, the following plan may include
actions to undo or respond to these changes.
"#;
        let set = parse_plan(text);

        let a = set.get("aws_instance.a").unwrap();
        assert_eq!(a.action, ActionKind::DriftChanged);
        assert_eq!(a.symbol, "~");
        assert!(a.body.contains("\"Owner\" = \"ops\""));

        let b = set.get("aws_instance.b").unwrap();
        assert_eq!(b.action, ActionKind::DriftDeleted);
        assert_eq!(b.resource_type.as_deref(), Some("aws_instance"));

        let c = set.get("aws_instance.c").unwrap();
        assert_eq!(c.action, ActionKind::DriftChanged);
        assert!(c.body.is_empty());
        assert!(c.resource_type.is_none());

        assert_eq!(set.counts().drift_changed, 2);
        assert_eq!(set.counts().drift_deleted, 1);
        assert!(set.diagnostics.is_empty());
        assert!(!set.has_changes());
    }

    #[test]
    fn test_later_step_overwrites_earlier() {
        let text = r#"
  # aws_instance.a has changed
  ~ resource "aws_instance" "a" {
    }

  # aws_instance.a will be created
  + resource "aws_instance" "a" {
    }
"#;
        let set = parse_plan(text);

        // create runs before drift, so drift wins
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.get("aws_instance.a").unwrap().action, ActionKind::DriftChanged);
        assert_eq!(set.counts().create, 1);
        assert_eq!(set.counts().drift_changed, 1);
    }

    #[test]
    fn test_unknown_phrase_produces_nothing() {
        let text = r#"
  # aws_instance.a will be teleported
  + resource "aws_instance" "a" {
    }

  # aws_instance.b will be created
  + resource "aws_instance" "b" {
    }
"#;
        let set = parse_plan(text);

        assert!(set.get("aws_instance.a").is_none());
        assert!(set.get("aws_instance.b").is_some());
        assert!(set.diagnostics.is_empty());
    }

    #[test]
    fn test_no_changes_plan() {
        let output = r#"
No changes. Your infrastructure matches the configuration.

Terraform has compared your real infrastructure against your configuration
and found no differences, so no changes are needed.
"#;

        let set = parse_plan(output);

        assert!(set.is_empty());
        assert!(!set.has_changes());
        assert!(set.counts().is_empty());
        assert!(set.reported_summary.is_none());
    }

    #[test]
    fn test_empty_input() {
        let set = parse_plan("");
        assert!(set.is_empty());
        assert!(set.diagnostics.is_empty());
    }

    #[test]
    fn test_import_summary() {
        let set = parse_plan("Plan: 1 to import, 2 to add, 0 to change, 0 to destroy.\n");
        let summary = set.reported_summary.unwrap();

        assert_eq!(summary.to_import, 1);
        assert_eq!(summary.to_add, 2);
    }

    #[test]
    fn test_indented_plan_line_is_body_content() {
        let text = r#"  # a.b will be created
  + resource "a" "b" {
      + user_data = <<-EOT
            Plan: 9 to add, 9 to change, 9 to destroy.
            more
        EOT
    }
"#;
        let set = parse_plan(text);

        assert!(set.reported_summary.is_none());
        assert!(set.records["a.b"].body.contains("more"));
    }

    #[test]
    fn test_counts_match_headers_regardless_of_bodies() {
        let text = PlanTextBuilder::new()
            .resource("aws_instance.a", "will be created", "+", "aws_instance", "a")
            .header_only("aws_instance.b", "will be created")
            .resource("aws_instance.c", "will be destroyed", "-", "aws_instance", "c")
            .header_only("aws_instance.d", "will be destroyed")
            .build();
        let set = parse_plan(&text);

        assert_eq!(set.counts().create, 2);
        assert_eq!(set.counts().destroy, 2);
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.diagnostics.len(), 2);
    }

    #[test]
    fn test_body_round_trip_through_parse() {
        let first = parse_plan(
            &PlanTextBuilder::new()
                .resource("aws_instance.web", "will be updated in-place", "~", "aws_instance", "web")
                .build(),
        );
        let body = first.get("aws_instance.web").unwrap().body.clone();

        let rewrapped = format!("# aws_instance.web will be updated in-place\n{}\n", body);
        let second = parse_plan(&rewrapped);

        assert_eq!(second.get("aws_instance.web").unwrap().body, body);
    }

    #[test]
    fn test_parser_is_reusable_across_threads() {
        let parser = std::sync::Arc::new(PlanParser::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = std::sync::Arc::clone(&parser);
                std::thread::spawn(move || parser.parse(sample_plan_output()).counts().total())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5);
        }
    }
}
