//! Data types for parsed plan output
//!
//! This module defines the structures produced by [`PlanParser`](super::PlanParser):
//! one [`ChangeRecord`] per resource address or output name, collected into a
//! [`ChangeSet`] together with every classified header and the diagnostics
//! raised while extracting bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed classification of what will happen to a resource or output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Resource will be created
    Create,
    /// Resource will be updated in-place
    Update,
    /// Resource will be destroyed
    Destroy,
    /// Replacement where the new object is created before the old one is destroyed
    ReplaceCreateFirst,
    /// Replacement where the old object is destroyed before the new one is created
    ReplaceDestroyFirst,
    /// Tainted object replaced create-before-destroy
    ReplaceTaintedCreateFirst,
    /// Tainted object replaced destroy-before-create
    ReplaceTaintedDestroyFirst,
    /// Object changed outside of the tool
    DriftChanged,
    /// Object deleted outside of the tool
    DriftDeleted,
    /// Output value change
    OutputChange,
}

impl ActionKind {
    /// Get the diff symbol for this action
    ///
    /// Output changes carry their own symbol (`+`, `~` or `-`), so `None` is
    /// returned for them.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            ActionKind::Create => Some("+"),
            ActionKind::Update | ActionKind::DriftChanged => Some("~"),
            ActionKind::Destroy | ActionKind::DriftDeleted => Some("-"),
            ActionKind::ReplaceCreateFirst | ActionKind::ReplaceTaintedCreateFirst => Some("+/-"),
            ActionKind::ReplaceDestroyFirst | ActionKind::ReplaceTaintedDestroyFirst => {
                Some("-/+")
            }
            ActionKind::OutputChange => None,
        }
    }

    /// Get the label for this action kind
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Create => "will be created",
            ActionKind::Update => "will be updated in-place",
            ActionKind::Destroy => "will be destroyed",
            ActionKind::ReplaceCreateFirst => "must be replaced (create before destroy)",
            ActionKind::ReplaceDestroyFirst => "must be replaced (destroy before create)",
            ActionKind::ReplaceTaintedCreateFirst => {
                "is tainted, so must be replaced (create before destroy)"
            }
            ActionKind::ReplaceTaintedDestroyFirst => {
                "is tainted, so must be replaced (destroy before create)"
            }
            ActionKind::DriftChanged => "has changed outside of the tool",
            ActionKind::DriftDeleted => "has been deleted outside of the tool",
            ActionKind::OutputChange => "output will change",
        }
    }

    /// Get RGB color tuple for this action kind
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ActionKind::Create => (152, 225, 152), // Pastel mint green
            ActionKind::Update => (255, 230, 160), // Pastel cream/yellow
            ActionKind::Destroy => (255, 160, 160), // Pastel coral
            ActionKind::ReplaceCreateFirst
            | ActionKind::ReplaceDestroyFirst
            | ActionKind::ReplaceTaintedCreateFirst
            | ActionKind::ReplaceTaintedDestroyFirst => (181, 174, 254), // Pastel lavender
            ActionKind::DriftChanged | ActionKind::DriftDeleted => (120, 180, 195), // Pastel teal
            ActionKind::OutputChange => (160, 200, 255), // Pastel sky blue
        }
    }
}

/// Remove quote characters from an address so it can be used as a lookup key
///
/// `aws_instance.web["a"]` becomes `aws_instance.web[a]`.
pub fn clean_address(address: &str) -> String {
    address.replace('"', "")
}

/// A single resource or output change extracted from the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Address as written in the header (quotes retained)
    pub address: String,

    /// Classified action
    pub action: ActionKind,

    /// Diff symbol (`+`, `~`, `-`, `+/-`, `-/+`)
    pub symbol: String,

    /// Declared resource type, when the record came from a resource body
    pub resource_type: Option<String>,

    /// Declared resource name, when the record came from a resource body
    pub resource_name: Option<String>,

    /// Verbatim body text
    pub body: String,

    /// Output value is a list or map and can be shown collapsed
    pub collapsible: bool,
}

impl ChangeRecord {
    /// Create a record with an empty body
    pub fn new(address: &str, action: ActionKind, symbol: &str) -> Self {
        Self {
            address: address.to_string(),
            action,
            symbol: symbol.to_string(),
            resource_type: None,
            resource_name: None,
            body: String::new(),
            collapsible: false,
        }
    }

    /// Set the declared resource type and name
    pub fn with_resource(mut self, resource_type: &str, resource_name: &str) -> Self {
        self.resource_type = Some(resource_type.to_string());
        self.resource_name = Some(resource_name.to_string());
        self
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Mark as collapsible
    pub fn with_collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Lookup key for this record (address without quotes)
    pub fn key(&self) -> String {
        clean_address(&self.address)
    }
}

/// A header that was recognized and assigned an action kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedHeader {
    /// Address as written in the header
    pub address: String,

    /// Assigned action kind
    pub action: ActionKind,
}

/// Kind of non-fatal problem found while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Header matched but no resource declaration followed it
    MissingBody,
    /// Replacement header without a `+/` or `-/` line before the next header
    UndeterminedReplacement,
}

/// A non-fatal parse event reported alongside the change set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub address: String,
    pub message: String,
}

impl Diagnostic {
    pub fn missing_body(address: &str, symbol: &str) -> Self {
        Self {
            kind: DiagnosticKind::MissingBody,
            address: address.to_string(),
            message: format!(
                "Failed to find `{} resource` block for {}",
                symbol, address
            ),
        }
    }

    pub fn undetermined_replacement(address: &str) -> Self {
        Self {
            kind: DiagnosticKind::UndeterminedReplacement,
            address: address.to_string(),
            message: format!(
                "Could not determine replacement order for {} (no +/ or -/ line)",
                address
            ),
        }
    }
}

/// Per action kind cardinalities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    pub create: usize,
    pub update: usize,
    pub destroy: usize,
    pub replace_create_first: usize,
    pub replace_destroy_first: usize,
    pub replace_tainted_create_first: usize,
    pub replace_tainted_destroy_first: usize,
    pub drift_changed: usize,
    pub drift_deleted: usize,
    pub output_changes: usize,
}

impl GroupCounts {
    /// Count one occurrence of an action kind
    pub fn increment(&mut self, action: ActionKind) {
        *self.slot(action) += 1;
    }

    /// Get the count for an action kind
    pub fn get(&self, action: ActionKind) -> usize {
        match action {
            ActionKind::Create => self.create,
            ActionKind::Update => self.update,
            ActionKind::Destroy => self.destroy,
            ActionKind::ReplaceCreateFirst => self.replace_create_first,
            ActionKind::ReplaceDestroyFirst => self.replace_destroy_first,
            ActionKind::ReplaceTaintedCreateFirst => self.replace_tainted_create_first,
            ActionKind::ReplaceTaintedDestroyFirst => self.replace_tainted_destroy_first,
            ActionKind::DriftChanged => self.drift_changed,
            ActionKind::DriftDeleted => self.drift_deleted,
            ActionKind::OutputChange => self.output_changes,
        }
    }

    fn slot(&mut self, action: ActionKind) -> &mut usize {
        match action {
            ActionKind::Create => &mut self.create,
            ActionKind::Update => &mut self.update,
            ActionKind::Destroy => &mut self.destroy,
            ActionKind::ReplaceCreateFirst => &mut self.replace_create_first,
            ActionKind::ReplaceDestroyFirst => &mut self.replace_destroy_first,
            ActionKind::ReplaceTaintedCreateFirst => &mut self.replace_tainted_create_first,
            ActionKind::ReplaceTaintedDestroyFirst => &mut self.replace_tainted_destroy_first,
            ActionKind::DriftChanged => &mut self.drift_changed,
            ActionKind::DriftDeleted => &mut self.drift_deleted,
            ActionKind::OutputChange => &mut self.output_changes,
        }
    }

    /// All replacements, tainted or not
    pub fn replacements(&self) -> usize {
        self.replace_create_first
            + self.replace_destroy_first
            + self.replace_tainted_create_first
            + self.replace_tainted_destroy_first
    }

    /// Resource changes the apply would perform (drift and outputs excluded)
    pub fn managed_changes(&self) -> usize {
        self.create + self.update + self.destroy + self.replacements()
    }

    /// Get total number of counted entries
    pub fn total(&self) -> usize {
        self.managed_changes() + self.drift_changed + self.drift_deleted + self.output_changes
    }

    /// Check if nothing was counted
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Totals from the trailing `Plan: ...` line, when the plan printed one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Number of resources to import
    pub to_import: usize,

    /// Number of resources to add
    pub to_add: usize,

    /// Number of resources to change
    pub to_change: usize,

    /// Number of resources to destroy
    pub to_destroy: usize,
}

impl PlanSummary {
    /// Check if there are any changes
    #[cfg(test)]
    pub fn has_changes(&self) -> bool {
        self.to_import > 0 || self.to_add > 0 || self.to_change > 0 || self.to_destroy > 0
    }
}

/// Complete result of one parse call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Detail map keyed by clean address
    pub records: BTreeMap<String, ChangeRecord>,

    /// Every classified header, in processing order
    pub headers: Vec<ClassifiedHeader>,

    /// Output keys in source order
    pub outputs: Vec<String>,

    /// Non-fatal events raised during parsing
    pub diagnostics: Vec<Diagnostic>,

    /// Totals from the `Plan:` line, if present
    pub reported_summary: Option<PlanSummary>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified header (counted whether or not a body is found)
    pub fn record_header(&mut self, address: &str, action: ActionKind) {
        self.headers.push(ClassifiedHeader {
            address: address.to_string(),
            action,
        });
    }

    /// Insert a record, replacing any earlier record with the same key
    pub fn insert(&mut self, record: ChangeRecord) {
        self.records.insert(record.key(), record);
    }

    /// Insert an output change record and remember its position
    pub fn insert_output(&mut self, record: ChangeRecord) {
        let key = record.key();
        if !self.outputs.contains(&key) {
            self.outputs.push(key);
        }
        self.insert(record);
    }

    /// Report a non-fatal event
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Look up a record by address (quotes are ignored)
    pub fn get(&self, address: &str) -> Option<&ChangeRecord> {
        self.records.get(&clean_address(address))
    }

    /// Count entries per action kind
    pub fn counts(&self) -> GroupCounts {
        let mut counts = GroupCounts::default();

        for header in &self.headers {
            counts.increment(header.action);
        }

        counts.output_changes = self.outputs.len();
        counts
    }

    /// Check if nothing was recognized at all
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.outputs.is_empty() && self.records.is_empty()
    }

    /// Check if the apply would change anything
    pub fn has_changes(&self) -> bool {
        let counts = self.counts();
        counts.managed_changes() > 0 || counts.output_changes > 0
    }
}
