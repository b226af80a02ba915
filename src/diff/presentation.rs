//! Presentation grouping
//!
//! Renderers never walk a [`ChangeSet`] directly; they consume a [`PlanView`],
//! which lays entries out in a fixed order that downstream consumers may rely on:
//!
//! 1. destroy
//! 2. replace, create before destroy (tainted included)
//! 3. replace, destroy before create (tainted included)
//! 4. update
//! 5. create
//! 6. output changes (`-`, then `~`, then `+`)
//! 7. drift: changed, then deleted
//!
//! Empty groups are omitted.

use serde::Serialize;

use super::outputs::sort_by_severity;
use super::types::{clean_address, ActionKind, ChangeRecord, ChangeSet};

/// Display group, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Destroy,
    ReplaceCreateFirst,
    ReplaceDestroyFirst,
    Update,
    Create,
    OutputChanges,
    DriftChanged,
    DriftDeleted,
}

impl GroupKind {
    pub const ORDER: [GroupKind; 8] = [
        GroupKind::Destroy,
        GroupKind::ReplaceCreateFirst,
        GroupKind::ReplaceDestroyFirst,
        GroupKind::Update,
        GroupKind::Create,
        GroupKind::OutputChanges,
        GroupKind::DriftChanged,
        GroupKind::DriftDeleted,
    ];

    /// Group an action kind belongs to
    pub fn for_action(action: ActionKind) -> GroupKind {
        match action {
            ActionKind::Destroy => GroupKind::Destroy,
            ActionKind::ReplaceCreateFirst | ActionKind::ReplaceTaintedCreateFirst => {
                GroupKind::ReplaceCreateFirst
            }
            ActionKind::ReplaceDestroyFirst | ActionKind::ReplaceTaintedDestroyFirst => {
                GroupKind::ReplaceDestroyFirst
            }
            ActionKind::Update => GroupKind::Update,
            ActionKind::Create => GroupKind::Create,
            ActionKind::OutputChange => GroupKind::OutputChanges,
            ActionKind::DriftChanged => GroupKind::DriftChanged,
            ActionKind::DriftDeleted => GroupKind::DriftDeleted,
        }
    }

    /// Heading shown above the group, e.g. `3 TO BE DESTROYED`
    pub fn heading(&self, count: usize) -> String {
        let text = match self {
            GroupKind::Destroy => "TO BE DESTROYED",
            GroupKind::ReplaceCreateFirst => "CREATE BEFORE DESTROY REPLACEMENT",
            GroupKind::ReplaceDestroyFirst => "DESTROY BEFORE CREATE REPLACEMENT",
            GroupKind::Update => "TO BE UPDATED",
            GroupKind::Create => "TO BE CREATED",
            GroupKind::OutputChanges => "OUTPUT CHANGES",
            GroupKind::DriftChanged => "CHANGED OUTSIDE OF TERRAFORM",
            GroupKind::DriftDeleted => "DELETED OUTSIDE OF TERRAFORM",
        };

        format!("{} {}", count, text)
    }

    /// CSS class / style bucket
    pub fn css_class(&self) -> &'static str {
        match self {
            GroupKind::Destroy | GroupKind::ReplaceCreateFirst | GroupKind::ReplaceDestroyFirst => {
                "destroy"
            }
            GroupKind::Update => "update",
            GroupKind::Create => "create",
            GroupKind::OutputChanges => "output",
            GroupKind::DriftChanged | GroupKind::DriftDeleted => "drift",
        }
    }

    /// RGB color used by terminal renderers
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            GroupKind::Destroy => ActionKind::Destroy.color(),
            GroupKind::ReplaceCreateFirst | GroupKind::ReplaceDestroyFirst => {
                ActionKind::ReplaceCreateFirst.color()
            }
            GroupKind::Update => ActionKind::Update.color(),
            GroupKind::Create => ActionKind::Create.color(),
            GroupKind::OutputChanges => ActionKind::OutputChange.color(),
            GroupKind::DriftChanged | GroupKind::DriftDeleted => ActionKind::DriftChanged.color(),
        }
    }
}

/// One line of a presentation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEntry {
    /// Address as written (quotes retained)
    pub label: String,

    /// Lookup key into the change set's records
    pub key: String,

    pub symbol: String,

    pub action: ActionKind,

    /// Whether the change set holds a record (body) for this entry
    pub has_details: bool,
}

/// A non-empty display group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationGroup {
    pub kind: GroupKind,
    pub heading: String,
    pub entries: Vec<ViewEntry>,
}

/// Presentation-ordered view over a change set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanView {
    pub groups: Vec<PresentationGroup>,
}

impl PlanView {
    /// Group a change set into the fixed display order
    pub fn build(set: &ChangeSet) -> Self {
        let groups = GroupKind::ORDER
            .iter()
            .filter_map(|kind| {
                let entries = Self::entries_for(set, *kind);

                if entries.is_empty() {
                    None
                } else {
                    Some(PresentationGroup {
                        kind: *kind,
                        heading: kind.heading(entries.len()),
                        entries,
                    })
                }
            })
            .collect();

        Self { groups }
    }

    fn entries_for(set: &ChangeSet, kind: GroupKind) -> Vec<ViewEntry> {
        if kind == GroupKind::OutputChanges {
            let mut entries: Vec<ViewEntry> = set
                .outputs
                .iter()
                .filter_map(|key| set.records.get(key))
                .filter(|record| record.action == ActionKind::OutputChange)
                .map(|record| Self::entry(record.address.as_str(), record.action, &record.symbol, true))
                .collect();

            sort_by_severity(&mut entries, |entry| entry.symbol.as_str());
            return entries;
        }

        set.headers
            .iter()
            .filter(|header| GroupKind::for_action(header.action) == kind)
            .map(|header| {
                let symbol = header.action.symbol().unwrap_or_default();
                let has_details = set
                    .get(&header.address)
                    .is_some_and(|record| record.action == header.action);

                Self::entry(&header.address, header.action, symbol, has_details)
            })
            .collect()
    }

    fn entry(label: &str, action: ActionKind, symbol: &str, has_details: bool) -> ViewEntry {
        ViewEntry {
            label: label.to_string(),
            key: clean_address(label),
            symbol: symbol.to_string(),
            action,
            has_details,
        }
    }

    /// Look up the record behind an entry
    pub fn record<'a>(set: &'a ChangeSet, entry: &ViewEntry) -> Option<&'a ChangeRecord> {
        if !entry.has_details {
            return None;
        }

        set.records.get(&entry.key)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in order, as kinds only
    #[cfg(test)]
    pub fn kinds(&self) -> Vec<GroupKind> {
        self.groups.iter().map(|g| g.kind).collect()
    }
}
