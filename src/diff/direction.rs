//! Replacement direction classification
//!
//! A `must be replaced` header does not say which half of the replacement runs
//! first. The body does: its first diff-symbol line starts with `+/` for
//! create-before-destroy and `-/` for destroy-before-create.

use super::boundary::is_header_like;
use super::header::{HeaderMatch, HeaderScan, PhraseClass};
use super::types::ActionKind;

/// Order in which the two halves of a replacement run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementDirection {
    /// `+/-`: new object created before the old one is destroyed
    CreateFirst,
    /// `-/+`: old object destroyed before the new one is created
    DestroyFirst,
}

impl ReplacementDirection {
    /// Diff symbol introducing the resource body
    pub fn symbol(&self) -> &'static str {
        match self {
            ReplacementDirection::CreateFirst => "+/-",
            ReplacementDirection::DestroyFirst => "-/+",
        }
    }

    /// Action kind for a header in this direction
    pub fn action(&self, tainted: bool) -> ActionKind {
        match (self, tainted) {
            (ReplacementDirection::CreateFirst, false) => ActionKind::ReplaceCreateFirst,
            (ReplacementDirection::CreateFirst, true) => ActionKind::ReplaceTaintedCreateFirst,
            (ReplacementDirection::DestroyFirst, false) => ActionKind::ReplaceDestroyFirst,
            (ReplacementDirection::DestroyFirst, true) => ActionKind::ReplaceTaintedDestroyFirst,
        }
    }
}

/// Look at the lines after a header for the first `+/` or `-/` line
///
/// The scan stops at the next header-like line; `None` means the direction
/// could not be determined.
pub fn classify_direction(lines: &[String], header_line: usize) -> Option<ReplacementDirection> {
    for line in lines.iter().skip(header_line + 1) {
        if is_header_like(line) {
            return None;
        }

        let trimmed = line.trim_start();

        if trimmed.starts_with("+/") {
            return Some(ReplacementDirection::CreateFirst);
        }

        if trimmed.starts_with("-/") {
            return Some(ReplacementDirection::DestroyFirst);
        }
    }

    None
}

/// A replacement header together with its resolved action
#[derive(Debug, Clone)]
pub struct ClassifiedReplacement<'a> {
    pub header: &'a HeaderMatch,
    pub direction: ReplacementDirection,
    pub tainted: bool,
}

impl ClassifiedReplacement<'_> {
    pub fn action(&self) -> ActionKind {
        self.direction.action(self.tainted)
    }
}

/// Replacement headers partitioned by direction
///
/// Every replacement header lands in exactly one of the three lists.
#[derive(Debug, Default)]
pub struct DirectionBuckets<'a> {
    pub create_first: Vec<ClassifiedReplacement<'a>>,
    pub destroy_first: Vec<ClassifiedReplacement<'a>>,
    pub undetermined: Vec<&'a HeaderMatch>,
}

impl<'a> DirectionBuckets<'a> {
    /// Partition all replacement headers of a scan
    ///
    /// Within each bucket non-tainted headers come first, then tainted ones,
    /// each in document order.
    pub fn partition(lines: &[String], scan: &'a HeaderScan) -> Self {
        let mut buckets = Self::default();

        for tainted in [false, true] {
            let headers = scan
                .matches
                .iter()
                .filter(|m| m.phrase.class() == PhraseClass::Replacement { tainted });

            for header in headers {
                match classify_direction(lines, header.line) {
                    Some(direction) => {
                        let classified = ClassifiedReplacement {
                            header,
                            direction,
                            tainted,
                        };

                        match direction {
                            ReplacementDirection::CreateFirst => {
                                buckets.create_first.push(classified)
                            }
                            ReplacementDirection::DestroyFirst => {
                                buckets.destroy_first.push(classified)
                            }
                        }
                    }
                    None => buckets.undetermined.push(header),
                }
            }
        }

        buckets
    }
}
