//! Cheap check for whether text is plan output at all

use super::boundary::PLAN_SUMMARY_PREFIX;
use super::header::HeaderPhrase;
use super::outputs::OUTPUTS_HEADER;

/// Markers that only appear in plan output
const PLAN_MARKERS: [&str; 5] = [
    "will perform the following actions",
    "No changes.",
    PLAN_SUMMARY_PREFIX,
    OUTPUTS_HEADER,
    "changes made outside of",
];

/// Whether `text` plausibly contains OpenTofu/Terraform plan output
///
/// True when a plan marker is present, or when the text mentions `resource`
/// together with any known header phrase.
pub fn looks_like_plan(text: &str) -> bool {
    if PLAN_MARKERS.iter().any(|marker| text.contains(marker)) {
        return true;
    }

    text.contains("resource")
        && HeaderPhrase::ALL
            .iter()
            .any(|phrase| text.contains(phrase.text()))
}
