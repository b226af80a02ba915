use anyhow::Result;

use super::plan_input::{read_plan_text, PlanSource};
use crate::context::Context;
use crate::diff::{looks_like_plan, parse_plan, ActionKind, NO_CHANGES_MESSAGE};

/// Handles the 'check' command - validates input and prints per-kind counts
pub struct CheckCommand;

impl CheckCommand {
    /// Execute the check command
    ///
    /// Fails when the input does not look like plan output.
    pub fn execute(ctx: &Context, input: Option<&str>) -> Result<()> {
        let source = PlanSource::from_args(input, None, "")?;
        let text = read_plan_text(ctx, &source)?;

        ctx.output.section("Plan Check");
        ctx.output.key_value("Input", &source.describe());

        let valid = looks_like_plan(&text);
        ctx.output.check_result("Plan output", valid);

        if !valid {
            anyhow::bail!("No valid plan found in {}", source.describe());
        }

        let set = parse_plan(&text);
        let counts = set.counts();

        if counts.is_empty() {
            ctx.output.info(NO_CHANGES_MESSAGE);
        }

        for action in [
            ActionKind::Destroy,
            ActionKind::ReplaceCreateFirst,
            ActionKind::ReplaceDestroyFirst,
            ActionKind::ReplaceTaintedCreateFirst,
            ActionKind::ReplaceTaintedDestroyFirst,
            ActionKind::Update,
            ActionKind::Create,
            ActionKind::OutputChange,
            ActionKind::DriftChanged,
            ActionKind::DriftDeleted,
        ] {
            let count = counts.get(action);

            if count > 0 {
                ctx.output.key_value(action.label(), &count.to_string());
            }
        }

        if let Some(summary) = &set.reported_summary {
            ctx.output.key_value(
                "Plan line",
                &format!(
                    "{} to add, {} to change, {} to destroy",
                    summary.to_add, summary.to_change, summary.to_destroy
                ),
            );
        }

        if !set.diagnostics.is_empty() {
            ctx.output.key_value("Diagnostics", &set.diagnostics.len().to_string());
        }

        ctx.output.success("Plan parsed");

        Ok(())
    }
}
