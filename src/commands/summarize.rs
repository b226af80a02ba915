use anyhow::{Context as _, Result};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use super::plan_input::{read_plan_text, PlanSource};
use crate::config::{ConfigLoader, OutputFormat};
use crate::context::Context;
use crate::diff::{
    detect_terminal_width, looks_like_plan, AsciiRenderer, ChangeRecord, ChangeSet, Diagnostic,
    DiffRenderOptions, DiffRenderer, GroupCounts, HtmlRenderer, PlanParser, PlanSummary, PlanView,
    PresentationGroup,
};

/// Flags of the `summarize` command
#[derive(Debug, Clone, Default)]
pub struct SummarizeOptions {
    pub input: Option<String>,
    pub plan_file: Option<String>,
    pub executor: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<String>,
    pub bodies: bool,
    pub no_color: bool,
    pub force: bool,
    pub verbose: bool,
    pub config: Option<String>,
}

/// Machine-readable report
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: String,
    pub has_changes: bool,
    pub counts: GroupCounts,
    pub reported_summary: Option<PlanSummary>,
    pub groups: Vec<PresentationGroup>,
    pub records: Vec<ChangeRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanReport {
    pub fn from_change_set(set: &ChangeSet) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            has_changes: set.has_changes(),
            counts: set.counts(),
            reported_summary: set.reported_summary.clone(),
            groups: PlanView::build(set).groups,
            records: set.records.values().cloned().collect(),
            diagnostics: set.diagnostics.clone(),
        }
    }
}

/// Handles the 'summarize' command - parses plan text and renders a report
pub struct SummarizeCommand;

impl SummarizeCommand {
    /// Execute the summarize command
    pub fn execute(ctx: &Context, options: &SummarizeOptions) -> Result<()> {
        let config = ConfigLoader::new(&*ctx.fs).load(options.config.as_deref().map(Path::new))?;

        let executor = options.executor.as_deref().unwrap_or(&config.executor);
        let source = PlanSource::from_args(
            options.input.as_deref(),
            options.plan_file.as_deref(),
            executor,
        )?;
        let text = read_plan_text(ctx, &source)?;

        if !options.force && !looks_like_plan(&text) {
            anyhow::bail!(
                "No valid plan found in {} (use --force to parse anyway)",
                source.describe()
            );
        }

        let set = PlanParser::new().parse(&text);

        if set.is_empty() && options.force {
            ctx.output.warning(&format!("Nothing recognized in {}", source.describe()));
        }

        Self::report_diagnostics(ctx, &set, options.verbose);

        let format = options.format.unwrap_or(config.format);
        let writing_to_terminal = options.output.is_none() && std::io::stdout().is_terminal();

        let render_options = DiffRenderOptions {
            show_bodies: options.bodies || config.show_bodies,
            color: config.color && !options.no_color && writing_to_terminal,
            max_body_lines: config.max_body_lines,
            terminal_width: detect_terminal_width().unwrap_or(100),
        };

        let content = Self::render(&set, format, &render_options)?;

        match &options.output {
            Some(file) => {
                ctx.fs.write(&PathBuf::from(file), &content)?;
                ctx.output.success(&format!("Plan report written to: {}", file));
            }
            None => ctx.output.plain(&content),
        }

        Ok(())
    }

    /// Render the change set in the requested format
    pub fn render(set: &ChangeSet, format: OutputFormat, options: &DiffRenderOptions) -> Result<String> {
        let content = match format {
            OutputFormat::Text => AsciiRenderer::new().render(set, options),
            OutputFormat::Html => HtmlRenderer::new().render(set, options),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&PlanReport::from_change_set(set))
                    .context("Failed to serialize report as JSON")?;
                json.push('\n');
                json
            }
            OutputFormat::Yaml => serde_yaml::to_string(&PlanReport::from_change_set(set))
                .context("Failed to serialize report as YAML")?,
        };

        Ok(content)
    }

    fn report_diagnostics(ctx: &Context, set: &ChangeSet, verbose: bool) {
        let mismatch = summary_mismatch(set);

        if verbose {
            for diagnostic in &set.diagnostics {
                ctx.output.warning(&diagnostic.message);
            }

            if let Some(message) = mismatch {
                ctx.output.warning(&message);
            }

            return;
        }

        if !set.diagnostics.is_empty() {
            ctx.output.dimmed(&format!(
                "{} parse diagnostic(s), run with --verbose to show",
                set.diagnostics.len()
            ));
        }
    }
}

/// Compare header counts against the plan's own `Plan:` line
///
/// Replacements count once as an add and once as a destroy.
pub fn summary_mismatch(set: &ChangeSet) -> Option<String> {
    let reported = set.reported_summary.as_ref()?;
    let counts = set.counts();

    let expected = (
        counts.create + counts.replacements(),
        counts.update,
        counts.destroy + counts.replacements(),
    );
    let actual = (reported.to_add, reported.to_change, reported.to_destroy);

    if expected == actual {
        return None;
    }

    Some(format!(
        "Plan line reports {} to add, {} to change, {} to destroy but {} / {} / {} were found",
        actual.0, actual.1, actual.2, expected.0, expected.1, expected.2
    ))
}
