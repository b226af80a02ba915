//! Helpers shared by commands that read plan text

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::context::Context;

/// Marker argument meaning "read from stdin"
pub const STDIN_MARKER: &str = "-";

/// Where plan text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource<'a> {
    /// Text on standard input
    Stdin,
    /// A text file holding captured plan output
    TextFile(&'a Path),
    /// A saved binary plan, rendered through an executor
    PlanFile { path: &'a Path, executor: &'a str },
}

impl<'a> PlanSource<'a> {
    /// Pick a source from the positional input and `--plan-file`
    pub fn from_args(input: Option<&'a str>, plan_file: Option<&'a str>, executor: &'a str) -> Result<Self> {
        match (input, plan_file) {
            (Some(input), Some(_)) if input != STDIN_MARKER => {
                anyhow::bail!("Cannot combine an input file with --plan-file")
            }
            (_, Some(path)) => Ok(PlanSource::PlanFile {
                path: Path::new(path),
                executor,
            }),
            (None, None) => Ok(PlanSource::Stdin),
            (Some(input), None) if input == STDIN_MARKER => Ok(PlanSource::Stdin),
            (Some(input), None) => Ok(PlanSource::TextFile(Path::new(input))),
        }
    }

    /// Short description for messages
    pub fn describe(&self) -> String {
        match self {
            PlanSource::Stdin => "stdin".to_string(),
            PlanSource::TextFile(path) => path.display().to_string(),
            PlanSource::PlanFile { path, executor } => {
                format!("{} (via {} show)", path.display(), executor)
            }
        }
    }
}

/// Read plan text from the given source
pub fn read_plan_text(ctx: &Context, source: &PlanSource<'_>) -> Result<String> {
    match source {
        PlanSource::Stdin => {
            std::io::read_to_string(std::io::stdin()).context("Failed to read plan from stdin")
        }
        PlanSource::TextFile(path) => ctx.fs.read_to_string(path),
        PlanSource::PlanFile { path, executor } => {
            if !ctx.fs.exists(path) {
                anyhow::bail!("Plan file not found: {}", path.display());
            }

            let executor = ctx.executor_registry.get(executor)?;

            if !executor.check_installed(&*ctx.command)? {
                anyhow::bail!(
                    "{} is not installed or not available in PATH",
                    executor.get_name()
                );
            }

            executor.show_plan(&*ctx.command, path)
        }
    }
}
