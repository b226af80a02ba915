use anyhow::{Context, Result};
use std::path::Path;

use crate::traits::CommandExecutor;

/// Trait for Infrastructure as Code tools that can render a saved plan
///
/// Saved plan files are binary; `<binary> show -no-color <plan>` turns them
/// into the text the plan parser reads.
pub trait Executor: Send + Sync {
    /// Get the name of this executor (e.g., "tofu", "terraform")
    fn get_name(&self) -> &str;

    /// Binary invoked for this executor
    fn binary(&self) -> &str;

    /// Check if the executor is installed and available
    ///
    /// Runs `<binary> version`; a spawn failure means not installed.
    fn check_installed(&self, command: &dyn CommandExecutor) -> Result<bool> {
        match command.execute(self.binary(), &["version"], Path::new(".")) {
            Ok(output) => Ok(output.status.success()),
            Err(_) => Ok(false),
        }
    }

    /// Render a saved plan file as text
    ///
    /// The command runs in the plan file's directory, where the tool finds
    /// its initialized providers.
    fn show_plan(&self, command: &dyn CommandExecutor, plan_file: &Path) -> Result<String> {
        let working_dir = plan_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = plan_file
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid plan file path: {:?}", plan_file))?;

        let output = command
            .execute(self.binary(), &["show", "-no-color", file_name], working_dir)
            .with_context(|| format!("Failed to run {} show", self.binary()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{} show failed for {:?}: {}",
                self.binary(),
                plan_file,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
