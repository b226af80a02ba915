use crate::executor::{DefaultExecutorRegistry, ExecutorRegistry};
use crate::traits::{
    CommandExecutor, FileSystem, Output, RealCommandExecutor, RealFileSystem, TerminalOutput,
};
use std::sync::Arc;

/// Collaborators the commands run against
///
/// The plan parser itself needs none of these; they cover reading plan text,
/// invoking `tofu`/`terraform show` and reporting back to the user.
#[derive(Clone)]
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub output: Arc<dyn Output>,
    pub command: Arc<dyn CommandExecutor>,
    pub executor_registry: Arc<dyn ExecutorRegistry>,
}

impl Context {
    /// Context backed by the real filesystem, terminal and processes
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            output: Arc::new(TerminalOutput),
            command: Arc::new(RealCommandExecutor::new()),
            executor_registry: Arc::new(DefaultExecutorRegistry::with_defaults()),
        }
    }

    /// Context with caller-supplied mocks and the default executors
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        output: Arc<dyn Output>,
        command: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            fs,
            output,
            command,
            executor_registry: Arc::new(DefaultExecutorRegistry::with_defaults()),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
