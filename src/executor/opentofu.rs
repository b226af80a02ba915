use super::executor::Executor;

/// OpenTofu executor implementation
pub struct OpenTofuExecutor;

impl OpenTofuExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for OpenTofuExecutor {
    fn get_name(&self) -> &str {
        "tofu"
    }

    fn binary(&self) -> &str {
        "tofu"
    }
}

impl Default for OpenTofuExecutor {
    fn default() -> Self {
        Self::new()
    }
}
