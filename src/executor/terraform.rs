use super::executor::Executor;

/// Terraform executor implementation
pub struct TerraformExecutor;

impl TerraformExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for TerraformExecutor {
    fn get_name(&self) -> &str {
        "terraform"
    }

    fn binary(&self) -> &str {
        "terraform"
    }
}

impl Default for TerraformExecutor {
    fn default() -> Self {
        Self::new()
    }
}
