#[allow(clippy::module_inception)]
pub mod executor;
pub mod opentofu;
pub mod registry;
pub mod terraform;

pub use executor::Executor;
pub use opentofu::OpenTofuExecutor;
pub use registry::{DefaultExecutorRegistry, ExecutorRegistry};
pub use terraform::TerraformExecutor;
