pub mod check;
pub mod plan_input;
pub mod summarize;

pub use check::CheckCommand;
pub use summarize::{SummarizeCommand, SummarizeOptions};
