//! Plan text parsing module
//!
//! This module turns the human-readable output of `tofu plan` /
//! `terraform plan` into a structured [`ChangeSet`] and lays it out for
//! display.
//!
//! # Pipeline
//!
//! - **Normalize**: strip ANSI escapes and the two-space header indent
//! - **Scan**: find `# <address> <phrase>` headers and classify them
//! - **Direction**: decide create-first / destroy-first for replacements
//! - **Extract**: pull the `resource "<type>" "<name>" {` body under each header
//! - **Outputs**: parse the `Changes to Outputs:` section
//! - **Present**: group records into a fixed display order ([`PlanView`])
//!
//! # Example
//!
//! ```ignore
//! use crate::diff::{PlanParser, AsciiRenderer, DiffRenderer, DiffRenderOptions};
//!
//! let set = PlanParser::new().parse(&plan_output);
//!
//! let renderer = AsciiRenderer::new();
//! let options = DiffRenderOptions::default();
//! println!("{}", renderer.render(&set, &options));
//! ```

mod body;
mod boundary;
mod direction;
mod header;
mod normalize;
mod outputs;
mod parser;
mod precheck;
mod presentation;
mod renderer;
mod types;

pub use parser::{parse_plan, PlanParser};
pub use precheck::looks_like_plan;
pub use presentation::{PlanView, PresentationGroup};
pub use renderer::{
    detect_terminal_width, AsciiRenderer, DiffRenderOptions, DiffRenderer, HtmlRenderer,
    NO_CHANGES_MESSAGE,
};
pub use types::{ActionKind, ChangeRecord, ChangeSet, Diagnostic, GroupCounts, PlanSummary};
