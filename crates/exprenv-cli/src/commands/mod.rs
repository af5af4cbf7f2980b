//! CLI command implementations.

mod classify;
mod vars;

pub use classify::{ClassifyArgs, run_classify};
pub use vars::{VarsArgs, run_vars};
