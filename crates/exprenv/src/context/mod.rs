//! Evaluation contexts and requests.
//!
//! A [`Context`] carries the locale and variables of one template execution.
//! An [`EvaluationRequest`] adds the evaluation root and selection target for
//! a single expression, and is either a plain [`ProcessingContext`] or a full
//! template [`Invocation`] with access to the engine configuration.

mod error;
mod execution;
mod request;

pub use error::{ContextError, parse_locale};
pub use execution::{Context, ContextKind};
pub use request::{EvaluationRequest, Invocation, ProcessingContext};
