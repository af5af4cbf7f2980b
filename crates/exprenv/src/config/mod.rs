//! Engine configuration visible to template invocations.
//!
//! The configuration carries execution attributes (one of which may be a
//! conversion service) and the message catalog used by `#messages`.

mod configuration;
mod error;
mod messages;

pub use configuration::{Configuration, ExecutionAttribute};
pub use error::ConfigError;
pub use messages::{MessageCatalog, absent_message, format_message};
