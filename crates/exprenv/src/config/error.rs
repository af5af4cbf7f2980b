//! Error types for configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::context::ContextError;

/// Errors that occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error when reading a configuration file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON of the expected shape.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A message catalog is keyed by an invalid locale tag.
    #[error("invalid message catalog: {0}")]
    InvalidLocale(#[from] ContextError),
}
