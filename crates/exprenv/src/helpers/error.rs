//! Error types for helper methods.

use thiserror::Error;

/// An error raised by a helper method.
#[derive(Debug, Error, PartialEq)]
pub enum HelperError {
    /// Date or time components that do not form a valid instant.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A date format pattern with unknown or malformed specifiers.
    #[error("invalid date pattern '{pattern}'")]
    InvalidPattern { pattern: String },

    /// Plural rules could not be loaded for a locale.
    #[error("no plural rules for locale '{locale}': {message}")]
    PluralRules { locale: String, message: String },

    /// An aggregate was asked for a non-numeric element.
    #[error("cannot aggregate {type_name} value at index {index}")]
    NotNumeric {
        index: usize,
        type_name: &'static str,
    },

    /// An average was asked for an empty sequence.
    #[error("cannot compute the average of an empty sequence")]
    EmptyAggregate,

    /// A sort met two values with no defined order.
    #[error("cannot compare {left} with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    /// An abbreviation limit too small to hold the ellipsis.
    #[error("abbreviation size must be at least 3, got {0}")]
    AbbreviateTooShort(usize),
}
