//! Error types for context construction.

use icu_locale_core::{Locale, ParseError};
use thiserror::Error;

/// An error raised while assembling an evaluation context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The locale tag is not a valid BCP-47 locale.
    #[error("invalid locale '{tag}': {source}")]
    InvalidLocale {
        tag: String,
        #[source]
        source: ParseError,
    },
}

/// Parse a locale tag such as `en`, `en-US` or `pt_BR`.
///
/// Locales are validated here, at the boundary, so that helper construction
/// further in never sees a malformed locale.
///
/// # Example
///
/// ```
/// use exprenv::parse_locale;
///
/// let locale = parse_locale("en-US").unwrap();
/// assert_eq!(locale.to_string(), "en-US");
/// assert!(parse_locale("not a locale").is_err());
/// ```
pub fn parse_locale(tag: &str) -> Result<Locale, ContextError> {
    tag.parse::<Locale>()
        .map_err(|source| ContextError::InvalidLocale {
            tag: tag.to_string(),
            source,
        })
}
