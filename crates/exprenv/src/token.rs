//! Generic token expressions.
//!
//! A generic token is a bare literal such as `submit`, `user.name` or
//! `data-id` that needs no grammar parsing. The expression dispatcher tries
//! [`TokenExpression::parse`] first and only hands the text to the full
//! expression parser when it is not a token.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::thread::{self, ThreadId};

use exprenv_semantics::scan_token;
use serde::Serialize;
use tracing::trace;

use crate::types::Value;

/// Receives an event each time a generic token is evaluated.
pub trait TokenObserver {
    fn token_evaluated(&self, token: &TokenExpression, thread: ThreadId);
}

/// A string recognized as a generic token.
///
/// # Example
///
/// ```
/// use exprenv::{TokenExpression, Value};
///
/// let token = TokenExpression::parse("abc123").unwrap();
/// assert_eq!(token.value(), "abc123");
/// assert_eq!(token.execute(), Value::from("abc123"));
///
/// assert!(TokenExpression::parse("a(b)").is_none());
/// assert!(TokenExpression::classify(None).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TokenExpression {
    value: String,
}

impl TokenExpression {
    /// Recognize `input` as a generic token.
    ///
    /// Returns `None` when any character of `input` is not token material, so
    /// that the caller can fall through to full grammar parsing. The empty
    /// string is a token.
    pub fn parse(input: &str) -> Option<Self> {
        scan_token(input).then(|| Self {
            value: input.to_string(),
        })
    }

    /// Like [`TokenExpression::parse`], treating absent input as not a token.
    pub fn classify(input: Option<&str>) -> Option<Self> {
        input.and_then(Self::parse)
    }

    /// The original text, unchanged.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Evaluate the token: its value is its own text.
    pub fn execute(&self) -> Value {
        trace!(
            thread = ?thread::current().id(),
            token = %self.value,
            "evaluating generic token"
        );
        Value::String(self.value.clone())
    }

    /// Evaluate the token, notifying `observer`.
    pub fn execute_observed(&self, observer: &dyn TokenObserver) -> Value {
        observer.token_evaluated(self, thread::current().id());
        self.execute()
    }
}

impl Display for TokenExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.value)
    }
}
