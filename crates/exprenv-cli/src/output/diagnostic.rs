//! Miette diagnostics for CLI failures.
//!
//! Fields are read by the miette derive macros, not directly by code.

use exprenv_semantics::{TOKEN_DELIMITERS, TokenCharClass, char_class};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// An expression that is not a generic token, pointing at the first
/// character that disqualifies it.
#[derive(Debug, Error, Diagnostic)]
#[error("'{expression}' is not a generic token")]
#[diagnostic(code(exprenv::not_a_token))]
pub struct TokenDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    expression: String,

    label: String,

    #[help]
    help: Option<String>,
}

impl TokenDiagnostic {
    /// Create a diagnostic for the character at byte `offset` of `expression`.
    pub fn new(expression: &str, offset: usize) -> Self {
        let offset = offset.min(expression.len());
        let character = expression[offset..].chars().next();
        let width = character.map_or(0, char::len_utf8);
        let (label, help) = match character {
            Some(c) => explain(c),
            None => ("here".to_string(), None),
        };

        TokenDiagnostic {
            src: NamedSource::new("expression", expression.to_string()),
            span: (offset, width).into(),
            expression: expression.to_string(),
            label,
            help,
        }
    }
}

fn explain(c: char) -> (String, Option<String>) {
    match char_class(c) {
        TokenCharClass::Hyphen => (
            "hyphen after a number".to_string(),
            Some("a hyphen needs a non-numeric character before it, as in `data-id`".to_string()),
        ),
        TokenCharClass::Delimiter if TOKEN_DELIMITERS.contains(&c) => (
            format!("{} is expression syntax", describe_char(c)),
            Some("this text is handled by the full expression parser".to_string()),
        ),
        TokenCharClass::Delimiter | TokenCharClass::Token => (
            format!("{} is not token material", describe_char(c)),
            Some("tokens contain letters, digits, `.`, `_`, `[`, `]` and `-`".to_string()),
        ),
    }
}

fn describe_char(c: char) -> String {
    match c {
        ' ' => "space".to_string(),
        '\n' => "newline".to_string(),
        c => format!("`{c}`"),
    }
}

/// A variable name that the evaluation environment does not define.
#[derive(Debug, Error, Diagnostic)]
#[error("no evaluation variable named '{name}'")]
#[diagnostic(code(exprenv::unknown_variable))]
pub struct UnknownVariableDiagnostic {
    name: String,

    #[help]
    help: Option<String>,
}

impl UnknownVariableDiagnostic {
    /// Create a diagnostic, suggesting the given close matches.
    pub fn new(name: &str, suggestions: &[String]) -> Self {
        let help = match suggestions {
            [] => None,
            [only] => Some(format!("did you mean `{only}`?")),
            many => Some(format!(
                "did you mean one of: {}?",
                many.iter()
                    .map(|s| format!("`{s}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        };
        UnknownVariableDiagnostic {
            name: name.to_string(),
            help,
        }
    }
}
