//! Message catalogs and message pattern formatting.

use std::collections::BTreeMap;

use icu_locale_core::Locale;
use serde::{Deserialize, Serialize};
use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{take, take_till};

use crate::context::{ContextError, parse_locale};

/// Localized message patterns, keyed by locale tag and then message key.
///
/// The empty tag holds the default messages. Lookups walk from the most
/// specific tag to the default: `en-US` tries `en-US`, then `en`, then `""`.
///
/// In JSON a catalog is a plain nested object:
///
/// ```json
/// { "": { "greeting": "Hello {0}" }, "es": { "greeting": "Hola {0}" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    bundles: BTreeMap<String, BTreeMap<String, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a locale, or to the defaults when `locale` is `None`.
    pub fn insert(
        &mut self,
        locale: Option<&Locale>,
        key: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Option<String> {
        self.bundles
            .entry(catalog_tag(locale))
            .or_default()
            .insert(key.into(), pattern.into())
    }

    /// Builder-style variant of [`MessageCatalog::insert`].
    pub fn with_message(
        mut self,
        locale: Option<&Locale>,
        key: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        self.insert(locale, key, pattern);
        self
    }

    /// Find the pattern for `key`, falling back through less specific locales.
    pub fn resolve(&self, key: &str, locale: Option<&Locale>) -> Option<&str> {
        candidate_tags(locale).iter().find_map(|tag| {
            self.bundles
                .get(tag)
                .and_then(|bundle| bundle.get(key))
                .map(String::as_str)
        })
    }

    /// Total number of messages across all locales.
    pub fn len(&self) -> usize {
        self.bundles.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locale tags with at least one message, in sorted order.
    pub fn locale_tags(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    /// Re-key every bundle with the canonical form of its locale tag.
    ///
    /// Catalogs read from files may use `pt_BR` or `EN`; lookups use the
    /// canonical `pt-BR` and `en`. Bundles whose tags canonicalize to the same
    /// locale are merged.
    pub(crate) fn normalized(self) -> Result<Self, ContextError> {
        let mut bundles: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (tag, messages) in self.bundles {
            let canonical = if tag.is_empty() {
                tag
            } else {
                parse_locale(&tag)?.to_string()
            };
            bundles.entry(canonical).or_default().extend(messages);
        }
        Ok(Self { bundles })
    }
}

fn catalog_tag(locale: Option<&Locale>) -> String {
    locale.map(ToString::to_string).unwrap_or_default()
}

/// Tags to try for a locale, most specific first, ending with the defaults.
fn candidate_tags(locale: Option<&Locale>) -> Vec<String> {
    let mut tags = Vec::with_capacity(4);
    if let Some(locale) = locale {
        tags.push(locale.to_string());
        let language = locale.id.language.as_str();
        if let Some(region) = locale.id.region {
            tags.push(format!("{language}-{}", region.as_str()));
        }
        tags.push(language.to_string());
    }
    tags.push(String::new());
    tags.dedup();
    tags
}

/// Text shown in place of a message that does not exist.
pub fn absent_message(key: &str, locale: Option<&Locale>) -> String {
    format!("??{key}_{}??", catalog_tag(locale))
}

/// A parsed fragment of a message pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece<'i> {
    Literal(&'i str),
    Argument(usize),
}

/// Substitute positional arguments into a message pattern.
///
/// `{0}`, `{1}`, ... are replaced by the corresponding argument; `{{` and
/// `}}` produce literal braces. Placeholders without a matching argument, and
/// braces that do not form a placeholder, are kept as written.
///
/// # Example
///
/// ```
/// use exprenv::config::format_message;
///
/// let args = ["Alice".to_string(), "3".to_string()];
/// assert_eq!(format_message("{0} has {1} items", &args), "Alice has 3 items");
/// assert_eq!(format_message("{{literal}} {2}", &args), "{literal} {2}");
/// ```
pub fn format_message(pattern: &str, args: &[String]) -> String {
    let mut input = pattern;
    let parsed: ModalResult<Vec<Piece<'_>>> = repeat(0.., piece).parse_next(&mut input);
    let Ok(pieces) = parsed else {
        return pattern.to_string();
    };

    let mut result = String::with_capacity(pattern.len());
    for piece in pieces {
        match piece {
            Piece::Literal(text) => result.push_str(text),
            Piece::Argument(index) => match args.get(index) {
                Some(arg) => result.push_str(arg),
                None => {
                    result.push('{');
                    result.push_str(&index.to_string());
                    result.push('}');
                }
            },
        }
    }
    // Anything the parser could not consume is kept verbatim.
    result.push_str(input);
    result
}

fn piece<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((escape_sequence, argument, literal_run, stray_brace)).parse_next(input)
}

/// Parse escape sequences: {{ -> {, }} -> }
fn escape_sequence<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((
        "{{".value(Piece::Literal("{")),
        "}}".value(Piece::Literal("}")),
    ))
    .parse_next(input)
}

/// Parse a positional placeholder: {digits}
fn argument<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    delimited('{', digit1.try_map(str::parse::<usize>), '}')
        .map(Piece::Argument)
        .parse_next(input)
}

/// Parse a run of text containing no braces.
fn literal_run<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    take_till(1.., ['{', '}'])
        .map(Piece::Literal)
        .parse_next(input)
}

/// A brace that does not start an escape or a placeholder is literal text.
fn stray_brace<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    take(1usize).map(Piece::Literal).parse_next(input)
}
