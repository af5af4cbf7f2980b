use icu_casemap::CaseMapper;
use icu_locale_core::Locale;
use unicode_segmentation::UnicodeSegmentation;

use crate::helpers::HelperError;

/// String utilities for `#strings`.
///
/// Case mapping follows the locale (Turkish `i` uppercases to `İ`), and
/// lengths are measured in grapheme clusters so that combining marks and
/// emoji count as a single character.
#[derive(Debug, Clone, PartialEq)]
pub struct Strings {
    locale: Locale,
}

impl Strings {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn to_upper_case(&self, text: &str) -> String {
        CaseMapper::new()
            .uppercase_to_string(text, &self.locale.id)
            .to_string()
    }

    pub fn to_lower_case(&self, text: &str) -> String {
        CaseMapper::new()
            .lowercase_to_string(text, &self.locale.id)
            .to_string()
    }

    /// Uppercase the first grapheme, leaving the rest untouched.
    pub fn capitalize(&self, text: &str) -> String {
        let mut graphemes = text.graphemes(true);
        let Some(first) = graphemes.next() else {
            return String::new();
        };
        let mut result = self.to_upper_case(first);
        result.push_str(graphemes.as_str());
        result
    }

    /// Number of user-perceived characters.
    pub fn length(&self, text: &str) -> usize {
        text.graphemes(true).count()
    }

    /// Shorten `text` to at most `max_size` characters, ending with `...`.
    pub fn abbreviate(&self, text: &str, max_size: usize) -> Result<String, HelperError> {
        if max_size < 3 {
            return Err(HelperError::AbbreviateTooShort(max_size));
        }
        if self.length(text) <= max_size {
            return Ok(text.to_string());
        }
        let mut result: String = text.graphemes(true).take(max_size - 3).collect();
        result.push_str("...");
        Ok(result)
    }

    /// True for text that is empty or only whitespace.
    pub fn is_empty(&self, text: &str) -> bool {
        text.trim().is_empty()
    }

    pub fn contains(&self, text: &str, fragment: &str) -> bool {
        text.contains(fragment)
    }

    /// Locale-aware case-insensitive containment.
    pub fn contains_ignore_case(&self, text: &str, fragment: &str) -> bool {
        self.to_lower_case(text)
            .contains(&self.to_lower_case(fragment))
    }

    pub fn starts_with(&self, text: &str, prefix: &str) -> bool {
        text.starts_with(prefix)
    }

    pub fn ends_with(&self, text: &str, suffix: &str) -> bool {
        text.ends_with(suffix)
    }

    /// `text`, or `default` when `text` is missing or blank.
    pub fn default_string<'a>(&self, text: Option<&'a str>, default: &'a str) -> &'a str {
        match text {
            Some(text) if !self.is_empty(text) => text,
            _ => default,
        }
    }
}
