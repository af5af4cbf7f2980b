//! Number formatting for `#numbers`.
//!
//! Separators come from a small per-language table; plural categories come
//! from CLDR via `icu_plurals`. Plural rules are cached per thread per locale
//! so repeated calls reuse the constructed `PluralRules`.

use std::cell::RefCell;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::helpers::HelperError;

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale.
    static PLURAL_RULES_CACHE: RefCell<Vec<(Locale, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Languages writing `1.234,5`.
const DOT_GROUPING_COMMA_DECIMAL: &[&str] = &[
    "de", "es", "it", "nl", "pt", "tr", "id", "el", "ro", "vi", "da",
];

/// Languages writing `1 234,5`.
const SPACE_GROUPING_COMMA_DECIMAL: &[&str] = &[
    "fr", "ru", "pl", "uk", "fi", "hu", "cs", "sk", "sv", "nb", "bg",
];

/// Number formatting utilities for `#numbers`.
#[derive(Debug, Clone, PartialEq)]
pub struct Numbers {
    locale: Locale,
}

impl Numbers {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn decimal_separator(&self) -> char {
        let language = self.locale.id.language.as_str();
        if DOT_GROUPING_COMMA_DECIMAL.contains(&language)
            || SPACE_GROUPING_COMMA_DECIMAL.contains(&language)
        {
            ','
        } else {
            '.'
        }
    }

    pub fn grouping_separator(&self) -> char {
        let language = self.locale.id.language.as_str();
        if DOT_GROUPING_COMMA_DECIMAL.contains(&language) {
            '.'
        } else if SPACE_GROUPING_COMMA_DECIMAL.contains(&language) {
            '\u{a0}'
        } else {
            ','
        }
    }

    /// Format an integer, zero-padded to at least `min_integer_digits`.
    pub fn format_integer(&self, n: i64, min_integer_digits: usize) -> String {
        let digits = pad(&n.unsigned_abs().to_string(), min_integer_digits);
        sign(n < 0, digits)
    }

    /// Like [`Numbers::format_integer`], with locale grouping separators.
    pub fn format_integer_grouped(&self, n: i64, min_integer_digits: usize) -> String {
        let digits = pad(&n.unsigned_abs().to_string(), min_integer_digits);
        sign(n < 0, group(&digits, self.grouping_separator()))
    }

    /// Format a decimal with a fixed number of fraction digits.
    pub fn format_decimal(&self, x: f64, min_integer_digits: usize, decimal_digits: usize) -> String {
        self.decimal(x, min_integer_digits, decimal_digits, false)
    }

    /// Like [`Numbers::format_decimal`], with locale grouping separators.
    pub fn format_decimal_grouped(
        &self,
        x: f64,
        min_integer_digits: usize,
        decimal_digits: usize,
    ) -> String {
        self.decimal(x, min_integer_digits, decimal_digits, true)
    }

    /// Format a ratio as a percentage, e.g. `0.256` as `25.6%`.
    pub fn format_percent(&self, x: f64, decimal_digits: usize) -> String {
        let mut result = self.decimal(x * 100.0, 1, decimal_digits, true);
        result.push('%');
        result
    }

    /// CLDR plural category of `n` in this locale.
    ///
    /// Returns one of: "zero", "one", "two", "few", "many", "other".
    pub fn plural_category(&self, n: i64) -> Result<&'static str, HelperError> {
        PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
            if let Some((_, rules)) = cache.iter().find(|(locale, _)| *locale == self.locale) {
                return Ok(category_str(rules.category_for(n)));
            }
            let rules = PluralRules::try_new(self.locale.clone().into(), PluralRuleType::Cardinal.into())
                .map_err(|e| HelperError::PluralRules {
                    locale: self.locale.to_string(),
                    message: e.to_string(),
                })?;
            let category = category_str(rules.category_for(n));
            cache.push((self.locale.clone(), rules));
            Ok(category)
        })
    }

    fn decimal(&self, x: f64, min_integer_digits: usize, decimal_digits: usize, grouped: bool) -> String {
        if !x.is_finite() {
            return x.to_string();
        }
        let rendered = format!("{:.*}", decimal_digits, x.abs());
        let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
        let integer = pad(integer, min_integer_digits);
        let mut result = if grouped {
            group(&integer, self.grouping_separator())
        } else {
            integer
        };
        if !fraction.is_empty() {
            result.push(self.decimal_separator());
            result.push_str(fraction);
        }
        let negative = x < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
        sign(negative, result)
    }
}

fn pad(digits: &str, min_digits: usize) -> String {
    format!("{digits:0>min_digits$}")
}

fn sign(negative: bool, digits: String) -> String {
    if negative { format!("-{digits}") } else { digits }
}

/// Insert `separator` between every group of three digits, from the right.
fn group(digits: &str, separator: char) -> String {
    let count = digits.chars().count();
    let mut result = String::with_capacity(digits.len() + count);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}
