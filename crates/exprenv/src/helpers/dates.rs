//! Date helpers for `#dates` and `#calendars`.
//!
//! `#dates` works with local date-times (`NaiveDateTime`), `#calendars` with
//! offset-aware date-times (`DateTime<FixedOffset>`). Both format with a
//! locale-dependent default pattern, or with an explicit strftime pattern.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use icu_locale_core::Locale;

use crate::conversion::ConversionServiceKey;
use crate::helpers::HelperError;
use crate::types::Value;

/// Languages that write dates year-first.
const YEAR_FIRST: &[&str] = &["zh", "ja", "ko", "hu", "lt", "sv"];

/// Languages that write dates with dots.
const DOTTED: &[&str] = &["de", "ru", "pl", "uk", "fi", "cs", "sk", "nb", "tr", "ro"];

/// Default `strftime` pattern for a locale.
fn default_pattern(locale: &Locale) -> &'static str {
    let language = locale.id.language.as_str();
    let region = locale.id.region.map(|r| r.as_str().to_string());
    if language == "en" && matches!(region.as_deref(), None | Some("US")) {
        "%m/%d/%Y %H:%M"
    } else if YEAR_FIRST.contains(&language) {
        "%Y-%m-%d %H:%M"
    } else if DOTTED.contains(&language) {
        "%d.%m.%Y %H:%M"
    } else {
        "%d/%m/%Y %H:%M"
    }
}

/// Parse a pattern, rejecting unknown specifiers up front.
fn parse_pattern(pattern: &str) -> Result<Vec<Item<'_>>, HelperError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(HelperError::InvalidPattern {
            pattern: pattern.to_string(),
        });
    }
    Ok(items)
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, HelperError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| HelperError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

/// Day of week numbered from Sunday = 1 to Saturday = 7.
fn day_of_week(date: &impl Datelike) -> u32 {
    date.weekday().number_from_sunday()
}

/// Date utilities for `#dates`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dates {
    conversion: ConversionServiceKey,
    locale: Locale,
}

impl Dates {
    pub fn new(conversion: ConversionServiceKey, locale: Locale) -> Self {
        Self { conversion, locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn conversion(&self) -> &ConversionServiceKey {
        &self.conversion
    }

    /// Midnight at the start of the given day.
    pub fn create(&self, year: i32, month: u32, day: u32) -> Result<NaiveDateTime, HelperError> {
        self.create_time(year, month, day, 0, 0, 0)
    }

    pub fn create_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<NaiveDateTime, HelperError> {
        date(year, month, day)?
            .and_hms_opt(hour, minute, second)
            .ok_or_else(|| HelperError::InvalidDate(format!("{hour:02}:{minute:02}:{second:02}")))
    }

    /// Format with the locale's default pattern.
    pub fn format(&self, value: &NaiveDateTime) -> String {
        value.format(default_pattern(&self.locale)).to_string()
    }

    pub fn format_with(&self, value: &NaiveDateTime, pattern: &str) -> Result<String, HelperError> {
        let items = parse_pattern(pattern)?;
        Ok(value.format_with_items(items.iter()).to_string())
    }

    /// ISO-8601 rendering, independent of locale.
    pub fn format_iso(&self, value: &NaiveDateTime) -> String {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    pub fn year(&self, value: &NaiveDateTime) -> i32 {
        value.year()
    }

    pub fn month(&self, value: &NaiveDateTime) -> u32 {
        value.month()
    }

    pub fn day(&self, value: &NaiveDateTime) -> u32 {
        value.day()
    }

    pub fn hour(&self, value: &NaiveDateTime) -> u32 {
        value.hour()
    }

    pub fn minute(&self, value: &NaiveDateTime) -> u32 {
        value.minute()
    }

    pub fn second(&self, value: &NaiveDateTime) -> u32 {
        value.second()
    }

    /// Day of week, Sunday = 1.
    pub fn day_of_week(&self, value: &NaiveDateTime) -> u32 {
        day_of_week(value)
    }

    /// Render an arbitrary value through the configured conversion service.
    pub fn to_text(&self, value: &Value) -> String {
        self.conversion
            .service()
            .to_text(value, Some(&self.locale))
    }
}

/// Utilities for offset-aware date-times, for `#calendars`.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendars {
    conversion: ConversionServiceKey,
    locale: Locale,
}

impl Calendars {
    pub fn new(conversion: ConversionServiceKey, locale: Locale) -> Self {
        Self { conversion, locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn conversion(&self) -> &ConversionServiceKey {
        &self.conversion
    }

    /// Midnight UTC at the start of the given day.
    pub fn create(&self, year: i32, month: u32, day: u32) -> Result<DateTime<FixedOffset>, HelperError> {
        self.create_with_offset(year, month, day, 0)
    }

    /// Midnight at the start of the given day, `offset_seconds` east of UTC.
    pub fn create_with_offset(
        &self,
        year: i32,
        month: u32,
        day: u32,
        offset_seconds: i32,
    ) -> Result<DateTime<FixedOffset>, HelperError> {
        let offset = FixedOffset::east_opt(offset_seconds)
            .ok_or_else(|| HelperError::InvalidDate(format!("offset {offset_seconds}s")))?;
        let local = date(year, month, day)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| HelperError::InvalidDate("midnight".to_string()))?;
        offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| HelperError::InvalidDate(local.to_string()))
    }

    pub fn format(&self, value: &DateTime<FixedOffset>) -> String {
        value.format(default_pattern(&self.locale)).to_string()
    }

    pub fn format_with(
        &self,
        value: &DateTime<FixedOffset>,
        pattern: &str,
    ) -> Result<String, HelperError> {
        let items = parse_pattern(pattern)?;
        Ok(value.format_with_items(items.iter()).to_string())
    }

    /// RFC 3339 rendering, independent of locale.
    pub fn format_iso(&self, value: &DateTime<FixedOffset>) -> String {
        value.to_rfc3339()
    }

    pub fn year(&self, value: &DateTime<FixedOffset>) -> i32 {
        value.year()
    }

    pub fn month(&self, value: &DateTime<FixedOffset>) -> u32 {
        value.month()
    }

    pub fn day(&self, value: &DateTime<FixedOffset>) -> u32 {
        value.day()
    }

    /// Day of week, Sunday = 1.
    pub fn day_of_week(&self, value: &DateTime<FixedOffset>) -> u32 {
        day_of_week(value)
    }

    /// Offset from UTC in seconds.
    pub fn offset_seconds(&self, value: &DateTime<FixedOffset>) -> i32 {
        value.offset().local_minus_utc()
    }

    /// Render an arbitrary value through the configured conversion service.
    pub fn to_text(&self, value: &Value) -> String {
        self.conversion
            .service()
            .to_text(value, Some(&self.locale))
    }
}
