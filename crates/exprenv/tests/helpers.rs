//! Integration tests for the helper objects.

use std::collections::BTreeMap;

use exprenv::helpers::{
    Aggregates, Arrays, Bools, Calendars, Dates, Lists, Maps, Numbers, Objects, Sets, Strings,
};
use exprenv::{
    ConversionService, ConversionServiceKey, HelperError, Locale, Value, parse_locale, vars,
};

fn locale(tag: &str) -> Locale {
    parse_locale(tag).unwrap()
}

// =========================================================================
// Strings
// =========================================================================

#[test]
fn strings_case_mapping_follows_locale() {
    let english = Strings::new(locale("en"));
    let turkish = Strings::new(locale("tr"));

    assert_eq!(english.to_upper_case("istanbul"), "ISTANBUL");
    assert_eq!(turkish.to_upper_case("istanbul"), "İSTANBUL");
    assert_eq!(turkish.to_lower_case("I"), "ı");
    assert_eq!(english.to_lower_case("HELLO"), "hello");
}

#[test]
fn strings_capitalize_first_grapheme() {
    let strings = Strings::new(locale("en"));
    assert_eq!(strings.capitalize("élan"), "Élan");
    assert_eq!(strings.capitalize("hello world"), "Hello world");
    assert_eq!(strings.capitalize(""), "");
}

#[test]
fn strings_length_counts_graphemes() {
    let strings = Strings::new(locale("en"));
    assert_eq!(strings.length("abc"), 3);
    assert_eq!(strings.length("e\u{301}"), 1);
    assert_eq!(strings.length(""), 0);
}

#[test]
fn strings_abbreviate() {
    let strings = Strings::new(locale("en"));
    assert_eq!(strings.abbreviate("Hello world", 8).unwrap(), "Hello...");
    assert_eq!(strings.abbreviate("Short", 10).unwrap(), "Short");
    assert_eq!(
        strings.abbreviate("Hello", 2),
        Err(HelperError::AbbreviateTooShort(2))
    );
}

#[test]
fn strings_predicates() {
    let strings = Strings::new(locale("en"));
    assert!(strings.is_empty("   "));
    assert!(!strings.is_empty(" x "));
    assert!(strings.contains("template", "pla"));
    assert!(strings.contains_ignore_case("TEMPLATE", "pla"));
    assert!(strings.starts_with("template", "tem"));
    assert!(strings.ends_with("template", "ate"));
    assert_eq!(strings.default_string(Some("  "), "fallback"), "fallback");
    assert_eq!(strings.default_string(None, "fallback"), "fallback");
    assert_eq!(strings.default_string(Some("value"), "fallback"), "value");
}

// =========================================================================
// Numbers
// =========================================================================

#[test]
fn numbers_group_by_locale() {
    assert_eq!(Numbers::new(locale("en")).format_integer_grouped(1234567, 1), "1,234,567");
    assert_eq!(Numbers::new(locale("de")).format_integer_grouped(1234567, 1), "1.234.567");
    assert_eq!(
        Numbers::new(locale("fr")).format_integer_grouped(1234567, 1),
        "1\u{a0}234\u{a0}567"
    );
}

#[test]
fn numbers_pad_integers() {
    let numbers = Numbers::new(locale("en"));
    assert_eq!(numbers.format_integer(7, 3), "007");
    assert_eq!(numbers.format_integer(-7, 3), "-007");
    assert_eq!(numbers.format_integer(1234, 2), "1234");
}

#[test]
fn numbers_format_decimals() {
    let english = Numbers::new(locale("en"));
    let german = Numbers::new(locale("de"));

    assert_eq!(english.format_decimal(1.23456, 1, 2), "1.23");
    assert_eq!(german.format_decimal(1.23456, 1, 2), "1,23");
    assert_eq!(english.format_decimal_grouped(1234.5, 1, 2), "1,234.50");
    assert_eq!(german.format_decimal_grouped(1234.5, 1, 2), "1.234,50");
    assert_eq!(english.format_decimal(-2.5, 2, 1), "-02.5");
}

#[test]
fn numbers_do_not_render_negative_zero() {
    let numbers = Numbers::new(locale("en"));
    assert_eq!(numbers.format_decimal(-0.001, 1, 2), "0.00");
}

#[test]
fn numbers_format_percent() {
    let numbers = Numbers::new(locale("en"));
    assert_eq!(numbers.format_percent(0.256, 1), "25.6%");
    assert_eq!(numbers.format_percent(1.0, 0), "100%");
}

#[test]
fn numbers_plural_categories() {
    let english = Numbers::new(locale("en"));
    assert_eq!(english.plural_category(1), Ok("one"));
    assert_eq!(english.plural_category(2), Ok("other"));

    let russian = Numbers::new(locale("ru"));
    assert_eq!(russian.plural_category(1), Ok("one"));
    assert_eq!(russian.plural_category(3), Ok("few"));
    assert_eq!(russian.plural_category(5), Ok("many"));
    assert_eq!(russian.plural_category(21), Ok("one"));
}

// =========================================================================
// Dates and Calendars
// =========================================================================

fn dates(tag: &str) -> Dates {
    Dates::new(ConversionServiceKey::standard(), locale(tag))
}

#[test]
fn dates_default_format_follows_locale() {
    let value = dates("en").create_time(2024, 3, 9, 14, 5, 0).unwrap();

    assert_eq!(dates("en").format(&value), "03/09/2024 14:05");
    assert_eq!(dates("en-GB").format(&value), "09/03/2024 14:05");
    assert_eq!(dates("de").format(&value), "09.03.2024 14:05");
    assert_eq!(dates("ja").format(&value), "2024-03-09 14:05");
}

#[test]
fn dates_explicit_patterns() {
    let helper = dates("en");
    let value = helper.create(2024, 12, 25).unwrap();

    assert_eq!(helper.format_with(&value, "%Y/%m/%d").unwrap(), "2024/12/25");
    assert_eq!(helper.format_iso(&value), "2024-12-25T00:00:00");
    assert_eq!(
        helper.format_with(&value, "%Q"),
        Err(HelperError::InvalidPattern {
            pattern: "%Q".to_string()
        })
    );
}

#[test]
fn dates_fields() {
    let helper = dates("en");
    let value = helper.create_time(2024, 2, 29, 23, 59, 58).unwrap();

    assert_eq!(helper.year(&value), 2024);
    assert_eq!(helper.month(&value), 2);
    assert_eq!(helper.day(&value), 29);
    assert_eq!(helper.hour(&value), 23);
    assert_eq!(helper.minute(&value), 59);
    assert_eq!(helper.second(&value), 58);
    // 2024-02-29 was a Thursday.
    assert_eq!(helper.day_of_week(&value), 5);
}

#[test]
fn dates_reject_invalid_components() {
    let helper = dates("en");
    assert!(matches!(helper.create(2023, 2, 29), Err(HelperError::InvalidDate(_))));
    assert!(matches!(
        helper.create_time(2024, 1, 1, 24, 0, 0),
        Err(HelperError::InvalidDate(_))
    ));
}

#[test]
fn calendars_keep_offsets() {
    let calendars = Calendars::new(ConversionServiceKey::standard(), locale("en"));
    let value = calendars.create_with_offset(2024, 6, 1, 2 * 3600).unwrap();

    assert_eq!(calendars.offset_seconds(&value), 7200);
    assert_eq!(calendars.format_iso(&value), "2024-06-01T00:00:00+02:00");
    assert_eq!(calendars.format(&value), "06/01/2024 00:00");
    // 2024-06-01 was a Saturday.
    assert_eq!(calendars.day_of_week(&value), 7);
}

#[test]
fn calendars_default_to_utc() {
    let calendars = Calendars::new(ConversionServiceKey::standard(), locale("fr"));
    let value = calendars.create(2024, 1, 15).unwrap();

    assert_eq!(calendars.offset_seconds(&value), 0);
    assert_eq!(calendars.format(&value), "15/01/2024 00:00");
    assert_eq!(calendars.year(&value), 2024);
    assert_eq!(calendars.month(&value), 1);
    assert_eq!(calendars.day(&value), 15);
}

// =========================================================================
// Bools and Conversion
// =========================================================================

#[derive(Debug)]
struct YesNoConversion;

impl ConversionService for YesNoConversion {
    fn to_text(&self, value: &Value, _locale: Option<&Locale>) -> String {
        let text = if self.to_bool(value) { "yes" } else { "no" };
        text.to_string()
    }

    fn to_bool(&self, value: &Value) -> bool {
        value.as_string() == Some("yes")
    }
}

#[test]
fn bools_use_standard_truthiness() {
    let bools = Bools::new(ConversionServiceKey::standard());

    assert!(bools.is_true(&Value::from(1)));
    assert!(bools.is_true(&Value::from("anything")));
    assert!(bools.is_true(&Value::from(Vec::<Value>::new())));
    assert!(bools.is_false(&Value::Null));
    assert!(bools.is_false(&Value::from(0)));
    assert!(bools.is_false(&Value::from(0.0)));
    assert!(bools.is_false(&Value::from("OFF")));
    assert!(bools.is_false(&Value::from("no")));
    assert!(bools.not(&Value::from(false)));
}

#[test]
fn bools_combinators() {
    let bools = Bools::new(ConversionServiceKey::standard());
    let values = [Value::from(true), Value::from(0), Value::from("yes")];

    assert_eq!(bools.array_is_true(&values), vec![true, false, true]);
    assert!(!bools.and(&values));
    assert!(bools.or(&values));
    assert!(bools.and(&[]));
    assert!(!bools.or(&[]));
}

#[test]
fn bools_follow_a_custom_conversion_service() {
    let bools = Bools::new(ConversionServiceKey::new(YesNoConversion));

    assert!(bools.is_true(&Value::from("yes")));
    assert!(bools.is_false(&Value::from(1)));
}

#[test]
fn dates_render_values_through_their_conversion_service() {
    let custom = Dates::new(ConversionServiceKey::new(YesNoConversion), locale("en"));
    assert_eq!(custom.to_text(&Value::from("yes")), "yes");
    assert_eq!(custom.to_text(&Value::from(42)), "no");
    assert_eq!(dates("en").to_text(&Value::from(42)), "42");
}

// =========================================================================
// Collections
// =========================================================================

#[test]
fn objects_null_safe() {
    let fallback = Value::from("fallback");
    assert_eq!(Objects.null_safe(&Value::Null, &fallback), fallback);
    assert_eq!(Objects.null_safe(&Value::from(1), &fallback), Value::from(1));
}

#[test]
fn arrays_and_lists() {
    let items = [Value::from(3), Value::from(1), Value::from(2)];

    assert_eq!(Arrays.length(&items), 3);
    assert!(Arrays.contains(&items, &Value::from(2)));
    assert!(Arrays.contains_all(&items, &[Value::from(1), Value::from(3)]));
    assert!(!Arrays.contains_all(&items, &[Value::from(4)]));
    assert!(Arrays.is_empty(&[]));

    assert_eq!(Lists.size(&items), 3);
    assert_eq!(
        Lists.sort(&items).unwrap(),
        vec![Value::from(1), Value::from(2), Value::from(3)]
    );
}

#[test]
fn lists_sort_rejects_mixed_types() {
    let items = [Value::from(1), Value::from("one")];
    assert!(matches!(Lists.sort(&items), Err(HelperError::Incomparable { .. })));
}

#[test]
fn sets_remove_duplicates_in_order() {
    let items = [Value::from("b"), Value::from("a"), Value::from("b")];

    assert_eq!(Sets.to_set(&items), vec![Value::from("b"), Value::from("a")]);
    assert_eq!(Sets.size(&items), 2);
    assert!(Sets.contains(&items, &Value::from("a")));
}

#[test]
fn maps_inspect_map_values() {
    let map = Value::from(vars! { "name" => "Alice", "age" => 30 });

    assert_eq!(Maps.size(&map), 2);
    assert!(Maps.contains_key(&map, "name"));
    assert!(Maps.contains_all_keys(&map, &["name", "age"]));
    assert!(Maps.contains_value(&map, &Value::from(30)));
    assert!(!Maps.contains_value(&map, &Value::from(31)));
    assert!(Maps.is_empty(&Value::from(BTreeMap::<String, Value>::new())));
    assert_eq!(Maps.size(&Value::from(1)), 0);
}

#[test]
fn aggregates_sum_and_average() {
    let integers = [Value::from(1), Value::from(2), Value::from(3)];
    let mixed = [Value::from(1), Value::from(0.5)];

    assert_eq!(Aggregates.sum(&integers), Ok(Value::from(6)));
    assert_eq!(Aggregates.sum(&mixed), Ok(Value::from(1.5)));
    assert_eq!(Aggregates.sum(&[]), Ok(Value::from(0)));
    assert_eq!(Aggregates.avg(&integers), Ok(2.0));
    assert_eq!(Aggregates.avg(&[]), Err(HelperError::EmptyAggregate));
    assert_eq!(
        Aggregates.sum(&[Value::from(1), Value::from("x")]),
        Err(HelperError::NotNumeric {
            index: 1,
            type_name: "string"
        })
    );
}

#[test]
fn aggregates_promote_overflowing_integer_sums_to_floats() {
    let two_pow_63 = 2.0_f64.powi(63);

    assert_eq!(
        Aggregates.sum(&[Value::Number(i64::MAX), Value::from(1)]),
        Ok(Value::Float(two_pow_63))
    );
    assert_eq!(
        Aggregates.sum(&[Value::Number(i64::MIN), Value::from(-1)]),
        Ok(Value::Float(-two_pow_63))
    );
    assert_eq!(
        Aggregates.avg(&[Value::Number(i64::MAX), Value::Number(i64::MAX)]),
        Ok(two_pow_63)
    );
    assert_eq!(
        Aggregates.sum(&[Value::Number(i64::MAX), Value::Number(i64::MIN)]),
        Ok(Value::from(-1))
    );
}
