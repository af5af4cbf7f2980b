//! Integration tests for configuration loading, messages and ids.

use std::io::Write;
use std::sync::Arc;

use exprenv::config::format_message;
use exprenv::helpers::{IdCounts, Ids, Messages};
use exprenv::{
    ConfigError, Configuration, ContextError, ConversionServiceKey, ExecutionAttribute,
    MessageCatalog, Value, names, parse_locale,
};
use tempfile::NamedTempFile;

const CATALOG_JSON: &str = r#"{
    "messages": {
        "": { "greeting": "Hello {0}", "farewell": "Bye" },
        "en": { "title": "Welcome" },
        "en-GB": { "title": "Welcome, mate" },
        "ES": { "greeting": "Hola {0}" }
    }
}"#;

fn messages(configuration: Configuration, tag: Option<&str>) -> Messages {
    Messages::new(
        Arc::new(configuration),
        tag.map(|tag| parse_locale(tag).unwrap()),
        ConversionServiceKey::standard(),
    )
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn from_json_str_reads_messages() {
    let configuration = Configuration::from_json_str(CATALOG_JSON).unwrap();
    let catalog = configuration.messages();

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.locale_tags().collect::<Vec<_>>(), vec!["", "en", "en-GB", "es"]);
}

#[test]
fn from_json_str_accepts_empty_object() {
    let configuration = Configuration::from_json_str("{}").unwrap();
    assert!(configuration.messages().is_empty());
    assert!(configuration.conversion_service().is_none());
}

#[test]
fn from_path_reads_a_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();
    file.flush().unwrap();

    let configuration = Configuration::from_path(file.path()).unwrap();

    assert_eq!(configuration.messages().resolve("title", None), None);
    assert_eq!(
        configuration
            .messages()
            .resolve("title", Some(&parse_locale("en").unwrap())),
        Some("Welcome")
    );
}

#[test]
fn from_path_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let error = Configuration::from_path(&path).unwrap_err();

    let ConfigError::Io { path: reported, .. } = &error else {
        panic!("expected an I/O error, got {error:?}");
    };
    assert_eq!(reported, &path);
    assert!(error.to_string().contains("missing.json"));
}

#[test]
fn malformed_json_is_rejected() {
    let error = Configuration::from_json_str("{ messages: ").unwrap_err();
    assert!(matches!(error, ConfigError::Json(_)));
}

#[test]
fn invalid_catalog_tag_is_rejected() {
    let error = Configuration::from_json_str(r#"{ "messages": { "not a tag!": {} } }"#).unwrap_err();
    assert!(matches!(
        error,
        ConfigError::InvalidLocale(ContextError::InvalidLocale { ref tag, .. }) if tag == "not a tag!"
    ));
}

#[test]
fn json_attributes_are_plain_values() {
    let json = r#"{ "execution_attributes": { "StandardConversionService": "custom", "depth": 3 } }"#;
    let configuration = Configuration::from_json_str(json).unwrap();

    assert!(configuration.conversion_service().is_none());
    assert!(matches!(
        configuration.execution_attribute("depth"),
        Some(ExecutionAttribute::Value(Value::Number(3)))
    ));
}

#[test]
fn programmatic_conversion_service_is_found() {
    let service = ConversionServiceKey::standard();
    let mut configuration = Configuration::new();
    configuration.set_execution_attribute(names::STANDARD_CONVERSION_SERVICE_ATTRIBUTE, service.clone());

    assert_eq!(configuration.conversion_service(), Some(&service));
}

#[test]
fn parse_locale_rejects_garbage() {
    let error = parse_locale("12345678901").unwrap_err();
    assert!(error.to_string().starts_with("invalid locale '12345678901'"));
}

// =========================================================================
// Messages
// =========================================================================

#[test]
fn messages_fall_back_to_less_specific_locales() {
    let configuration = Configuration::from_json_str(CATALOG_JSON).unwrap();

    let british = messages(configuration.clone(), Some("en-GB"));
    assert_eq!(british.msg("title"), "Welcome, mate");
    assert_eq!(british.msg("farewell"), "Bye");

    let american = messages(configuration.clone(), Some("en-US"));
    assert_eq!(american.msg("title"), "Welcome");

    let spanish = messages(configuration, Some("es"));
    assert_eq!(spanish.msg_with("greeting", &[Value::from("Ana")]), "Hola Ana");
}

#[test]
fn absent_messages_render_key_and_locale() {
    let configuration = Configuration::from_json_str(CATALOG_JSON).unwrap();

    let american = messages(configuration.clone(), Some("en-US"));
    assert_eq!(american.msg("nope"), "??nope_en-US??");
    assert_eq!(american.msg_or_null("nope"), None);

    let unlocalized = messages(configuration, None);
    assert_eq!(unlocalized.msg("nope"), "??nope_??");
    assert_eq!(unlocalized.msg("farewell"), "Bye");
}

#[test]
fn message_arguments_use_the_conversion_service() {
    let configuration = Configuration::builder()
        .messages(MessageCatalog::new().with_message(None, "summary", "{0} items, {1} active: {2}"))
        .build();
    let messages = messages(configuration, Some("en"));

    let rendered = messages.msg_with(
        "summary",
        &[Value::from(3), Value::from(true), Value::from(vec!["a", "b"])],
    );
    assert_eq!(rendered, "3 items, true active: [a, b]");
}

#[test]
fn list_msg_resolves_each_key() {
    let configuration = Configuration::from_json_str(CATALOG_JSON).unwrap();
    let messages = messages(configuration, Some("en"));

    assert_eq!(
        messages.list_msg(&["title", "farewell", "nope"]),
        vec!["Welcome", "Bye", "??nope_en??"]
    );
}

#[test]
fn format_message_handles_escapes_and_missing_arguments() {
    let args = ["x".to_string()];
    assert_eq!(format_message("{0}{0}", &args), "xx");
    assert_eq!(format_message("{{0}} = {0}", &args), "{0} = x");
    assert_eq!(format_message("{1} stays", &args), "{1} stays");
    assert_eq!(format_message("open { brace", &args), "open { brace");
    assert_eq!(format_message("", &args), "");
}

// =========================================================================
// Ids
// =========================================================================

#[test]
fn ids_count_from_one() {
    let ids = Ids::new(Arc::new(IdCounts::new()));

    assert_eq!(ids.prev("field"), "field0");
    assert_eq!(ids.next("field"), "field1");
    assert_eq!(ids.seq("field"), "field1");
    assert_eq!(ids.seq("field"), "field2");
    assert_eq!(ids.prev("field"), "field2");
    assert_eq!(ids.next("field"), "field3");
    assert_eq!(ids.seq("other"), "other1");
}

#[test]
fn ids_share_counters() {
    let counts = Arc::new(IdCounts::new());
    let a = Ids::new(Arc::clone(&counts));
    let b = Ids::new(Arc::clone(&counts));

    assert_eq!(a.seq("x"), "x1");
    assert_eq!(b.seq("x"), "x2");
    assert_eq!(counts.get("x"), 3);
    assert_eq!(a, b);
    assert_ne!(a, Ids::new(Arc::new(IdCounts::new())));
}
