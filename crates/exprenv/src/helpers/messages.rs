use std::sync::Arc;

use icu_locale_core::Locale;

use crate::config::{Configuration, absent_message, format_message};
use crate::conversion::ConversionServiceKey;
use crate::types::Value;

/// Message resolution for `#messages`, scoped to one template invocation.
///
/// Messages are looked up in the invocation's configuration for the
/// context locale, and arguments are rendered with the invocation's
/// conversion service.
#[derive(Debug, Clone)]
pub struct Messages {
    configuration: Arc<Configuration>,
    locale: Option<Locale>,
    conversion: ConversionServiceKey,
}

impl Messages {
    pub fn new(
        configuration: Arc<Configuration>,
        locale: Option<Locale>,
        conversion: ConversionServiceKey,
    ) -> Self {
        Self {
            configuration,
            locale,
            conversion,
        }
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Resolve a message, or `??key_locale??` if it does not exist.
    pub fn msg(&self, key: &str) -> String {
        self.msg_with(key, &[])
    }

    /// Resolve a message with positional arguments.
    pub fn msg_with(&self, key: &str, args: &[Value]) -> String {
        self.msg_or_null_with(key, args)
            .unwrap_or_else(|| absent_message(key, self.locale.as_ref()))
    }

    /// Resolve a message, or `None` if it does not exist.
    pub fn msg_or_null(&self, key: &str) -> Option<String> {
        self.msg_or_null_with(key, &[])
    }

    pub fn msg_or_null_with(&self, key: &str, args: &[Value]) -> Option<String> {
        let pattern = self
            .configuration
            .messages()
            .resolve(key, self.locale.as_ref())?;
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| self.conversion.service().to_text(arg, self.locale.as_ref()))
            .collect();
        Some(format_message(pattern, &rendered))
    }

    /// Resolve several messages at once.
    pub fn list_msg(&self, keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| self.msg(key)).collect()
    }
}

impl PartialEq for Messages {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.configuration, &other.configuration)
            && self.locale == other.locale
            && self.conversion == other.conversion
    }
}
