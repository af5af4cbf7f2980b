use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bon::Builder;
use exprenv_semantics::names;
use serde::Deserialize;

use crate::config::{ConfigError, MessageCatalog};
use crate::conversion::ConversionServiceKey;
use crate::types::Value;

/// A value stored in a configuration's execution attributes.
///
/// Attributes read from JSON are always plain values; a conversion service
/// can only be installed programmatically.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Value")]
pub enum ExecutionAttribute {
    ConversionService(ConversionServiceKey),
    Value(Value),
}

impl From<Value> for ExecutionAttribute {
    fn from(value: Value) -> Self {
        ExecutionAttribute::Value(value)
    }
}

impl From<ConversionServiceKey> for ExecutionAttribute {
    fn from(key: ConversionServiceKey) -> Self {
        ExecutionAttribute::ConversionService(key)
    }
}

/// Engine configuration shared by all invocations of a template engine.
///
/// # Example
///
/// ```
/// use exprenv::{Configuration, ConversionServiceKey, MessageCatalog, StandardConversionService};
///
/// let service = ConversionServiceKey::new(StandardConversionService);
/// let config = Configuration::builder()
///     .messages(MessageCatalog::new().with_message(None, "title", "Welcome"))
///     .build()
///     .with_conversion_service(service.clone());
///
/// assert_eq!(config.conversion_service(), Some(&service));
/// assert_eq!(config.messages().resolve("title", None), Some("Welcome"));
/// ```
#[derive(Debug, Clone, Default, Builder, Deserialize)]
pub struct Configuration {
    /// Named attributes made available to expression machinery.
    #[builder(default)]
    #[serde(default)]
    execution_attributes: HashMap<String, ExecutionAttribute>,

    /// Messages resolved by `#messages`.
    #[builder(default)]
    #[serde(default)]
    messages: MessageCatalog,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    ///
    /// Message catalog tags are validated and canonicalized.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Configuration = serde_json::from_str(json)?;
        config.messages = config.messages.normalized()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    pub fn execution_attribute(&self, name: &str) -> Option<&ExecutionAttribute> {
        self.execution_attributes.get(name)
    }

    pub fn set_execution_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: impl Into<ExecutionAttribute>,
    ) -> Option<ExecutionAttribute> {
        self.execution_attributes
            .insert(name.into(), attribute.into())
    }

    /// Install `service` as the standard conversion service attribute.
    pub fn with_conversion_service(mut self, service: ConversionServiceKey) -> Self {
        self.set_execution_attribute(names::STANDARD_CONVERSION_SERVICE_ATTRIBUTE, service);
        self
    }

    /// The configured conversion service, if the standard attribute holds one.
    ///
    /// An attribute of that name holding anything else is ignored.
    pub fn conversion_service(&self) -> Option<&ConversionServiceKey> {
        match self.execution_attribute(names::STANDARD_CONVERSION_SERVICE_ATTRIBUTE)? {
            ExecutionAttribute::ConversionService(key) => Some(key),
            ExecutionAttribute::Value(_) => None,
        }
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageCatalog {
        &mut self.messages
    }
}
