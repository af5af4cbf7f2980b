//! Conversion services and their identity keys.
//!
//! A conversion service turns runtime values into text and booleans,
//! optionally honouring a locale. Helper objects that format values hold the
//! service they were built with, and the base object cache keys its bundles
//! on the service's identity.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::ptr;
use std::sync::{Arc, LazyLock};

use icu_locale_core::Locale;

use crate::types::Value;

/// A pluggable component performing locale-aware value conversion.
pub trait ConversionService: Send + Sync + Debug {
    /// Render a value as text.
    fn to_text(&self, value: &Value, locale: Option<&Locale>) -> String;

    /// Interpret a value as a boolean.
    fn to_bool(&self, value: &Value) -> bool;
}

/// The default conversion rules.
///
/// Text is the value's display form. Booleans follow template truthiness:
/// null is false, numbers are true unless zero, and strings are true unless
/// they read `false`, `off` or `no` (ignoring case).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConversionService;

impl ConversionService for StandardConversionService {
    fn to_text(&self, value: &Value, _locale: Option<&Locale>) -> String {
        value.to_string()
    }

    fn to_bool(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !["false", "off", "no"]
                .iter()
                .any(|falsy| s.eq_ignore_ascii_case(falsy)),
            Value::List(_) | Value::Map(_) => true,
        }
    }
}

static STANDARD: LazyLock<ConversionServiceKey> =
    LazyLock::new(|| ConversionServiceKey::new(StandardConversionService));

/// Identity of a shared conversion service instance.
///
/// Keys compare and hash by the address of the shared service, not by its
/// contents: two separately constructed services are distinct keys even if
/// they behave identically. Cloning a key preserves its identity.
#[derive(Clone)]
pub struct ConversionServiceKey(Arc<dyn ConversionService>);

impl ConversionServiceKey {
    /// Wrap a new service instance, giving it a fresh identity.
    pub fn new(service: impl ConversionService + 'static) -> Self {
        Self(Arc::new(service))
    }

    /// Use an already shared service instance as a key.
    pub fn from_arc(service: Arc<dyn ConversionService>) -> Self {
        Self(service)
    }

    /// The process-wide default service, used whenever none is specified.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Normalize an optional key, substituting the default service.
    pub fn resolve(key: Option<&ConversionServiceKey>) -> Self {
        key.cloned().unwrap_or_else(Self::standard)
    }

    /// Returns true if this key is the process-wide default service.
    pub fn is_standard(&self) -> bool {
        *self == *STANDARD
    }

    /// The service behind this key.
    pub fn service(&self) -> &dyn ConversionService {
        self.0.as_ref()
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for ConversionServiceKey {
    fn eq(&self, other: &Self) -> bool {
        ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for ConversionServiceKey {}

impl Hash for ConversionServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl Debug for ConversionServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ConversionServiceKey({:?} @ {:#x})", self.0, self.address())
    }
}
