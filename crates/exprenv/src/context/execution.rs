use std::collections::BTreeMap;

use bon::Builder;
use icu_locale_core::Locale;

use crate::types::{Handle, Value};

/// The flavor of a context, resolved once when the context is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ContextKind {
    /// A context with no web objects attached.
    #[default]
    Standard,

    /// A context created for a web request.
    ///
    /// The request and session are opaque to this crate and are exposed to
    /// expressions as-is.
    Web {
        request: Handle,
        session: Option<Handle>,
    },
}

/// The context of one template execution.
///
/// # Example
///
/// ```
/// use exprenv::{Context, parse_locale, vars};
///
/// let context = Context::builder()
///     .locale(parse_locale("en").unwrap())
///     .variables(vars! { "user" => "Alice" })
///     .build();
///
/// assert_eq!(context.locale().map(ToString::to_string).as_deref(), Some("en"));
/// assert!(!context.is_web());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct Context {
    /// Locale used by locale-aware helpers; `None` disables them.
    locale: Option<Locale>,

    /// Variables set by the host for this execution.
    #[builder(default)]
    variables: BTreeMap<String, Value>,

    #[builder(default)]
    kind: ContextKind,
}

impl Context {
    /// Create a standard context with the given locale and no variables.
    pub fn new(locale: Option<Locale>) -> Self {
        Context::builder().maybe_locale(locale).build()
    }

    /// Create a web context exposing a request and optional session.
    pub fn web(locale: Option<Locale>, request: Handle, session: Option<Handle>) -> Self {
        Context::builder()
            .maybe_locale(locale)
            .kind(ContextKind::Web { request, session })
            .build()
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    pub fn variables(&self) -> &BTreeMap<String, Value> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Set a context variable, returning the previous value if any.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.variables.insert(name.into(), value.into())
    }

    pub fn kind(&self) -> &ContextKind {
        &self.kind
    }

    pub fn is_web(&self) -> bool {
        matches!(self.kind, ContextKind::Web { .. })
    }
}
