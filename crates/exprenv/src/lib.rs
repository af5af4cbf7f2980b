pub mod cache;
pub mod config;
pub mod context;
pub mod conversion;
pub mod helpers;
pub mod objects;
pub mod token;
pub mod types;

pub use cache::{BaseObjectCache, CacheStats, base_objects};
pub use config::{ConfigError, Configuration, ExecutionAttribute, MessageCatalog};
pub use context::{
    Context, ContextError, ContextKind, EvaluationRequest, Invocation, ProcessingContext,
    parse_locale,
};
pub use conversion::{ConversionService, ConversionServiceKey, StandardConversionService};
pub use exprenv_semantics::names;
pub use helpers::{Helper, HelperBundle, HelperError};
pub use icu_locale_core::Locale;
pub use objects::{EvaluationVariables, Variable, compute_evaluation_objects};
pub use token::{TokenExpression, TokenObserver};
pub use types::{Handle, Value};

/// Creates a `BTreeMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, booleans, or strings directly.
///
/// # Example
///
/// ```
/// use exprenv::{vars, Value};
///
/// let v = vars! { "count" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["count"].as_number(), Some(3));
/// assert_eq!(v["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        ::std::collections::BTreeMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::BTreeMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
