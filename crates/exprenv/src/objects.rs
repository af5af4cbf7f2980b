//! Assembly of the variables an expression is evaluated with.
//!
//! [`compute_evaluation_objects`] starts from a private copy of the cached
//! helper bundle and layers the request-scoped variables on top: the context,
//! its locale, web objects, the evaluation root and selection target, and,
//! for template invocations, the `#messages` and `#ids` helpers.

use std::collections::HashMap;
use std::collections::hash_map::Iter;
use std::ops::Index;
use std::sync::Arc;

use exprenv_semantics::names;
use icu_locale_core::Locale;
use strsim::levenshtein;
use tracing::trace;

use crate::cache::base_objects;
use crate::context::{Context, ContextKind, EvaluationRequest};
use crate::conversion::ConversionServiceKey;
use crate::helpers::{Helper, HelperBundle, Ids, Messages};
use crate::types::{Handle, Value};

/// A single evaluation variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    /// A plain value: the root, the selection target, or a null.
    Value(Value),
    Locale(Locale),
    Context(Arc<Context>),
    /// An opaque host object such as a web request or session.
    Handle(Handle),
    Helper(Helper),
    Messages(Messages),
    Ids(Ids),
}

impl Variable {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Variable::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_helper(&self) -> Option<&Helper> {
        match self {
            Variable::Helper(helper) => Some(helper),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Variable::Handle(handle) => Some(handle),
            _ => None,
        }
    }

    /// Short description of the variable's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Variable::Value(value) => value.type_name(),
            Variable::Locale(_) => "locale",
            Variable::Context(_) => "context",
            Variable::Handle(_) => "handle",
            Variable::Helper(_) => "helper",
            Variable::Messages(_) => "messages",
            Variable::Ids(_) => "ids",
        }
    }
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        Variable::Value(value)
    }
}

impl From<Helper> for Variable {
    fn from(helper: Helper) -> Self {
        Variable::Helper(helper)
    }
}

impl From<Handle> for Variable {
    fn from(handle: Handle) -> Self {
        Variable::Handle(handle)
    }
}

/// The variables of one expression evaluation.
///
/// Every call to [`compute_evaluation_objects`] returns a new, independently
/// owned map; mutating it never affects the helper cache or other requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationVariables {
    entries: HashMap<String, Variable>,
}

impl EvaluationVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the helpers of a bundle.
    pub fn from_bundle(bundle: HelperBundle) -> Self {
        Self {
            entries: bundle
                .into_iter()
                .map(|(name, helper)| (name.to_string(), Variable::Helper(helper)))
                .collect(),
        }
    }

    /// Set a variable, replacing and returning any previous value.
    pub fn insert(&mut self, name: impl Into<String>, variable: impl Into<Variable>) -> Option<Variable> {
        self.entries.insert(name.into(), variable.into())
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.entries.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Variable> {
        self.entries.iter()
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a plain value variable such as `root` or `object`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Variable::as_value)
    }

    /// Look up a helper variable such as `dates`.
    pub fn helper(&self, name: &str) -> Option<&Helper> {
        self.get(name).and_then(Variable::as_helper)
    }

    pub fn messages(&self) -> Option<&Messages> {
        match self.get(names::MESSAGES)? {
            Variable::Messages(messages) => Some(messages),
            _ => None,
        }
    }

    pub fn ids(&self) -> Option<&Ids> {
        match self.get(names::IDS)? {
            Variable::Ids(ids) => Some(ids),
            _ => None,
        }
    }

    /// Names close to `name`, for "unknown variable" diagnostics.
    ///
    /// Returns at most three names, closest first.
    pub fn suggestions(&self, name: &str) -> Vec<String> {
        let max_distance = if name.len() <= 3 { 1 } else { 2 };
        let mut suggestions: Vec<(usize, &str)> = self
            .entries
            .keys()
            .filter_map(|candidate| {
                let dist = levenshtein(name, candidate);
                if dist <= max_distance && dist > 0 {
                    Some((dist, candidate.as_str()))
                } else {
                    None
                }
            })
            .collect();

        suggestions.sort_unstable();
        suggestions
            .into_iter()
            .take(3)
            .map(|(_, s)| s.to_string())
            .collect()
    }

    pub fn into_map(self) -> HashMap<String, Variable> {
        self.entries
    }
}

impl Index<&str> for EvaluationVariables {
    type Output = Variable;

    /// # Panics
    ///
    /// Panics if the variable is not present.
    fn index(&self, name: &str) -> &Variable {
        match self.entries.get(name) {
            Some(variable) => variable,
            None => panic!("no evaluation variable named '{name}'"),
        }
    }
}

impl<'a> IntoIterator for &'a EvaluationVariables {
    type Item = (&'a String, &'a Variable);
    type IntoIter = Iter<'a, String, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the variables for one expression evaluation.
///
/// The map starts as a private copy of the cached helper bundle for the
/// request's conversion service and locale; request-scoped variables are
/// inserted afterwards and take precedence over bundle entries.
///
/// # Example
///
/// ```
/// use exprenv::{
///     Context, EvaluationRequest, ProcessingContext, Value, compute_evaluation_objects, names,
///     parse_locale,
/// };
///
/// let context = Context::new(Some(parse_locale("en").unwrap()));
/// let request: EvaluationRequest = ProcessingContext::builder()
///     .context(context)
///     .root(Value::from(42))
///     .build()
///     .into();
///
/// let variables = compute_evaluation_objects(&request);
/// assert_eq!(variables.value(names::ROOT), Some(&Value::from(42)));
/// assert_eq!(variables.value(names::SELECTION), Some(&Value::from(42)));
/// assert!(variables.contains_key(names::DATES));
/// assert!(!variables.contains_key(names::MESSAGES));
/// ```
pub fn compute_evaluation_objects(request: &EvaluationRequest) -> EvaluationVariables {
    let processing = request.processing();
    let context = processing.context();
    let conversion = request.conversion_service();

    trace!(
        kind = request.kind_name(),
        locale = ?context.locale(),
        "computing evaluation objects"
    );

    let mut variables = EvaluationVariables::from_bundle(base_objects(conversion, context.locale()));

    variables.insert(
        names::CONTEXT,
        Variable::Context(Arc::clone(processing.shared_context())),
    );
    variables.insert(names::LOCALE, locale_variable(context.locale()));

    if let ContextKind::Web {
        request: web_request,
        session,
    } = context.kind()
    {
        variables.insert(names::HTTP_SERVLET_REQUEST, web_request.clone());
        variables.insert(
            names::HTTP_SESSION,
            session
                .clone()
                .map_or(Variable::Value(Value::Null), Variable::Handle),
        );
    }

    // `root` and `vars` are synonyms.
    let root = processing.evaluation_root();
    variables.insert(names::ROOT, root.clone());
    variables.insert(names::VARIABLES, root.clone());

    let selection = processing.selection_target().cloned().unwrap_or(root);
    variables.insert(names::SELECTION, selection);

    if let EvaluationRequest::Invocation(invocation) = request {
        let messages = Messages::new(
            Arc::clone(invocation.configuration()),
            context.locale().cloned(),
            ConversionServiceKey::resolve(conversion),
        );
        variables.insert(names::MESSAGES, Variable::Messages(messages));
        variables.insert(
            names::IDS,
            Variable::Ids(Ids::new(Arc::clone(invocation.id_counts()))),
        );
    }

    variables
}

fn locale_variable(locale: Option<&Locale>) -> Variable {
    match locale {
        Some(locale) => Variable::Locale(locale.clone()),
        None => Variable::Value(Value::Null),
    }
}
