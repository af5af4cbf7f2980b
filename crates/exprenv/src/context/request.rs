use std::sync::Arc;

use bon::Builder;

use crate::config::Configuration;
use crate::context::Context;
use crate::conversion::ConversionServiceKey;
use crate::helpers::IdCounts;
use crate::objects::{EvaluationVariables, compute_evaluation_objects};
use crate::types::Value;

/// The per-expression view of a context: what `#root` and `#object` are.
///
/// # Example
///
/// ```
/// use exprenv::{Context, ProcessingContext, Value};
///
/// let processing = ProcessingContext::builder()
///     .context(Context::new(None))
///     .root(Value::from(42))
///     .build();
///
/// assert_eq!(processing.evaluation_root(), Value::from(42));
/// assert_eq!(processing.selection_target(), None);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ProcessingContext {
    #[builder(into)]
    context: Arc<Context>,

    /// Explicit evaluation root. When unset, the root is the context's
    /// variables as a map.
    root: Option<Value>,

    /// Target of the innermost active selection, if any.
    selection_target: Option<Value>,
}

impl ProcessingContext {
    /// Create a processing context whose root is the context's variables.
    pub fn new(context: impl Into<Arc<Context>>) -> Self {
        ProcessingContext::builder().context(context).build()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The shared context, for callers that need to keep it alive.
    pub fn shared_context(&self) -> &Arc<Context> {
        &self.context
    }

    /// The object expressions are evaluated against.
    pub fn evaluation_root(&self) -> Value {
        match &self.root {
            Some(root) => root.clone(),
            None => Value::Map(self.context.variables().clone()),
        }
    }

    pub fn has_selection_target(&self) -> bool {
        self.selection_target.is_some()
    }

    pub fn selection_target(&self) -> Option<&Value> {
        self.selection_target.as_ref()
    }

    /// Return a copy of this context with a selection active on `target`.
    pub fn with_selection_target(&self, target: impl Into<Value>) -> Self {
        Self {
            selection_target: Some(target.into()),
            ..self.clone()
        }
    }
}

/// A full template invocation.
///
/// On top of a [`ProcessingContext`], an invocation knows the engine
/// configuration and owns the id counters of the template being processed.
/// Expressions evaluated for an invocation get the `#messages` and `#ids`
/// helpers.
#[derive(Debug, Clone)]
pub struct Invocation {
    processing: ProcessingContext,
    configuration: Arc<Configuration>,
    id_counts: Arc<IdCounts>,
}

impl Invocation {
    pub fn new(processing: ProcessingContext, configuration: impl Into<Arc<Configuration>>) -> Self {
        Self {
            processing,
            configuration: configuration.into(),
            id_counts: Arc::default(),
        }
    }

    pub fn processing(&self) -> &ProcessingContext {
        &self.processing
    }

    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    pub fn id_counts(&self) -> &Arc<IdCounts> {
        &self.id_counts
    }

    /// Return a copy of this invocation with a selection active on `target`.
    ///
    /// The copy shares this invocation's configuration and id counters.
    pub fn with_selection_target(&self, target: impl Into<Value>) -> Self {
        Self {
            processing: self.processing.with_selection_target(target),
            ..self.clone()
        }
    }
}

/// A request to build the variables for one expression evaluation.
#[derive(Debug, Clone)]
pub enum EvaluationRequest {
    /// Evaluation outside of a template invocation.
    Standard(ProcessingContext),

    /// Evaluation as part of a template invocation.
    Invocation(Invocation),
}

impl EvaluationRequest {
    pub fn processing(&self) -> &ProcessingContext {
        match self {
            EvaluationRequest::Standard(processing) => processing,
            EvaluationRequest::Invocation(invocation) => invocation.processing(),
        }
    }

    pub fn context(&self) -> &Context {
        self.processing().context()
    }

    pub fn invocation(&self) -> Option<&Invocation> {
        match self {
            EvaluationRequest::Standard(_) => None,
            EvaluationRequest::Invocation(invocation) => Some(invocation),
        }
    }

    /// The conversion service configured for this request, if any.
    ///
    /// Only invocations can carry one, as an execution attribute of their
    /// configuration.
    pub fn conversion_service(&self) -> Option<&ConversionServiceKey> {
        self.invocation()
            .and_then(|invocation| invocation.configuration().conversion_service())
    }

    /// Short name of the request flavor, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EvaluationRequest::Standard(_) => "standard",
            EvaluationRequest::Invocation(_) => "invocation",
        }
    }

    /// Build the evaluation variables for this request.
    pub fn variables(&self) -> EvaluationVariables {
        compute_evaluation_objects(self)
    }
}

impl From<ProcessingContext> for EvaluationRequest {
    fn from(processing: ProcessingContext) -> Self {
        EvaluationRequest::Standard(processing)
    }
}

impl From<Invocation> for EvaluationRequest {
    fn from(invocation: Invocation) -> Self {
        EvaluationRequest::Invocation(invocation)
    }
}
