//! Implementation of the `exprenv vars` command.

use std::path::PathBuf;

use clap::Args;
use exprenv::helpers::{Calendars, Dates, Numbers, Strings};
use exprenv::{
    Configuration, Context, EvaluationRequest, Handle, Helper, Invocation, ProcessingContext,
    Value, Variable, parse_locale,
};
use miette::{IntoDiagnostic, Report, Result, miette};
use serde::Serialize;
use tracing::debug;

use crate::output::UnknownVariableDiagnostic;
use crate::output::table::{VariableRow, format_variables_table};

/// Arguments for the vars command.
#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Locale tag for the context (e.g., en, en-US, de)
    #[arg(long, env = "EXPRENV_LOCALE")]
    pub locale: Option<String>,

    /// Build the variables of a full template invocation
    #[arg(long)]
    pub invocation: bool,

    /// Configuration file (JSON) for the invocation
    #[arg(long, requires = "invocation")]
    pub config: Option<PathBuf>,

    /// Evaluation root as JSON. Defaults to the context variables.
    #[arg(long, value_parser = parse_json_value)]
    pub root: Option<Value>,

    /// Selection target as JSON
    #[arg(long, value_parser = parse_json_value)]
    pub object: Option<Value>,

    /// Context variables in name=value format (repeatable)
    #[arg(long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, Value)>,

    /// Create a web context with a request object
    #[arg(long)]
    pub web: bool,

    /// Attach a session to the web context
    #[arg(long, requires = "web")]
    pub session: bool,

    /// Show a single variable, suggesting close names if it is missing
    #[arg(long)]
    pub lookup: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Placeholder for host objects a web container would supply.
#[derive(Debug)]
struct HostObject(&'static str);

/// JSON output for one variable.
#[derive(Debug, Serialize)]
struct VariableJson {
    name: String,
    kind: &'static str,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

fn parse_json_value(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON '{s}': {e}"))
}

/// Parse a name=value variable. Integers become numbers, anything else a string.
fn parse_key_val(s: &str) -> Result<(String, Value), String> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable format '{s}': expected name=value"))?;
    let value = match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    };
    Ok((name.to_string(), value))
}

fn build_request(args: &VarsArgs) -> Result<EvaluationRequest> {
    let locale = args
        .locale
        .as_deref()
        .map(parse_locale)
        .transpose()
        .map_err(|e| miette!("{e}"))?;

    let mut context = if args.web {
        let session = args.session.then(|| Handle::new(HostObject("session")));
        Context::web(locale, Handle::new(HostObject("request")), session)
    } else {
        Context::new(locale)
    };
    for (name, value) in &args.vars {
        context.set_variable(name.clone(), value.clone());
    }

    let processing = ProcessingContext::builder()
        .context(context)
        .maybe_root(args.root.clone())
        .maybe_selection_target(args.object.clone())
        .build();

    if !args.invocation {
        return Ok(processing.into());
    }

    let configuration = match &args.config {
        Some(path) => Configuration::from_path(path).map_err(|e| miette!("{e}"))?,
        None => Configuration::new(),
    };
    Ok(Invocation::new(processing, configuration).into())
}

fn summarize(variable: &Variable) -> String {
    match variable {
        Variable::Value(Value::Null) => "null".to_string(),
        Variable::Value(value) => value.to_string(),
        Variable::Locale(locale) => locale.to_string(),
        Variable::Context(context) => {
            let flavor = if context.is_web() { "web" } else { "standard" };
            format!("{flavor} context, {} variable(s)", context.variables().len())
        }
        Variable::Handle(handle) => match handle.downcast_ref::<HostObject>() {
            Some(HostObject(what)) => format!("placeholder {what}"),
            None => "host object".to_string(),
        },
        Variable::Helper(helper) => summarize_helper(helper),
        Variable::Messages(messages) => match messages.locale() {
            Some(locale) => format!("messages for {locale}"),
            None => "messages, no locale".to_string(),
        },
        Variable::Ids(_) => "id sequences".to_string(),
    }
}

fn summarize_helper(helper: &Helper) -> String {
    let locale = helper
        .as_strings()
        .map(Strings::locale)
        .or_else(|| helper.as_numbers().map(Numbers::locale))
        .or_else(|| helper.as_dates().map(Dates::locale))
        .or_else(|| helper.as_calendars().map(Calendars::locale));
    match locale {
        Some(locale) => format!("#{} ({locale})", helper.name()),
        None => format!("#{}", helper.name()),
    }
}

/// Run the vars command.
pub fn run_vars(args: VarsArgs) -> Result<i32> {
    let request = build_request(&args)?;
    let variables = request.variables();
    debug!(
        kind = request.kind_name(),
        count = variables.len(),
        "computed evaluation variables"
    );

    let names: Vec<&str> = match &args.lookup {
        Some(name) if variables.contains_key(name) => vec![name.as_str()],
        Some(name) => {
            let diagnostic = UnknownVariableDiagnostic::new(name, &variables.suggestions(name));
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
        None => variables.names(),
    };

    if args.json {
        let rows: Vec<VariableJson> = names
            .iter()
            .map(|name| {
                let variable = &variables[*name];
                VariableJson {
                    name: (*name).to_string(),
                    kind: variable.kind_name(),
                    summary: summarize(variable),
                    value: variable.as_value().cloned(),
                }
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
        println!("{json}");
    } else {
        let rows: Vec<VariableRow> = names
            .iter()
            .map(|name| {
                let variable = &variables[*name];
                VariableRow {
                    name: (*name).to_string(),
                    kind: variable.kind_name(),
                    summary: summarize(variable),
                }
            })
            .collect();
        println!("{}", format_variables_table(&rows));
    }

    Ok(exitcode::OK)
}
