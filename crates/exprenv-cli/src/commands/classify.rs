//! Implementation of the `exprenv classify` command.

use clap::Args;
use exprenv::{TokenExpression, Value};
use exprenv_semantics::find_invalid_token_char;
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

use crate::output::TokenDiagnostic;

/// Arguments for the classify command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Expressions to classify
    #[arg(required = true)]
    pub expressions: Vec<String>,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one classified expression.
#[derive(Debug, Serialize)]
struct Classification {
    expression: String,
    token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    /// Byte offset of the first disqualifying character.
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<usize>,
}

fn classify(expression: &str) -> Classification {
    match TokenExpression::parse(expression) {
        Some(token) => Classification {
            expression: expression.to_string(),
            token: true,
            value: Some(token.execute()),
            offset: None,
        },
        None => Classification {
            expression: expression.to_string(),
            token: false,
            value: None,
            offset: find_invalid_token_char(expression),
        },
    }
}

/// Run the classify command.
///
/// Exits with `DATAERR` if any expression is not a generic token.
pub fn run_classify(args: ClassifyArgs) -> Result<i32> {
    let results: Vec<Classification> = args
        .expressions
        .iter()
        .map(String::as_str)
        .map(classify)
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{json}");
    } else {
        for result in &results {
            match result.offset {
                None => println!(
                    "{} {}",
                    "token".if_supports_color(Stream::Stdout, |text| text.style(Style::new().green())),
                    result.expression
                ),
                Some(offset) => {
                    let diagnostic = TokenDiagnostic::new(&result.expression, offset);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
        }
    }

    if results.iter().all(|result| result.token) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
