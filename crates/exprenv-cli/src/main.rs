//! exprenv CLI entry point.
//!
//! Provides command-line tools for inspecting expression environments:
//! - `exprenv classify` - Check whether expressions are generic tokens
//! - `exprenv vars` - Show the variables an expression would be evaluated with

mod commands;
mod output;

use std::io::stderr;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{ClassifyArgs, VarsArgs, run_classify, run_vars};
use miette::MietteHandlerOpts;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Expression environment tools.
#[derive(Debug, Parser)]
#[command(name = "exprenv")]
#[command(about = "Expression evaluation environment tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    /// The forced color setting, or `None` to let the terminal decide
    /// (TTY detection, `NO_COLOR`, `FORCE_COLOR`).
    fn forced(self) -> Option<bool> {
        match self {
            ColorWhen::Auto => None,
            ColorWhen::Always => Some(true),
            ColorWhen::Never => Some(false),
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether expressions are generic tokens
    Classify(ClassifyArgs),
    /// Show the evaluation variables for a context
    Vars(VarsArgs),
}

impl Commands {
    /// Run the subcommand, returning its `exitcode` status.
    fn run(self) -> miette::Result<i32> {
        match self {
            Commands::Classify(args) => run_classify(args),
            Commands::Vars(args) => run_vars(args),
        }
    }
}

/// Apply the color choice to both plain output and miette reports.
///
/// Token diagnostics point into a single-line expression, so one line of
/// context is enough.
fn install_reporting(color: ColorWhen) -> miette::Result<()> {
    let forced = color.forced();
    if let Some(enabled) = forced {
        owo_colors::set_override(enabled);
    }
    miette::set_hook(Box::new(move |_| {
        let mut opts = MietteHandlerOpts::new()
            .terminal_links(true)
            .unicode(true)
            .context_lines(1);
        if let Some(enabled) = forced {
            opts = opts.color(enabled);
        }
        Box::new(opts.build())
    }))?;
    Ok(())
}

/// Install the log subscriber. Logs go to stderr so that stdout stays
/// machine-readable with `--json`.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "exprenv=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<ExitCode> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    install_reporting(cli.color)?;

    let code = cli.command.run().unwrap_or_else(|report| {
        error!("command failed");
        eprintln!("{report:?}");
        exitcode::SOFTWARE
    });
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
