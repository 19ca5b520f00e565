//! optbind CLI library
//!
//! This module contains the core logic of the `optbind` shell helper. A
//! script describes its options in a TOML schema and hands its arguments to
//! the helper, which binds them and prints shell assignments to evaluate:
//!
//! ```sh
//! eval "$(optbind --schema deploy.toml -- "$@")"
//! ```

pub mod error_adapter;

mod args;
mod config;
mod error;
mod schema;

pub use args::Args;
pub use config::SchemaError;
pub use error::CliError;
pub use schema::{OptionSpec, Schema, SchemaOptions, Value, ValueKind, shell_quote};

use log::{info, warn};

use optbind::{Diagnostic, Options, OptionsBase, sink::StderrSink};

use error_adapter::{DiagnosticAdapter, render};

/// Bind the arguments in `args` and return the shell assignments.
///
/// Help and usage text goes to standard error so standard output only ever
/// carries code meant for `eval`.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Schema loading errors
/// - Inconsistent option declarations in the schema
/// - Arguments that could not be bound
/// - A built-in option (`--help`, `--version`) that stopped processing
pub fn bind(args: &Args) -> Result<Vec<String>, CliError> {
    let schema = config::load_schema(args.schema.as_ref())?;

    let base = OptionsBase::new()
        .with_sink(StderrSink)
        .with_reporter(report_warning);
    let mut options = SchemaOptions::new(&schema, base);

    let remaining = options.bind(&args.args)?;
    info!(remaining = remaining.len(); "Arguments bound");

    let errors: Vec<Diagnostic> = options
        .base()
        .diagnostics()
        .iter()
        .filter(|diag| diag.severity().is_error())
        .cloned()
        .collect();
    if !errors.is_empty() {
        return Err(CliError::InvalidArguments(errors));
    }

    Ok(options.shell_assignments())
}

/// Run the optbind CLI application
///
/// Prints the assignments produced by [`bind`] to standard output. When
/// binding fails, prints an `exit` command instead so the evaluating script
/// stops with the same status.
///
/// # Errors
///
/// Returns the errors of [`bind`].
pub fn run(args: &Args) -> Result<(), CliError> {
    match bind(args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            println!("exit {}", err.exit_code());
            Err(err)
        }
    }
}

/// Warnings do not fail the run, so they are rendered as soon as they are
/// raised. Errors are collected and returned from [`bind`].
fn report_warning(diagnostic: &Diagnostic) {
    if diagnostic.severity().is_warning() {
        warn!("{}", render(&DiagnosticAdapter::new(diagnostic)));
    }
}
