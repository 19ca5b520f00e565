//! Error type for the optbind CLI.

use std::io;

use thiserror::Error;

use optbind::{ConfigurationError, DEFAULT_EXIT_CODE, Diagnostic, ParseError};

use crate::config::SchemaError;

/// Everything that can make the CLI exit without printing assignments.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid option schema: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("{} invalid argument(s)", .0.len())]
    InvalidArguments(Vec<Diagnostic>),

    /// A built-in option such as `--help` already produced the output.
    #[error("processing stopped with exit code {0}")]
    Abandoned(i32),
}

impl CliError {
    /// The status the process should exit with.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Abandoned(code) => *code,
            _ => DEFAULT_EXIT_CODE,
        }
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Configuration(err) => CliError::Configuration(err),
            ParseError::Abandoned(abandon) => CliError::Abandoned(abandon.exit_code()),
        }
    }
}
