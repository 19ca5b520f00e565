//! Fatal outcomes of argument processing.
//!
//! This module provides [`Abandon`], the signal a method option or argument
//! processor returns to stop the program, and [`ParseError`], which wraps
//! every condition that ends a parse early.

use thiserror::Error;

use optbind_core::error::ConfigurationError;

/// Exit status used when processing is abandoned without an explicit code.
pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Request to stop processing and exit the program.
///
/// Returned by method options (including the built-in help and about
/// options) and by argument processors. The parse stops immediately and the
/// caller is expected to exit with [`Abandon::exit_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("argument processing abandoned (exit code {exit_code})")]
pub struct Abandon {
    exit_code: i32,
}

impl Abandon {
    /// Create an abandon signal with a specific exit code.
    pub fn new(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// The exit status the program should terminate with.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

impl Default for Abandon {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_CODE)
    }
}

/// The main error type for a parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid option declarations: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Abandoned(#[from] Abandon),
}

impl ParseError {
    /// The exit status the program should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseError::Configuration(_) => DEFAULT_EXIT_CODE,
            ParseError::Abandoned(abandon) => abandon.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_abandon_is_nonzero() {
        assert_ne!(Abandon::default().exit_code(), 0);
    }

    #[test]
    fn test_parse_error_exit_code() {
        let err = ParseError::from(Abandon::new(3));
        assert_eq!(err.exit_code(), 3);

        let err = ParseError::from(ConfigurationError::DuplicateMember {
            member: "verbose".to_string(),
        });
        assert_eq!(err.exit_code(), DEFAULT_EXIT_CODE);
        assert_eq!(
            err.to_string(),
            "invalid option declarations: member `verbose` is declared as an option more than once"
        );
    }
}
