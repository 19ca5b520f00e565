//! Severity levels for diagnostics.
//!
//! Distinguishes problems that cost the user a value from advisory
//! notices about values the parser chose to ignore.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Neither severity stops argument processing; fatal conditions are
/// reported through [`ConfigurationError`](crate::error::ConfigurationError)
/// or an abandoned parse instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A value supplied on the command line could not be used.
    Error,

    /// A value was accepted but something about it was ignored.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
