//! The core diagnostic type for recoverable argument problems.
//!
//! A [`Diagnostic`] represents a single error or warning raised while
//! processing a command line. Diagnostics never stop processing; they are
//! handed to the configured error reporter and collected for inspection.

use std::fmt;

use crate::error::{ErrorCode, Severity};

/// A recoverable problem found while processing arguments.
///
/// # Example
///
/// ```text
/// error[E100]: cannot convert 'ten' for option --count to i32
///    = help: expected a value of type i32
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: ErrorCode,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use optbind_core::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error(ErrorCode::E100, "cannot convert 'ten' to i32")
    ///     .with_help("expected a value of type i32");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message"
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}
