//! Error codes for recoverable argument-processing problems.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Argument normalization errors
//! - `E1xx` - Value binding errors
//! - `E2xx` - Occurrence limit errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Normalization Errors (E0xx)
    // =========================================================================
    /// Unreadable response file.
    ///
    /// An `@file` argument named a file that could not be opened or read.
    /// The argument expands to nothing.
    E001,

    // =========================================================================
    // Binding Errors (E1xx)
    // =========================================================================
    /// Value not convertible.
    ///
    /// The text supplied for an option could not be converted to the type
    /// of the member it binds to. The value is skipped.
    E100,

    /// Missing parameter.
    ///
    /// An option that requires a value was the last argument.
    E101,

    // =========================================================================
    // Occurrence Errors (E2xx)
    // =========================================================================
    /// Too many occurrences.
    ///
    /// More values were supplied than the option's maximum number of
    /// occurrences allows. Extra values are dropped.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns the numeric value of the code (e.g., `100` for `E100`).
    pub fn number(&self) -> i32 {
        match self {
            ErrorCode::E001 => 1,
            ErrorCode::E100 => 100,
            ErrorCode::E101 => 101,
            ErrorCode::E200 => 200,
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unreadable response file",
            ErrorCode::E100 => "value not convertible",
            ErrorCode::E101 => "missing parameter",
            ErrorCode::E200 => "too many occurrences",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
