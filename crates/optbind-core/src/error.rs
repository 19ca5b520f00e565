//! Error and diagnostic types shared by the optbind crates.
//!
//! Two families of problems exist:
//!
//! - [`Diagnostic`]s are recoverable. They describe a command line the user
//!   got slightly wrong (an unreadable response file, a value of the wrong
//!   type, too many occurrences). Processing continues after reporting them.
//! - [`ConfigurationError`]s are fatal. They describe option declarations
//!   the program author got wrong and stop the option table from being built.
//!
//! # Example
//!
//! ```
//! # use optbind_core::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning(ErrorCode::E200, "option --tag accepts at most 3 values")
//!     .with_help("2 extra values were ignored");
//! assert_eq!(diag.code().number(), 200);
//! ```

mod configuration;
mod diagnostic;
mod error_code;
mod severity;

pub use configuration::ConfigurationError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
