//! optbind - declarative command-line option binding.
//!
//! A program describes its options by registering the members of a
//! configuration struct, each with an
//! [`OptionDeclaration`](declaration::OptionDeclaration). The engine
//! builds an option table from those registrations, normalizes the argument
//! vector (response files, `--`, bundled flags, attached values), matches
//! every token against the table, converts and stores the values, and
//! returns the arguments no option consumed.
//!
//! # Example
//!
//! ```
//! use optbind::{Options, OptionsBase, Registry, declaration::OptionDeclaration};
//!
//! #[derive(Default)]
//! struct Cli {
//!     base: OptionsBase,
//!     verbose: bool,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! impl Options for Cli {
//!     fn base(&self) -> &OptionsBase { &self.base }
//!     fn base_mut(&mut self) -> &mut OptionsBase { &mut self.base }
//!
//!     fn declare(&self, registry: &mut Registry<Self>) {
//!         registry
//!             .field(OptionDeclaration::new("Be chatty").short('v'), "verbose", |c| &mut c.verbose)
//!             .field(OptionDeclaration::new("Your {name}").short('n'), "name", |c| &mut c.name)
//!             .list(OptionDeclaration::new("Add a {tag}").max_occurs(3), "tag", |c| &mut c.tags);
//!     }
//! }
//!
//! let mut cli = Cli::default();
//! let rest = cli
//!     .process_args(&["-v", "--tag", "a,b", "--tag", "c,d", "--name=Bob", "file.txt"])
//!     .expect("options are consistent");
//!
//! assert!(cli.verbose);
//! assert_eq!(cli.name, "Bob");
//! assert_eq!(cli.tags, ["a", "b", "c"]);
//! assert_eq!(rest, ["file.txt"]);
//! ```

pub mod help;
pub mod normalize;
pub mod response;

mod bound;
mod error;
mod options;
mod registry;
mod table;
mod target;

pub use optbind_core::{
    declaration, info, program_info, settings, sink, value,
    error::{ConfigurationError, Diagnostic, ErrorCode, Severity},
};

pub use bound::{BoundOption, ProcessingResult};
pub use error::{Abandon, DEFAULT_EXIT_CODE, ParseError};
pub use options::{ConsoleReporter, ErrorReporter, INFORMATIONAL_EXIT_CODE, Options, OptionsBase};
pub use registry::{Origin, Registry};
pub use table::OptionTable;
pub use target::MemberKind;
