//! optbind Core Types and Definitions
//!
//! This crate provides the foundational types shared by the optbind crates:
//!
//! - **Declarations**: Author-supplied option metadata ([`declaration::OptionDeclaration`])
//! - **Values**: Types an option can bind to ([`value::OptionValue`])
//! - **Settings**: Parsing modes and normalization switches ([`settings::ParseSettings`])
//! - **Program info**: Banner and about text ([`info::ProgramInfo`])
//! - **Sinks**: Line-oriented output ([`sink::LineSink`])
//! - **Errors**: Diagnostics and configuration errors ([`error`] module)

pub mod declaration;
pub mod error;
pub mod info;
pub mod settings;
pub mod sink;
pub mod value;
