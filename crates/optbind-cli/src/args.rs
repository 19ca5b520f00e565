//! Command-line argument definitions for the optbind CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. These arguments select the option schema and the logging
//! verbosity; everything after them is handed to the binding engine.

use clap::Parser;

/// Command-line arguments for the optbind shell helper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the option schema file (TOML)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Arguments to bind against the schema, usually passed after `--`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
