//! Argument normalization.
//!
//! Before matching, the raw argument vector is rewritten into a flat list of
//! tokens that options can be matched against one at a time:
//!
//! 1. `@path` arguments are replaced by the contents of the response file.
//! 2. `--` ends option processing; everything after it is positional.
//! 3. In GNU mode with bundling enabled, `-abc` becomes `-a -b -c`.
//! 4. Option tokens carrying a value (`--name=Bob`, `/out:file`) are split
//!    into the option and the value.

use std::path::Path;

use log::{debug, trace};

use optbind_core::{
    error::{Diagnostic, ErrorCode},
    settings::ParseSettings,
};

use crate::response::{self, ResponseFileReader};

/// The result of normalizing an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    /// Tokens subject to option matching.
    pub tokens: Vec<String>,
    /// Tokens after `--`, always positional.
    pub trailing: Vec<String>,
    /// Problems found while normalizing, such as unreadable response files.
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalize `args` for matching.
pub fn normalize_args<S: AsRef<str>>(
    args: &[S],
    settings: &ParseSettings,
    reader: &dyn ResponseFileReader,
) -> NormalizedArgs {
    let mut normalized = NormalizedArgs::default();
    let expanded = expand_response_files(args, reader, &mut normalized.diagnostics);

    let mode = settings.mode();
    let mut options_ended = false;

    for token in expanded {
        if options_ended {
            normalized.trailing.push(token);
            continue;
        }

        if token == "--" && settings.end_with_double_dash() {
            options_ended = true;
            continue;
        }

        if mode.is_gnu() && settings.bundle_single_dash() && is_bundle(&token) {
            trace!(token = token.as_str(); "Exploding bundled flags");
            normalized
                .tokens
                .extend(token.chars().skip(1).map(|flag| format!("-{flag}")));
            continue;
        }

        if mode.looks_like_option(&token) {
            if let Some((option, value)) = token.split_once([':', '=']) {
                normalized.tokens.push(option.to_string());
                if !value.is_empty() {
                    normalized.tokens.push(value.to_string());
                }
                continue;
            }
        }

        normalized.tokens.push(token);
    }

    debug!(
        tokens = normalized.tokens.len(),
        trailing = normalized.trailing.len();
        "Normalized arguments"
    );
    normalized
}

/// Replace every `@path` argument by the contents of the file.
fn expand_response_files<S: AsRef<str>>(
    args: &[S],
    reader: &dyn ResponseFileReader,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    let mut expanded = Vec::with_capacity(args.len());

    for arg in args {
        let arg = arg.as_ref();
        let Some(path) = arg.strip_prefix('@').filter(|path| !path.is_empty()) else {
            expanded.push(arg.to_string());
            continue;
        };

        match response::expand(reader, Path::new(path)) {
            Ok(tokens) => {
                debug!(path, count = tokens.len(); "Expanded response file");
                expanded.extend(tokens);
            }
            Err(err) => {
                diagnostics.push(
                    Diagnostic::error(
                        ErrorCode::E001,
                        format!("cannot read response file '{path}'"),
                    )
                    .with_help(err.to_string()),
                );
            }
        }
    }

    expanded
}

/// `-abc` style tokens: a single dash followed by more than one character,
/// without an attached value. VB-style switches (`-v-`, `-v+`) and tokens
/// starting with a sign (`-+x`) are never bundles.
fn is_bundle(token: &str) -> bool {
    let Some(flags) = token.strip_prefix('-') else {
        return false;
    };
    flags.chars().count() > 1
        && !flags.starts_with(['-', '+'])
        && !flags.ends_with(['-', '+'])
        && !flags.contains([':', '='])
}
