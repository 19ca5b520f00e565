//! Parsing-mode settings.
//!
//! [`ParseSettings`] controls which option prefixes are recognized and how
//! raw arguments are split before matching. It implements
//! [`serde::Deserialize`] so it can be loaded from configuration files.
//!
//! # Example
//!
//! ```
//! # use optbind_core::settings::{ParseSettings, ParsingMode};
//! let settings = ParseSettings::default()
//!     .with_mode(ParsingMode::Linux)
//!     .with_bundle_single_dash(true);
//! assert!(settings.mode().is_gnu());
//! assert!(settings.mode().accepts_prefix('-'));
//! assert!(!settings.mode().accepts_prefix('/'));
//! ```

use serde::Deserialize;

/// Which option prefixes a command line uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsingMode {
    /// GNU style: `-x`, `--long`.
    Linux,
    /// Windows style: `/x`, `/long`.
    Windows,
    /// Both prefixes are recognized. Counts as GNU style for bundling and
    /// sorting.
    Both,
}

impl ParsingMode {
    /// Returns `true` when GNU conventions (bundling, short-form sorting)
    /// apply.
    pub fn is_gnu(&self) -> bool {
        matches!(self, ParsingMode::Linux | ParsingMode::Both)
    }

    /// Returns `true` when `/` prefixes are recognized.
    pub fn is_windows(&self) -> bool {
        matches!(self, ParsingMode::Windows | ParsingMode::Both)
    }

    /// Returns `true` if `prefix` introduces an option in this mode.
    pub fn accepts_prefix(&self, prefix: char) -> bool {
        match prefix {
            '-' => self.is_gnu(),
            '/' => self.is_windows(),
            _ => false,
        }
    }

    /// Returns `true` if `token` looks like an option in this mode.
    ///
    /// A lone prefix character (`-` or `/`) is a positional argument.
    pub fn looks_like_option(&self, token: &str) -> bool {
        let mut chars = token.chars();
        match chars.next() {
            Some(prefix) => self.accepts_prefix(prefix) && chars.next().is_some(),
            None => false,
        }
    }
}

impl Default for ParsingMode {
    fn default() -> Self {
        if cfg!(windows) {
            ParsingMode::Both
        } else {
            ParsingMode::Linux
        }
    }
}

/// Settings controlling argument normalization and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Recognized option prefixes.
    mode: ParsingMode,

    /// Explode `-abc` into `-a -b -c` in GNU mode.
    bundle_single_dash: bool,

    /// Treat everything after `--` as positional.
    end_with_double_dash: bool,

    /// Keep list values intact instead of splitting them on `,`.
    dont_split_on_commas: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            mode: ParsingMode::default(),
            bundle_single_dash: false,
            end_with_double_dash: true,
            dont_split_on_commas: false,
        }
    }
}

impl ParseSettings {
    pub fn with_mode(mut self, mode: ParsingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_bundle_single_dash(mut self, bundle: bool) -> Self {
        self.bundle_single_dash = bundle;
        self
    }

    pub fn with_end_with_double_dash(mut self, end: bool) -> Self {
        self.end_with_double_dash = end;
        self
    }

    pub fn with_dont_split_on_commas(mut self, dont_split: bool) -> Self {
        self.dont_split_on_commas = dont_split;
        self
    }

    pub fn mode(&self) -> ParsingMode {
        self.mode
    }

    pub fn bundle_single_dash(&self) -> bool {
        self.bundle_single_dash
    }

    pub fn end_with_double_dash(&self) -> bool {
        self.end_with_double_dash
    }

    pub fn dont_split_on_commas(&self) -> bool {
        self.dont_split_on_commas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_option() {
        assert!(ParsingMode::Linux.looks_like_option("-v"));
        assert!(ParsingMode::Linux.looks_like_option("--verbose"));
        assert!(!ParsingMode::Linux.looks_like_option("/v"));
        assert!(!ParsingMode::Linux.looks_like_option("-"));
        assert!(!ParsingMode::Linux.looks_like_option(""));
        assert!(!ParsingMode::Linux.looks_like_option("file.txt"));

        assert!(ParsingMode::Windows.looks_like_option("/out"));
        assert!(!ParsingMode::Windows.looks_like_option("-out"));

        assert!(ParsingMode::Both.looks_like_option("/out"));
        assert!(ParsingMode::Both.looks_like_option("-out"));
    }

    #[test]
    fn test_defaults() {
        let settings = ParseSettings::default();
        assert!(settings.end_with_double_dash());
        assert!(!settings.bundle_single_dash());
        assert!(!settings.dont_split_on_commas());
    }
}
