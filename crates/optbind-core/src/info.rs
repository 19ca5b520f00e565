//! Program metadata used for banner, about and usage text.
//!
//! [`ProgramInfo`] is a read-only bag of strings. Programs usually fill it
//! from their package metadata with [`program_info!`](crate::program_info)
//! or load it from a configuration file.

use serde::Deserialize;

/// Descriptive strings about the running program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgramInfo {
    title: String,
    version: Option<String>,
    copyright: Option<String>,
    description: Option<String>,
    authors: Vec<String>,
    additional_info: Option<String>,
    report_bugs_to: Option<String>,
    usage_complement: Option<String>,
}

impl ProgramInfo {
    /// Create program info with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(version.into());
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = non_empty(copyright.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors
            .into_iter()
            .map(Into::into)
            .filter(|author: &String| !author.trim().is_empty())
            .collect();
        self
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = non_empty(info.into());
        self
    }

    pub fn with_report_bugs_to(mut self, address: impl Into<String>) -> Self {
        self.report_bugs_to = non_empty(address.into());
        self
    }

    /// Text appended to the usage line after the options (e.g. `FILE...`).
    pub fn with_usage_complement(mut self, complement: impl Into<String>) -> Self {
        self.usage_complement = non_empty(complement.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }

    pub fn report_bugs_to(&self) -> Option<&str> {
        self.report_bugs_to.as_deref()
    }

    pub fn usage_complement(&self) -> Option<&str> {
        self.usage_complement.as_deref()
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Build a [`ProgramInfo`] from the calling crate's Cargo metadata.
///
/// ```
/// let info = optbind_core::program_info!();
/// assert_eq!(info.title(), "optbind-core");
/// ```
#[macro_export]
macro_rules! program_info {
    () => {
        $crate::info::ProgramInfo::new(env!("CARGO_PKG_NAME"))
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_description(env!("CARGO_PKG_DESCRIPTION"))
            .with_authors(env!("CARGO_PKG_AUTHORS").split(':'))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_ignores_empty_strings() {
        let info = ProgramInfo::new("tool")
            .with_version("")
            .with_authors(["Ada", " ", "Grace"]);

        assert_eq!(info.title(), "tool");
        assert_eq!(info.version(), None);
        assert_eq!(info.authors(), ["Ada".to_string(), "Grace".to_string()]);
    }

    #[test]
    fn test_program_info_macro() {
        let info = crate::program_info!();
        assert_eq!(info.title(), "optbind-core");
        assert_eq!(info.version(), Some(env!("CARGO_PKG_VERSION")));
    }
}
