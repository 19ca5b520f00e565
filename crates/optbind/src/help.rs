//! Help, usage and about text.
//!
//! All text is derived from the option table: every bound option contributes
//! one [`HelpEntry`] when the table is built. [`Help`] is the read-only view
//! handed to the built-in help options; the only state it touches is the
//! session's "banner already shown" flag, so the program banner is printed at
//! most once per parse even when several informational options are given.

use optbind_core::{
    declaration::MaxOccurs,
    info::ProgramInfo,
    settings::ParsingMode,
    value::ValueType,
};

/// Spaces between the widest option column and the descriptions.
const COLUMN_GAP: usize = 2;

/// Which help list to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpLevel {
    /// Options shown by `--help`.
    First,
    /// Options shown by `--help2`.
    Second,
}

/// What help output knows about one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub(crate) short_form: Option<char>,
    pub(crate) long_form: String,
    pub(crate) alternate_form: Option<String>,
    pub(crate) parameter: Option<String>,
    pub(crate) description: String,
    pub(crate) second_level: bool,
    pub(crate) value_type: ValueType,
    pub(crate) max_occurs: MaxOccurs,
}

impl HelpEntry {
    fn level(&self) -> HelpLevel {
        if self.second_level {
            HelpLevel::Second
        } else {
            HelpLevel::First
        }
    }

    /// The `-x, --long:PARAM, --alternate` column.
    fn option_column(&self, mode: ParsingMode) -> String {
        let (short_prefix, long_prefix) = prefixes(mode);
        let mut column = String::from("  ");

        match self.short_form {
            Some(short) => {
                column.push_str(short_prefix);
                column.push(short);
                column.push_str(", ");
            }
            None => column.push_str("    "),
        }

        column.push_str(long_prefix);
        column.push_str(&self.long_form);
        if let Some(parameter) = &self.parameter {
            column.push(':');
            column.push_str(parameter);
        }

        if let Some(alternate) = &self.alternate_form {
            column.push_str(", ");
            column.push_str(long_prefix);
            column.push_str(alternate);
        }

        column
    }
}

/// Short and long option prefixes for a parsing mode.
pub(crate) fn prefixes(mode: ParsingMode) -> (&'static str, &'static str) {
    match mode {
        ParsingMode::Windows => ("/", "/"),
        ParsingMode::Linux | ParsingMode::Both => ("-", "--"),
    }
}

/// Read-only view of the option table used to render help text.
pub struct Help<'a> {
    entries: &'a [HelpEntry],
    info: &'a ProgramInfo,
    mode: ParsingMode,
    banner_shown: &'a mut bool,
}

impl<'a> Help<'a> {
    pub(crate) fn new(
        entries: &'a [HelpEntry],
        info: &'a ProgramInfo,
        mode: ParsingMode,
        banner_shown: &'a mut bool,
    ) -> Self {
        Self {
            entries,
            info,
            mode,
            banner_shown,
        }
    }

    /// The program info the text is rendered from.
    pub fn info(&self) -> &ProgramInfo {
        self.info
    }

    /// The banner: title and version, copyright, description.
    ///
    /// Returns no lines if the banner was already rendered in this session.
    pub fn banner_lines(&mut self) -> Vec<String> {
        if *self.banner_shown {
            return Vec::new();
        }
        *self.banner_shown = true;

        let mut lines = Vec::new();
        match self.info.version() {
            Some(version) => lines.push(format!("{}  {version}", self.info.title())),
            None => lines.push(self.info.title().to_string()),
        }
        lines.extend(self.info.copyright().map(str::to_string));
        lines.extend(self.info.description().map(str::to_string));
        lines
    }

    /// The usage line: `Usage: <title> [-<short forms>] [options] <complement>`.
    pub fn usage_line(&self) -> String {
        let (short_prefix, _) = prefixes(self.mode);
        let shorts: String = self
            .entries
            .iter()
            .filter_map(|entry| entry.short_form)
            .collect();

        let mut line = format!("Usage: {}", self.info.title());
        if !shorts.is_empty() {
            line.push_str(&format!(" [{short_prefix}{shorts}]"));
        }
        line.push_str(" [options]");
        if let Some(complement) = self.info.usage_complement() {
            line.push(' ');
            line.push_str(complement);
        }
        line
    }

    /// The full help list for one level.
    pub fn help_lines(&mut self, level: HelpLevel) -> Vec<String> {
        let mut lines = self.banner_lines();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(self.usage_line());
        lines.push(String::new());
        lines.push("Options:".to_string());
        lines.extend(self.option_lines(level));

        if let Some(address) = self.info.report_bugs_to() {
            lines.push(String::new());
            lines.push(format!("Report bugs to <{address}>"));
        }
        lines
    }

    /// One aligned line per option of the given level.
    pub fn option_lines(&self, level: HelpLevel) -> Vec<String> {
        let columns: Vec<(String, &str)> = self
            .entries
            .iter()
            .filter(|entry| entry.level() == level)
            .map(|entry| (entry.option_column(self.mode), entry.description.as_str()))
            .collect();

        let tab = columns
            .iter()
            .map(|(column, _)| column.chars().count())
            .max()
            .unwrap_or(0)
            + COLUMN_GAP;

        columns
            .into_iter()
            .map(|(column, description)| {
                format!("{column:<tab$}{description}").trim_end().to_string()
            })
            .collect()
    }

    /// The usage line followed by a pointer to the help option.
    pub fn usage_lines(&self) -> Vec<String> {
        let (_, long_prefix) = prefixes(self.mode);
        vec![
            self.usage_line(),
            format!("Use {long_prefix}help for a list of options"),
        ]
    }

    /// The banner followed by authors, additional info and bug address.
    pub fn about_lines(&mut self) -> Vec<String> {
        let mut lines = self.banner_lines();
        let authors = self.info.authors();
        if !authors.is_empty() {
            lines.push(String::new());
            lines.push(format!("Authors: {}", authors.join(", ")));
        }
        if let Some(info) = self.info.additional_info() {
            lines.push(String::new());
            lines.push(info.to_string());
        }
        if let Some(address) = self.info.report_bugs_to() {
            lines.push(String::new());
            lines.push(format!("Report bugs to <{address}>"));
        }
        lines
    }

    /// A dump of the option table, one line per option.
    pub fn debug_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "option {}: short={} type={} parameter={} max_occurs={} level={:?}",
                    entry.long_form,
                    entry
                        .short_form
                        .map_or_else(|| "none".to_string(), String::from),
                    entry.value_type,
                    entry.parameter.as_deref().unwrap_or("none"),
                    entry.max_occurs,
                    entry.level(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(short: Option<char>, long: &str, parameter: Option<&str>, desc: &str) -> HelpEntry {
        HelpEntry {
            short_form: short,
            long_form: long.to_string(),
            alternate_form: None,
            parameter: parameter.map(str::to_string),
            description: desc.to_string(),
            second_level: false,
            value_type: ValueType::BOOLEAN,
            max_occurs: MaxOccurs::default(),
        }
    }

    fn entries() -> Vec<HelpEntry> {
        let mut hidden = entry(Some('~'), "debugoptions", None, "Show debug info");
        hidden.second_level = true;
        let mut alternate = entry(None, "level", Some("LEVEL"), "Logging level");
        alternate.alternate_form = Some("lvl".to_string());
        vec![
            entry(Some('v'), "verbose", None, "Be chatty"),
            alternate,
            hidden,
        ]
    }

    #[test]
    fn test_option_lines_align_descriptions() {
        let entries = entries();
        let info = ProgramInfo::new("tool");
        let mut shown = false;
        let help = Help::new(&entries, &info, ParsingMode::Linux, &mut shown);

        let lines = help.option_lines(HelpLevel::First);
        assert_eq!(
            lines,
            [
                "  -v, --verbose             Be chatty",
                "      --level:LEVEL, --lvl  Logging level",
            ]
        );
    }

    #[test]
    fn test_second_level_lines() {
        let entries = entries();
        let info = ProgramInfo::new("tool");
        let mut shown = false;
        let help = Help::new(&entries, &info, ParsingMode::Linux, &mut shown);

        let lines = help.option_lines(HelpLevel::Second);
        assert_eq!(lines, ["  -~, --debugoptions  Show debug info"]);
    }

    #[test]
    fn test_windows_prefixes() {
        let entries = vec![entry(Some('o'), "out", Some("FILE"), "Output file")];
        let info = ProgramInfo::new("tool");
        let mut shown = false;
        let help = Help::new(&entries, &info, ParsingMode::Windows, &mut shown);

        assert_eq!(
            help.option_lines(HelpLevel::First),
            ["  /o, /out:FILE  Output file"]
        );
        assert_eq!(help.usage_line(), "Usage: tool [/o] [options]");
    }

    #[test]
    fn test_banner_shown_once() {
        let entries = entries();
        let info = ProgramInfo::new("tool")
            .with_version("1.0")
            .with_copyright("(c) 2026");
        let mut shown = false;
        let mut help = Help::new(&entries, &info, ParsingMode::Linux, &mut shown);

        assert_eq!(help.banner_lines(), ["tool  1.0", "(c) 2026"]);
        assert!(help.banner_lines().is_empty());

        let about = help.about_lines();
        assert!(about.is_empty());
        assert!(shown);
    }

    #[test]
    fn test_usage_line_with_complement() {
        let entries = entries();
        let info = ProgramInfo::new("tool").with_usage_complement("FILE...");
        let mut shown = false;
        let help = Help::new(&entries, &info, ParsingMode::Linux, &mut shown);

        assert_eq!(help.usage_line(), "Usage: tool [-v~] [options] FILE...");
    }

    #[test]
    fn test_about_lines() {
        let entries = Vec::new();
        let info = ProgramInfo::new("tool")
            .with_authors(["Ada", "Grace"])
            .with_report_bugs_to("bugs@example.com");
        let mut shown = false;
        let mut help = Help::new(&entries, &info, ParsingMode::Linux, &mut shown);

        assert_eq!(
            help.about_lines(),
            [
                "tool",
                "",
                "Authors: Ada, Grace",
                "",
                "Report bugs to <bugs@example.com>",
            ]
        );
    }
}
