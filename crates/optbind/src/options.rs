//! Configuration objects.
//!
//! A configuration object is any struct that embeds an [`OptionsBase`] and
//! implements [`Options`]. The base carries the parse settings, the program
//! info, the output and error channels and the arguments left over after
//! parsing; the trait supplies the option declarations and the
//! [`Options::process_args`] driver.
//!
//! Every configuration object answers to these built-in options:
//!
//! | Option | Effect |
//! |--------|--------|
//! | `-?`, `--help` | Show the help list and stop |
//! | `--help2` | Show the second-level help list and stop |
//! | `-V`, `--version` | Show the about text and stop |
//! | `--usage` | Show the usage line and stop |
//! | `-.`, `--verbosegetoptions` | Echo every matched option |
//! | `-~`, `--debugoptions` | Dump the option table |
//!
//! A type may replace any of them by declaring a member with the same name.

use std::{fmt, path::Path};

use log::debug;

use optbind_core::{
    declaration::OptionDeclaration,
    error::Diagnostic,
    info::ProgramInfo,
    settings::ParseSettings,
    sink::{ConsoleSink, LineSink},
    value::{OptionValue, ValueType},
};

use crate::{
    error::{Abandon, ParseError},
    help::{Help, HelpLevel},
    registry::Registry,
    response::{FsResponseFiles, ResponseFileReader},
    table::OptionTable,
    target::{Invoke, InvokeError},
};

/// Exit status of the informational built-ins (help, about, usage).
pub const INFORMATIONAL_EXIT_CODE: i32 = 0;

/// Receives every diagnostic raised while processing arguments.
pub trait ErrorReporter {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl<F> ErrorReporter for F
where
    F: FnMut(&Diagnostic),
{
    fn report(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Writes diagnostics to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        eprintln!("{diagnostic}");
        if let Some(help) = diagnostic.help() {
            eprintln!("   = help: {help}");
        }
    }
}

/// State shared by every configuration object.
pub struct OptionsBase {
    settings: ParseSettings,
    program_info: ProgramInfo,
    verbose_parsing: bool,
    debug_parsing: bool,
    remaining: Vec<String>,
    got_no_arguments: bool,
    diagnostics: Vec<Diagnostic>,
    sink: Box<dyn LineSink>,
    reporter: Box<dyn ErrorReporter>,
    response_files: Box<dyn ResponseFileReader>,
}

impl Default for OptionsBase {
    fn default() -> Self {
        Self {
            settings: ParseSettings::default(),
            program_info: ProgramInfo::new(default_title()),
            verbose_parsing: false,
            debug_parsing: false,
            remaining: Vec::new(),
            got_no_arguments: false,
            diagnostics: Vec::new(),
            sink: Box::new(ConsoleSink),
            reporter: Box::new(ConsoleReporter),
            response_files: Box::new(FsResponseFiles),
        }
    }
}

impl fmt::Debug for OptionsBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsBase")
            .field("settings", &self.settings)
            .field("program_info", &self.program_info)
            .field("verbose_parsing", &self.verbose_parsing)
            .field("debug_parsing", &self.debug_parsing)
            .field("remaining", &self.remaining)
            .field("got_no_arguments", &self.got_no_arguments)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl OptionsBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: ParseSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_program_info(mut self, program_info: ProgramInfo) -> Self {
        self.program_info = program_info;
        self
    }

    /// Send banners, help text and verbose traces to `sink`.
    pub fn with_sink(mut self, sink: impl LineSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Send diagnostics to `reporter`.
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Read `@file` arguments through `reader`.
    pub fn with_response_files(mut self, reader: impl ResponseFileReader + 'static) -> Self {
        self.response_files = Box::new(reader);
        self
    }

    pub fn settings(&self) -> &ParseSettings {
        &self.settings
    }

    pub fn program_info(&self) -> &ProgramInfo {
        &self.program_info
    }

    /// Returns `true` once `--verbosegetoptions` was given.
    pub fn is_verbose_parsing(&self) -> bool {
        self.verbose_parsing
    }

    /// Returns `true` once `--debugoptions` was given.
    pub fn is_debug_parsing(&self) -> bool {
        self.debug_parsing
    }

    /// Arguments not consumed by any option, in command-line order.
    pub fn remaining_arguments(&self) -> &[String] {
        &self.remaining
    }

    pub fn first_argument(&self) -> Option<&str> {
        self.nth_argument(0)
    }

    pub fn second_argument(&self) -> Option<&str> {
        self.nth_argument(1)
    }

    pub fn third_argument(&self) -> Option<&str> {
        self.nth_argument(2)
    }

    pub fn fourth_argument(&self) -> Option<&str> {
        self.nth_argument(3)
    }

    pub fn fifth_argument(&self) -> Option<&str> {
        self.nth_argument(4)
    }

    /// Returns `true` if the last parse was given an empty argument vector.
    pub fn got_no_arguments(&self) -> bool {
        self.got_no_arguments
    }

    /// Diagnostics raised during the last parse.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if the last parse raised an error diagnostic.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity().is_error())
    }

    /// Log, report and record a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        debug!(code = diagnostic.code().as_str(); "Reporting {diagnostic}");
        self.reporter.report(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Write lines to the output sink.
    pub fn write_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            self.sink.write_line(line.as_ref());
        }
    }

    pub(crate) fn response_files(&self) -> &dyn ResponseFileReader {
        self.response_files.as_ref()
    }

    pub(crate) fn begin_session(&mut self, got_no_arguments: bool) {
        self.remaining.clear();
        self.diagnostics.clear();
        self.got_no_arguments = got_no_arguments;
    }

    pub(crate) fn push_remaining(&mut self, argument: String) {
        self.remaining.push(argument);
    }

    fn nth_argument(&self, index: usize) -> Option<&str> {
        self.remaining.get(index).map(String::as_str)
    }
}

/// The program name as invoked, without directory or extension.
fn default_title() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A configuration object whose members are bound to command-line options.
pub trait Options: Sized + 'static {
    fn base(&self) -> &OptionsBase;

    fn base_mut(&mut self) -> &mut OptionsBase;

    /// Register the option members of this object.
    ///
    /// Called once per parse, before any argument is looked at. Most types
    /// register a fixed set of members; a type may also derive its members
    /// from its own state, such as a schema loaded at run time.
    fn declare(&self, registry: &mut Registry<Self>);

    /// Handle `--help`.
    fn show_help(&mut self, help: &mut Help<'_>) -> Result<(), Abandon> {
        let lines = help.help_lines(HelpLevel::First);
        self.base_mut().write_lines(&lines);
        Err(Abandon::new(INFORMATIONAL_EXIT_CODE))
    }

    /// Handle `--help2`.
    fn show_second_level_help(&mut self, help: &mut Help<'_>) -> Result<(), Abandon> {
        let lines = help.help_lines(HelpLevel::Second);
        self.base_mut().write_lines(&lines);
        Err(Abandon::new(INFORMATIONAL_EXIT_CODE))
    }

    /// Handle `--version`.
    fn show_about(&mut self, help: &mut Help<'_>) -> Result<(), Abandon> {
        let lines = help.about_lines();
        self.base_mut().write_lines(&lines);
        Err(Abandon::new(INFORMATIONAL_EXIT_CODE))
    }

    /// Handle `--usage`.
    fn show_usage(&mut self, help: &mut Help<'_>) -> Result<(), Abandon> {
        let lines = help.usage_lines();
        self.base_mut().write_lines(&lines);
        Err(Abandon::new(INFORMATIONAL_EXIT_CODE))
    }

    /// Bind `args` (without the program name) to this object.
    ///
    /// Returns the arguments not consumed by any option. Recoverable
    /// problems are reported and recorded in [`OptionsBase::diagnostics`];
    /// an `Err` means the declarations are inconsistent or an option asked
    /// the program to stop.
    fn process_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<String>, ParseError> {
        let mut table = OptionTable::new(self)?;
        Ok(table.process(self, args)?)
    }
}

/// Built-in options every configuration object answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Help,
    SecondLevelHelp,
    About,
    Usage,
    VerboseParsing,
    DebugParsing,
}

impl<C: Options> Invoke<C> for Builtin {
    fn value_type(&self) -> ValueType {
        ValueType::BOOLEAN
    }

    fn invoke(
        &mut self,
        config: &mut C,
        raw: &str,
        help: &mut Help<'_>,
    ) -> Result<(), InvokeError> {
        if !bool::parse_value(raw).map_err(InvokeError::Conversion)? {
            return Ok(());
        }

        let outcome = match self {
            Builtin::Help => config.show_help(help),
            Builtin::SecondLevelHelp => config.show_second_level_help(help),
            Builtin::About => config.show_about(help),
            Builtin::Usage => config.show_usage(help),
            Builtin::VerboseParsing => {
                config.base_mut().verbose_parsing = true;
                Ok(())
            }
            Builtin::DebugParsing => {
                let base = config.base_mut();
                base.debug_parsing = true;
                base.write_lines(&help.debug_lines());
                Ok(())
            }
        };
        outcome.map_err(InvokeError::Abandon)
    }
}

/// Register the built-in options. Called in the inherited scope before a
/// type's own declarations.
pub(crate) fn register_builtins<C: Options>(registry: &mut Registry<C>) {
    registry
        .callable(
            OptionDeclaration::new("Show this help list")
                .short('?')
                .long("help"),
            "help",
            Box::new(Builtin::Help),
        )
        .callable(
            OptionDeclaration::new("Show an additional help list").long("help2"),
            "help2",
            Box::new(Builtin::SecondLevelHelp),
        )
        .callable(
            OptionDeclaration::new("Display version and licensing information")
                .short('V')
                .long("version"),
            "version",
            Box::new(Builtin::About),
        )
        .callable(
            OptionDeclaration::new("Show usage syntax and exit").long("usage"),
            "usage",
            Box::new(Builtin::Usage),
        )
        .callable(
            OptionDeclaration::new("Show verbose parsing of options")
                .short('.')
                .long("verbosegetoptions")
                .second_level(),
            "verbosegetoptions",
            Box::new(Builtin::VerboseParsing),
        )
        .callable(
            OptionDeclaration::new("Show debugging info while processing options")
                .short('~')
                .long("debugoptions")
                .second_level(),
            "debugoptions",
            Box::new(Builtin::DebugParsing),
        );
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use optbind_core::{
        error::ErrorCode,
        settings::ParsingMode,
        sink::MemorySink,
    };

    use super::*;

    #[derive(Default)]
    struct Config {
        base: OptionsBase,
        verbose: bool,
    }

    impl Options for Config {
        fn base(&self) -> &OptionsBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut OptionsBase {
            &mut self.base
        }

        fn declare(&self, registry: &mut Registry<Self>) {
            registry.field(
                OptionDeclaration::new("Be chatty").short('v'),
                "verbose",
                |c| &mut c.verbose,
            );
        }
    }

    fn tool_config(sink: &MemorySink) -> Config {
        Config {
            base: OptionsBase::new()
                .with_settings(ParseSettings::default().with_mode(ParsingMode::Linux))
                .with_program_info(ProgramInfo::new("tool").with_version("2.0"))
                .with_sink(sink.clone()),
            verbose: false,
        }
    }

    #[test]
    fn test_help_abandons_with_informational_code() {
        let sink = MemorySink::new();
        let mut config = tool_config(&sink);

        let err = config.process_args(&["-v", "--help"]).unwrap_err();
        assert_eq!(err.exit_code(), INFORMATIONAL_EXIT_CODE);

        let lines = sink.lines();
        assert_eq!(lines[0], "tool  2.0");
        assert!(lines.iter().any(|line| line == "Usage: tool [-.?vV~] [options]"));
        assert!(lines.iter().any(|line| line.contains("--verbose")));
        assert!(!lines.iter().any(|line| line.contains("--debugoptions")));
    }

    #[test]
    fn test_second_level_help_lists_hidden_options() {
        let sink = MemorySink::new();
        let mut config = tool_config(&sink);

        assert!(config.process_args(&["--help2"]).is_err());
        let contents = sink.contents();
        assert!(contents.contains("--debugoptions"));
        assert!(contents.contains("--verbosegetoptions"));
        assert!(!contents.contains("Be chatty"));
    }

    #[test]
    fn test_usage_and_version() {
        let sink = MemorySink::new();
        let mut config = tool_config(&sink);
        assert!(config.process_args(&["--usage"]).is_err());
        assert_eq!(
            sink.lines(),
            ["Usage: tool [-.?vV~] [options]", "Use --help for a list of options"]
        );

        let sink = MemorySink::new();
        let mut config = tool_config(&sink);
        assert!(config.process_args(&["-V"]).is_err());
        assert_eq!(sink.lines(), ["tool  2.0"]);
    }

    #[test]
    fn test_verbose_parsing_flag_and_trace() {
        let sink = MemorySink::new();
        let mut config = tool_config(&sink);

        config.process_args(&["-.", "-v"]).unwrap();

        assert!(config.base.is_verbose_parsing());
        assert!(config.verbose);
        assert!(sink.contents().contains("--verbose"));
    }

    #[test]
    fn test_debug_parsing_dumps_table() {
        let sink = MemorySink::new();
        let mut config = tool_config(&sink);

        config.process_args(&["-~"]).unwrap();

        assert!(config.base.is_debug_parsing());
        assert!(sink.contents().contains("option verbose: short=v type=bool"));
    }

    #[test]
    fn test_reporter_receives_diagnostics() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&seen);
        let mut config = Config {
            base: OptionsBase::new()
                .with_reporter(move |diag: &Diagnostic| recorder.borrow_mut().push(diag.code()))
                .with_response_files(|_: &Path| -> std::io::Result<Vec<String>> {
                    Err(std::io::Error::other("denied"))
                }),
            verbose: false,
        };

        let remaining = config.process_args(&["@args.rsp", "file"]).unwrap();

        assert_eq!(remaining, ["file"]);
        assert_eq!(*seen.borrow(), [ErrorCode::E001]);
        assert!(config.base.has_errors());
    }

    #[test]
    fn test_argument_accessors() {
        let mut config = Config::default();
        assert!(config.process_args::<&str>(&[]).unwrap().is_empty());
        assert!(config.base.got_no_arguments());

        config.process_args(&["a", "b", "c"]).unwrap();
        assert!(!config.base.got_no_arguments());
        assert_eq!(config.base.first_argument(), Some("a"));
        assert_eq!(config.base.third_argument(), Some("c"));
        assert_eq!(config.base.fourth_argument(), None);
    }
}
