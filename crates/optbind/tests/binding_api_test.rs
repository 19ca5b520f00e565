//! Integration tests for binding command lines to configuration objects.
//!
//! These tests drive the public API the way a program would: declare a
//! configuration struct, call `process_args` and inspect the result.

use std::{fs, path::PathBuf};

use tempfile::tempdir;

use optbind::{
    Abandon, ConfigurationError, ErrorCode, Options, OptionsBase, ParseError, Registry,
    declaration::OptionDeclaration,
    info::ProgramInfo,
    settings::{ParseSettings, ParsingMode},
    sink::MemorySink,
};

#[derive(Default)]
struct Tool {
    base: OptionsBase,
    verbose: bool,
    name: String,
    tags: Vec<String>,
    size: Vec<u32>,
    output: PathBuf,
    level: String,
    quiet: bool,
    defines: Vec<String>,
}

impl Options for Tool {
    fn base(&self) -> &OptionsBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptionsBase {
        &mut self.base
    }

    fn declare(&self, registry: &mut Registry<Self>) {
        registry
            .field(
                OptionDeclaration::new("Show more output").short('v').vb_style(),
                "verbose",
                |t| &mut t.verbose,
            )
            .field(
                OptionDeclaration::new("Who to greet: {name}").short('n'),
                "name",
                |t| &mut t.name,
            )
            .list(
                OptionDeclaration::new("Attach a {tag}").max_occurs(3),
                "tag",
                |t| &mut t.tags,
            )
            .list(
                OptionDeclaration::new("Image {size}").unlimited(),
                "size",
                |t| &mut t.size,
            )
            .field(
                OptionDeclaration::new("Write to {file}").short('o').long("out"),
                "output",
                |t| &mut t.output,
            )
            .field(OptionDeclaration::new("Log {level}"), "level", |t| &mut t.level)
            .field(
                OptionDeclaration::new("Only report errors").long("level:quiet"),
                "quiet",
                |t| &mut t.quiet,
            )
            .method(
                OptionDeclaration::new("Define a {symbol}").short('D').unlimited(),
                "define",
                |t: &mut Tool, symbol: String| {
                    if symbol == "FORBIDDEN" {
                        return Err(Abandon::new(4));
                    }
                    t.defines.push(symbol);
                    Ok(())
                },
            );
    }
}

fn new_tool() -> (Tool, MemorySink) {
    new_tool_with(ParseSettings::default().with_mode(ParsingMode::Linux))
}

fn new_tool_with(settings: ParseSettings) -> (Tool, MemorySink) {
    let sink = MemorySink::new();
    let tool = Tool {
        base: OptionsBase::new()
            .with_settings(settings)
            .with_program_info(ProgramInfo::new("tool").with_usage_complement("FILE..."))
            .with_sink(sink.clone())
            .with_reporter(|_: &optbind::Diagnostic| {}),
        ..Tool::default()
    };
    (tool, sink)
}

#[test]
fn test_end_to_end_binding() {
    let (mut tool, _) = new_tool();

    let remaining = tool
        .process_args(&[
            "-v", "--tag", "a,b", "--tag", "c,d,e", "--name", "Bob", "file.txt",
        ])
        .expect("Failed to process arguments");

    assert!(tool.verbose);
    assert_eq!(tool.name, "Bob");
    assert_eq!(tool.tags, ["a", "b", "c"]);
    assert_eq!(remaining, ["file.txt"]);
    assert_eq!(tool.base.remaining_arguments(), ["file.txt"]);
    assert_eq!(tool.base.first_argument(), Some("file.txt"));

    let warnings: Vec<_> = tool
        .base
        .diagnostics()
        .iter()
        .filter(|diag| diag.code() == ErrorCode::E200)
        .collect();
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_last_value_wins_for_single_options() {
    let (mut tool, _) = new_tool();

    tool.process_args(&["--name", "Ada", "-n", "Grace"]).unwrap();

    assert_eq!(tool.name, "Grace");
}

#[test]
fn test_double_dash_stops_option_processing() {
    let (mut tool, _) = new_tool();

    let remaining = tool.process_args(&["--", "-v", "positional"]).unwrap();

    assert_eq!(remaining, ["-v", "positional"]);
    assert!(!tool.verbose);
}

#[test]
fn test_vb_style_last_occurrence_wins() {
    let (mut tool, _) = new_tool();
    tool.process_args(&["-verbose", "-verbose-"]).unwrap();
    assert!(!tool.verbose);

    let (mut tool, _) = new_tool();
    tool.process_args(&["-verbose-", "-verbose"]).unwrap();
    assert!(tool.verbose);
}

#[test]
fn test_attached_values_match_separate_values() {
    let (mut attached, _) = new_tool();
    attached.process_args(&["--name=Alice", "-o:out.svg"]).unwrap();

    let (mut separate, _) = new_tool();
    separate.process_args(&["--name", "Alice", "-o", "out.svg"]).unwrap();

    assert_eq!(attached.name, separate.name);
    assert_eq!(attached.output, separate.output);
    assert_eq!(attached.output, PathBuf::from("out.svg"));
}

#[test]
fn test_colon_alternate_never_sets_parameter() {
    let (mut tool, _) = new_tool();

    tool.process_args(&["--level:quiet"]).unwrap();

    assert!(tool.quiet);
    assert_eq!(tool.level, "");
}

#[test]
fn test_conversion_errors_are_recoverable() {
    let (mut tool, _) = new_tool();

    let remaining = tool
        .process_args(&["--size", "10,ten,30", "input"])
        .unwrap();

    assert_eq!(tool.size, [10, 30]);
    assert_eq!(remaining, ["input"]);
    assert!(tool.base.has_errors());
    assert_eq!(tool.base.diagnostics()[0].code(), ErrorCode::E100);
}

#[test]
fn test_missing_parameter_is_reported() {
    let (mut tool, _) = new_tool();

    tool.process_args(&["-v", "--name"]).unwrap();

    assert!(tool.verbose);
    assert_eq!(tool.base.diagnostics()[0].code(), ErrorCode::E101);
}

#[test]
fn test_bundled_flags() {
    let settings = ParseSettings::default()
        .with_mode(ParsingMode::Linux)
        .with_bundle_single_dash(true);
    let (mut tool, _) = new_tool_with(settings);

    let remaining = tool.process_args(&["-vx"]).unwrap();

    assert!(tool.verbose);
    assert_eq!(remaining, ["-x"]);
}

#[test]
fn test_bundling_keeps_vb_switches() {
    let settings = ParseSettings::default()
        .with_mode(ParsingMode::Linux)
        .with_bundle_single_dash(true);
    let (mut tool, _) = new_tool_with(settings);

    let remaining = tool.process_args(&["-v", "-v-"]).unwrap();

    assert!(!tool.verbose);
    assert!(remaining.is_empty());

    let (mut tool, _) = new_tool_with(settings);
    let remaining = tool.process_args(&["-v+"]).unwrap();

    assert!(tool.verbose);
    assert!(remaining.is_empty());
}

#[test]
fn test_method_options_run_in_order_and_can_abandon() {
    let (mut tool, sink) = new_tool();
    tool.process_args(&["-D", "A", "--define=B"]).unwrap();
    assert_eq!(tool.defines, ["A", "B"]);
    assert!(sink.lines().is_empty());

    let (mut tool, sink) = new_tool();
    let err = tool
        .process_args(&["-D", "A", "-D", "FORBIDDEN", "-D", "C"])
        .unwrap_err();

    assert!(matches!(err, ParseError::Abandoned(_)));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(tool.defines, ["A"]);
    assert_eq!(
        sink.lines(),
        [
            "Usage: tool [-.?DnovV~] [options] FILE...",
            "Use --help for a list of options",
        ]
    );
}

#[test]
fn test_response_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("args.rsp");
    fs::write(&path, "--size \"10\" extra\n-n 'Ada Lovelace'\n").unwrap();

    let (mut tool, _) = new_tool();
    let remaining = tool
        .process_args(&[format!("@{}", path.display()), "last".to_string()])
        .unwrap();

    assert_eq!(tool.size, [10]);
    assert_eq!(tool.name, "Ada Lovelace");
    assert_eq!(remaining, ["extra", "last"]);
}

#[test]
fn test_help_output() {
    let (mut tool, sink) = new_tool();

    let err = tool.process_args(&["--help"]).unwrap_err();
    assert_eq!(err.exit_code(), 0);

    let lines = sink.lines();
    assert_eq!(lines[0], "tool");
    assert!(lines.contains(&"Usage: tool [-.?DnovV~] [options] FILE...".to_string()));
    assert!(lines.contains(&"Options:".to_string()));
    assert!(lines.iter().any(|line| line.starts_with("  -o, --out:file")));
    assert!(lines.iter().any(|line| line.starts_with("      --level:level")));
    assert!(!lines.iter().any(|line| line.contains("--debugoptions")));
}

#[test]
fn test_processing_is_repeatable() {
    let (mut tool, _) = new_tool();

    tool.process_args(&["-v", "one"]).unwrap();
    let remaining = tool.process_args(&["two"]).unwrap();

    assert_eq!(remaining, ["two"]);
    assert_eq!(tool.base.remaining_arguments(), ["two"]);
}

#[test]
fn test_inconsistent_declarations_fail_fast() {
    #[derive(Default)]
    struct Broken {
        base: OptionsBase,
        count: i32,
    }

    impl Options for Broken {
        fn base(&self) -> &OptionsBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut OptionsBase {
            &mut self.base
        }

        fn declare(&self, registry: &mut Registry<Self>) {
            registry.field(
                OptionDeclaration::new("Count").max_occurs(-1),
                "count",
                |b| &mut b.count,
            );
        }
    }

    let mut broken = Broken::default();
    let err = broken.process_args(&["--count", "1"]).unwrap_err();

    assert!(matches!(
        err,
        ParseError::Configuration(ConfigurationError::MultipleOccurrencesNeedList { .. })
    ));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(broken.count, 0);
}
