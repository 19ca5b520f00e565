use std::{fs, path::Path};

use tempfile::tempdir;

use optbind_cli::{Args, CliError, SchemaError, bind};

const DEPLOY_SCHEMA: &str = r#"
[program]
title = "deploy"
version = "1.2.0"
usage_complement = "HOST..."

[settings]
mode = "linux"
bundle_single_dash = true

[[option]]
name = "verbose"
short = "v"
type = "bool"
description = "Show more output"

[[option]]
name = "force"
short = "f"
type = "bool"
description = "Overwrite existing releases"

[[option]]
name = "retries"
short = "r"
type = "int"
description = "Give up after {count} attempts"

[[option]]
name = "target"
short = "t"
long = "target-dir"
type = "path"
description = "Install into {dir}"

[[option]]
name = "tag"
list = true
max_occurs = 2
description = "Attach a {tag}"
"#;

fn write_schema(dir: &Path, content: &str) -> String {
    let path = dir.join("deploy.toml");
    fs::write(&path, content).expect("Failed to write schema");
    path.to_string_lossy().to_string()
}

fn args(schema: &str, arguments: &[&str]) -> Args {
    Args {
        schema: Some(schema.to_string()),
        log_level: "off".to_string(),
        args: arguments.iter().map(|arg| arg.to_string()).collect(),
    }
}

#[test]
fn e2e_binds_arguments_to_shell_assignments() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let schema = write_schema(temp_dir.path(), DEPLOY_SCHEMA);

    let lines = bind(&args(
        &schema,
        &[
            "-vf",
            "--retries=3",
            "--target-dir",
            "/srv/app",
            "--tag",
            "a,b,c",
            "web-1",
            "--",
            "-db",
        ],
    ))
    .expect("binding should succeed");

    assert_eq!(
        lines,
        [
            "verbose='true'",
            "force='true'",
            "retries='3'",
            "target='/srv/app'",
            "tag=('a' 'b')",
            "set -- 'web-1' '-db'",
        ]
    );
}

#[test]
fn e2e_unset_options_get_empty_values() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let schema = write_schema(temp_dir.path(), DEPLOY_SCHEMA);

    let lines = bind(&args(&schema, &[])).unwrap();

    assert_eq!(
        lines,
        [
            "verbose='false'",
            "force='false'",
            "retries=''",
            "target=''",
            "tag=()",
            "set --",
        ]
    );
}

#[test]
fn e2e_invalid_values_fail_the_run() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let schema = write_schema(temp_dir.path(), DEPLOY_SCHEMA);

    let err = bind(&args(&schema, &["-r", "many", "--retries"])).unwrap_err();

    match &err {
        CliError::InvalidArguments(diagnostics) => {
            assert_eq!(diagnostics.len(), 2);
            assert_eq!(diagnostics[0].code().as_str(), "E100");
            assert_eq!(diagnostics[1].code().as_str(), "E101");
        }
        other => panic!("Expected InvalidArguments, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn e2e_help_and_version_exit_successfully() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let schema = write_schema(temp_dir.path(), DEPLOY_SCHEMA);

    for flag in ["--help", "-?", "--version", "--usage"] {
        let err = bind(&args(&schema, &[flag])).unwrap_err();
        assert!(
            matches!(err, CliError::Abandoned(0)),
            "{flag} should stop with exit code 0, got {err:?}"
        );
    }
}

#[test]
fn e2e_inconsistent_schema_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let schema = write_schema(
        temp_dir.path(),
        r#"
        [[option]]
        name = "level"
        type = "int"
        alternate = "level:quiet"
        "#,
    );

    let err = bind(&args(&schema, &["--level", "1"])).unwrap_err();

    assert!(matches!(err, CliError::Configuration(_)));
}

#[test]
fn e2e_missing_schema_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("absent.toml");

    let err = bind(&args(&missing.to_string_lossy(), &["-v"])).unwrap_err();

    assert!(matches!(err, CliError::Schema(SchemaError::MissingFile(_))));
}
