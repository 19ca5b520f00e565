//! Schema file loading for the CLI
//!
//! This module handles finding and loading TOML option schemas from various
//! locations (explicit path, working directory, system directory) and
//! checking them before any argument is bound.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use crate::{error::CliError, schema::Schema};

/// Schema-related errors for CLI
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse TOML schema: {0}")]
    Parse(String),

    #[error("Missing schema file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Find and load the option schema from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Working directory (optbind.toml)
/// 3. Platform-specific config directory (schema.toml)
/// 4. Empty schema if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to the schema file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Schema file exists but cannot be parsed or fails validation
pub fn load_schema(explicit_path: Option<impl AsRef<Path>>) -> Result<Schema, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading schema from explicit path");
        return load_schema_file(path);
    }

    let local_schema = Path::new("optbind.toml");
    if local_schema.exists() {
        info!(path = local_schema.display().to_string(); "Loading schema from local path");
        return load_schema_file(local_schema);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "optbind", "optbind") {
        let system_schema = proj_dirs.config_dir().join("schema.toml");

        if system_schema.exists() {
            info!(path = system_schema.display().to_string(); "Loading schema from system path");
            return load_schema_file(system_schema);
        }

        debug!(path = system_schema.display().to_string(); "System schema file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No schema file found, every argument is positional");
    Ok(Schema::default())
}

/// Load and validate a schema from a TOML file
fn load_schema_file(path: impl AsRef<Path>) -> Result<Schema, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SchemaError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let schema: Schema = toml::from_str(&content).map_err(|e| SchemaError::Parse(e.to_string()))?;
    validate(&schema)?;

    debug!(path = path.display().to_string(), options = schema.options.len(); "Schema loaded");
    Ok(schema)
}

/// Check that every option name can be used as a shell variable.
fn validate(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for spec in &schema.options {
        if !is_shell_identifier(&spec.name) {
            return Err(SchemaError::Validation(format!(
                "option name '{}' is not a valid shell variable name",
                spec.name
            )));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(SchemaError::Validation(format!(
                "option '{}' is declared more than once",
                spec.name
            )));
        }
    }
    Ok(())
}

fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_explicit_schema() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("tool.toml");
        fs::write(
            &path,
            r#"
            [program]
            title = "tool"

            [[option]]
            name = "name"
            short = "n"
            description = "Who to greet: {name}"
            "#,
        )
        .unwrap();

        let schema = load_schema(Some(&path)).expect("schema should load");

        assert_eq!(schema.program.title(), "tool");
        assert_eq!(schema.options.len(), 1);
        assert_eq!(schema.options[0].short, Some('n'));
    }

    #[test]
    fn test_missing_explicit_schema() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_schema(Some(&path)).unwrap_err();

        assert!(matches!(
            err,
            CliError::Schema(SchemaError::MissingFile(ref missing)) if *missing == path
        ));
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("tool.toml");
        fs::write(&path, "[[option]]\nname = \"x\"\nshrot = \"x\"\n").unwrap();

        let err = load_schema(Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::Schema(SchemaError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("tool.toml");

        fs::write(&path, "[[option]]\nname = \"dry-run\"\n").unwrap();
        let err = load_schema(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Schema(SchemaError::Validation(_))));

        fs::write(&path, "[[option]]\nname = \"a\"\n[[option]]\nname = \"a\"\n").unwrap();
        let err = load_schema(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Schema(SchemaError::Validation(_))));
    }

    #[test]
    fn test_is_shell_identifier() {
        assert!(is_shell_identifier("dry_run"));
        assert!(is_shell_identifier("_x1"));
        assert!(!is_shell_identifier(""));
        assert!(!is_shell_identifier("1x"));
        assert!(!is_shell_identifier("dry-run"));
    }
}
