//! Option schemas and the configuration object built from them.
//!
//! A schema file describes the options of a shell script:
//!
//! ```toml
//! [program]
//! title = "deploy"
//! usage_complement = "HOST..."
//!
//! [settings]
//! bundle_single_dash = true
//!
//! [[option]]
//! name = "verbose"
//! short = "v"
//! type = "bool"
//! description = "Show more output"
//!
//! [[option]]
//! name = "tag"
//! list = true
//! max_occurs = 3
//! description = "Attach a {tag}"
//! ```
//!
//! [`SchemaOptions`] registers one member per `[[option]]` entry, binds a
//! command line against them and renders the result as shell assignments.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

use optbind::{Options, OptionsBase, ParseError, Registry};
use optbind_core::{
    declaration::OptionDeclaration, info::ProgramInfo, settings::ParseSettings,
    value::OptionValue,
};

/// A complete option schema loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub program: ProgramInfo,
    pub settings: ParseSettings,
    #[serde(rename = "option")]
    pub options: Vec<OptionSpec>,
}

/// The value type of a schema option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Int,
    Float,
    Path,
}

/// One `[[option]]` entry of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSpec {
    /// Shell variable the value is assigned to. Also the default long form.
    pub name: String,
    pub short: Option<char>,
    pub long: Option<String>,
    pub alternate: Option<String>,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Collect every value into a shell array.
    pub list: bool,
    /// Defaults to unlimited for lists and 1 otherwise.
    pub max_occurs: Option<i32>,
    pub vb_style: bool,
    pub second_level: bool,
}

impl OptionSpec {
    /// Build the option declaration this entry describes.
    pub fn declaration(&self) -> OptionDeclaration {
        let mut declaration = OptionDeclaration::new(self.description.as_str());
        if let Some(short) = self.short {
            declaration = declaration.short(short);
        }
        if let Some(long) = &self.long {
            declaration = declaration.long(long.as_str());
        }
        if let Some(alternate) = &self.alternate {
            declaration = declaration.alternate(alternate.as_str());
        }
        declaration = match self.max_occurs {
            Some(max_occurs) => declaration.max_occurs(max_occurs),
            None if self.list => declaration.unlimited(),
            None => declaration,
        };
        if self.vb_style {
            declaration = declaration.vb_style();
        }
        if self.second_level {
            declaration = declaration.second_level();
        }
        declaration
    }

    /// The value assigned when the option does not appear.
    fn unset_value(&self) -> Value {
        match (self.list, self.kind) {
            (true, _) => Value::List(Vec::new()),
            (false, ValueKind::Bool) => Value::Scalar("false".to_string()),
            (false, _) => Value::Scalar(String::new()),
        }
    }
}

/// A bound value, already converted and rendered back to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    /// Render the value as the right-hand side of a shell assignment.
    pub fn to_shell(&self) -> String {
        match self {
            Value::Scalar(value) => shell_quote(value),
            Value::List(values) => {
                let quoted: Vec<_> = values.iter().map(|v| shell_quote(v)).collect();
                format!("({})", quoted.join(" "))
            }
        }
    }
}

/// Quote `value` for a POSIX shell using single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// A configuration object whose members come from a [`Schema`].
#[derive(Debug)]
pub struct SchemaOptions {
    base: OptionsBase,
    specs: Vec<OptionSpec>,
    values: IndexMap<String, Value>,
}

impl SchemaOptions {
    /// Create a configuration object for `schema`.
    ///
    /// The schema's settings replace those of `base`. Its program info does
    /// too, unless the schema leaves the title empty.
    pub fn new(schema: &Schema, base: OptionsBase) -> Self {
        let mut base = base.with_settings(schema.settings);
        if !schema.program.title().is_empty() {
            base = base.with_program_info(schema.program.clone());
        }
        Self {
            base,
            specs: schema.options.clone(),
            values: IndexMap::new(),
        }
    }

    /// Bind `args` against the schema and return the remaining arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the schema declares inconsistent options or
    /// a built-in option (help, version) stopped processing.
    pub fn bind<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<String>, ParseError> {
        self.values.clear();
        self.process_args(args)
    }

    /// The value bound to the option `name`, if it appeared.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Render every option and the remaining arguments as shell code.
    ///
    /// Options that did not appear are assigned an empty value (`false`
    /// for booleans, `()` for lists) so a script can rely on every variable
    /// being set.
    pub fn shell_assignments(&self) -> Vec<String> {
        let mut lines: Vec<_> = self
            .specs
            .iter()
            .map(|spec| {
                let value = self
                    .values
                    .get(&spec.name)
                    .cloned()
                    .unwrap_or_else(|| spec.unset_value());
                format!("{}={}", spec.name, value.to_shell())
            })
            .collect();

        let remaining: Vec<_> = self
            .base
            .remaining_arguments()
            .iter()
            .map(|arg| shell_quote(arg))
            .collect();
        if remaining.is_empty() {
            lines.push("set --".to_string());
        } else {
            lines.push(format!("set -- {}", remaining.join(" ")));
        }
        lines
    }
}

impl Options for SchemaOptions {
    fn base(&self) -> &OptionsBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptionsBase {
        &mut self.base
    }

    fn declare(&self, registry: &mut Registry<Self>) {
        for spec in &self.specs {
            match spec.kind {
                ValueKind::String => bind::<String>(registry, spec, String::clone),
                ValueKind::Bool => bind::<bool>(registry, spec, bool::to_string),
                ValueKind::Int => bind::<i64>(registry, spec, i64::to_string),
                ValueKind::Float => bind::<f64>(registry, spec, f64::to_string),
                ValueKind::Path => {
                    bind::<PathBuf>(registry, spec, |path| path.display().to_string())
                }
            }
        }
    }
}

/// Register `spec` as a property that records its values under its name.
fn bind<T: OptionValue>(
    registry: &mut Registry<SchemaOptions>,
    spec: &OptionSpec,
    render: fn(&T) -> String,
) {
    let name = spec.name.clone();
    if spec.list {
        registry.list_property(
            spec.declaration(),
            spec.name.as_str(),
            move |options: &mut SchemaOptions, values: Vec<T>| {
                let rendered = values.iter().map(render).collect();
                options.values.insert(name.clone(), Value::List(rendered));
            },
        );
    } else {
        registry.property(
            spec.declaration(),
            spec.name.as_str(),
            move |options: &mut SchemaOptions, value: T| {
                options
                    .values
                    .insert(name.clone(), Value::Scalar(render(&value)));
            },
        );
    }
}
