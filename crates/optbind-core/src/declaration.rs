//! Option declarations.
//!
//! An [`OptionDeclaration`] is the metadata a program author attaches to one
//! bindable member of a configuration object: how the option is spelled on
//! the command line, how it is described in help output and how many times it
//! may occur. Declarations are immutable once built.
//!
//! # Example
//!
//! ```
//! # use optbind_core::declaration::{MaxOccurs, OptionDeclaration};
//! let decl = OptionDeclaration::new("Tags to attach to the {tag} list")
//!     .short('t')
//!     .long("tag")
//!     .max_occurs(3);
//!
//! assert_eq!(decl.short_form(), Some('t'));
//! assert_eq!(decl.max_occurs_limit(), MaxOccurs::Limited(3));
//! assert_eq!(decl.parameter_name(), "tag");
//! assert_eq!(decl.display_description(), "Tags to attach to the tag list");
//! ```

use std::fmt;

/// Parameter name shown in help when the description has no `{placeholder}`.
pub const DEFAULT_PARAMETER_NAME: &str = "PARAM";

/// How many times an option may occur on one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// At most this many occurrences (or values, for list options).
    Limited(usize),
    /// No limit.
    Unlimited,
}

impl MaxOccurs {
    /// Returns `true` for the default single-occurrence limit.
    pub fn is_single(&self) -> bool {
        matches!(self, MaxOccurs::Limited(1))
    }

    /// Returns the limit, or `None` when unlimited.
    pub fn limit(&self) -> Option<usize> {
        match self {
            MaxOccurs::Limited(limit) => Some(*limit),
            MaxOccurs::Unlimited => None,
        }
    }

    /// Clamps `requested` new values so that `occurs + accepted` stays within
    /// the limit. Returns the number of values that may be accepted.
    pub fn clamp(&self, occurs: usize, requested: usize) -> usize {
        match self {
            MaxOccurs::Limited(limit) => requested.min(limit.saturating_sub(occurs)),
            MaxOccurs::Unlimited => requested,
        }
    }
}

impl Default for MaxOccurs {
    fn default() -> Self {
        MaxOccurs::Limited(1)
    }
}

impl From<i32> for MaxOccurs {
    /// Negative counts mean unlimited.
    fn from(count: i32) -> Self {
        usize::try_from(count)
            .map(MaxOccurs::Limited)
            .unwrap_or(MaxOccurs::Unlimited)
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Limited(limit) => write!(f, "{limit}"),
            MaxOccurs::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Author-supplied metadata for one bindable member.
///
/// An empty long form means the long form is derived from the member name
/// when the option is bound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionDeclaration {
    description: String,
    short_form: Option<char>,
    long_form: Option<String>,
    alternate_form: Option<String>,
    max_occurs: MaxOccurs,
    vb_style_boolean: bool,
    second_level_help: bool,
}

impl OptionDeclaration {
    /// Create a declaration with only a description.
    ///
    /// The description may embed one `{placeholder}` naming the parameter in
    /// help output.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the single-character short form. A space means "no short form".
    pub fn short(mut self, short_form: char) -> Self {
        self.short_form = (short_form != ' ').then_some(short_form);
        self
    }

    /// Set the long form. An empty string means "derive from member name".
    pub fn long(mut self, long_form: impl Into<String>) -> Self {
        let long_form = long_form.into();
        self.long_form = (!long_form.is_empty()).then_some(long_form);
        self
    }

    /// Set an alternate spelling of the option.
    pub fn alternate(mut self, alternate_form: impl Into<String>) -> Self {
        let alternate_form = alternate_form.into();
        self.alternate_form = (!alternate_form.is_empty()).then_some(alternate_form);
        self
    }

    /// Set the maximum number of occurrences. Negative means unlimited.
    pub fn max_occurs(mut self, max_occurs: i32) -> Self {
        self.max_occurs = MaxOccurs::from(max_occurs);
        self
    }

    /// Allow an unlimited number of occurrences.
    pub fn unlimited(mut self) -> Self {
        self.max_occurs = MaxOccurs::Unlimited;
        self
    }

    /// Accept a trailing `-` or `+` (`-opt-` / `-opt+`) to switch the option
    /// off or on.
    pub fn vb_style(mut self) -> Self {
        self.vb_style_boolean = true;
        self
    }

    /// Show this option only in the second-level help list.
    pub fn second_level(mut self) -> Self {
        self.second_level_help = true;
        self
    }

    /// The raw description, including any `{placeholder}`.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short_form(&self) -> Option<char> {
        self.short_form
    }

    pub fn long_form(&self) -> Option<&str> {
        self.long_form.as_deref()
    }

    pub fn alternate_form(&self) -> Option<&str> {
        self.alternate_form.as_deref()
    }

    pub fn max_occurs_limit(&self) -> MaxOccurs {
        self.max_occurs
    }

    pub fn is_vb_style_boolean(&self) -> bool {
        self.vb_style_boolean
    }

    pub fn is_second_level_help(&self) -> bool {
        self.second_level_help
    }

    /// The parameter name taken from the `{placeholder}` in the description,
    /// or [`DEFAULT_PARAMETER_NAME`].
    pub fn parameter_name(&self) -> &str {
        self.placeholder().unwrap_or(DEFAULT_PARAMETER_NAME)
    }

    /// The description with the placeholder braces removed.
    pub fn display_description(&self) -> String {
        match self.placeholder() {
            Some(name) => self
                .description
                .replacen(&format!("{{{name}}}"), name, 1),
            None => self.description.clone(),
        }
    }

    /// Normalized `(description, short, long, alternate, max occurs)` tuple.
    pub fn canonical(&self) -> (&str, Option<char>, Option<&str>, Option<&str>, MaxOccurs) {
        (
            self.description(),
            self.short_form,
            self.long_form(),
            self.alternate_form(),
            self.max_occurs,
        )
    }

    fn placeholder(&self) -> Option<&str> {
        let start = self.description.find('{')?;
        let len = self.description[start + 1..].find('}')?;
        let name = &self.description[start + 1..start + 1 + len];
        (!name.is_empty()).then_some(name)
    }
}
