//! Bound options: declarations paired with their live targets.
//!
//! A [`BoundOption`] is created for each registered member when an option
//! table is built. It resolves the forms the option answers to, decides
//! whether the option needs a parameter, matches individual tokens and
//! delivers coerced values to its target.

use log::{debug, trace};

use optbind_core::{
    declaration::MaxOccurs,
    error::{ConfigurationError, Diagnostic, ErrorCode},
    settings::{ParseSettings, ParsingMode},
    value::ValueType,
};

use crate::{
    error::Abandon,
    help::{Help, HelpEntry, prefixes},
    options::Options,
    registry::{Member, Origin},
    target::{BindingTarget, InvokeError, MemberKind},
};

/// Outcome of offering one token to one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingResult {
    /// The token is not a spelling of this option.
    NotThisOption,
    /// The option matched and did not use the next token.
    OptionAlone,
    /// The option matched and consumed the next token as its value.
    OptionConsumedParameter,
}

/// One option of an option table.
pub struct BoundOption<C> {
    member: String,
    short_form: Option<char>,
    long_form: String,
    alternate_form: Option<String>,
    description: String,
    parameter_name: String,
    value_type: ValueType,
    needs_parameter: bool,
    vb_style: bool,
    second_level: bool,
    max_occurs: MaxOccurs,
    occurs: usize,
    split_on_commas: bool,
    mode: ParsingMode,
    pub(crate) next_alternate: Option<usize>,
    origin: Origin,
    target: BindingTarget<C>,
}

impl<C: Options> BoundOption<C> {
    /// Bind a registered member.
    ///
    /// Fails if the member allows several occurrences but cannot hold
    /// several values, or if a colon-qualified form is given to a
    /// non-boolean member.
    pub(crate) fn new(
        member: Member<C>,
        settings: &ParseSettings,
    ) -> Result<Self, ConfigurationError> {
        let Member {
            name,
            declaration,
            target,
            origin,
        } = member;

        let value_type = target.value_type();
        let boolean = value_type.is_boolean();
        let (_, short_form, long_form, alternate_form, max_occurs) = declaration.canonical();
        let long_form = long_form.map_or_else(|| name.clone(), str::to_string);
        let alternate_form = alternate_form.map(str::to_string);

        if !boolean
            && !max_occurs.is_single()
            && !target.is_multi_valued()
            && target.kind() != MemberKind::Callable
        {
            return Err(ConfigurationError::MultipleOccurrencesNeedList {
                member: name,
                max_occurs,
            });
        }

        if !boolean {
            let colon_form = std::iter::once(long_form.as_str())
                .chain(alternate_form.as_deref())
                .find(|form| form.contains(':'));
            if let Some(form) = colon_form {
                return Err(ConfigurationError::ColonFormNotBoolean {
                    form: form.to_string(),
                    member: name,
                });
            }
        }

        let split_on_commas = target.is_multi_valued()
            && !max_occurs.is_single()
            && !settings.dont_split_on_commas();

        Ok(Self {
            short_form,
            long_form,
            alternate_form,
            description: declaration.display_description(),
            parameter_name: declaration.parameter_name().to_string(),
            value_type,
            needs_parameter: !boolean,
            vb_style: declaration.is_vb_style_boolean(),
            second_level: declaration.is_second_level_help(),
            max_occurs,
            occurs: 0,
            split_on_commas,
            mode: settings.mode(),
            next_alternate: None,
            origin,
            target,
            member: name,
        })
    }

    /// Offer `token` (with the token after it, if any) to this option.
    ///
    /// `alternate_claims` tells the option that one of its linked
    /// alternates matches the compound `token:next` form, in which case the
    /// option declines so the alternate can take it.
    pub fn process_argument(
        &mut self,
        config: &mut C,
        token: &str,
        next: Option<&str>,
        alternate_claims: bool,
        help: &mut Help<'_>,
    ) -> Result<ProcessingResult, Abandon> {
        if alternate_claims {
            return Ok(ProcessingResult::NotThisOption);
        }

        let mut name = strip_prefix(token);
        let mut switched_off = false;
        if self.vb_style {
            if let Some(stripped) = name.strip_suffix('-') {
                name = stripped;
                switched_off = true;
            } else if let Some(stripped) = name.strip_suffix('+') {
                name = stripped;
            }
        }

        if self.is_this_option(name) {
            if !self.needs_parameter {
                let value = if switched_off { "false" } else { "true" };
                self.accept(config, value, help)?;
                return Ok(ProcessingResult::OptionAlone);
            }

            return match next {
                Some(value) => {
                    self.accept(config, value, help)?;
                    Ok(ProcessingResult::OptionConsumedParameter)
                }
                None => {
                    let diag = Diagnostic::error(
                        ErrorCode::E101,
                        format!("option {} requires a value", self.display_name()),
                    )
                    .with_help(format!("expected {} ({})", self.parameter_name, self.value_type));
                    config.base_mut().report(diag);
                    Ok(ProcessingResult::OptionAlone)
                }
            };
        }

        if self.matches_compound(token, next) {
            self.accept(config, "true", help)?;
            return Ok(ProcessingResult::OptionConsumedParameter);
        }

        Ok(ProcessingResult::NotThisOption)
    }

    /// Deliver a value from the command line to the target.
    fn accept(&mut self, config: &mut C, raw: &str, help: &mut Help<'_>) -> Result<(), Abandon> {
        let mut values: Vec<&str> = if self.split_on_commas {
            raw.split(',').collect()
        } else {
            vec![raw]
        };

        if self.is_accumulating() {
            let accepted = self.max_occurs.clamp(self.occurs, values.len());
            if accepted < values.len() {
                let dropped = values.split_off(accepted);
                let diag = Diagnostic::warning(
                    ErrorCode::E200,
                    format!(
                        "option {} accepts at most {} values; ignoring {}",
                        self.display_name(),
                        self.max_occurs,
                        dropped
                            .iter()
                            .map(|value| format!("'{value}'"))
                            .collect::<Vec<_>>()
                            .join(", "),
                    ),
                );
                config.base_mut().report(diag);
            }
            self.occurs += accepted;
        } else {
            self.occurs += 1;
            if let Some(limit) = self.max_occurs.limit() {
                self.occurs = self.occurs.min(limit);
            }
            if let BindingTarget::Field(slot) | BindingTarget::Property(slot) = &mut self.target {
                if slot.is_multi_valued() {
                    slot.reset();
                }
            }
        }

        trace!(option = self.long_form.as_str(), values:?; "Accepting option values");

        for value in values {
            let converted = match &mut self.target {
                BindingTarget::Field(slot) | BindingTarget::Property(slot) => slot.stage(value),
                BindingTarget::Callable(callable) => {
                    match callable.invoke(config, value, help) {
                        Ok(()) => Ok(()),
                        Err(InvokeError::Conversion(reason)) => Err(reason),
                        Err(InvokeError::Abandon(abandon)) => {
                            debug!(option = self.long_form.as_str(); "Option abandoned processing");
                            return Err(abandon);
                        }
                    }
                }
            };

            if let Err(reason) = converted {
                let diag = Diagnostic::error(
                    ErrorCode::E100,
                    format!(
                        "cannot convert '{value}' for option {} to {}",
                        self.display_name(),
                        self.value_type,
                    ),
                )
                .with_help(reason);
                config.base_mut().report(diag);
            }
        }

        Ok(())
    }
}

impl<C> BoundOption<C> {
    /// Returns `true` if `name` (with its prefix already removed) is one of
    /// this option's spellings. Colon-qualified forms never match here.
    pub fn is_this_option(&self, name: &str) -> bool {
        if name.is_empty() || name.contains(':') {
            return false;
        }
        let mut chars = name.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if self.short_form == Some(first) {
                return true;
            }
        }
        name == self.long_form || self.alternate_form.as_deref() == Some(name)
    }

    /// Returns `true` if `token:next` spells the long or alternate form.
    pub(crate) fn matches_compound(&self, token: &str, next: Option<&str>) -> bool {
        let Some(next) = next else {
            return false;
        };
        let name = strip_prefix(token);
        let form_matches = |form: &str| {
            form.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix(':'))
                .is_some_and(|rest| rest == next)
        };
        !name.is_empty()
            && (form_matches(&self.long_form)
                || self.alternate_form.as_deref().is_some_and(form_matches))
    }

    /// The base long form this option is an alternate of, if any: the text
    /// before the first `:` of a colon-qualified long or alternate form.
    pub(crate) fn colon_base(&self) -> Option<&str> {
        std::iter::once(self.long_form.as_str())
            .chain(self.alternate_form.as_deref())
            .find_map(|form| form.split_once(':').map(|(base, _)| base))
    }

    /// Write staged values to the target. Called once per parse.
    pub(crate) fn flush(&mut self, config: &mut C) {
        if let BindingTarget::Field(slot) | BindingTarget::Property(slot) = &mut self.target {
            if slot.staged() > 0 {
                slot.flush(config);
            }
        }
    }

    /// Help text for this option.
    pub(crate) fn help_entry(&self) -> HelpEntry {
        HelpEntry {
            short_form: self.short_form,
            long_form: self.long_form.clone(),
            alternate_form: self.alternate_form.clone(),
            parameter: self.needs_parameter.then(|| self.parameter_name.clone()),
            description: self.description.clone(),
            second_level: self.second_level,
            value_type: self.value_type,
            max_occurs: self.max_occurs,
        }
    }

    /// The option as the user would type it, e.g. `--name` or `/name`.
    pub fn display_name(&self) -> String {
        let (_, long_prefix) = prefixes(self.mode);
        format!("{long_prefix}{}", self.long_form)
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn short_form(&self) -> Option<char> {
        self.short_form
    }

    pub fn long_form(&self) -> &str {
        &self.long_form
    }

    pub fn alternate_form(&self) -> Option<&str> {
        self.alternate_form.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn needs_parameter(&self) -> bool {
        self.needs_parameter
    }

    pub fn is_vb_style(&self) -> bool {
        self.vb_style
    }

    pub fn is_second_level(&self) -> bool {
        self.second_level
    }

    pub fn max_occurs(&self) -> MaxOccurs {
        self.max_occurs
    }

    /// How many values (or occurrences) were accepted so far.
    pub fn occurs(&self) -> usize {
        self.occurs
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn kind(&self) -> MemberKind {
        self.target.kind()
    }

    /// Accumulating options count every accepted value against the limit.
    /// Boolean callables are invoked on every occurrence instead.
    fn is_accumulating(&self) -> bool {
        match &self.target {
            BindingTarget::Callable(_) => self.needs_parameter,
            BindingTarget::Field(slot) | BindingTarget::Property(slot) => {
                slot.is_multi_valued() && !self.max_occurs.is_single()
            }
        }
    }
}

/// Remove the leading `-` and `/` characters of an option token.
fn strip_prefix(token: &str) -> &str {
    token.trim_start_matches(['-', '/'])
}
