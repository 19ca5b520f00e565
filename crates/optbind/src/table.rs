//! The option table and the main argument pass.
//!
//! An [`OptionTable`] is built from a configuration type once per parse. It
//! binds every registered member, sorts the bound options for matching,
//! links colon-qualified alternates to their base option and snapshots the
//! help entries. [`OptionTable::process`] then walks the normalized tokens,
//! offers each option-looking token to the options in table order and routes
//! everything else to the argument processor or the remaining arguments.

use indexmap::IndexMap;
use log::{debug, info, trace};

use optbind_core::{
    error::ConfigurationError,
    info::ProgramInfo,
    settings::{ParseSettings, ParsingMode},
};

use crate::{
    bound::{BoundOption, ProcessingResult},
    error::Abandon,
    help::{Help, HelpEntry},
    normalize::{NormalizedArgs, normalize_args},
    options::{Options, register_builtins},
    registry::{Member, Origin, Processor, ProcessorFn, Registry},
};

/// The bound options of one configuration type, ready to process arguments.
pub struct OptionTable<C> {
    options: Vec<BoundOption<C>>,
    processor: Option<ProcessorFn<C>>,
    entries: Vec<HelpEntry>,
    info: ProgramInfo,
    settings: ParseSettings,
    banner_shown: bool,
}

impl<C: Options> OptionTable<C> {
    /// Build the table for `config`: the built-in options followed by the
    /// type's own declarations.
    pub fn new(config: &C) -> Result<Self, ConfigurationError> {
        let mut registry = Registry::new();
        registry.inherit(register_builtins);
        config.declare(&mut registry);

        let base = config.base();
        Self::from_registry(registry, *base.settings(), base.program_info().clone())
    }

    fn from_registry(
        registry: Registry<C>,
        settings: ParseSettings,
        info: ProgramInfo,
    ) -> Result<Self, ConfigurationError> {
        let (members, processors) = registry.into_parts();
        let members = resolve_overrides(members)?;
        let processor = select_processor(processors)?;

        let mut options = members
            .into_iter()
            .map(|member| BoundOption::new(member, &settings))
            .collect::<Result<Vec<_>, _>>()?;

        let mode = settings.mode();
        options.sort_by_cached_key(|option| sort_key(option, mode));
        link_alternates(&mut options);

        let entries = options.iter().map(BoundOption::help_entry).collect();

        debug!(options = options.len(), has_processor = processor.is_some(); "Built option table");

        Ok(Self {
            options,
            processor,
            entries,
            info,
            settings,
            banner_shown: false,
        })
    }

    /// Bind `args` to `config` and return the arguments no option consumed.
    pub fn process<S: AsRef<str>>(
        &mut self,
        config: &mut C,
        args: &[S],
    ) -> Result<Vec<String>, Abandon> {
        info!(args = args.len(); "Processing arguments");
        config.base_mut().begin_session(args.is_empty());

        let NormalizedArgs {
            tokens,
            trailing,
            diagnostics,
        } = normalize_args(args, &self.settings, config.base().response_files());
        for diagnostic in diagnostics {
            config.base_mut().report(diagnostic);
        }

        let mode = self.settings.mode();
        let mut index = 0;
        while index < tokens.len() {
            let token = tokens[index].as_str();
            let next = tokens.get(index + 1).map(String::as_str);

            if mode.looks_like_option(token) {
                match self.match_option(config, token, next)? {
                    ProcessingResult::NotThisOption => {
                        trace!(token; "No option matched");
                    }
                    ProcessingResult::OptionAlone => {
                        index += 1;
                        continue;
                    }
                    ProcessingResult::OptionConsumedParameter => {
                        index += 2;
                        continue;
                    }
                }
            }

            self.positional(config, token.to_string())?;
            index += 1;
        }

        for token in trailing {
            self.positional(config, token)?;
        }

        for option in &mut self.options {
            option.flush(config);
        }

        let remaining = config.base().remaining_arguments().to_vec();
        debug!(remaining:?; "Finished processing arguments");
        Ok(remaining)
    }

    /// Offer `token` to every option in table order until one takes it.
    fn match_option(
        &mut self,
        config: &mut C,
        token: &str,
        next: Option<&str>,
    ) -> Result<ProcessingResult, Abandon> {
        let Self {
            options,
            entries,
            info,
            settings,
            banner_shown,
            ..
        } = self;
        let mut help = Help::new(entries, info, settings.mode(), banner_shown);

        for index in 0..options.len() {
            let claims = alternate_claims(options, index, token, next);
            let option = &mut options[index];

            match option.process_argument(config, token, next, claims, &mut help) {
                Ok(ProcessingResult::NotThisOption) => {}
                Ok(result) => {
                    debug!(token, option = option.long_form(); "Matched option");
                    if config.base().is_verbose_parsing() {
                        let line = match result {
                            ProcessingResult::OptionConsumedParameter => format!(
                                "Accepted {} with '{}'",
                                option.display_name(),
                                next.unwrap_or_default()
                            ),
                            _ => format!("Accepted {}", option.display_name()),
                        };
                        config.base_mut().write_lines(&[line]);
                    }
                    return Ok(result);
                }
                Err(abandon) => {
                    if option.origin() == Origin::Declared && abandon.exit_code() != 0 {
                        let lines = help.usage_lines();
                        config.base_mut().write_lines(&lines);
                    }
                    return Err(abandon);
                }
            }
        }

        Ok(ProcessingResult::NotThisOption)
    }

    /// Hand a positional argument to the processor, or keep it.
    fn positional(&mut self, config: &mut C, argument: String) -> Result<(), Abandon> {
        let Some(handler) = self.processor.as_mut() else {
            config.base_mut().push_remaining(argument);
            return Ok(());
        };

        if let Err(abandon) = handler(config, argument) {
            if abandon.exit_code() != 0 {
                let lines = self.help().usage_lines();
                config.base_mut().write_lines(&lines);
            }
            return Err(abandon);
        }
        Ok(())
    }
}

impl<C> OptionTable<C> {
    /// The bound options in matching order.
    pub fn options(&self) -> &[BoundOption<C>] {
        &self.options
    }

    /// A help view over this table.
    pub fn help(&mut self) -> Help<'_> {
        Help::new(
            &self.entries,
            &self.info,
            self.settings.mode(),
            &mut self.banner_shown,
        )
    }
}

/// Drop inherited members replaced by a declared member of the same name.
fn resolve_overrides<C>(members: Vec<Member<C>>) -> Result<Vec<Member<C>>, ConfigurationError> {
    let mut by_name: IndexMap<String, Member<C>> = IndexMap::with_capacity(members.len());

    for member in members {
        match by_name.get(&member.name).map(|existing| existing.origin) {
            None => {
                by_name.insert(member.name.clone(), member);
            }
            Some(Origin::Inherited) if member.origin == Origin::Declared => {
                trace!(member = member.name.as_str(); "Declared member overrides inherited one");
                by_name.insert(member.name.clone(), member);
            }
            Some(Origin::Declared) if member.origin == Origin::Inherited => {}
            Some(_) => {
                return Err(ConfigurationError::DuplicateMember {
                    member: member.name,
                });
            }
        }
    }

    Ok(by_name.into_values().collect())
}

/// Pick the argument processor, preferring a declared one.
fn select_processor<C>(
    processors: Vec<Processor<C>>,
) -> Result<Option<ProcessorFn<C>>, ConfigurationError> {
    for origin in [Origin::Inherited, Origin::Declared] {
        let mut in_scope = processors
            .iter()
            .filter(|processor| processor.origin == origin);
        if let (Some(first), Some(second)) = (in_scope.next(), in_scope.next()) {
            return Err(ConfigurationError::DuplicateArgumentProcessor {
                first: first.name.clone(),
                second: second.name.clone(),
            });
        }
    }

    Ok(processors
        .into_iter()
        .max_by_key(|processor| processor.origin == Origin::Declared)
        .map(|processor| processor.handler))
}

/// Matching order: by upper-cased short form then long form in GNU mode,
/// by long form then short form otherwise. A missing short form sorts as a
/// space.
fn sort_key<C>(option: &BoundOption<C>, mode: ParsingMode) -> (String, String) {
    let short = option.short_form().unwrap_or(' ');
    let long = option.long_form().to_string();
    if mode.is_gnu() {
        (short.to_uppercase().collect(), long)
    } else {
        (long, short.to_string())
    }
}

/// Thread each colon-qualified option onto the chain of its base option.
fn link_alternates<C>(options: &mut [BoundOption<C>]) {
    let mut chains: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (index, option) in options.iter().enumerate() {
        if let Some(base) = option.colon_base() {
            chains.entry(base.to_string()).or_default().push(index);
        }
    }

    for (base, alternates) in chains {
        let Some(base_index) = options
            .iter()
            .position(|option| option.colon_base().is_none() && option.long_form() == base)
        else {
            continue;
        };

        let mut previous = base_index;
        for index in alternates {
            options[previous].next_alternate = Some(index);
            previous = index;
        }
    }
}

/// Returns `true` if an alternate linked to `options[index]` matches the
/// compound `token:next` form.
fn alternate_claims<C>(
    options: &[BoundOption<C>],
    index: usize,
    token: &str,
    next: Option<&str>,
) -> bool {
    let mut cursor = options[index].next_alternate;
    while let Some(alternate) = cursor {
        if options[alternate].matches_compound(token, next) {
            return true;
        }
        cursor = options[alternate].next_alternate;
    }
    false
}
