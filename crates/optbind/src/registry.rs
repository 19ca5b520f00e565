//! Discovery of option members.
//!
//! A configuration type lists its bindable members by registering them with a
//! [`Registry`] in [`Options::declare`](crate::Options::declare). Each
//! registration pairs an [`OptionDeclaration`] with a member accessor, a
//! setter or a method; registration order is the discovery order.
//!
//! Members are registered in one of two scopes. The built-in options are
//! registered in the [`Origin::Inherited`] scope before the type's own
//! declarations, which land in the [`Origin::Declared`] scope. A declared
//! member replaces an inherited member of the same name, and a declared
//! argument processor is preferred over an inherited one.
//!
//! # Example
//!
//! ```
//! # use optbind::{Options, OptionsBase, Registry};
//! # use optbind_core::declaration::OptionDeclaration;
//! #[derive(Default)]
//! struct Cli {
//!     base: OptionsBase,
//!     verbose: bool,
//!     tags: Vec<String>,
//! }
//!
//! impl Options for Cli {
//!     fn base(&self) -> &OptionsBase { &self.base }
//!     fn base_mut(&mut self) -> &mut OptionsBase { &mut self.base }
//!
//!     fn declare(&self, registry: &mut Registry<Self>) {
//!         registry
//!             .field(OptionDeclaration::new("Be chatty").short('v'), "verbose", |c| &mut c.verbose)
//!             .list(OptionDeclaration::new("Add a {tag}").max_occurs(3), "tag", |c| &mut c.tags);
//!     }
//! }
//! ```

use std::fmt;

use optbind_core::{declaration::OptionDeclaration, value::OptionValue};

use crate::{
    error::Abandon,
    target::{
        Action, BindingTarget, Invoke, ListField, ListProperty, Method, ScalarField,
        ScalarProperty,
    },
};

/// The scope a member was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Provided by a shared base, such as the built-in options.
    Inherited,
    /// Declared directly by the configuration type.
    Declared,
}

/// Handler for positional arguments.
pub(crate) type ProcessorFn<C> = Box<dyn FnMut(&mut C, String) -> Result<(), Abandon>>;

/// One registered option member.
pub(crate) struct Member<C> {
    pub(crate) name: String,
    pub(crate) declaration: OptionDeclaration,
    pub(crate) target: BindingTarget<C>,
    pub(crate) origin: Origin,
}

/// One registered argument processor.
pub(crate) struct Processor<C> {
    pub(crate) name: String,
    pub(crate) origin: Origin,
    pub(crate) handler: ProcessorFn<C>,
}

impl<C> fmt::Debug for Processor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Collects the option members of a configuration type.
pub struct Registry<C> {
    members: Vec<Member<C>>,
    processors: Vec<Processor<C>>,
    origin: Origin,
}

impl<C: 'static> Registry<C> {
    pub(crate) fn new() -> Self {
        Self {
            members: Vec::new(),
            processors: Vec::new(),
            origin: Origin::Declared,
        }
    }

    /// Run `declare` with registrations recorded in the inherited scope.
    ///
    /// Use this to share declarations between configuration types while
    /// still letting each type override individual members.
    pub fn inherit(&mut self, declare: impl FnOnce(&mut Self)) -> &mut Self {
        let previous = self.origin;
        self.origin = Origin::Inherited;
        declare(self);
        self.origin = previous;
        self
    }

    /// Bind an option to a scalar field.
    pub fn field<T: OptionValue>(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        accessor: fn(&mut C) -> &mut T,
    ) -> &mut Self {
        let target = BindingTarget::Field(Box::new(ScalarField::new(accessor)));
        self.push(declaration, name, target)
    }

    /// Bind an option to a list field. Each occurrence appends values.
    pub fn list<T: OptionValue>(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        accessor: fn(&mut C) -> &mut Vec<T>,
    ) -> &mut Self {
        let target = BindingTarget::Field(Box::new(ListField::new(accessor)));
        self.push(declaration, name, target)
    }

    /// Bind an option to a scalar setter.
    pub fn property<T: OptionValue>(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        setter: impl FnMut(&mut C, T) + 'static,
    ) -> &mut Self {
        let target = BindingTarget::Property(Box::new(ScalarProperty::new(setter)));
        self.push(declaration, name, target)
    }

    /// Bind an option to a setter receiving every accumulated value.
    pub fn list_property<T: OptionValue>(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        setter: impl FnMut(&mut C, Vec<T>) + 'static,
    ) -> &mut Self {
        let target = BindingTarget::Property(Box::new(ListProperty::new(setter)));
        self.push(declaration, name, target)
    }

    /// Bind an option to a one-argument method, invoked once per value.
    pub fn method<T: OptionValue>(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        method: impl FnMut(&mut C, T) -> Result<(), Abandon> + 'static,
    ) -> &mut Self {
        let target = BindingTarget::Callable(Box::new(Method::new(method)));
        self.push(declaration, name, target)
    }

    /// Bind a boolean option to a zero-argument method, invoked each time
    /// the option is switched on.
    pub fn action(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        action: impl FnMut(&mut C) -> Result<(), Abandon> + 'static,
    ) -> &mut Self {
        let target = BindingTarget::Callable(Box::new(Action::new(action)));
        self.push(declaration, name, target)
    }

    /// Route positional arguments to `handler` instead of the remaining
    /// arguments list.
    pub fn argument_processor(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut C, String) -> Result<(), Abandon> + 'static,
    ) -> &mut Self {
        self.processors.push(Processor {
            name: name.into(),
            origin: self.origin,
            handler: Box::new(handler),
        });
        self
    }

    pub(crate) fn callable(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        callable: Box<dyn Invoke<C>>,
    ) -> &mut Self {
        self.push(declaration, name, BindingTarget::Callable(callable))
    }

    pub(crate) fn into_parts(self) -> (Vec<Member<C>>, Vec<Processor<C>>) {
        (self.members, self.processors)
    }

    fn push(
        &mut self,
        declaration: OptionDeclaration,
        name: impl Into<String>,
        target: BindingTarget<C>,
    ) -> &mut Self {
        self.members.push(Member {
            name: name.into(),
            declaration,
            target,
            origin: self.origin,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Config {
        verbose: bool,
        names: Vec<String>,
    }

    #[test]
    fn test_registration_order_and_origin() {
        let mut registry = Registry::<Config>::new();
        registry
            .inherit(|registry| {
                registry.field(OptionDeclaration::new("Verbose"), "verbose", |c| {
                    &mut c.verbose
                });
            })
            .list(OptionDeclaration::new("Names"), "name", |c| &mut c.names)
            .argument_processor("files", |_, _| Ok(()));

        let (members, processors) = registry.into_parts();

        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["verbose", "name"]);
        assert_eq!(members[0].origin, Origin::Inherited);
        assert_eq!(members[1].origin, Origin::Declared);
        assert_eq!(processors.len(), 1);
        assert_eq!(processors[0].origin, Origin::Declared);
    }
}
