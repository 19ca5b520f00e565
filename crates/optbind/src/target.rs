//! Binding targets: the members an option writes to.
//!
//! A member of a configuration object is one of three kinds:
//!
//! - a **field**, reached through an accessor returning `&mut T` or
//!   `&mut Vec<T>`;
//! - a **property**, reached through a setter closure;
//! - a **callable**, a method invoked with each value as it is matched.
//!
//! Fields and properties stage coerced values and write them to the
//! configuration object once, after every argument has been processed.
//! Callables are invoked immediately and may abandon the parse.

use std::{fmt, mem};

use optbind_core::value::{OptionValue, ValueType};

use crate::{error::Abandon, help::Help};

/// The kind of member an option is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Callable,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Property => write!(f, "property"),
            MemberKind::Callable => write!(f, "method"),
        }
    }
}

/// A member that stores values: a field or a property.
pub(crate) trait Slot<C> {
    fn value_type(&self) -> ValueType;

    /// Returns `true` if the member holds a list of values.
    fn is_multi_valued(&self) -> bool;

    /// Coerce `raw` and stage it. Scalars replace the staged value, lists
    /// append to it.
    fn stage(&mut self, raw: &str) -> Result<(), String>;

    /// Discard staged values.
    fn reset(&mut self);

    /// Number of values currently staged.
    fn staged(&self) -> usize;

    /// Move staged values into the configuration object.
    fn flush(&mut self, config: &mut C);
}

/// Why a callable did not complete.
#[derive(Debug)]
pub(crate) enum InvokeError {
    /// The raw value could not be converted to the parameter type.
    Conversion(String),
    /// The callable asked to stop processing.
    Abandon(Abandon),
}

/// A member that is invoked with each value.
pub(crate) trait Invoke<C> {
    fn value_type(&self) -> ValueType;

    fn invoke(
        &mut self,
        config: &mut C,
        raw: &str,
        help: &mut Help<'_>,
    ) -> Result<(), InvokeError>;
}

/// The member an option binds to.
pub(crate) enum BindingTarget<C> {
    Field(Box<dyn Slot<C>>),
    Property(Box<dyn Slot<C>>),
    Callable(Box<dyn Invoke<C>>),
}

impl<C> BindingTarget<C> {
    pub(crate) fn kind(&self) -> MemberKind {
        match self {
            BindingTarget::Field(_) => MemberKind::Field,
            BindingTarget::Property(_) => MemberKind::Property,
            BindingTarget::Callable(_) => MemberKind::Callable,
        }
    }

    pub(crate) fn value_type(&self) -> ValueType {
        match self {
            BindingTarget::Field(slot) | BindingTarget::Property(slot) => slot.value_type(),
            BindingTarget::Callable(callable) => callable.value_type(),
        }
    }

    pub(crate) fn is_multi_valued(&self) -> bool {
        match self {
            BindingTarget::Field(slot) | BindingTarget::Property(slot) => slot.is_multi_valued(),
            BindingTarget::Callable(_) => false,
        }
    }
}

pub(crate) struct ScalarField<C, T> {
    accessor: fn(&mut C) -> &mut T,
    pending: Option<T>,
}

impl<C, T> ScalarField<C, T> {
    pub(crate) fn new(accessor: fn(&mut C) -> &mut T) -> Self {
        Self {
            accessor,
            pending: None,
        }
    }
}

impl<C, T: OptionValue> Slot<C> for ScalarField<C, T> {
    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn is_multi_valued(&self) -> bool {
        false
    }

    fn stage(&mut self, raw: &str) -> Result<(), String> {
        self.pending = Some(T::parse_value(raw)?);
        Ok(())
    }

    fn reset(&mut self) {
        self.pending = None;
    }

    fn staged(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    fn flush(&mut self, config: &mut C) {
        if let Some(value) = self.pending.take() {
            *(self.accessor)(config) = value;
        }
    }
}

pub(crate) struct ListField<C, T> {
    accessor: fn(&mut C) -> &mut Vec<T>,
    pending: Vec<T>,
}

impl<C, T> ListField<C, T> {
    pub(crate) fn new(accessor: fn(&mut C) -> &mut Vec<T>) -> Self {
        Self {
            accessor,
            pending: Vec::new(),
        }
    }
}

impl<C, T: OptionValue> Slot<C> for ListField<C, T> {
    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn is_multi_valued(&self) -> bool {
        true
    }

    fn stage(&mut self, raw: &str) -> Result<(), String> {
        self.pending.push(T::parse_value(raw)?);
        Ok(())
    }

    fn reset(&mut self) {
        self.pending.clear();
    }

    fn staged(&self) -> usize {
        self.pending.len()
    }

    fn flush(&mut self, config: &mut C) {
        if !self.pending.is_empty() {
            *(self.accessor)(config) = mem::take(&mut self.pending);
        }
    }
}

pub(crate) struct ScalarProperty<C, T> {
    setter: Box<dyn FnMut(&mut C, T)>,
    pending: Option<T>,
}

impl<C, T> ScalarProperty<C, T> {
    pub(crate) fn new(setter: impl FnMut(&mut C, T) + 'static) -> Self {
        Self {
            setter: Box::new(setter),
            pending: None,
        }
    }
}

impl<C, T: OptionValue> Slot<C> for ScalarProperty<C, T> {
    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn is_multi_valued(&self) -> bool {
        false
    }

    fn stage(&mut self, raw: &str) -> Result<(), String> {
        self.pending = Some(T::parse_value(raw)?);
        Ok(())
    }

    fn reset(&mut self) {
        self.pending = None;
    }

    fn staged(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    fn flush(&mut self, config: &mut C) {
        if let Some(value) = self.pending.take() {
            (self.setter)(config, value);
        }
    }
}

pub(crate) struct ListProperty<C, T> {
    setter: Box<dyn FnMut(&mut C, Vec<T>)>,
    pending: Vec<T>,
}

impl<C, T> ListProperty<C, T> {
    pub(crate) fn new(setter: impl FnMut(&mut C, Vec<T>) + 'static) -> Self {
        Self {
            setter: Box::new(setter),
            pending: Vec::new(),
        }
    }
}

impl<C, T: OptionValue> Slot<C> for ListProperty<C, T> {
    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn is_multi_valued(&self) -> bool {
        true
    }

    fn stage(&mut self, raw: &str) -> Result<(), String> {
        self.pending.push(T::parse_value(raw)?);
        Ok(())
    }

    fn reset(&mut self) {
        self.pending.clear();
    }

    fn staged(&self) -> usize {
        self.pending.len()
    }

    fn flush(&mut self, config: &mut C) {
        if !self.pending.is_empty() {
            (self.setter)(config, mem::take(&mut self.pending));
        }
    }
}

/// A one-argument method.
pub(crate) struct Method<C, T> {
    method: Box<dyn FnMut(&mut C, T) -> Result<(), Abandon>>,
}

impl<C, T> Method<C, T> {
    pub(crate) fn new(method: impl FnMut(&mut C, T) -> Result<(), Abandon> + 'static) -> Self {
        Self {
            method: Box::new(method),
        }
    }
}

impl<C, T: OptionValue> Invoke<C> for Method<C, T> {
    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn invoke(
        &mut self,
        config: &mut C,
        raw: &str,
        _help: &mut Help<'_>,
    ) -> Result<(), InvokeError> {
        let value = T::parse_value(raw).map_err(InvokeError::Conversion)?;
        (self.method)(config, value).map_err(InvokeError::Abandon)
    }
}

/// A zero-argument method. Behaves as a boolean option that runs the
/// method when switched on.
pub(crate) struct Action<C> {
    action: Box<dyn FnMut(&mut C) -> Result<(), Abandon>>,
}

impl<C> Action<C> {
    pub(crate) fn new(action: impl FnMut(&mut C) -> Result<(), Abandon> + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl<C> Invoke<C> for Action<C> {
    fn value_type(&self) -> ValueType {
        ValueType::BOOLEAN
    }

    fn invoke(
        &mut self,
        config: &mut C,
        raw: &str,
        _help: &mut Help<'_>,
    ) -> Result<(), InvokeError> {
        if bool::parse_value(raw).map_err(InvokeError::Conversion)? {
            (self.action)(config).map_err(InvokeError::Abandon)?;
        }
        Ok(())
    }
}
