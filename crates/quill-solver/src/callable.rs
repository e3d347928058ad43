//! Callable types: closures, lambdas and methods.
//!
//! A [`CallableType`] is built incrementally by the declaration pass through
//! the `define_*` operations, then compared, specialized and inferred by the
//! rest of the solver. All derived callables (generic instances, the `call`
//! view of a closure, inferred closures) come from [`CallableType::specialize`],
//! which never touches the callable it starts from.

use crate::signature::{Signature, SignatureTable};
use crate::type_params::TypeParameterTable;
use crate::types::{CallableFlags, CallableKind, Type};
use quill_common::names;
use smallvec::SmallVec;
use std::ops::RangeInclusive;

/// The statically checked type of a closure, lambda or method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableType {
    /// Identity and diagnostic name. Methods are looked up by it.
    pub name: String,
    kind: CallableKind,
    parameters: SignatureTable,
    /// Required parameters, receiver included.
    required_count: usize,
    has_receiver: bool,
    /// Never unset; a callable without an annotation returns `Dynamic`.
    pub returns: Type,
    pub throws: Option<Type>,
    pub type_parameters: TypeParameterTable,
    /// Members synthesized for this callable, such as its `call` view.
    pub attributes: SignatureTable,
    flags: CallableFlags,
}

/// How the type parameter table of a specialized callable is derived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeParameterOverride {
    /// Keep the original table.
    #[default]
    Keep,
    /// Overlay the original table with these entries (they win collisions).
    Merge(TypeParameterTable),
    /// Use this table instead of the original.
    Replace(TypeParameterTable),
}

/// Changes applied by [`CallableType::specialize`]. Anything left at its
/// default is copied from the original callable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Specialization {
    pub name: Option<String>,
    pub kind: Option<CallableKind>,
    pub type_parameters: TypeParameterOverride,
    /// Start from an empty attribute table.
    pub clear_attributes: bool,
}

impl Specialization {
    pub fn merging(extra: TypeParameterTable) -> Self {
        Specialization {
            type_parameters: TypeParameterOverride::Merge(extra),
            ..Specialization::default()
        }
    }
}

impl CallableType {
    pub fn new(name: impl Into<String>, kind: CallableKind) -> Self {
        CallableType {
            name: name.into(),
            kind,
            parameters: SignatureTable::new(),
            required_count: 0,
            has_receiver: false,
            returns: Type::Dynamic,
            throws: None,
            type_parameters: TypeParameterTable::new(),
            attributes: SignatureTable::new(),
            flags: CallableFlags::empty(),
        }
    }

    pub fn closure() -> Self {
        Self::new(names::CLOSURE, CallableKind::Closure)
    }

    pub fn lambda() -> Self {
        Self::new(names::LAMBDA, CallableKind::Lambda)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, CallableKind::Method)
    }

    pub fn with_returns(mut self, returns: Type) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_throws(mut self, throws: Type) -> Self {
        self.throws = Some(throws);
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.define(name);
        self
    }

    // =========================================================================
    // Signature construction
    // =========================================================================

    /// Define the implicit receiver.
    ///
    /// The receiver is always stored first, even when other parameters were
    /// defined before it. Defining it again only replaces its type.
    pub fn define_self_argument(&mut self, receiver: Type) {
        if self.has_receiver {
            self.parameters.define(names::SELF_ARGUMENT, receiver, false);
            return;
        }
        self.parameters.define_first(names::SELF_ARGUMENT, receiver, false);
        self.required_count += 1;
        self.has_receiver = true;
    }

    /// Define a required parameter. Redefining a name replaces its type in
    /// place and leaves the required count alone.
    pub fn define_required_argument(
        &mut self,
        name: impl Into<String>,
        ty: Type,
        mutable: bool,
    ) -> usize {
        let name = name.into();
        if !self.parameters.contains(&name) {
            self.required_count += 1;
        }
        self.parameters.define(name, ty, mutable)
    }

    /// Define a parameter with a default value.
    pub fn define_argument(&mut self, name: impl Into<String>, ty: Type, mutable: bool) -> usize {
        self.parameters.define(name, ty, mutable)
    }

    /// Define the rest parameter. It must be the last parameter defined.
    pub fn define_rest_argument(
        &mut self,
        name: impl Into<String>,
        ty: Type,
        mutable: bool,
    ) -> usize {
        self.flags.insert(CallableFlags::REST_PARAMETER);
        self.parameters.define(name, ty, mutable)
    }

    /// Synthesize the `call` member that invokes this callable as a method.
    ///
    /// The member is a Method-kind copy with empty type parameter and
    /// attribute tables. It is stored in `attributes` and returned.
    pub fn define_call_method(&mut self) -> CallableType {
        let call = self.specialize(Specialization {
            name: Some(names::CALL_METHOD.to_string()),
            kind: Some(CallableKind::Method),
            type_parameters: TypeParameterOverride::Replace(TypeParameterTable::new()),
            clear_attributes: true,
        });
        self.attributes
            .define(names::CALL_METHOD, Type::callable(call.clone()), false);
        call
    }

    // =========================================================================
    // Specialization
    // =========================================================================

    /// Derive a new callable from this one. `self` is left untouched.
    pub fn specialize(&self, overrides: Specialization) -> CallableType {
        let type_parameters = match overrides.type_parameters {
            TypeParameterOverride::Keep => self.type_parameters.clone(),
            TypeParameterOverride::Merge(extra) => self.type_parameters.merge(&extra),
            TypeParameterOverride::Replace(table) => table,
        };
        let attributes = if overrides.clear_attributes {
            SignatureTable::new()
        } else {
            self.attributes.clone()
        };

        CallableType {
            name: overrides.name.unwrap_or_else(|| self.name.clone()),
            kind: overrides.kind.unwrap_or(self.kind),
            parameters: self.parameters.clone(),
            required_count: self.required_count,
            has_receiver: self.has_receiver,
            returns: self.returns.clone(),
            throws: self.throws.clone(),
            type_parameters,
            attributes,
            flags: self.flags,
        }
    }

    /// A copy whose type parameter table is `merge(self.type_parameters, extra)`.
    pub fn new_shallow_instance(&self, extra: &TypeParameterTable) -> CallableType {
        self.specialize(Specialization::merging(extra.clone()))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    #[inline]
    pub fn is_closure(&self) -> bool {
        self.kind == CallableKind::Closure
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        self.kind == CallableKind::Method
    }

    #[inline]
    pub fn has_rest_parameter(&self) -> bool {
        self.flags.contains(CallableFlags::REST_PARAMETER)
    }

    /// Whether local inference has completed. Only meaningful for closures.
    #[inline]
    pub fn is_inferred(&self) -> bool {
        self.flags.contains(CallableFlags::INFERRED)
    }

    pub(crate) fn mark_inferred(&mut self) {
        self.flags.insert(CallableFlags::INFERRED);
    }

    #[inline]
    pub fn captures(&self) -> bool {
        self.flags.contains(CallableFlags::CAPTURES)
    }

    pub fn set_captures(&mut self, captures: bool) {
        self.flags.set(CallableFlags::CAPTURES, captures);
    }

    #[inline]
    pub fn flags(&self) -> CallableFlags {
        self.flags
    }

    #[inline]
    pub fn has_receiver(&self) -> bool {
        self.has_receiver
    }

    pub fn parameters(&self) -> &SignatureTable {
        &self.parameters
    }

    pub(crate) fn parameter_at_mut(&mut self, index: usize) -> Option<&mut Signature> {
        self.parameters.at_mut(index)
    }

    pub fn parameter(&self, name: &str) -> Option<&Signature> {
        self.parameters.get(name)
    }

    /// The parameter at `index`, counting the receiver.
    pub fn parameter_at(&self, index: usize) -> Option<(&str, &Signature)> {
        self.parameters.at(index)
    }

    /// Type of the last declared parameter; the element type of the rest
    /// parameter when there is one.
    pub fn last_parameter_type(&self) -> Option<&Type> {
        self.parameters.last().map(|(_, signature)| &signature.ty)
    }

    #[inline]
    fn receiver_offset(&self) -> usize {
        usize::from(self.has_receiver)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameter_count_without_self(&self) -> usize {
        self.parameters.len() - self.receiver_offset()
    }

    pub fn required_count(&self) -> usize {
        self.required_count
    }

    pub fn required_count_without_self(&self) -> usize {
        self.required_count - self.receiver_offset()
    }

    /// Parameters excluding the receiver, in declaration order.
    pub fn parameters_without_self(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.parameters.iter().skip(self.receiver_offset())
    }

    pub fn parameter_types_without_self(&self) -> SmallVec<[&Type; 4]> {
        self.parameters_without_self()
            .map(|(_, signature)| &signature.ty)
            .collect()
    }

    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.parameters_without_self().map(|(name, _)| name)
    }

    /// Index into the signature table of the `index`th non-receiver parameter.
    #[inline]
    pub(crate) fn signature_index(&self, index: usize) -> usize {
        index + self.receiver_offset()
    }

    /// Accepted number of call arguments, ignoring any rest parameter.
    pub fn argument_count_range(&self) -> RangeInclusive<usize> {
        self.required_count_without_self()..=self.parameter_count_without_self()
    }

    /// Whether a call passing `given` arguments is well formed.
    pub fn valid_number_of_arguments(&self, given: usize) -> bool {
        let range = self.argument_count_range();
        range.contains(&given) || (given > *range.end() && self.has_rest_parameter())
    }

    /// The type a call argument at `index` (receiver excluded) must satisfy.
    ///
    /// Arguments past the declared parameters are typed by the rest parameter.
    pub fn type_for_argument(&self, index: usize) -> Option<&Type> {
        if let Some((_, signature)) = self.parameters.at(self.signature_index(index)) {
            return Some(&signature.ty);
        }
        if self.has_rest_parameter() {
            return self.last_parameter_type();
        }
        None
    }

    /// Whether any parameter, return or throw type still holds an unresolved
    /// constraint.
    pub fn contains_unresolved(&self) -> bool {
        self.parameters.types().any(Type::contains_unresolved)
            || self.returns.contains_unresolved()
            || self.throws.as_ref().is_some_and(Type::contains_unresolved)
    }
}

#[cfg(test)]
#[path = "../tests/callable_tests.rs"]
mod tests;
