//! Type parameter resolution.
//!
//! Resolution replaces a type parameter reference with the instance it is
//! bound to in a [`TypeParameterTable`]. Each side of a comparison resolves
//! against its own table; this is a lookup, not a unified substitution.

use crate::callable::CallableType;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::type_params::TypeParameterTable;
use crate::types::Type;
use std::borrow::Cow;
use tracing::trace;

/// Resolve `ty` through `table`.
///
/// - Non-reference types are returned unchanged.
/// - An unbound reference is returned unchanged.
/// - A bound reference yields its instance. When the instance is itself a
///   reference bound in the same table, the chain is followed.
/// - When any reference on the chain was written `?T`, a non-optional
///   instance is wrapped in `Optional`.
pub fn resolve_real<'t>(ty: &'t Type, table: &'t TypeParameterTable) -> Cow<'t, Type> {
    if !ty.is_type_parameter() {
        return Cow::Borrowed(ty);
    }

    let mut guard = RecursionGuard::with_profile(RecursionProfile::Resolution);
    let mut current = ty;
    let mut optional = false;
    while let Type::TypeParameter(inner) = current {
        optional |= inner.optional;
        let Some(instance) = table.instance_of(&inner.name) else {
            break;
        };
        if instance == current || guard.enter().is_denied() {
            trace!(parameter = %inner.name, "stopping type parameter resolution");
            break;
        }
        current = instance;
    }

    let already_optional = match current {
        Type::Optional(_) => true,
        Type::TypeParameter(reference) => reference.optional,
        _ => false,
    };
    if optional && !already_optional {
        return Cow::Owned(Type::optional(current.clone()));
    }
    Cow::Borrowed(current)
}

impl CallableType {
    /// Resolve `ty` through this callable's own type parameter table.
    pub fn resolve_real<'t>(&'t self, ty: &'t Type) -> Cow<'t, Type> {
        resolve_real(ty, &self.type_parameters)
    }

    /// The return type after resolution.
    pub fn resolved_returns(&self) -> Cow<'_, Type> {
        self.resolve_real(&self.returns)
    }

    /// The throw type after resolution, if one is declared.
    pub fn resolved_throws(&self) -> Option<Cow<'_, Type>> {
        self.throws.as_ref().map(|ty| self.resolve_real(ty))
    }
}

#[cfg(test)]
#[path = "../tests/resolve_tests.rs"]
mod tests;
