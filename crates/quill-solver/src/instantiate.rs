//! Generic instantiation of callables.
//!
//! `initialize_as` specializes a generic callable against a concrete one: it
//! walks both signatures side by side and binds every type parameter
//! reference it meets on the generic side to the type found at the same
//! position on the concrete side.
//!
//! ```text
//! generic:  map !(T, R) (do (T) -> R) -> Array!(R)
//! concrete: map         (do (Int) -> String) -> Array!(String)
//! result:   T = Int, R = String
//! ```
//!
//! The walk never mutates its inputs; the bindings land in the type parameter
//! table of a fresh shallow instance.

use crate::callable::CallableType;
use crate::infer::InferenceError;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::relation_queries::CompatPolicy;
use crate::resolve::resolve_real;
use crate::type_params::TypeParameterTable;
use crate::types::Type;
use tracing::{debug, trace};

/// Binds type parameters by matching a generic type against a concrete one.
pub struct TypeInstantiator {
    /// The table bindings are written to.
    table: TypeParameterTable,
    /// Bindings the concrete side is resolved through before matching.
    context: TypeParameterTable,
    guard: RecursionGuard,
}

impl TypeInstantiator {
    pub fn new(table: TypeParameterTable, context: TypeParameterTable) -> Self {
        Self {
            table,
            context,
            guard: RecursionGuard::with_profile(RecursionProfile::Instantiation),
        }
    }

    /// Match `generic` against `concrete`, recording bindings.
    ///
    /// - type parameter reference: bind it, unless it is already bound
    /// - `Optional`, `Object`, `Callable`: recurse into the parts
    /// - anything else: nothing to bind
    pub fn initialize(&mut self, generic: &Type, concrete: &Type) {
        if self.guard.enter().is_denied() {
            trace!("instantiation depth exceeded");
            return;
        }

        let concrete = resolve_real(concrete, &self.context).into_owned();
        match (generic, &concrete) {
            (Type::TypeParameter(reference), _) => {
                let instance = match (&concrete, reference.optional) {
                    (Type::Optional(inner), true) => inner.as_ref().clone(),
                    _ => concrete.clone(),
                };
                self.bind(&reference.name, instance);
            }
            (Type::Optional(inner), Type::Optional(concrete_inner)) => {
                self.initialize(inner, concrete_inner);
            }
            (Type::Optional(inner), _) => self.initialize(inner, &concrete),
            (Type::Object(object), Type::Object(concrete_object))
                if object.name == concrete_object.name =>
            {
                for (ours, theirs) in object.arguments.iter().zip(&concrete_object.arguments) {
                    self.initialize(ours, theirs);
                }
            }
            (Type::Callable(callable), Type::Callable(concrete_callable)) => {
                self.initialize_signature(callable, concrete_callable);
            }
            _ => {}
        }

        self.guard.leave();
    }

    /// Match the non-receiver parameters, return type and (when both declare
    /// one) throw type of two callables.
    pub fn initialize_signature(&mut self, generic: &CallableType, concrete: &CallableType) {
        for ((_, ours), (_, theirs)) in generic
            .parameters_without_self()
            .zip(concrete.parameters_without_self())
        {
            self.initialize(&ours.ty, &theirs.ty);
        }

        self.initialize(&generic.returns, &concrete.returns);

        if let (Some(ours), Some(theirs)) = (&generic.throws, &concrete.throws) {
            self.initialize(ours, theirs);
        }
    }

    fn bind(&mut self, name: &str, instance: Type) {
        if self.table.is_bound(name) || instance.is_unresolved() {
            return;
        }
        if let Type::TypeParameter(reference) = &instance
            && reference.name == name
        {
            return;
        }

        trace!(parameter = name, instance = %instance, "binding type parameter");
        self.table.bind(name, instance);
    }

    pub fn finish(self) -> TypeParameterTable {
        self.table
    }
}

impl CallableType {
    /// Specialize this generic callable against `concrete`.
    ///
    /// Parameters are paired positionally with the receiver skipped on both
    /// sides; the shorter signature bounds the walk. Types on the concrete
    /// side are resolved through `concrete`'s own table and then `context`.
    pub fn initialize_as(
        &self,
        concrete: &CallableType,
        context: &TypeParameterTable,
    ) -> CallableType {
        let mut instance = self.new_shallow_instance(&TypeParameterTable::new());
        let mut instantiator = TypeInstantiator::new(
            instance.type_parameters.clone(),
            concrete.type_parameters.merge(context),
        );
        instantiator.initialize_signature(self, concrete);
        instance.type_parameters = instantiator.finish();

        debug!(callable = %instance, "initialized generic callable");
        instance
    }

    /// [`initialize_as`](Self::initialize_as), honouring the policy's arity
    /// check.
    pub fn initialize_as_with_policy(
        &self,
        concrete: &CallableType,
        context: &TypeParameterTable,
        policy: CompatPolicy,
    ) -> Result<CallableType, InferenceError> {
        if policy.check_inference_arity
            && self.parameter_count_without_self() != concrete.parameter_count_without_self()
        {
            return Err(InferenceError::ArityMismatch {
                expected: concrete.parameter_count_without_self(),
                found: self.parameter_count_without_self(),
            });
        }
        Ok(self.initialize_as(concrete, context))
    }
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
