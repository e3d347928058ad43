//! Local inference for closure literals.
//!
//! A closure written without annotations carries unresolved constraints as
//! its parameter and return types. When it appears where a concrete callable
//! type is expected, `infer_to` narrows those placeholders to the expected
//! types:
//!
//! ```text
//! expected: do (Int) -> String
//! closure:  do (x) { x.to_string }       # x: _, returns _
//! inferred: do (x: Int) -> String
//! ```
//!
//! Parameters are paired positionally (receiver skipped). A parameter that
//! already has a concrete type is left as is and counts as satisfied. The
//! return type is only inferred once every parameter succeeded.
//!
//! Inference builds a new callable. The closure it started from is never
//! modified, so a failed attempt leaves nothing half inferred behind.

use crate::callable::CallableType;
use crate::compat::CompatChecker;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::relation_queries::CompatPolicy;
use crate::types::{ObjectType, Type};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

/// Why local inference failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// A parameter placeholder cannot take the expected type.
    #[error("argument {param_index} cannot be inferred as `{expected}`")]
    ParameterNotInferable { param_index: usize, expected: Type },

    /// The return placeholder cannot take the expected type.
    #[error("the return type cannot be inferred as `{expected}`")]
    ReturnNotInferable { expected: Type },

    /// The signatures take a different number of arguments.
    #[error("expected {expected} argument(s), found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Methods are always fully annotated and never inferred.
    #[error("method `{name}` cannot be inferred")]
    MethodNotInferable { name: String },

    /// The types nest deeper than the recursion limit allows.
    #[error("type nesting is too deep to infer")]
    DepthExceeded,
}

/// Performs local inference with one recursion budget.
pub struct ClosureInferrer {
    checker: CompatChecker,
    guard: RecursionGuard,
    policy: CompatPolicy,
}

impl ClosureInferrer {
    pub fn new(policy: CompatPolicy) -> Self {
        Self {
            checker: CompatChecker::with_policy(policy),
            guard: RecursionGuard::with_profile(RecursionProfile::Inference),
            policy,
        }
    }

    /// Infer `closure` towards `expected`, returning the inferred closure.
    pub fn infer_callable(
        &mut self,
        closure: &CallableType,
        expected: &CallableType,
    ) -> Result<CallableType, InferenceError> {
        if closure.is_inferred() {
            return Ok(closure.clone());
        }
        if closure.is_method() {
            return Err(InferenceError::MethodNotInferable {
                name: closure.name.clone(),
            });
        }
        if self.policy.check_inference_arity
            && closure.parameter_count_without_self() != expected.parameter_count_without_self()
        {
            return Err(InferenceError::ArityMismatch {
                expected: expected.parameter_count_without_self(),
                found: closure.parameter_count_without_self(),
            });
        }
        if self.guard.enter().is_denied() {
            return Err(InferenceError::DepthExceeded);
        }
        let result = self.infer_callable_inner(closure, expected);
        self.guard.leave();
        result
    }

    fn infer_callable_inner(
        &mut self,
        closure: &CallableType,
        expected: &CallableType,
    ) -> Result<CallableType, InferenceError> {
        let mut parameters: SmallVec<[(usize, Type); 4]> = SmallVec::new();
        for (param_index, ((_, ours), (_, theirs))) in closure
            .parameters_without_self()
            .zip(expected.parameters_without_self())
            .enumerate()
        {
            let theirs = expected.resolve_real(&theirs.ty);
            match self.infer_type(&ours.ty, &theirs) {
                Some(ty) => parameters.push((param_index, ty)),
                None => {
                    trace!(closure = %closure.name, param_index, expected = %theirs, "parameter not inferable");
                    return Err(InferenceError::ParameterNotInferable {
                        param_index,
                        expected: theirs.into_owned(),
                    });
                }
            }
        }

        let expected_returns = expected.resolved_returns();
        let Some(returns) = self.infer_type(&closure.returns, &expected_returns) else {
            trace!(closure = %closure.name, expected = %expected_returns, "return type not inferable");
            return Err(InferenceError::ReturnNotInferable {
                expected: expected_returns.into_owned(),
            });
        };

        let mut inferred = closure.clone();
        for (param_index, ty) in parameters {
            let slot = inferred.signature_index(param_index);
            if let Some(signature) = inferred.parameter_at_mut(slot) {
                signature.ty = ty;
            }
        }
        inferred.returns = returns;
        inferred.mark_inferred();
        Ok(inferred)
    }

    /// The type `declared` becomes when inferred towards `expected`, or `None`
    /// when that is impossible.
    ///
    /// Concrete types are returned unchanged; only unresolved constraints (at
    /// any depth) are replaced.
    pub fn infer_type(&mut self, declared: &Type, expected: &Type) -> Option<Type> {
        if !declared.contains_unresolved() {
            return Some(declared.clone());
        }

        match (declared, expected) {
            (Type::Unresolved(_), Type::Unresolved(_)) => None,
            (Type::Unresolved(constraint), _) => self
                .checker
                .satisfies_constraint(expected, constraint)
                .then(|| expected.clone()),
            (Type::Optional(inner), Type::Optional(expected_inner)) => self
                .infer_type(inner, expected_inner)
                .map(Type::optional),
            (Type::Optional(inner), _) => self.infer_type(inner, expected).map(Type::optional),
            (Type::Object(object), Type::Object(expected_object))
                if object.name == expected_object.name
                    && object.arguments.len() == expected_object.arguments.len() =>
            {
                let arguments = object
                    .arguments
                    .iter()
                    .zip(&expected_object.arguments)
                    .map(|(ours, theirs)| self.infer_type(ours, theirs))
                    .collect::<Option<Vec<_>>>()?;
                Some(Type::Object(ObjectType {
                    name: object.name.clone(),
                    arguments,
                }))
            }
            (Type::Callable(closure), Type::Callable(expected_callable)) => self
                .infer_callable(closure, expected_callable)
                .ok()
                .map(Type::callable),
            _ => None,
        }
    }
}

impl CallableType {
    /// Infer this closure's unresolved parameter and return types towards
    /// `expected`, using the default policy.
    ///
    /// On success the returned closure has `is_inferred()` set. Inferring an
    /// already inferred closure returns it unchanged.
    pub fn infer_to(&self, expected: &CallableType) -> Result<CallableType, InferenceError> {
        self.infer_to_with_policy(expected, CompatPolicy::default())
    }

    pub fn infer_to_with_policy(
        &self,
        expected: &CallableType,
        policy: CompatPolicy,
    ) -> Result<CallableType, InferenceError> {
        let result = ClosureInferrer::new(policy).infer_callable(self, expected);
        match &result {
            Ok(inferred) => debug!(closure = %inferred, expected = %expected, "inferred closure"),
            Err(error) => debug!(closure = %self, expected = %expected, %error, "closure inference failed"),
        }
        result
    }

    /// Replace `self` with its inferred form. Returns `false`, leaving `self`
    /// untouched, when inference fails.
    pub fn try_infer_to(&mut self, expected: &CallableType) -> bool {
        match self.infer_to(expected) {
            Ok(inferred) => {
                *self = inferred;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod tests;
