//! Structural compatibility of callable types.
//!
//! `type_compatible(a, b)` answers "may a value of type `a` be used where `b`
//! is expected". It first applies the kind-agnostic catch-alls (`Dynamic`,
//! `Never`, unresolved constraints), then the per-variant rules, and for two
//! callables falls through to block compatibility:
//!
//! 1. kinds: Closure ~ {Closure, Lambda}, Lambda ~ Lambda, Method ~ Method
//! 2. rest parameter flags are equal
//! 3. non-receiver parameters: same count, pairwise compatible after each side
//!    resolves through its own type parameter table
//! 4. throws: see [`CompatChecker::throws_compatible`]
//! 5. returns: `a`'s resolved return type is compatible with `b`'s
//!
//! `implementation_of` requires equal names and then runs block
//! compatibility on the two methods. The catch-alls never apply to the method
//! pair itself; nested parameter and return types use the ordinary rules.

use crate::callable::CallableType;
use crate::diagnostics::{CompatFailureReason, CompatTracer, DiagnosticTracer, FastTracer};
use crate::recursion::RecursionGuard;
use crate::relation_queries::CompatPolicy;
use crate::types::{Constraint, Type};
use tracing::trace;

/// Checks compatibility between types, with callable pairs compared
/// structurally.
///
/// A checker owns the recursion guard of the walk it performs; reuse one per
/// top-level query, or call [`reset`](Self::reset) in between.
#[derive(Debug, Clone)]
pub struct CompatChecker {
    policy: CompatPolicy,
    guard: RecursionGuard,
}

impl Default for CompatChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatChecker {
    pub fn new() -> Self {
        Self::with_policy(CompatPolicy::default())
    }

    pub fn with_policy(policy: CompatPolicy) -> Self {
        Self {
            policy,
            guard: RecursionGuard::with_profile(policy.recursion),
        }
    }

    pub fn policy(&self) -> CompatPolicy {
        self.policy
    }

    /// Whether a check gave up because the types nest too deeply.
    pub fn depth_exceeded(&self) -> bool {
        self.guard.is_exceeded()
    }

    pub fn reset(&mut self) {
        self.guard.reset();
    }

    // =========================================================================
    // Public predicates
    // =========================================================================

    /// Whether `a` may be used where `b` is expected.
    pub fn type_compatible(&mut self, a: &Type, b: &Type) -> bool {
        self.check_type(a, b, &mut FastTracer)
    }

    /// Structural compatibility of two callables (rules 1-5).
    pub fn block_compatible(&mut self, a: &CallableType, b: &CallableType) -> bool {
        self.check_block(a, b, &mut FastTracer)
    }

    /// Whether method `a` satisfies the trait requirement or parent method `b`.
    pub fn implementation_of(&mut self, a: &CallableType, b: &CallableType) -> bool {
        self.check_implementation(a, b, &mut FastTracer)
    }

    /// Whether `a`'s throw type is acceptable where `b` is expected.
    ///
    /// - `a` declares no throw type: compatible.
    /// - both declare one: `b`'s resolved throw type must be compatible with
    ///   `a`'s.
    /// - only `a` declares one: compatible only when `a` is a closure (unless
    ///   the policy disables that exemption).
    pub fn throws_compatible(&mut self, a: &CallableType, b: &CallableType) -> bool {
        self.check_throws(a, b, &mut FastTracer)
    }

    pub fn returns_compatible(&mut self, a: &CallableType, b: &CallableType) -> bool {
        self.check_returns(a, b, &mut FastTracer)
    }

    pub fn arguments_compatible(&mut self, a: &CallableType, b: &CallableType) -> bool {
        self.check_arguments(a, b, &mut FastTracer)
    }

    pub fn same_kind(&self, a: &CallableType, b: &CallableType) -> bool {
        a.kind().compatible_with(b.kind())
    }

    // =========================================================================
    // Explanations
    // =========================================================================

    /// Why `a` may not be used where `b` is expected, or `None` if it may.
    pub fn explain_failure(&mut self, a: &Type, b: &Type) -> Option<CompatFailureReason> {
        let mut tracer = DiagnosticTracer::new();
        if self.check_type(a, b, &mut tracer) {
            return None;
        }
        Some(tracer.take_failure().unwrap_or_else(|| mismatch(a, b)))
    }

    /// Why callable `a` is not block compatible with `b`, or `None` if it is.
    pub fn explain_block_failure(
        &mut self,
        a: &CallableType,
        b: &CallableType,
    ) -> Option<CompatFailureReason> {
        let mut tracer = DiagnosticTracer::new();
        if self.check_block(a, b, &mut tracer) {
            return None;
        }
        tracer.take_failure()
    }

    /// Why method `a` does not implement `b`, or `None` if it does.
    pub fn explain_implementation_failure(
        &mut self,
        a: &CallableType,
        b: &CallableType,
    ) -> Option<CompatFailureReason> {
        let mut tracer = DiagnosticTracer::new();
        if self.check_implementation(a, b, &mut tracer) {
            return None;
        }
        tracer.take_failure()
    }

    // =========================================================================
    // Rules
    // =========================================================================

    pub(crate) fn check_type<T: CompatTracer>(
        &mut self,
        a: &Type,
        b: &Type,
        tracer: &mut T,
    ) -> bool {
        if a.is_dynamic() || b.is_dynamic() || a.is_never() {
            return true;
        }

        match (a, b) {
            (Type::Unresolved(_), Type::Unresolved(_)) => true,
            (Type::Unresolved(constraint), other) | (other, Type::Unresolved(constraint)) => {
                self.satisfies_constraint(other, constraint)
                    || tracer.on_mismatch(|| mismatch(a, b))
            }
            (Type::TypeParameter(left), Type::TypeParameter(right)) => {
                (left.name == right.name && (!left.optional || right.optional))
                    || tracer.on_mismatch(|| mismatch(a, b))
            }
            // An unbound type parameter is an unconstrained generic slot.
            (Type::TypeParameter(_), _) | (_, Type::TypeParameter(_)) => true,
            (Type::Optional(left), Type::Optional(right)) => {
                self.check_type(left, right, &mut FastTracer)
                    || tracer.on_mismatch(|| mismatch(a, b))
            }
            (_, Type::Optional(right)) => {
                self.check_type(a, right, &mut FastTracer)
                    || tracer.on_mismatch(|| mismatch(a, b))
            }
            (Type::Object(left), Type::Object(right)) => {
                let related = left.name == right.name
                    && left.arguments.len() == right.arguments.len()
                    && left
                        .arguments
                        .iter()
                        .zip(&right.arguments)
                        .all(|(l, r)| self.check_type(l, r, &mut FastTracer));
                related || tracer.on_mismatch(|| mismatch(a, b))
            }
            (Type::Callable(left), Type::Callable(right)) => self.check_block(left, right, tracer),
            _ => tracer.on_mismatch(|| mismatch(a, b)),
        }
    }

    /// Whether `ty` may be inferred into a slot guarded by `constraint`.
    pub(crate) fn satisfies_constraint(&mut self, ty: &Type, constraint: &Constraint) -> bool {
        match &constraint.bound {
            None => true,
            Some(bound) => self.check_type(ty, bound, &mut FastTracer),
        }
    }

    pub(crate) fn check_block<T: CompatTracer>(
        &mut self,
        a: &CallableType,
        b: &CallableType,
        tracer: &mut T,
    ) -> bool {
        if self.guard.enter().is_denied() {
            trace!(source = %a.name, target = %b.name, "compatibility depth exceeded");
            return tracer.on_mismatch(|| CompatFailureReason::DepthExceeded);
        }
        let related = self.check_block_inner(a, b, tracer);
        self.guard.leave();
        related
    }

    fn check_block_inner<T: CompatTracer>(
        &mut self,
        a: &CallableType,
        b: &CallableType,
        tracer: &mut T,
    ) -> bool {
        if !self.same_kind(a, b) {
            trace!(source = %a.name, target = %b.name, "callable kind mismatch");
            return tracer.on_mismatch(|| CompatFailureReason::KindMismatch {
                source_kind: a.kind(),
                target_kind: b.kind(),
            });
        }

        if a.has_rest_parameter() != b.has_rest_parameter() {
            trace!(source = %a.name, target = %b.name, "rest parameter mismatch");
            return tracer.on_mismatch(|| CompatFailureReason::RestParameterMismatch {
                source_rest: a.has_rest_parameter(),
                target_rest: b.has_rest_parameter(),
            });
        }

        self.check_arguments(a, b, tracer)
            && self.check_throws(a, b, tracer)
            && self.check_returns(a, b, tracer)
    }

    fn check_arguments<T: CompatTracer>(
        &mut self,
        a: &CallableType,
        b: &CallableType,
        tracer: &mut T,
    ) -> bool {
        let source_count = a.parameter_count_without_self();
        let target_count = b.parameter_count_without_self();
        if source_count != target_count {
            trace!(source = %a.name, source_count, target_count, "parameter count mismatch");
            return tracer.on_mismatch(|| CompatFailureReason::ParameterCountMismatch {
                source_count,
                target_count,
            });
        }

        for (param_index, ((_, ours), (_, theirs))) in a
            .parameters_without_self()
            .zip(b.parameters_without_self())
            .enumerate()
        {
            let ours = a.resolve_real(&ours.ty);
            let theirs = b.resolve_real(&theirs.ty);
            if self.check_type(&ours, &theirs, &mut FastTracer) {
                continue;
            }

            trace!(source = %a.name, param_index, "parameter type mismatch");
            return tracer.on_mismatch(|| CompatFailureReason::ParameterTypeMismatch {
                param_index,
                source_param: ours.clone().into_owned(),
                target_param: theirs.clone().into_owned(),
                nested_reason: self.explain_nested(&ours, &theirs),
            });
        }

        true
    }

    fn check_throws<T: CompatTracer>(
        &mut self,
        a: &CallableType,
        b: &CallableType,
        tracer: &mut T,
    ) -> bool {
        let related = match (a.resolved_throws(), b.resolved_throws()) {
            (None, _) => true,
            (Some(ours), Some(theirs)) => self.check_type(&theirs, &ours, &mut FastTracer),
            (Some(_), None) => a.is_closure() && self.policy.closure_throw_exemption,
        };

        related || {
            trace!(source = %a.name, target = %b.name, "throw type mismatch");
            tracer.on_mismatch(|| CompatFailureReason::ThrowTypeMismatch {
                source_throws: a.resolved_throws().map(|ty| ty.into_owned()),
                target_throws: b.resolved_throws().map(|ty| ty.into_owned()),
            })
        }
    }

    fn check_returns<T: CompatTracer>(
        &mut self,
        a: &CallableType,
        b: &CallableType,
        tracer: &mut T,
    ) -> bool {
        let ours = a.resolved_returns();
        let theirs = b.resolved_returns();
        if self.check_type(&ours, &theirs, &mut FastTracer) {
            return true;
        }

        trace!(source = %a.name, target = %b.name, "return type mismatch");
        tracer.on_mismatch(|| CompatFailureReason::ReturnTypeMismatch {
            source_return: ours.clone().into_owned(),
            target_return: theirs.clone().into_owned(),
            nested_reason: self.explain_nested(&ours, &theirs),
        })
    }

    fn check_implementation<T: CompatTracer>(
        &mut self,
        a: &CallableType,
        b: &CallableType,
        tracer: &mut T,
    ) -> bool {
        if a.name != b.name {
            return tracer.on_mismatch(|| CompatFailureReason::NameMismatch {
                source_name: a.name.clone(),
                target_name: b.name.clone(),
            });
        }

        self.check_block(a, b, tracer)
    }

    /// Reason for a nested mismatch, only kept when it says more than
    /// "these two types differ".
    fn explain_nested(&mut self, a: &Type, b: &Type) -> Option<Box<CompatFailureReason>> {
        let mut tracer = DiagnosticTracer::new();
        if self.check_type(a, b, &mut tracer) {
            return None;
        }
        match tracer.take_failure() {
            None | Some(CompatFailureReason::TypeMismatch { .. }) => None,
            Some(reason) => Some(Box::new(reason)),
        }
    }
}

fn mismatch(a: &Type, b: &Type) -> CompatFailureReason {
    CompatFailureReason::TypeMismatch {
        source_type: a.clone(),
        target_type: b.clone(),
    }
}

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod tests;
