//! Unified relation query entrypoints.
//!
//! Checker code asks "is A related to B" through [`query_relation`] instead of
//! configuring a [`CompatChecker`] at every call site. The [`CompatPolicy`]
//! passed along carries the knobs that differ between callers.

use crate::compat::CompatChecker;
use crate::recursion::RecursionProfile;
use crate::types::Type;
use tracing::debug;

/// Relation categories supported by the unified query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Assignment compatibility: may the source be used where the target is
    /// expected.
    Compatible,
    /// The source method implements (or overrides) the target method.
    Implementation,
}

/// Policy knobs for relation checks.
///
/// The default reproduces the established rules exactly; the knobs only ever
/// make checks stricter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatPolicy {
    /// A closure declaring a throw type stays compatible with a target that
    /// declares none. Lambdas and methods never get this exemption.
    pub closure_throw_exemption: bool,
    /// Require equal non-receiver parameter counts before local inference and
    /// generic instantiation pair parameters positionally.
    pub check_inference_arity: bool,
    /// Depth and work limits for the recursive walks.
    pub recursion: RecursionProfile,
}

impl Default for CompatPolicy {
    fn default() -> Self {
        Self {
            closure_throw_exemption: true,
            check_inference_arity: false,
            recursion: RecursionProfile::Compatibility,
        }
    }
}

impl CompatPolicy {
    pub fn with_closure_throw_exemption(mut self, exempt: bool) -> Self {
        self.closure_throw_exemption = exempt;
        self
    }

    pub fn with_inference_arity_check(mut self, check: bool) -> Self {
        self.check_inference_arity = check;
        self
    }

    pub fn with_recursion_profile(mut self, profile: RecursionProfile) -> Self {
        self.recursion = profile;
        self
    }
}

/// Result of a relation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationResult {
    pub kind: RelationKind,
    pub related: bool,
    /// The check gave up because the types nest too deeply.
    pub depth_exceeded: bool,
}

impl RelationResult {
    #[inline]
    pub fn is_related(self) -> bool {
        self.related
    }
}

/// Query a relation between two types.
///
/// `Implementation` only relates two callables; any other pair is unrelated.
pub fn query_relation(
    source: &Type,
    target: &Type,
    kind: RelationKind,
    policy: CompatPolicy,
) -> RelationResult {
    let mut checker = CompatChecker::with_policy(policy);
    let related = match kind {
        RelationKind::Compatible => checker.type_compatible(source, target),
        RelationKind::Implementation => match (source.as_callable(), target.as_callable()) {
            (Some(source), Some(target)) => checker.implementation_of(source, target),
            _ => false,
        },
    };

    debug!(?kind, related, source = %source, target = %target, "relation query");

    RelationResult {
        kind,
        related,
        depth_exceeded: checker.depth_exceeded(),
    }
}

#[cfg(test)]
#[path = "../tests/relation_queries_tests.rs"]
mod tests;
