//! Failure reasons for compatibility checks.
//!
//! The compatibility rules are written once, generic over a [`CompatTracer`]:
//!
//! - [`FastTracer`] compiles down to `return false` and never builds a reason.
//!   It backs `type_compatible`, `block_compatible` and `implementation_of`.
//! - [`DiagnosticTracer`] keeps the first [`CompatFailureReason`] it sees.
//!   It backs `explain_failure`.
//!
//! Both paths run the same code, so an explanation always describes the rule
//! that actually rejected the pair.
//!
//! Reasons carry no source location; turning them into user-facing errors is
//! the caller's job.

use crate::types::{CallableKind, Type};
use thiserror::Error;

/// Why a compatibility check failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompatFailureReason {
    /// Two non-callable types are unrelated.
    #[error("type `{source_type}` is not compatible with `{target_type}`")]
    TypeMismatch { source_type: Type, target_type: Type },

    /// The callable kinds cannot be used for one another.
    #[error("a {} cannot be used where a {} is expected", .source_kind.as_str(), .target_kind.as_str())]
    KindMismatch {
        source_kind: CallableKind,
        target_kind: CallableKind,
    },

    /// Exactly one side takes a rest parameter.
    #[error("rest parameter mismatch: source {}, target {}", rest_label(.source_rest), rest_label(.target_rest))]
    RestParameterMismatch { source_rest: bool, target_rest: bool },

    /// Different number of non-receiver parameters.
    #[error("expected {target_count} argument(s), found {source_count}")]
    ParameterCountMismatch {
        source_count: usize,
        target_count: usize,
    },

    /// A positional parameter type is incompatible.
    #[error("argument {param_index} of type `{source_param}` is not compatible with `{target_param}`")]
    ParameterTypeMismatch {
        param_index: usize,
        source_param: Type,
        target_param: Type,
        nested_reason: Option<Box<CompatFailureReason>>,
    },

    /// The source may throw and the target does not allow it.
    #[error("the source throws `{}` but the target does not allow it", display_throws(.source_throws))]
    ThrowTypeMismatch {
        source_throws: Option<Type>,
        target_throws: Option<Type>,
    },

    /// The return types are incompatible.
    #[error("return type `{source_return}` is not compatible with `{target_return}`")]
    ReturnTypeMismatch {
        source_return: Type,
        target_return: Type,
        nested_reason: Option<Box<CompatFailureReason>>,
    },

    /// An implementation check compared two differently named methods.
    #[error("method `{source_name}` does not implement `{target_name}`")]
    NameMismatch {
        source_name: String,
        target_name: String,
    },

    /// The types nest deeper than the recursion limit allows.
    #[error("type nesting is too deep to compare")]
    DepthExceeded,
}

fn rest_label(rest: &bool) -> &'static str {
    if *rest { "has one" } else { "has none" }
}

fn display_throws(throws: &Option<Type>) -> String {
    throws
        .as_ref()
        .map_or_else(|| "nothing".to_string(), ToString::to_string)
}

// =============================================================================
// Tracers
// =============================================================================

/// Receives mismatches detected by the compatibility rules.
pub trait CompatTracer {
    /// Called when a rule rejects a pair.
    ///
    /// `reason` is only invoked by tracers that keep reasons. The return value
    /// is the result the failing rule reports; both tracers return `false`.
    fn on_mismatch(&mut self, reason: impl FnOnce() -> CompatFailureReason) -> bool;
}

/// Tracer for plain boolean checks. Never constructs a reason.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastTracer;

impl CompatTracer for FastTracer {
    #[inline(always)]
    fn on_mismatch(&mut self, _reason: impl FnOnce() -> CompatFailureReason) -> bool {
        false
    }
}

/// Tracer that records the first failure reason.
#[derive(Debug, Default)]
pub struct DiagnosticTracer {
    failure: Option<CompatFailureReason>,
}

impl DiagnosticTracer {
    pub fn new() -> Self {
        Self { failure: None }
    }

    pub fn take_failure(&mut self) -> Option<CompatFailureReason> {
        self.failure.take()
    }

    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }
}

impl CompatTracer for DiagnosticTracer {
    #[inline]
    fn on_mismatch(&mut self, reason: impl FnOnce() -> CompatFailureReason) -> bool {
        if self.failure.is_none() {
            self.failure = Some(reason());
        }
        false
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
