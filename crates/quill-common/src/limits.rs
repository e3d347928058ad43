//! Centralized limits and thresholds for the quill compiler.
//!
//! Recursion limits for the callable solver (compatibility checking,
//! generic instantiation, local inference) are selected through
//! `quill_solver::recursion::RecursionProfile`, which reads its values from
//! the constants below.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for structural compatibility checks.
///
/// Each nested callable type (a closure taking a closure returning a closure)
/// adds one level. Cyclic type-parameter bindings are a precondition violation
/// of the declaration pass; this limit turns them into a failed check instead
/// of a stack overflow.
///
/// ```text
/// do (do (do (...) -> A) -> B) -> C
/// ```
pub const MAX_COMPAT_DEPTH: u32 = 100;

/// Maximum nesting depth for generic instantiation (`initialize_as`).
///
/// ```text
/// def map!(T, R)(block: do (T) -> R) -> Array!(R)
/// ```
///
/// Instantiating the above against a concrete callable walks one level per
/// nested parameter type.
pub const MAX_INSTANTIATION_DEPTH: u32 = 50;

/// Maximum nesting depth for local closure inference.
pub const MAX_INFERENCE_DEPTH: u32 = 50;

/// Maximum depth for type-parameter resolution chains (`T -> U -> Int`).
pub const MAX_RESOLVE_DEPTH: u32 = 32;

// =============================================================================
// Operation Counts
// =============================================================================

/// Total work budget for a single top-level relation query.
///
/// Bounds the number of nested comparisons a single `type_compatible` call
/// may perform, independent of depth.
pub const MAX_RELATION_ITERATIONS: u32 = 100_000;
