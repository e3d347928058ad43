//! Depth and work limits for recursive walks over types.
//!
//! Every walk in the solver (compatibility, instantiation, inference,
//! resolution) recurses through nested callable and generic types. Cyclic
//! bindings are a precondition violation of the declaration pass, so instead
//! of tracking visited sets the walks are bounded by a [`RecursionGuard`]:
//! once the depth or the total number of steps exceeds the selected
//! [`RecursionProfile`], the walk reports failure.
//!
//! ```ignore
//! let mut guard = RecursionGuard::with_profile(RecursionProfile::Compatibility);
//! if guard.enter().is_denied() {
//!     return false;
//! }
//! let related = compare_children();
//! guard.leave();
//! related
//! ```

use quill_common::limits;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Structural compatibility of nested callables.
    Compatibility,
    /// Generic instantiation (`initialize_as`).
    Instantiation,
    /// Local closure inference.
    Inference,
    /// Type parameter resolution chains.
    Resolution,
    /// Custom limits for one-off or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::Compatibility => limits::MAX_COMPAT_DEPTH,
            Self::Instantiation => limits::MAX_INSTANTIATION_DEPTH,
            Self::Inference => limits::MAX_INFERENCE_DEPTH,
            Self::Resolution => limits::MAX_RESOLVE_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::Custom { max_iterations, .. } => max_iterations,
            _ => limits::MAX_RELATION_ITERATIONS,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter one more level of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }

    #[inline]
    pub fn is_denied(self) -> bool {
        !self.is_entered()
    }
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks nesting depth and total work of one walk.
///
/// Every successful [`enter`](Self::enter) must be paired with exactly one
/// [`leave`](Self::leave). In debug builds an unbalanced `leave` panics.
#[derive(Debug, Clone)]
pub struct RecursionGuard {
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    exceeded: bool,
}

impl RecursionGuard {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    pub fn enter(&mut self) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            self.exceeded = true;
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return RecursionResult::DepthExceeded;
        }

        self.depth += 1;
        RecursionResult::Entered
    }

    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "RecursionGuard::leave() called without a matching enter()"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` one level deeper, or return the reason entry was denied.
    pub fn scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Result<T, RecursionResult> {
        match self.enter() {
            RecursionResult::Entered => {
                let result = f(self);
                self.leave();
                Ok(result)
            }
            denied => Err(denied),
        }
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether any limit was hit since the guard was created or reset.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    /// Clear all state while keeping the limits.
    pub fn reset(&mut self) {
        self.depth = 0;
        self.iterations = 0;
        self.exceeded = false;
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
