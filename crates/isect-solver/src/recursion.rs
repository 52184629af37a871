//! Depth limiting and iteration bounding for recursive type comparisons.
//!
//! Type expressions are finite trees, so the subtype engine cannot loop on
//! its own; the guard exists to bound adversarial input (very deep nesting,
//! very wide composites compared against each other) and to turn a blow-up
//! into a reportable error instead of a stack overflow.
//!
//! # Profiles
//!
//! [`RecursionProfile`] names the limit presets so call sites carry intent
//! instead of magic numbers:
//!
//! ```ignore
//! let guard = RecursionGuard::with_profile(RecursionProfile::SubtypeCheck);
//! ```

use isect_common::limits;

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Subtype checking between two type expressions.
    ///
    /// depth = 100, iterations = 100,000
    SubtypeCheck,

    /// Custom limits for configured runs or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    /// Maximum recursion depth for this profile.
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::SubtypeCheck => limits::MAX_SUBTYPE_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    /// Maximum iteration count for this profile.
    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::SubtypeCheck => limits::MAX_SUBTYPE_ITERATIONS,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// Maximum recursion depth exceeded.
    DepthExceeded,
    /// Maximum iteration count exceeded.
    IterationExceeded,
}

/// Tracks nesting depth and total work for one top-level computation.
///
/// Every successful [`enter`](Self::enter) must be paired with exactly one
/// [`leave`](Self::leave). [`reset`](Self::reset) starts a fresh budget.
#[derive(Debug, Clone)]
pub struct RecursionGuard {
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl RecursionGuard {
    /// Create a guard with explicit limits.
    ///
    /// Prefer [`with_profile`](Self::with_profile) for standard use cases.
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter one more level of recursion.
    pub fn enter(&mut self) -> RecursionResult {
        // Saturating add prevents overflow with very high max_iterations.
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth {
            return RecursionResult::DepthExceeded;
        }

        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave one level of recursion.
    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "RecursionGuard::leave() called without a matching enter()"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    /// Drop all counters back to zero, keeping the limits.
    pub fn reset(&mut self) {
        self.depth = 0;
        self.iterations = 0;
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
