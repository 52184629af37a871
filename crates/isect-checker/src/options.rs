use isect_common::limits;
use isect_solver::{RecursionProfile, UnresolvedTypePolicy};
use serde::{Deserialize, Serialize};

/// Options for a checking run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerOptions {
    /// How relation queries on classes that are not available are answered.
    pub unresolved_policy: UnresolvedTypePolicy,
    /// Warn about `callable` as an intersection member.
    pub lint_callable_members: bool,
    pub max_subtype_depth: u32,
    pub max_subtype_iterations: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            unresolved_policy: UnresolvedTypePolicy::Strict,
            lint_callable_members: true,
            max_subtype_depth: limits::MAX_SUBTYPE_DEPTH,
            max_subtype_iterations: limits::MAX_SUBTYPE_ITERATIONS,
        }
    }
}

impl CheckerOptions {
    /// Treat classes that are not available as unrelated instead of failing.
    pub fn permissive(mut self) -> Self {
        self.unresolved_policy = UnresolvedTypePolicy::Permissive;
        self
    }

    /// Recursion limits for subtype queries.
    pub fn subtype_profile(&self) -> RecursionProfile {
        if self.max_subtype_depth == limits::MAX_SUBTYPE_DEPTH
            && self.max_subtype_iterations == limits::MAX_SUBTYPE_ITERATIONS
        {
            RecursionProfile::SubtypeCheck
        } else {
            RecursionProfile::Custom {
                max_depth: self.max_subtype_depth,
                max_iterations: self.max_subtype_iterations,
            }
        }
    }
}
