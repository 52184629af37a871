//! Subtyping engine.
//!
//! Decides `source <: target` for two type expressions. Nominal questions
//! are delegated to a [`ClassRelationOracle`]; the engine itself only
//! decomposes nullable, union and intersection structure.
//!
//! Rule order after the equality shortcut:
//!
//! 1. source union: every arm must be a subtype
//! 2. source nullable: null and the wrapped type must both be subtypes
//! 3. target intersection: the source must satisfy every member
//! 4. target union: the source must fit some arm
//! 5. target nullable: null fits, otherwise compare against the wrapped type
//! 6. source intersection: some member must be a subtype
//! 7. two names: builtin relations, then the oracle
//!
//! Decomposing the universally quantified side first keeps the rules
//! complete for same-shape comparisons: `A|B <: B|A` splits the source
//! before choosing a target arm, and `A&B <: B&A` splits the target before
//! choosing a source member.
//!
//! The checker carries no cache. Each top-level query gets a fresh
//! [`RecursionGuard`] budget, so a checker may be reused and the oracle may
//! re-enter the engine through another checker.

use crate::oracle::{ClassRelationOracle, UnresolvableType};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{Name, TypeExpression};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// What to do when the oracle cannot resolve a class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedTypePolicy {
    /// Propagate [`UnresolvableType`] to the caller.
    #[default]
    Strict,
    /// Treat the relation as "not a subtype".
    Permissive,
}

/// Failure of a subtype query, distinct from a negative answer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubtypeError {
    #[error(transparent)]
    Unresolvable(#[from] UnresolvableType),
    #[error("type comparison exceeded the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: u32 },
    #[error("type comparison exceeded {max_iterations} steps")]
    IterationsExceeded { max_iterations: u32 },
}

impl SubtypeError {
    /// Depth or iteration budget exhausted.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            SubtypeError::DepthExceeded { .. } | SubtypeError::IterationsExceeded { .. }
        )
    }

    /// The class the oracle could not resolve.
    pub fn unresolved_name(&self) -> Option<&Name> {
        match self {
            SubtypeError::Unresolvable(err) => Some(&err.name),
            _ => None,
        }
    }
}

pub type SubtypeResult = Result<bool, SubtypeError>;

/// Subtype checker bound to one oracle.
pub struct SubtypeChecker<'a, O: ClassRelationOracle + ?Sized> {
    pub(crate) oracle: &'a O,
    pub(crate) policy: UnresolvedTypePolicy,
    pub(crate) guard: RecursionGuard,
}

impl<'a, O: ClassRelationOracle + ?Sized> SubtypeChecker<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            policy: UnresolvedTypePolicy::default(),
            guard: RecursionGuard::with_profile(RecursionProfile::SubtypeCheck),
        }
    }

    pub fn with_policy(mut self, policy: UnresolvedTypePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_profile(mut self, profile: RecursionProfile) -> Self {
        self.guard = RecursionGuard::with_profile(profile);
        self
    }

    pub fn policy(&self) -> UnresolvedTypePolicy {
        self.policy
    }

    pub fn oracle(&self) -> &'a O {
        self.oracle
    }

    /// `source <: target`.
    pub fn is_subtype(&mut self, source: &TypeExpression, target: &TypeExpression) -> SubtypeResult {
        self.guard.reset();
        let result = self.check_subtype(source, target);
        trace!(
            source = %source,
            target = %target,
            ?result,
            steps = self.guard.iterations(),
            "is_subtype"
        );
        result
    }

    /// Mutual subtyping.
    pub fn are_equivalent(&mut self, a: &TypeExpression, b: &TypeExpression) -> SubtypeResult {
        Ok(self.is_subtype(a, b)? && self.is_subtype(b, a)?)
    }

    /// One guarded rule application.
    pub(crate) fn check_subtype(
        &mut self,
        source: &TypeExpression,
        target: &TypeExpression,
    ) -> SubtypeResult {
        match self.guard.enter() {
            RecursionResult::Entered => {}
            RecursionResult::DepthExceeded => {
                return Err(SubtypeError::DepthExceeded {
                    max_depth: self.guard.max_depth(),
                });
            }
            RecursionResult::IterationExceeded => {
                return Err(SubtypeError::IterationsExceeded {
                    max_iterations: self.guard.max_iterations(),
                });
            }
        }
        let result = self.check_subtype_inner(source, target);
        self.guard.leave();
        result
    }

    fn check_subtype_inner(
        &mut self,
        source: &TypeExpression,
        target: &TypeExpression,
    ) -> SubtypeResult {
        if source == target {
            return Ok(true);
        }

        match (source, target) {
            (TypeExpression::Union(arms), _) => self.check_union_source(arms, target),
            (TypeExpression::Nullable(inner), _) => self.check_nullable_source(inner, target),
            (_, TypeExpression::Intersection(members)) => {
                self.check_intersection_target(source, members)
            }
            (_, TypeExpression::Union(arms)) => self.check_union_target(source, arms),
            (_, TypeExpression::Nullable(inner)) => self.check_nullable_target(source, inner),
            (TypeExpression::Intersection(members), _) => {
                self.check_intersection_source(members, target)
            }
            (TypeExpression::Named(s), TypeExpression::Named(t)) => self.check_named(s, t),
        }
    }

    /// Ask the oracle, applying the unresolved-type policy.
    pub(crate) fn relate_classes(&mut self, sub: &Name, sup: &Name) -> SubtypeResult {
        let answer = self.oracle.is_subclass_of(sub, sup);
        self.apply_policy(answer, sub, sup)
    }

    /// Any known class is an `object`.
    pub(crate) fn is_known_class(&mut self, name: &Name) -> SubtypeResult {
        let answer = self.oracle.resolve(name).map(|()| true);
        self.apply_policy(answer, name, &Name::new("object"))
    }

    fn apply_policy(
        &self,
        answer: Result<bool, UnresolvableType>,
        sub: &Name,
        sup: &Name,
    ) -> SubtypeResult {
        match answer {
            Ok(answer) => Ok(answer),
            Err(err) => match self.policy {
                UnresolvedTypePolicy::Strict => Err(err.into()),
                UnresolvedTypePolicy::Permissive => {
                    debug!(%sub, %sup, missing = %err.name, "unresolvable class treated as unrelated");
                    Ok(false)
                }
            },
        }
    }
}

/// `source <: target` with a fresh strict checker.
pub fn is_subtype<O: ClassRelationOracle + ?Sized>(
    source: &TypeExpression,
    target: &TypeExpression,
    oracle: &O,
) -> SubtypeResult {
    SubtypeChecker::new(oracle).is_subtype(source, target)
}
