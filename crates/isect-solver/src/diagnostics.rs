//! Structured subtype failure reasons.
//!
//! Produced by [`SubtypeChecker::explain`](crate::SubtypeChecker::explain)
//! after a check has failed. Each variant names the rule that rejected the
//! pair and, where the rule decomposes a composite, the member that failed.

use crate::format::render;
use crate::types::{Name, TypeExpression};
use serde::Serialize;
use std::fmt;

/// Why `source <: target` does not hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubtypeFailureReason {
    /// Two names with no nominal relation.
    NotNominalSubtype { source: Name, target: Name },
    /// The source does not satisfy one member of a target intersection.
    MissingIntersectionMember {
        member: TypeExpression,
        nested: Option<Box<SubtypeFailureReason>>,
    },
    /// One arm of a source union is not assignable to the target.
    UnionArmNotAssignable {
        arm: TypeExpression,
        nested: Option<Box<SubtypeFailureReason>>,
    },
    /// The source fits no arm of a target union.
    NoMatchingUnionArm {
        source: TypeExpression,
        target: TypeExpression,
    },
    /// No member of a source intersection is assignable to the target.
    NoIntersectionMemberSatisfies {
        source: TypeExpression,
        target: TypeExpression,
    },
    /// A nullable source against a target that rejects null.
    NullNotAccepted { target: TypeExpression },
}

impl SubtypeFailureReason {
    /// The composite member the failure is about, if the rule decomposed one.
    ///
    /// For a missing intersection member this is the constraint the source
    /// lacks; for a union arm it is the arm that does not fit.
    pub fn offending_member(&self) -> Option<&TypeExpression> {
        match self {
            SubtypeFailureReason::MissingIntersectionMember { member, .. } => Some(member),
            SubtypeFailureReason::UnionArmNotAssignable { arm, .. } => Some(arm),
            _ => None,
        }
    }

    /// The innermost reason along the `nested` chain.
    pub fn root_cause(&self) -> &SubtypeFailureReason {
        match self {
            SubtypeFailureReason::MissingIntersectionMember {
                nested: Some(inner),
                ..
            }
            | SubtypeFailureReason::UnionArmNotAssignable {
                nested: Some(inner),
                ..
            } => inner.root_cause(),
            _ => self,
        }
    }
}

impl fmt::Display for SubtypeFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtypeFailureReason::NotNominalSubtype { source, target } => {
                write!(f, "{source} is not a subtype of {target}")
            }
            SubtypeFailureReason::MissingIntersectionMember { member, .. } => {
                write!(f, "missing intersection member {}", render(member))
            }
            SubtypeFailureReason::UnionArmNotAssignable { arm, .. } => {
                write!(f, "union member {} is not assignable", render(arm))
            }
            SubtypeFailureReason::NoMatchingUnionArm { source, target } => {
                write!(
                    f,
                    "{} matches no member of {}",
                    render(source),
                    render(target)
                )
            }
            SubtypeFailureReason::NoIntersectionMemberSatisfies { source, target } => {
                write!(
                    f,
                    "no member of {} is a subtype of {}",
                    render(source),
                    render(target)
                )
            }
            SubtypeFailureReason::NullNotAccepted { target } => {
                write!(f, "{} does not accept null", render(target))
            }
        }
    }
}
