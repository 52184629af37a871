//! Failure explanation for subtype checks.
//!
//! The "slow path": after a check has failed, re-walk the same rules and
//! record which one rejected the pair. A sub-query that fails to resolve a
//! class is inconclusive and skipped when looking for the failing member.
//! Running out of budget during the walk aborts the explanation with the
//! limit error.

use crate::diagnostics::SubtypeFailureReason;
use crate::oracle::ClassRelationOracle;
use crate::subtype::{SubtypeChecker, SubtypeError};
use crate::subtype_rules::accepts_null;
use crate::types::TypeExpression;
use serde::Serialize;

/// Outcome of [`SubtypeChecker::explain`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubtypeJudgment {
    pub is_subtype: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SubtypeFailureReason>,
}

impl SubtypeJudgment {
    pub fn holds() -> Self {
        Self {
            is_subtype: true,
            reason: None,
        }
    }

    pub fn fails(reason: SubtypeFailureReason) -> Self {
        Self {
            is_subtype: false,
            reason: Some(reason),
        }
    }
}

impl<'a, O: ClassRelationOracle + ?Sized> SubtypeChecker<'a, O> {
    /// Check `source <: target` and, on failure, say why.
    pub fn explain(
        &mut self,
        source: &TypeExpression,
        target: &TypeExpression,
    ) -> Result<SubtypeJudgment, SubtypeError> {
        if self.is_subtype(source, target)? {
            return Ok(SubtypeJudgment::holds());
        }
        self.guard.reset();
        Ok(SubtypeJudgment::fails(
            self.explain_failure(source, target)?,
        ))
    }

    /// `Ok(true)` when `source <: target` definitely does not hold.
    fn fails(
        &mut self,
        source: &TypeExpression,
        target: &TypeExpression,
    ) -> Result<bool, SubtypeError> {
        match self.check_subtype(source, target) {
            Ok(holds) => Ok(!holds),
            Err(err) if err.is_limit() => Err(err),
            Err(_) => Ok(false),
        }
    }

    fn explain_failure(
        &mut self,
        source: &TypeExpression,
        target: &TypeExpression,
    ) -> Result<SubtypeFailureReason, SubtypeError> {
        let reason = match (source, target) {
            (TypeExpression::Union(arms), _) => {
                let mut failing = None;
                for arm in arms {
                    if self.fails(arm, target)? {
                        failing = Some(arm);
                        break;
                    }
                }
                match failing {
                    Some(arm) => SubtypeFailureReason::UnionArmNotAssignable {
                        arm: arm.clone(),
                        nested: self.nested_failure(arm, target)?,
                    },
                    None => SubtypeFailureReason::NoMatchingUnionArm {
                        source: source.clone(),
                        target: target.clone(),
                    },
                }
            }
            (TypeExpression::Nullable(inner), _) => {
                if accepts_null(target) {
                    return self.explain_failure(inner, target);
                }
                SubtypeFailureReason::NullNotAccepted {
                    target: target.clone(),
                }
            }
            (_, TypeExpression::Intersection(members)) => {
                let mut failing = None;
                for member in members {
                    if self.fails(source, member)? {
                        failing = Some(member);
                        break;
                    }
                }
                match failing {
                    Some(member) => SubtypeFailureReason::MissingIntersectionMember {
                        member: member.clone(),
                        nested: self.nested_failure(source, member)?,
                    },
                    None => SubtypeFailureReason::NoIntersectionMemberSatisfies {
                        source: source.clone(),
                        target: target.clone(),
                    },
                }
            }
            (_, TypeExpression::Union(_)) => SubtypeFailureReason::NoMatchingUnionArm {
                source: source.clone(),
                target: target.clone(),
            },
            (_, TypeExpression::Nullable(inner)) => return self.explain_failure(source, inner),
            (TypeExpression::Intersection(_), _) => {
                SubtypeFailureReason::NoIntersectionMemberSatisfies {
                    source: source.clone(),
                    target: target.clone(),
                }
            }
            (TypeExpression::Named(s), TypeExpression::Named(t)) => {
                SubtypeFailureReason::NotNominalSubtype {
                    source: s.clone(),
                    target: t.clone(),
                }
            }
        };
        Ok(reason)
    }

    /// Reason one level down, omitted when it adds nothing over the parent.
    fn nested_failure(
        &mut self,
        source: &TypeExpression,
        target: &TypeExpression,
    ) -> Result<Option<Box<SubtypeFailureReason>>, SubtypeError> {
        Ok(match (source, target) {
            (TypeExpression::Named(_), TypeExpression::Named(_)) => None,
            _ => Some(Box::new(self.explain_failure(source, target)?)),
        })
    }
}
