//! Union subtyping.
//!
//! - source `A1|..|An <: T` iff every `Ai <: T`
//! - target `S <: B1|..|Bn` iff some `S <: Bi`

use super::{all_of, any_of};
use crate::oracle::ClassRelationOracle;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::TypeExpression;

impl<'a, O: ClassRelationOracle + ?Sized> SubtypeChecker<'a, O> {
    pub(crate) fn check_union_source(
        &mut self,
        arms: &[TypeExpression],
        target: &TypeExpression,
    ) -> SubtypeResult {
        all_of(arms, |arm| self.check_subtype(arm, target))
    }

    pub(crate) fn check_union_target(
        &mut self,
        source: &TypeExpression,
        arms: &[TypeExpression],
    ) -> SubtypeResult {
        any_of(arms, |arm| self.check_subtype(source, arm))
    }
}
