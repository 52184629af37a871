//! Intersection subtyping.
//!
//! - target `S <: B1&..&Bn` iff `S <: Bi` for every member
//! - source `A1&..&An <: T` iff some `Ai <: T`
//!
//! An intersection made of plain names is a subtype of another such
//! intersection whenever its name set covers the target's; that case is
//! answered without the oracle.

use super::{all_of, any_of};
use crate::canonicalize::sorted_member_names;
use crate::oracle::ClassRelationOracle;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::TypeExpression;

impl<'a, O: ClassRelationOracle + ?Sized> SubtypeChecker<'a, O> {
    pub(crate) fn check_intersection_target(
        &mut self,
        source: &TypeExpression,
        members: &[TypeExpression],
    ) -> SubtypeResult {
        if let TypeExpression::Intersection(source_members) = source
            && covers_by_name(source_members, members)
        {
            return Ok(true);
        }
        all_of(members, |member| self.check_subtype(source, member))
    }

    pub(crate) fn check_intersection_source(
        &mut self,
        members: &[TypeExpression],
        target: &TypeExpression,
    ) -> SubtypeResult {
        any_of(members, |member| self.check_subtype(member, target))
    }
}

/// Every target name also appears in the source.
fn covers_by_name(source: &[TypeExpression], target: &[TypeExpression]) -> bool {
    let (Some(source), Some(target)) = (sorted_member_names(source), sorted_member_names(target))
    else {
        return false;
    };
    target.iter().all(|name| source.binary_search(name).is_ok())
}
