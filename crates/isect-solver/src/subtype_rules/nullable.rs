//! Nullable subtyping.
//!
//! `?A` is read as `A|null`:
//! - source `?A <: T` iff `T` accepts null and `A <: T`
//! - target `S <: ?B` iff `S` is `null` or `S <: B`

use crate::builtins::BuiltinType;
use crate::oracle::ClassRelationOracle;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::TypeExpression;

/// Whether null is a member of `ty`.
pub(crate) fn accepts_null(ty: &TypeExpression) -> bool {
    match ty {
        TypeExpression::Nullable(_) => true,
        TypeExpression::Named(name) => matches!(
            BuiltinType::from_name(name),
            Some(BuiltinType::Null | BuiltinType::Mixed)
        ),
        TypeExpression::Union(members) => members.iter().any(accepts_null),
        TypeExpression::Intersection(members) => {
            !members.is_empty() && members.iter().all(accepts_null)
        }
    }
}

fn is_null(ty: &TypeExpression) -> bool {
    ty.as_named()
        .is_some_and(|name| BuiltinType::from_name(name) == Some(BuiltinType::Null))
}

impl<'a, O: ClassRelationOracle + ?Sized> SubtypeChecker<'a, O> {
    pub(crate) fn check_nullable_source(
        &mut self,
        inner: &TypeExpression,
        target: &TypeExpression,
    ) -> SubtypeResult {
        if !accepts_null(target) {
            return Ok(false);
        }
        self.check_subtype(inner, target)
    }

    pub(crate) fn check_nullable_target(
        &mut self,
        source: &TypeExpression,
        inner: &TypeExpression,
    ) -> SubtypeResult {
        if is_null(source) {
            return Ok(true);
        }
        self.check_subtype(source, inner)
    }
}
