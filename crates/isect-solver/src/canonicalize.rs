//! Canonical view of type expressions.
//!
//! Stored expressions keep declaration order. The canonical view sorts
//! composite members by identity and drops duplicates, so `B&A&B` and `A&B`
//! share one canonical form. It is a comparison aid only; nothing stores it.

use crate::types::{Name, TypeExpression};
use smallvec::SmallVec;

/// Sorted, deduplicated copy of `ty`, applied at every level.
pub fn canonical_form(ty: &TypeExpression) -> TypeExpression {
    match ty {
        TypeExpression::Named(_) => ty.clone(),
        TypeExpression::Nullable(inner) => TypeExpression::nullable(canonical_form(inner)),
        TypeExpression::Union(members) => TypeExpression::Union(canonical_members(members)),
        TypeExpression::Intersection(members) => {
            TypeExpression::Intersection(canonical_members(members))
        }
    }
}

fn canonical_members(members: &[TypeExpression]) -> Vec<TypeExpression> {
    let mut out: Vec<TypeExpression> = members.iter().map(canonical_form).collect();
    out.sort();
    out.dedup();
    out
}

/// Equality modulo member order and duplicate members.
pub fn structurally_equivalent(a: &TypeExpression, b: &TypeExpression) -> bool {
    a == b || canonical_form(a) == canonical_form(b)
}

/// Sorted, deduplicated names of a composite whose members are all plain names.
///
/// Returns `None` if any member is not `Named`.
pub fn sorted_member_names(members: &[TypeExpression]) -> Option<SmallVec<[&Name; 8]>> {
    let mut names: SmallVec<[&Name; 8]> = members
        .iter()
        .map(TypeExpression::as_named)
        .collect::<Option<_>>()?;
    names.sort_unstable();
    names.dedup();
    Some(names)
}
