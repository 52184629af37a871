//! Declaration-time validation of type expressions.
//!
//! Runs once per declared type, before the declaring class is registered,
//! and never consults the class hierarchy: everything it rejects is visible
//! from the syntax alone. Redundancy that only shows after loading classes
//! (`A&B` where `B extends A`) is accepted.
//!
//! Rules:
//! - an intersection member must be a class-like name: pseudo-types
//!   (`mixed`, `iterable`, `self`, `static`, `parent`) and scalar or
//!   non-class compound types are rejected; `callable` only draws a warning
//! - a composite may not contain the same name twice
//! - composites do not nest, nullable wraps only a plain name, and a
//!   composite member may not be nullable

use isect_common::diagnostics::diagnostic_codes;
use isect_solver::{BuiltinType, Name, TypeExpression, render};
use smallvec::SmallVec;
use thiserror::Error;

/// A structural error in a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("Duplicate type {member} is redundant")]
    DuplicateMember { member: Name },
    #[error("Type {member} cannot be part of an intersection type")]
    DisallowedPseudoType { member: Name },
    #[error("Type {member} cannot be part of an intersection type, only class types can")]
    DisallowedScalar { member: Name },
    #[error("{inner} type cannot be nested inside {outer} type {within}")]
    InvalidNesting {
        inner: &'static str,
        outer: &'static str,
        /// The enclosing expression, rendered.
        within: String,
    },
}

impl DeclarationError {
    pub fn code(&self) -> u32 {
        match self {
            DeclarationError::DuplicateMember { .. } => diagnostic_codes::DUPLICATE_TYPE_IS_REDUNDANT,
            DeclarationError::DisallowedPseudoType { .. } => {
                diagnostic_codes::PSEUDO_TYPE_IN_INTERSECTION
            }
            DeclarationError::DisallowedScalar { .. } => {
                diagnostic_codes::SCALAR_TYPE_IN_INTERSECTION
            }
            DeclarationError::InvalidNesting { .. } => diagnostic_codes::INVALID_TYPE_NESTING,
        }
    }

    /// Arguments for the message template of [`code`](Self::code).
    pub fn message_args(&self) -> Vec<String> {
        match self {
            DeclarationError::DuplicateMember { member }
            | DeclarationError::DisallowedPseudoType { member }
            | DeclarationError::DisallowedScalar { member } => vec![member.to_string()],
            DeclarationError::InvalidNesting {
                inner,
                outer,
                within,
            } => vec![inner.to_string(), outer.to_string(), within.clone()],
        }
    }
}

/// A lint-level finding that does not block registration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeclarationWarning {
    #[error("Type callable in intersection type {within} is only satisfied by invokable objects")]
    CallableIntersectionMember { within: String },
}

impl DeclarationWarning {
    pub fn code(&self) -> u32 {
        match self {
            DeclarationWarning::CallableIntersectionMember { .. } => {
                diagnostic_codes::CALLABLE_IN_INTERSECTION
            }
        }
    }

    pub fn message_args(&self) -> Vec<String> {
        match self {
            DeclarationWarning::CallableIntersectionMember { within } => vec![within.clone()],
        }
    }
}

/// Findings for one declared type, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<DeclarationError>,
    pub warnings: Vec<DeclarationWarning>,
}

impl ValidationReport {
    /// No errors; warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a declared type.
pub fn validate_declaration(ty: &TypeExpression) -> ValidationReport {
    let mut report = ValidationReport::default();
    visit(ty, &mut report);
    report
}

fn visit(ty: &TypeExpression, report: &mut ValidationReport) {
    match ty {
        TypeExpression::Named(_) => {}
        TypeExpression::Nullable(inner) => {
            if !matches!(**inner, TypeExpression::Named(_)) {
                report.errors.push(DeclarationError::InvalidNesting {
                    inner: inner.kind_label(),
                    outer: ty.kind_label(),
                    within: render(ty),
                });
            }
            visit(inner, report);
        }
        TypeExpression::Union(members) => visit_composite(ty, members, false, report),
        TypeExpression::Intersection(members) => visit_composite(ty, members, true, report),
    }
}

fn visit_composite(
    ty: &TypeExpression,
    members: &[TypeExpression],
    is_intersection: bool,
    report: &mut ValidationReport,
) {
    let mut seen: SmallVec<[&Name; 8]> = SmallVec::new();
    let mut warned_callable = false;

    for member in members {
        let name = match member {
            TypeExpression::Named(name) => name,
            _ => {
                report.errors.push(DeclarationError::InvalidNesting {
                    inner: member.kind_label(),
                    outer: ty.kind_label(),
                    within: render(ty),
                });
                visit(member, report);
                continue;
            }
        };

        if is_intersection {
            match BuiltinType::from_name(name) {
                Some(BuiltinType::Callable) => {
                    if !warned_callable {
                        warned_callable = true;
                        report
                            .warnings
                            .push(DeclarationWarning::CallableIntersectionMember {
                                within: render(ty),
                            });
                    }
                }
                Some(builtin) if builtin.is_scalar() => {
                    report.errors.push(DeclarationError::DisallowedScalar {
                        member: name.clone(),
                    });
                }
                Some(_) => {
                    report.errors.push(DeclarationError::DisallowedPseudoType {
                        member: name.clone(),
                    });
                }
                None => {}
            }
        }

        if seen.contains(&name) {
            report.errors.push(DeclarationError::DuplicateMember {
                member: name.clone(),
            });
        } else {
            seen.push(name);
        }
    }
}
