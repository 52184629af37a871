//! Override conformance.
//!
//! | Slot      | Role          | Requirement                 |
//! |-----------|---------------|-----------------------------|
//! | return    | covariant     | `derived <: base`           |
//! | parameter | contravariant | `base <: derived`           |
//! | property  | invariant     | both directions             |
//!
//! An untyped slot is the top type. A derived return may add a type to an
//! untyped base return and a derived parameter may drop its type, but an
//! untyped base parameter cannot become typed and a typed base return cannot
//! become untyped. Properties must agree on whether they are typed.

use isect_solver::{
    ClassRelationOracle, Name, SubtypeChecker, SubtypeError, SubtypeFailureReason,
    TypeExpression, render,
};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarianceRole {
    Covariant,
    Contravariant,
    Invariant,
}

/// Which slot of a member a type is declared for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteSlot {
    Return,
    /// Zero-based position and variable name.
    Parameter { index: usize, name: String },
    Property,
}

impl SiteSlot {
    pub fn role(&self) -> VarianceRole {
        match self {
            SiteSlot::Return => VarianceRole::Covariant,
            SiteSlot::Parameter { .. } => VarianceRole::Contravariant,
            SiteSlot::Property => VarianceRole::Invariant,
        }
    }
}

/// `Class::method` or `Class::$property`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRef {
    pub class: Name,
    pub member: String,
    pub is_property: bool,
}

impl MemberRef {
    pub fn method(class: &Name, method: &Name) -> Self {
        Self {
            class: class.clone(),
            member: method.to_string(),
            is_property: false,
        }
    }

    pub fn property(class: &Name, property: &str) -> Self {
        Self {
            class: class.clone(),
            member: property.to_string(),
            is_property: true,
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_property {
            write!(f, "{}::${}", self.class, self.member)
        } else {
            write!(f, "{}::{}", self.class, self.member)
        }
    }
}

/// A declared (or omitted) type at one slot of one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationSite<'t> {
    pub owner: MemberRef,
    pub slot: SiteSlot,
    pub ty: Option<&'t TypeExpression>,
}

/// The relation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailedDirection {
    /// `derived <: base` does not hold.
    DerivedToBase,
    /// `base <: derived` does not hold.
    BaseToDerived,
}

/// What the override does, in the terms a user thinks about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationPattern {
    AddingParameterConstraint,
    RemovingReturnConstraint,
    NarrowingPropertyType,
    WideningPropertyType,
}

impl ViolationPattern {
    fn phrase(self) -> &'static str {
        match self {
            ViolationPattern::AddingParameterConstraint => "adding parameter constraint",
            ViolationPattern::RemovingReturnConstraint => "removing return constraint",
            ViolationPattern::NarrowingPropertyType => "narrowing property type",
            ViolationPattern::WideningPropertyType => "widening property type",
        }
    }
}

/// An override that breaks the variance rule of its slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarianceViolation {
    pub base: MemberRef,
    pub derived: MemberRef,
    pub slot: SiteSlot,
    pub role: VarianceRole,
    pub base_type: Option<TypeExpression>,
    pub derived_type: Option<TypeExpression>,
    pub failed: FailedDirection,
    pub pattern: ViolationPattern,
    pub reason: Option<SubtypeFailureReason>,
}

impl VarianceViolation {
    /// The constraint that was added or removed, when one member is to blame.
    pub fn offending_member(&self) -> Option<&TypeExpression> {
        self.reason
            .as_ref()
            .and_then(SubtypeFailureReason::offending_member)
    }

    /// E.g. `removing return constraint X is forbidden`.
    pub fn describe(&self) -> String {
        match self.offending_member() {
            Some(member) => format!("{} {} is forbidden", self.pattern.phrase(), render(member)),
            None => format!("{} is forbidden", self.pattern.phrase()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConformanceResult {
    Conforms,
    Violation(Box<VarianceViolation>),
}

impl ConformanceResult {
    pub fn is_conforming(&self) -> bool {
        matches!(self, ConformanceResult::Conforms)
    }
}

/// Check that `derived` may override `base` at the same slot.
pub fn check_override<O: ClassRelationOracle + ?Sized>(
    base: &DeclarationSite<'_>,
    derived: &DeclarationSite<'_>,
    checker: &mut SubtypeChecker<'_, O>,
) -> Result<ConformanceResult, SubtypeError> {
    let role = base.slot.role();
    let violation = |failed, pattern, reason| {
        ConformanceResult::Violation(Box::new(VarianceViolation {
            base: base.owner.clone(),
            derived: derived.owner.clone(),
            slot: derived.slot.clone(),
            role,
            base_type: base.ty.cloned(),
            derived_type: derived.ty.cloned(),
            failed,
            pattern,
            reason,
        }))
    };

    let result = match (role, base.ty, derived.ty) {
        (VarianceRole::Covariant, None, _) => ConformanceResult::Conforms,
        (VarianceRole::Covariant, Some(_), None) => violation(
            FailedDirection::DerivedToBase,
            ViolationPattern::RemovingReturnConstraint,
            None,
        ),
        (VarianceRole::Covariant, Some(b), Some(d)) => {
            let judgment = checker.explain(d, b)?;
            if judgment.is_subtype {
                ConformanceResult::Conforms
            } else {
                violation(
                    FailedDirection::DerivedToBase,
                    ViolationPattern::RemovingReturnConstraint,
                    judgment.reason,
                )
            }
        }

        (VarianceRole::Contravariant, _, None) => ConformanceResult::Conforms,
        (VarianceRole::Contravariant, None, Some(_)) => violation(
            FailedDirection::BaseToDerived,
            ViolationPattern::AddingParameterConstraint,
            None,
        ),
        (VarianceRole::Contravariant, Some(b), Some(d)) => {
            let judgment = checker.explain(b, d)?;
            if judgment.is_subtype {
                ConformanceResult::Conforms
            } else {
                violation(
                    FailedDirection::BaseToDerived,
                    ViolationPattern::AddingParameterConstraint,
                    judgment.reason,
                )
            }
        }

        (VarianceRole::Invariant, None, None) => ConformanceResult::Conforms,
        (VarianceRole::Invariant, None, Some(_)) => violation(
            FailedDirection::BaseToDerived,
            ViolationPattern::NarrowingPropertyType,
            None,
        ),
        (VarianceRole::Invariant, Some(_), None) => violation(
            FailedDirection::DerivedToBase,
            ViolationPattern::WideningPropertyType,
            None,
        ),
        (VarianceRole::Invariant, Some(b), Some(d)) => {
            let widening = checker.explain(d, b)?;
            if !widening.is_subtype {
                violation(
                    FailedDirection::DerivedToBase,
                    ViolationPattern::WideningPropertyType,
                    widening.reason,
                )
            } else {
                let narrowing = checker.explain(b, d)?;
                if narrowing.is_subtype {
                    ConformanceResult::Conforms
                } else {
                    violation(
                        FailedDirection::BaseToDerived,
                        ViolationPattern::NarrowingPropertyType,
                        narrowing.reason,
                    )
                }
            }
        }
    };
    Ok(result)
}
