//! Type model and subtyping engine for intersection and union types over a
//! nominal class hierarchy.
//!
//! This crate provides:
//! - Type expressions (`TypeExpression`, `Name`)
//! - Builtin type names and builtin class-likes
//! - Class relation oracle trait and the in-memory `ClassHierarchy`
//! - Subtype checking with failure explanation (`SubtypeChecker`)
//! - Canonical comparison and rendering of type expressions

pub mod builtins;
pub mod canonicalize;
pub mod class_hierarchy;
pub mod diagnostics;
pub mod format;
pub mod oracle;
pub mod recursion;
pub mod subtype;
pub mod subtype_explain;
mod subtype_rules;
pub mod types;

pub use builtins::BuiltinType;
pub use canonicalize::{canonical_form, structurally_equivalent};
pub use class_hierarchy::{AncestorWalk, ClassEntry, ClassHierarchy, ClassKind, HierarchyError};
pub use diagnostics::SubtypeFailureReason;
pub use format::{TypeFormatter, members, render};
pub use oracle::{ClassRelationOracle, MemoizedOracle, UnresolvableType};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use subtype::{
    SubtypeChecker, SubtypeError, SubtypeResult, UnresolvedTypePolicy, is_subtype,
};
pub use subtype_explain::SubtypeJudgment;
pub use types::{Name, TypeExpression};

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod subtype_tests;

#[cfg(test)]
#[path = "../tests/class_hierarchy_tests.rs"]
mod class_hierarchy_tests;

#[cfg(test)]
#[path = "../tests/explain_tests.rs"]
mod explain_tests;

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;
