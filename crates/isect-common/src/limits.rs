//! Centralized limits and thresholds for the checker.
//!
//! Type expressions cannot be self-referential, so these limits only guard
//! against pathological input (machine-generated declarations with very deep
//! nesting or enormous member lists). They are never hit by ordinary code.

/// Maximum nesting depth of a type expression visited by the subtype engine.
///
/// Valid declarations nest at most two levels (`?A` or `A&B`), but the model
/// can represent arbitrary nesting for diagnostic purposes and the parser
/// builds whatever it sees before validation rejects it.
pub const MAX_SUBTYPE_DEPTH: u32 = 100;

/// Maximum number of rule applications in a single subtype query.
///
/// `A1&..&Am <: B1&..&Bn` costs `m * n` named comparisons; this bounds the
/// total work for a single query regardless of the shape.
pub const MAX_SUBTYPE_ITERATIONS: u32 = 100_000;

/// Maximum nesting depth accepted by the type parser.
pub const MAX_TYPE_PARSE_DEPTH: u32 = 64;

/// Maximum number of ancestors walked when resolving a nominal relation.
///
/// Inheritance cycles are rejected at registration, so this only bounds the
/// walk when a hierarchy is assembled from untrusted input.
pub const MAX_ANCESTOR_WALK: usize = 10_000;
