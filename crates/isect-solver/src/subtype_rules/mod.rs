//! Subtype rules, split by the shape they decompose.
//!
//! Each submodule adds methods to [`SubtypeChecker`](crate::SubtypeChecker).

mod intersections;
mod intrinsics;
mod nullable;
mod unions;

pub(crate) use nullable::accepts_null;

use crate::subtype::{SubtypeError, SubtypeResult};

/// Existential over `items`.
///
/// A positive answer wins over an error from another item; limit errors
/// abort immediately. Otherwise the first error is reported.
pub(crate) fn any_of<T>(items: &[T], mut check: impl FnMut(&T) -> SubtypeResult) -> SubtypeResult {
    let mut first_error: Option<SubtypeError> = None;
    for item in items {
        match check(item) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(err) if err.is_limit() => return Err(err),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map_or(Ok(false), Err)
}

/// Universal over `items`.
///
/// A negative answer wins over an error from another item; limit errors
/// abort immediately. Otherwise the first error is reported.
pub(crate) fn all_of<T>(items: &[T], mut check: impl FnMut(&T) -> SubtypeResult) -> SubtypeResult {
    let mut first_error: Option<SubtypeError> = None;
    for item in items {
        match check(item) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(err) if err.is_limit() => return Err(err),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map_or(Ok(true), Err)
}
