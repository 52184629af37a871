//! Checking of declared intersection types for isect.
//!
//! This crate provides:
//! - Declaration-time validation of type expressions (`validate_declaration`)
//! - Override conformance under variance rules (`check_override`)
//! - Inheritance linking over parsed files (`Linker`)
//! - Checker options (`CheckerOptions`)

pub mod declaration_validator;
pub mod diagnostics;
pub mod linker;
pub mod options;
pub mod variance;

pub use declaration_validator::{
    DeclarationError, DeclarationWarning, ValidationReport, validate_declaration,
};
pub use linker::{LinkOutcome, Linker, SourceUnit, method_signature, property_signature};
pub use options::CheckerOptions;
pub use variance::{
    ConformanceResult, DeclarationSite, FailedDirection, MemberRef, SiteSlot, VarianceRole,
    VarianceViolation, ViolationPattern, check_override,
};

use isect_common::Diagnostic;
use tracing::debug;

/// Parse and link a set of `(path, text)` sources.
///
/// A file with a syntax error contributes that one diagnostic and none of
/// its declarations.
pub fn check_sources<'s, I>(sources: I, options: &CheckerOptions) -> LinkOutcome
where
    I: IntoIterator<Item = (&'s str, &'s str)>,
{
    let mut syntax_errors: Vec<Diagnostic> = Vec::new();
    let mut units = Vec::new();
    for (path, text) in sources {
        match isect_parser::parse_source(text) {
            Ok(file) => units.push(SourceUnit::new(path, file)),
            Err(err) => {
                debug!(path, error = %err, "parse failed");
                syntax_errors.push(diagnostics::syntax_diagnostic(path, &err));
            }
        }
    }

    let mut outcome = Linker::new(options.clone()).link(&units);
    if !syntax_errors.is_empty() {
        outcome.diagnostics.append(&mut syntax_errors);
        outcome.diagnostics.sort_by(|a, b| {
            (a.file.as_str(), a.start, a.code).cmp(&(b.file.as_str(), b.start, b.code))
        });
    }
    outcome
}

#[cfg(test)]
#[path = "../tests/declaration_validator_tests.rs"]
mod declaration_validator_tests;

#[cfg(test)]
#[path = "../tests/variance_tests.rs"]
mod variance_tests;

#[cfg(test)]
#[path = "../tests/linker_tests.rs"]
mod linker_tests;
