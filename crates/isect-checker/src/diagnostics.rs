//! Conversion of checker findings into [`Diagnostic`] records.

use crate::declaration_validator::{DeclarationError, DeclarationWarning};
use crate::variance::VarianceViolation;
use isect_common::diagnostics::diagnostic_codes;
use isect_common::{Diagnostic, Span};
use isect_parser::ParseError;
use isect_solver::{SubtypeError, render};

/// A parse failure, reported at the offending token.
pub fn syntax_diagnostic(file: &str, error: &ParseError) -> Diagnostic {
    let span = error.span();
    let message = error.to_string();
    Diagnostic::from_code(
        file.to_string(),
        span.start,
        span.len(),
        diagnostic_codes::SYNTAX_ERROR,
        &[message.as_str()],
    )
}

/// A structural error in a declared type.
pub fn declaration_error(file: &str, span: Span, symbol: &str, error: &DeclarationError) -> Diagnostic {
    let args = error.message_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Diagnostic::from_code(file.to_string(), span.start, span.len(), error.code(), &args)
        .with_symbol(symbol)
}

pub fn declaration_warning(
    file: &str,
    span: Span,
    symbol: &str,
    warning: &DeclarationWarning,
) -> Diagnostic {
    let args = warning.message_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Diagnostic::from_code(file.to_string(), span.start, span.len(), warning.code(), &args)
        .with_symbol(symbol)
}

/// Where a declaration lives, for related information.
#[derive(Clone, Copy, Debug)]
pub struct Location<'a> {
    pub file: &'a str,
    pub span: Span,
}

/// A member whose signature is incompatible with the member it overrides.
///
/// `derived_sig` and `base_sig` are the rendered signatures used in the
/// message. When a variance violation is known, its description is attached
/// at the derived declaration.
pub fn incompatible_override(
    derived: Location<'_>,
    base: Location<'_>,
    derived_sig: &str,
    base_sig: &str,
    violation: Option<&VarianceViolation>,
) -> Diagnostic {
    let mut diagnostic = Diagnostic::from_code(
        derived.file.to_string(),
        derived.span.start,
        derived.span.len(),
        diagnostic_codes::DECLARATION_MUST_BE_COMPATIBLE,
        &[derived_sig, base_sig],
    );
    if let Some(violation) = violation {
        diagnostic = diagnostic
            .with_symbol(violation.derived.to_string())
            .with_types(
                [&violation.derived_type, &violation.base_type]
                    .into_iter()
                    .map(|ty| ty.as_ref().map_or_else(|| "(untyped)".to_string(), render)),
            )
            .with_related(
                derived.file.to_string(),
                derived.span.start,
                derived.span.len(),
                violation.describe(),
            );
    }
    diagnostic.with_related(
        base.file.to_string(),
        base.span.start,
        base.span.len(),
        format!("The overridden declaration is {base_sig}"),
    )
}

/// A derived method that takes fewer parameters than the method it overrides.
pub fn missing_parameter(
    derived: Location<'_>,
    base: Location<'_>,
    derived_sig: &str,
    base_sig: &str,
    position: usize,
) -> Diagnostic {
    let position = position.to_string();
    Diagnostic::from_code(
        derived.file.to_string(),
        derived.span.start,
        derived.span.len(),
        diagnostic_codes::MISSING_OVERRIDDEN_PARAMETER,
        &[derived_sig, position.as_str(), base_sig],
    )
    .with_related(
        base.file.to_string(),
        base.span.start,
        base.span.len(),
        format!("The overridden declaration is {base_sig}"),
    )
}

/// A relation query that could not be answered.
pub fn undecidable_override(
    derived: Location<'_>,
    derived_sig: &str,
    base_sig: &str,
    error: &SubtypeError,
) -> Diagnostic {
    let file = derived.file.to_string();
    match error.unresolved_name() {
        Some(name) => Diagnostic::from_code(
            file,
            derived.span.start,
            derived.span.len(),
            diagnostic_codes::COULD_NOT_CHECK_COMPATIBILITY,
            &[derived_sig, base_sig, name.as_str()],
        ),
        None => Diagnostic::from_code(
            file,
            derived.span.start,
            derived.span.len(),
            diagnostic_codes::TYPE_COMPARISON_TOO_DEEP,
            &[derived_sig, base_sig],
        ),
    }
}
