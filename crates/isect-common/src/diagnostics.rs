//! Diagnostic types and message lookup.
//!
//! Every compile-time finding (syntax errors, declaration validation errors,
//! variance violations, unresolvable classes) is reported as a `Diagnostic`
//! carrying a numeric code, the declaring symbol, and the rendered type
//! expressions involved. Messages are templates with `{0}`, `{1}`, ...
//! placeholders filled in by `format_message`.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g., the overridden declaration).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A checking diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Declaring symbol, e.g. `Foo::bar` or `Foo::$prop`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Rendered type expressions involved in the finding.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self::new(DiagnosticCategory::Error, file, start, length, message, code)
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(
        file: String,
        start: u32,
        length: u32,
        message: String,
        code: u32,
    ) -> Self {
        Self::new(DiagnosticCategory::Warning, file, start, length, message, code)
    }

    /// Build a diagnostic from a registered code, filling the template with `args`.
    ///
    /// Unknown codes fall back to joining the arguments, so a missing table
    /// entry never swallows a finding.
    #[must_use]
    pub fn from_code(file: String, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let (category, message) = match get_diagnostic_message(code) {
            Some(def) => (def.category, format_message(def.message, args)),
            None => (DiagnosticCategory::Error, args.join(" ")),
        };
        Self::new(category, file, start, length, message, code)
    }

    const fn new(
        category: DiagnosticCategory,
        file: String,
        start: u32,
        length: u32,
        message_text: String,
        code: u32,
    ) -> Self {
        Self {
            file,
            start,
            length,
            message_text,
            category,
            code,
            symbol: None,
            types: Vec::new(),
            related_information: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: String, start: u32, length: u32, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

// =============================================================================
// Message table
// =============================================================================

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Syntax
    pub const SYNTAX_ERROR: u32 = 1000;

    // Declaration validation
    pub const DUPLICATE_TYPE_IS_REDUNDANT: u32 = 1001;
    pub const PSEUDO_TYPE_IN_INTERSECTION: u32 = 1002;
    pub const SCALAR_TYPE_IN_INTERSECTION: u32 = 1003;
    pub const INVALID_TYPE_NESTING: u32 = 1004;
    pub const CALLABLE_IN_INTERSECTION: u32 = 1005;

    // Inheritance linking
    pub const DECLARATION_MUST_BE_COMPATIBLE: u32 = 2001;
    pub const COULD_NOT_CHECK_COMPATIBILITY: u32 = 2002;
    pub const MISSING_OVERRIDDEN_PARAMETER: u32 = 2003;
    pub const INHERITANCE_CYCLE: u32 = 2004;
    pub const DUPLICATE_CLASS_DECLARATION: u32 = 2005;
    pub const INVALID_HERITAGE_CLAUSE: u32 = 2006;
    pub const TYPE_COMPARISON_TOO_DEEP: u32 = 2007;
    pub const DUPLICATE_CLASS_ALIAS: u32 = 2008;
}

use diagnostic_codes as codes;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: codes::SYNTAX_ERROR,
        category: DiagnosticCategory::Error,
        message: "Syntax error: {0}",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_TYPE_IS_REDUNDANT,
        category: DiagnosticCategory::Error,
        message: "Duplicate type {0} is redundant",
    },
    DiagnosticMessage {
        code: codes::PSEUDO_TYPE_IN_INTERSECTION,
        category: DiagnosticCategory::Error,
        message: "Type {0} cannot be part of an intersection type",
    },
    DiagnosticMessage {
        code: codes::SCALAR_TYPE_IN_INTERSECTION,
        category: DiagnosticCategory::Error,
        message: "Type {0} cannot be part of an intersection type, only class types can",
    },
    DiagnosticMessage {
        code: codes::INVALID_TYPE_NESTING,
        category: DiagnosticCategory::Error,
        message: "{0} type cannot be nested inside {1} type {2}",
    },
    DiagnosticMessage {
        code: codes::CALLABLE_IN_INTERSECTION,
        category: DiagnosticCategory::Warning,
        message: "Type callable in intersection type {0} is only satisfied by invokable objects",
    },
    DiagnosticMessage {
        code: codes::DECLARATION_MUST_BE_COMPATIBLE,
        category: DiagnosticCategory::Error,
        message: "Declaration of {0} must be compatible with {1}",
    },
    DiagnosticMessage {
        code: codes::COULD_NOT_CHECK_COMPATIBILITY,
        category: DiagnosticCategory::Error,
        message: "Could not check compatibility between {0} and {1}, because class {2} is not available",
    },
    DiagnosticMessage {
        code: codes::MISSING_OVERRIDDEN_PARAMETER,
        category: DiagnosticCategory::Error,
        message: "Declaration of {0} must accept parameter #{1} of {2}",
    },
    DiagnosticMessage {
        code: codes::INHERITANCE_CYCLE,
        category: DiagnosticCategory::Error,
        message: "Cannot declare {0}, inheriting from {1} would create a cycle",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_CLASS_DECLARATION,
        category: DiagnosticCategory::Error,
        message: "Cannot declare {0}, because the name is already in use",
    },
    DiagnosticMessage {
        code: codes::INVALID_HERITAGE_CLAUSE,
        category: DiagnosticCategory::Error,
        message: "{0} cannot {1} {2}",
    },
    DiagnosticMessage {
        code: codes::TYPE_COMPARISON_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: "Comparison between {0} and {1} is excessively deep",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_CLASS_ALIAS,
        category: DiagnosticCategory::Error,
        message: "Cannot declare class alias {0}, because the name is already in use",
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}
