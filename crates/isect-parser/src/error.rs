use isect_common::Span;
use isect_scanner::SyntaxKind;
use thiserror::Error;

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {}", .found.describe())]
    UnexpectedToken {
        expected: &'static str,
        found: SyntaxKind,
        span: Span,
    },
    #[error("unexpected end of file inside {context}")]
    UnexpectedEndOfInput { context: &'static str, span: Span },
    #[error("type expression nested deeper than {max} levels")]
    TypeTooDeep { max: u32, span: Span },
    #[error("class_alias() expects two string literal arguments")]
    InvalidAlias { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEndOfInput { span, .. }
            | ParseError::TypeTooDeep { span, .. }
            | ParseError::InvalidAlias { span } => *span,
        }
    }
}
