//! Scanner/tokenizer for isect declaration sources.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `Scanner` - Tokenizer state machine
//! - `ampersand` - Reclassification of `&` into by-reference markers and
//!   intersection separators, so the parser never has to guess

pub mod ampersand;
mod scanner;
mod syntax_kind;

pub use ampersand::{AmpersandRole, DisambiguatedTokens, classify_ampersand, disambiguate_ampersands};
pub use scanner::{Scanner, Token};
pub use syntax_kind::SyntaxKind;

/// Scan `source` into a token vector terminated by `EndOfFile`, with every
/// `&` already classified.
pub fn tokenize(source: &str) -> Vec<Token> {
    DisambiguatedTokens::new(Scanner::new(source)).collect()
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;

#[cfg(test)]
#[path = "../tests/ampersand_tests.rs"]
mod ampersand_tests;
