//! Ampersand disambiguation.
//!
//! In a parameter list `&` is both the intersection separator (`A&B $x`) and
//! the by-reference marker (`A &$x`, `A &...$xs`). A one-token-lookahead
//! grammar cannot tell them apart after the type, so the token stream is
//! rewritten before parsing:
//!
//! - `&` immediately followed by a variable or `...` becomes
//!   `AmpersandFollowedByVarOrVararg` (by-reference marker);
//! - any other `&` becomes `AmpersandNotFollowedByVarOrVararg` (intersection
//!   separator, or the return-by-reference marker in `function &name()`,
//!   which the parser accepts in either form).
//!
//! The lookahead is exactly one token. Trivia is not a token, so
//! `& /* c */ $x` is still a by-reference marker.

use crate::{Scanner, SyntaxKind, Token};

/// What an `&` means in its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmpersandRole {
    ByReference,
    IntersectionSeparator,
}

impl AmpersandRole {
    pub fn token_kind(self) -> SyntaxKind {
        match self {
            AmpersandRole::ByReference => SyntaxKind::AmpersandFollowedByVarOrVararg,
            AmpersandRole::IntersectionSeparator => SyntaxKind::AmpersandNotFollowedByVarOrVararg,
        }
    }
}

/// Classify an `&` from the kind of the token that follows it.
#[inline]
pub fn classify_ampersand(next: SyntaxKind) -> AmpersandRole {
    match next {
        SyntaxKind::Variable | SyntaxKind::DotDotDotToken => AmpersandRole::ByReference,
        _ => AmpersandRole::IntersectionSeparator,
    }
}

/// Rewrite every `AmpersandToken` in an already-scanned token slice.
pub fn disambiguate_ampersands(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if tokens[i].kind != SyntaxKind::AmpersandToken {
            continue;
        }
        let next = tokens
            .get(i + 1)
            .map_or(SyntaxKind::EndOfFile, |t| t.kind);
        tokens[i].kind = classify_ampersand(next).token_kind();
    }
}

/// Streaming variant: wraps a scanner and yields classified tokens, holding
/// one token of lookahead only while an `&` is pending.
///
/// The iterator ends after yielding `EndOfFile`.
pub struct DisambiguatedTokens<'a> {
    scanner: Scanner<'a>,
    pending: Option<Token>,
    done: bool,
}

impl<'a> DisambiguatedTokens<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            pending: None,
            done: false,
        }
    }

    fn pull(&mut self) -> Token {
        self.pending
            .take()
            .unwrap_or_else(|| self.scanner.next_token())
    }
}

impl Iterator for DisambiguatedTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let mut token = self.pull();
        if token.kind == SyntaxKind::AmpersandToken {
            let next = self.scanner.next_token();
            let role = classify_ampersand(next.kind);
            tracing::trace!(
                offset = token.span.start,
                next = ?next.kind,
                ?role,
                "classified ampersand"
            );
            token.kind = role.token_kind();
            self.pending = Some(next);
        }
        if token.kind == SyntaxKind::EndOfFile {
            self.done = true;
        }
        Some(token)
    }
}
