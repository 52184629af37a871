//! Tokenizer state machine.
//!
//! Whitespace, comments, attributes (`#[...]`) and the `<?php` / `?>` tags
//! are trivia and never become tokens. Anything the scanner does not understand becomes an
//! `Unknown` token so that method bodies (which the parser skips) can contain
//! arbitrary code without aborting the scan.

use isect_common::Span;

use crate::SyntaxKind;

/// A token: its kind and its byte span in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: SyntaxKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start as u32, end as u32),
        }
    }

    /// The token text in `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source).unwrap_or("")
    }
}

pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Scan the next token. Returns `EndOfFile` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;
        let Some(&ch) = self.bytes.get(start) else {
            return Token::new(SyntaxKind::EndOfFile, start, start);
        };

        let kind = match ch {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b'|' => self.single(SyntaxKind::BarToken),
            b'=' => self.single(SyntaxKind::EqualsToken),
            b'&' => {
                if self.bytes.get(start + 1) == Some(&b'&') {
                    self.pos += 2;
                    SyntaxKind::AmpersandAmpersandToken
                } else {
                    self.single(SyntaxKind::AmpersandToken)
                }
            }
            b'.' => {
                if self.bytes[start..].starts_with(b"...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.single(SyntaxKind::Unknown)
                }
            }
            b'$' => {
                self.pos += 1;
                if self.peek_is_ident_start() {
                    self.scan_ident_chars();
                    SyntaxKind::Variable
                } else {
                    SyntaxKind::Unknown
                }
            }
            b'\'' | b'"' => self.scan_string(ch),
            b'0'..=b'9' => {
                while matches!(self.bytes.get(self.pos), Some(b'0'..=b'9' | b'.' | b'_')) {
                    self.pos += 1;
                }
                SyntaxKind::NumericLiteral
            }
            b'\\' => self.scan_name(),
            _ if is_ident_start(ch) => self.scan_name(),
            _ => {
                // Advance over a whole UTF-8 character
                let len = self.source[start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.pos += len;
                SyntaxKind::Unknown
            }
        };

        Token::new(kind, start, self.pos)
    }

    /// Scan the whole source, including the trailing `EndOfFile` token.
    pub fn scan_all(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == SyntaxKind::EndOfFile {
                return tokens;
            }
        }
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn peek_is_ident_start(&self) -> bool {
        self.bytes.get(self.pos).is_some_and(|&b| is_ident_start(b))
    }

    fn scan_ident_chars(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|&b| is_ident_part(b)) {
            self.pos += 1;
        }
    }

    /// Identifier or namespace-qualified name (`\Foo\Bar`, `Foo\Bar`).
    fn scan_name(&mut self) -> SyntaxKind {
        let start = self.pos;
        loop {
            if self.bytes.get(self.pos) == Some(&b'\\') {
                self.pos += 1;
            }
            if !self.peek_is_ident_start() {
                break;
            }
            self.scan_ident_chars();
            if self.bytes.get(self.pos) != Some(&b'\\') {
                break;
            }
        }

        let text = &self.source[start..self.pos];
        if text.is_empty() || text.ends_with('\\') {
            return SyntaxKind::Unknown;
        }
        SyntaxKind::keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        self.pos += 1;
        while let Some(&b) = self.bytes.get(self.pos) {
            self.pos += 1;
            if b == b'\\' {
                self.pos = (self.pos + 1).min(self.bytes.len());
            } else if b == quote {
                return SyntaxKind::StringLiteral;
            }
        }
        // Unterminated
        SyntaxKind::Unknown
    }

    fn skip_trivia(&mut self) {
        let bytes = self.bytes;
        loop {
            let rest = &bytes[self.pos.min(bytes.len())..];
            match rest {
                [b' ' | b'\t' | b'\r' | b'\n', ..] => self.pos += 1,
                [b'#', b'[', ..] => self.skip_attribute(),
                [b'/', b'/', ..] | [b'#', ..] => self.skip_line_comment(),
                [b'/', b'*', ..] => {
                    self.pos = match memchr::memmem::find(&rest[2..], b"*/") {
                        Some(end) => self.pos + 2 + end + 2,
                        None => bytes.len(),
                    };
                }
                _ if rest.len() >= 5 && rest[..5].eq_ignore_ascii_case(b"<?php") => {
                    self.pos += 5;
                }
                [b'?', b'>', ..] => self.pos += 2,
                _ => break,
            }
        }
    }

    /// `#[...]`, bracket-balanced, with string arguments skipped whole.
    /// An unterminated attribute runs to the end of input.
    fn skip_attribute(&mut self) {
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'\'' | b'"' => {
                    self.scan_string(b);
                    continue;
                }
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn skip_line_comment(&mut self) {
        let rest = &self.bytes[self.pos..];
        self.pos = match memchr::memchr(b'\n', rest) {
            Some(nl) => self.pos + nl + 1,
            None => self.bytes.len(),
        };
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}
