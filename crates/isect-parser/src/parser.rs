//! LL(1) recursive-descent parser for declarations.
//!
//! The parser pulls already-disambiguated tokens from the scanner, so inside
//! a type every `&` it sees is either an intersection separator or the
//! by-reference marker in front of a parameter variable. One token of
//! lookahead (`peek`) is enough everywhere else.
//!
//! Type grammar:
//!
//! ```text
//! type         ::= '?' union | union
//! union        ::= intersection ('|' intersection)*
//! intersection ::= atom (AMP_NOT_FOLLOWED_BY_VAR atom)*
//! atom         ::= NAME | 'static' | '(' type ')'
//! ```
//!
//! The grammar is deliberately wider than the language: `?A|B`, `(A|B)&C`
//! and `?(A&B)` all parse, and the declaration validator reports them.

use isect_common::Span;
use isect_common::limits::MAX_TYPE_PARSE_DEPTH;
use isect_scanner::{DisambiguatedTokens, Scanner, SyntaxKind, Token};
use isect_solver::{ClassKind, Name, TypeExpression};
use tracing::{debug, trace};

use crate::ast::{
    AliasDecl, ClassDecl, Member, MethodDecl, ModifierFlags, NameRef, Param, ParamFlags,
    PropertyDecl, SourceFile, TypeNode,
};
use crate::error::ParseError;

pub struct Parser<'a> {
    source: &'a str,
    tokens: DisambiguatedTokens<'a>,
    current: Token,
    peek: Token,
    /// End offset of the most recently consumed token.
    last_end: u32,
    type_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut tokens = DisambiguatedTokens::new(Scanner::new(source));
        let eof = Token::new(SyntaxKind::EndOfFile, source.len(), source.len());
        let current = tokens.next().unwrap_or(eof);
        let peek = tokens.next().unwrap_or(eof);
        Self {
            source,
            tokens,
            current,
            peek,
            last_end: 0,
            type_depth: 0,
        }
    }

    // --- Token buffer ---

    fn advance(&mut self) -> Token {
        let len = self.source.len();
        let next = self
            .tokens
            .next()
            .unwrap_or(Token::new(SyntaxKind::EndOfFile, len, len));
        let consumed = std::mem::replace(&mut self.current, std::mem::replace(&mut self.peek, next));
        self.last_end = consumed.span.end;
        consumed
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current.kind == kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: SyntaxKind, expected: &'static str) -> Result<Token, ParseError> {
        self.eat(kind).ok_or_else(|| self.unexpected(expected))
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current.kind,
            span: self.current.span,
        }
    }

    fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end.max(start))
    }

    // --- Source file ---

    /// Parse a whole file, keeping only declarations that carry types.
    pub fn parse_source_file(&mut self) -> Result<SourceFile, ParseError> {
        let mut file = SourceFile::default();
        loop {
            match self.current.kind {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::ClassKeyword | SyntaxKind::InterfaceKeyword
                    if self.peek.kind == SyntaxKind::Identifier =>
                {
                    let start = self.current.span.start;
                    file.classes
                        .push(self.parse_class_like(ModifierFlags::empty(), start)?);
                }
                SyntaxKind::AbstractKeyword | SyntaxKind::FinalKeyword | SyntaxKind::ReadonlyKeyword => {
                    let start = self.current.span.start;
                    let modifiers = self.parse_modifiers();
                    if self.at(SyntaxKind::ClassKeyword) {
                        file.classes.push(self.parse_class_like(modifiers, start)?);
                    }
                }
                SyntaxKind::Identifier
                    if self.peek.kind == SyntaxKind::OpenParenToken
                        && self.text(self.current).eq_ignore_ascii_case("class_alias") =>
                {
                    file.aliases.push(self.parse_class_alias()?);
                }
                SyntaxKind::OpenBraceToken => self.skip_block()?,
                _ => {
                    self.advance();
                }
            }
        }
        debug!(
            classes = file.classes.len(),
            aliases = file.aliases.len(),
            "parsed source file"
        );
        Ok(file)
    }

    fn parse_modifiers(&mut self) -> ModifierFlags {
        let mut flags = ModifierFlags::empty();
        loop {
            let flag = match self.current.kind {
                SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
                SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
                SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
                SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
                SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
                SyntaxKind::FinalKeyword => ModifierFlags::FINAL,
                SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
                SyntaxKind::VarKeyword => ModifierFlags::VAR,
                _ => return flags,
            };
            flags |= flag;
            self.advance();
        }
    }

    // --- Class-likes ---

    fn parse_class_like(
        &mut self,
        modifiers: ModifierFlags,
        start: u32,
    ) -> Result<ClassDecl, ParseError> {
        let kind = if self.eat(SyntaxKind::ClassKeyword).is_some() {
            ClassKind::Class
        } else {
            self.expect(SyntaxKind::InterfaceKeyword, "'class' or 'interface'")?;
            ClassKind::Interface
        };
        let name_ref = self.parse_name_ref("class name")?;

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        if self.eat(SyntaxKind::ExtendsKeyword).is_some() {
            match kind {
                ClassKind::Class => extends.push(self.parse_name_ref("parent class name")?),
                ClassKind::Interface => extends = self.parse_name_list()?,
            }
        }
        if kind == ClassKind::Class && self.eat(SyntaxKind::ImplementsKeyword).is_some() {
            implements = self.parse_name_list()?;
        }

        self.expect(SyntaxKind::OpenBraceToken, "'{'")?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.at(SyntaxKind::EndOfFile) {
                return Err(ParseError::UnexpectedEndOfInput {
                    context: "class body",
                    span: self.span_from(start),
                });
            }
            self.parse_member(&mut members)?;
        }
        self.advance();

        trace!(class = %name_ref.name, members = members.len(), "parsed class-like");
        Ok(ClassDecl {
            kind,
            name: name_ref.name,
            name_span: name_ref.span,
            modifiers,
            extends,
            implements,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_name_ref(&mut self, expected: &'static str) -> Result<NameRef, ParseError> {
        let token = self.expect(SyntaxKind::Identifier, expected)?;
        Ok(NameRef {
            name: Name::new(self.text(token)),
            span: token.span,
        })
    }

    fn parse_name_list(&mut self) -> Result<Vec<NameRef>, ParseError> {
        let mut names = vec![self.parse_name_ref("interface name")?];
        while self.eat(SyntaxKind::CommaToken).is_some() {
            names.push(self.parse_name_ref("interface name")?);
        }
        Ok(names)
    }

    fn parse_member(&mut self, members: &mut Vec<Member>) -> Result<(), ParseError> {
        let start = self.current.span.start;
        let modifiers = self.parse_modifiers();

        if self.at(SyntaxKind::FunctionKeyword) {
            members.push(Member::Method(self.parse_method(modifiers, start)?));
            return Ok(());
        }

        // Properties always carry at least one modifier; anything else
        // (constants, trait uses, enum cases) has no declared type.
        let is_const = self.at(SyntaxKind::Identifier)
            && self.text(self.current).eq_ignore_ascii_case("const");
        if modifiers.is_empty() || is_const {
            return self.skip_member();
        }

        let ty = if self.at(SyntaxKind::Variable) {
            None
        } else {
            Some(self.parse_type_node()?)
        };
        loop {
            let var = self.expect(SyntaxKind::Variable, "property name")?;
            if self.eat(SyntaxKind::EqualsToken).is_some() {
                self.skip_initializer(&[SyntaxKind::CommaToken, SyntaxKind::SemicolonToken])?;
            }
            members.push(Member::Property(PropertyDecl {
                name: self.text(var).trim_start_matches('$').to_string(),
                modifiers,
                ty: ty.clone(),
                span: self.span_from(start),
            }));
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect(SyntaxKind::SemicolonToken, "';'")?;
        Ok(())
    }

    fn parse_method(
        &mut self,
        modifiers: ModifierFlags,
        start: u32,
    ) -> Result<MethodDecl, ParseError> {
        self.expect(SyntaxKind::FunctionKeyword, "'function'")?;
        // `function &name()`: the name is not a variable, so the ampersand
        // arrives as the not-followed-by-var form; accept both.
        let returns_by_ref = if self.current.kind.is_ampersand() {
            self.advance();
            true
        } else {
            false
        };

        // Method names may be reserved words (`function list()`).
        if !(self.at(SyntaxKind::Identifier) || self.current.kind.is_keyword()) {
            return Err(self.unexpected("method name"));
        }
        let name_token = self.advance();

        self.expect(SyntaxKind::OpenParenToken, "'('")?;
        let mut params = Vec::new();
        while !self.at(SyntaxKind::CloseParenToken) {
            params.push(self.parse_param()?);
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken, "')'")?;

        let return_type = if self.eat(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_node()?)
        } else {
            None
        };

        if self.eat(SyntaxKind::SemicolonToken).is_none() {
            if !self.at(SyntaxKind::OpenBraceToken) {
                return Err(self.unexpected("'{' or ';'"));
            }
            self.skip_block()?;
        }

        Ok(MethodDecl {
            name: Name::new(self.text(name_token)),
            name_span: name_token.span,
            modifiers,
            returns_by_ref,
            params,
            return_type,
            span: self.span_from(start),
        })
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let start = self.current.span.start;
        // Constructor promotion modifiers do not change the parameter type.
        self.parse_modifiers();

        let untyped = matches!(
            self.current.kind,
            SyntaxKind::Variable
                | SyntaxKind::AmpersandFollowedByVarOrVararg
                | SyntaxKind::DotDotDotToken
        );
        let ty = if untyped {
            None
        } else {
            Some(self.parse_type_node()?)
        };

        let mut flags = ParamFlags::empty();
        if self
            .eat(SyntaxKind::AmpersandFollowedByVarOrVararg)
            .is_some()
        {
            flags |= ParamFlags::BY_REF;
        }
        if self.eat(SyntaxKind::DotDotDotToken).is_some() {
            flags |= ParamFlags::VARIADIC;
        }
        let var = self.expect(SyntaxKind::Variable, "parameter variable")?;
        if self.eat(SyntaxKind::EqualsToken).is_some() {
            self.skip_initializer(&[SyntaxKind::CommaToken, SyntaxKind::CloseParenToken])?;
            flags |= ParamFlags::HAS_DEFAULT;
        }

        Ok(Param {
            name: self.text(var).trim_start_matches('$').to_string(),
            ty,
            flags,
            span: self.span_from(start),
        })
    }

    // --- Types ---

    /// Parse a type and record the span it covers.
    pub fn parse_type_node(&mut self) -> Result<TypeNode, ParseError> {
        let start = self.current.span.start;
        self.type_depth = 0;
        let expr = self.parse_type()?;
        Ok(TypeNode {
            expr,
            span: self.span_from(start),
        })
    }

    fn parse_type(&mut self) -> Result<TypeExpression, ParseError> {
        self.type_depth += 1;
        if self.type_depth > MAX_TYPE_PARSE_DEPTH {
            return Err(ParseError::TypeTooDeep {
                max: MAX_TYPE_PARSE_DEPTH,
                span: self.current.span,
            });
        }
        let ty = if self.eat(SyntaxKind::QuestionToken).is_some() {
            TypeExpression::nullable(self.parse_union()?)
        } else {
            self.parse_union()?
        };
        self.type_depth -= 1;
        Ok(ty)
    }

    fn parse_union(&mut self) -> Result<TypeExpression, ParseError> {
        let first = self.parse_intersection()?;
        if !self.at(SyntaxKind::BarToken) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.eat(SyntaxKind::BarToken).is_some() {
            members.push(self.parse_intersection()?);
        }
        Ok(TypeExpression::Union(members))
    }

    fn parse_intersection(&mut self) -> Result<TypeExpression, ParseError> {
        let first = self.parse_type_atom()?;
        if !self.at(SyntaxKind::AmpersandNotFollowedByVarOrVararg) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self
            .eat(SyntaxKind::AmpersandNotFollowedByVarOrVararg)
            .is_some()
        {
            members.push(self.parse_type_atom()?);
        }
        Ok(TypeExpression::Intersection(members))
    }

    fn parse_type_atom(&mut self) -> Result<TypeExpression, ParseError> {
        match self.current.kind {
            SyntaxKind::Identifier | SyntaxKind::StaticKeyword => {
                let token = self.advance();
                Ok(TypeExpression::named(self.text(token)))
            }
            SyntaxKind::OpenParenToken => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(SyntaxKind::CloseParenToken, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("type")),
        }
    }

    /// Parse a standalone type that must span the whole input.
    pub fn parse_standalone_type(&mut self) -> Result<TypeExpression, ParseError> {
        let node = self.parse_type_node()?;
        self.expect(SyntaxKind::EndOfFile, "end of type")?;
        Ok(node.expr)
    }

    // --- class_alias ---

    fn parse_class_alias(&mut self) -> Result<AliasDecl, ParseError> {
        let start = self.advance().span.start;
        self.expect(SyntaxKind::OpenParenToken, "'('")?;
        let original = self.parse_alias_argument()?;
        self.expect(SyntaxKind::CommaToken, "','")?;
        let alias = self.parse_alias_argument()?;
        // Optional autoload flag.
        if self.eat(SyntaxKind::CommaToken).is_some() {
            self.skip_initializer(&[SyntaxKind::CloseParenToken])?;
        }
        self.expect(SyntaxKind::CloseParenToken, "')'")?;
        self.eat(SyntaxKind::SemicolonToken);
        Ok(AliasDecl {
            original,
            alias,
            span: self.span_from(start),
        })
    }

    /// `'Name'`, `"Name"` or `Name::class`.
    fn parse_alias_argument(&mut self) -> Result<Name, ParseError> {
        match self.current.kind {
            SyntaxKind::StringLiteral => {
                let token = self.advance();
                let text = self.text(token);
                let unquoted = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
                Ok(Name::new(&unquoted.replace("\\\\", "\\")))
            }
            SyntaxKind::Identifier if self.peek.kind == SyntaxKind::ColonToken => {
                let token = self.advance();
                self.expect(SyntaxKind::ColonToken, "'::'")?;
                self.expect(SyntaxKind::ColonToken, "'::'")?;
                self.expect(SyntaxKind::ClassKeyword, "'class'")?;
                Ok(Name::new(self.text(token)))
            }
            _ => Err(ParseError::InvalidAlias {
                span: self.current.span,
            }),
        }
    }

    // --- Skipping ---

    /// Skip a `{ ... }` block including nested blocks.
    fn skip_block(&mut self) -> Result<(), ParseError> {
        let open = self.expect(SyntaxKind::OpenBraceToken, "'{'")?;
        let mut depth = 1u32;
        while depth > 0 {
            match self.advance().kind {
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => depth -= 1,
                SyntaxKind::EndOfFile => {
                    return Err(ParseError::UnexpectedEndOfInput {
                        context: "block",
                        span: open.span,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Skip an untyped class member up to its `;` or its body.
    fn skip_member(&mut self) -> Result<(), ParseError> {
        trace!(at = self.current.span.start, "skipping member");
        loop {
            match self.current.kind {
                SyntaxKind::SemicolonToken => {
                    self.advance();
                    return Ok(());
                }
                SyntaxKind::OpenBraceToken => return self.skip_block(),
                SyntaxKind::CloseBraceToken => return Ok(()),
                SyntaxKind::EndOfFile => return Err(self.unexpected("'}'")),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip an initializer expression up to (not including) one of `stops`
    /// at bracket depth zero.
    fn skip_initializer(&mut self, stops: &[SyntaxKind]) -> Result<(), ParseError> {
        let mut depth = 0u32;
        loop {
            let kind = self.current.kind;
            if depth == 0 && stops.contains(&kind) {
                return Ok(());
            }
            match kind {
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        return Err(self.unexpected("end of initializer"));
                    }
                    depth -= 1;
                }
                SyntaxKind::EndOfFile => {
                    return Err(ParseError::UnexpectedEndOfInput {
                        context: "initializer",
                        span: self.current.span,
                    });
                }
                _ => {}
            }
            self.advance();
        }
    }
}
