/// Token kinds produced by the scanner.
///
/// `AmpersandToken` never reaches the parser: the disambiguation pass in
/// [`crate::ampersand`] rewrites it into one of the two ampersand terminals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFile,

    // Literals and names
    Identifier,
    Variable,
    StringLiteral,
    NumericLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    ColonToken,
    QuestionToken,
    BarToken,
    EqualsToken,
    DotDotDotToken,
    AmpersandToken,
    AmpersandAmpersandToken,

    // Reclassified ampersands
    AmpersandFollowedByVarOrVararg,
    AmpersandNotFollowedByVarOrVararg,

    // Keywords
    ClassKeyword,
    InterfaceKeyword,
    ExtendsKeyword,
    ImplementsKeyword,
    FunctionKeyword,
    PublicKeyword,
    ProtectedKeyword,
    PrivateKeyword,
    StaticKeyword,
    AbstractKeyword,
    FinalKeyword,
    ReadonlyKeyword,
    VarKeyword,
}

impl SyntaxKind {
    /// Map an identifier to its keyword kind. Keywords are case-insensitive.
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text.to_ascii_lowercase().as_str() {
            "class" => SyntaxKind::ClassKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "implements" => SyntaxKind::ImplementsKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "protected" => SyntaxKind::ProtectedKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "abstract" => SyntaxKind::AbstractKeyword,
            "final" => SyntaxKind::FinalKeyword,
            "readonly" => SyntaxKind::ReadonlyKeyword,
            "var" => SyntaxKind::VarKeyword,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::ClassKeyword as u16)
    }

    /// Either of the reclassified ampersand terminals.
    pub fn is_ampersand(self) -> bool {
        matches!(
            self,
            SyntaxKind::AmpersandToken
                | SyntaxKind::AmpersandFollowedByVarOrVararg
                | SyntaxKind::AmpersandNotFollowedByVarOrVararg
        )
    }

    /// Human-readable description used in parse errors.
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::Unknown => "unknown character",
            SyntaxKind::EndOfFile => "end of file",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::Variable => "variable",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::NumericLiteral => "number",
            SyntaxKind::OpenBraceToken => "'{'",
            SyntaxKind::CloseBraceToken => "'}'",
            SyntaxKind::OpenParenToken => "'('",
            SyntaxKind::CloseParenToken => "')'",
            SyntaxKind::OpenBracketToken => "'['",
            SyntaxKind::CloseBracketToken => "']'",
            SyntaxKind::SemicolonToken => "';'",
            SyntaxKind::CommaToken => "','",
            SyntaxKind::ColonToken => "':'",
            SyntaxKind::QuestionToken => "'?'",
            SyntaxKind::BarToken => "'|'",
            SyntaxKind::EqualsToken => "'='",
            SyntaxKind::DotDotDotToken => "'...'",
            SyntaxKind::AmpersandToken
            | SyntaxKind::AmpersandFollowedByVarOrVararg
            | SyntaxKind::AmpersandNotFollowedByVarOrVararg => "'&'",
            SyntaxKind::AmpersandAmpersandToken => "'&&'",
            SyntaxKind::ClassKeyword => "'class'",
            SyntaxKind::InterfaceKeyword => "'interface'",
            SyntaxKind::ExtendsKeyword => "'extends'",
            SyntaxKind::ImplementsKeyword => "'implements'",
            SyntaxKind::FunctionKeyword => "'function'",
            SyntaxKind::PublicKeyword => "'public'",
            SyntaxKind::ProtectedKeyword => "'protected'",
            SyntaxKind::PrivateKeyword => "'private'",
            SyntaxKind::StaticKeyword => "'static'",
            SyntaxKind::AbstractKeyword => "'abstract'",
            SyntaxKind::FinalKeyword => "'final'",
            SyntaxKind::ReadonlyKeyword => "'readonly'",
            SyntaxKind::VarKeyword => "'var'",
        }
    }
}
