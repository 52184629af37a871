use crate::{Scanner, SyntaxKind};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    Scanner::new(source)
        .scan_all()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_scan_class_header() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("class Foo extends Bar implements Baz, \\Ns\\Qux {}"),
        vec![
            ClassKeyword,
            Identifier,
            ExtendsKeyword,
            Identifier,
            ImplementsKeyword,
            Identifier,
            CommaToken,
            Identifier,
            OpenBraceToken,
            CloseBraceToken,
            EndOfFile,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        kinds("CLASS Interface PUBLIC"),
        vec![
            SyntaxKind::ClassKeyword,
            SyntaxKind::InterfaceKeyword,
            SyntaxKind::PublicKeyword,
            SyntaxKind::EndOfFile,
        ]
    );
}

#[test]
fn test_qualified_name_is_single_token() {
    let source = "\\Foo\\Bar";
    let tokens = Scanner::new(source).scan_all();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[0].text(source), "\\Foo\\Bar");
}

#[test]
fn test_trivia_is_skipped() {
    let source = "<?php\n// line\n# hash\n/* block\n comment */ $x";
    let tokens = Scanner::new(source).scan_all();
    assert_eq!(tokens[0].kind, SyntaxKind::Variable);
    assert_eq!(tokens[0].text(source), "$x");
    assert_eq!(tokens[1].kind, SyntaxKind::EndOfFile);
}

#[test]
fn test_unterminated_block_comment_runs_to_end() {
    assert_eq!(kinds("A /* never closed"), vec![
        SyntaxKind::Identifier,
        SyntaxKind::EndOfFile
    ]);
}

#[test]
fn test_ampersand_forms() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("& && ..."),
        vec![AmpersandToken, AmpersandAmpersandToken, DotDotDotToken, EndOfFile]
    );
}

#[test]
fn test_literals_and_unknown_characters() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("'a\\'b' \"c\" 42 @ $"),
        vec![StringLiteral, StringLiteral, NumericLiteral, Unknown, Unknown, EndOfFile]
    );
}

#[test]
fn test_end_of_file_repeats() {
    let mut scanner = Scanner::new("");
    assert_eq!(scanner.next_token().kind, SyntaxKind::EndOfFile);
    assert_eq!(scanner.next_token().kind, SyntaxKind::EndOfFile);
}

#[test]
fn test_attributes_are_trivia() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("#[Override] public function make(): A {}"),
        vec![
            PublicKeyword,
            FunctionKeyword,
            Identifier,
            OpenParenToken,
            CloseParenToken,
            ColonToken,
            Identifier,
            OpenBraceToken,
            CloseBraceToken,
            EndOfFile,
        ]
    );
    // Nested brackets and a `]` inside a string argument stay inside the attribute.
    assert_eq!(
        kinds("#[Route(['a', 'b]'], name: \"x]\")] $y # tail"),
        vec![Variable, EndOfFile]
    );
}

#[test]
fn test_unterminated_attribute_runs_to_end() {
    assert_eq!(kinds("#[Broken( $x"), vec![SyntaxKind::EndOfFile]);
}
