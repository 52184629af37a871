use crate::{AmpersandRole, Scanner, SyntaxKind, classify_ampersand, disambiguate_ampersands, tokenize};

fn ampersands(source: &str) -> Vec<SyntaxKind> {
    tokenize(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| k.is_ampersand())
        .collect()
}

#[test]
fn test_classify_by_next_token() {
    assert_eq!(classify_ampersand(SyntaxKind::Variable), AmpersandRole::ByReference);
    assert_eq!(
        classify_ampersand(SyntaxKind::DotDotDotToken),
        AmpersandRole::ByReference
    );
    assert_eq!(
        classify_ampersand(SyntaxKind::Identifier),
        AmpersandRole::IntersectionSeparator
    );
    assert_eq!(
        classify_ampersand(SyntaxKind::EndOfFile),
        AmpersandRole::IntersectionSeparator
    );
}

#[test]
fn test_intersection_then_by_ref() {
    // A&B &$x: the first `&` separates types, the second marks a reference
    assert_eq!(
        ampersands("function f(A&B &$x) {}"),
        vec![
            SyntaxKind::AmpersandNotFollowedByVarOrVararg,
            SyntaxKind::AmpersandFollowedByVarOrVararg,
        ]
    );
}

#[test]
fn test_by_ref_variadic() {
    assert_eq!(
        ampersands("function f(A&B &...$xs) {}"),
        vec![
            SyntaxKind::AmpersandNotFollowedByVarOrVararg,
            SyntaxKind::AmpersandFollowedByVarOrVararg,
        ]
    );
}

#[test]
fn test_comment_between_ampersand_and_variable() {
    assert_eq!(
        ampersands("A & /* ref */ $x"),
        vec![SyntaxKind::AmpersandFollowedByVarOrVararg]
    );
}

#[test]
fn test_return_by_ref_is_not_followed_by_var() {
    assert_eq!(
        ampersands("function &getRef(): A&B;"),
        vec![
            SyntaxKind::AmpersandNotFollowedByVarOrVararg,
            SyntaxKind::AmpersandNotFollowedByVarOrVararg,
        ]
    );
}

#[test]
fn test_consecutive_ampersands_use_one_token_lookahead() {
    // `& &$x`: the first `&` sees another `&`, not a variable
    assert_eq!(
        ampersands("A & &$x"),
        vec![
            SyntaxKind::AmpersandNotFollowedByVarOrVararg,
            SyntaxKind::AmpersandFollowedByVarOrVararg,
        ]
    );
}

#[test]
fn test_slice_and_stream_agree() {
    let source = "function f(X&Y $a, Z &$b, W&V &...$c): X&Y;";
    let mut scanned = Scanner::new(source).scan_all();
    disambiguate_ampersands(&mut scanned);
    assert_eq!(scanned, tokenize(source));
    assert!(scanned.iter().all(|t| t.kind != SyntaxKind::AmpersandToken));
}

#[test]
fn test_stream_ends_after_eof() {
    let tokens = tokenize("A&");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, SyntaxKind::AmpersandNotFollowedByVarOrVararg);
    assert_eq!(tokens[2].kind, SyntaxKind::EndOfFile);
}
