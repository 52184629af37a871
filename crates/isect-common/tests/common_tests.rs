use crate::diagnostics::{diagnostic_codes, format_message, get_diagnostic_category};
use crate::{Diagnostic, DiagnosticCategory, LineMap, Position, Span};

#[test]
fn test_format_message_fills_placeholders() {
    assert_eq!(
        format_message("Declaration of {0} must be compatible with {1}", &["B::f()", "A::f()"]),
        "Declaration of B::f() must be compatible with A::f()"
    );
}

#[test]
fn test_from_code_uses_registered_category() {
    let diag = Diagnostic::from_code(
        "a.php".to_string(),
        4,
        3,
        diagnostic_codes::CALLABLE_IN_INTERSECTION,
        &["callable&Countable"],
    );
    assert_eq!(diag.category, DiagnosticCategory::Warning);
    assert!(diag.message_text.contains("callable&Countable"));
    assert!(!diag.is_error());
}

#[test]
fn test_from_code_unknown_code_keeps_arguments() {
    let diag = Diagnostic::from_code(String::new(), 0, 0, 9999, &["a", "b"]);
    assert_eq!(diag.message_text, "a b");
    assert!(diag.is_error());
}

#[test]
fn test_every_code_has_a_message() {
    for code in [
        diagnostic_codes::SYNTAX_ERROR,
        diagnostic_codes::DUPLICATE_TYPE_IS_REDUNDANT,
        diagnostic_codes::PSEUDO_TYPE_IN_INTERSECTION,
        diagnostic_codes::SCALAR_TYPE_IN_INTERSECTION,
        diagnostic_codes::INVALID_TYPE_NESTING,
        diagnostic_codes::DECLARATION_MUST_BE_COMPATIBLE,
        diagnostic_codes::COULD_NOT_CHECK_COMPATIBILITY,
        diagnostic_codes::MISSING_OVERRIDDEN_PARAMETER,
        diagnostic_codes::INHERITANCE_CYCLE,
        diagnostic_codes::DUPLICATE_CLASS_DECLARATION,
        diagnostic_codes::INVALID_HERITAGE_CLAUSE,
        diagnostic_codes::TYPE_COMPARISON_TOO_DEEP,
        diagnostic_codes::DUPLICATE_CLASS_ALIAS,
    ] {
        assert!(get_diagnostic_category(code).is_some(), "missing message for {code}");
    }
}

#[test]
fn test_diagnostic_json_skips_empty_fields() {
    let diag = Diagnostic::error("a.php".into(), 0, 1, "boom".into(), 1000);
    let json = serde_json::to_value(&diag).unwrap();
    assert!(json.get("symbol").is_none());
    assert!(json.get("types").is_none());
    assert!(json.get("related_information").is_none());

    let diag = diag.with_symbol("A::f").with_types(["A&B"]);
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["symbol"], "A::f");
    assert_eq!(json["types"][0], "A&B");
}

#[test]
fn test_line_map_positions() {
    let source = "class A {}\r\ninterface B {}\nclass C {}";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    let b_offset = source.find("interface").unwrap() as u32;
    assert_eq!(map.offset_to_position(b_offset, source), Position::new(1, 0));
    let c_offset = source.rfind('C').unwrap() as u32;
    assert_eq!(map.offset_to_position(c_offset, source), Position::new(2, 6));
}

#[test]
fn test_span_cover_and_slice() {
    let a = Span::new(2, 5);
    let b = Span::new(8, 10);
    assert_eq!(a.cover(b), Span::new(2, 10));
    assert_eq!(Span::new(0, 5).slice("class A"), Some("class"));
    assert!(Span::at(3).is_empty());
}
