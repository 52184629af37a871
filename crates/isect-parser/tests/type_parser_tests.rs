use super::*;
use isect_solver::render;

fn n(name: &str) -> TypeExpression {
    TypeExpression::named(name)
}

#[test]
fn test_parse_named_and_nullable() {
    assert_eq!(parse_type("Foo").unwrap(), n("Foo"));
    assert_eq!(parse_type("\\Ns\\Foo").unwrap(), n("Ns\\Foo"));
    assert_eq!(parse_type("?Foo").unwrap(), TypeExpression::nullable(n("Foo")));
    assert_eq!(parse_type("static").unwrap(), n("static"));
}

#[test]
fn test_parse_intersection_keeps_order() {
    assert_eq!(
        parse_type("B & A & C").unwrap(),
        TypeExpression::intersection_of(["B", "A", "C"])
    );
}

#[test]
fn test_parse_union_of_intersections() {
    let ty = parse_type("A&B|C").unwrap();
    assert_eq!(
        ty,
        TypeExpression::union([TypeExpression::intersection_of(["A", "B"]), n("C")])
    );
    assert_eq!(render(&ty), "(A&B)|C");
}

#[test]
fn test_parse_shapes_the_validator_rejects() {
    assert_eq!(
        parse_type("?A|B").unwrap(),
        TypeExpression::nullable(TypeExpression::union_of(["A", "B"]))
    );
    assert_eq!(
        parse_type("(A|B)&C").unwrap(),
        TypeExpression::intersection([TypeExpression::union_of(["A", "B"]), n("C")])
    );
    assert_eq!(
        parse_type("?(?A)").unwrap(),
        TypeExpression::nullable(TypeExpression::nullable(n("A")))
    );
}

#[test]
fn test_rendered_types_parse_back() {
    for text in ["A&B", "?A", "A|null", "(A&B)|C", "?(A&B)", "A|(?B)", "(?A)&B", "?(?A)"] {
        assert_eq!(render(&parse_type(text).unwrap()), text);
    }
    let built = TypeExpression::union([n("A"), TypeExpression::nullable(n("B"))]);
    assert_eq!(parse_type(&render(&built)).unwrap(), built);
}

#[test]
fn test_type_errors() {
    assert!(matches!(
        parse_type("A&"),
        Err(ParseError::UnexpectedToken {
            expected: "type",
            ..
        })
    ));
    assert!(matches!(
        parse_type("A B"),
        Err(ParseError::UnexpectedToken {
            expected: "end of type",
            ..
        })
    ));
    let err = parse_type("A&&B").unwrap_err();
    assert_eq!(err.to_string(), "expected end of type, found '&&'");
}

#[test]
fn test_type_depth_is_bounded() {
    let text = format!("{}A{}", "(".repeat(100), ")".repeat(100));
    assert!(matches!(
        parse_type(&text),
        Err(ParseError::TypeTooDeep { max: 64, .. })
    ));
    let ok = format!("{}A{}", "(".repeat(10), ")".repeat(10));
    assert_eq!(parse_type(&ok).unwrap(), n("A"));
}
