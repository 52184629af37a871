use super::*;
use isect_common::diagnostics::diagnostic_codes;
use isect_parser::parse_type;
use isect_solver::Name;

fn validate(text: &str) -> ValidationReport {
    validate_declaration(&parse_type(text).unwrap())
}

#[test]
fn test_plain_intersection_is_valid() {
    let report = validate("Countable&Stringable");
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_redundant_after_loading_is_still_valid() {
    // Iterator already extends Traversable; only the hierarchy knows that.
    assert!(validate("Iterator&Traversable").is_valid());
}

#[test]
fn test_duplicate_member() {
    let report = validate("A&B&a");
    assert_eq!(
        report.errors,
        vec![DeclarationError::DuplicateMember {
            member: Name::new("a")
        }]
    );
    assert_eq!(report.errors[0].code(), diagnostic_codes::DUPLICATE_TYPE_IS_REDUNDANT);
    assert_eq!(report.errors[0].to_string(), "Duplicate type a is redundant");
}

#[test]
fn test_duplicate_union_arm() {
    let report = validate("A|B|A");
    assert!(matches!(
        report.errors.as_slice(),
        [DeclarationError::DuplicateMember { .. }]
    ));
}

#[test]
fn test_pseudo_types_rejected() {
    for text in ["A&mixed", "iterable&A", "A&self", "static&A", "A&parent"] {
        let report = validate(text);
        assert!(
            matches!(
                report.errors.as_slice(),
                [DeclarationError::DisallowedPseudoType { .. }]
            ),
            "{text}: {:?}",
            report.errors
        );
        assert_eq!(report.errors[0].code(), diagnostic_codes::PSEUDO_TYPE_IN_INTERSECTION);
    }
}

#[test]
fn test_scalars_rejected() {
    for text in ["A&int", "string&A", "A&array", "A&null", "A&false"] {
        let report = validate(text);
        assert!(
            matches!(
                report.errors.as_slice(),
                [DeclarationError::DisallowedScalar { .. }]
            ),
            "{text}: {:?}",
            report.errors
        );
    }
    assert_eq!(
        validate("A&int").errors[0].to_string(),
        "Type int cannot be part of an intersection type, only class types can"
    );
}

#[test]
fn test_scalars_fine_in_unions() {
    assert!(validate("int|string|null").is_valid());
    assert!(validate("?int").is_valid());
}

#[test]
fn test_callable_member_only_warns_once() {
    let report = validate("A&callable");
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warnings[0].to_string(),
        "Type callable in intersection type A&callable is only satisfied by invokable objects"
    );
    assert_eq!(report.warnings[0].code(), diagnostic_codes::CALLABLE_IN_INTERSECTION);

    let report = validate("A&callable&callable");
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.errors.as_slice(),
        [DeclarationError::DuplicateMember { .. }]
    ));
}

#[test]
fn test_intersection_inside_union() {
    let report = validate("A&B|C");
    assert_eq!(
        report.errors,
        vec![DeclarationError::InvalidNesting {
            inner: "Intersection",
            outer: "Union",
            within: "(A&B)|C".to_string(),
        }]
    );
    assert_eq!(report.errors[0].code(), diagnostic_codes::INVALID_TYPE_NESTING);
    assert_eq!(
        report.errors[0].message_args(),
        ["Intersection", "Union", "(A&B)|C"]
    );
}

#[test]
fn test_nullable_composite_and_nested_errors() {
    let report = validate("?(A&A)");
    assert_eq!(report.errors.len(), 2);
    assert!(matches!(
        report.errors[0],
        DeclarationError::InvalidNesting {
            inner: "Intersection",
            outer: "Nullable",
            ..
        }
    ));
    assert!(matches!(
        report.errors[1],
        DeclarationError::DuplicateMember { .. }
    ));
}

#[test]
fn test_errors_in_source_order() {
    let report = validate("int&A&A&mixed");
    let codes: Vec<u32> = report.errors.iter().map(DeclarationError::code).collect();
    assert_eq!(
        codes,
        [
            diagnostic_codes::SCALAR_TYPE_IN_INTERSECTION,
            diagnostic_codes::DUPLICATE_TYPE_IS_REDUNDANT,
            diagnostic_codes::PSEUDO_TYPE_IN_INTERSECTION,
        ]
    );
}
