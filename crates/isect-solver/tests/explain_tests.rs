use super::*;

fn hierarchy() -> ClassHierarchy {
    let mut h = ClassHierarchy::new();
    for iface in ["A", "X", "Y"] {
        h.declare(ClassEntry::interface(iface)).unwrap();
    }
    h.declare(ClassEntry::class("OnlyA").with_interfaces(["A"]))
        .unwrap();
    h
}

fn n(name: &str) -> TypeExpression {
    TypeExpression::named(name)
}

#[test]
fn test_holding_relation_has_no_reason() {
    let h = hierarchy();
    let judgment = SubtypeChecker::new(&h)
        .explain(&n("OnlyA"), &n("A"))
        .unwrap();
    assert_eq!(judgment, SubtypeJudgment::holds());
}

#[test]
fn test_missing_intersection_member_is_named() {
    let h = hierarchy();
    let target = TypeExpression::intersection_of(["A", "X"]);
    let judgment = SubtypeChecker::new(&h).explain(&n("A"), &target).unwrap();
    assert!(!judgment.is_subtype);
    let reason = judgment.reason.unwrap();
    assert_eq!(reason.offending_member(), Some(&n("X")));
    assert_eq!(reason.to_string(), "missing intersection member X");
    assert_eq!(
        reason.root_cause(),
        &SubtypeFailureReason::MissingIntersectionMember {
            member: n("X"),
            nested: None,
        }
    );
}

#[test]
fn test_failing_union_arm_is_named() {
    let h = hierarchy();
    let source = TypeExpression::union_of(["OnlyA", "Y"]);
    let judgment = SubtypeChecker::new(&h).explain(&source, &n("A")).unwrap();
    let reason = judgment.reason.unwrap();
    assert_eq!(reason.offending_member(), Some(&n("Y")));
}

#[test]
fn test_nested_reason_drills_into_intersection() {
    let h = hierarchy();
    let source = TypeExpression::union([n("OnlyA"), TypeExpression::intersection_of(["X", "Y"])]);
    let target = TypeExpression::intersection_of(["A", "X"]);
    let reason = SubtypeChecker::new(&h)
        .explain(&source, &target)
        .unwrap()
        .reason
        .unwrap();

    let SubtypeFailureReason::UnionArmNotAssignable { arm, nested } = &reason else {
        panic!("unexpected reason: {reason:?}");
    };
    assert_eq!(arm, &n("OnlyA"));
    assert_eq!(
        nested.as_deref(),
        Some(&SubtypeFailureReason::MissingIntersectionMember {
            member: n("X"),
            nested: None,
        })
    );
}

#[test]
fn test_nullable_source_against_non_nullable_target() {
    let h = hierarchy();
    let judgment = SubtypeChecker::new(&h)
        .explain(&TypeExpression::nullable(n("A")), &n("A"))
        .unwrap();
    assert_eq!(
        judgment.reason,
        Some(SubtypeFailureReason::NullNotAccepted { target: n("A") })
    );
}

#[test]
fn test_explain_propagates_unresolvable() {
    let h = hierarchy();
    let err = SubtypeChecker::new(&h)
        .explain(&n("Ghost"), &n("A"))
        .unwrap_err();
    assert_eq!(err.unresolved_name(), Some(&Name::new("Ghost")));
}

#[test]
fn test_explain_reports_budget_exhausted_while_explaining() {
    let h = hierarchy();
    let source = TypeExpression::union_of(["OnlyA", "Y"]);
    let target = TypeExpression::intersection_of(["A", "X"]);
    let profile = RecursionProfile::Custom {
        max_depth: 100,
        max_iterations: 4,
    };

    // The check itself fits in four steps; re-walking it to name the culprit does not.
    let mut checker = SubtypeChecker::new(&h).with_profile(profile);
    assert_eq!(checker.is_subtype(&source, &target), Ok(false));
    let err = checker.explain(&source, &target).unwrap_err();
    assert_eq!(err, SubtypeError::IterationsExceeded { max_iterations: 4 });

    let judgment = SubtypeChecker::new(&h).explain(&source, &target).unwrap();
    assert_eq!(judgment.reason.unwrap().offending_member(), Some(&n("OnlyA")));
}

#[test]
fn test_reason_serializes_with_kind_tag() {
    let reason = SubtypeFailureReason::NotNominalSubtype {
        source: Name::new("Foo"),
        target: Name::new("Bar"),
    };
    let json = serde_json::to_value(&reason).unwrap();
    assert_eq!(json["kind"], "not_nominal_subtype");
    assert_eq!(json["source"], "Foo");
}
