use super::*;
use std::cell::Cell;

/// Wraps a hierarchy and counts oracle consultations.
struct CountingOracle {
    hierarchy: ClassHierarchy,
    calls: Cell<usize>,
}

impl CountingOracle {
    fn new(hierarchy: ClassHierarchy) -> Self {
        Self {
            hierarchy,
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ClassRelationOracle for CountingOracle {
    fn is_subclass_of(&self, sub: &Name, sup: &Name) -> Result<bool, UnresolvableType> {
        self.calls.set(self.calls.get() + 1);
        self.hierarchy.is_subclass_of(sub, sup)
    }

    fn resolve(&self, name: &Name) -> Result<(), UnresolvableType> {
        self.calls.set(self.calls.get() + 1);
        self.hierarchy.resolve(name)
    }
}

/// interface A; interface B extends A; interface X; interface Y;
/// class C implements X, Y; class D extends C.
fn hierarchy() -> ClassHierarchy {
    let mut h = ClassHierarchy::new();
    h.declare(ClassEntry::interface("A")).unwrap();
    h.declare(ClassEntry::interface("B").with_interfaces(["A"]))
        .unwrap();
    h.declare(ClassEntry::interface("X")).unwrap();
    h.declare(ClassEntry::interface("Y")).unwrap();
    h.declare(ClassEntry::class("C").with_interfaces(["X", "Y"]))
        .unwrap();
    h.declare(ClassEntry::class("D").with_parent("C")).unwrap();
    h
}

fn n(name: &str) -> TypeExpression {
    TypeExpression::named(name)
}

fn and(names: &[&str]) -> TypeExpression {
    TypeExpression::intersection_of(names.iter().copied())
}

fn or(names: &[&str]) -> TypeExpression {
    TypeExpression::union_of(names.iter().copied())
}

fn sub(h: &ClassHierarchy, s: &TypeExpression, t: &TypeExpression) -> bool {
    is_subtype(s, t, h).unwrap()
}

#[test]
fn test_reflexivity_never_consults_oracle() {
    let oracle = CountingOracle::new(ClassHierarchy::empty());
    let mut checker = SubtypeChecker::new(&oracle);
    let samples = [
        n("Unknown"),
        and(&["P", "Q", "R"]),
        or(&["P", "Q"]),
        TypeExpression::nullable(n("P")),
        TypeExpression::union([and(&["P", "Q"]), n("R")]),
    ];
    for ty in &samples {
        assert_eq!(checker.is_subtype(ty, ty), Ok(true), "{ty}");
    }
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn test_intersection_commutes_without_oracle() {
    let oracle = CountingOracle::new(hierarchy());
    let mut checker = SubtypeChecker::new(&oracle);
    let ax = and(&["A", "X"]);
    let xa = and(&["X", "A"]);
    assert_eq!(checker.is_subtype(&ax, &xa), Ok(true));
    assert_eq!(checker.is_subtype(&xa, &ax), Ok(true));
    assert_eq!(checker.are_equivalent(&ax, &xa), Ok(true));
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn test_member_absorption() {
    let h = hierarchy();
    let ab = and(&["A", "B"]);
    assert!(sub(&h, &n("B"), &ab));
    assert!(sub(&h, &ab, &n("B")));
    assert!(sub(&h, &ab, &n("A")));
    assert!(!sub(&h, &n("A"), &ab));
    assert_eq!(is_subtype(&n("B"), &ab, &h), Ok(true));

    let mut checker = SubtypeChecker::new(&h);
    assert_eq!(checker.are_equivalent(&ab, &n("B")), Ok(true));
    assert_eq!(checker.are_equivalent(&ab, &n("A")), Ok(false));
}

#[test]
fn test_intersection_width() {
    let h = hierarchy();
    assert!(sub(&h, &and(&["A", "X", "Y"]), &and(&["Y", "A"])));
    assert!(!sub(&h, &and(&["A", "X"]), &and(&["A", "Y"])));
    assert!(sub(&h, &and(&["B", "X"]), &and(&["A", "X"])));
}

#[test]
fn test_concrete_class_satisfies_intersection() {
    let h = hierarchy();
    assert!(sub(&h, &n("C"), &and(&["X", "Y"])));
    assert!(sub(&h, &n("D"), &and(&["Y", "X"])));
    assert!(!sub(&h, &n("C"), &and(&["X", "A"])));
    assert!(!sub(&h, &and(&["X", "Y"]), &n("C")));
}

#[test]
fn test_union_rules() {
    let h = hierarchy();
    assert!(sub(&h, &or(&["A", "X"]), &or(&["X", "A"])));
    assert!(sub(&h, &n("B"), &or(&["X", "A"])));
    assert!(sub(&h, &or(&["B", "C"]), &or(&["A", "X"])));
    assert!(!sub(&h, &or(&["A", "X"]), &n("A")));
    assert!(!sub(&h, &n("Y"), &or(&["A", "X"])));
}

#[test]
fn test_intersection_against_union() {
    let h = hierarchy();
    let ax = and(&["A", "X"]);
    assert!(sub(&h, &ax, &or(&["A", "Y"])));
    assert!(sub(&h, &ax, &TypeExpression::union([and(&["X", "A"]), n("Y")])));
    assert!(!sub(&h, &ax, &or(&["B", "Y"])));
}

#[test]
fn test_nullable_rules() {
    let h = hierarchy();
    let opt = |name: &str| TypeExpression::nullable(n(name));
    assert!(sub(&h, &n("A"), &opt("A")));
    assert!(sub(&h, &opt("B"), &opt("A")));
    assert!(sub(&h, &n("null"), &opt("A")));
    assert!(sub(&h, &opt("A"), &or(&["A", "null"])));
    assert!(sub(&h, &opt("A"), &n("mixed")));
    assert!(!sub(&h, &opt("A"), &n("A")));
    assert!(!sub(&h, &opt("A"), &opt("B")));
    assert!(sub(&h, &TypeExpression::nullable(and(&["A", "X"])), &opt("X")));
}

#[test]
fn test_builtin_relations() {
    let h = hierarchy();
    assert!(sub(&h, &n("C"), &n("object")));
    assert!(sub(&h, &n("int"), &n("mixed")));
    assert!(!sub(&h, &n("void"), &n("mixed")));
    assert!(sub(&h, &n("never"), &and(&["A", "X"])));
    assert!(!sub(&h, &n("mixed"), &n("A")));
    assert!(!sub(&h, &n("int"), &n("string")));
    assert!(sub(&h, &n("true"), &n("bool")));
    assert!(sub(&h, &n("array"), &n("iterable")));
    assert!(sub(&h, &n("ArrayIterator"), &n("iterable")));
    assert!(!sub(&h, &n("C"), &n("iterable")));
    assert!(sub(&h, &n("Closure"), &n("callable")));
    assert!(sub(&h, &n("static"), &n("self")));
    assert!(!sub(&h, &n("self"), &n("static")));
    assert!(!sub(&h, &n("object"), &n("C")));
}

#[test]
fn test_names_are_case_insensitive() {
    let h = hierarchy();
    assert!(sub(&h, &n("b"), &n("\\A")));
    assert_eq!(n("\\Foo"), n("FOO"));
}

#[test]
fn test_unresolvable_type_strict_and_permissive() {
    let h = hierarchy();
    let missing = n("Missing");

    let err = is_subtype(&missing, &n("A"), &h).unwrap_err();
    assert_eq!(err.unresolved_name(), Some(&Name::new("Missing")));
    assert_eq!(err.to_string(), "class Missing is not available");

    let err = is_subtype(&n("A"), &missing, &h).unwrap_err();
    assert_eq!(err.unresolved_name(), Some(&Name::new("Missing")));

    let err = is_subtype(&missing, &n("object"), &h).unwrap_err();
    assert_eq!(err.unresolved_name(), Some(&Name::new("Missing")));

    let mut permissive = SubtypeChecker::new(&h).with_policy(UnresolvedTypePolicy::Permissive);
    assert_eq!(permissive.is_subtype(&missing, &n("A")), Ok(false));
    assert_eq!(permissive.is_subtype(&missing, &n("object")), Ok(false));
    assert_eq!(permissive.policy(), UnresolvedTypePolicy::Permissive);
}

#[test]
fn test_definite_answers_win_over_unresolvable_members() {
    let h = hierarchy();
    // some arm holds
    assert_eq!(is_subtype(&n("A"), &or(&["Missing", "A"]), &h), Ok(true));
    // some member fails
    assert_eq!(is_subtype(&n("A"), &and(&["Missing", "X"]), &h), Ok(false));
    // nothing definite
    assert!(is_subtype(&n("A"), &or(&["Missing", "X"]), &h).is_err());
}

#[test]
fn test_depth_limit_is_reported() {
    let h = hierarchy();
    let mut deep = n("A");
    for _ in 0..150 {
        deep = TypeExpression::union([deep]);
    }
    assert_eq!(
        is_subtype(&deep, &n("A"), &h),
        Err(SubtypeError::DepthExceeded { max_depth: 100 })
    );

    let mut shallow = SubtypeChecker::new(&h).with_profile(RecursionProfile::Custom {
        max_depth: 2,
        max_iterations: 1_000,
    });
    let err = shallow.is_subtype(&or(&["A", "B"]), &and(&["A", "X"]));
    assert!(matches!(err, Err(SubtypeError::DepthExceeded { max_depth: 2 })));
}

#[test]
fn test_iteration_limit_is_reported() {
    let h = ClassHierarchy::empty();
    let mut checker = SubtypeChecker::new(&h)
        .with_policy(UnresolvedTypePolicy::Permissive)
        .with_profile(RecursionProfile::Custom {
            max_depth: 100,
            max_iterations: 5,
        });
    let source = and(&["P1", "P2", "P3", "P4"]);
    let target = or(&["Q1", "Q2", "Q3", "Q4"]);
    let result = checker.is_subtype(&source, &target);
    assert_eq!(
        result,
        Err(SubtypeError::IterationsExceeded { max_iterations: 5 })
    );
    assert!(result.unwrap_err().is_limit());

    // the budget is per query
    assert_eq!(checker.is_subtype(&n("P1"), &n("P1")), Ok(true));
}

#[test]
fn test_memoized_oracle_answers_repeated_queries_once() {
    let memo = MemoizedOracle::new(CountingOracle::new(hierarchy()));
    let mut checker = SubtypeChecker::new(&memo);
    for _ in 0..3 {
        assert_eq!(checker.is_subtype(&n("D"), &and(&["X", "Y"])), Ok(true));
    }
    assert_eq!(memo.inner().calls(), 2);
    assert_eq!(memo.cached_queries(), 2);

    let err = checker.is_subtype(&n("Missing"), &n("A"));
    assert!(err.is_err());
    assert!(checker.is_subtype(&n("Missing"), &n("A")).is_err());
    assert_eq!(memo.inner().calls(), 3);
}

#[test]
fn test_checker_works_through_trait_object() {
    let h = hierarchy();
    let oracle: &dyn ClassRelationOracle = &h;
    let mut checker = SubtypeChecker::new(oracle);
    assert_eq!(checker.is_subtype(&n("C"), &n("X")), Ok(true));
}

#[test]
fn test_structural_equivalence_view() {
    assert!(structurally_equivalent(&and(&["B", "A", "B"]), &and(&["a", "b"])));
    assert!(!structurally_equivalent(&or(&["A", "B"]), &and(&["A", "B"])));
    assert_eq!(
        canonical_form(&TypeExpression::nullable(or(&["Z", "A"]))),
        TypeExpression::nullable(or(&["A", "Z"]))
    );
    // stored order is untouched
    assert_ne!(and(&["A", "B"]), and(&["B", "A"]));
}

#[test]
fn test_policy_deserializes_lowercase() {
    let policy: UnresolvedTypePolicy = serde_json::from_str("\"permissive\"").unwrap();
    assert_eq!(policy, UnresolvedTypePolicy::Permissive);
    assert_eq!(UnresolvedTypePolicy::default(), UnresolvedTypePolicy::Strict);
}
