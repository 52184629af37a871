use super::*;

fn name(text: &str) -> Name {
    Name::new(text)
}

#[test]
fn test_builtins_are_preloaded() {
    let h = ClassHierarchy::new();
    assert!(h.contains(&name("Traversable")));
    assert_eq!(h.kind_of(&name("Closure")), Some(ClassKind::Class));
    assert_eq!(
        h.is_derived_from(&name("ArrayIterator"), &name("traversable")),
        Ok(true)
    );
    assert!(ClassHierarchy::empty().is_empty());
}

#[test]
fn test_duplicate_declaration_is_rejected() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::class("Foo")).unwrap();
    assert_eq!(
        h.declare(ClassEntry::interface("FOO")),
        Err(HierarchyError::DuplicateClass { name: name("FOO") })
    );
    assert_eq!(h.len(), 1);
}

#[test]
fn test_inheritance_cycle_is_rejected() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::class("A").with_parent("B")).unwrap();
    let err = h
        .declare(ClassEntry::class("B").with_parent("A"))
        .unwrap_err();
    assert_eq!(err, HierarchyError::InheritanceCycle { name: name("B") });
    assert_eq!(err.to_string(), "class B is part of an inheritance cycle");
    assert!(!h.contains(&name("B")));
}

#[test]
fn test_self_reference_is_a_cycle() {
    let mut h = ClassHierarchy::empty();
    let err = h
        .declare(ClassEntry::interface("I").with_interfaces(["I"]))
        .unwrap_err();
    assert!(matches!(err, HierarchyError::InheritanceCycle { .. }));
}

#[test]
fn test_interface_cycle_through_several_links() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::interface("I1").with_interfaces(["I2"]))
        .unwrap();
    h.declare(ClassEntry::interface("I2").with_interfaces(["I3"]))
        .unwrap();
    assert!(
        h.declare(ClassEntry::interface("I3").with_interfaces(["I1"]))
            .is_err()
    );
}

#[test]
fn test_diamond_ancestors_are_visited_once() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::interface("Top")).unwrap();
    h.declare(ClassEntry::interface("Left").with_interfaces(["Top"]))
        .unwrap();
    h.declare(ClassEntry::interface("Right").with_interfaces(["Top"]))
        .unwrap();
    h.declare(ClassEntry::class("Impl").with_interfaces(["Left", "Right"]))
        .unwrap();

    let walk = h.ancestors(&name("Impl"));
    let names: Vec<&str> = walk.ancestors.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Left", "Right", "Top"]);
    assert!(walk.missing.is_empty());
}

#[test]
fn test_missing_link_makes_relation_unknown() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::interface("I")).unwrap();
    h.declare(ClassEntry::class("Child").with_parent("Gone"))
        .unwrap();

    assert_eq!(
        h.is_derived_from(&name("Child"), &name("I")),
        Err(UnresolvableType::new(name("Gone")))
    );
    assert_eq!(h.ancestors(&name("Child")).missing, vec![name("Gone")]);
    assert_eq!(
        h.is_derived_from(&name("Nope"), &name("I")),
        Err(UnresolvableType::new(name("Nope")))
    );
}

#[test]
fn test_parent_chain_and_interfaces() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::interface("Marker")).unwrap();
    h.declare(ClassEntry::class("Base").with_interfaces(["Marker"]))
        .unwrap();
    h.declare(ClassEntry::class("Mid").with_parent("Base"))
        .unwrap();
    h.declare(ClassEntry::class("Leaf").with_parent("Mid"))
        .unwrap();

    assert_eq!(h.is_derived_from(&name("Leaf"), &name("Marker")), Ok(true));
    assert_eq!(h.is_derived_from(&name("Base"), &name("Leaf")), Ok(false));
    assert_eq!(h.is_subclass_of(&name("Leaf"), &name("Leaf")), Ok(true));
}

#[test]
fn test_aliases_resolve_to_original() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::interface("Original")).unwrap();
    h.declare(ClassEntry::class("User").with_interfaces(["Legacy"]))
        .unwrap();
    h.alias(&name("Original"), &name("Legacy")).unwrap();

    assert_eq!(h.canonical(&name("legacy")), &name("Original"));
    assert_eq!(h.is_derived_from(&name("User"), &name("Original")), Ok(true));
    assert_eq!(h.is_derived_from(&name("Legacy"), &name("Original")), Ok(true));
    assert_eq!(h.kind_of(&name("Legacy")), Some(ClassKind::Interface));

    assert_eq!(
        h.alias(&name("Original"), &name("User")),
        Err(HierarchyError::DuplicateAlias { alias: name("User") })
    );
    assert!(matches!(
        h.declare(ClassEntry::class("Legacy")),
        Err(HierarchyError::DuplicateClass { .. })
    ));
}

#[test]
fn test_alias_of_alias_is_flattened() {
    let mut h = ClassHierarchy::empty();
    h.declare(ClassEntry::class("Real")).unwrap();
    h.alias(&name("Real"), &name("First")).unwrap();
    h.alias(&name("First"), &name("Second")).unwrap();
    assert_eq!(h.canonical(&name("Second")), &name("Real"));
}
