//! Class hierarchy registry.
//!
//! Holds every declared class and interface with its direct parent and
//! implemented (or, for interfaces, extended) interfaces, plus the runtime
//! alias table populated by `class_alias`. The registry answers nominal
//! relation queries for the subtyping engine.
//!
//! Inheritance cycles are rejected at [`ClassHierarchy::declare`], so the
//! ancestor walk only needs a visited set to handle diamonds.

use crate::builtins::builtin_class_entries;
use crate::oracle::{ClassRelationOracle, UnresolvableType};
use crate::types::Name;
use indexmap::IndexMap;
use isect_common::limits::MAX_ANCESTOR_WALK;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

impl ClassKind {
    pub fn label(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
        }
    }
}

/// A class or interface with its direct supertypes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: Name,
    pub kind: ClassKind,
    /// `extends` of a class. Interfaces keep their `extends` list in `interfaces`.
    pub parent: Option<Name>,
    pub interfaces: Vec<Name>,
}

impl ClassEntry {
    pub fn class(name: &str) -> Self {
        Self {
            name: Name::new(name),
            kind: ClassKind::Class,
            parent: None,
            interfaces: Vec::new(),
        }
    }

    pub fn interface(name: &str) -> Self {
        Self {
            name: Name::new(name),
            kind: ClassKind::Interface,
            parent: None,
            interfaces: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(Name::new(parent));
        self
    }

    pub fn with_interfaces<'n>(mut self, interfaces: impl IntoIterator<Item = &'n str>) -> Self {
        self.interfaces
            .extend(interfaces.into_iter().map(Name::new));
        self
    }

    /// Direct supertypes: the parent first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &Name> {
        self.parent.iter().chain(self.interfaces.iter())
    }
}

/// Registration failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("cannot redeclare class {name}")]
    DuplicateClass { name: Name },
    #[error("class {name} is part of an inheritance cycle")]
    InheritanceCycle { name: Name },
    #[error("cannot declare class alias {alias}, because the name is already in use")]
    DuplicateAlias { alias: Name },
}

/// Ancestors reached from a class, in breadth-first order.
#[derive(Debug)]
pub struct AncestorWalk<'h> {
    pub ancestors: Vec<&'h ClassEntry>,
    /// Supertype names that are referenced but not declared.
    pub missing: Vec<Name>,
}

/// Registry of declared classes, interfaces and aliases.
#[derive(Clone, Debug)]
pub struct ClassHierarchy {
    entries: IndexMap<Name, ClassEntry, FxBuildHasher>,
    aliases: FxHashMap<Name, Name>,
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassHierarchy {
    /// A hierarchy preloaded with the builtin class-likes.
    pub fn new() -> Self {
        let mut hierarchy = Self::empty();
        for entry in builtin_class_entries() {
            hierarchy.entries.insert(entry.name.clone(), entry);
        }
        hierarchy
    }

    /// A hierarchy with no classes at all.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::default(),
            aliases: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a class or interface.
    ///
    /// Fails if the name is taken by a class or alias, or if the new entry
    /// closes an inheritance cycle through already-registered classes.
    pub fn declare(&mut self, entry: ClassEntry) -> Result<(), HierarchyError> {
        if self.entries.contains_key(&entry.name) || self.aliases.contains_key(&entry.name) {
            return Err(HierarchyError::DuplicateClass { name: entry.name });
        }
        let name = entry.name.clone();
        let closes_cycle = entry
            .supertypes()
            .any(|sup| *sup == name || self.reaches(sup, &name));
        if closes_cycle {
            return Err(HierarchyError::InheritanceCycle { name });
        }
        trace!(class = %name, kind = entry.kind.label(), "declare");
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Register `alias` as another name for `original`.
    ///
    /// The original does not have to be declared yet.
    pub fn alias(&mut self, original: &Name, alias: &Name) -> Result<(), HierarchyError> {
        if self.entries.contains_key(alias) || self.aliases.contains_key(alias) {
            return Err(HierarchyError::DuplicateAlias {
                alias: alias.clone(),
            });
        }
        let target = self.canonical(original).clone();
        trace!(%alias, %target, "alias");
        self.aliases.insert(alias.clone(), target);
        Ok(())
    }

    /// Resolve an alias to the name it stands for.
    pub fn canonical<'n>(&'n self, name: &'n Name) -> &'n Name {
        self.aliases.get(name).unwrap_or(name)
    }

    pub fn get(&self, name: &Name) -> Option<&ClassEntry> {
        self.entries.get(self.canonical(name))
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.get(name).is_some()
    }

    pub fn kind_of(&self, name: &Name) -> Option<ClassKind> {
        self.get(name).map(|entry| entry.kind)
    }

    /// Registered classes in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &ClassEntry> {
        self.entries.values()
    }

    /// Every transitive supertype of `name`, excluding `name` itself.
    pub fn ancestors(&self, name: &Name) -> AncestorWalk<'_> {
        let mut walk = AncestorWalk {
            ancestors: Vec::new(),
            missing: Vec::new(),
        };
        let Some(start) = self.get(name) else {
            return walk;
        };

        let mut seen: FxHashSet<&Name> = FxHashSet::default();
        seen.insert(&start.name);
        let mut queue: VecDeque<&Name> = start.supertypes().collect();

        while let Some(next) = queue.pop_front() {
            if walk.ancestors.len() >= MAX_ANCESTOR_WALK {
                break;
            }
            let canonical = self.canonical(next);
            if !seen.insert(canonical) {
                continue;
            }
            match self.entries.get(canonical) {
                Some(entry) => {
                    walk.ancestors.push(entry);
                    queue.extend(entry.supertypes());
                }
                None => walk.missing.push(canonical.clone()),
            }
        }
        walk
    }

    /// Nominal relation: `sub` is `sup`, or extends/implements it transitively.
    pub fn is_derived_from(&self, sub: &Name, sup: &Name) -> Result<bool, UnresolvableType> {
        let sub = self.canonical(sub);
        let sup = self.canonical(sup);
        if sub == sup {
            return Ok(true);
        }
        if !self.entries.contains_key(sub) {
            return Err(UnresolvableType::new(sub.clone()));
        }

        let walk = self.ancestors(sub);
        if walk.ancestors.iter().any(|entry| entry.name == *sup) {
            return Ok(true);
        }
        if !self.entries.contains_key(sup) {
            return Err(UnresolvableType::new(sup.clone()));
        }
        // A gap in the chain means the answer is unknown, not false.
        match walk.missing.into_iter().next() {
            Some(missing) => Err(UnresolvableType::new(missing)),
            None => Ok(false),
        }
    }

    /// Lenient reachability used for cycle detection. `to` may be a name that
    /// is referenced but not registered yet.
    fn reaches(&self, from: &Name, to: &Name) -> bool {
        let to = self.canonical(to);
        if self.canonical(from) == to {
            return true;
        }
        let walk = self.ancestors(from);
        walk.ancestors.iter().any(|entry| entry.name == *to) || walk.missing.contains(to)
    }
}

impl ClassRelationOracle for ClassHierarchy {
    fn is_subclass_of(&self, sub: &Name, sup: &Name) -> Result<bool, UnresolvableType> {
        self.is_derived_from(sub, sup)
    }

    fn resolve(&self, name: &Name) -> Result<(), UnresolvableType> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(UnresolvableType::new(name.clone()))
        }
    }
}
