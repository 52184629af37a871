//! Type Expression Model.
//!
//! A `TypeExpression` is an immutable, recursively defined value built by the
//! parser from already-resolved identifiers. The model deliberately accepts
//! shapes the language rejects (nested composites, pseudo-types inside an
//! intersection, single-member lists) so that diagnostics can describe exactly
//! what was written; the declaration validator is the gatekeeper.
//!
//! Equality is exact: `A&B != B&A`. Order-insensitive comparison goes through
//! [`crate::canonicalize`] or the subtyping engine.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A resolved class, interface or builtin type identifier.
///
/// Identifiers compare case-insensitively; the spelling from the source is
/// kept for rendering. A leading namespace separator is dropped, so
/// `\Foo\Bar` and `Foo\Bar` are the same name.
#[derive(Clone)]
pub struct Name {
    text: Arc<str>,
    key: Arc<str>,
}

impl Name {
    pub fn new(text: &str) -> Self {
        let text = text.strip_prefix('\\').unwrap_or(text);
        let lowered = text.to_ascii_lowercase();
        let text: Arc<str> = Arc::from(text);
        let key = if *lowered == *text {
            Arc::clone(&text)
        } else {
            Arc::from(lowered)
        };
        Self { text, key }
    }

    /// The spelling used at the declaration.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The case-folded identity used for comparison.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Case-insensitive comparison against a plain string.
    pub fn is(&self, other: &str) -> bool {
        self.key.eq_ignore_ascii_case(other.strip_prefix('\\').unwrap_or(other))
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.text)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

/// A type expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpression {
    /// A class, interface or builtin type name.
    Named(Name),
    /// `?T`: the wrapped type or null.
    Nullable(Box<TypeExpression>),
    /// `T1|T2|...`: satisfies at least one member.
    Union(Vec<TypeExpression>),
    /// `T1&T2&...`: satisfies every member.
    Intersection(Vec<TypeExpression>),
}

impl TypeExpression {
    pub fn named(name: &str) -> Self {
        TypeExpression::Named(Name::new(name))
    }

    pub fn nullable(inner: TypeExpression) -> Self {
        TypeExpression::Nullable(Box::new(inner))
    }

    pub fn union(members: impl IntoIterator<Item = TypeExpression>) -> Self {
        TypeExpression::Union(members.into_iter().collect())
    }

    pub fn intersection(members: impl IntoIterator<Item = TypeExpression>) -> Self {
        TypeExpression::Intersection(members.into_iter().collect())
    }

    /// Intersection of plain names, e.g. `intersection_of(["A", "B"])` for `A&B`.
    pub fn intersection_of<'n>(names: impl IntoIterator<Item = &'n str>) -> Self {
        Self::intersection(names.into_iter().map(Self::named))
    }

    /// Union of plain names.
    pub fn union_of<'n>(names: impl IntoIterator<Item = &'n str>) -> Self {
        Self::union(names.into_iter().map(Self::named))
    }

    pub fn as_named(&self) -> Option<&Name> {
        match self {
            TypeExpression::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Members of a union or intersection; `None` for other variants.
    pub fn composite_members(&self) -> Option<&[TypeExpression]> {
        match self {
            TypeExpression::Union(members) | TypeExpression::Intersection(members) => {
                Some(members)
            }
            _ => None,
        }
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, TypeExpression::Intersection(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, TypeExpression::Union(_))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeExpression::Nullable(_))
    }

    pub fn is_composite(&self) -> bool {
        self.is_union() || self.is_intersection()
    }

    /// Variant label used in diagnostics.
    pub fn kind_label(&self) -> &'static str {
        match self {
            TypeExpression::Named(_) => "Named",
            TypeExpression::Nullable(_) => "Nullable",
            TypeExpression::Union(_) => "Union",
            TypeExpression::Intersection(_) => "Intersection",
        }
    }

    /// Nesting depth: 1 for a name, +1 per wrapper or composite level.
    pub fn depth(&self) -> usize {
        match self {
            TypeExpression::Named(_) => 1,
            TypeExpression::Nullable(inner) => 1 + inner.depth(),
            TypeExpression::Union(members) | TypeExpression::Intersection(members) => {
                1 + members.iter().map(TypeExpression::depth).max().unwrap_or(0)
            }
        }
    }
}

impl From<Name> for TypeExpression {
    fn from(name: Name) -> Self {
        TypeExpression::Named(name)
    }
}
