//! Class relation oracle.
//!
//! The subtyping engine never walks inheritance itself. Every question of the
//! form "is class X a subclass of (or implementation of) class Y" goes
//! through a [`ClassRelationOracle`]. Answers must be reflexive and
//! transitive; the engine skips the oracle for `X == Y`.

use crate::types::Name;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use thiserror::Error;

/// A class named in a relation query is not known to the oracle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("class {name} is not available")]
pub struct UnresolvableType {
    pub name: Name,
}

impl UnresolvableType {
    pub fn new(name: Name) -> Self {
        Self { name }
    }
}

/// Answers nominal subclass / implementation queries.
pub trait ClassRelationOracle {
    /// Whether `sub` is `sup`, extends it, or implements it (transitively).
    fn is_subclass_of(&self, sub: &Name, sup: &Name) -> Result<bool, UnresolvableType>;

    /// Whether `name` is a known class-like.
    fn resolve(&self, name: &Name) -> Result<(), UnresolvableType>;
}

impl<T: ClassRelationOracle + ?Sized> ClassRelationOracle for &T {
    fn is_subclass_of(&self, sub: &Name, sup: &Name) -> Result<bool, UnresolvableType> {
        (**self).is_subclass_of(sub, sup)
    }

    fn resolve(&self, name: &Name) -> Result<(), UnresolvableType> {
        (**self).resolve(name)
    }
}

/// Caches answers of an inner oracle for the lifetime of one check run.
///
/// Only valid while the underlying hierarchy does not change.
pub struct MemoizedOracle<O> {
    inner: O,
    cache: RefCell<FxHashMap<(Name, Name), Result<bool, UnresolvableType>>>,
}

impl<O: ClassRelationOracle> MemoizedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Number of distinct queries answered so far.
    pub fn cached_queries(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<O: ClassRelationOracle> ClassRelationOracle for MemoizedOracle<O> {
    fn is_subclass_of(&self, sub: &Name, sup: &Name) -> Result<bool, UnresolvableType> {
        let key = (sub.clone(), sup.clone());
        if let Some(answer) = self.cache.borrow().get(&key) {
            return answer.clone();
        }
        let answer = self.inner.is_subclass_of(sub, sup);
        self.cache.borrow_mut().insert(key, answer.clone());
        answer
    }

    fn resolve(&self, name: &Name) -> Result<(), UnresolvableType> {
        self.inner.resolve(name)
    }
}
