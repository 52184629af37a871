//! Relations between two names.
//!
//! Builtin type names have fixed relations; only two class names reach the
//! oracle, plus the two builtins that accept objects of a specific class
//! (`iterable` accepts `Traversable`, `callable` accepts `Closure`).

use crate::builtins::{BuiltinType, CLOSURE, TRAVERSABLE};
use crate::oracle::ClassRelationOracle;
use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::types::Name;

impl<'a, O: ClassRelationOracle + ?Sized> SubtypeChecker<'a, O> {
    pub(crate) fn check_named(&mut self, source: &Name, target: &Name) -> SubtypeResult {
        if source == target {
            return Ok(true);
        }

        use BuiltinType as B;
        match (BuiltinType::from_name(source), BuiltinType::from_name(target)) {
            (kind, Some(B::Mixed)) => Ok(kind != Some(B::Void)),
            (Some(B::Never), _) => Ok(true),
            (Some(B::Mixed), _) => Ok(false),
            (None, Some(B::Object)) => self.is_known_class(source),
            (Some(B::Array), Some(B::Iterable)) => Ok(true),
            (None, Some(B::Iterable)) => self.relate_classes(source, &Name::new(TRAVERSABLE)),
            (None, Some(B::Callable)) => self.relate_classes(source, &Name::new(CLOSURE)),
            (Some(B::True | B::False), Some(B::Bool)) => Ok(true),
            (Some(B::Static), Some(B::SelfType)) => Ok(true),
            (Some(_), _) | (_, Some(_)) => Ok(false),
            (None, None) => self.relate_classes(source, target),
        }
    }
}
