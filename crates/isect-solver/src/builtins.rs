//! Builtin type names and builtin class-likes.

use crate::class_hierarchy::ClassEntry;
use crate::types::Name;

/// Non-class type names known to the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    // Pseudo-types
    Mixed,
    Iterable,
    Callable,
    SelfType,
    Static,
    Parent,
    // Scalar and non-class compound types
    Int,
    Float,
    String,
    Bool,
    Array,
    Object,
    Void,
    Never,
    Null,
    False,
    True,
}

impl BuiltinType {
    pub fn from_name(name: &Name) -> Option<Self> {
        let ty = match name.key() {
            "mixed" => BuiltinType::Mixed,
            "iterable" => BuiltinType::Iterable,
            "callable" => BuiltinType::Callable,
            "self" => BuiltinType::SelfType,
            "static" => BuiltinType::Static,
            "parent" => BuiltinType::Parent,
            "int" => BuiltinType::Int,
            "float" => BuiltinType::Float,
            "string" => BuiltinType::String,
            "bool" => BuiltinType::Bool,
            "array" => BuiltinType::Array,
            "object" => BuiltinType::Object,
            "void" => BuiltinType::Void,
            "never" => BuiltinType::Never,
            "null" => BuiltinType::Null,
            "false" => BuiltinType::False,
            "true" => BuiltinType::True,
            _ => return None,
        };
        Some(ty)
    }

    /// `mixed`, `iterable`, `callable`, `self`, `static`, `parent`.
    pub fn is_pseudo(self) -> bool {
        matches!(
            self,
            BuiltinType::Mixed
                | BuiltinType::Iterable
                | BuiltinType::Callable
                | BuiltinType::SelfType
                | BuiltinType::Static
                | BuiltinType::Parent
        )
    }

    /// Scalar or non-class compound type.
    pub fn is_scalar(self) -> bool {
        !self.is_pseudo()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::Mixed => "mixed",
            BuiltinType::Iterable => "iterable",
            BuiltinType::Callable => "callable",
            BuiltinType::SelfType => "self",
            BuiltinType::Static => "static",
            BuiltinType::Parent => "parent",
            BuiltinType::Int => "int",
            BuiltinType::Float => "float",
            BuiltinType::String => "string",
            BuiltinType::Bool => "bool",
            BuiltinType::Array => "array",
            BuiltinType::Object => "object",
            BuiltinType::Void => "void",
            BuiltinType::Never => "never",
            BuiltinType::Null => "null",
            BuiltinType::False => "false",
            BuiltinType::True => "true",
        }
    }
}

/// Class name that `iterable` accepts for objects.
pub const TRAVERSABLE: &str = "Traversable";
/// Class name that `callable` accepts for objects.
pub const CLOSURE: &str = "Closure";

/// Class-likes every hierarchy starts with.
pub fn builtin_class_entries() -> Vec<ClassEntry> {
    vec![
        ClassEntry::interface(TRAVERSABLE),
        ClassEntry::interface("Iterator").with_interfaces([TRAVERSABLE]),
        ClassEntry::interface("IteratorAggregate").with_interfaces([TRAVERSABLE]),
        ClassEntry::interface("ArrayAccess"),
        ClassEntry::interface("Countable"),
        ClassEntry::interface("Stringable"),
        ClassEntry::interface("JsonSerializable"),
        ClassEntry::interface("Throwable").with_interfaces(["Stringable"]),
        ClassEntry::class(CLOSURE),
        ClassEntry::class("Exception").with_interfaces(["Throwable"]),
        ClassEntry::class("ArrayIterator").with_interfaces([
            "Iterator",
            "ArrayAccess",
            "Countable",
        ]),
    ]
}
