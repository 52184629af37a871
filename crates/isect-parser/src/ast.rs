//! Declaration AST.
//!
//! Only the parts of a source file that carry declared types are kept:
//! class-likes with their heritage clauses, method signatures, property
//! declarations and `class_alias` calls. Method bodies and anything else at
//! the top level are skipped by the parser.

use bitflags::bitflags;
use isect_common::Span;
use isect_solver::{ClassKind, Name, TypeExpression};

bitflags! {
    /// Modifiers on a class-like or a member.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const READONLY = 1 << 6;
        const VAR = 1 << 7;
    }
}

bitflags! {
    /// How a parameter binds its argument.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParamFlags: u8 {
        /// `&$x`
        const BY_REF = 1 << 0;
        /// `...$xs`
        const VARIADIC = 1 << 1;
        /// `$x = <default>`
        const HAS_DEFAULT = 1 << 2;
    }
}

impl ModifierFlags {
    /// Private members do not take part in override checks.
    pub fn is_private(self) -> bool {
        self.contains(ModifierFlags::PRIVATE)
    }
}

/// A declared type together with where it was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    pub expr: TypeExpression,
    pub span: Span,
}

/// A class name mentioned in a heritage clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRef {
    pub name: Name,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Variable name without the `$`.
    pub name: String,
    pub ty: Option<TypeNode>,
    pub flags: ParamFlags,
    pub span: Span,
}

impl Param {
    /// A caller may omit this argument.
    pub fn is_optional(&self) -> bool {
        self.flags
            .intersects(ParamFlags::HAS_DEFAULT | ParamFlags::VARIADIC)
    }

    pub fn is_variadic(&self) -> bool {
        self.flags.contains(ParamFlags::VARIADIC)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: Name,
    pub name_span: Span,
    pub modifiers: ModifierFlags,
    pub returns_by_ref: bool,
    pub params: Vec<Param>,
    pub return_type: Option<TypeNode>,
    pub span: Span,
}

impl MethodDecl {
    /// Parameters a caller must pass.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| !p.is_optional()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Property name without the `$`.
    pub name: String,
    pub modifiers: ModifierFlags,
    pub ty: Option<TypeNode>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    Method(MethodDecl),
    Property(PropertyDecl),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub kind: ClassKind,
    pub name: Name,
    pub name_span: Span,
    pub modifiers: ModifierFlags,
    /// The parent class of a class; the extended interfaces of an interface.
    pub extends: Vec<NameRef>,
    /// Implemented interfaces (classes only).
    pub implements: Vec<NameRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl ClassDecl {
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            Member::Property(_) => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(property) => Some(property),
            Member::Method(_) => None,
        })
    }

    pub fn method(&self, name: &Name) -> Option<&MethodDecl> {
        self.methods().find(|m| m.name == *name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties().find(|p| p.name == name)
    }
}

/// `class_alias('Original', 'Alias');`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasDecl {
    pub original: Name,
    pub alias: Name,
    pub span: Span,
}

/// Everything the checker needs from one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub classes: Vec<ClassDecl>,
    pub aliases: Vec<AliasDecl>,
}
