//! Type presentation.
//!
//! Renders type expressions back to declaration syntax for diagnostics and
//! tooling. Output is re-parseable: nested composites, nullable composites
//! and nullables inside a composite are parenthesized, names are printed without a leading
//! namespace separator.

use crate::types::TypeExpression;
use std::fmt;

/// Renders type expressions to source syntax.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeFormatter;

impl TypeFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, ty: &TypeExpression) -> String {
        let mut out = String::new();
        self.write(&mut out, ty, false);
        out
    }

    /// Immediate members of a union or intersection.
    pub fn members<'t>(&self, ty: &'t TypeExpression) -> Option<&'t [TypeExpression]> {
        ty.composite_members()
    }

    fn write(&self, out: &mut String, ty: &TypeExpression, nested: bool) {
        match ty {
            TypeExpression::Named(name) => out.push_str(name.as_str()),
            TypeExpression::Nullable(inner) => {
                if nested {
                    out.push('(');
                }
                out.push('?');
                self.write(out, inner, true);
                if nested {
                    out.push(')');
                }
            }
            TypeExpression::Union(members) => self.write_list(out, members, '|', nested),
            TypeExpression::Intersection(members) => self.write_list(out, members, '&', nested),
        }
    }

    fn write_list(&self, out: &mut String, members: &[TypeExpression], sep: char, nested: bool) {
        if nested {
            out.push('(');
        }
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            self.write(out, member, true);
        }
        if nested {
            out.push(')');
        }
    }
}

/// Render with the default formatter.
pub fn render(ty: &TypeExpression) -> String {
    TypeFormatter::new().render(ty)
}

/// Immediate members of a union or intersection, `None` otherwise.
pub fn members(ty: &TypeExpression) -> Option<&[TypeExpression]> {
    TypeFormatter::new().members(ty)
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
