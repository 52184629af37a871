//! Declaration parser for isect.
//!
//! Turns source text into a [`SourceFile`]: class-likes, their member
//! signatures with declared types, and `class_alias` calls. Method bodies and
//! free-standing code are skipped.

pub mod ast;
mod error;
mod parser;

pub use ast::{
    AliasDecl, ClassDecl, Member, MethodDecl, ModifierFlags, NameRef, Param, ParamFlags,
    PropertyDecl, SourceFile, TypeNode,
};
pub use error::ParseError;
pub use parser::Parser;

use isect_solver::TypeExpression;

/// Parse a whole source file.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    Parser::new(source).parse_source_file()
}

/// Parse a single type expression such as `?Foo` or `A&B`.
pub fn parse_type(text: &str) -> Result<TypeExpression, ParseError> {
    Parser::new(text).parse_standalone_type()
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;

#[cfg(test)]
#[path = "../tests/type_parser_tests.rs"]
mod type_parser_tests;
