//! Common types and utilities for the isect type checker.
//!
//! This crate provides foundational types used across all isect crates:
//! - Source spans (`Span`)
//! - Line/column positions (`LineMap`, `Position`)
//! - Diagnostic records and message templates
//! - Checker limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics shared by the validator, the linker and the CLI
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/common_tests.rs"]
mod common_tests;
