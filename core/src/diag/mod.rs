//! Diagnostic utilities shared across the core crate.
//!
//! Source spans live here so lowering, semantic passes, and tests agree on a
//! common representation.

pub mod span;

pub use span::Span;
