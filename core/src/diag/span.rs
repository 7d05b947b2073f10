//! Source span helpers used throughout diagnostic reporting.
//!
//! A `Span` tracks byte offsets within a single file and is attached to
//! identifiers and AST nodes so higher layers can surface precise errors.

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
