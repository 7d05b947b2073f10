//! Semantic diagnostics.
//!
//! Problems in the user's program found during lowering and name resolution
//! are reported through these values rather than through `Err`, so a single
//! run can surface every issue at once.

use std::fmt;

use flux_core::diag::Span;

/// Enumerates semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticErrorCode {
    UnresolvedSymbol,
    DuplicateSymbol,
    ExpectedType,
}

/// Semantic diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticDiagnostic {
    /// Human-readable message summarising the issue.
    pub message: String,
    /// Source span associated with the diagnostic.
    pub span: Span,
    /// Categorical identifier for programmatic handling.
    pub code: SemanticErrorCode,
}

impl SemanticDiagnostic {
    /// Create a new diagnostic.
    pub fn new(message: impl Into<String>, span: Span, code: SemanticErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
        }
    }
}

impl fmt::Display for SemanticDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {}..{} {}",
            self.code, self.span.start, self.span.end, self.message
        )
    }
}
