//! Failures of the flattening pass.
//!
//! Every variant signals a malformed program handed over by earlier stages.
//! They are internal compiler errors: the compilation stops, nothing retries.

use std::fmt;

use thiserror::Error;

use crate::semantics::hir::TreeError;
use crate::semantics::hir::ids::SymbolId;
use crate::semantics::verify::TreeViolation;

/// Point of the pass at which verification ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStage {
    Input,
    Output,
}

impl fmt::Display for VerifyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyStage::Input => f.write_str("input"),
            VerifyStage::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("type `{name}` ({symbol}) has no definition node")]
    MissingDefinition { symbol: SymbolId, name: String },
    #[error("definition of type `{name}` ({symbol}) is not held by any block")]
    DetachedDefinition { symbol: SymbolId, name: String },
    #[error("type `{name}` ({symbol}) is not enclosed by any module")]
    UnrootedType { symbol: SymbolId, name: String },
    #[error("module {module} has no body block")]
    MissingModuleBody { module: SymbolId },
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("{stage} verification failed with {count} violation(s)", count = .violations.len())]
    Verification {
        stage: VerifyStage,
        violations: Vec<TreeViolation>,
    },
}
