//! Driver for the semantic stages.
//!
//! Lowers a parsed program to HIR, stops if name resolution reported
//! problems, then runs the structural passes.

use flux_core::ast::Program;
use thiserror::Error;
use tracing::{info_span, warn};

use crate::semantics::diagnostics::SemanticDiagnostic;
use crate::semantics::flatten::{FlattenClasses, FlattenConfig, FlattenError, FlattenReport};
use crate::semantics::hir::{HirProgram, TreeError};
use crate::semantics::lowering::LoweringContext;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub flatten: FlattenConfig,
    /// Run the structural passes even when lowering reported diagnostics.
    pub allow_diagnostics: bool,
}

impl PipelineConfig {
    pub fn with_flatten(mut self, flatten: FlattenConfig) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn with_allow_diagnostics(mut self, enabled: bool) -> Self {
        self.allow_diagnostics = enabled;
        self
    }
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub program: HirProgram,
    /// Diagnostics tolerated under `allow_diagnostics`.
    pub diagnostics: Vec<SemanticDiagnostic>,
    pub flatten: FlattenReport,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("semantic analysis reported {} problem(s)", .0.len())]
    Diagnostics(Vec<SemanticDiagnostic>),
    #[error("lowering produced a malformed tree: {0}")]
    Lowering(#[from] TreeError),
    #[error("flattening failed: {0}")]
    Flatten(#[from] FlattenError),
}

impl PipelineError {
    pub fn diagnostics(&self) -> &[SemanticDiagnostic] {
        match self {
            PipelineError::Diagnostics(diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, ast: &Program) -> Result<PipelineOutput, PipelineError> {
        let lowered = {
            let span = info_span!("pipeline.lower", modules = ast.modules.len());
            let _enter = span.enter();
            LoweringContext::lower(ast)?
        };

        if !lowered.diagnostics.is_empty() {
            for diagnostic in &lowered.diagnostics {
                warn!(%diagnostic, "semantic diagnostic");
            }
            if !self.config.allow_diagnostics {
                return Err(PipelineError::Diagnostics(lowered.diagnostics));
            }
        }

        let mut program = lowered.program;
        let flatten = {
            let span = info_span!("pipeline.flatten");
            let _enter = span.enter();
            FlattenClasses::new(self.config.flatten.clone()).run(&mut program)?
        };

        Ok(PipelineOutput {
            program,
            diagnostics: lowered.diagnostics,
            flatten,
        })
    }
}
