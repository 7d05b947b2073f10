//! Flattening of nested aggregate types.
//!
//! Every class or record declared directly inside another type's body is
//! moved to the end of its module's top-level block. The pass first scans
//! the whole program without mutating it, then applies all moves. Because
//! each destination is found by walking the full parent chain up to the
//! module, types nested at any depth reach the module in one run, and a
//! second run finds nothing to do.

pub mod collect;
pub mod config;
pub mod detect;
pub mod error;
pub mod relocate;

use tracing::{info, info_span, warn};

use crate::semantics::hir::HirProgram;
use crate::semantics::hir::ids::{HirNodeId, SymbolId};
use crate::semantics::verify::{TreeViolation, verify_flattened, verify_tree};

pub use collect::{NestedTypes, collect_nested_types};
pub use config::{FlattenConfig, ScanOrder};
pub use detect::inner_type;
pub use error::{FlattenError, VerifyStage};
pub use relocate::{Relocation, apply_relocations, plan_relocations};

/// Summary of one run of the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Number of node visits made by the scan.
    pub scanned: usize,
    /// Moves performed, in application order.
    pub relocated: Vec<Relocation>,
}

impl FlattenReport {
    pub fn relocated_symbols(&self) -> Vec<SymbolId> {
        self.relocated.iter().map(|relocation| relocation.symbol).collect()
    }

    pub fn is_noop(&self) -> bool {
        self.relocated.is_empty()
    }
}

/// The nested type flattening pass.
#[derive(Debug, Clone, Default)]
pub struct FlattenClasses {
    config: FlattenConfig,
}

impl FlattenClasses {
    pub fn new(config: FlattenConfig) -> Self {
        Self { config }
    }

    /// Run the pass over `program`, enumerating nodes per the configured order.
    pub fn run(&self, program: &mut HirProgram) -> Result<FlattenReport, FlattenError> {
        let nodes = match self.config.scan_order {
            ScanOrder::Tree => program.walk(),
            ScanOrder::Allocation => program.nodes.ids().collect(),
        };
        self.run_with_nodes(program, nodes)
    }

    /// Run the pass with a caller-supplied node enumeration.
    ///
    /// The enumeration may repeat nodes; each nested type still moves once.
    pub fn run_with_nodes(
        &self,
        program: &mut HirProgram,
        nodes: Vec<HirNodeId>,
    ) -> Result<FlattenReport, FlattenError> {
        let span = info_span!("pass.flatten_classes", order = ?self.config.scan_order);
        let _enter = span.enter();

        if self.config.verify_input {
            check(verify_tree(program), VerifyStage::Input)?;
        }

        let nested = collect_nested_types(program, nodes.iter().copied());
        let plan = plan_relocations(program, &nested)?;
        apply_relocations(program, &plan)?;

        if self.config.verify_output {
            check(verify_flattened(program), VerifyStage::Output)?;
        }

        info!(
            scanned = nodes.len(),
            relocated = plan.len(),
            "flattened nested types"
        );
        Ok(FlattenReport {
            scanned: nodes.len(),
            relocated: plan,
        })
    }
}

/// Flatten `program` in place with the default configuration.
pub fn flatten_classes(program: &mut HirProgram) -> Result<(), FlattenError> {
    FlattenClasses::default().run(program).map(|_| ())
}

fn check(violations: Vec<TreeViolation>, stage: VerifyStage) -> Result<(), FlattenError> {
    if violations.is_empty() {
        return Ok(());
    }

    for violation in &violations {
        warn!(%stage, %violation, "tree invariant violated");
    }
    Err(FlattenError::Verification { stage, violations })
}
