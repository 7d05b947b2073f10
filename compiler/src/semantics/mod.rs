//! Semantic analysis facade.
//!
//! Lowering turns the parsed AST into the arena-backed HIR, resolving names
//! along the way. Structural passes such as type flattening then rewrite the
//! HIR in place, and the verifier checks the invariants they rely on.

pub mod diagnostics;
pub mod flatten;
pub mod hir;
pub mod lowering;
pub mod symbols;
pub mod verify;

pub use diagnostics::{SemanticDiagnostic, SemanticErrorCode};
pub use flatten::{FlattenClasses, FlattenConfig, FlattenError, FlattenReport, ScanOrder, flatten_classes};
pub use lowering::{LoweringContext, LoweringResult};
pub use verify::{TreeViolation, verify_flattened, verify_tree};
