//! High-level intermediate representation (HIR) support.
//!
//! This module owns the arena-backed program tree together with utilities
//! for navigating, mutating, and formatting it.

pub mod arena;
pub mod display;
pub mod ids;
pub mod nodes;
pub mod program;

pub use arena::Arena;
pub use display::{HirFormatter, format_program};
pub use ids::{ArenaId, HirBlockId, HirNodeId, ScopeId, SymbolId};
pub use nodes::{BlockLink, HirBlock, HirLiteral, HirNode, HirNodeKind};
pub use program::{BlockNodes, HirProgram, TreeError};
