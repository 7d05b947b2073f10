//! Symbol table support.
//!
//! Symbol management underpins name resolution during lowering and the
//! structural passes that run afterwards.

pub mod collector;
pub mod resolver;
pub mod symbol;

pub use collector::{
    SymbolCollection, declare_all, declare_one, item_signature, member_signature,
};
pub use resolver::{DeclarationResult, SymbolResolver};
pub use symbol::{Symbol, SymbolIdSet, SymbolKind, SymbolTable};
