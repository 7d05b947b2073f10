//! Ordered, identity-keyed collection of nested types.

use crate::semantics::flatten::detect::inner_type;
use crate::semantics::hir::HirProgram;
use crate::semantics::hir::ids::{HirNodeId, SymbolId};
use crate::semantics::symbols::SymbolIdSet;

/// Distinct nested type symbols in first-discovery order.
#[derive(Debug, Default, Clone)]
pub struct NestedTypes {
    order: Vec<SymbolId>,
    seen: SymbolIdSet,
}

impl NestedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `symbol` unless it is already present; returns whether it was new.
    pub fn insert(&mut self, symbol: SymbolId) -> bool {
        if !self.seen.insert(symbol) {
            return false;
        }
        self.order.push(symbol);
        true
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.seen.contains(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[SymbolId] {
        &self.order
    }
}

impl Extend<SymbolId> for NestedTypes {
    fn extend<T: IntoIterator<Item = SymbolId>>(&mut self, iter: T) {
        for symbol in iter {
            self.insert(symbol);
        }
    }
}

impl FromIterator<SymbolId> for NestedTypes {
    fn from_iter<T: IntoIterator<Item = SymbolId>>(iter: T) -> Self {
        let mut collected = Self::new();
        collected.extend(iter);
        collected
    }
}

/// Run the detector over `nodes` and collect every nested type once.
///
/// `nodes` may list a node several times.
pub fn collect_nested_types(
    program: &HirProgram,
    nodes: impl IntoIterator<Item = HirNodeId>,
) -> NestedTypes {
    nodes
        .into_iter()
        .filter_map(|node| inner_type(program, node))
        .collect()
}
