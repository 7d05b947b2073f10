//! Symbol table entries and helpers.
//!
//! Symbols describe named program elements (modules, types, functions,
//! fields, locals) and are stored in a central table so multiple semantic
//! passes can share the same metadata without duplication.

use std::collections::HashSet;

use flux_core::diag::Span;

use crate::semantics::hir::ids::{HirNodeId, SymbolId};

/// Classification of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Module,
    Type,
    Function,
    Field,
    Param,
    Local,
}

impl SymbolKind {
    /// Human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::Type => "type",
            SymbolKind::Function => "function",
            SymbolKind::Field => "field",
            SymbolKind::Param => "parameter",
            SymbolKind::Local => "local",
        }
    }

    pub fn is_type(self) -> bool {
        self == SymbolKind::Type
    }

    pub fn is_module(self) -> bool {
        self == SymbolKind::Module
    }
}

/// Metadata describing a single symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub span: Option<Span>,
    /// The node declaring this symbol.
    pub def_point: Option<HirNodeId>,
}

impl Symbol {
    /// Convenience constructor.
    pub fn new(id: SymbolId, name: impl Into<String>, kind: SymbolKind, span: Option<Span>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            span,
            def_point: None,
        }
    }
}

/// Central registry of all symbols declared within a program.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Allocate a new symbol entry.
    pub fn alloc(&mut self, name: impl Into<String>, kind: SymbolKind, span: Option<Span>) -> SymbolId {
        let id = SymbolId::from_raw(self.entries.len() as u32);
        self.entries.push(Symbol::new(id, name, kind, span));
        id
    }

    /// Retrieve a symbol by identifier.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.entries.get(id.to_raw() as usize)
    }

    /// Retrieve a symbol mutably.
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.entries.get_mut(id.to_raw() as usize)
    }

    /// Record the node declaring `id`.
    pub fn set_def_point(&mut self, id: SymbolId, node: HirNodeId) {
        if let Some(symbol) = self.get_mut(id) {
            symbol.def_point = Some(node);
        }
    }

    /// Name of a symbol, or `"?"` for unknown identifiers.
    pub fn name(&self, id: SymbolId) -> &str {
        self.get(id).map(|symbol| symbol.name.as_str()).unwrap_or("?")
    }

    /// Iterate over stored symbols.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table currently has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convenience alias for sets of symbol identifiers.
pub type SymbolIdSet = HashSet<SymbolId>;
