//! Name resolution support.
//!
//! The resolver owns the scope tree and the symbol table while lowering runs.
//! Once lowering finishes, the table moves into the program and the scopes
//! are dropped: later passes navigate through definition points instead.

use std::collections::HashMap;

use flux_core::diag::Span;

use crate::semantics::hir::Arena;
use crate::semantics::hir::ids::{ScopeId, SymbolId};
use crate::semantics::symbols::symbol::{Symbol, SymbolKind, SymbolTable};

/// Names bound directly in one lexical region.
#[derive(Debug, Default)]
struct LexicalScope {
    parent: Option<ScopeId>,
    names: HashMap<String, SymbolId>,
}

/// Lexical resolver used during lowering.
#[derive(Debug)]
pub struct SymbolResolver {
    scopes: Arena<ScopeId, LexicalScope>,
    root: ScopeId,
    /// Open scopes below the root, innermost last.
    open: Vec<ScopeId>,
    symbols: SymbolTable,
}

impl Default for SymbolResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolResolver {
    /// Create a resolver with a fresh root scope.
    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(LexicalScope::default());
        Self {
            scopes,
            root,
            open: Vec::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// Enter a new child scope of the current one.
    pub fn push_child_scope(&mut self) -> ScopeId {
        let child = self.scopes.alloc(LexicalScope {
            parent: Some(self.current_scope()),
            names: HashMap::new(),
        });
        self.open.push(child);
        child
    }

    /// Leave the current scope. The root scope is never left.
    pub fn pop_scope(&mut self) -> Option<ScopeId> {
        self.open.pop()
    }

    pub fn current_scope(&self) -> ScopeId {
        self.open.last().copied().unwrap_or(self.root)
    }

    /// Declare a symbol in the current scope, returning the outcome.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        kind: SymbolKind,
        span: Option<Span>,
    ) -> DeclarationResult {
        let name = name.into();
        let scope = self.current_scope();

        if let Some(existing) = self.scopes.get(scope).and_then(|entry| entry.names.get(&name)) {
            return DeclarationResult::Duplicate {
                existing: *existing,
            };
        }

        let symbol = self.symbols.alloc(name.clone(), kind, span);
        if let Some(entry) = self.scopes.get_mut(scope) {
            entry.names.insert(name, symbol);
        }
        DeclarationResult::Ok(symbol)
    }

    /// Allocate a symbol that is not visible to lookups.
    ///
    /// Used for redefinitions: the declaration still needs a symbol of its
    /// own, but the first definition keeps the name.
    pub fn declare_hidden(
        &mut self,
        name: impl Into<String>,
        kind: SymbolKind,
        span: Option<Span>,
    ) -> SymbolId {
        self.symbols.alloc(name, kind, span)
    }

    /// Lookup a name starting at the current scope and walking outwards.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut current = Some(self.current_scope());
        while let Some(id) = current {
            let scope = self.scopes.get(id)?;
            if let Some(symbol) = scope.names.get(name) {
                return Some(*symbol);
            }
            current = scope.parent;
        }
        None
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Finish resolution and hand over the symbol table.
    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }
}

/// Outcome of attempting to declare a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationResult {
    Ok(SymbolId),
    Duplicate { existing: SymbolId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let mut resolver = SymbolResolver::new();
        let DeclarationResult::Ok(outer) = resolver.declare("Outer", SymbolKind::Type, None) else {
            panic!("first declaration must succeed");
        };

        resolver.push_child_scope();
        assert_eq!(resolver.lookup("Outer"), Some(outer));

        let DeclarationResult::Ok(shadow) = resolver.declare("Outer", SymbolKind::Field, None) else {
            panic!("shadowing in a child scope is allowed");
        };
        assert_eq!(resolver.lookup("Outer"), Some(shadow));

        resolver.pop_scope();
        assert_eq!(resolver.lookup("Outer"), Some(outer));
    }

    #[test]
    fn sibling_scopes_do_not_see_each_other() {
        let mut resolver = SymbolResolver::new();
        resolver.push_child_scope();
        resolver.declare("local", SymbolKind::Local, None);
        resolver.pop_scope();

        resolver.push_child_scope();
        assert_eq!(resolver.lookup("local"), None);
    }

    #[test]
    fn reports_duplicates_in_same_scope() {
        let mut resolver = SymbolResolver::new();
        let first = resolver.declare("alpha", SymbolKind::Function, None);
        let second = resolver.declare("alpha", SymbolKind::Function, None);

        let DeclarationResult::Ok(existing) = first else {
            panic!("first declaration must succeed");
        };
        assert_eq!(second, DeclarationResult::Duplicate { existing });

        let hidden = resolver.declare_hidden("alpha", SymbolKind::Function, None);
        assert_ne!(hidden, existing);
        assert_eq!(resolver.lookup("alpha"), Some(existing));
        assert_eq!(resolver.into_symbols().len(), 2);
    }

    #[test]
    fn root_scope_is_never_popped() {
        let mut resolver = SymbolResolver::new();
        let root = resolver.current_scope();
        assert_eq!(resolver.pop_scope(), None);

        let child = resolver.push_child_scope();
        assert_eq!(resolver.current_scope(), child);
        assert_eq!(resolver.pop_scope(), Some(child));
        assert_eq!(resolver.current_scope(), root);
    }
}
