//! Symbol collection for the declarations of one body.
//!
//! Lowering predeclares every item of a module, type, or function body
//! before lowering any of them, so declarations may refer to siblings that
//! appear later in the source. Duplicates are reported and still receive a
//! hidden symbol of their own.

use flux_core::ast::{Ident, Item, Member};

use crate::semantics::diagnostics::{SemanticDiagnostic, SemanticErrorCode};
use crate::semantics::hir::ids::SymbolId;
use crate::semantics::symbols::resolver::{DeclarationResult, SymbolResolver};
use crate::semantics::symbols::symbol::SymbolKind;

/// Output produced by the collection pass.
#[derive(Debug, Default)]
pub struct SymbolCollection {
    /// One symbol per declaration, in declaration order.
    pub symbols: Vec<SymbolId>,
    pub diagnostics: Vec<SemanticDiagnostic>,
}

/// Declare each `(name, kind)` pair in the resolver's current scope.
pub fn declare_all<'a>(
    resolver: &mut SymbolResolver,
    decls: impl IntoIterator<Item = (&'a Ident, SymbolKind)>,
) -> SymbolCollection {
    let mut collection = SymbolCollection::default();
    for (name, kind) in decls {
        let symbol = declare_one(resolver, name, kind, &mut collection.diagnostics);
        collection.symbols.push(symbol);
    }
    collection
}

/// Declare a single name, reporting a redefinition into `diagnostics`.
pub fn declare_one(
    resolver: &mut SymbolResolver,
    name: &Ident,
    kind: SymbolKind,
    diagnostics: &mut Vec<SemanticDiagnostic>,
) -> SymbolId {
    let span = name.span.clone();
    match resolver.declare(name.name.clone(), kind, span.clone()) {
        DeclarationResult::Ok(symbol) => symbol,
        DeclarationResult::Duplicate { existing } => {
            diagnostics.push(SemanticDiagnostic::new(
                format!("duplicate definition of {} `{}`", kind.as_str(), name.name),
                span.clone().unwrap_or_default(),
                SemanticErrorCode::DuplicateSymbol,
            ));

            if let Some(existing_symbol) = resolver.symbol(existing) {
                if let Some(existing_span) = existing_symbol.span.clone() {
                    diagnostics.push(SemanticDiagnostic::new(
                        format!("previous `{}` definition here", existing_symbol.kind.as_str()),
                        existing_span,
                        SemanticErrorCode::DuplicateSymbol,
                    ));
                }
            }

            resolver.declare_hidden(name.name.clone(), kind, span)
        }
    }
}

/// Name and symbol kind declared by a module-level or local item.
pub fn item_signature(item: &Item) -> (&Ident, SymbolKind) {
    match item {
        Item::Module(decl) => (&decl.name, SymbolKind::Module),
        Item::Obj(decl) => (&decl.name, SymbolKind::Type),
        Item::Fn(decl) => (&decl.name, SymbolKind::Function),
    }
}

/// Name and symbol kind declared by an aggregate member.
pub fn member_signature(member: &Member) -> (&Ident, SymbolKind) {
    match member {
        Member::Field(field) => (&field.name, SymbolKind::Field),
        Member::Method(method) => (&method.name, SymbolKind::Function),
        Member::Obj(decl) => (&decl.name, SymbolKind::Type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flux_core::ast::{Block, FnDecl, ObjDecl};
    use flux_core::diag::Span;

    fn spanned(name: &str, start: usize) -> Ident {
        Ident::with_span(name, Span::new(start, start + name.len()))
    }

    fn empty_fn(name: &str, start: usize) -> Item {
        let mut decl = FnDecl::new(name, Vec::new(), Block::default());
        decl.name = spanned(name, start);
        Item::Fn(decl)
    }

    #[test]
    fn collects_unique_symbols() {
        let mut resolver = SymbolResolver::new();
        let items = vec![empty_fn("alpha", 0), Item::Obj(ObjDecl::class("Beta", Vec::new()))];
        let collection = declare_all(&mut resolver, items.iter().map(item_signature));

        assert!(collection.diagnostics.is_empty());
        assert_eq!(collection.symbols.len(), 2);
        let beta = resolver.symbol(collection.symbols[1]).expect("beta declared");
        assert_eq!(beta.kind, SymbolKind::Type);
        assert_eq!(resolver.into_symbols().len(), 2);
    }

    #[test]
    fn reports_duplicates_and_keeps_one_symbol_per_declaration() {
        let mut resolver = SymbolResolver::new();
        let items = vec![empty_fn("alpha", 0), empty_fn("alpha", 10)];
        let collection = declare_all(&mut resolver, items.iter().map(item_signature));

        assert_eq!(collection.diagnostics.len(), 2);
        assert_eq!(collection.diagnostics[0].span, Span::new(10, 15));
        assert_eq!(collection.diagnostics[1].span, Span::new(0, 5));
        assert_eq!(collection.symbols.len(), 2);
        assert_ne!(collection.symbols[0], collection.symbols[1]);
        assert_eq!(resolver.lookup("alpha"), Some(collection.symbols[0]));
    }
}
