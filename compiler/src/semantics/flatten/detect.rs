//! Nested type detection.
//!
//! A type definition is nested when the smallest named scope around its
//! definition point belongs to another type. Types declared directly in a
//! module or inside a function body are top-level for this purpose.

use tracing::trace;

use crate::semantics::hir::ids::{HirNodeId, SymbolId};
use crate::semantics::hir::{HirNodeKind, HirProgram};

/// Return the type symbol defined by `node` if its parent scope is a type.
///
/// Any node other than a type definition yields `None`, as does a type
/// definition without a backing type symbol or without a parent scope.
pub fn inner_type(program: &HirProgram, node: HirNodeId) -> Option<SymbolId> {
    let HirNodeKind::TypeDef { symbol, .. } = program.node(node)?.kind else {
        return None;
    };

    let inner = program.symbols.get(symbol)?;
    if !inner.kind.is_type() {
        return None;
    }

    let outer = program.symbols.get(program.defining_parent(symbol)?)?;
    if !outer.kind.is_type() {
        return None;
    }

    trace!(
        inner = %symbol,
        outer = %outer.id,
        name = %inner.name,
        "found nested type"
    );
    Some(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::hir::{HirBlockId, HirLiteral, HirNode};
    use crate::semantics::symbols::SymbolKind;
    use flux_core::ast::AggregateKind;

    struct Fixture {
        program: HirProgram,
        module_body: HirBlockId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut program = HirProgram::new();
            let symbol = program.symbols.alloc("M", SymbolKind::Module, None);
            let body = program.alloc_block();
            let module = program.alloc_node(HirNode::new(HirNodeKind::Module { symbol, body }, None));
            program.set_block_owner(body, module).expect("owner");
            program.symbols.set_def_point(symbol, module);
            program.roots.push(module);
            Self {
                program,
                module_body: body,
            }
        }

        fn definition(
            &mut self,
            name: &str,
            kind: SymbolKind,
            container: HirBlockId,
        ) -> (HirNodeId, HirBlockId) {
            let program = &mut self.program;
            let symbol = program.symbols.alloc(name, kind, None);
            let body = program.alloc_block();
            let node_kind = match kind {
                SymbolKind::Function => HirNodeKind::Function {
                    symbol,
                    params: Vec::new(),
                    ret_type: None,
                    body,
                },
                _ => HirNodeKind::TypeDef {
                    symbol,
                    kind: AggregateKind::Class,
                    body,
                },
            };
            let node = program.alloc_node(HirNode::new(node_kind, None));
            program.set_block_owner(body, node).expect("owner");
            program.symbols.set_def_point(symbol, node);
            program.push_back(container, node).expect("link");
            (node, body)
        }
    }

    #[test]
    fn module_level_type_is_not_nested() {
        let mut fixture = Fixture::new();
        let body = fixture.module_body;
        let (outer, _) = fixture.definition("Outer", SymbolKind::Type, body);
        assert_eq!(inner_type(&fixture.program, outer), None);
    }

    #[test]
    fn type_inside_type_is_nested() {
        let mut fixture = Fixture::new();
        let body = fixture.module_body;
        let (_, outer_body) = fixture.definition("Outer", SymbolKind::Type, body);
        let (inner, _) = fixture.definition("Inner", SymbolKind::Type, outer_body);

        let expected = fixture.program.node(inner).and_then(|node| node.declared_symbol());
        assert_eq!(inner_type(&fixture.program, inner), expected);
    }

    #[test]
    fn type_inside_method_is_not_nested() {
        let mut fixture = Fixture::new();
        let body = fixture.module_body;
        let (_, outer_body) = fixture.definition("Outer", SymbolKind::Type, body);
        let (_, method_body) = fixture.definition("method", SymbolKind::Function, outer_body);
        let (local, _) = fixture.definition("Local", SymbolKind::Type, method_body);

        assert_eq!(inner_type(&fixture.program, local), None);
    }

    #[test]
    fn detached_or_non_type_nodes_are_ignored() {
        let mut fixture = Fixture::new();
        let program = &mut fixture.program;
        let symbol = program.symbols.alloc("Loose", SymbolKind::Type, None);
        let body = program.alloc_block();
        let loose = program.alloc_node(HirNode::new(
            HirNodeKind::TypeDef {
                symbol,
                kind: AggregateKind::Record,
                body,
            },
            None,
        ));
        program.symbols.set_def_point(symbol, loose);
        let literal = program.alloc_node(HirNode::new(HirNodeKind::Literal(HirLiteral::Int(1)), None));

        assert_eq!(inner_type(program, loose), None);
        assert_eq!(inner_type(program, literal), None);
        assert_eq!(inner_type(program, HirNodeId::from_raw(1_000)), None);
    }

    #[test]
    fn type_def_with_non_type_symbol_is_ignored() {
        let mut fixture = Fixture::new();
        let body = fixture.module_body;
        let (_, outer_body) = fixture.definition("Outer", SymbolKind::Type, body);
        let program = &mut fixture.program;
        let wrong = program.symbols.alloc("field", SymbolKind::Field, None);
        let inner_body = program.alloc_block();
        let node = program.alloc_node(HirNode::new(
            HirNodeKind::TypeDef {
                symbol: wrong,
                kind: AggregateKind::Class,
                body: inner_body,
            },
            None,
        ));
        program.symbols.set_def_point(wrong, node);
        program.push_back(outer_body, node).expect("link");

        assert_eq!(inner_type(program, node), None);
    }
}
