//! Relocation of nested type definitions to their module.
//!
//! Relocation runs in two steps. Planning reads the program and resolves,
//! for every collected symbol, where its definition sits and which module
//! body receives it. Applying the plan then detaches each definition and
//! appends it to that body. A plan that fails leaves the program untouched.

use tracing::debug;

use crate::semantics::flatten::collect::NestedTypes;
use crate::semantics::flatten::error::FlattenError;
use crate::semantics::hir::HirProgram;
use crate::semantics::hir::ids::{HirBlockId, HirNodeId, SymbolId};

/// A single planned move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub symbol: SymbolId,
    pub definition: HirNodeId,
    /// Block holding the definition before the move.
    pub from: HirBlockId,
    pub module: SymbolId,
    /// Body of `module`; the definition is appended here.
    pub to: HirBlockId,
}

/// Resolve source and destination of every nested type, in collection order.
pub fn plan_relocations(
    program: &HirProgram,
    nested: &NestedTypes,
) -> Result<Vec<Relocation>, FlattenError> {
    nested
        .iter()
        .map(|symbol| plan_one(program, symbol))
        .collect()
}

fn plan_one(program: &HirProgram, symbol: SymbolId) -> Result<Relocation, FlattenError> {
    let name = program.symbols.name(symbol).to_string();
    let Some(definition) = program.symbols.get(symbol).and_then(|entry| entry.def_point) else {
        return Err(FlattenError::MissingDefinition { symbol, name });
    };
    let Some(from) = program.containing_block(definition) else {
        return Err(FlattenError::DetachedDefinition { symbol, name });
    };
    let Some(module) = program.owning_module(symbol) else {
        return Err(FlattenError::UnrootedType { symbol, name });
    };
    let to = program
        .module_body(module)
        .ok_or(FlattenError::MissingModuleBody { module })?;

    Ok(Relocation {
        symbol,
        definition,
        from,
        module,
        to,
    })
}

/// Move each planned definition to the tail of its module body.
pub fn apply_relocations(
    program: &mut HirProgram,
    plan: &[Relocation],
) -> Result<(), FlattenError> {
    for relocation in plan {
        program.detach(relocation.definition)?;
        program.push_back(relocation.to, relocation.definition)?;
        debug!(
            symbol = %relocation.symbol,
            name = %program.symbols.name(relocation.symbol),
            module = %program.symbols.name(relocation.module),
            "moved nested type to module level"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::flatten::collect::collect_nested_types;
    use crate::semantics::hir::{HirNode, HirNodeKind};
    use crate::semantics::symbols::SymbolKind;
    use flux_core::ast::AggregateKind;

    fn add_type(program: &mut HirProgram, name: &str, container: HirBlockId) -> (SymbolId, HirNodeId, HirBlockId) {
        let symbol = program.symbols.alloc(name, SymbolKind::Type, None);
        let body = program.alloc_block();
        let node = program.alloc_node(HirNode::new(
            HirNodeKind::TypeDef {
                symbol,
                kind: AggregateKind::Class,
                body,
            },
            None,
        ));
        program.set_block_owner(body, node).expect("owner");
        program.symbols.set_def_point(symbol, node);
        program.push_back(container, node).expect("link");
        (symbol, node, body)
    }

    fn add_module(program: &mut HirProgram, name: &str) -> (SymbolId, HirBlockId) {
        let symbol = program.symbols.alloc(name, SymbolKind::Module, None);
        let body = program.alloc_block();
        let node = program.alloc_node(HirNode::new(HirNodeKind::Module { symbol, body }, None));
        program.set_block_owner(body, node).expect("owner");
        program.symbols.set_def_point(symbol, node);
        program.roots.push(node);
        (symbol, body)
    }

    #[test]
    fn plans_every_level_against_the_module() {
        let mut program = HirProgram::new();
        let (module, module_body) = add_module(&mut program, "M");
        let (_, a_node, a_body) = add_type(&mut program, "A", module_body);
        let (b, b_node, b_body) = add_type(&mut program, "B", a_body);
        let (c, c_node, _) = add_type(&mut program, "C", b_body);

        let nested = collect_nested_types(&program, program.walk());
        assert_eq!(nested.as_slice(), &[b, c]);

        let plan = plan_relocations(&program, &nested).expect("plan");
        assert_eq!(plan.len(), 2);
        assert_eq!((plan[0].from, plan[0].to, plan[0].module), (a_body, module_body, module));
        assert_eq!((plan[1].from, plan[1].to, plan[1].module), (b_body, module_body, module));

        apply_relocations(&mut program, &plan).expect("apply");
        assert_eq!(
            program.block_nodes(module_body).collect::<Vec<_>>(),
            vec![a_node, b_node, c_node]
        );
        assert!(program.block(a_body).is_some_and(|block| block.is_empty()));
        assert!(program.block(b_body).is_some_and(|block| block.is_empty()));
    }

    #[test]
    fn unrooted_type_fails_before_any_move() {
        let mut program = HirProgram::new();
        let (_, module_body) = add_module(&mut program, "M");
        let (_, _, a_body) = add_type(&mut program, "A", module_body);
        let (b, b_node, _) = add_type(&mut program, "B", a_body);

        // A type chain whose outermost type sits in a block nobody owns.
        let orphan_block = program.alloc_block();
        let (_, _, orphan_body) = add_type(&mut program, "Orphan", orphan_block);
        let (lost, _, _) = add_type(&mut program, "Lost", orphan_body);

        let nested: NestedTypes = [b, lost].into_iter().collect();
        let err = plan_relocations(&program, &nested).expect_err("unrooted chain");
        assert!(matches!(err, FlattenError::UnrootedType { symbol, .. } if symbol == lost));
        assert_eq!(program.containing_block(b_node), Some(a_body));
    }

    #[test]
    fn symbol_without_definition_is_reported() {
        let mut program = HirProgram::new();
        let ghost = program.symbols.alloc("Ghost", SymbolKind::Type, None);
        let nested: NestedTypes = [ghost].into_iter().collect();

        let err = plan_relocations(&program, &nested).expect_err("missing definition");
        assert!(matches!(err, FlattenError::MissingDefinition { symbol, .. } if symbol == ghost));
    }
}
