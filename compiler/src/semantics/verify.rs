//! Structural invariant checks for HIR programs.
//!
//! The checks mirror what structural passes rely on: each symbol has one
//! definition node and that node points back at it, block lists are
//! consistent in both directions, and every type is enclosed by a module.

use std::collections::HashMap;

use thiserror::Error;

use crate::semantics::flatten::detect::inner_type;
use crate::semantics::hir::{BlockLink, HirProgram};
use crate::semantics::hir::ids::{HirBlockId, HirNodeId, SymbolId};

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeViolation {
    #[error("node {node} declares unknown symbol {symbol}")]
    MissingSymbol { node: HirNodeId, symbol: SymbolId },
    #[error("node {node} declares {symbol}, whose definition is {recorded:?}")]
    DefinitionMismatch {
        node: HirNodeId,
        symbol: SymbolId,
        recorded: Option<HirNodeId>,
    },
    #[error("symbol {symbol} names {node} as definition, which does not declare it")]
    DanglingDefinition { symbol: SymbolId, node: HirNodeId },
    #[error("type definition {node} is backed by non-type symbol {symbol}")]
    NotAType { node: HirNodeId, symbol: SymbolId },
    #[error("node {node} is listed in {block} but linked as {actual:?}")]
    BrokenLink {
        block: HirBlockId,
        node: HirNodeId,
        actual: BlockLink,
    },
    #[error("block {block} lists unknown node {node}")]
    UnknownMember { block: HirBlockId, node: HirNodeId },
    #[error("block {block} loops back on itself")]
    CyclicBlock { block: HirBlockId },
    #[error("block {block} records tail {recorded:?} but ends at {actual:?}")]
    TailMismatch {
        block: HirBlockId,
        recorded: Option<HirNodeId>,
        actual: Option<HirNodeId>,
    },
    #[error("block {block} records {recorded} nodes but holds {actual}")]
    LengthMismatch {
        block: HirBlockId,
        recorded: usize,
        actual: usize,
    },
    #[error("node {node} claims block {block} but is not in its list")]
    StrayNode { node: HirNodeId, block: HirBlockId },
    #[error("type {symbol} is not enclosed by any module")]
    UnrootedType { symbol: SymbolId },
    #[error("type {symbol} is still nested inside another type")]
    NestedType { symbol: SymbolId },
}

/// Check every structural invariant of `program`.
pub fn verify_tree(program: &HirProgram) -> Vec<TreeViolation> {
    let mut violations = Vec::new();
    check_definitions(program, &mut violations);
    check_blocks(program, &mut violations);
    check_rooting(program, &mut violations);
    violations
}

/// [`verify_tree`] plus the guarantee that no type remains nested.
pub fn verify_flattened(program: &HirProgram) -> Vec<TreeViolation> {
    let mut violations = verify_tree(program);
    violations.extend(
        program
            .nodes
            .ids()
            .filter_map(|node| inner_type(program, node))
            .map(|symbol| TreeViolation::NestedType { symbol }),
    );
    violations
}

fn check_definitions(program: &HirProgram, violations: &mut Vec<TreeViolation>) {
    for (node, entry) in program.nodes.iter() {
        let Some(symbol) = entry.declared_symbol() else {
            continue;
        };
        let Some(declared) = program.symbols.get(symbol) else {
            violations.push(TreeViolation::MissingSymbol { node, symbol });
            continue;
        };
        if declared.def_point != Some(node) {
            violations.push(TreeViolation::DefinitionMismatch {
                node,
                symbol,
                recorded: declared.def_point,
            });
        }
        if entry.is_type_def() && !declared.kind.is_type() {
            violations.push(TreeViolation::NotAType { node, symbol });
        }
    }

    for symbol in program.symbols.iter() {
        let Some(node) = symbol.def_point else {
            continue;
        };
        let declares = program
            .node(node)
            .and_then(|entry| entry.declared_symbol())
            .is_some_and(|declared| declared == symbol.id);
        if !declares {
            violations.push(TreeViolation::DanglingDefinition {
                symbol: symbol.id,
                node,
            });
        }
    }
}

fn check_blocks(program: &HirProgram, violations: &mut Vec<TreeViolation>) {
    let mut listed = HashMap::new();

    for (block, entry) in program.blocks.iter() {
        let mut prev = None;
        let mut cursor = entry.head;
        let mut count = 0usize;

        while let Some(node) = cursor {
            if count >= program.nodes.len() || listed.insert(node, block).is_some() {
                violations.push(TreeViolation::CyclicBlock { block });
                break;
            }
            let Some(member) = program.node(node) else {
                violations.push(TreeViolation::UnknownMember { block, node });
                break;
            };
            if member.link.block != Some(block) || member.link.prev != prev {
                violations.push(TreeViolation::BrokenLink {
                    block,
                    node,
                    actual: member.link,
                });
            }
            count += 1;
            prev = Some(node);
            cursor = member.link.next;
        }

        if entry.tail != prev && cursor.is_none() {
            violations.push(TreeViolation::TailMismatch {
                block,
                recorded: entry.tail,
                actual: prev,
            });
        }
        if entry.len != count {
            violations.push(TreeViolation::LengthMismatch {
                block,
                recorded: entry.len,
                actual: count,
            });
        }
    }

    for (node, entry) in program.nodes.iter() {
        if let Some(block) = entry.link.block {
            if listed.get(&node) != Some(&block) {
                violations.push(TreeViolation::StrayNode { node, block });
            }
        }
    }
}

fn check_rooting(program: &HirProgram, violations: &mut Vec<TreeViolation>) {
    for symbol in program.symbols.iter() {
        let defined = symbol.def_point.is_some();
        if symbol.kind.is_type() && defined && program.owning_module(symbol.id).is_none() {
            violations.push(TreeViolation::UnrootedType { symbol: symbol.id });
        }
    }
}
