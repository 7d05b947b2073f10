//! Whole-program HIR container.
//!
//! `HirProgram` owns every node, block, and symbol of a compilation. Blocks
//! are doubly linked lists threaded through the nodes, so detaching a node
//! or appending one to a block's tail is O(1) and never invalidates the
//! identifiers held elsewhere.

use thiserror::Error;

use super::arena::Arena;
use super::ids::{HirBlockId, HirNodeId, SymbolId};
use super::nodes::{BlockLink, HirBlock, HirNode, HirNodeKind};
use crate::semantics::symbols::{SymbolIdSet, SymbolTable};

/// Failures of the low-level link operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown node {0}")]
    UnknownNode(HirNodeId),
    #[error("unknown block {0}")]
    UnknownBlock(HirBlockId),
    #[error("node {node} is already linked into block {block}")]
    AlreadyLinked { node: HirNodeId, block: HirBlockId },
}

/// Container for all HIR of one compilation.
#[derive(Debug, Default)]
pub struct HirProgram {
    /// Arena storing every node.
    pub nodes: Arena<HirNodeId, HirNode>,
    /// Arena storing statement blocks.
    pub blocks: Arena<HirBlockId, HirBlock>,
    /// Symbols declared anywhere in the program.
    pub symbols: SymbolTable,
    /// Top-level module nodes, in source order.
    pub roots: Vec<HirNodeId>,
}

impl HirProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_node(&mut self, node: HirNode) -> HirNodeId {
        self.nodes.alloc(node)
    }

    /// Allocate an empty block; its owner is filled in once the owning node
    /// exists.
    pub fn alloc_block(&mut self) -> HirBlockId {
        self.blocks.alloc(HirBlock::default())
    }

    pub fn set_block_owner(&mut self, block: HirBlockId, owner: HirNodeId) -> Result<(), TreeError> {
        self.block_mut(block)?.owner = Some(owner);
        Ok(())
    }

    pub fn node(&self, id: HirNodeId) -> Option<&HirNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: HirNodeId) -> Option<&mut HirNode> {
        self.nodes.get_mut(id)
    }

    pub fn block(&self, id: HirBlockId) -> Option<&HirBlock> {
        self.blocks.get(id)
    }

    /// Append `node` as the last element of `block`.
    pub fn push_back(&mut self, block: HirBlockId, node: HirNodeId) -> Result<(), TreeError> {
        if let Some(current) = self.try_node(node)?.link.block {
            return Err(TreeError::AlreadyLinked {
                node,
                block: current,
            });
        }

        let tail = self.try_block(block)?.tail;
        if let Some(tail) = tail {
            self.try_node_mut(tail)?.link.next = Some(node);
        }

        self.try_node_mut(node)?.link = BlockLink {
            block: Some(block),
            prev: tail,
            next: None,
        };

        let entry = self.block_mut(block)?;
        if entry.head.is_none() {
            entry.head = Some(node);
        }
        entry.tail = Some(node);
        entry.len += 1;
        Ok(())
    }

    /// Unlink `node` from its containing block, returning that block.
    ///
    /// Remaining siblings stay contiguous and keep their order. Detaching a
    /// node that is not in any block is a no-op.
    pub fn detach(&mut self, node: HirNodeId) -> Result<Option<HirBlockId>, TreeError> {
        let link = self.try_node(node)?.link;
        let Some(block) = link.block else {
            return Ok(None);
        };

        match link.prev {
            Some(prev) => self.try_node_mut(prev)?.link.next = link.next,
            None => self.block_mut(block)?.head = link.next,
        }
        match link.next {
            Some(next) => self.try_node_mut(next)?.link.prev = link.prev,
            None => self.block_mut(block)?.tail = link.prev,
        }

        let entry = self.block_mut(block)?;
        entry.len = entry.len.saturating_sub(1);
        self.try_node_mut(node)?.link = BlockLink::default();
        Ok(Some(block))
    }

    /// Iterate over the nodes of `block` in order.
    pub fn block_nodes(&self, block: HirBlockId) -> BlockNodes<'_> {
        BlockNodes {
            program: self,
            next: self.block(block).and_then(|entry| entry.head),
            budget: self.nodes.len(),
        }
    }

    /// Block currently holding `node`.
    pub fn containing_block(&self, node: HirNodeId) -> Option<HirBlockId> {
        self.node(node)?.link.block
    }

    /// Node owning the block that currently holds `node`.
    pub fn parent_node(&self, node: HirNodeId) -> Option<HirNodeId> {
        self.block(self.containing_block(node)?)?.owner
    }

    /// Symbol of the smallest named scope enclosing `node`.
    pub fn parent_symbol(&self, node: HirNodeId) -> Option<SymbolId> {
        self.node(self.parent_node(node)?)?.declared_symbol()
    }

    /// Parent symbol of the definition point of `symbol`.
    pub fn defining_parent(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.parent_symbol(self.symbols.get(symbol)?.def_point?)
    }

    /// Module reached by following defining parents upwards from `symbol`.
    ///
    /// Returns `None` when the chain ends at something other than a module
    /// or loops back on itself.
    pub fn owning_module(&self, symbol: SymbolId) -> Option<SymbolId> {
        let mut current = self.defining_parent(symbol)?;
        for _ in 0..=self.symbols.len() {
            if self.symbols.get(current)?.kind.is_module() {
                return Some(current);
            }
            current = self.defining_parent(current)?;
        }
        None
    }

    /// Body block of a module symbol.
    pub fn module_body(&self, module: SymbolId) -> Option<HirBlockId> {
        let def = self.symbols.get(module)?.def_point?;
        match self.node(def)?.kind {
            HirNodeKind::Module { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Every node reachable from the roots, in pre-order.
    ///
    /// A node is listed before its operands, and operands before the
    /// contents of its body block.
    pub fn walk(&self) -> Vec<HirNodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<HirNodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            if order.len() > self.nodes.len() {
                // Corrupt links; the verifier reports the details.
                break;
            }

            let body: Vec<HirNodeId> = node
                .body()
                .map(|block| self.block_nodes(block).collect())
                .unwrap_or_default();
            stack.extend(body.into_iter().rev());
            stack.extend(node.operands().into_iter().rev());
        }

        order
    }

    /// Type symbols whose definition is reachable from the roots.
    pub fn type_symbols(&self) -> SymbolIdSet {
        self.walk()
            .into_iter()
            .filter_map(|id| match self.node(id)?.kind {
                HirNodeKind::TypeDef { symbol, .. } => Some(symbol),
                _ => None,
            })
            .collect()
    }

    fn try_node(&self, id: HirNodeId) -> Result<&HirNode, TreeError> {
        self.nodes.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn try_node_mut(&mut self, id: HirNodeId) -> Result<&mut HirNode, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))
    }

    fn try_block(&self, id: HirBlockId) -> Result<&HirBlock, TreeError> {
        self.blocks.get(id).ok_or(TreeError::UnknownBlock(id))
    }

    fn block_mut(&mut self, id: HirBlockId) -> Result<&mut HirBlock, TreeError> {
        self.blocks.get_mut(id).ok_or(TreeError::UnknownBlock(id))
    }
}

/// Iterator over the nodes of one block.
pub struct BlockNodes<'a> {
    program: &'a HirProgram,
    next: Option<HirNodeId>,
    budget: usize,
}

impl Iterator for BlockNodes<'_> {
    type Item = HirNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        self.next = self.program.node(current).and_then(|node| node.link.next);
        Some(current)
    }
}
