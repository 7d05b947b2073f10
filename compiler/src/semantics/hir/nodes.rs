//! High-level HIR node definitions.
//!
//! These structures represent the symbol-resolved program handed to the
//! semantic passes. Every node lives in the program arena; statement
//! sequences are intrusive linked lists threaded through [`BlockLink`] so a
//! node can be moved between blocks without touching its siblings.

use flux_core::ast::{AggregateKind, TypeIdentKind};
use flux_core::diag::Span;

use super::ids::{HirBlockId, HirNodeId, SymbolId};

/// A single HIR node together with its position in a containing block.
#[derive(Debug)]
pub struct HirNode {
    pub kind: HirNodeKind,
    pub span: Option<Span>,
    pub link: BlockLink,
}

impl HirNode {
    pub fn new(kind: HirNodeKind, span: Option<Span>) -> Self {
        Self {
            kind,
            span,
            link: BlockLink::default(),
        }
    }

    /// Symbol declared by this node, if it is a declaration.
    pub fn declared_symbol(&self) -> Option<SymbolId> {
        match &self.kind {
            HirNodeKind::Module { symbol, .. }
            | HirNodeKind::TypeDef { symbol, .. }
            | HirNodeKind::Function { symbol, .. }
            | HirNodeKind::Field { symbol, .. }
            | HirNodeKind::Param { symbol, .. }
            | HirNodeKind::Let { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    /// Statement block owned by this node.
    pub fn body(&self) -> Option<HirBlockId> {
        match &self.kind {
            HirNodeKind::Module { body, .. }
            | HirNodeKind::TypeDef { body, .. }
            | HirNodeKind::Function { body, .. } => Some(*body),
            _ => None,
        }
    }

    /// Children held directly by this node rather than through a block.
    pub fn operands(&self) -> Vec<HirNodeId> {
        match &self.kind {
            HirNodeKind::Function {
                params, ret_type, ..
            } => params.iter().copied().chain(*ret_type).collect(),
            HirNodeKind::Field { ty, .. } => vec![*ty],
            HirNodeKind::Param { ty, .. } => ty.iter().copied().collect(),
            HirNodeKind::Let { ty, value, .. } => ty.iter().chain(value.iter()).copied().collect(),
            HirNodeKind::Call { callee, args } => {
                std::iter::once(*callee).chain(args.iter().copied()).collect()
            }
            HirNodeKind::New { ty, args } => {
                std::iter::once(*ty).chain(args.iter().copied()).collect()
            }
            HirNodeKind::Return { value } => value.iter().copied().collect(),
            HirNodeKind::Module { .. }
            | HirNodeKind::TypeDef { .. }
            | HirNodeKind::BuiltinType(_)
            | HirNodeKind::TypeRef { .. }
            | HirNodeKind::Ident { .. }
            | HirNodeKind::Literal(_) => Vec::new(),
        }
    }

    pub fn is_type_def(&self) -> bool {
        matches!(self.kind, HirNodeKind::TypeDef { .. })
    }
}

/// Variants describing the different node kinds.
#[derive(Debug)]
pub enum HirNodeKind {
    Module {
        symbol: SymbolId,
        body: HirBlockId,
    },
    TypeDef {
        symbol: SymbolId,
        kind: AggregateKind,
        body: HirBlockId,
    },
    Function {
        symbol: SymbolId,
        params: Vec<HirNodeId>,
        ret_type: Option<HirNodeId>,
        body: HirBlockId,
    },
    Field {
        symbol: SymbolId,
        ty: HirNodeId,
    },
    Param {
        symbol: SymbolId,
        ty: Option<HirNodeId>,
    },
    Let {
        symbol: SymbolId,
        ty: Option<HirNodeId>,
        value: Option<HirNodeId>,
    },
    BuiltinType(TypeIdentKind),
    /// Reference naming a user-defined type.
    TypeRef {
        name: String,
        symbol: Option<SymbolId>,
    },
    Ident {
        name: String,
        symbol: Option<SymbolId>,
    },
    Literal(HirLiteral),
    Call {
        callee: HirNodeId,
        args: Vec<HirNodeId>,
    },
    New {
        ty: HirNodeId,
        args: Vec<HirNodeId>,
    },
    Return {
        value: Option<HirNodeId>,
    },
}

/// Literal variants lowered into HIR.
#[derive(Debug, Clone, PartialEq)]
pub enum HirLiteral {
    Int(i128),
    String(String),
    Bool(bool),
}

/// Position of a node inside its containing block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockLink {
    pub block: Option<HirBlockId>,
    pub prev: Option<HirNodeId>,
    pub next: Option<HirNodeId>,
}

/// Ordered statement sequence owned by a module, type, or function.
#[derive(Debug, Default)]
pub struct HirBlock {
    pub owner: Option<HirNodeId>,
    pub head: Option<HirNodeId>,
    pub tail: Option<HirNodeId>,
    pub len: usize,
}

impl HirBlock {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
