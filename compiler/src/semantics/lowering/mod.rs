//! AST to HIR lowering implementation.
//!
//! This module translates the front end's syntax tree into the
//! symbol-resolved, arena-backed program the structural passes operate on.
//! Every declaration gets a symbol whose definition point is the node that
//! declares it, and every definition is linked into the block of the body
//! that lexically contains it.

use flux_core::ast::{
    Block, Expr, FieldDecl, FnDecl, Ident, Item, Member, ModuleDecl, ObjDecl, Program, Stmt,
    TypeExpr,
};
use flux_core::diag::Span;
use tracing::debug;

use crate::semantics::diagnostics::{SemanticDiagnostic, SemanticErrorCode};
use crate::semantics::hir::ids::{HirBlockId, HirNodeId, SymbolId};
use crate::semantics::hir::{HirLiteral, HirNode, HirNodeKind, HirProgram, TreeError};
use crate::semantics::symbols::{
    SymbolKind, SymbolResolver, declare_all, declare_one, item_signature, member_signature,
};

/// Result of lowering a program.
#[derive(Debug)]
pub struct LoweringResult {
    pub program: HirProgram,
    pub diagnostics: Vec<SemanticDiagnostic>,
}

/// Context object orchestrating AST to HIR lowering.
#[derive(Debug)]
pub struct LoweringContext {
    program: HirProgram,
    resolver: SymbolResolver,
    diagnostics: Vec<SemanticDiagnostic>,
}

impl Default for LoweringContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LoweringContext {
    /// Create a fresh lowering context.
    pub fn new() -> Self {
        Self {
            program: HirProgram::new(),
            resolver: SymbolResolver::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Lower every module of `ast` into a single HIR program.
    pub fn lower(ast: &Program) -> Result<LoweringResult, TreeError> {
        Self::new().lower_program(ast)
    }

    fn lower_program(mut self, ast: &Program) -> Result<LoweringResult, TreeError> {
        let symbols = self.declare(ast.modules.iter().map(|decl| (&decl.name, SymbolKind::Module)));
        for (decl, symbol) in ast.modules.iter().zip(symbols) {
            let root = self.lower_module(decl, symbol, None)?;
            self.program.roots.push(root);
        }

        let Self {
            mut program,
            resolver,
            diagnostics,
        } = self;
        program.symbols = resolver.into_symbols();
        debug!(
            nodes = program.nodes.len(),
            symbols = program.symbols.len(),
            diagnostics = diagnostics.len(),
            "lowered program"
        );

        Ok(LoweringResult {
            program,
            diagnostics,
        })
    }

    fn lower_module(
        &mut self,
        decl: &ModuleDecl,
        symbol: SymbolId,
        container: Option<HirBlockId>,
    ) -> Result<HirNodeId, TreeError> {
        let body = self.program.alloc_block();
        let span = decl.span.clone().or_else(|| decl.name.span.clone());
        let node = self.define(HirNodeKind::Module { symbol, body }, span, symbol, container)?;

        self.resolver.push_child_scope();
        self.lower_items(&decl.items, body)?;
        self.resolver.pop_scope();
        Ok(node)
    }

    fn lower_items(&mut self, items: &[Item], body: HirBlockId) -> Result<(), TreeError> {
        let symbols = self.declare(items.iter().map(item_signature));
        for (item, symbol) in items.iter().zip(symbols) {
            self.lower_item(item, symbol, body)?;
        }
        Ok(())
    }

    fn lower_item(
        &mut self,
        item: &Item,
        symbol: SymbolId,
        container: HirBlockId,
    ) -> Result<HirNodeId, TreeError> {
        match item {
            Item::Module(decl) => self.lower_module(decl, symbol, Some(container)),
            Item::Obj(decl) => self.lower_object(decl, symbol, container),
            Item::Fn(decl) => self.lower_function(decl, symbol, container),
        }
    }

    fn lower_object(
        &mut self,
        decl: &ObjDecl,
        symbol: SymbolId,
        container: HirBlockId,
    ) -> Result<HirNodeId, TreeError> {
        let body = self.program.alloc_block();
        let node = self.define(
            HirNodeKind::TypeDef {
                symbol,
                kind: decl.kind,
                body,
            },
            decl.name.span.clone(),
            symbol,
            Some(container),
        )?;

        self.resolver.push_child_scope();
        let symbols = self.declare(decl.members.iter().map(member_signature));
        for (member, member_symbol) in decl.members.iter().zip(symbols) {
            match member {
                Member::Field(field) => {
                    self.lower_field(field, member_symbol, body)?;
                }
                Member::Method(method) => {
                    self.lower_function(method, member_symbol, body)?;
                }
                Member::Obj(nested) => {
                    self.lower_object(nested, member_symbol, body)?;
                }
            }
        }
        self.resolver.pop_scope();
        Ok(node)
    }

    fn lower_field(
        &mut self,
        field: &FieldDecl,
        symbol: SymbolId,
        container: HirBlockId,
    ) -> Result<HirNodeId, TreeError> {
        let ty = self.lower_type(&field.ty);
        self.define(
            HirNodeKind::Field { symbol, ty },
            field.name.span.clone(),
            symbol,
            Some(container),
        )
    }

    fn lower_function(
        &mut self,
        decl: &FnDecl,
        symbol: SymbolId,
        container: HirBlockId,
    ) -> Result<HirNodeId, TreeError> {
        let body = self.program.alloc_block();
        let node = self.define(
            HirNodeKind::Function {
                symbol,
                params: Vec::new(),
                ret_type: None,
                body,
            },
            decl.name.span.clone(),
            symbol,
            Some(container),
        )?;

        self.resolver.push_child_scope();
        let mut lowered_params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let ty = param.ty.as_ref().map(|ty| self.lower_type(ty));
            let param_symbol = self.declare_single(&param.name, SymbolKind::Param);
            let id = self.define(
                HirNodeKind::Param {
                    symbol: param_symbol,
                    ty,
                },
                param.name.span.clone(),
                param_symbol,
                None,
            )?;
            lowered_params.push(id);
        }
        let lowered_ret = decl.ret_type.as_ref().map(|ty| self.lower_type(ty));

        if let Some(HirNode {
            kind: HirNodeKind::Function {
                params, ret_type, ..
            },
            ..
        }) = self.program.node_mut(node)
        {
            *params = lowered_params;
            *ret_type = lowered_ret;
        }

        self.lower_block(&decl.body, body)?;
        self.resolver.pop_scope();
        Ok(node)
    }

    fn lower_block(&mut self, block: &Block, target: HirBlockId) -> Result<(), TreeError> {
        let local_items: Vec<&Item> = block
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Item(item) => Some(item.as_ref()),
                _ => None,
            })
            .collect();
        let mut item_symbols = self
            .declare(local_items.iter().copied().map(item_signature))
            .into_iter();

        for stmt in &block.stmts {
            match stmt {
                Stmt::Item(item) => {
                    if let Some(symbol) = item_symbols.next() {
                        self.lower_item(item, symbol, target)?;
                    }
                }
                Stmt::Let(decl) => {
                    let ty = decl.ty.as_ref().map(|ty| self.lower_type(ty));
                    let value = decl.value.as_ref().map(|value| self.lower_expr(value));
                    let symbol = self.declare_single(&decl.name, SymbolKind::Local);
                    let span = decl.span.clone().or_else(|| decl.name.span.clone());
                    self.define(
                        HirNodeKind::Let { symbol, ty, value },
                        span,
                        symbol,
                        Some(target),
                    )?;
                }
                Stmt::Expr(expr) => {
                    let id = self.lower_expr(expr);
                    self.program.push_back(target, id)?;
                }
                Stmt::Return(value) => {
                    let value = value.as_ref().map(|value| self.lower_expr(value));
                    let id = self
                        .program
                        .alloc_node(HirNode::new(HirNodeKind::Return { value }, None));
                    self.program.push_back(target, id)?;
                }
            }
        }
        Ok(())
    }

    fn lower_type(&mut self, ty: &TypeExpr) -> HirNodeId {
        let (kind, span) = match ty {
            TypeExpr::BuiltIn(kind) => (HirNodeKind::BuiltinType(*kind), None),
            TypeExpr::Named(ident) => {
                let symbol = self.resolve(ident).filter(|symbol| self.expect_type(ident, *symbol));
                (
                    HirNodeKind::TypeRef {
                        name: ident.name.clone(),
                        symbol,
                    },
                    ident.span.clone(),
                )
            }
        };
        self.program.alloc_node(HirNode::new(kind, span))
    }

    fn lower_expr(&mut self, expr: &Expr) -> HirNodeId {
        let (kind, span) = match expr {
            Expr::Ident(ident) => (
                HirNodeKind::Ident {
                    name: ident.name.clone(),
                    symbol: self.resolve(ident),
                },
                ident.span.clone(),
            ),
            Expr::IntLit(value) => (HirNodeKind::Literal(HirLiteral::Int(*value)), None),
            Expr::StringLit(value) => (
                HirNodeKind::Literal(HirLiteral::String(value.clone())),
                None,
            ),
            Expr::BoolLit(value) => (HirNodeKind::Literal(HirLiteral::Bool(*value)), None),
            Expr::Call { callee, args } => {
                let callee = self.lower_expr(callee);
                let args = args.iter().map(|arg| self.lower_expr(arg)).collect();
                (HirNodeKind::Call { callee, args }, None)
            }
            Expr::New { ty, args } => {
                let ty = self.lower_type(ty);
                let args = args.iter().map(|arg| self.lower_expr(arg)).collect();
                (HirNodeKind::New { ty, args }, None)
            }
        };
        self.program.alloc_node(HirNode::new(kind, span))
    }

    /// Allocate a declaring node, record it as the symbol's definition point,
    /// and link it into `container`.
    fn define(
        &mut self,
        kind: HirNodeKind,
        span: Option<Span>,
        symbol: SymbolId,
        container: Option<HirBlockId>,
    ) -> Result<HirNodeId, TreeError> {
        let node = HirNode::new(kind, span);
        let body = node.body();
        let id = self.program.alloc_node(node);

        if let Some(body) = body {
            self.program.set_block_owner(body, id)?;
        }
        self.resolver.symbols_mut().set_def_point(symbol, id);
        if let Some(container) = container {
            self.program.push_back(container, id)?;
        }
        Ok(id)
    }

    fn declare<'a>(
        &mut self,
        decls: impl IntoIterator<Item = (&'a Ident, SymbolKind)>,
    ) -> Vec<SymbolId> {
        let collection = declare_all(&mut self.resolver, decls);
        self.diagnostics.extend(collection.diagnostics);
        collection.symbols
    }

    fn declare_single(&mut self, name: &Ident, kind: SymbolKind) -> SymbolId {
        declare_one(&mut self.resolver, name, kind, &mut self.diagnostics)
    }

    fn resolve(&mut self, ident: &Ident) -> Option<SymbolId> {
        let symbol = self.resolver.lookup(&ident.name);
        if symbol.is_none() {
            self.diagnostics.push(SemanticDiagnostic::new(
                format!("unresolved name `{}`", ident.name),
                ident.span.clone().unwrap_or_default(),
                SemanticErrorCode::UnresolvedSymbol,
            ));
        }
        symbol
    }

    fn expect_type(&mut self, ident: &Ident, symbol: SymbolId) -> bool {
        let Some(kind) = self.resolver.symbol(symbol).map(|entry| entry.kind) else {
            return false;
        };
        if kind.is_type() {
            return true;
        }

        self.diagnostics.push(SemanticDiagnostic::new(
            format!("`{}` is a {}, not a type", ident.name, kind.as_str()),
            ident.span.clone().unwrap_or_default(),
            SemanticErrorCode::ExpectedType,
        ));
        false
    }
}
