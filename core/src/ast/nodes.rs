//! Abstract syntax tree node definitions.
//!
//! These types represent FluxLang source code as handed over by the front
//! end. The structures are intentionally plain so lowering, diagnostics, and
//! test fixtures can build and inspect them without a parser in the loop.

use super::TypeIdentKind;
use crate::diag::Span;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Option<Span>,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: None,
        }
    }

    pub fn with_span(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span: Some(span),
        }
    }
}

/// Whole-program input: every module of the compilation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub modules: Vec<ModuleDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub name: Ident,
    pub items: Vec<Item>,
    pub span: Option<Span>,
}

impl ModuleDecl {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: Ident::new(name),
            items,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Module(ModuleDecl),
    Obj(ObjDecl),
    Fn(FnDecl),
}

impl Item {
    pub fn name(&self) -> &Ident {
        match self {
            Item::Module(decl) => &decl.name,
            Item::Obj(decl) => &decl.name,
            Item::Fn(decl) => &decl.name,
        }
    }
}

/// Flavour of a user-defined aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Class,
    Record,
}

impl AggregateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateKind::Class => "class",
            AggregateKind::Record => "record",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjDecl {
    pub vis: Visibility,
    pub kind: AggregateKind,
    pub name: Ident,
    pub members: Vec<Member>,
}

impl ObjDecl {
    pub fn new(kind: AggregateKind, name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            vis: Visibility::Public,
            kind,
            name: Ident::new(name),
            members,
        }
    }

    pub fn class(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self::new(AggregateKind::Class, name, members)
    }

    pub fn record(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self::new(AggregateKind::Record, name, members)
    }
}

/// Declarations allowed inside an aggregate body, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(FnDecl),
    Obj(ObjDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Ident,
    pub ty: TypeExpr,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Ident::new(name),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub vis: Visibility,
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret_type: Option<TypeExpr>,
    pub body: Block,
}

impl FnDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>, body: Block) -> Self {
        Self {
            vis: Visibility::Public,
            name: Ident::new(name),
            params,
            ret_type: None,
            body,
        }
    }

    pub fn returning(mut self, ty: TypeExpr) -> Self {
        self.ret_type = Some(ty);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetDecl {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub value: Option<Expr>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetDecl),
    Expr(Expr),
    Return(Option<Expr>),
    Item(Box<Item>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    IntLit(i128),
    StringLit(String),
    BoolLit(bool),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        ty: TypeExpr,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(Ident),
    BuiltIn(TypeIdentKind),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(Ident::new(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}
