//! FluxLang abstract syntax tree.
//!
//! The front end hands lowering a fully parsed [`Program`]. Re-exports at
//! this level give downstream crates a convenient single import path.

pub mod nodes;

pub use nodes::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeIdentKind {
    Int,
    UInt,
    Float,
    String,
    Bool,
    Char,
}

impl TypeIdentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeIdentKind::Int => "int",
            TypeIdentKind::UInt => "uint",
            TypeIdentKind::Float => "float",
            TypeIdentKind::String => "string",
            TypeIdentKind::Bool => "bool",
            TypeIdentKind::Char => "char",
        }
    }
}
