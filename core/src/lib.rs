//! Core crate entry point.
//!
//! This module wires together the syntax structures and shared diagnostics
//! for the rest of the FluxLang workspace.

pub mod ast;
pub mod diag;

/* Tests */
#[cfg(test)]
mod tests {
    use super::ast::{AggregateKind, FieldDecl, Item, Member, ObjDecl, TypeExpr, TypeIdentKind};

    #[test]
    fn obj_constructors_set_kind() {
        let record = ObjDecl::record(
            "Point",
            vec![Member::Field(FieldDecl::new(
                "x",
                TypeExpr::BuiltIn(TypeIdentKind::Int),
            ))],
        );
        assert_eq!(record.kind, AggregateKind::Record);
        assert_eq!(record.kind.as_str(), "record");
        assert_eq!(record.members.len(), 1);

        let item = Item::Obj(ObjDecl::class("Shape", Vec::new()));
        assert_eq!(item.name().name, "Shape");
    }
}
