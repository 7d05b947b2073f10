//! Property-based tests for type flattening.
//!
//! Random module shapes mix classes, functions and fields at arbitrary depth.
//! The generator records which types sit directly inside another type, so
//! every property can be checked against an independent expectation.

use flux_compiler::semantics::flatten::{FlattenClasses, FlattenConfig, ScanOrder};
use flux_compiler::semantics::hir::{HirProgram, format_program};
use flux_compiler::semantics::lowering::LoweringContext;
use flux_compiler::semantics::verify::verify_flattened;
use flux_core::ast::{
    Block, FieldDecl, FnDecl, Ident, Item, LetDecl, Member, ModuleDecl, ObjDecl, Program, Stmt,
    TypeExpr, TypeIdentKind,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Type(Vec<Shape>),
    Func(Vec<Shape>),
    Field,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::Field), Just(Shape::Type(Vec::new()))];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Type),
            prop::collection::vec(inner, 0..4).prop_map(Shape::Func),
        ]
    })
}

fn module_strategy() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(shape_strategy(), 1..5)
}

/// Turns shapes into declarations with unique names.
#[derive(Debug, Default)]
struct Builder {
    next: usize,
    types: usize,
    /// Types declared directly inside another type, in source order.
    nested: Vec<String>,
    top_level: Vec<String>,
}

impl Builder {
    fn build(shapes: &[Shape]) -> (Program, Builder) {
        let mut builder = Builder::default();
        let items = shapes.iter().filter_map(|shape| builder.item(shape)).collect();
        let program = Program {
            modules: vec![ModuleDecl::new("m", items)],
        };
        (program, builder)
    }

    fn fresh(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}{}", self.next);
        self.next += 1;
        name
    }

    fn item(&mut self, shape: &Shape) -> Option<Item> {
        let item = match shape {
            Shape::Type(children) => Item::Obj(self.object(children, false)),
            Shape::Func(children) => Item::Fn(self.function(children)),
            Shape::Field => return None,
        };
        self.top_level.push(item.name().name.clone());
        Some(item)
    }

    fn object(&mut self, children: &[Shape], nested: bool) -> ObjDecl {
        let name = self.fresh("T");
        self.types += 1;
        if nested {
            self.nested.push(name.clone());
        }
        let members = children.iter().map(|child| self.member(child)).collect();
        ObjDecl::class(name, members)
    }

    fn member(&mut self, shape: &Shape) -> Member {
        match shape {
            Shape::Type(children) => Member::Obj(self.object(children, true)),
            Shape::Func(children) => Member::Method(self.function(children)),
            Shape::Field => Member::Field(FieldDecl::new(
                self.fresh("x"),
                TypeExpr::BuiltIn(TypeIdentKind::Int),
            )),
        }
    }

    fn function(&mut self, children: &[Shape]) -> FnDecl {
        let name = self.fresh("f");
        let stmts = children.iter().map(|child| self.statement(child)).collect();
        FnDecl::new(name, Vec::new(), Block { stmts })
    }

    fn statement(&mut self, shape: &Shape) -> Stmt {
        match shape {
            Shape::Type(children) => Stmt::Item(Box::new(Item::Obj(self.object(children, false)))),
            Shape::Func(children) => Stmt::Item(Box::new(Item::Fn(self.function(children)))),
            Shape::Field => Stmt::Let(LetDecl {
                name: Ident::new(self.fresh("v")),
                ty: Some(TypeExpr::BuiltIn(TypeIdentKind::Int)),
                value: None,
                span: None,
            }),
        }
    }
}

fn lower(ast: &Program) -> HirProgram {
    let lowered = LoweringContext::lower(ast).expect("lowering");
    assert!(lowered.diagnostics.is_empty(), "{:?}", lowered.diagnostics);
    lowered.program
}

fn module_listing(program: &HirProgram) -> Vec<String> {
    let module = program
        .symbols
        .iter()
        .find(|symbol| symbol.kind.is_module())
        .map(|symbol| symbol.id)
        .expect("module symbol");
    let body = program.module_body(module).expect("module body");
    program
        .block_nodes(body)
        .filter_map(|node| program.node(node)?.declared_symbol())
        .map(|symbol| program.symbols.name(symbol).to_string())
        .collect()
}

fn flatten(program: &mut HirProgram, order: ScanOrder) -> Vec<String> {
    let report = FlattenClasses::new(FlattenConfig::new().with_scan_order(order))
        .run(program)
        .expect("flatten");
    report
        .relocated_symbols()
        .into_iter()
        .map(|symbol| program.symbols.name(symbol).to_string())
        .collect()
}

proptest! {
    #[test]
    fn no_type_remains_nested(shapes in module_strategy()) {
        let (ast, _) = Builder::build(&shapes);
        let mut program = lower(&ast);

        flatten(&mut program, ScanOrder::Tree);

        prop_assert!(verify_flattened(&program).is_empty());
    }

    #[test]
    fn every_type_survives_exactly_once(shapes in module_strategy()) {
        let (ast, builder) = Builder::build(&shapes);
        let mut program = lower(&ast);
        let before = program.type_symbols();

        flatten(&mut program, ScanOrder::Tree);

        let reachable = program
            .walk()
            .into_iter()
            .filter(|node| program.node(*node).is_some_and(|node| node.is_type_def()))
            .count();
        prop_assert_eq!(reachable, builder.types);
        prop_assert_eq!(program.type_symbols(), before);
    }

    #[test]
    fn moved_types_are_appended_in_discovery_order(shapes in module_strategy()) {
        let (ast, builder) = Builder::build(&shapes);
        let mut program = lower(&ast);

        let moved = flatten(&mut program, ScanOrder::Tree);

        prop_assert_eq!(&moved, &builder.nested);
        let mut expected = builder.top_level.clone();
        expected.extend(builder.nested.iter().cloned());
        prop_assert_eq!(module_listing(&program), expected);
    }

    #[test]
    fn second_run_is_a_no_op(shapes in module_strategy()) {
        let (ast, _) = Builder::build(&shapes);
        let mut program = lower(&ast);
        flatten(&mut program, ScanOrder::Tree);
        let once = format_program(&program);

        let moved = flatten(&mut program, ScanOrder::Tree);

        prop_assert!(moved.is_empty());
        prop_assert_eq!(format_program(&program), once);
    }

    #[test]
    fn scan_orders_agree_on_lowered_programs(shapes in module_strategy()) {
        let (ast, _) = Builder::build(&shapes);
        let mut by_tree = lower(&ast);
        let mut by_allocation = lower(&ast);

        flatten(&mut by_tree, ScanOrder::Tree);
        flatten(&mut by_allocation, ScanOrder::Allocation);

        prop_assert_eq!(format_program(&by_tree), format_program(&by_allocation));
    }
}
