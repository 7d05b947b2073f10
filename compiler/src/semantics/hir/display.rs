//! Pretty-printing helpers for HIR structures.
//!
//! The formatter produces deterministic, human-friendly output to assist with
//! debugging and snapshot-style regression tests. Declarations are printed in
//! block order, so the output shows exactly where each definition lives.

use super::ids::{HirBlockId, HirNodeId, SymbolId};
use super::nodes::{HirLiteral, HirNodeKind};
use super::program::HirProgram;

/// Format a whole program into a human-readable string.
pub fn format_program(program: &HirProgram) -> String {
    let mut formatter = HirFormatter::new();
    formatter.write_program(program);
    formatter.finish()
}

/// Stateful formatter used to render HIR nodes.
#[derive(Debug, Default)]
pub struct HirFormatter {
    buffer: String,
}

impl HirFormatter {
    /// Create a fresh formatter.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Emit every root module of `program`.
    pub fn write_program(&mut self, program: &HirProgram) {
        for root in &program.roots {
            self.write_node(program, *root, 0);
        }
    }

    /// Consume the formatter and return the accumulated string.
    pub fn finish(self) -> String {
        self.buffer
    }

    fn write_node(&mut self, program: &HirProgram, id: HirNodeId, indent: usize) {
        let Some(node) = program.node(id) else {
            self.indent_line(indent, &format!("<missing node {:?}>", id));
            return;
        };

        match &node.kind {
            HirNodeKind::Module { symbol, body } => {
                let header = format!("module {}", self.name(program, *symbol));
                self.write_body(program, &header, *body, indent)
            }
            HirNodeKind::TypeDef { symbol, kind, body } => {
                let header = format!("{} {}", kind.as_str(), self.name(program, *symbol));
                self.write_body(program, &header, *body, indent)
            }
            HirNodeKind::Function {
                symbol,
                params,
                ret_type,
                body,
            } => {
                let params = params
                    .iter()
                    .map(|param| self.format_expr(program, *param))
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut header = format!("fn {}({})", self.name(program, *symbol), params);
                if let Some(ret) = ret_type {
                    header.push_str(" -> ");
                    header.push_str(&self.format_expr(program, *ret));
                }
                self.write_body(program, &header, *body, indent)
            }
            HirNodeKind::Field { symbol, ty } => {
                let line = format!(
                    "field {}: {}",
                    self.name(program, *symbol),
                    self.format_expr(program, *ty)
                );
                self.indent_line(indent, &line)
            }
            HirNodeKind::Let { symbol, ty, value } => {
                let mut line = format!("let {}", self.name(program, *symbol));
                if let Some(ty) = ty {
                    line.push_str(": ");
                    line.push_str(&self.format_expr(program, *ty));
                }
                if let Some(value) = value {
                    line.push_str(" = ");
                    line.push_str(&self.format_expr(program, *value));
                }
                self.indent_line(indent, &line)
            }
            HirNodeKind::Return { value } => {
                let line = match value {
                    Some(value) => format!("return {}", self.format_expr(program, *value)),
                    None => "return".to_string(),
                };
                self.indent_line(indent, &line)
            }
            _ => {
                let line = self.format_expr(program, id);
                self.indent_line(indent, &line)
            }
        }
    }

    fn write_body(
        &mut self,
        program: &HirProgram,
        header: &str,
        body: HirBlockId,
        indent: usize,
    ) {
        let children: Vec<HirNodeId> = program.block_nodes(body).collect();
        if children.is_empty() {
            self.indent_line(indent, &format!("{} {{}}", header));
            return;
        }

        self.indent_line(indent, &format!("{} {{", header));
        for child in children {
            self.write_node(program, child, indent + 1);
        }
        self.indent_line(indent, "}")
    }

    fn format_expr(&self, program: &HirProgram, id: HirNodeId) -> String {
        let Some(node) = program.node(id) else {
            return format!("<missing node {:?}>", id);
        };

        match &node.kind {
            HirNodeKind::BuiltinType(kind) => kind.as_str().to_string(),
            HirNodeKind::TypeRef { name, symbol } | HirNodeKind::Ident { name, symbol } => {
                match symbol {
                    Some(_) => name.clone(),
                    None => format!("{}?", name),
                }
            }
            HirNodeKind::Literal(HirLiteral::Int(value)) => value.to_string(),
            HirNodeKind::Literal(HirLiteral::String(value)) => format!("{:?}", value),
            HirNodeKind::Literal(HirLiteral::Bool(value)) => value.to_string(),
            HirNodeKind::Call { callee, args } => format!(
                "{}({})",
                self.format_expr(program, *callee),
                self.format_args(program, args)
            ),
            HirNodeKind::New { ty, args } => format!(
                "new {}({})",
                self.format_expr(program, *ty),
                self.format_args(program, args)
            ),
            HirNodeKind::Param { symbol, ty } => match ty {
                Some(ty) => format!(
                    "{}: {}",
                    self.name(program, *symbol),
                    self.format_expr(program, *ty)
                ),
                None => self.name(program, *symbol).to_string(),
            },
            HirNodeKind::Module { symbol, .. }
            | HirNodeKind::TypeDef { symbol, .. }
            | HirNodeKind::Function { symbol, .. }
            | HirNodeKind::Field { symbol, .. }
            | HirNodeKind::Let { symbol, .. } => self.name(program, *symbol).to_string(),
            HirNodeKind::Return { .. } => "return".to_string(),
        }
    }

    fn format_args(&self, program: &HirProgram, args: &[HirNodeId]) -> String {
        args.iter()
            .map(|arg| self.format_expr(program, *arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn name<'p>(&self, program: &'p HirProgram, symbol: SymbolId) -> &'p str {
        program.symbols.name(symbol)
    }

    fn indent_line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }
}
