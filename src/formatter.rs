//! Printers for the AST.
//!
//! [`format`] writes canonical source text back out; [`dump`] writes an
//! indented one-node-per-line view of the tree for debugging.

use std::fmt::Write as _;

use crate::ast::{Ast, AstNode, Call, Payload, Statement, Variable};
use crate::token::{Assoc, BinaryOp};

/// Format an AST as canonical source.
///
/// Uses tab indentation and a blank line around functions and structs.
/// Operator calls are written back infix. An operator call that the
/// precedence table would not group under its parent, such as the
/// explicit `operatorPLUS(a, b)` in `x * operatorPLUS(a, b)`, keeps its
/// call form. For any tree produced by the parser, parsing the output
/// yields the same tree.
#[must_use]
pub fn format(ast: &Ast) -> String {
    let mut out = String::new();
    format_items(&mut out, &ast.root.children, 0);
    out
}

fn format_items(out: &mut String, items: &[AstNode], indent: usize) {
    let mut prev_was_block = false;

    for (i, node) in items.iter().enumerate() {
        let is_block = matches!(node.payload, Payload::Function(_) | Payload::Struct(_));

        // Blank line before a block, or after one
        if i > 0 && (is_block || prev_was_block) {
            out.push('\n');
        }

        format_node(out, node, indent);
        prev_was_block = is_block;
    }
}

fn format_node(out: &mut String, node: &AstNode, indent: usize) {
    // an empty node has no source form of its own
    if matches!(node.payload, Payload::Empty) {
        format_items(out, &node.children, indent);
        return;
    }

    let prefix = "\t".repeat(indent);
    out.push_str(&prefix);

    match &node.payload {
        Payload::Empty => {}
        Payload::Variable(var) => {
            format_variable(out, var);
            out.push_str(";\n");
        }
        Payload::Struct(st) => {
            let _ = writeln!(out, "struct {} {{", st.name);
            for field in &st.fields {
                out.push_str(&prefix);
                out.push('\t');
                format_variable(out, field);
                out.push_str(";\n");
            }
            out.push_str(&prefix);
            out.push_str("};\n");
        }
        Payload::Function(func) => {
            let _ = write!(out, "{} {}(", func.return_type, func.name);
            for (i, param) in func.params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                format_variable(out, param);
            }
            out.push_str(") {\n");
            format_items(out, &node.children, indent + 1);
            out.push_str(&prefix);
            out.push_str("}\n");
        }
        Payload::Statement(stmt) => {
            format_statement(out, stmt);
            out.push_str(";\n");
        }
    }
}

fn format_variable(out: &mut String, var: &Variable) {
    let _ = write!(out, "{}", var.ty);
    if let Some(name) = &var.name {
        out.push(' ');
        out.push_str(name);
    }
}

fn format_statement(out: &mut String, stmt: &Statement) {
    if let Some((op, lhs, rhs)) = stmt.as_binary() {
        format_operand(out, op, lhs, Assoc::Left);
        let _ = write!(out, " {op} ");
        format_operand(out, op, rhs, Assoc::Right);
        return;
    }

    match stmt {
        Statement::SymbolRef(name) => out.push_str(name),
        Statement::Return(inner) => {
            out.push_str("return ");
            format_statement(out, inner);
        }
        Statement::Call(call) => format_call(out, call),
    }
}

/// Write one side of `parent`, falling back to call form when the
/// operand's operator would not group under `parent` on that side.
fn format_operand(out: &mut String, parent: BinaryOp, operand: &Statement, side: Assoc) {
    if let (Some((op, _, _)), Statement::Call(call)) = (operand.as_binary(), operand) {
        if !groups_under(parent, op, side) {
            format_call(out, call);
            return;
        }
    }
    format_statement(out, operand);
}

/// Whether `a {parent} b {child} c` written infix regroups `child` on
/// `side` of `parent`.
fn groups_under(parent: BinaryOp, child: BinaryOp, side: Assoc) -> bool {
    child.precedence() > parent.precedence()
        || (child.precedence() == parent.precedence() && parent.assoc() == side)
}

fn format_call(out: &mut String, call: &Call) {
    out.push_str(&call.name);
    out.push('(');
    for (i, arg) in call.args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        format_statement(out, arg);
    }
    out.push(')');
}

/// Render the tree one node per line, four spaces per nesting level.
#[must_use]
pub fn dump(ast: &Ast) -> String {
    let mut out = String::new();
    dump_node(&mut out, &ast.root, 0);
    out
}

fn dump_node(out: &mut String, node: &AstNode, level: usize) {
    out.push_str(&"    ".repeat(level));
    let kind = node.kind();

    match &node.payload {
        Payload::Empty => {
            let _ = write!(out, "<{kind}>");
        }
        Payload::Variable(var) => {
            let _ = write!(
                out,
                "<{kind}: type={}, name={}",
                var.ty,
                var.name.as_deref().unwrap_or("")
            );
            if let Some(value) = var.value {
                let _ = write!(out, ", value={value}");
            }
            out.push('>');
        }
        Payload::Function(func) => {
            let _ = write!(
                out,
                "<{kind}: return_type={}, name={}, params=[{}]>",
                func.return_type,
                func.name,
                join_variables(&func.params)
            );
        }
        Payload::Struct(st) => {
            let _ = write!(
                out,
                "<{kind}: name={}, fields=[{}]>",
                st.name,
                join_variables(&st.fields)
            );
        }
        Payload::Statement(stmt) => {
            let _ = write!(out, "<{kind}: {stmt}>");
        }
    }
    out.push('\n');

    for child in &node.children {
        dump_node(out, child, level + 1);
    }
}

fn join_variables(vars: &[Variable]) -> String {
    let mut out = String::new();
    for (i, var) in vars.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        format_variable(&mut out, var);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Function, PrimitiveType, Struct};

    #[test]
    fn format_var_and_statement() {
        let ast = Ast::new()
            .item(AstNode::var_decl(PrimitiveType::U8, "a"))
            .item(AstNode::statement(Statement::binary(
                BinaryOp::Eq,
                Statement::symbol("a"),
                Statement::symbol("b"),
            )));
        assert_eq!(format(&ast), "u8 a;\na = b;\n");
    }

    #[test]
    fn format_function_indents_body() {
        let ast = Ast::new().item(
            Function::builder(PrimitiveType::Void, "main")
                .param(PrimitiveType::I32, "argc")
                .unnamed_param(PrimitiveType::U8)
                .statement(Statement::call("run", vec![Statement::symbol("argc")]))
                .build(),
        );
        assert_eq!(format(&ast), "void main(i32 argc, u8) {\n\trun(argc);\n}\n");
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let ast = Ast::new()
            .item(AstNode::var_decl(PrimitiveType::I8, "g"))
            .item(Struct::builder("S").field(PrimitiveType::I8, "x").build())
            .item(AstNode::var_decl(PrimitiveType::I8, "h"));
        assert_eq!(format(&ast), "i8 g;\n\nstruct S {\n\ti8 x;\n};\n\ni8 h;\n");
    }

    #[test]
    fn looser_operator_call_keeps_call_form() {
        let stmt = Statement::binary(
            BinaryOp::Mul,
            Statement::symbol("x"),
            Statement::binary(BinaryOp::Plus, Statement::symbol("a"), Statement::symbol("b")),
        );
        let ast = Ast::new().item(AstNode::statement(stmt));
        assert_eq!(format(&ast), "x * operatorPLUS(a, b);\n");
    }

    #[test]
    fn dump_nests_children() {
        let ast = Ast::new().item(
            Function::builder(PrimitiveType::I32, "f")
                .local(PrimitiveType::I32, "x")
                .build(),
        );
        assert_eq!(
            dump(&ast),
            "<empty>\n    <funcdecl: return_type=i32, name=f, params=[]>\n        <vardecl: type=i32, name=x>\n"
        );
    }
}
