//! Canonical formatting and format/parse round trips.

mod common;

use common::{assert_format_roundtrip, parse_ok};
use pretty_assertions::assert_eq;
use wcc::{Ast, AstNode, Statement, dump, format};

// -----------------------------------------------------------
// Exact output.
// -----------------------------------------------------------

#[test]
fn format_normalizes_spacing() {
    let ast = parse_ok("void func(){u64 a;a=10+20*30+5;}");
    assert_eq!(
        format(&ast),
        "void func() {\n\tu64 a;\n\ta = 10 + 20 * 30 + 5;\n}\n"
    );
}

#[test]
fn format_separates_blocks() {
    let ast = parse_ok("i8 g; void f() {} i8 h; i8 k;");
    assert_eq!(
        format(&ast),
        "i8 g;\n\nvoid f() {\n}\n\ni8 h;\ni8 k;\n"
    );
}

#[test]
fn format_nested_struct() {
    let ast = parse_ok("void f(u8, i32 n) { struct P { u8 a; }; return n; }");
    assert_eq!(
        format(&ast),
        "void f(u8, i32 n) {\n\tstruct P {\n\t\tu8 a;\n\t};\n\n\treturn n;\n}\n"
    );
}

#[test]
fn format_drops_comments() {
    let ast = parse_ok("// setup\ni8 a; // counter\n");
    assert_eq!(format(&ast), "i8 a;\n");
}

#[test]
fn format_plain_calls() {
    let ast = parse_ok("r = max(a, b) + tick();");
    assert_eq!(format(&ast), "r = max(a, b) + tick();\n");
}

#[test]
fn format_empty_node_prints_only_children() {
    let ast = Ast::new().item(
        AstNode::new(wcc::Payload::Empty).child(AstNode::statement(Statement::symbol("x"))),
    );
    assert_eq!(format(&ast), "x;\n");
}

// -----------------------------------------------------------
// Dump.
// -----------------------------------------------------------

#[test]
fn dump_shows_params_fields_and_values() {
    let mut ast = parse_ok("struct S { i8 x; u16 y; };\nf64 g(i32 a, u8) {}\n");
    let var = wcc::Variable::new(wcc::PrimitiveType::U8, "k").with_value(7);
    ast.root.children.push(AstNode::new(wcc::Payload::Variable(var)));
    assert_eq!(
        dump(&ast),
        "<empty>\n\
         \x20   <strdecl: name=S, fields=[i8 x, u16 y]>\n\
         \x20   <funcdecl: return_type=f64, name=g, params=[i32 a, u8]>\n\
         \x20   <vardecl: type=u8, name=k, value=7>\n"
    );
}

// -----------------------------------------------------------
// Round trips.
// -----------------------------------------------------------

#[test]
fn roundtrip_declarations() {
    assert_format_roundtrip("i8 a;\nu64 b;\nstruct S { f32 x; f64 y; };\n");
}

#[test]
fn roundtrip_functions() {
    assert_format_roundtrip(
        "void main(i32 argc, u8) {\n\ti32 x;\n\tx = argc * 2 + 1;\n\trun(x, argc);\n}\n\
         i32 id(i32 v) { return v; }\n",
    );
}

#[test]
fn roundtrip_every_operator_chain() {
    assert_format_roundtrip(
        "a = b || c && d | e ^ f & g != h < i + j * k -> l . m;\n\
         a &= b; a |= b; a *= b; a /= b;\n\
         a = b >= c; a = b <= c; a = b > c; a = b - c % d / e;\n\
         a = b ! c;\n",
    );
}

#[test]
fn roundtrip_right_assignments() {
    assert_format_roundtrip("a = b = c *= d;\n");
}

#[test]
fn explicit_operator_call_keeps_grouping() {
    let ast = parse_ok("x * operatorPLUS(a, b);");
    assert_eq!(format(&ast), "x * operatorPLUS(a, b);\n");
    assert_format_roundtrip("x * operatorPLUS(a, b);");
}

#[test]
fn explicit_operator_call_on_each_side() {
    assert_format_roundtrip("a - operatorMINUS(b, c);");
    assert_format_roundtrip("operatorEQ(a, b) = c;");
    assert_format_roundtrip("operatorPLUS(a, b) * operatorLS(c, d) < e;");
}

#[test]
fn explicit_operator_call_that_regroups_is_written_infix() {
    let ast = parse_ok("operatorMUL(a, b) + c;");
    assert_eq!(format(&ast), "a * b + c;\n");
    assert_eq!(parse_ok("a * b + c;"), ast);
}

#[test]
fn roundtrip_return_on_right_side() {
    assert_format_roundtrip("a = return b + c;\nx * return y;\n");
}
