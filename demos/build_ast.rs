//! Build a syntax tree programmatically using the builder API.

use wcc::{Ast, AstNode, BinaryOp, Function, PrimitiveType, Statement, Struct};

fn main() {
    let ast = Ast::new()
        .item(AstNode::var_decl(PrimitiveType::U64, "total"))
        .item(
            Struct::builder("Point")
                .field(PrimitiveType::F32, "x")
                .field(PrimitiveType::F32, "y")
                .build(),
        )
        .item(
            Function::builder(PrimitiveType::U64, "scale")
                .param(PrimitiveType::U64, "n")
                .unnamed_param(PrimitiveType::U8)
                .local(PrimitiveType::U64, "r")
                .statement(Statement::binary(
                    BinaryOp::Eq,
                    Statement::symbol("r"),
                    Statement::binary(
                        BinaryOp::Plus,
                        Statement::binary(
                            BinaryOp::Mul,
                            Statement::symbol("n"),
                            Statement::symbol("2"),
                        ),
                        Statement::symbol("1"),
                    ),
                ))
                .statement(Statement::ret(Statement::symbol("r")))
                .build(),
        );

    println!("{}", wcc::format(&ast));
    print!("{}", wcc::dump(&ast));
}
