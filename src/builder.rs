//! Fluent construction helpers for the AST.
//!
//! Builders collect a declaration's parts and produce the finished
//! [`AstNode`] in one step, so a node never carries a half-filled payload.

use crate::ast::{Ast, AstNode, Function, Payload, PrimitiveType, Statement, Struct, Variable};

impl Ast {
    /// Create an AST with an empty root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: AstNode::new(Payload::Empty),
        }
    }

    /// Append a top-level item.
    #[must_use]
    pub fn item(mut self, node: AstNode) -> Self {
        self.root.children.push(node);
        self
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl AstNode {
    /// Variable declaration node: `ty name;`.
    #[must_use]
    pub fn var_decl(ty: PrimitiveType, name: &str) -> Self {
        Self::new(Payload::Variable(Variable::new(ty, name)))
    }

    #[must_use]
    pub const fn statement(stmt: Statement) -> Self {
        Self::new(Payload::Statement(stmt))
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: Self) -> Self {
        self.children.push(node);
        self
    }
}

impl Variable {
    #[must_use]
    pub fn new(ty: PrimitiveType, name: &str) -> Self {
        Self {
            ty,
            name: Some(name.to_string()),
            value: None,
        }
    }

    /// Parameter without a name, e.g. the `i32` in `void f(i32)`.
    #[must_use]
    pub const fn unnamed(ty: PrimitiveType) -> Self {
        Self {
            ty,
            name: None,
            value: None,
        }
    }

    /// Attach a constant value.
    #[must_use]
    pub const fn with_value(mut self, bits: u64) -> Self {
        self.value = Some(bits);
        self
    }
}

/// Collects a function header and body before producing its node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBuilder {
    return_type: PrimitiveType,
    name: String,
    params: Vec<Variable>,
    body: Vec<AstNode>,
}

impl Function {
    #[must_use]
    pub fn builder(return_type: PrimitiveType, name: &str) -> FunctionBuilder {
        FunctionBuilder {
            return_type,
            name: name.to_string(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }
}

impl FunctionBuilder {
    #[must_use]
    pub fn param(mut self, ty: PrimitiveType, name: &str) -> Self {
        self.params.push(Variable::new(ty, name));
        self
    }

    #[must_use]
    pub fn unnamed_param(mut self, ty: PrimitiveType) -> Self {
        self.params.push(Variable::unnamed(ty));
        self
    }

    /// Append any node to the body.
    #[must_use]
    pub fn body_item(mut self, node: AstNode) -> Self {
        self.body.push(node);
        self
    }

    /// Append a variable declaration to the body.
    #[must_use]
    pub fn local(self, ty: PrimitiveType, name: &str) -> Self {
        self.body_item(AstNode::var_decl(ty, name))
    }

    /// Append a statement to the body.
    #[must_use]
    pub fn statement(self, stmt: Statement) -> Self {
        self.body_item(AstNode::statement(stmt))
    }

    pub(crate) fn push_param(&mut self, param: Variable) {
        self.params.push(param);
    }

    pub(crate) const fn body_mut(&mut self) -> &mut Vec<AstNode> {
        &mut self.body
    }

    #[must_use]
    pub fn build(self) -> AstNode {
        AstNode {
            payload: Payload::Function(Function {
                return_type: self.return_type,
                name: self.name,
                params: self.params,
            }),
            children: self.body,
        }
    }
}

/// Collects struct fields before producing its node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructBuilder {
    name: String,
    fields: Vec<Variable>,
}

impl Struct {
    #[must_use]
    pub fn builder(name: &str) -> StructBuilder {
        StructBuilder {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }
}

impl StructBuilder {
    #[must_use]
    pub fn field(mut self, ty: PrimitiveType, name: &str) -> Self {
        self.fields.push(Variable::new(ty, name));
        self
    }

    pub(crate) fn push_field(&mut self, field: Variable) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn build(self) -> AstNode {
        AstNode::new(Payload::Struct(Struct {
            name: self.name,
            fields: self.fields,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;
    use crate::token::BinaryOp;

    #[test]
    fn build_function_with_body() {
        let node = Function::builder(PrimitiveType::I32, "add")
            .param(PrimitiveType::I32, "a")
            .unnamed_param(PrimitiveType::I32)
            .local(PrimitiveType::I32, "tmp")
            .statement(Statement::binary(
                BinaryOp::Eq,
                Statement::symbol("tmp"),
                Statement::symbol("a"),
            ))
            .build();

        assert_eq!(node.kind(), NodeKind::FuncDecl);
        let func = node.as_function().unwrap();
        assert_eq!(func.name, "add");
        assert_eq!(func.params.len(), 2);
        assert_eq!(func.params[1].name, None);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].kind(), NodeKind::VarDecl);
        assert_eq!(node.children[1].kind(), NodeKind::Statement);
    }

    #[test]
    fn build_struct() {
        let node = Struct::builder("Point")
            .field(PrimitiveType::F32, "x")
            .field(PrimitiveType::F32, "y")
            .build();
        let st = node.as_struct().unwrap();
        assert_eq!(st.fields.len(), 2);
        assert_eq!(st.fields[0].name.as_deref(), Some("x"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn build_default_is_empty() {
        let ast = Ast::default();
        assert!(ast.is_empty());
        assert_eq!(ast.root.kind(), NodeKind::Empty);
    }

    #[test]
    fn variable_with_value() {
        let var = Variable::new(PrimitiveType::U64, "limit").with_value(0xFF);
        assert_eq!(var.value, Some(0xFF));
    }
}
