use std::fmt;

use crate::token::BinaryOp;

/// Complete parse result: a synthetic root whose children are the
/// top-level items in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub root: AstNode,
}

/// One node of the tree.
///
/// The node's [`NodeKind`] is derived from its payload, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub payload: Payload,
    /// Exclusively owned children; for functions these are the body items.
    pub children: Vec<Self>,
}

/// Node contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// The synthetic root.
    Empty,
    Variable(Variable),
    Function(Function),
    Struct(Struct),
    Statement(Statement),
}

/// Discriminant of [`Payload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Empty,
    VarDecl,
    FuncDecl,
    StructDecl,
    Statement,
}

impl NodeKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::VarDecl => "vardecl",
            Self::FuncDecl => "funcdecl",
            Self::StructDecl => "strdecl",
            Self::Statement => "stmt",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primitive types known to the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Void,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl PrimitiveType {
    pub const ALL: [Self; 11] = [
        Self::Void,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Resolve a type name; `None` for anything outside the fixed table.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed symbol: variable declaration, struct field, or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub ty: PrimitiveType,
    /// Only parameters may be unnamed.
    pub name: Option<String>,
    /// Constant value as a raw 64-bit pattern.
    pub value: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub return_type: PrimitiveType,
    pub name: String,
    pub params: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<Variable>,
}

/// Statement tree. Binary operators appear as [`Statement::Call`]s to
/// their [`BinaryOp::callee_name`] with exactly two arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Reference to a previously declared symbol.
    SymbolRef(String),
    Call(Call),
    /// `return` wrapping the statement that follows it.
    Return(Box<Self>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Statement>,
}

impl Statement {
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::SymbolRef(name.into())
    }

    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call(Call {
            name: name.into(),
            args,
        })
    }

    /// Desugar `lhs op rhs` into `operatorXXX(lhs, rhs)`.
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::call(op.callee_name(), vec![lhs, rhs])
    }

    #[must_use]
    pub fn ret(inner: Self) -> Self {
        Self::Return(Box::new(inner))
    }

    #[must_use]
    pub const fn as_call(&self) -> Option<&Call> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::SymbolRef(name) => Some(name),
            _ => None,
        }
    }

    /// If this is a desugared binary operator, return it with its operands.
    #[must_use]
    pub fn as_binary(&self) -> Option<(BinaryOp, &Self, &Self)> {
        let call = self.as_call()?;
        let op = BinaryOp::from_callee(&call.name)?;
        match call.args.as_slice() {
            [lhs, rhs] => Some((op, lhs, rhs)),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolRef(name) => f.write_str(name),
            Self::Call(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Return(inner) => write!(f, "return {inner}"),
        }
    }
}

impl AstNode {
    #[must_use]
    pub const fn new(payload: Payload) -> Self {
        Self {
            payload,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self.payload {
            Payload::Empty => NodeKind::Empty,
            Payload::Variable(_) => NodeKind::VarDecl,
            Payload::Function(_) => NodeKind::FuncDecl,
            Payload::Struct(_) => NodeKind::StructDecl,
            Payload::Statement(_) => NodeKind::Statement,
        }
    }

    #[must_use]
    pub const fn as_variable(&self) -> Option<&Variable> {
        match &self.payload {
            Payload::Variable(var) => Some(var),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match &self.payload {
            Payload::Function(func) => Some(func),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_struct(&self) -> Option<&Struct> {
        match &self.payload {
            Payload::Struct(st) => Some(st),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_statement(&self) -> Option<&Statement> {
        match &self.payload {
            Payload::Statement(stmt) => Some(stmt),
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

impl Ast {
    /// Top-level declarations and statements.
    #[must_use]
    pub fn items(&self) -> &[AstNode] {
        &self.root.children
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}
