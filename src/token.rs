use std::fmt;

/// Source location of a token: zero-based line and column counters.
///
/// `Display` renders the position one-based, the way editors number lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

/// Binary operators recognised by the scanner.
///
/// Each operator desugars into a two-argument call whose callee is
/// [`BinaryOp::callee_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `!`
    Neg,
    /// `!=`
    Neq,
    /// `%`
    Mod,
    /// `^`
    Xor,
    /// `&&`
    LogicAnd,
    /// `&=`
    AndEq,
    /// `&`
    And,
    /// `||`
    LogicOr,
    /// `|=`
    OrEq,
    /// `|`
    Or,
    /// `*`
    Mul,
    /// `*=`
    MulEq,
    /// `/=`
    DivEq,
    /// `/`
    Div,
    /// `-`
    Minus,
    /// `->`
    Access,
    /// `+`
    Plus,
    /// `=`
    Eq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `.`
    Dot,
}

/// How a chain of equal-precedence operators groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

impl BinaryOp {
    pub const ALL: [Self; 23] = [
        Self::Neg,
        Self::Neq,
        Self::Mod,
        Self::Xor,
        Self::LogicAnd,
        Self::AndEq,
        Self::And,
        Self::LogicOr,
        Self::OrEq,
        Self::Or,
        Self::Mul,
        Self::MulEq,
        Self::DivEq,
        Self::Div,
        Self::Minus,
        Self::Access,
        Self::Plus,
        Self::Eq,
        Self::Less,
        Self::LessEq,
        Self::Greater,
        Self::GreaterEq,
        Self::Dot,
    ];

    /// Source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "!",
            Self::Neq => "!=",
            Self::Mod => "%",
            Self::Xor => "^",
            Self::LogicAnd => "&&",
            Self::AndEq => "&=",
            Self::And => "&",
            Self::LogicOr => "||",
            Self::OrEq => "|=",
            Self::Or => "|",
            Self::Mul => "*",
            Self::MulEq => "*=",
            Self::DivEq => "/=",
            Self::Div => "/",
            Self::Minus => "-",
            Self::Access => "->",
            Self::Plus => "+",
            Self::Eq => "=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Dot => ".",
        }
    }

    /// Canonical token name, e.g. `OP_NEQ`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neg => "OP_NEG",
            Self::Neq => "OP_NEQ",
            Self::Mod => "OP_MOD",
            Self::Xor => "OP_XOR",
            Self::LogicAnd => "OP_LOGIC_AND",
            Self::AndEq => "OP_ANDEQ",
            Self::And => "OP_AND",
            Self::LogicOr => "OP_LOGIC_OR",
            Self::OrEq => "OP_OREQ",
            Self::Or => "OP_OR",
            Self::Mul => "OP_MUL",
            Self::MulEq => "OP_MULEQ",
            Self::DivEq => "OP_DIVEQ",
            Self::Div => "OP_DIV",
            Self::Minus => "OP_MINUS",
            Self::Access => "OP_ACCESS",
            Self::Plus => "OP_PLUS",
            Self::Eq => "OP_EQ",
            Self::Less => "OP_LS",
            Self::LessEq => "OP_LSE",
            Self::Greater => "OP_GR",
            Self::GreaterEq => "OP_GRE",
            Self::Dot => "OP_DOT",
        }
    }

    /// Name of the function a use of this operator desugars into.
    #[must_use]
    pub const fn callee_name(self) -> &'static str {
        match self {
            Self::Neg => "operatorNEG",
            Self::Neq => "operatorNEQ",
            Self::Mod => "operatorMOD",
            Self::Xor => "operatorXOR",
            Self::LogicAnd => "operatorLOGIC_AND",
            Self::AndEq => "operatorANDEQ",
            Self::And => "operatorAND",
            Self::LogicOr => "operatorLOGIC_OR",
            Self::OrEq => "operatorOREQ",
            Self::Or => "operatorOR",
            Self::Mul => "operatorMUL",
            Self::MulEq => "operatorMULEQ",
            Self::DivEq => "operatorDIVEQ",
            Self::Div => "operatorDIV",
            Self::Minus => "operatorMINUS",
            Self::Access => "operatorACCESS",
            Self::Plus => "operatorPLUS",
            Self::Eq => "operatorEQ",
            Self::Less => "operatorLS",
            Self::LessEq => "operatorLSE",
            Self::Greater => "operatorGR",
            Self::GreaterEq => "operatorGRE",
            Self::Dot => "operatorDOT",
        }
    }

    /// Reverse lookup of [`BinaryOp::callee_name`].
    #[must_use]
    pub fn from_callee(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.callee_name() == name)
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Eq | Self::AndEq | Self::OrEq | Self::MulEq | Self::DivEq => 1,
            Self::LogicOr => 2,
            Self::LogicAnd => 3,
            Self::Or => 4,
            Self::Xor => 5,
            Self::And => 6,
            Self::Neq | Self::Neg => 7,
            Self::Less | Self::LessEq | Self::Greater | Self::GreaterEq => 8,
            Self::Plus | Self::Minus => 9,
            Self::Mul | Self::Div | Self::Mod => 10,
            Self::Access | Self::Dot => 11,
        }
    }

    #[must_use]
    pub const fn assoc(self) -> Assoc {
        match self {
            Self::Eq | Self::AndEq | Self::OrEq | Self::MulEq | Self::DivEq => Assoc::Right,
            _ => Assoc::Left,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// Any binary operator.
    Op(BinaryOp),
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `::`
    Namespace,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// Greedy run of identifier characters; the only kind carrying text.
    Ident,
    /// End of input. Returned repeatedly once the source is exhausted.
    End,
}

impl TokenKind {
    /// Canonical upper-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LParen => "PAREN_OPEN",
            Self::RParen => "PAREN_CLOSE",
            Self::LBracket => "BRACKET_OPEN",
            Self::RBracket => "BRACKET_CLOSE",
            Self::Op(op) => op.name(),
            Self::LBrace => "BLOCK_BEGIN",
            Self::RBrace => "BLOCK_END",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::Namespace => "NAMESPACE",
            Self::SingleQuote => "SINGLE_QUOTE",
            Self::DoubleQuote => "DOUBLE_QUOTE",
            Self::Ident => "IDENTIFIER",
            Self::End => "END",
        }
    }

    #[must_use]
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Op(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token: kind, identifier text, and where it starts.
///
/// `text` borrows from the source and is empty for every kind except
/// [`TokenKind::Ident`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl Token<'_> {
    #[must_use]
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::Ident {
            write!(f, "Token: {} \"{}\"", self.kind, self.text)
        } else {
            write!(f, "Token: {}", self.kind)
        }
    }
}
