//! Recursive-descent parser pulling tokens lazily from a [`Scanner`].
//!
//! Declarations are classified with one token of lookahead. Binary
//! operator chains are parsed by precedence climbing over the
//! [`BinaryOp`] table and desugared into two-argument calls.

use std::fmt;

use crate::ast::{Ast, AstNode, Function, Payload, PrimitiveType, Statement, Struct, Variable};
use crate::builder::{FunctionBuilder, StructBuilder};
use crate::config::ParseOptions;
use crate::diag::{Diagnostic, Diagnostics, Severity, TracingDiagnostics};
use crate::scanner::Scanner;
use crate::token::{Assoc, Span, Token, TokenKind};

const STRUCT_KEYWORD: &str = "struct";
const RETURN_KEYWORD: &str = "return";

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific construct was required here.
    Expected {
        what: &'static str,
        found: TokenKind,
    },
    /// An identifier in type position is not a primitive type.
    UnknownType(String),
    /// `TYPE name` followed by neither `(` nor `;`.
    ExpectedDeclaration { name: String, found: TokenKind },
    /// A token that cannot start any item of a code block.
    UnsupportedToken(TokenKind),
    MissingSemicolon { found: TokenKind },
    NestingTooDeep { limit: usize },
    /// Parser invariant violated; never caused by input alone. No grammar
    /// rule currently reports it. Kept for checks that downstream passes
    /// run over parser output.
    Internal(&'static str),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { what, found } => {
                write!(f, "syntax error: expected {what}, got {found}")
            }
            Self::UnknownType(name) => write!(f, "unknown type \"{name}\""),
            Self::ExpectedDeclaration { name, found } => {
                write!(
                    f,
                    "syntax error: expected function or variable declaration \
                     after \"{name}\", got {found}"
                )
            }
            Self::UnsupportedToken(found) => {
                write!(f, "unsupported token in code block: {found}")
            }
            Self::MissingSemicolon { found } => {
                write!(f, "syntax error: missing semicolon, got {found}")
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting deeper than {limit} levels")
            }
            Self::Internal(detail) => write!(f, "internal error: {detail}"),
        }
    }
}

impl ParseErrorKind {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Internal(_) => Severity::Critical,
            _ => Severity::Error,
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    const fn expected(what: &'static str, found: Token<'_>) -> Self {
        Self::new(
            ParseErrorKind::Expected {
                what,
                found: found.kind,
            },
            found.span,
        )
    }
}

/// Outcome of a parse pass: whatever was built, plus how the pass ended.
///
/// On failure `ast` holds every item completed before the error, along
/// with the partially filled declaration that was open when it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub ast: Ast,
    pub result: Result<(), ParseError>,
}

impl Parsed {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Drop the partial tree on failure.
    pub fn into_result(self) -> Result<Ast, ParseError> {
        self.result.map(|()| self.ast)
    }
}

/// Parse `src` with default options, reporting through `tracing`.
#[must_use]
pub fn parse(src: &str) -> Parsed {
    Parser::new(src).parse()
}

/// Parse `src` with explicit options and diagnostics sink.
pub fn parse_with<D: Diagnostics>(src: &str, options: &ParseOptions, diagnostics: D) -> Parsed {
    Parser::with_options(src, options, diagnostics).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    TopLevel,
    FunctionBody,
}

/// Single-use parser over one source buffer.
pub struct Parser<'src, D = TracingDiagnostics> {
    scanner: Scanner<'src>,
    diagnostics: D,
    max_depth: usize,
    depth: usize,
}

impl<'src> Parser<'src> {
    #[must_use]
    pub const fn new(src: &'src str) -> Self {
        Self {
            scanner: Scanner::new(src),
            diagnostics: TracingDiagnostics,
            max_depth: crate::config::DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }
}

impl<'src, D: Diagnostics> Parser<'src, D> {
    pub fn with_options(src: &'src str, options: &'src ParseOptions, diagnostics: D) -> Self {
        Self {
            scanner: Scanner::new(src).with_breakpoints(&options.breakpoints),
            diagnostics,
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Run the pass to completion or to the first error.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse(mut self) -> Parsed {
        let mut root = AstNode::new(Payload::Empty);
        let result = self.parse_code_block(&mut root.children, Block::TopLevel);
        if let Err(err) = &result {
            self.diagnostics.emit(Diagnostic {
                severity: err.kind.severity(),
                message: err.kind.to_string(),
                span: Some(err.span),
            });
        }
        Parsed {
            ast: Ast { root },
            result,
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_code_block(&mut self, items: &mut Vec<AstNode>, block: Block) -> Result<(), ParseError> {
        loop {
            let start = self.scanner.checkpoint();
            let token = self.scanner.get();

            match token.kind {
                TokenKind::End if block == Block::TopLevel => return Ok(()),
                TokenKind::End => {
                    return Err(ParseError::expected("'}' to close the function body", token));
                }
                TokenKind::RBrace if block == Block::FunctionBody => return Ok(()),
                TokenKind::Ident if token.text == STRUCT_KEYWORD => self.parse_struct(items)?,
                TokenKind::Ident => {
                    if let Some(ty) = PrimitiveType::from_name(token.text) {
                        self.parse_declaration(ty, items)?;
                    } else {
                        self.scanner.restore(start);
                        let stmt = self.parse_statement()?;
                        self.debug(token.span, || format!("parsed statement: {stmt}"));
                        items.push(AstNode::statement(stmt));
                    }
                }
                kind => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnsupportedToken(kind),
                        token.span,
                    ));
                }
            }
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_struct(&mut self, items: &mut Vec<AstNode>) -> Result<(), ParseError> {
        let name = self.expect_ident("structure name after 'struct'")?;
        self.expect(TokenKind::LBrace, "'{' after structure name")?;

        let mut builder = Struct::builder(name.text);
        let result = self.parse_struct_fields(&mut builder);
        items.push(builder.build());
        if result.is_ok() {
            self.debug(name.span, || format!("parsed structure declaration: {}", name.text));
        }
        result
    }

    fn parse_struct_fields(&mut self, builder: &mut StructBuilder) -> Result<(), ParseError> {
        loop {
            if self.scanner.peek().kind == TokenKind::RBrace {
                self.scanner.get();
                self.expect(TokenKind::Semicolon, "';' after structure declaration")?;
                return Ok(());
            }

            let ty = self.parse_type("structure field declaration (type identifier)")?;
            let name = self.expect_ident("structure field name")?;
            self.expect(TokenKind::Semicolon, "';' after structure field declaration")?;

            self.debug(name.span, || {
                format!("parsed structure field: type {ty}, name {}", name.text)
            });
            builder.push_field(Variable::new(ty, name.text));
        }
    }

    /// Continue after a primitive type name: either `name;` or a function.
    fn parse_declaration(
        &mut self,
        ty: PrimitiveType,
        items: &mut Vec<AstNode>,
    ) -> Result<(), ParseError> {
        let name = self.expect_ident("variable or function name after type")?;
        let next = self.scanner.peek();

        match next.kind {
            TokenKind::LParen => self.parse_function(ty, name, items),
            TokenKind::Semicolon => {
                self.scanner.get();
                self.debug(name.span, || {
                    format!("parsed variable declaration: {ty} {}", name.text)
                });
                items.push(AstNode::var_decl(ty, name.text));
                Ok(())
            }
            found => Err(ParseError::new(
                ParseErrorKind::ExpectedDeclaration {
                    name: name.text.to_string(),
                    found,
                },
                next.span,
            )),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_function(
        &mut self,
        return_type: PrimitiveType,
        name: Token<'src>,
        items: &mut Vec<AstNode>,
    ) -> Result<(), ParseError> {
        let mut builder = Function::builder(return_type, name.text);
        let result = self.parse_function_rest(&mut builder);
        items.push(builder.build());
        if result.is_ok() {
            self.debug(name.span, || {
                format!("parsed function declaration: {return_type} {}", name.text)
            });
        }
        result
    }

    fn parse_function_rest(&mut self, builder: &mut FunctionBuilder) -> Result<(), ParseError> {
        self.expect(TokenKind::LParen, "argument list")?;
        if self.scanner.peek().kind == TokenKind::RParen {
            self.scanner.get();
        } else {
            self.parse_params(builder)?;
        }
        self.expect(TokenKind::LBrace, "function body after header")?;

        let span = self.scanner.cursor_span();
        self.nested(span, |p| {
            p.parse_code_block(builder.body_mut(), Block::FunctionBody)
        })
    }

    fn parse_params(&mut self, builder: &mut FunctionBuilder) -> Result<(), ParseError> {
        loop {
            let ty = self.parse_type("type name")?;
            let param = if self.scanner.peek().kind == TokenKind::Ident {
                let name = self.scanner.get();
                Variable::new(ty, name.text)
            } else {
                Variable::unnamed(ty)
            };
            self.debug(self.scanner.cursor_span(), || {
                format!(
                    "parsed function parameter: type {ty}, name {}",
                    param.name.as_deref().unwrap_or("<unnamed>")
                )
            });
            builder.push_param(param);

            let token = self.scanner.get();
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => return Ok(()),
                _ => return Err(ParseError::expected("',' or closing parenthesis ')'", token)),
            }
        }
    }

    /// An operator chain terminated by `;`.
    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let stmt = self.parse_expression(0)?;
        let token = self.scanner.get();
        if token.kind != TokenKind::Semicolon {
            return Err(ParseError::new(
                ParseErrorKind::MissingSemicolon { found: token.kind },
                token.span,
            ));
        }
        Ok(stmt)
    }

    /// Precedence climbing: absorb operators binding at least `min_prec`.
    fn parse_expression(&mut self, min_prec: u8) -> Result<Statement, ParseError> {
        let mut lhs = self.parse_operand()?;

        loop {
            let next = self.scanner.peek();
            let Some(op) = next.kind.binary_op() else {
                break;
            };
            if op.precedence() < min_prec {
                break;
            }

            self.scanner.get();
            let rhs_min = match op.assoc() {
                Assoc::Left => op.precedence() + 1,
                Assoc::Right => op.precedence(),
            };
            let rhs = self.nested(next.span, |p| p.parse_expression(rhs_min))?;
            lhs = Statement::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    /// `IDENT`, `IDENT '(' IDENT (',' IDENT)* ')'`, or `return` wrapping
    /// the rest of the chain.
    fn parse_operand(&mut self) -> Result<Statement, ParseError> {
        let symbol = self.expect_ident("symbol name")?;
        if symbol.is_ident(RETURN_KEYWORD) {
            let inner = self.nested(symbol.span, |p| p.parse_expression(0))?;
            return Ok(Statement::ret(inner));
        }
        if self.scanner.peek().kind != TokenKind::LParen {
            return Ok(Statement::symbol(symbol.text));
        }
        self.scanner.get();

        let mut args = Vec::new();
        if self.scanner.peek().kind == TokenKind::RParen {
            self.scanner.get();
            return Ok(Statement::call(symbol.text, args));
        }

        loop {
            let arg = self.expect_ident("argument identifier in call parenthesis")?;
            args.push(Statement::symbol(arg.text));

            let token = self.scanner.get();
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => return Ok(Statement::call(symbol.text, args)),
                _ => {
                    return Err(ParseError::expected(
                        "comma separated list of arguments",
                        token,
                    ));
                }
            }
        }
    }

    fn parse_type(&mut self, what: &'static str) -> Result<PrimitiveType, ParseError> {
        let token = self.expect_ident(what)?;
        PrimitiveType::from_name(token.text).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnknownType(token.text.to_string()),
                token.span,
            )
        })
    }

    fn expect_ident(&mut self, what: &'static str) -> Result<Token<'src>, ParseError> {
        self.expect(TokenKind::Ident, what)
    }

    fn expect(&mut self, kind: TokenKind, what: &'static str) -> Result<Token<'src>, ParseError> {
        let token = self.scanner.get();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::expected(what, token))
        }
    }

    /// Run `f` one nesting level deeper, failing past the configured limit.
    fn nested<T>(
        &mut self,
        span: Span,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep {
                    limit: self.max_depth,
                },
                span,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn debug(&mut self, span: Span, message: impl FnOnce() -> String) {
        if self.diagnostics.enabled(Severity::Debug) {
            self.diagnostics.emit(Diagnostic {
                severity: Severity::Debug,
                message: message(),
                span: Some(span),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;
    use crate::diag::NullDiagnostics;

    fn parse_quiet(src: &str) -> Parsed {
        parse_with(src, &ParseOptions::default(), NullDiagnostics)
    }

    fn single_statement(src: &str) -> Statement {
        let ast = parse_quiet(src).into_result().expect("parse failed");
        assert_eq!(ast.items().len(), 1);
        ast.items()[0].as_statement().expect("not a statement").clone()
    }

    #[test]
    fn variable_declaration() {
        let ast = parse_quiet("i32 x;").into_result().expect("parse failed");
        let node = &ast.items()[0];
        assert_eq!(node.kind(), NodeKind::VarDecl);
        let var = node.as_variable().unwrap();
        assert_eq!(var.ty, PrimitiveType::I32);
        assert_eq!(var.name.as_deref(), Some("x"));
    }

    #[test]
    fn empty_function() {
        let ast = parse_quiet("i32 f() {}").into_result().expect("parse failed");
        let node = &ast.items()[0];
        let func = node.as_function().unwrap();
        assert_eq!(func.return_type, PrimitiveType::I32);
        assert_eq!(func.name, "f");
        assert!(func.params.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn multiplication_groups_inside_additions() {
        let stmt = single_statement("a = 10 + 20 * 30 + 5;");
        assert_eq!(
            stmt.to_string(),
            "operatorEQ(a, operatorPLUS(operatorPLUS(10, operatorMUL(20, 30)), 5))"
        );
    }

    #[test]
    fn call_then_operator() {
        let stmt = single_statement("x = f(a, b) * c;");
        assert_eq!(stmt.to_string(), "operatorEQ(x, operatorMUL(f(a, b), c))");
    }

    #[test]
    fn return_wraps_statement() {
        let stmt = single_statement("return a + b;");
        assert_eq!(stmt.to_string(), "return operatorPLUS(a, b)");
    }

    #[test]
    fn return_on_right_of_operator() {
        let stmt = single_statement("a = return b * c;");
        assert_eq!(stmt.to_string(), "operatorEQ(a, return operatorMUL(b, c))");
    }

    #[test]
    fn internal_errors_are_critical() {
        let kind = ParseErrorKind::Internal("unbalanced call");
        assert_eq!(kind.severity(), Severity::Critical);
        assert_eq!(kind.to_string(), "internal error: unbalanced call");
        assert_eq!(
            ParseErrorKind::MissingSemicolon {
                found: TokenKind::End
            }
            .severity(),
            Severity::Error
        );
    }

    #[test]
    fn missing_semicolon_keeps_earlier_items() {
        let parsed = parse_quiet("i8 a;\nb = c\n");
        let err = parsed.result.clone().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingSemicolon {
                found: TokenKind::End
            }
        );
        assert_eq!(parsed.ast.items().len(), 1);
    }

    #[test]
    fn partial_function_is_kept() {
        let parsed = parse_quiet("void f() { i8 a; b = ; }");
        assert!(!parsed.is_ok());
        let func = &parsed.ast.items()[0];
        assert_eq!(func.kind(), NodeKind::FuncDecl);
        assert_eq!(func.children.len(), 1);
    }

    #[test]
    fn nesting_limit() {
        let opts = ParseOptions::new().max_depth(2);
        let parsed = parse_with("a = b = c = d;", &opts, NullDiagnostics);
        assert_eq!(
            parsed.result.unwrap_err().kind,
            ParseErrorKind::NestingTooDeep { limit: 2 }
        );
    }

    #[test]
    fn errors_reach_the_sink() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let parsed = parse_with("struct S { x y; };", &ParseOptions::default(), &mut sink);
        assert_eq!(
            parsed.result.unwrap_err().kind,
            ParseErrorKind::UnknownType("x".to_string())
        );
        let last = sink.last().expect("no diagnostics");
        assert_eq!(last.severity, Severity::Error);
        assert!(last.message.contains("unknown type \"x\""));
    }
}
