//! Front end of the wcc compiler: scanner, parser, and AST.
//!
//! Source text is scanned on demand, parsed by recursive descent, and
//! turned into an owned tree of declarations and statements. Binary
//! operators are desugared into two-argument calls such as
//! `operatorPLUS(a, b)`, grouped by a full precedence table.
//!
//! # Quick start
//!
//! ## Parse a function and inspect an assignment
//!
//! ```
//! use wcc::{parse_str, NodeKind};
//!
//! let ast = parse_str("void f() { u64 a; a = 10 + 20 * 30 + 5; }").unwrap();
//! let func = &ast.items()[0];
//! assert_eq!(func.kind(), NodeKind::FuncDecl);
//!
//! let stmt = func.children[1].as_statement().unwrap();
//! assert_eq!(
//!     stmt.to_string(),
//!     "operatorEQ(a, operatorPLUS(operatorPLUS(10, operatorMUL(20, 30)), 5))"
//! );
//! ```
//!
//! ## Keep the partial tree on failure
//!
//! ```
//! use wcc::{parse_with, NullDiagnostics, ParseOptions};
//!
//! let parsed = parse_with("i8 a;\nb = c", &ParseOptions::default(), NullDiagnostics);
//! assert!(!parsed.is_ok());
//! assert_eq!(parsed.ast.items().len(), 1);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod config;
pub mod diag;
pub mod formatter;
pub mod parser;
pub mod scanner;
pub mod token;

use std::path::Path;

pub use ast::{
    Ast, AstNode, Call, Function, NodeKind, Payload, PrimitiveType, Statement, Struct, Variable,
};
pub use builder::{FunctionBuilder, StructBuilder};
pub use config::ParseOptions;
pub use diag::{Diagnostic, Diagnostics, NullDiagnostics, Severity, TracingDiagnostics};
pub use formatter::{dump, format};
pub use parser::{ParseError, ParseErrorKind, Parsed, Parser, parse, parse_with};
pub use scanner::{Checkpoint, Scanner, tokenize};
pub use token::{Assoc, BinaryOp, Span, Token, TokenKind};

/// Unified error type for the convenience entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A syntax or internal parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// The source file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Parse a source string, discarding the partial tree on failure.
pub fn parse_str(input: &str) -> Result<Ast, Error> {
    Ok(parse(input).into_result()?)
}

/// Read and parse a source file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Ast, Error> {
    let src = std::fs::read_to_string(path)?;
    parse_str(&src)
}
