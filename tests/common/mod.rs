#![allow(dead_code)]

use wcc::{Ast, NullDiagnostics, ParseOptions, Statement, format, parse_with};

pub fn parse_ok(src: &str) -> Ast {
    let parsed = parse_with(src, &ParseOptions::default(), NullDiagnostics);
    parsed
        .into_result()
        .unwrap_or_else(|e| panic!("parse failed: {e}\n--- source ---\n{src}"))
}

/// Parse a source holding exactly one top-level statement.
pub fn only_statement(src: &str) -> Statement {
    let ast = parse_ok(src);
    assert_eq!(ast.items().len(), 1, "expected one item in {src:?}");
    ast.items()[0]
        .as_statement()
        .unwrap_or_else(|| panic!("not a statement: {:?}", ast.items()[0]))
        .clone()
}

/// Helper: parse, format, parse the output again, and require the same
/// tree plus a stable formatting.
pub fn assert_format_roundtrip(src: &str) {
    let original = parse_ok(src);
    let formatted = format(&original);
    let reparsed = parse_ok(&formatted);
    assert_eq!(
        original, reparsed,
        "tree changed after formatting\n--- formatted ---\n{formatted}"
    );
    assert_eq!(
        format(&reparsed),
        formatted,
        "formatting is not idempotent\n--- formatted ---\n{formatted}"
    );
}
