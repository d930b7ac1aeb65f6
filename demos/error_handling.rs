//! Demonstrate error handling and partial trees for invalid input.

use wcc::{Diagnostic, ParseOptions};

fn main() {
    // Missing semicolon after a statement
    match wcc::parse_str("void f() {\n\ti32 a;\n\ta = a + 1\n}\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(wcc::Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: {}", e.span);
        }
        Err(wcc::Error::Io(e)) => println!("I/O error: {e}"),
    }

    println!();

    // Unknown type: collect diagnostics and keep what was parsed
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let parsed = wcc::parse_with(
        "i8 ok;\nstruct S {\n\ti8 x;\n\tstring name;\n};\n",
        &ParseOptions::default(),
        &mut diagnostics,
    );
    if let Err(e) = &parsed.result {
        println!("Parse error: {e}");
    }
    for diagnostic in &diagnostics {
        println!("  {diagnostic}");
    }
    println!("Partial tree:\n{}", wcc::dump(&parsed.ast));
}
