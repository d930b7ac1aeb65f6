//! Parse a source string and re-format it.

fn main() {
    let input = "\
void func(){u64 a;u64 b;
a = 10 + 20*30 + 5;   // grouped by precedence
b = 12*13+4;}
";

    let ast = wcc::parse_str(input).expect("parse failed");

    for item in ast.items() {
        println!("Item: {}", item.kind());
        for child in &item.children {
            match child.as_statement() {
                Some(stmt) => println!("  Statement: {stmt}"),
                None => println!("  {}", child.kind()),
            }
        }
    }

    let output = wcc::format(&ast);
    println!("\nFormatted output:\n{output}");
}
