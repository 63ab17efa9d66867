use std::error::Error;

use linexml_core::LineParser;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: file_parse <path-to-xml>")?;
    let contents = std::fs::read_to_string(&path)?;
    let lines: Vec<&str> = contents.lines().collect();

    let mut parser = LineParser::new();
    match parser.parse_lines(lines) {
        Some(out) => {
            print!("{}", out.document.root().render(0));
            if !out.diagnostics.is_empty() {
                eprintln!("{} recoverable problem(s):", out.diagnostics.len());
                for diag in &out.diagnostics {
                    eprintln!("  {diag}");
                }
            }
        }
        None => eprintln!("{path}: empty document"),
    }
    Ok(())
}
