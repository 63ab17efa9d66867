use linexml_core::LineParser;

fn main() {
    env_logger::init();

    let input = "<autoanswer>no</autoanswer>\n\
                 <blacklist>\n\
                 <item>555</item>\n\
                 <item>556</item>\n\
                 <!-- this is a comment line -->\n\
                 <!-- this is a comment line for 3 lines:one\n\
                 two\n\
                 three-->\n\
                 </blacklist>\n\
                 <tagnull test='auto' value=123/>";

    println!("Input:\n{input}\n");

    let mut parser = LineParser::new();
    match parser.parse(input) {
        Some(out) => {
            println!("Tree:\n{}", out.document.root().render(0));
            for diag in &out.diagnostics {
                println!("diagnostic: {diag}");
            }
        }
        None => println!("no document"),
    }
}
