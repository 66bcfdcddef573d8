// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* `content` and a [link][ref].\n\n- [x] Bullet point\n  - Nested item\n- Another item\n\n> Quoted **text**\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n[ref]: https://example.com \"Example\"\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_lists(items: usize, depth: usize) -> String {
    let mut content = String::new();
    for item in 0..items {
        for level in 0..depth {
            content.push_str(&"  ".repeat(level));
            content.push_str(&format!("- item {item} at level {level} with _emphasis_\n"));
        }
    }
    content
}
