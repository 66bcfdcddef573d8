use crate::extensions::ExtensionRegistry;
use crate::models::{
    Block, BlockQuote, BulletList, CustomBlock, FencedCodeBlock, Heading, HtmlBlock, IndentedCodeBlock, InlineNode,
    ListItem, OrderedList, Paragraph,
};

use super::BlockVisitor;
use super::writer::BlockWriter;

const QUOTE: &str = "> ";
const INDENT: &str = "    ";
const THEMATIC_BREAK: &str = "***";

/// Re-serializes blocks as canonical Markdown.
///
/// Parsing the output yields the same blocks again: headings are ATX unless
/// their content spans lines, fences use backticks long enough for their
/// literal and list items are numbered from the list's start.
pub struct MarkdownRenderer<'a> {
    registry: &'a ExtensionRegistry,
    writer: BlockWriter,
}

/// Markdown for `blocks`, with custom blocks rendered through `registry`.
pub fn render_markdown(registry: &ExtensionRegistry, blocks: &[Block]) -> String {
    let mut renderer = MarkdownRenderer::new(registry);
    renderer.render_blocks(blocks);
    renderer.finish()
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(registry: &'a ExtensionRegistry) -> Self {
        Self {
            registry,
            writer: BlockWriter::new(),
        }
    }

    pub fn render_blocks(&mut self, blocks: &[Block]) {
        self.visit_blocks(blocks);
    }

    /// Renders `blocks` in their own scope, continuing the current line.
    pub fn render_nested(&mut self, blocks: &[Block]) {
        self.with_prefix("", "", |renderer| renderer.visit_blocks(blocks));
    }

    /// Runs `f` with every line it starts prefixed: `first` on the first line, `rest` after.
    pub fn with_prefix(&mut self, first: &str, rest: &str, f: impl FnOnce(&mut Self)) {
        self.writer.enter(first, rest, false);
        f(self);
        self.writer.exit();
    }

    /// Writes Markdown verbatim, without escaping.
    pub fn write_raw(&mut self, markdown: &str) {
        self.writer.write(markdown);
    }

    pub fn line_break(&mut self) {
        self.writer.newline();
    }

    /// The block after the current one continues on the same line.
    pub fn suppress_separator(&mut self) {
        self.writer.suppress_separator();
    }

    pub fn finish(self) -> String {
        self.writer.finish()
    }

    fn leaf(&mut self, markdown: &str) {
        self.writer.begin_block();
        self.writer.write(markdown);
        self.writer.end_block();
    }

    fn items<'i>(&mut self, tight: bool, items: impl Iterator<Item = (String, &'i ListItem)>) {
        self.writer.begin_block();
        self.writer.enter("", "", tight);
        for (marker, item) in items {
            self.writer.begin_block();
            self.writer.enter(&marker, &" ".repeat(marker.len()), tight);
            self.visit_blocks(&item.children);
            self.writer.exit();
            self.writer.end_block();
        }
        self.writer.exit();
        self.writer.end_block();
    }
}

fn has_line_break(node: &InlineNode) -> bool {
    node.items().iter().any(|item| match item {
        InlineNode::SoftLineBreak | InlineNode::HardLineBreak => true,
        InlineNode::Emphasis { content, .. }
        | InlineNode::StrongEmphasis { content, .. }
        | InlineNode::Link { content, .. } => has_line_break(content),
        InlineNode::ItemsList(_) => has_line_break(item),
        _ => false,
    })
}

/// Shortest fence that no line of `literal` could close.
fn code_fence(literal: &str, info: &str) -> String {
    let fence_char = if info.contains('`') { '~' } else { '`' };
    let longest = literal
        .lines()
        .map(|line| line.trim_start().chars().take_while(|c| *c == fence_char).count())
        .max()
        .unwrap_or(0);
    fence_char.to_string().repeat(longest.max(2) + 1)
}

impl BlockVisitor for MarkdownRenderer<'_> {
    fn visit_paragraph(&mut self, block: &Paragraph) {
        self.leaf(&block.content.to_markdown());
    }

    fn visit_heading(&mut self, block: &Heading) {
        let content = block.content.to_markdown();
        if block.level <= 2 && has_line_break(&block.content) {
            let underline = if block.level == 1 { "===" } else { "---" };
            self.leaf(&format!("{content}\n{underline}"));
            return;
        }
        let hashes = "#".repeat(block.level.into());
        if content.is_empty() {
            self.leaf(&hashes);
        } else if let Some(stripped) = content.strip_suffix('#') {
            // A trailing `#` would read as a closing sequence.
            self.leaf(&format!("{hashes} {stripped}\\#"));
        } else {
            self.leaf(&format!("{hashes} {content}"));
        }
    }

    fn visit_block_quote(&mut self, block: &BlockQuote) {
        self.writer.begin_block();
        self.with_prefix(QUOTE, QUOTE, |renderer| renderer.visit_blocks(&block.children));
        self.writer.end_block();
    }

    fn visit_fenced_code_block(&mut self, block: &FencedCodeBlock) {
        let info = block.language.as_ref().map(|language| language.name()).unwrap_or_default();
        let fence = code_fence(&block.literal, info);
        if block.literal.is_empty() {
            self.leaf(&format!("{fence}{info}\n{fence}"));
        } else {
            self.leaf(&format!("{fence}{info}\n{}\n{fence}", block.literal));
        }
    }

    fn visit_indented_code_block(&mut self, block: &IndentedCodeBlock) {
        let indented: Vec<String> = block
            .literal
            .split('\n')
            .map(|line| if line.is_empty() { String::new() } else { format!("{INDENT}{line}") })
            .collect();
        self.leaf(&indented.join("\n"));
    }

    fn visit_bullet_list(&mut self, block: &BulletList) {
        let marker = format!("{} ", block.marker);
        self.items(block.tight, block.items.iter().map(|item| (marker.clone(), item)));
    }

    fn visit_ordered_list(&mut self, block: &OrderedList) {
        let start = block.start as usize;
        let delimiter = block.delimiter;
        self.items(
            block.tight,
            block
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| (format!("{}{delimiter} ", start + i), item)),
        );
    }

    fn visit_list_item(&mut self, block: &ListItem) {
        self.items(true, std::iter::once(("- ".to_string(), block)));
    }

    fn visit_thematic_break(&mut self) {
        self.leaf(THEMATIC_BREAK);
    }

    fn visit_html_block(&mut self, block: &HtmlBlock) {
        self.leaf(&block.content);
    }

    fn visit_custom(&mut self, block: &CustomBlock) {
        let registry = self.registry;
        self.writer.begin_block();
        match registry.renderer_for(block) {
            Some(renderer) => renderer.render_markdown(block, self),
            None => self.render_nested(&block.children),
        }
        self.writer.end_block();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::MarkdownProcessor;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn normalize(markdown: &str) -> String {
        let processor = MarkdownProcessor::default();
        let blocks = processor.process_markdown_document(markdown).unwrap();
        render_markdown(processor.registry(), &blocks)
    }

    #[test]
    fn canonical_forms() {
        assert_snapshot!(normalize("Title\n=====\n\n* a\n* b\n\n---\n\n    code\n"), @r"
        # Title

        * a
        * b

        ***

            code
        ");
    }

    #[test]
    fn references_are_inlined() {
        assert_eq!(
            normalize("[home]: /index.html 'Home'\n\nGo [home].\n"),
            "Go [home](/index.html \"Home\").\n"
        );
    }

    #[test]
    fn loose_lists_and_quotes() {
        assert_snapshot!(normalize("1) a\n\n2) b\n   > q\n   > r\n"), @r"
        1) a

        2) b

           > q
           > r
        ");
    }

    #[test]
    fn fences_outgrow_their_content() {
        assert_snapshot!(normalize("````rs\n```\nlet x = 1;\n````\n"), @r"
        ````rust
        ```
        let x = 1;
        ````
        ");
    }

    #[test]
    fn multi_line_headings_use_setext() {
        assert_eq!(normalize("a\nb\n---\n"), "a\nb\n---\n");
    }

    #[test]
    fn output_is_stable() {
        let source = "> # Quote\n> with *emph*\n\n- [link](</a b>)\n- `code`\n\n<div>\nhi\n</div>\n";
        let once = normalize(source);
        assert_eq!(normalize(&once), once);
    }
}
