use crate::extensions::ExtensionRegistry;
use crate::models::{
    Block, BlockQuote, BulletList, CustomBlock, FencedCodeBlock, Heading, HtmlBlock, IndentedCodeBlock, ListItem,
    OrderedList, Paragraph,
};

use super::BlockVisitor;
use super::writer::BlockWriter;

const BULLET: &str = "• ";

/// Renders blocks as plain text.
///
/// Markup is dropped, list items keep a bullet or their number, code keeps
/// its literal and raw HTML is skipped.
pub struct TextRenderer<'a> {
    registry: &'a ExtensionRegistry,
    writer: BlockWriter,
}

/// Plain text of `blocks`, with custom blocks rendered through `registry`.
pub fn render_text(registry: &ExtensionRegistry, blocks: &[Block]) -> String {
    let mut renderer = TextRenderer::new(registry);
    renderer.render_blocks(blocks);
    renderer.finish()
}

impl<'a> TextRenderer<'a> {
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
        self.writer.enter("", "", self.writer.tight());
        self.visit_blocks(blocks);
        self.writer.exit();
    }

    /// Writes text as is.
    pub fn write_raw(&mut self, text: &str) {
        self.writer.write(text);
    }

    /// The block after the current one continues on the same line.
    pub fn suppress_separator(&mut self) {
        self.writer.suppress_separator();
    }

    pub fn finish(self) -> String {
        self.writer.finish()
    }

    fn leaf(&mut self, text: &str) {
        self.writer.begin_block();
        self.writer.write(text);
        self.writer.end_block();
    }

    fn items<'i>(&mut self, tight: bool, items: impl Iterator<Item = (String, &'i ListItem)>) {
        self.writer.begin_block();
        self.writer.enter("", "", tight);
        for (marker, item) in items {
            self.writer.begin_block();
            self.writer.enter(&marker, &" ".repeat(marker.chars().count()), tight);
            self.visit_blocks(&item.children);
            self.writer.exit();
            self.writer.end_block();
        }
        self.writer.exit();
        self.writer.end_block();
    }
}

impl BlockVisitor for TextRenderer<'_> {
    fn visit_paragraph(&mut self, block: &Paragraph) {
        self.leaf(&block.content.plain_text());
    }

    fn visit_heading(&mut self, block: &Heading) {
        self.leaf(&block.content.plain_text());
    }

    fn visit_block_quote(&mut self, block: &BlockQuote) {
        self.writer.begin_block();
        self.render_nested(&block.children);
        self.writer.end_block();
    }

    fn visit_fenced_code_block(&mut self, block: &FencedCodeBlock) {
        self.leaf(&block.literal);
    }

    fn visit_indented_code_block(&mut self, block: &IndentedCodeBlock) {
        self.leaf(&block.literal);
    }

    fn visit_bullet_list(&mut self, block: &BulletList) {
        self.items(block.tight, block.items.iter().map(|item| (BULLET.to_string(), item)));
    }

    fn visit_ordered_list(&mut self, block: &OrderedList) {
        let start = block.start;
        let delimiter = block.delimiter;
        self.items(
            block.tight,
            block
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| (format!("{}{delimiter} ", start as usize + i), item)),
        );
    }

    fn visit_list_item(&mut self, block: &ListItem) {
        self.items(true, std::iter::once((BULLET.to_string(), block)));
    }

    fn visit_thematic_break(&mut self) {
        self.leaf("---");
    }

    fn visit_html_block(&mut self, _block: &HtmlBlock) {}

    fn visit_custom(&mut self, block: &CustomBlock) {
        let registry = self.registry;
        self.writer.begin_block();
        match registry.renderer_for(block) {
            Some(renderer) => renderer.render_text(block, self),
            None => self.render_nested(&block.children),
        }
        self.writer.end_block();
    }
}
