//! # Rendering
//!
//! Consumers of the normalized model. A renderer implements [`BlockVisitor`]
//! and is driven by [`Block::accept`]; custom blocks are rendered by the first
//! registered [`BlockRendererExtension`] that accepts them.
//!
//! ## Modules
//!
//! - **`text`**: Plain-text rendering
//! - **`markdown`**: Canonical Markdown re-serialization
//! - **`inline`**: Inline nodes to Markdown, with escaping
//! - **`writer`**: Line prefixes and block separators shared by both renderers

pub mod inline;
pub mod markdown;
pub mod text;
mod writer;

use crate::models::{
    Block, BlockQuote, BulletList, CustomBlock, FencedCodeBlock, Heading, HtmlBlock, IndentedCodeBlock, ListItem,
    OrderedList, Paragraph,
};

pub use markdown::{MarkdownRenderer, render_markdown};
pub use text::{TextRenderer, render_text};

/// One handler per block variant.
pub trait BlockVisitor {
    fn visit_paragraph(&mut self, block: &Paragraph);
    fn visit_heading(&mut self, block: &Heading);
    fn visit_block_quote(&mut self, block: &BlockQuote);
    fn visit_fenced_code_block(&mut self, block: &FencedCodeBlock);
    fn visit_indented_code_block(&mut self, block: &IndentedCodeBlock);
    fn visit_bullet_list(&mut self, block: &BulletList);
    fn visit_ordered_list(&mut self, block: &OrderedList);
    fn visit_list_item(&mut self, block: &ListItem);
    fn visit_thematic_break(&mut self);
    fn visit_html_block(&mut self, block: &HtmlBlock);
    /// Fallback for blocks contributed by extensions.
    fn visit_custom(&mut self, block: &CustomBlock);

    fn visit_blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            block.accept(self);
        }
    }
}

/// Renders an extension's custom blocks.
pub trait BlockRendererExtension: Send + Sync {
    fn can_render(&self, block: &CustomBlock) -> bool;

    fn render_text(&self, block: &CustomBlock, renderer: &mut TextRenderer<'_>);

    fn render_markdown(&self, block: &CustomBlock, renderer: &mut MarkdownRenderer<'_>);
}
