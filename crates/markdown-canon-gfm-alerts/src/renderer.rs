use markdown_canon_engine::{BlockRendererExtension, CustomBlock, MarkdownRenderer, TextRenderer};

use crate::alert::Alert;

const QUOTE: &str = "> ";

pub struct AlertRenderer;

impl BlockRendererExtension for AlertRenderer {
    fn can_render(&self, block: &CustomBlock) -> bool {
        block.data::<Alert>().is_some()
    }

    /// The kind's premise, then the children's text on the same line.
    fn render_text(&self, block: &CustomBlock, renderer: &mut TextRenderer<'_>) {
        if let Some(alert) = block.data::<Alert>() {
            renderer.write_raw(alert.kind.premise());
        }
        renderer.render_nested(&block.children);
    }

    fn render_markdown(&self, block: &CustomBlock, renderer: &mut MarkdownRenderer<'_>) {
        let Some(alert) = block.data::<Alert>() else {
            renderer.render_nested(&block.children);
            return;
        };
        renderer.with_prefix(QUOTE, QUOTE, |renderer| {
            renderer.write_raw(&format!("[!{}]", alert.kind.name()));
            if !block.children.is_empty() {
                renderer.line_break();
                renderer.render_nested(&block.children);
            }
        });
    }
}
