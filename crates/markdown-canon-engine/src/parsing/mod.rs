//! # Parsing
//!
//! The grammar engine: Markdown text to a raw block tree with parsed inlines.
//!
//! ## Modules
//!
//! - **`rope`**: Source lines with byte spans over an `xi_rope::Rope`
//! - **`blocks`**: Block structure (open-block stack, built-in kinds, extension hooks)
//! - **`inline`**: Inline grammar for paragraph and heading content
//! - **`references`**: Link reference definitions and label normalization
//! - **`scan`**: Link destination/title/label scanners, escapes and entities
//! - **`html`**: Raw HTML patterns
//! - **`chars`**: Character classes
//! - **`snapshot`**: Tree outlines and invariant checks used by tests

pub mod blocks;
pub mod chars;
pub mod html;
pub mod inline;
pub mod references;
pub mod rope;
pub mod scan;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use crate::error::ProcessError;
use crate::extensions::ExtensionRegistry;

use blocks::{BlockBuilder, BlockTree, RawNode};
use rope::lines_with_spans;

/// Parses `text` into a raw `Document` tree.
///
/// Block starts contributed by `registry` are tried before the built-in ones.
/// After the block phase, every paragraph and heading has its inline content
/// parsed against the document's reference definitions.
pub fn parse_document(text: &str, registry: &ExtensionRegistry) -> Result<RawNode, ProcessError> {
    let rope = Rope::from(text);
    let mut builder = BlockBuilder::new(registry.block_parser_factories());
    for line in lines_with_spans(&rope) {
        builder.push(line);
    }
    let BlockTree {
        mut document,
        definitions,
    } = builder.finish()?;

    log::trace!(
        "Block phase done: {} top-level blocks, {} reference definitions",
        document.children.len(),
        definitions.len()
    );
    document.walk_mut(&mut |node| {
        if let Some(run) = node.kind.inline_run_mut() {
            run.inlines = inline::parse_inline(&run.source, &definitions);
        }
    });
    Ok(document)
}
