//! # Processing
//!
//! Raw tree to normalized [`Block`]s.
//!
//! ## Modules
//!
//! - **`post`**: Post-processors that rewrite the raw tree before the walk
//! - **`inline`**: Inline normalizer for paragraph and heading content

pub mod inline;
pub mod post;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ProcessError;
use crate::extensions::{ExtensionRegistry, MarkdownExtension};
use crate::models::{
    Block, BlockQuote, BulletList, CodeLanguage, FencedCodeBlock, Heading, HtmlBlock, IndentedCodeBlock, ListItem,
    OrderedList, Paragraph,
};
use crate::parsing::blocks::{InlineRun, RawKind, RawNode};
use crate::parsing::parse_document;

pub use inline::InlineNormalizer;
pub use post::PostProcessor;

const MAX_HEADING_LEVEL: u8 = 6;

/// Parses Markdown and normalizes it into a list of [`Block`]s.
///
/// A processor is immutable and may be shared between threads; every call
/// builds and discards its own raw tree.
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
    registry: Arc<ExtensionRegistry>,
    language_aliases: HashMap<String, CodeLanguage>,
}

impl MarkdownProcessor {
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            language_aliases: HashMap::new(),
        }
    }

    pub fn builder() -> MarkdownProcessorBuilder {
        MarkdownProcessorBuilder::default()
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Parses and normalizes a whole document.
    ///
    /// Link reference definitions are consumed, code literals are copied
    /// verbatim apart from the final line terminator, and empty blocks are
    /// dropped. Malformed Markdown never fails; only a tree that is not rooted
    /// in a document does.
    pub fn process_markdown_document(&self, text: &str) -> Result<Vec<Block>, ProcessError> {
        let document = self.parse_raw(text)?;
        let blocks = self.process_children(&document)?;
        log::trace!("Processed document: {} bytes into {} blocks", text.len(), blocks.len());
        Ok(blocks)
    }

    /// The raw tree after every registered post-processor has run.
    pub fn parse_raw(&self, text: &str) -> Result<RawNode, ProcessError> {
        let document = parse_document(text, &self.registry)?;
        let document = post::run_all(document, self.registry.post_processors());
        match document.kind {
            RawKind::Document => Ok(document),
            _ => Err(ProcessError::NotADocument),
        }
    }

    /// Processes the children of `node`, skipping the ones that normalize to nothing.
    pub fn process_children(&self, node: &RawNode) -> Result<Vec<Block>, ProcessError> {
        let mut blocks = Vec::with_capacity(node.children.len());
        for child in &node.children {
            if let Some(block) = self.process_block(child)? {
                blocks.push(block);
            }
        }
        Ok(blocks)
    }

    /// Language of a fence info string; configured aliases win over the built-in table.
    pub fn code_language(&self, info: &str) -> Option<CodeLanguage> {
        let name = info.split_whitespace().next()?;
        match self.language_aliases.get(&name.to_lowercase()) {
            Some(language) => Some(language.clone()),
            None => CodeLanguage::from_info_string(name),
        }
    }

    fn process_block(&self, node: &RawNode) -> Result<Option<Block>, ProcessError> {
        let block = match &node.kind {
            RawKind::BlockQuote => Some(Block::BlockQuote(BlockQuote::new(self.process_children(node)?))),
            RawKind::Heading { level, content } => {
                if *level > MAX_HEADING_LEVEL {
                    None
                } else {
                    Some(Block::Heading(Heading {
                        level: *level,
                        content: Self::inline_content(content),
                    }))
                }
            }
            RawKind::Paragraph(run) => {
                let content = Self::inline_content(run);
                (!content.is_empty()).then(|| Block::Paragraph(Paragraph::new(content)))
            }
            RawKind::FencedCodeBlock { info, literal, .. } => Some(Block::FencedCodeBlock(FencedCodeBlock {
                literal: trim_final_newline(literal).to_string(),
                language: self.code_language(info),
            })),
            RawKind::IndentedCodeBlock { literal } => Some(Block::IndentedCodeBlock(IndentedCodeBlock {
                literal: trim_final_newline(literal).to_string(),
            })),
            RawKind::BulletList { tight, marker } => {
                let items = self.process_list_items(node)?;
                (!items.is_empty()).then(|| {
                    Block::BulletList(BulletList {
                        items,
                        tight: *tight,
                        marker: *marker,
                    })
                })
            }
            RawKind::OrderedList {
                tight,
                start,
                delimiter,
            } => {
                let items = self.process_list_items(node)?;
                (!items.is_empty()).then(|| {
                    Block::OrderedList(OrderedList {
                        items,
                        tight: *tight,
                        start: *start,
                        delimiter: *delimiter,
                    })
                })
            }
            RawKind::ListItem { .. } => Some(Block::ListItem(ListItem::new(self.process_children(node)?))),
            RawKind::ThematicBreak => Some(Block::ThematicBreak),
            RawKind::HtmlBlock { literal } => {
                if literal.trim().is_empty() {
                    None
                } else {
                    Some(Block::HtmlBlock(HtmlBlock {
                        content: trim_final_newline(literal).to_string(),
                    }))
                }
            }
            RawKind::Custom(custom) => match self.registry.processor_for(custom) {
                Some((id, processor)) => {
                    log::trace!("Custom block from {} handled by {id}", custom.owner);
                    processor.process_block(node, custom, self)?.map(Block::Custom)
                }
                None => {
                    log::debug!("No processor for custom block from {}, dropping it", custom.owner);
                    None
                }
            },
            RawKind::LinkReferenceDefinition { .. } => None,
            RawKind::Document => {
                return Err(ProcessError::UnexpectedBlock {
                    kind: node.kind_name(),
                });
            }
        };
        Ok(block)
    }

    /// Only `ListItem` children of a list become items.
    fn process_list_items(&self, list: &RawNode) -> Result<Vec<ListItem>, ProcessError> {
        let mut items = Vec::with_capacity(list.children.len());
        for child in &list.children {
            if let RawKind::ListItem { .. } = child.kind {
                items.push(ListItem::new(self.process_children(child)?));
            }
        }
        Ok(items)
    }

    fn inline_content(run: &InlineRun) -> crate::models::InlineNode {
        InlineNormalizer::normalize(&run.inlines)
    }
}

fn trim_final_newline(literal: &str) -> &str {
    literal.strip_suffix('\n').unwrap_or(literal)
}

/// Assembles a [`MarkdownProcessor`] from extensions and language aliases.
#[derive(Debug, Default)]
pub struct MarkdownProcessorBuilder {
    extensions: Vec<Arc<dyn MarkdownExtension>>,
    language_aliases: HashMap<String, CodeLanguage>,
}

impl MarkdownProcessorBuilder {
    /// Registers an extension after the ones already added.
    pub fn extension(mut self, extension: impl MarkdownExtension + 'static) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    pub fn shared_extension(mut self, extension: Arc<dyn MarkdownExtension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Maps a fence name (case-insensitive) to a language name or alias.
    pub fn language_alias(mut self, name: impl AsRef<str>, language: impl AsRef<str>) -> Self {
        self.language_aliases
            .insert(name.as_ref().trim().to_lowercase(), CodeLanguage::from_name(language.as_ref()));
        self
    }

    pub fn build(self) -> Result<MarkdownProcessor, ProcessError> {
        Ok(MarkdownProcessor {
            registry: Arc::new(ExtensionRegistry::new(self.extensions)?),
            language_aliases: self.language_aliases,
        })
    }
}
