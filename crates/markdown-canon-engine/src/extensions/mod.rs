//! # Extensions
//!
//! The registry of pluggable behavior. An extension contributes any subset
//! of: block start factories (grammar), post-processors (raw tree rewrites),
//! a block processor (raw custom node to normalized block) and a block
//! renderer (normalized custom block to text or Markdown).
//!
//! Registration order is precedence: for every hook, the first extension
//! whose predicate accepts wins.

pub mod task_list;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ProcessError;
use crate::models::CustomBlock;
use crate::parsing::blocks::{BlockParserFactory, CustomNode, RawNode};
use crate::processing::MarkdownProcessor;
use crate::processing::post::PostProcessor;
use crate::rendering::BlockRendererExtension;

pub use task_list::{TASK_LIST_ITEMS, TaskListItemsExtension, TaskListMarker};

/// Stable identifier of an extension, e.g. `github-alerts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExtensionId(&'static str);

impl ExtensionId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A bundle of hooks registered under one id.
pub trait MarkdownExtension: Send + Sync + fmt::Debug {
    fn id(&self) -> ExtensionId;

    fn block_parser_factories(&self) -> Vec<Arc<dyn BlockParserFactory>> {
        Vec::new()
    }

    fn post_processors(&self) -> Vec<Arc<dyn PostProcessor>> {
        Vec::new()
    }

    fn block_processor(&self) -> Option<Arc<dyn BlockProcessorExtension>> {
        None
    }

    fn block_renderer(&self) -> Option<Arc<dyn BlockRendererExtension>> {
        None
    }
}

/// Turns an extension's raw custom node into a normalized block.
pub trait BlockProcessorExtension: Send + Sync {
    fn can_process(&self, node: &CustomNode) -> bool;

    /// `raw` is the node carrying `node`; its children are usually processed
    /// through `processor`. `Ok(None)` drops the block.
    fn process_block(
        &self,
        raw: &RawNode,
        node: &CustomNode,
        processor: &MarkdownProcessor,
    ) -> Result<Option<CustomBlock>, ProcessError>;
}

/// Ordered, immutable set of extensions.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn MarkdownExtension>>,
    factories: Vec<Arc<dyn BlockParserFactory>>,
    post_processors: Vec<Arc<dyn PostProcessor>>,
    processors: Vec<(ExtensionId, Arc<dyn BlockProcessorExtension>)>,
    renderers: Vec<(ExtensionId, Arc<dyn BlockRendererExtension>)>,
}

impl ExtensionRegistry {
    /// Builds a registry, collecting every hook in registration order.
    ///
    /// Fails with [`ProcessError::DuplicateExtension`] if two extensions share an id.
    pub fn new(extensions: impl IntoIterator<Item = Arc<dyn MarkdownExtension>>) -> Result<Self, ProcessError> {
        let mut registry = Self::default();
        for extension in extensions {
            let id = extension.id();
            if registry.contains(id) {
                return Err(ProcessError::DuplicateExtension { id });
            }
            registry.factories.extend(extension.block_parser_factories());
            registry.post_processors.extend(extension.post_processors());
            if let Some(processor) = extension.block_processor() {
                registry.processors.push((id, processor));
            }
            if let Some(renderer) = extension.block_renderer() {
                registry.renderers.push((id, renderer));
            }
            log::debug!("Registered markdown extension {id}");
            registry.extensions.push(extension);
        }
        Ok(registry)
    }

    /// A registry with no extensions: plain CommonMark.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ExtensionId) -> bool {
        self.extensions.iter().any(|e| e.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ExtensionId> + '_ {
        self.extensions.iter().map(|e| e.id())
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn block_parser_factories(&self) -> impl Iterator<Item = Arc<dyn BlockParserFactory>> + '_ {
        self.factories.iter().cloned()
    }

    pub fn post_processors(&self) -> &[Arc<dyn PostProcessor>] {
        &self.post_processors
    }

    /// First registered processor that accepts `node`.
    pub fn processor_for(&self, node: &CustomNode) -> Option<(ExtensionId, &dyn BlockProcessorExtension)> {
        self.processors
            .iter()
            .find(|(_, p)| p.can_process(node))
            .map(|(id, p)| (*id, p.as_ref()))
    }

    /// First registered renderer that accepts `block`.
    pub fn renderer_for(&self, block: &CustomBlock) -> Option<&dyn BlockRendererExtension> {
        self.renderers
            .iter()
            .find(|(_, r)| r.can_render(block))
            .map(|(_, r)| r.as_ref())
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str);

    impl MarkdownExtension for Named {
        fn id(&self) -> ExtensionId {
            ExtensionId::new(self.0)
        }
    }

    #[test]
    fn keeps_registration_order() {
        let registry = ExtensionRegistry::new([
            Arc::new(Named("b")) as Arc<dyn MarkdownExtension>,
            Arc::new(Named("a")),
        ])
        .unwrap();
        let ids: Vec<_> = registry.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(ExtensionId::new("a")));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = ExtensionRegistry::new([
            Arc::new(Named("x")) as Arc<dyn MarkdownExtension>,
            Arc::new(Named("x")),
        ])
        .unwrap_err();
        assert!(matches!(err, ProcessError::DuplicateExtension { id } if id.as_str() == "x"));
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExtensionRegistry>();
    }
}
