pub mod error;
pub mod extensions;
pub mod models;
pub mod parsing;
pub mod processing;
pub mod rendering;

// Re-export key types for easier usage
pub use error::ProcessError;
pub use extensions::{
    BlockProcessorExtension, ExtensionId, ExtensionRegistry, MarkdownExtension, TASK_LIST_ITEMS,
    TaskListItemsExtension, TaskListMarker,
};
pub use models::*;
pub use processing::{InlineNormalizer, MarkdownProcessor, MarkdownProcessorBuilder, PostProcessor};
pub use rendering::{BlockRendererExtension, BlockVisitor, MarkdownRenderer, TextRenderer, render_markdown, render_text};
