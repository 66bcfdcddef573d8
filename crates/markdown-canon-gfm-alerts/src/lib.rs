//! # GitHub Alerts
//!
//! Block quotes whose first line is an alert marker:
//!
//! ```text
//! > [!WARNING]
//! > Be careful
//! ```
//!
//! ## Modules
//!
//! - **`alert`**: Alert kinds and the payload shared by the raw and normalized trees
//! - **`parser`**: Block start factory and the quote-like open block
//! - **`processor`**: Raw alert node to [`CustomBlock`](markdown_canon_engine::CustomBlock)
//! - **`renderer`**: Text premise and Markdown re-serialization

pub mod alert;
pub mod parser;
pub mod processor;
pub mod renderer;

use std::sync::Arc;

use markdown_canon_engine::parsing::blocks::BlockParserFactory;
use markdown_canon_engine::{BlockProcessorExtension, BlockRendererExtension, ExtensionId, MarkdownExtension};

pub use alert::{Alert, AlertKind};

pub const GFM_ALERTS: ExtensionId = ExtensionId::new("github-alerts");

/// Registers alert grammar, processing and rendering under [`GFM_ALERTS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubAlertExtension;

impl MarkdownExtension for GitHubAlertExtension {
    fn id(&self) -> ExtensionId {
        GFM_ALERTS
    }

    fn block_parser_factories(&self) -> Vec<Arc<dyn BlockParserFactory>> {
        vec![Arc::new(parser::AlertStart)]
    }

    fn block_processor(&self) -> Option<Arc<dyn BlockProcessorExtension>> {
        Some(Arc::new(processor::AlertProcessor))
    }

    fn block_renderer(&self) -> Option<Arc<dyn BlockRendererExtension>> {
        Some(Arc::new(renderer::AlertRenderer))
    }
}
