use markdown_canon_engine::parsing::blocks::{CustomNode, RawNode};
use markdown_canon_engine::{BlockProcessorExtension, CustomBlock, MarkdownProcessor, ProcessError};

use crate::GFM_ALERTS;
use crate::alert::Alert;

/// Alert node to a custom block holding the processed children.
pub struct AlertProcessor;

impl BlockProcessorExtension for AlertProcessor {
    fn can_process(&self, node: &CustomNode) -> bool {
        node.downcast_ref::<Alert>().is_some()
    }

    fn process_block(
        &self,
        raw: &RawNode,
        node: &CustomNode,
        processor: &MarkdownProcessor,
    ) -> Result<Option<CustomBlock>, ProcessError> {
        let Some(alert) = node.downcast_ref::<Alert>() else {
            return Err(ProcessError::Extension {
                id: GFM_ALERTS,
                message: format!("not an alert: {:?}", node.data),
            });
        };
        let children = processor.process_children(raw)?;
        Ok(Some(CustomBlock::new(GFM_ALERTS, *alert, children)))
    }
}
