//! GitHub-style task list items: `- [x] done`, `- [ ] todo`.
//!
//! Recognition is a raw-tree rewrite, not grammar: the item's first
//! paragraph loses its `[x] ` prefix and a [`TaskListMarker`] node is
//! inserted in front of it.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Serialize;

use crate::error::ProcessError;
use crate::models::{CustomBlock, CustomBlockData};
use crate::parsing::blocks::{CustomNode, CustomNodeData, RawInline, RawKind, RawNode};
use crate::processing::MarkdownProcessor;
use crate::processing::post::PostProcessor;
use crate::rendering::{BlockRendererExtension, MarkdownRenderer, TextRenderer};

use super::{BlockProcessorExtension, ExtensionId, MarkdownExtension};

pub const TASK_LIST_ITEMS: ExtensionId = ExtensionId::new("task-list-items");

static TASK_MARKER: OnceLock<Regex> = OnceLock::new();

fn task_marker() -> &'static Regex {
    TASK_MARKER.get_or_init(|| Regex::new(r"^\[([xX\s])\]\s+(.*)$").expect("task marker regex is valid"))
}

/// Checkbox state of a task list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskListMarker {
    pub checked: bool,
}

impl TaskListMarker {
    fn markdown(self) -> &'static str {
        if self.checked { "[x] " } else { "[ ] " }
    }
}

impl CustomNodeData for TaskListMarker {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl CustomBlockData for TaskListMarker {
    fn label(&self) -> String {
        format!("TaskListMarker(checked={})", self.checked)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_data(&self, other: &dyn CustomBlockData) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskListItemsExtension;

impl MarkdownExtension for TaskListItemsExtension {
    fn id(&self) -> ExtensionId {
        TASK_LIST_ITEMS
    }

    fn post_processors(&self) -> Vec<Arc<dyn PostProcessor>> {
        vec![Arc::new(TaskListItemPostProcessor)]
    }

    fn block_processor(&self) -> Option<Arc<dyn BlockProcessorExtension>> {
        Some(Arc::new(TaskListMarkerProcessor))
    }

    fn block_renderer(&self) -> Option<Arc<dyn BlockRendererExtension>> {
        Some(Arc::new(TaskListMarkerRenderer))
    }
}

#[derive(Debug)]
struct TaskListItemPostProcessor;

impl PostProcessor for TaskListItemPostProcessor {
    fn process(&self, mut document: RawNode) -> RawNode {
        document.walk_mut(&mut |node| {
            if let RawKind::ListItem { .. } = node.kind {
                mark_task_item(node);
            }
        });
        document
    }
}

fn mark_task_item(item: &mut RawNode) {
    let Some(first) = item.children.first_mut() else {
        return;
    };
    let span = first.span;
    let RawKind::Paragraph(run) = &mut first.kind else {
        return;
    };
    let Some(RawInline::Text(text)) = run.inlines.first_mut() else {
        return;
    };
    let Some(captures) = task_marker().captures(text) else {
        return;
    };
    let marker = TaskListMarker {
        checked: !captures[1].trim().is_empty(),
    };
    let rest = captures[2].to_string();
    *text = rest;
    item.children.insert(
        0,
        RawNode::new(RawKind::Custom(CustomNode::new(TASK_LIST_ITEMS, marker)), span),
    );
}

struct TaskListMarkerProcessor;

impl BlockProcessorExtension for TaskListMarkerProcessor {
    fn can_process(&self, node: &CustomNode) -> bool {
        node.downcast_ref::<TaskListMarker>().is_some()
    }

    fn process_block(
        &self,
        _raw: &RawNode,
        node: &CustomNode,
        _processor: &MarkdownProcessor,
    ) -> Result<Option<CustomBlock>, ProcessError> {
        Ok(node
            .downcast_ref::<TaskListMarker>()
            .map(|marker| CustomBlock::new(TASK_LIST_ITEMS, *marker, Vec::new())))
    }
}

/// Writes the checkbox and lets the item's paragraph continue on the same line.
struct TaskListMarkerRenderer;

impl BlockRendererExtension for TaskListMarkerRenderer {
    fn can_render(&self, block: &CustomBlock) -> bool {
        block.data::<TaskListMarker>().is_some()
    }

    fn render_text(&self, block: &CustomBlock, renderer: &mut TextRenderer<'_>) {
        if let Some(marker) = block.data::<TaskListMarker>() {
            renderer.write_raw(marker.markdown());
            renderer.suppress_separator();
        }
    }

    fn render_markdown(&self, block: &CustomBlock, renderer: &mut MarkdownRenderer<'_>) {
        if let Some(marker) = block.data::<TaskListMarker>() {
            renderer.write_raw(marker.markdown());
            renderer.suppress_separator();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, InlineNode, ListItem, Paragraph};
    use crate::rendering::{render_markdown, render_text};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn processor() -> MarkdownProcessor {
        MarkdownProcessor::builder().extension(TaskListItemsExtension).build().unwrap()
    }

    fn items(blocks: &[Block]) -> &[ListItem] {
        match blocks {
            [Block::BulletList(list)] => &list.items,
            other => panic!("expected one bullet list, got {other:?}"),
        }
    }

    #[rstest]
    #[case("- [x] Done thing\n", true, "Done thing")]
    #[case("- [X] Shouting\n", true, "Shouting")]
    #[case("- [ ] Todo\n", false, "Todo")]
    fn marks_task_items(#[case] source: &str, #[case] checked: bool, #[case] rest: &str) {
        let blocks = processor().process_markdown_document(source).unwrap();
        assert_eq!(
            items(&blocks)[0].children,
            vec![
                Block::Custom(CustomBlock::new(TASK_LIST_ITEMS, TaskListMarker { checked }, Vec::new())),
                Block::Paragraph(Paragraph::new(InlineNode::Text(rest.into()))),
            ]
        );
    }

    #[rstest]
    #[case("- [x]\n")]
    #[case("- [y] nope\n")]
    #[case("- [x]done\n")]
    #[case("- a [x] b\n")]
    fn leaves_other_items_alone(#[case] source: &str) {
        let blocks = processor().process_markdown_document(source).unwrap();
        assert!(matches!(items(&blocks)[0].children.as_slice(), [Block::Paragraph(_)]));
    }

    #[test]
    fn nested_items_are_marked() {
        let blocks = processor()
            .process_markdown_document("- parent\n  - [ ] child\n")
            .unwrap();
        let Block::BulletList(nested) = &items(&blocks)[0].children[1] else {
            panic!("expected nested list");
        };
        let marker = match &nested.items[0].children[0] {
            Block::Custom(custom) => custom.data::<TaskListMarker>().copied(),
            _ => None,
        };
        assert_eq!(marker, Some(TaskListMarker { checked: false }));
    }

    #[test]
    fn renders_checkbox_inline() {
        let processor = processor();
        let blocks = processor
            .process_markdown_document("- [x] Done *now*\n- [ ] Later\n")
            .unwrap();
        assert_eq!(
            render_markdown(processor.registry(), &blocks),
            "- [x] Done *now*\n- [ ] Later\n"
        );
        assert_eq!(render_text(processor.registry(), &blocks), "• [x] Done now\n• [ ] Later\n");
    }

    #[test]
    fn without_extension_marker_stays_text() {
        let blocks = MarkdownProcessor::default()
            .process_markdown_document("- [x] Done\n")
            .unwrap();
        assert_eq!(
            items(&blocks)[0].children,
            vec![Block::Paragraph(Paragraph::new(InlineNode::Text("[x] Done".into())))]
        );
    }
}
