use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

/// The root container. Always open until the input ends.
#[derive(Debug, Default)]
pub struct Document {
    children: Vec<RawNode>,
}

impl BlockParser for Document {
    fn tag(&self) -> BlockTag {
        BlockTag::Document
    }

    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&mut self, _child: &BlockTag) -> bool {
        true
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        Some(BlockContinue::AtIndex(state.index()))
    }

    fn add_child(&mut self, child: RawNode) {
        self.children.push(child);
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        vec![RawNode::with_children(RawKind::Document, span, self.children)]
    }
}
