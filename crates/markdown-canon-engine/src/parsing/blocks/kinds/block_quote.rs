use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::chars::is_space_or_tab;
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

/// A `>` block quote container.
#[derive(Debug, Default)]
pub struct BlockQuote {
    children: Vec<RawNode>,
}

impl BlockQuote {
    pub const MARKER: u8 = b'>';

    /// Whether the line has a quote marker at the next non-space position.
    ///
    /// Public so that extensions with quote-like continuation (alerts) share
    /// the exact rule.
    pub fn has_marker(state: &ParserState) -> bool {
        !state.is_code_indent()
            && state.line().as_bytes().get(state.next_non_space_index()) == Some(&Self::MARKER)
    }

    /// Column just after the marker and its optional following space or tab.
    pub fn content_column(state: &ParserState) -> usize {
        let mut column = state.column() + state.indent() + 1;
        let after = state.next_non_space_index() + 1;
        if state.line().as_bytes().get(after).copied().is_some_and(is_space_or_tab) {
            column += 1;
        }
        column
    }
}

impl BlockParser for BlockQuote {
    fn tag(&self) -> BlockTag {
        BlockTag::BlockQuote
    }

    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&mut self, _child: &BlockTag) -> bool {
        true
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        Self::has_marker(state).then(|| BlockContinue::AtColumn(Self::content_column(state)))
    }

    fn add_child(&mut self, child: RawNode) {
        self.children.push(child);
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        vec![RawNode::with_children(RawKind::BlockQuote, span, self.children)]
    }
}

#[derive(Debug)]
pub struct BlockQuoteStart;

impl BlockParserFactory for BlockQuoteStart {
    fn try_start(&self, state: &ParserState, _matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        BlockQuote::has_marker(state).then(|| {
            BlockStart::of(Box::new(BlockQuote::default())).at_column(BlockQuote::content_column(state))
        })
    }
}
