use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

/// `***`, `---` or `___`, optionally spaced.
#[derive(Debug, Default)]
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: [u8; 3] = [b'*', b'-', b'_'];
    pub const MIN_MARKERS: usize = 3;

    pub fn matches(rest: &str) -> bool {
        let bytes = rest.as_bytes();
        let Some(&marker) = bytes.first() else {
            return false;
        };
        if !Self::MARKERS.contains(&marker) {
            return false;
        }
        let mut count = 0;
        for &b in bytes {
            match b {
                b' ' | b'\t' => {}
                b if b == marker => count += 1,
                _ => return false,
            }
        }
        count >= Self::MIN_MARKERS
    }
}

impl BlockParser for ThematicBreak {
    fn tag(&self) -> BlockTag {
        BlockTag::ThematicBreak
    }

    fn try_continue(&mut self, _state: &ParserState) -> Option<BlockContinue> {
        None
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        vec![RawNode::new(RawKind::ThematicBreak, span)]
    }
}

#[derive(Debug)]
pub struct ThematicBreakStart;

impl BlockParserFactory for ThematicBreakStart {
    fn try_start(&self, state: &ParserState, _matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        if state.is_code_indent() || !ThematicBreak::matches(state.rest()) {
            return None;
        }
        Some(BlockStart::of(Box::new(ThematicBreak)).at_index(state.line().len()))
    }
}
