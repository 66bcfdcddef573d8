use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::chars::{skip_byte, skip_space_tab};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;
use crate::parsing::scan::unescape;

/// A ```` ``` ```` or `~~~` fenced code block. Content is a raw zone: no
/// block or inline parsing happens inside.
#[derive(Debug)]
pub struct CodeFence {
    fence_char: u8,
    fence_length: usize,
    fence_indent: usize,
    info_line: Option<String>,
    literal: String,
}

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LENGTH: usize = 3;

    /// Recognizes an opening fence at `index` of `line`.
    pub fn opening(line: &str, index: usize, fence_indent: usize) -> Option<Self> {
        let fence_char = *line.as_bytes().get(index)?;
        if fence_char != Self::BACKTICK && fence_char != Self::TILDE {
            return None;
        }
        let fence_length = skip_byte(line, fence_char, index) - index;
        if fence_length < Self::MIN_LENGTH {
            return None;
        }
        // Backtick fences cannot carry backticks in their info string.
        if fence_char == Self::BACKTICK && line[index + fence_length..].contains('`') {
            return None;
        }
        Some(Self {
            fence_char,
            fence_length,
            fence_indent,
            info_line: None,
            literal: String::new(),
        })
    }

    pub fn fence_length(&self) -> usize {
        self.fence_length
    }

    fn is_closing(&self, line: &str, index: usize) -> bool {
        let run = skip_byte(line, self.fence_char, index) - index;
        run >= self.fence_length && skip_space_tab(line, index + run) == line.len()
    }
}

impl BlockParser for CodeFence {
    fn tag(&self) -> BlockTag {
        BlockTag::FencedCode
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        let line = state.line();
        if !state.is_code_indent() && self.is_closing(line, state.next_non_space_index()) {
            return Some(BlockContinue::Finished);
        }
        // Strip up to the opening fence's indentation from content lines.
        let bytes = line.as_bytes();
        let mut index = state.index();
        let mut remaining = self.fence_indent;
        while remaining > 0 && index < bytes.len() && bytes[index] == b' ' {
            index += 1;
            remaining -= 1;
        }
        Some(BlockContinue::AtIndex(index))
    }

    fn add_line(&mut self, line: &str) {
        if self.info_line.is_none() {
            self.info_line = Some(line.to_string());
        } else {
            self.literal.push_str(line);
            self.literal.push('\n');
        }
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let info = self.info_line.as_deref().map(str::trim).map(unescape).unwrap_or_default();
        let kind = RawKind::FencedCodeBlock {
            info,
            literal: self.literal,
            fence_char: char::from(self.fence_char),
            fence_length: self.fence_length,
        };
        vec![RawNode::new(kind, span)]
    }
}

#[derive(Debug)]
pub struct CodeFenceStart;

impl BlockParserFactory for CodeFenceStart {
    fn try_start(&self, state: &ParserState, _matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        if state.is_code_indent() {
            return None;
        }
        let index = state.next_non_space_index();
        let fence = CodeFence::opening(state.line(), index, state.indent())?;
        let resume = index + fence.fence_length();
        Some(BlockStart::of(Box::new(fence)).at_index(resume))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("```rust", Some(3))]
    #[case("~~~~", Some(4))]
    #[case("``", None)]
    #[case("``` a`b", None)]
    #[case("~~~ a`b", Some(3))]
    #[case("hello", None)]
    fn detects_opening(#[case] line: &str, #[case] length: Option<usize>) {
        assert_eq!(CodeFence::opening(line, 0, 0).map(|f| f.fence_length()), length);
    }

    #[test]
    fn closing_needs_same_char_and_length() {
        let fence = CodeFence::opening("````", 0, 0).unwrap();
        assert!(fence.is_closing("`````  ", 0));
        assert!(!fence.is_closing("```", 0));
        assert!(!fence.is_closing("~~~~", 0));
        assert!(!fence.is_closing("```` x", 0));
    }
}
