use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::chars::{CODE_BLOCK_INDENT, is_blank};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

/// Code indented by four or more columns.
#[derive(Debug, Default)]
pub struct IndentedCode {
    lines: Vec<String>,
}

impl BlockParser for IndentedCode {
    fn tag(&self) -> BlockTag {
        BlockTag::IndentedCode
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        if state.is_code_indent() {
            Some(BlockContinue::AtColumn(state.column() + CODE_BLOCK_INDENT))
        } else if state.is_blank() {
            Some(BlockContinue::AtIndex(state.next_non_space_index()))
        } else {
            None
        }
    }

    fn add_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn finalize(mut self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        while self.lines.last().is_some_and(|l| is_blank(l)) {
            self.lines.pop();
        }
        let mut literal = String::new();
        for line in &self.lines {
            literal.push_str(line);
            literal.push('\n');
        }
        vec![RawNode::new(RawKind::IndentedCodeBlock { literal }, span)]
    }
}

#[derive(Debug)]
pub struct IndentedCodeStart;

impl BlockParserFactory for IndentedCodeStart {
    fn try_start(&self, state: &ParserState, _matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        // Indented code cannot interrupt a paragraph.
        if !state.is_code_indent() || state.is_blank() || state.active_block() == BlockTag::Paragraph {
            return None;
        }
        Some(BlockStart::of(Box::new(IndentedCode::default())).at_column(state.column() + CODE_BLOCK_INDENT))
    }
}
