use std::sync::Arc;

use crate::error::ProcessError;
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::{lines::LineRef, span::Span};

use super::classify::ParserState;
use super::kinds::{
    BlockQuoteStart, CodeFenceStart, Document, HeadingStart, HtmlBlockStart, IndentedCodeStart, ListStart,
    Paragraph, ThematicBreakStart,
};
use super::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use super::types::{BlockTag, RawKind, RawNode};

/// Built-in block starts, in precedence order.
pub fn core_factories() -> Vec<Arc<dyn BlockParserFactory>> {
    vec![
        Arc::new(BlockQuoteStart),
        Arc::new(HeadingStart),
        Arc::new(CodeFenceStart),
        Arc::new(HtmlBlockStart),
        Arc::new(ThematicBreakStart),
        Arc::new(ListStart),
        Arc::new(IndentedCodeStart),
    ]
}

struct OpenBlock {
    parser: Box<dyn BlockParser>,
    start: usize,
    end: usize,
}

/// Line-at-a-time block construction over a stack of open blocks.
///
/// For each line: open blocks are asked to continue, outermost first; then,
/// if the deepest matched block can hold new blocks, factories are tried
/// (extension factories before built-ins); what remains of the line goes to
/// the deepest block, or continues a paragraph lazily, or starts a new one.
pub struct BlockBuilder {
    factories: Vec<Arc<dyn BlockParserFactory>>,
    state: ParserState,
    stack: Vec<OpenBlock>,
    root: Vec<RawNode>,
    definitions: ReferenceDefinitions,
    line_span: Span,
}

/// Output of the block phase.
#[derive(Debug)]
pub struct BlockTree {
    pub document: RawNode,
    pub definitions: ReferenceDefinitions,
}

impl BlockBuilder {
    pub fn new(extension_factories: impl IntoIterator<Item = Arc<dyn BlockParserFactory>>) -> Self {
        let mut factories: Vec<_> = extension_factories.into_iter().collect();
        factories.extend(core_factories());
        Self {
            factories,
            state: ParserState::new(),
            stack: vec![OpenBlock {
                parser: Box::new(Document::default()),
                start: 0,
                end: 0,
            }],
            root: Vec::new(),
            definitions: ReferenceDefinitions::new(),
            line_span: Span::default(),
        }
    }

    pub fn push(&mut self, line: LineRef) {
        self.line_span = line.span;
        self.state.reset(line.text);
        if let Some(document) = self.stack.first_mut() {
            document.end = line.span.end;
        }

        let mut matches = 1;
        for i in 1..self.stack.len() {
            self.state.find_next_non_space();
            self.sync_active();
            match self.stack[i].parser.try_continue(&self.state) {
                None => break,
                Some(BlockContinue::Finished) => {
                    self.stack[i].end = self.line_span.end;
                    self.close_blocks(self.stack.len() - i);
                    return;
                }
                Some(BlockContinue::AtIndex(index)) => self.state.set_new_index(index),
                Some(BlockContinue::AtColumn(column)) => self.state.set_new_column(column),
            }
            self.stack[i].end = self.line_span.end;
            matches += 1;
        }

        let unmatched = self.stack.len() - matches;
        let mut all_closed = unmatched == 0;
        let mut current = matches - 1;
        let mut try_starts = {
            let parser = &self.stack[current].parser;
            parser.tag() == BlockTag::Paragraph || parser.is_container()
        };

        while try_starts {
            self.state.find_next_non_space();
            let starts_with_letter = self.state.rest().chars().next().is_some_and(char::is_alphabetic);
            if self.state.is_blank() || (!self.state.is_code_indent() && starts_with_letter) {
                self.state.set_new_index(self.state.next_non_space_index());
                break;
            }
            self.sync_active();
            let Some(start) = self.find_block_start(current) else {
                self.state.set_new_index(self.state.next_non_space_index());
                break;
            };
            if !all_closed {
                self.close_blocks(unmatched);
                all_closed = true;
            }
            if let Some(index) = start.new_index {
                self.state.set_new_index(index);
            } else if let Some(column) = start.new_column {
                self.state.set_new_column(column);
            }
            let replaced_start = if start.replace_active {
                self.replace_active_block()
            } else {
                None
            };
            try_starts = false;
            for parser in start.parsers {
                try_starts = parser.is_container();
                self.add_child(parser, replaced_start);
            }
            current = self.stack.len() - 1;
        }

        let lazy = !all_closed
            && !self.state.is_blank()
            && self
                .stack
                .last()
                .is_some_and(|b| b.parser.can_have_lazy_continuation_lines());
        if lazy {
            self.add_line();
            return;
        }
        if !all_closed {
            self.close_blocks(unmatched);
        }
        let top_is_container = self.stack.last().is_some_and(|b| b.parser.is_container());
        if !top_is_container {
            self.add_line();
        } else if !self.state.is_blank() {
            self.add_child(Box::new(Paragraph::default()), None);
            self.add_line();
        }
    }

    /// Closes every open block and returns the document.
    pub fn finish(mut self) -> Result<BlockTree, ProcessError> {
        self.close_blocks(self.stack.len());
        let mut roots = std::mem::take(&mut self.root);
        match roots.pop() {
            Some(document) if roots.is_empty() && matches!(document.kind, RawKind::Document) => Ok(BlockTree {
                document,
                definitions: self.definitions,
            }),
            _ => Err(ProcessError::NotADocument),
        }
    }

    fn sync_active(&mut self) {
        let tag = self.stack.last().map_or(BlockTag::Document, |b| b.parser.tag());
        self.state.set_active(tag);
    }

    fn find_block_start(&self, matched: usize) -> Option<BlockStart> {
        let matched = MatchedBlock {
            parser: self.stack[matched].parser.as_ref(),
        };
        self.factories
            .iter()
            .find_map(|factory| factory.try_start(&self.state, &matched))
    }

    fn add_line(&mut self) {
        let content = self.state.content();
        if let Some(top) = self.stack.last_mut() {
            top.parser.add_line(&content);
            top.end = self.line_span.end;
        }
    }

    fn add_child(&mut self, parser: Box<dyn BlockParser>, start: Option<usize>) {
        let tag = parser.tag();
        loop {
            let Some(top) = self.stack.last_mut() else {
                break;
            };
            if top.parser.can_contain(&tag) || self.stack.len() == 1 {
                break;
            }
            self.close_blocks(1);
        }
        self.stack.push(OpenBlock {
            parser,
            start: start.unwrap_or(self.line_span.start),
            end: self.line_span.end,
        });
    }

    /// Closes the active paragraph for a block that takes over its lines,
    /// keeping any reference definitions it held. Returns where it started.
    fn replace_active_block(&mut self) -> Option<usize> {
        let block = self.stack.pop()?;
        let span = Span::new(block.start, block.end);
        let nodes = block.parser.finalize(span, &mut self.definitions);
        if let Some(parent) = self.stack.last_mut() {
            for node in nodes {
                if !matches!(node.kind, RawKind::Paragraph(_)) {
                    parent.parser.add_child(node);
                }
            }
        }
        Some(span.start)
    }

    fn close_blocks(&mut self, count: usize) {
        for _ in 0..count {
            let Some(block) = self.stack.pop() else {
                return;
            };
            let span = Span::new(block.start, block.end);
            let nodes = block.parser.finalize(span, &mut self.definitions);
            match self.stack.last_mut() {
                Some(parent) => {
                    parent.end = parent.end.max(span.end);
                    for node in nodes {
                        parent.parser.add_child(node);
                    }
                }
                None => self.root.extend(nodes),
            }
        }
    }
}
