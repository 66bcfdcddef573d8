use std::fmt;

use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

use super::classify::ParserState;
use super::kinds::ListKind;
use super::types::{BlockTag, RawNode};

/// An open block while its lines are being consumed.
///
/// The document parser keeps a stack of these. Each line, every open block
/// is asked whether it continues; new blocks are pushed after closing the
/// ones that cannot contain them.
pub trait BlockParser: Send {
    fn tag(&self) -> BlockTag;

    fn is_container(&self) -> bool {
        false
    }

    fn can_have_lazy_continuation_lines(&self) -> bool {
        false
    }

    /// Asked before a child with `child` tag is pushed. May record state,
    /// which is how list items notice blank lines between their children.
    fn can_contain(&mut self, _child: &BlockTag) -> bool {
        false
    }

    /// `None` means the block does not continue on this line.
    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue>;

    fn add_line(&mut self, _line: &str) {}

    fn add_child(&mut self, _child: RawNode) {}

    /// Marker kind of an open list, so a new item can join it.
    fn list_kind(&self) -> Option<ListKind> {
        None
    }

    /// Paragraph text without leading reference definitions, used by
    /// setext headings and for list-interruption rules.
    fn paragraph_content(&self) -> Option<String> {
        None
    }

    /// Closes the block, returning the raw nodes it produces (usually one).
    fn finalize(self: Box<Self>, span: Span, definitions: &mut ReferenceDefinitions) -> Vec<RawNode>;
}

/// Recognizes the start of a block on the current line.
///
/// Extensions register factories; the engine tries extension factories first,
/// in registration order, then the built-in ones. The first factory that
/// returns a [`BlockStart`] wins the line.
pub trait BlockParserFactory: Send + Sync + fmt::Debug {
    fn try_start(&self, state: &ParserState, matched: &MatchedBlock<'_>) -> Option<BlockStart>;
}

/// Read access to the deepest block that continued on this line.
pub struct MatchedBlock<'a> {
    pub(crate) parser: &'a dyn BlockParser,
}

impl MatchedBlock<'_> {
    pub fn tag(&self) -> BlockTag {
        self.parser.tag()
    }

    pub fn paragraph_content(&self) -> Option<String> {
        self.parser.paragraph_content()
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        self.parser.list_kind()
    }
}

/// Result of a successful factory match.
pub struct BlockStart {
    pub(crate) parsers: Vec<Box<dyn BlockParser>>,
    pub(crate) new_index: Option<usize>,
    pub(crate) new_column: Option<usize>,
    pub(crate) replace_active: bool,
}

impl BlockStart {
    pub fn of(parser: Box<dyn BlockParser>) -> Self {
        Self::of_many(vec![parser])
    }

    /// Opens several nested blocks at once, outermost first.
    pub fn of_many(parsers: Vec<Box<dyn BlockParser>>) -> Self {
        Self {
            parsers,
            new_index: None,
            new_column: None,
            replace_active: false,
        }
    }

    /// Resume parsing at byte `index` of the line.
    pub fn at_index(mut self, index: usize) -> Self {
        self.new_index = Some(index);
        self
    }

    /// Resume parsing at `column`, splitting a tab if needed.
    pub fn at_column(mut self, column: usize) -> Self {
        self.new_column = Some(column);
        self
    }

    /// The new block takes over the active paragraph (setext headings).
    pub fn replace_active_block(mut self) -> Self {
        self.replace_active = true;
        self
    }
}

/// How an open block continues on the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContinue {
    AtIndex(usize),
    AtColumn(usize),
    /// The block consumed this line and is complete (closing fences).
    Finished,
}
