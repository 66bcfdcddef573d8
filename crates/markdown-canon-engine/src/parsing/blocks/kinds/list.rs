use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::chars::{CODE_BLOCK_INDENT, columns_to_next_tab_stop, is_space_or_tab};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

/// Bullet or ordered list marker kind; two items belong to the same list
/// only when these are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet { marker: char },
    Ordered { start: u32, delimiter: char },
}

impl ListKind {
    fn continues(&self, other: &ListKind) -> bool {
        match (self, other) {
            (ListKind::Bullet { marker: a }, ListKind::Bullet { marker: b }) => a == b,
            (ListKind::Ordered { delimiter: a, .. }, ListKind::Ordered { delimiter: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// A list container. It has no markers of its own; its items do.
#[derive(Debug)]
pub struct List {
    kind: ListKind,
    tight: bool,
    had_blank_line: bool,
    lines_after_blank: usize,
    items: Vec<RawNode>,
}

impl List {
    pub const BULLETS: [u8; 3] = [b'-', b'+', b'*'];
    pub const ORDERED_DELIMITERS: [u8; 2] = [b'.', b')'];
    pub const MAX_ORDERED_DIGITS: usize = 9;

    fn new(kind: ListKind) -> Self {
        Self {
            kind,
            tight: true,
            had_blank_line: false,
            lines_after_blank: 0,
            items: Vec::new(),
        }
    }

    /// Parses a list marker at `index`, returning its kind and the index after it.
    pub fn marker(line: &str, index: usize) -> Option<(ListKind, usize)> {
        let bytes = line.as_bytes();
        let &first = bytes.get(index)?;
        if Self::BULLETS.contains(&first) {
            return space_tab_or_end(bytes, index + 1)
                .then_some((ListKind::Bullet { marker: char::from(first) }, index + 1));
        }
        let mut i = index;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let digits = i - index;
        if digits == 0 || digits > Self::MAX_ORDERED_DIGITS {
            return None;
        }
        let &delimiter = bytes.get(i)?;
        if !Self::ORDERED_DELIMITERS.contains(&delimiter) || !space_tab_or_end(bytes, i + 1) {
            return None;
        }
        let start = line[index..i].parse().ok()?;
        Some((
            ListKind::Ordered {
                start,
                delimiter: char::from(delimiter),
            },
            i + 1,
        ))
    }
}

fn space_tab_or_end(bytes: &[u8], index: usize) -> bool {
    bytes.get(index).is_none_or(|&b| is_space_or_tab(b))
}

impl BlockParser for List {
    fn tag(&self) -> BlockTag {
        BlockTag::List
    }

    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&mut self, child: &BlockTag) -> bool {
        if *child != BlockTag::ListItem {
            return false;
        }
        // A blank line directly before a new item makes the list loose.
        if self.had_blank_line && self.lines_after_blank == 1 {
            self.tight = false;
            self.had_blank_line = false;
        }
        true
    }

    fn list_kind(&self) -> Option<ListKind> {
        Some(self.kind)
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        if state.is_blank() {
            self.had_blank_line = true;
            self.lines_after_blank = 0;
        } else if self.had_blank_line {
            self.lines_after_blank += 1;
        }
        Some(BlockContinue::AtIndex(state.index()))
    }

    fn add_child(&mut self, child: RawNode) {
        if matches!(child.kind, RawKind::ListItem { spread: true }) {
            self.tight = false;
        }
        self.items.push(child);
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let kind = match self.kind {
            ListKind::Bullet { marker } => RawKind::BulletList {
                tight: self.tight,
                marker,
            },
            ListKind::Ordered { start, delimiter } => RawKind::OrderedList {
                tight: self.tight,
                start,
                delimiter,
            },
        };
        vec![RawNode::with_children(kind, span, self.items)]
    }
}

/// One list item; its content is indented to `content_indent`.
#[derive(Debug)]
pub struct ListItem {
    content_indent: usize,
    had_blank_line: bool,
    has_child: bool,
    spread: bool,
    children: Vec<RawNode>,
}

impl ListItem {
    fn new(content_indent: usize) -> Self {
        Self {
            content_indent,
            had_blank_line: false,
            has_child: false,
            spread: false,
            children: Vec::new(),
        }
    }
}

impl BlockParser for ListItem {
    fn tag(&self) -> BlockTag {
        BlockTag::ListItem
    }

    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&mut self, _child: &BlockTag) -> bool {
        if self.had_blank_line && self.has_child {
            self.spread = true;
        }
        self.has_child = true;
        true
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        if state.is_blank() {
            // A blank line right after an empty item ends it.
            if !self.has_child {
                return None;
            }
            // Blank lines inside code do not loosen the list.
            self.had_blank_line = matches!(state.active_block(), BlockTag::Paragraph | BlockTag::ListItem);
            return Some(BlockContinue::AtIndex(state.next_non_space_index()));
        }
        if state.indent() >= self.content_indent {
            Some(BlockContinue::AtColumn(state.column() + self.content_indent))
        } else {
            None
        }
    }

    fn add_child(&mut self, child: RawNode) {
        self.children.push(child);
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let kind = RawKind::ListItem { spread: self.spread };
        vec![RawNode::with_children(kind, span, self.children)]
    }
}

#[derive(Debug)]
pub struct ListStart;

impl BlockParserFactory for ListStart {
    fn try_start(&self, state: &ParserState, matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        if state.is_code_indent() {
            return None;
        }
        let line = state.line();
        let marker_index = state.next_non_space_index();
        let marker_column = state.column() + state.indent();
        let (kind, after_marker) = List::marker(line, marker_index)?;

        let column_after_marker = marker_column + (after_marker - marker_index);
        let mut content_column = column_after_marker;
        let mut has_content = false;
        for &b in &line.as_bytes()[after_marker..] {
            match b {
                b'\t' => content_column += columns_to_next_tab_stop(content_column),
                b' ' => content_column += 1,
                _ => {
                    has_content = true;
                    break;
                }
            }
        }

        if matched.tag() == BlockTag::Paragraph && matched.paragraph_content().is_some() {
            // Only non-empty items, and ordered ones starting at 1, interrupt a paragraph.
            if matches!(kind, ListKind::Ordered { start, .. } if start != 1) || !has_content {
                return None;
            }
        }
        if !has_content || content_column - column_after_marker > CODE_BLOCK_INDENT {
            content_column = column_after_marker + 1;
        }

        let item = Box::new(ListItem::new(content_column - state.column()));
        let continues_open_list = matched.list_kind().is_some_and(|open| open.continues(&kind));
        let start = if continues_open_list {
            BlockStart::of(item)
        } else {
            BlockStart::of_many(vec![Box::new(List::new(kind)), item])
        };
        Some(start.at_column(content_column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- a", Some((ListKind::Bullet { marker: '-' }, 1)))]
    #[case("*", Some((ListKind::Bullet { marker: '*' }, 1)))]
    #[case("+\tx", Some((ListKind::Bullet { marker: '+' }, 1)))]
    #[case("-a", None)]
    #[case("1. x", Some((ListKind::Ordered { start: 1, delimiter: '.' }, 2)))]
    #[case("042) x", Some((ListKind::Ordered { start: 42, delimiter: ')' }, 4)))]
    #[case("1234567890. x", None)]
    #[case("1.x", None)]
    #[case("a. x", None)]
    fn markers(#[case] line: &str, #[case] expected: Option<(ListKind, usize)>) {
        assert_eq!(List::marker(line, 0), expected);
    }
}
