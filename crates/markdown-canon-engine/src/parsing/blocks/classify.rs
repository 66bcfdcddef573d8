use std::borrow::Cow;

use crate::parsing::chars::{CODE_BLOCK_INDENT, columns_to_next_tab_stop};

use super::types::BlockTag;

/// Position and indentation facts about the line being parsed.
///
/// Block parsers read it to decide whether they continue or start; only the
/// document parser moves the position. Columns expand tabs to stops of four,
/// and a tab that is only partly consumed leaves `column_is_in_tab` set so the
/// remaining columns become spaces in the content handed to the block.
#[derive(Debug)]
pub struct ParserState {
    line: String,
    index: usize,
    column: usize,
    column_is_in_tab: bool,
    next_non_space: usize,
    next_non_space_column: usize,
    indent: usize,
    blank: bool,
    active: BlockTag,
}

impl ParserState {
    pub(crate) fn new() -> Self {
        Self {
            line: String::new(),
            index: 0,
            column: 0,
            column_is_in_tab: false,
            next_non_space: 0,
            next_non_space_column: 0,
            indent: 0,
            blank: true,
            active: BlockTag::Document,
        }
    }

    pub(crate) fn reset(&mut self, line: String) {
        self.line = line;
        self.index = 0;
        self.column = 0;
        self.column_is_in_tab = false;
        self.find_next_non_space();
    }

    /// The full line, without its terminator.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Byte index of the parse position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Column of the parse position, with tabs expanded.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn next_non_space_index(&self) -> usize {
        self.next_non_space
    }

    /// Columns of whitespace between the parse position and the next non-space.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Whether the line is indented enough to be code.
    pub fn is_code_indent(&self) -> bool {
        self.indent >= CODE_BLOCK_INDENT
    }

    /// True when only spaces and tabs remain after the parse position.
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    /// The deepest open block.
    pub fn active_block(&self) -> BlockTag {
        self.active
    }

    /// The line from the next non-space character on.
    pub fn rest(&self) -> &str {
        &self.line[self.next_non_space..]
    }

    pub(crate) fn set_active(&mut self, tag: BlockTag) {
        self.active = tag;
    }

    pub(crate) fn find_next_non_space(&mut self) {
        let bytes = self.line.as_bytes();
        let mut i = self.index;
        let mut cols = self.column;
        self.blank = true;
        while i < bytes.len() {
            match bytes[i] {
                b' ' => {
                    i += 1;
                    cols += 1;
                }
                b'\t' => {
                    i += 1;
                    cols += columns_to_next_tab_stop(cols);
                }
                _ => {
                    self.blank = false;
                    break;
                }
            }
        }
        self.next_non_space = i;
        self.next_non_space_column = cols;
        self.indent = cols - self.column;
    }

    pub(crate) fn set_new_index(&mut self, new_index: usize) {
        if new_index >= self.next_non_space {
            self.index = self.next_non_space;
            self.column = self.next_non_space_column;
        }
        while self.index < new_index && self.index < self.line.len() {
            self.advance();
        }
        self.column_is_in_tab = false;
    }

    pub(crate) fn set_new_column(&mut self, new_column: usize) {
        if new_column >= self.next_non_space_column {
            self.index = self.next_non_space;
            self.column = self.next_non_space_column;
        }
        while self.column < new_column && self.index < self.line.len() {
            self.advance();
        }
        if self.column > new_column {
            // Landed past the target inside a tab: step back onto the tab.
            self.index -= 1;
            self.column = new_column;
            self.column_is_in_tab = true;
        } else {
            self.column_is_in_tab = false;
        }
    }

    fn advance(&mut self) {
        let Some(c) = self.line[self.index..].chars().next() else {
            return;
        };
        self.index += c.len_utf8();
        if c == '\t' {
            self.column += columns_to_next_tab_stop(self.column);
        } else {
            self.column += 1;
        }
    }

    /// Content from the parse position, expanding a partly consumed tab.
    pub(crate) fn content(&self) -> Cow<'_, str> {
        if self.column_is_in_tab {
            let spaces = columns_to_next_tab_stop(self.column);
            let rest = self.line.get(self.index + 1..).unwrap_or("");
            Cow::Owned(format!("{}{}", " ".repeat(spaces), rest))
        } else {
            Cow::Borrowed(&self.line[self.index.min(self.line.len())..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(line: &str) -> ParserState {
        let mut s = ParserState::new();
        s.reset(line.to_string());
        s
    }

    #[test]
    fn measures_indent_with_tabs() {
        let s = state("  \tfoo");
        assert_eq!(s.next_non_space_index(), 3);
        assert_eq!(s.indent(), 4);
        assert!(s.is_code_indent());
        assert!(!s.is_blank());
    }

    #[test]
    fn blank_line() {
        assert!(state(" \t ").is_blank());
        assert!(state("").is_blank());
    }

    #[test]
    fn partial_tab_becomes_spaces() {
        let mut s = state(">\tfoo");
        s.set_new_index(1);
        s.set_new_column(2);
        assert_eq!(s.content(), "  foo");
    }

    #[test]
    fn new_index_skips_to_position() {
        let mut s = state("   # hi");
        s.set_new_index(5);
        assert_eq!(s.index(), 5);
        assert_eq!(s.column(), 5);
        assert_eq!(s.content(), "hi");
    }
}
