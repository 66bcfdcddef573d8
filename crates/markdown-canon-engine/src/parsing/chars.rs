//! Character classes shared by the block and inline grammars.

/// Tab stops are every four columns.
pub const TAB_STOP: usize = 4;

/// Indentation at which a line becomes indented code.
pub const CODE_BLOCK_INDENT: usize = 4;

pub fn columns_to_next_tab_stop(column: usize) -> usize {
    TAB_STOP - (column % TAB_STOP)
}

pub fn is_space_or_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// ASCII punctuation, the set of characters a backslash may escape.
pub fn is_escapable(b: u8) -> bool {
    b.is_ascii_punctuation()
}

/// Unicode punctuation as used by the emphasis flanking rules.
///
/// Without a general category table this treats every non-ASCII character
/// that is neither alphanumeric nor whitespace as punctuation, which covers
/// the `P` and `S` categories closely enough for delimiter classification.
pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_punctuation()
    } else {
        !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
    }
}

pub fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r'))
}

/// Index of the first byte at or after `from` that is not `b`.
pub fn skip_byte(s: &str, b: u8, from: usize) -> usize {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i] == b {
        i += 1;
    }
    i
}

/// Index of the first byte at or after `from` that is not a space or tab.
pub fn skip_space_tab(s: &str, from: usize) -> usize {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() && is_space_or_tab(bytes[i]) {
        i += 1;
    }
    i
}
