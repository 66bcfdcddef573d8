/// A cursor for byte-by-byte inline parsing over a leaf's source text.
///
/// Special characters are all ASCII, so the cursor steps over bytes and only
/// decodes characters where flanking rules need them.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances past every consecutive `b`, returning how many were skipped.
    pub fn bump_while(&mut self, b: u8) -> usize {
        let start = self.i;
        while self.peek() == Some(b) {
            self.i += 1;
        }
        self.i - start
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    /// The character ending just before byte `at`, or `\n` at the start.
    pub fn char_before(&self, at: usize) -> char {
        self.s[..at].chars().next_back().unwrap_or('\n')
    }

    /// The character starting at byte `at`, or `\n` at the end.
    pub fn char_at(&self, at: usize) -> char {
        self.s[at..].chars().next().unwrap_or('\n')
    }
}
