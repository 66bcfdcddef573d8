/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds the closing run of exactly `run` backticks at or after `from`.
    /// Returns the index where the closing run starts.
    pub fn find_closer(s: &str, from: usize, run: usize) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            if bytes[i] != Self::TICK {
                i += 1;
                continue;
            }
            let start = i;
            while i < bytes.len() && bytes[i] == Self::TICK {
                i += 1;
            }
            if i - start == run {
                return Some(start);
            }
        }
        None
    }

    /// Line endings become spaces; one space is stripped from each side when
    /// both sides have one and the content is not all spaces.
    pub fn normalize(content: &str) -> String {
        let content = content.replace('\n', " ");
        let strip = content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.bytes().all(|b| b == b' ');
        if strip {
            content[1..content.len() - 1].to_string()
        } else {
            content
        }
    }
}
