use crate::parsing::chars::is_punctuation;

/// A `*` or `_` delimiter run with its open/close capabilities.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';

    /// Returns `(can_open, can_close)` for a run of `delimiter` between the
    /// characters `before` and `after` (`\n` at the edges of the text).
    pub fn flanking(delimiter: u8, before: char, after: char) -> (bool, bool) {
        let before_ws = before.is_whitespace();
        let after_ws = after.is_whitespace();
        let before_punct = is_punctuation(before);
        let after_punct = is_punctuation(after);
        let left = !after_ws && (!after_punct || before_ws || before_punct);
        let right = !before_ws && (!before_punct || after_ws || after_punct);
        if delimiter == Self::UNDERSCORE {
            (left && (!right || before_punct), right && (!left || after_punct))
        } else {
            (left, right)
        }
    }
}
