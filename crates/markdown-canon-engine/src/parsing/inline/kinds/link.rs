use crate::parsing::scan::{scan_link_destination, scan_link_title, skip_spaces_and_newline};

/// Brackets that open links and images.
pub struct LinkOpen;

impl LinkOpen {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: u8 = b'!';
}

/// Destination and title of an inline link `(dest "title")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTarget {
    pub destination: String,
    pub title: Option<String>,
    /// Index just after the closing parenthesis.
    pub end: usize,
}

impl InlineTarget {
    /// Parses the parenthesized part of an inline link; `start` is the index
    /// just after `(`.
    pub fn scan(s: &str, start: usize) -> Option<Self> {
        let bytes = s.as_bytes();
        let i = skip_spaces_and_newline(s, start);
        if bytes.get(i) == Some(&b')') {
            return Some(Self {
                destination: String::new(),
                title: None,
                end: i + 1,
            });
        }
        let (destination, after_destination) = scan_link_destination(s, i)?;
        let title_start = skip_spaces_and_newline(s, after_destination);
        let (title, close) = match scan_link_title(s, title_start) {
            Some((title, after_title)) if title_start > after_destination => {
                (Some(title), skip_spaces_and_newline(s, after_title))
            }
            _ => (None, title_start),
        };
        (bytes.get(close) == Some(&b')')).then_some(Self {
            destination,
            title,
            end: close + 1,
        })
    }
}
