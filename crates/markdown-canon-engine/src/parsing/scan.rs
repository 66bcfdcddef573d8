//! Scanners for the link syntax shared by reference definitions and inline
//! links, plus backslash-escape and entity decoding.
//!
//! Every scanner takes the full string and a start index and returns the end
//! index on success, leaving the caller's cursor untouched on failure.

use std::sync::OnceLock;

use regex::Regex;

use super::chars::is_escapable;

/// Labels longer than this are never link labels.
pub const MAX_LABEL_LEN: usize = 999;

/// Nesting limit for unescaped parentheses in a bare destination.
const MAX_DESTINATION_PARENS: usize = 32;

static ENTITY: OnceLock<Regex> = OnceLock::new();

fn entity_regex() -> &'static Regex {
    ENTITY.get_or_init(|| {
        Regex::new(r"^&(?:#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{1,31});")
            .expect("entity regex is valid")
    })
}

/// Decodes the entity reference starting at `start` (which must be `&`).
///
/// Returns the decoded text and the byte length of the reference. Unknown
/// named entities are not references and yield `None`.
pub fn decode_entity_at(s: &str, start: usize) -> Option<(String, usize)> {
    let m = entity_regex().find(&s[start..])?;
    let reference = m.as_str();
    let body = &reference[1..reference.len() - 1];
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        let c = match char::from_u32(code) {
            Some('\0') | None => '\u{FFFD}',
            Some(c) => c,
        };
        return Some((c.to_string(), reference.len()));
    }
    let decoded = html_escape::decode_html_entities(reference);
    if decoded == reference {
        None
    } else {
        Some((decoded.into_owned(), reference.len()))
    }
}

/// Resolves backslash escapes and entity references.
pub fn unescape(s: &str) -> String {
    if !s.contains(['\\', '&']) {
        return s.to_string();
    }
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() && is_escapable(bytes[i + 1]) => {
                out.push(bytes[i + 1] as char);
                i += 2;
            }
            b'&' => match decode_entity_at(s, i) {
                Some((text, len)) => {
                    out.push_str(&text);
                    i += len;
                }
                None => {
                    out.push('&');
                    i += 1;
                }
            },
            _ => {
                let next = s[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&s[i..i + next]);
                i += next;
            }
        }
    }
    out
}

/// Scans a `[label]` starting at `start`, returning the raw label content and
/// the index after the closing bracket.
pub fn scan_link_label(s: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = s.as_bytes();
    if bytes.get(start) != Some(&b'[') {
        return None;
    }
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 1;
                if i < bytes.len() && is_escapable(bytes[i]) {
                    i += 1;
                }
            }
            b'[' => return None,
            b']' => {
                let content = &s[start + 1..i];
                if content.chars().count() > MAX_LABEL_LEN {
                    return None;
                }
                return Some((content, i + 1));
            }
            _ => i += 1,
        }
    }
    None
}

/// Scans a link destination, either `<...>` or a bare run without spaces and
/// with balanced parentheses. Returns the unescaped destination and the end
/// index. A bare destination must not be empty.
pub fn scan_link_destination(s: &str, start: usize) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    if bytes.get(start) == Some(&b'<') {
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'>' => return Some((unescape(&s[start + 1..i]), i + 1)),
                b'\\' if i + 1 < bytes.len() && is_escapable(bytes[i + 1]) => i += 2,
                b'\n' | b'<' => return None,
                _ => i += 1,
            }
        }
        return None;
    }

    let mut parens = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() && is_escapable(bytes[i + 1]) => {
                i += 2;
                continue;
            }
            b'(' => {
                parens += 1;
                if parens > MAX_DESTINATION_PARENS {
                    return None;
                }
            }
            b')' => {
                if parens == 0 {
                    break;
                }
                parens -= 1;
            }
            b if b <= b' ' || b == 0x7f => break,
            _ => {}
        }
        i += 1;
    }
    if i == start || parens != 0 {
        return None;
    }
    Some((unescape(&s[start..i]), i))
}

/// Scans a link title delimited by `"`, `'` or `(...)`.
pub fn scan_link_title(s: &str, start: usize) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    let open = *bytes.get(start)?;
    let close = match open {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    let mut i = start + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' && i + 1 < bytes.len() && is_escapable(bytes[i + 1]) {
            i += 2;
            continue;
        }
        if b == close {
            return Some((unescape(&s[start + 1..i]), i + 1));
        }
        if open == b'(' && b == b'(' {
            return None;
        }
        i += 1;
    }
    None
}

/// Skips spaces and tabs plus at most one line ending.
pub fn skip_spaces_and_newline(s: &str, start: usize) -> usize {
    let bytes = s.as_bytes();
    let mut i = start;
    let mut seen_newline = false;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' => i += 1,
            b'\n' if !seen_newline => {
                seen_newline = true;
                i += 1;
            }
            _ => break,
        }
    }
    i
}
