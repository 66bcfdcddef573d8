use std::ops::Range;

use crate::models::InlineNode;
use crate::parsing::scan::decode_entity_at;

impl InlineNode {
    /// Serializes the node as Markdown that parses back to the same node.
    ///
    /// Characters that would otherwise take a formatting role are escaped,
    /// titles are double-quoted and code spans use the shortest fence that
    /// does not collide with their content.
    pub fn to_markdown(&self) -> String {
        let mut writer = InlineWriter {
            out: String::new(),
            at_line_start: true,
        };
        writer.node(self, true);
        writer.out
    }
}

struct InlineWriter {
    out: String,
    at_line_start: bool,
}

impl InlineWriter {
    /// `at_line_end` is set when nothing but a line break or the end of the
    /// leaf follows `node`.
    fn node(&mut self, node: &InlineNode, at_line_end: bool) {
        match node {
            InlineNode::Text(text) => self.text(text, at_line_end),
            InlineNode::ItemsList(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_at_line_end = match items.get(i + 1) {
                        Some(InlineNode::SoftLineBreak | InlineNode::HardLineBreak) => true,
                        Some(_) => false,
                        None => at_line_end,
                    };
                    self.node(item, item_at_line_end);
                }
            }
            InlineNode::Emphasis { delimiter, content } => {
                let delimiter = delimiter.to_string();
                self.markup(&delimiter);
                self.node(content, false);
                self.markup(&delimiter);
            }
            InlineNode::StrongEmphasis { delimiter, content } => {
                let delimiter = delimiter.to_string().repeat(2);
                self.markup(&delimiter);
                self.node(content, false);
                self.markup(&delimiter);
            }
            InlineNode::Code(code) => self.markup(&code_span(code)),
            InlineNode::Link {
                destination,
                title,
                content,
            } => {
                self.markup("[");
                self.node(content, false);
                self.markup(&format!("]{}", link_target(destination, title.as_deref())));
            }
            InlineNode::Image {
                destination,
                title,
                alt,
            } => {
                self.markup("![");
                self.text(alt, false);
                self.markup(&format!("]{}", link_target(destination, title.as_deref())));
            }
            InlineNode::HtmlInline(html) => self.markup(html),
            InlineNode::SoftLineBreak => {
                self.out.push('\n');
                self.at_line_start = true;
            }
            InlineNode::HardLineBreak => {
                self.out.push_str("\\\n");
                self.at_line_start = true;
            }
        }
    }

    fn markup(&mut self, markup: &str) {
        self.out.push_str(markup);
        self.at_line_start = false;
    }

    fn text(&mut self, text: &str, at_line_end: bool) {
        let mut rest = text;
        if self.at_line_start {
            let trimmed = rest.trim_start_matches([' ', '\t']);
            self.whitespace_entities(&rest[..rest.len() - trimmed.len()]);
            rest = trimmed;
        }
        // Spaces before a line break or the end of a leaf are stripped by the parser.
        let trailing = if at_line_end {
            let body = rest.trim_end_matches([' ', '\t']);
            let trailing = &rest[body.len()..];
            rest = body;
            trailing
        } else {
            ""
        };
        if self.at_line_start
            && let Some(at) = line_start_trigger(rest)
        {
            escape_text_into(&mut self.out, &rest[..at]);
            self.out.push('\\');
            self.out.push_str(&rest[at..=at]);
            rest = &rest[at + 1..];
        }
        escape_text_into(&mut self.out, rest);
        self.whitespace_entities(trailing);
        if !text.is_empty() {
            self.at_line_start = false;
        }
    }

    fn whitespace_entities(&mut self, whitespace: &str) {
        for c in whitespace.chars() {
            self.out.push_str(if c == '\t' { "&#9;" } else { "&#32;" });
        }
    }
}

/// Byte index of the character that would start a block if `text` began a line.
fn line_start_trigger(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let ends_marker = |at: usize| matches!(bytes.get(at), None | Some(b' ' | b'\t'));
    match bytes.first()? {
        b'#' => {
            let level = bytes.iter().take_while(|b| **b == b'#').count();
            (level <= 6 && ends_marker(level)).then_some(0)
        }
        b'-' => (ends_marker(1) || bytes.get(1) == Some(&b'-')).then_some(0),
        b'+' => ends_marker(1).then_some(0),
        b'=' => Some(0),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            (digits <= 9 && matches!(bytes.get(digits), Some(b'.' | b')')) && ends_marker(digits + 1))
                .then_some(digits)
        }
        _ => None,
    }
}

fn escape_text_into(out: &mut String, text: &str) {
    let kept = paired_tilde_runs(text);
    for (i, c) in text.char_indices() {
        match c {
            '~' if kept.iter().any(|run| run.contains(&i)) => out.push('~'),
            '~' | '\\' | '*' | '_' | '`' | '<' | '>' | '[' | ']' | '(' | ')' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '&' if decode_entity_at(text, i).is_some() => out.push_str("\\&"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
}

/// Runs of exactly two tildes, taken in pairs. Unpaired runs are not kept.
fn paired_tilde_runs(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut kept = Vec::new();
    let mut pending: Option<usize> = None;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'~' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b'~' {
            i += 1;
        }
        if i - start == 2 {
            match pending.take() {
                Some(open) => {
                    kept.push(open..open + 2);
                    kept.push(start..i);
                }
                None => pending = Some(start),
            }
        }
    }
    kept
}

fn code_span(code: &str) -> String {
    let mut runs = Vec::new();
    let mut chars = code.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '`' {
            let mut len = 1;
            while chars.next_if_eq(&'`').is_some() {
                len += 1;
            }
            runs.push(len);
        }
    }
    let mut fence_len = 1;
    while runs.contains(&fence_len) {
        fence_len += 1;
    }
    let fence = "`".repeat(fence_len);
    let padded = code.starts_with('`')
        || code.ends_with('`')
        || (code.starts_with(' ') && code.ends_with(' ') && !code.trim_matches(' ').is_empty());
    if padded {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

fn link_target(destination: &str, title: Option<&str>) -> String {
    let bare = !destination.is_empty()
        && !destination
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '(' | ')'));
    let mut out = String::from("(");
    if bare {
        escape_quoted_into(&mut out, destination, &[]);
    } else {
        out.push('<');
        escape_quoted_into(&mut out, destination, &['<', '>']);
        out.push('>');
    }
    if let Some(title) = title {
        out.push_str(" \"");
        escape_quoted_into(&mut out, title, &['"']);
        out.push('"');
    }
    out.push(')');
    out
}

/// Escapes backslashes, entity-like `&` and the given delimiters.
fn escape_quoted_into(out: &mut String, text: &str, delimiters: &[char]) {
    for (i, c) in text.char_indices() {
        match c {
            '\\' => out.push_str("\\\\"),
            '&' if decode_entity_at(text, i).is_some() => out.push_str("\\&"),
            c if delimiters.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}
