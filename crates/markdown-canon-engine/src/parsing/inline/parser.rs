use crate::parsing::blocks::types::RawInline;
use crate::parsing::chars::is_escapable;
use crate::parsing::html::inline_html;
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::scan::{decode_entity_at, scan_link_label};

use super::arena::{Arena, Value};
use super::cursor::Cursor;
use super::delimiters::{Bracket, Delimiter, process_emphasis};
use super::kinds::{Autolink, CodeSpan, Emphasis, InlineTarget, LinkOpen};

/// Parses the inline content of a paragraph or heading.
///
/// `definitions` resolves reference links; unresolved references stay text.
/// Never fails: anything that does not form a construct is literal text.
pub fn parse_inline(source: &str, definitions: &ReferenceDefinitions) -> Vec<RawInline> {
    let mut parser = InlineParser::new(source, definitions);
    parser.run();
    parser.arena.into_inlines(Arena::ROOT)
}

struct InlineParser<'a> {
    cur: Cursor<'a>,
    definitions: &'a ReferenceDefinitions,
    arena: Arena,
    delimiters: Vec<Delimiter>,
    brackets: Vec<Bracket>,
    /// Pending literal text not yet turned into a node.
    text: String,
    /// Literal spaces at the end of `text`, for hard line breaks.
    trailing_spaces: usize,
}

impl<'a> InlineParser<'a> {
    fn new(source: &'a str, definitions: &'a ReferenceDefinitions) -> Self {
        Self {
            cur: Cursor::new(source),
            definitions,
            arena: Arena::new(),
            delimiters: Vec::new(),
            brackets: Vec::new(),
            text: String::new(),
            trailing_spaces: 0,
        }
    }

    fn run(&mut self) {
        while let Some(b) = self.cur.peek() {
            match b {
                b'\n' => self.parse_newline(),
                b'\\' => self.parse_backslash(),
                CodeSpan::TICK => self.parse_code_span(),
                Emphasis::STAR | Emphasis::UNDERSCORE => self.parse_delimiter_run(b),
                LinkOpen::OPEN => self.parse_open_bracket(false),
                LinkOpen::IMAGE if self.cur.peek_at(1) == Some(LinkOpen::OPEN) => self.parse_open_bracket(true),
                LinkOpen::CLOSE => self.parse_close_bracket(),
                Autolink::OPEN => self.parse_angle(),
                b'&' => self.parse_entity(),
                _ => self.parse_text(),
            }
        }
        self.flush_text();
        process_emphasis(&mut self.delimiters, &mut self.arena, 0);
    }

    fn is_special(b: u8) -> bool {
        matches!(b, b'\n' | b'\\' | b'`' | b'*' | b'_' | b'[' | b'!' | b']' | b'<' | b'&')
    }

    fn parse_text(&mut self) {
        let start = self.cur.i;
        self.cur.bump();
        while self.cur.peek().is_some_and(|b| !Self::is_special(b)) {
            self.cur.bump();
        }
        let s = self.cur.s;
        self.push_literal(&s[start..self.cur.i]);
    }

    fn push_literal(&mut self, s: &str) {
        let trailing = s.len() - s.trim_end_matches(' ').len();
        if trailing == s.len() {
            self.trailing_spaces += trailing;
        } else {
            self.trailing_spaces = trailing;
        }
        self.text.push_str(s);
    }

    /// Text produced by an escape or entity; never counts as trailing space.
    fn push_decoded(&mut self, s: &str) {
        self.text.push_str(s);
        self.trailing_spaces = 0;
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.append(Value::Text(text));
        }
        self.trailing_spaces = 0;
    }

    fn append(&mut self, value: Value) -> usize {
        let id = self.arena.alloc(value);
        self.arena.append_child(Arena::ROOT, id);
        id
    }

    fn parse_newline(&mut self) {
        self.cur.bump();
        let hard = self.trailing_spaces >= 2;
        let keep = self.text.len() - self.trailing_spaces;
        self.text.truncate(keep);
        self.flush_text();
        self.append(if hard { Value::HardBreak } else { Value::SoftBreak });
        self.cur.bump_while(b' ');
    }

    fn parse_backslash(&mut self) {
        self.cur.bump();
        match self.cur.peek() {
            Some(b'\n') => {
                self.cur.bump();
                self.flush_text();
                self.append(Value::HardBreak);
                self.cur.bump_while(b' ');
            }
            Some(b) if is_escapable(b) => {
                self.cur.bump();
                self.push_decoded(&char::from(b).to_string());
            }
            _ => self.push_literal("\\"),
        }
    }

    fn parse_code_span(&mut self) {
        let start = self.cur.i;
        let run = self.cur.bump_while(CodeSpan::TICK);
        let after_open = self.cur.i;
        let s = self.cur.s;
        match CodeSpan::find_closer(s, after_open, run) {
            Some(close) => {
                self.flush_text();
                self.append(Value::Code(CodeSpan::normalize(&s[after_open..close])));
                self.cur.i = close + run;
            }
            None => self.push_literal(&s[start..after_open]),
        }
    }

    fn parse_delimiter_run(&mut self, ch: u8) {
        let start = self.cur.i;
        let count = self.cur.bump_while(ch);
        let before = self.cur.char_before(start);
        let after = self.cur.char_at(self.cur.i);
        let (can_open, can_close) = Emphasis::flanking(ch, before, after);
        self.flush_text();
        let run = self.cur.s[start..self.cur.i].to_string();
        let node = self.append(Value::Text(run));
        self.delimiters.push(Delimiter {
            node,
            ch,
            count,
            original: count,
            can_open,
            can_close,
            position: start,
        });
    }

    fn parse_open_bracket(&mut self, image: bool) {
        let position = self.cur.i;
        let width = if image { 2 } else { 1 };
        self.cur.bump_n(width);
        self.flush_text();
        let marker = self.cur.s[position..self.cur.i].to_string();
        let node = self.append(Value::Text(marker));
        if let Some(previous) = self.brackets.last_mut() {
            previous.bracket_after = true;
        }
        self.brackets.push(Bracket {
            node,
            position,
            text_start: self.cur.i,
            image,
            active: true,
            bracket_after: false,
        });
    }

    fn parse_close_bracket(&mut self) {
        let close = self.cur.i;
        self.cur.bump();
        let after_close = self.cur.i;

        let Some(opener) = self.brackets.last().copied() else {
            self.push_literal("]");
            return;
        };
        if !opener.active {
            self.brackets.pop();
            self.push_literal("]");
            return;
        }

        match self.resolve_target(&opener, close, after_close) {
            Some((destination, title, end)) => {
                self.cur.i = end;
                self.flush_text();
                let value = if opener.image {
                    Value::Image { destination, title }
                } else {
                    Value::Link { destination, title }
                };
                let link = self.arena.alloc(value);
                self.arena.adopt_following(opener.node, None, link);
                self.arena.append_child(Arena::ROOT, link);
                process_emphasis(&mut self.delimiters, &mut self.arena, opener.position);
                self.arena.detach(opener.node);
                self.brackets.pop();
                if !opener.image {
                    for bracket in self.brackets.iter_mut().filter(|b| !b.image) {
                        bracket.active = false;
                    }
                }
            }
            None => {
                self.brackets.pop();
                self.push_literal("]");
            }
        }
    }

    /// Finds the destination for a closing bracket: an inline `(...)` part,
    /// else a full, collapsed or shortcut reference.
    fn resolve_target(
        &self,
        opener: &Bracket,
        close: usize,
        after_close: usize,
    ) -> Option<(String, Option<String>, usize)> {
        let s = self.cur.s;
        if s.as_bytes().get(after_close) == Some(&b'(')
            && let Some(target) = InlineTarget::scan(s, after_close + 1)
        {
            return Some((target.destination, target.title, target.end));
        }

        let own_text = (!opener.bracket_after).then(|| &s[opener.text_start..close]);
        let (label, end) = match scan_link_label(s, after_close) {
            Some((label, end)) if !label.is_empty() => (Some(label), end),
            Some((_, end)) => (own_text, end),
            None => (own_text, after_close),
        };
        let reference = self.definitions.get(label?)?;
        Some((reference.destination.clone(), reference.title.clone(), end))
    }

    fn parse_angle(&mut self) {
        let rest = self.cur.rest();
        if let Some((destination, text, len)) = Autolink::scan(rest) {
            self.flush_text();
            let link = self.append(Value::Link {
                destination,
                title: None,
            });
            let text = self.arena.alloc(Value::Text(text));
            self.arena.append_child(link, text);
            self.cur.bump_n(len);
        } else if let Some(m) = inline_html().find(rest) {
            self.flush_text();
            self.append(Value::Html(m.as_str().to_string()));
            self.cur.bump_n(m.end());
        } else {
            self.cur.bump();
            self.push_literal("<");
        }
    }

    fn parse_entity(&mut self) {
        match decode_entity_at(self.cur.s, self.cur.i) {
            Some((text, len)) => {
                self.cur.bump_n(len);
                self.push_decoded(&text);
            }
            None => {
                self.cur.bump();
                self.push_literal("&");
            }
        }
    }
}
