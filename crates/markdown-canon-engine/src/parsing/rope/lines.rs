use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes the terminator if present).
    pub span: Span,
    /// The line text with its `\n` / `\r\n` terminator removed.
    ///
    /// NUL characters are replaced with U+FFFD, as CommonMark requires.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so the spans account for the newline bytes, then strips
/// the terminator from the text handed to the block parser.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        let text = line.strip_suffix('\n').unwrap_or(&line);
        let text = text.strip_suffix('\r').unwrap_or(text);
        let text = if text.contains('\0') {
            text.replace('\0', "\u{FFFD}")
        } else {
            text.to_string()
        };
        LineRef {
            span: Span { start, end: offset },
            text,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_terminators_but_keeps_spans() {
        let rope = Rope::from("one\r\ntwo\nthree");
        let lines: Vec<_> = lines_with_spans(&rope).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[0].span, Span::new(0, 5));
        assert_eq!(lines[1].text, "two");
        assert_eq!(lines[1].span, Span::new(5, 9));
        assert_eq!(lines[2].text, "three");
        assert_eq!(lines[2].span, Span::new(9, 14));
    }

    #[test]
    fn empty_rope_has_no_lines() {
        let rope = Rope::from("");
        assert_eq!(lines_with_spans(&rope).count(), 0);
    }

    #[test]
    fn replaces_nul() {
        let rope = Rope::from("a\0b\n");
        let line = lines_with_spans(&rope).next().unwrap();
        assert_eq!(line.text, "a\u{FFFD}b");
    }
}
