/// Line prefix of an open container: `first` on its first line, `rest` after.
#[derive(Debug)]
struct Prefix {
    first: String,
    rest: String,
    used: bool,
}

/// Output buffer that knows about container prefixes and block separation.
///
/// Blocks are separated by a blank line, or by a single line break inside a
/// tight list.
#[derive(Debug)]
pub(crate) struct BlockWriter {
    out: String,
    prefixes: Vec<Prefix>,
    saved: Vec<(bool, bool)>,
    at_line_start: bool,
    needs_separator: bool,
    suppressed: bool,
    tight: bool,
}

impl BlockWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            prefixes: Vec::new(),
            saved: Vec::new(),
            at_line_start: true,
            needs_separator: false,
            suppressed: false,
            tight: false,
        }
    }

    pub(crate) fn begin_block(&mut self) {
        if self.needs_separator {
            self.newline();
            if !self.tight {
                self.newline();
            }
        }
        self.needs_separator = false;
    }

    pub(crate) fn end_block(&mut self) {
        self.needs_separator = !std::mem::take(&mut self.suppressed);
    }

    /// The next block continues on the current line.
    pub(crate) fn suppress_separator(&mut self) {
        self.suppressed = true;
        self.needs_separator = false;
    }

    /// Opens a container scope with its own separators.
    pub(crate) fn enter(&mut self, first: &str, rest: &str, tight: bool) {
        self.saved.push((self.needs_separator, self.tight));
        self.prefixes.push(Prefix {
            first: first.to_string(),
            rest: rest.to_string(),
            used: false,
        });
        self.needs_separator = false;
        self.tight = tight;
    }

    pub(crate) fn exit(&mut self) {
        if let Some(prefix) = self.prefixes.last()
            && !prefix.used
            && !prefix.first.is_empty()
        {
            // An empty container still shows its marker.
            self.start_line();
            let len = self.out.trim_end_matches(' ').len();
            self.out.truncate(len);
        }
        self.prefixes.pop();
        if let Some((needs_separator, tight)) = self.saved.pop() {
            self.needs_separator = needs_separator;
            self.tight = tight;
        }
        self.suppressed = false;
    }

    pub(crate) fn tight(&self) -> bool {
        self.tight
    }

    /// Writes `text`, prefixing every line it starts.
    pub(crate) fn write(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            if !line.is_empty() {
                self.start_line();
                self.out.push_str(line);
            }
        }
    }

    pub(crate) fn newline(&mut self) {
        if self.at_line_start {
            let blank: String = self.prefixes.iter().map(|p| p.rest.as_str()).collect();
            self.out.push_str(blank.trim_end());
        }
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn start_line(&mut self) {
        if !self.at_line_start {
            return;
        }
        for prefix in &mut self.prefixes {
            let text = if prefix.used { &prefix.rest } else { &prefix.first };
            self.out.push_str(text);
            prefix.used = true;
        }
        self.at_line_start = false;
    }

    pub(crate) fn finish(mut self) -> String {
        if !self.at_line_start {
            self.out.push('\n');
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blocks_are_separated_by_blank_line() {
        let mut writer = BlockWriter::new();
        for text in ["a", "b"] {
            writer.begin_block();
            writer.write(text);
            writer.end_block();
        }
        assert_eq!(writer.finish(), "a\n\nb\n");
    }

    #[test]
    fn prefixes_apply_to_every_line() {
        let mut writer = BlockWriter::new();
        writer.begin_block();
        writer.enter("> ", "> ", false);
        for text in ["a\nb", "c"] {
            writer.begin_block();
            writer.write(text);
            writer.end_block();
        }
        writer.exit();
        writer.end_block();
        assert_eq!(writer.finish(), "> a\n> b\n>\n> c\n");
    }

    #[test]
    fn empty_container_keeps_marker() {
        let mut writer = BlockWriter::new();
        writer.begin_block();
        writer.enter("- ", "  ", true);
        writer.exit();
        writer.end_block();
        assert_eq!(writer.finish(), "-\n");
    }

    #[test]
    fn suppressed_separator_joins_lines() {
        let mut writer = BlockWriter::new();
        writer.begin_block();
        writer.write("[x] ");
        writer.suppress_separator();
        writer.end_block();
        writer.begin_block();
        writer.write("done");
        writer.end_block();
        assert_eq!(writer.finish(), "[x] done\n");
    }
}
