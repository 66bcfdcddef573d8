use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, InlineRun, RawKind, RawNode};
use crate::parsing::chars::{skip_byte, skip_space_tab};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

/// An ATX (`## Title`) or setext (`Title\n===`) heading. Always one block line.
#[derive(Debug)]
pub struct Heading {
    level: u8,
    content: String,
}

impl Heading {
    pub const ATX_MARKER: u8 = b'#';
    pub const MAX_LEVEL: u8 = 6;

    pub fn new(level: u8, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    /// Parses an ATX heading from text starting at the first `#`.
    pub fn atx(rest: &str) -> Option<(u8, &str)> {
        let hashes = skip_byte(rest, Self::ATX_MARKER, 0);
        if hashes == 0 || hashes > usize::from(Self::MAX_LEVEL) {
            return None;
        }
        let level = hashes as u8;
        let after = &rest[hashes..];
        if after.is_empty() {
            return Some((level, ""));
        }
        if !after.starts_with([' ', '\t']) {
            return None;
        }
        let content = after.trim_matches([' ', '\t']);
        let without_closing = content.trim_end_matches('#');
        let content = if without_closing.is_empty() {
            ""
        } else if without_closing.ends_with([' ', '\t']) {
            without_closing.trim_end_matches([' ', '\t'])
        } else {
            content
        };
        Some((level, content))
    }

    /// Level of a setext underline (`=` is 1, `-` is 2).
    pub fn setext_level(rest: &str) -> Option<u8> {
        let level = match rest.as_bytes().first()? {
            b'=' => 1,
            b'-' => 2,
            _ => return None,
        };
        let marker = rest.as_bytes()[0];
        let end = skip_byte(rest, marker, 0);
        (skip_space_tab(rest, end) == rest.len()).then_some(level)
    }
}

impl BlockParser for Heading {
    fn tag(&self) -> BlockTag {
        BlockTag::Heading
    }

    fn try_continue(&mut self, _state: &ParserState) -> Option<BlockContinue> {
        None
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let kind = RawKind::Heading {
            level: self.level,
            content: InlineRun::new(self.content.trim()),
        };
        vec![RawNode::new(kind, span)]
    }
}

#[derive(Debug)]
pub struct HeadingStart;

impl BlockParserFactory for HeadingStart {
    fn try_start(&self, state: &ParserState, matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        if state.is_code_indent() {
            return None;
        }
        let line_end = state.line().len();
        let rest = state.rest();
        if let Some((level, content)) = Heading::atx(rest) {
            return Some(BlockStart::of(Box::new(Heading::new(level, content))).at_index(line_end));
        }
        let level = Heading::setext_level(rest)?;
        if matched.tag() != BlockTag::Paragraph {
            return None;
        }
        let content = matched.paragraph_content()?;
        Some(
            BlockStart::of(Box::new(Heading::new(level, content)))
                .at_index(line_end)
                .replace_active_block(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# foo", Some((1, "foo")))]
    #[case("###### six", Some((6, "six")))]
    #[case("####### seven", None)]
    #[case("#5 bolt", None)]
    #[case("#", Some((1, "")))]
    #[case("## foo ##  ", Some((2, "foo")))]
    #[case("# foo#", Some((1, "foo#")))]
    #[case("### ###", Some((3, "")))]
    #[case(r"# foo \#", Some((1, r"foo \#")))]
    fn atx(#[case] input: &str, #[case] expected: Option<(u8, &str)>) {
        assert_eq!(Heading::atx(input), expected);
    }

    #[rstest]
    #[case("===", Some(1))]
    #[case("--- ", Some(2))]
    #[case("= =", None)]
    #[case("-a", None)]
    fn setext(#[case] input: &str, #[case] expected: Option<u8>) {
        assert_eq!(Heading::setext_level(input), expected);
    }
}
