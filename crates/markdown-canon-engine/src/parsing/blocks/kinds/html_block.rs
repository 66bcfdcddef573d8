use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
use crate::parsing::blocks::types::{BlockTag, RawKind, RawNode};
use crate::parsing::html::{close_tag, open_tag};
use crate::parsing::references::ReferenceDefinitions;
use crate::parsing::rope::span::Span;

const BLOCK_TAGS: &str = "address|article|aside|base|basefont|blockquote|body|caption|center|col|colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption|figure|footer|form|frame|frameset|h1|h2|h3|h4|h5|h6|head|header|hr|html|iframe|legend|li|link|main|menu|menuitem|nav|noframes|ol|optgroup|option|p|param|search|section|summary|table|tbody|td|tfoot|th|thead|title|tr|track|ul";

/// The seven HTML block start conditions, in precedence order.
///
/// Each has an opener matched against the line from its first non-space
/// character and, for the first five, a closer that ends the block on the
/// line where it appears. The last two end at a blank line.
struct HtmlKind {
    opener: Regex,
    closer: Option<Regex>,
    interrupts_paragraph: bool,
}

static KINDS: OnceLock<Vec<HtmlKind>> = OnceLock::new();

fn kinds() -> &'static [HtmlKind] {
    KINDS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("html block regex is valid");
        let kind = |opener: &str, closer: Option<&str>, interrupts_paragraph: bool| HtmlKind {
            opener: re(opener),
            closer: closer.map(re),
            interrupts_paragraph,
        };
        vec![
            kind(
                r"(?i)^<(?:script|pre|style|textarea)(?:\s|>|$)",
                Some(r"(?i)</(?:script|pre|style|textarea)>"),
                true,
            ),
            kind(r"^<!--", Some(r"-->"), true),
            kind(r"^<\?", Some(r"\?>"), true),
            kind(r"^<![A-Za-z]", Some(r">"), true),
            kind(r"^<!\[CDATA\[", Some(r"\]\]>"), true),
            kind(&format!(r"(?i)^</?(?:{BLOCK_TAGS})(?:\s|/?>|$)"), None, true),
            kind(&format!(r"^(?:{}|{})\s*$", open_tag(), close_tag()), None, false),
        ]
    })
}

/// A raw HTML block, kept verbatim.
#[derive(Debug)]
pub struct HtmlBlock {
    closer: Option<&'static Regex>,
    finished: bool,
    lines: Vec<String>,
}

impl HtmlBlock {
    fn new(closer: Option<&'static Regex>) -> Self {
        Self {
            closer,
            finished: false,
            lines: Vec::new(),
        }
    }
}

impl BlockParser for HtmlBlock {
    fn tag(&self) -> BlockTag {
        BlockTag::HtmlBlock
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        if self.finished || (state.is_blank() && self.closer.is_none()) {
            return None;
        }
        Some(BlockContinue::AtIndex(state.index()))
    }

    fn add_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
        if self.closer.is_some_and(|closer| closer.is_match(line)) {
            self.finished = true;
        }
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let literal = self.lines.join("\n");
        vec![RawNode::new(RawKind::HtmlBlock { literal }, span)]
    }
}

#[derive(Debug)]
pub struct HtmlBlockStart;

impl BlockParserFactory for HtmlBlockStart {
    fn try_start(&self, state: &ParserState, matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        let rest = state.rest();
        if state.is_code_indent() || !rest.starts_with('<') {
            return None;
        }
        let in_paragraph =
            matched.tag() == BlockTag::Paragraph || state.active_block() == BlockTag::Paragraph;
        kinds()
            .iter()
            .filter(|kind| kind.interrupts_paragraph || !in_paragraph)
            .find(|kind| kind.opener.is_match(rest))
            .map(|kind| BlockStart::of(Box::new(HtmlBlock::new(kind.closer.as_ref()))).at_index(state.index()))
    }
}
