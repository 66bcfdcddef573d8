use std::sync::OnceLock;

use markdown_canon_engine::parsing::blocks::kinds::BlockQuote;
use markdown_canon_engine::parsing::blocks::{
    BlockContinue, BlockParser, BlockParserFactory, BlockStart, BlockTag, CustomNode, MatchedBlock, ParserState,
    RawKind, RawNode,
};
use markdown_canon_engine::parsing::references::ReferenceDefinitions;
use markdown_canon_engine::parsing::rope::Span;
use regex::Regex;

use crate::GFM_ALERTS;
use crate::alert::{Alert, AlertKind};

static ALERT_START: OnceLock<Regex> = OnceLock::new();

fn alert_start() -> &'static Regex {
    ALERT_START.get_or_init(|| {
        Regex::new(r"(?i)^>\s+\[!(NOTE|TIP|IMPORTANT|WARNING|CAUTION)\]\s*$").expect("alert start regex is valid")
    })
}

/// Opens an alert on a `> [!KIND]` line.
#[derive(Debug)]
pub struct AlertStart;

impl BlockParserFactory for AlertStart {
    fn try_start(&self, state: &ParserState, _matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        if state.is_code_indent() {
            return None;
        }
        let captures = alert_start().captures(state.rest())?;
        let kind = AlertKind::from_name(&captures[1])?;
        log::trace!("Opening {kind} alert");
        Some(BlockStart::of(Box::new(AlertParser::new(kind))).at_index(state.line().len()))
    }
}

/// Open alert. Continues like a block quote and holds any block but another alert.
#[derive(Debug)]
pub struct AlertParser {
    kind: AlertKind,
    children: Vec<RawNode>,
}

impl AlertParser {
    pub fn new(kind: AlertKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }
}

impl BlockParser for AlertParser {
    fn tag(&self) -> BlockTag {
        BlockTag::Custom(GFM_ALERTS)
    }

    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&mut self, child: &BlockTag) -> bool {
        *child != BlockTag::Custom(GFM_ALERTS)
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        BlockQuote::has_marker(state).then(|| BlockContinue::AtColumn(BlockQuote::content_column(state)))
    }

    fn add_child(&mut self, child: RawNode) {
        self.children.push(child);
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let node = CustomNode::new(GFM_ALERTS, Alert { kind: self.kind });
        vec![RawNode::with_children(RawKind::Custom(node), span, self.children)]
    }
}
