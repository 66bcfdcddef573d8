use crate::parsing::blocks::classify::ParserState;
use crate::parsing::blocks::open::{BlockContinue, BlockParser};
use crate::parsing::blocks::types::{BlockTag, InlineRun, RawKind, RawNode};
use crate::parsing::chars::is_blank;
use crate::parsing::references::{ReferenceDefinitions, split_definitions};
use crate::parsing::rope::span::Span;

/// A paragraph: the fallback leaf for any non-blank line no other block claims.
///
/// Leading link reference definitions are split off when it closes.
#[derive(Debug, Default)]
pub struct Paragraph {
    lines: Vec<String>,
}

impl Paragraph {
    fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

impl BlockParser for Paragraph {
    fn tag(&self) -> BlockTag {
        BlockTag::Paragraph
    }

    fn can_have_lazy_continuation_lines(&self) -> bool {
        true
    }

    fn try_continue(&mut self, state: &ParserState) -> Option<BlockContinue> {
        (!state.is_blank()).then(|| BlockContinue::AtIndex(state.index()))
    }

    fn add_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn paragraph_content(&self) -> Option<String> {
        let joined = self.joined();
        let (_, rest) = split_definitions(&joined);
        (!is_blank(rest)).then(|| rest.to_string())
    }

    fn finalize(self: Box<Self>, span: Span, definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let joined = self.joined();
        let (found, rest) = split_definitions(&joined);
        let mut nodes = Vec::with_capacity(found.len() + 1);
        for def in found {
            if !definitions.add(&def.label, def.reference.clone()) {
                log::trace!("Ignoring duplicate link reference definition [{}]", def.label);
            }
            nodes.push(RawNode::new(
                RawKind::LinkReferenceDefinition {
                    label: def.label,
                    destination: def.reference.destination,
                    title: def.reference.title,
                },
                span,
            ));
        }
        if !is_blank(rest) {
            let source = rest.trim_end_matches([' ', '\t']);
            nodes.push(RawNode::new(RawKind::Paragraph(InlineRun::new(source)), span));
        }
        nodes
    }
}
