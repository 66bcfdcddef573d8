use serde::Serialize;

/// Normalized inline content of a paragraph or heading.
///
/// Produced by the inline normalizer: entities are decoded, references are
/// resolved to direct links, and nodes with no visual representation are gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InlineNode {
    Text(String),
    /// A sequence of siblings. An empty list means no content.
    ItemsList(Vec<InlineNode>),
    Emphasis {
        /// `*` or `_`.
        delimiter: char,
        content: Box<InlineNode>,
    },
    StrongEmphasis {
        delimiter: char,
        content: Box<InlineNode>,
    },
    Code(String),
    Link {
        destination: String,
        title: Option<String>,
        content: Box<InlineNode>,
    },
    Image {
        destination: String,
        title: Option<String>,
        /// Plain-text description.
        alt: String,
    },
    HtmlInline(String),
    SoftLineBreak,
    HardLineBreak,
}

impl InlineNode {
    /// Wraps a list of siblings: one node stands alone, several become an `ItemsList`.
    pub fn from_nodes(mut nodes: Vec<InlineNode>) -> Self {
        if nodes.len() == 1 {
            nodes.remove(0)
        } else {
            InlineNode::ItemsList(nodes)
        }
    }

    pub fn empty() -> Self {
        InlineNode::ItemsList(Vec::new())
    }

    /// True when the node renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            InlineNode::Text(text) => text.is_empty(),
            InlineNode::ItemsList(items) => items.iter().all(InlineNode::is_empty),
            InlineNode::Emphasis { content, .. } | InlineNode::StrongEmphasis { content, .. } => content.is_empty(),
            InlineNode::Code(code) => code.is_empty(),
            InlineNode::Link { .. } | InlineNode::Image { .. } => false,
            InlineNode::HtmlInline(html) => html.is_empty(),
            InlineNode::SoftLineBreak | InlineNode::HardLineBreak => false,
        }
    }

    /// The siblings this node stands for.
    pub fn items(&self) -> &[InlineNode] {
        match self {
            InlineNode::ItemsList(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Text content without markup. Line breaks become `\n`, images their alt text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self {
            InlineNode::Text(text) | InlineNode::Code(text) => out.push_str(text),
            InlineNode::ItemsList(items) => items.iter().for_each(|item| item.write_plain_text(out)),
            InlineNode::Emphasis { content, .. }
            | InlineNode::StrongEmphasis { content, .. }
            | InlineNode::Link { content, .. } => content.write_plain_text(out),
            InlineNode::Image { alt, .. } => out.push_str(alt),
            InlineNode::HtmlInline(_) => {}
            InlineNode::SoftLineBreak | InlineNode::HardLineBreak => out.push('\n'),
        }
    }
}
