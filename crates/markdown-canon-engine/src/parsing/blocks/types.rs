use std::any::Any;
use std::fmt;

use crate::extensions::ExtensionId;
use crate::parsing::rope::span::Span;

/// A node of the raw block tree produced by the grammar engine.
///
/// Children are owned; sibling order is the order of the `children` vector.
#[derive(Debug)]
pub struct RawNode {
    pub kind: RawKind,
    /// Byte span of the source lines this block was built from.
    pub span: Span,
    pub children: Vec<RawNode>,
}

impl RawNode {
    pub fn new(kind: RawKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: RawKind, span: Span, children: Vec<RawNode>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    /// Stable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Visits this node and all descendants, parents before children.
    pub fn walk(&self, f: &mut impl FnMut(&RawNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Mutable counterpart of [`RawNode::walk`].
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut RawNode)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }
}

/// The kind of a raw block together with its kind-specific payload.
#[derive(Debug)]
pub enum RawKind {
    Document,
    BlockQuote,
    BulletList {
        tight: bool,
        /// `-`, `+` or `*`.
        marker: char,
    },
    OrderedList {
        tight: bool,
        start: u32,
        /// `.` or `)`.
        delimiter: char,
    },
    ListItem {
        /// A blank line separates two of the item's direct children.
        spread: bool,
    },
    Paragraph(InlineRun),
    Heading {
        /// 1..=6 from the grammar; other values only appear in hand-built trees.
        level: u8,
        content: InlineRun,
    },
    FencedCodeBlock {
        /// Unescaped info string, trimmed.
        info: String,
        /// Content lines, each terminated by `\n`.
        literal: String,
        fence_char: char,
        fence_length: usize,
    },
    IndentedCodeBlock {
        literal: String,
    },
    ThematicBreak,
    HtmlBlock {
        literal: String,
    },
    LinkReferenceDefinition {
        label: String,
        destination: String,
        title: Option<String>,
    },
    Custom(CustomNode),
}

impl RawKind {
    pub fn name(&self) -> &'static str {
        match self {
            RawKind::Document => "Document",
            RawKind::BlockQuote => "BlockQuote",
            RawKind::BulletList { .. } => "BulletList",
            RawKind::OrderedList { .. } => "OrderedList",
            RawKind::ListItem { .. } => "ListItem",
            RawKind::Paragraph(_) => "Paragraph",
            RawKind::Heading { .. } => "Heading",
            RawKind::FencedCodeBlock { .. } => "FencedCodeBlock",
            RawKind::IndentedCodeBlock { .. } => "IndentedCodeBlock",
            RawKind::ThematicBreak => "ThematicBreak",
            RawKind::HtmlBlock { .. } => "HtmlBlock",
            RawKind::LinkReferenceDefinition { .. } => "LinkReferenceDefinition",
            RawKind::Custom(_) => "Custom",
        }
    }

    /// Leaves never have block children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            RawKind::Paragraph(_)
                | RawKind::Heading { .. }
                | RawKind::FencedCodeBlock { .. }
                | RawKind::IndentedCodeBlock { .. }
                | RawKind::ThematicBreak
                | RawKind::HtmlBlock { .. }
                | RawKind::LinkReferenceDefinition { .. }
        )
    }

    /// The inline run of a paragraph or heading.
    pub fn inline_run(&self) -> Option<&InlineRun> {
        match self {
            RawKind::Paragraph(run) | RawKind::Heading { content: run, .. } => Some(run),
            _ => None,
        }
    }

    pub fn inline_run_mut(&mut self) -> Option<&mut InlineRun> {
        match self {
            RawKind::Paragraph(run) | RawKind::Heading { content: run, .. } => Some(run),
            _ => None,
        }
    }
}

/// Leaf content of a paragraph or heading.
///
/// The block phase fills `source`; the inline phase fills `inlines`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineRun {
    pub source: String,
    pub inlines: Vec<RawInline>,
}

impl InlineRun {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            inlines: Vec::new(),
        }
    }
}

/// Raw inline node produced by the inline grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInline {
    Text(String),
    Code(String),
    Emphasis {
        delimiter: char,
        children: Vec<RawInline>,
    },
    StrongEmphasis {
        delimiter: char,
        children: Vec<RawInline>,
    },
    Link {
        destination: String,
        title: Option<String>,
        children: Vec<RawInline>,
    },
    Image {
        destination: String,
        title: Option<String>,
        children: Vec<RawInline>,
    },
    HtmlInline(String),
    SoftLineBreak,
    HardLineBreak,
}

/// Payload carried by an extension's raw node.
pub trait CustomNodeData: fmt::Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// An extension-owned raw block.
#[derive(Debug)]
pub struct CustomNode {
    pub owner: ExtensionId,
    pub data: Box<dyn CustomNodeData>,
}

impl CustomNode {
    pub fn new(owner: ExtensionId, data: impl CustomNodeData) -> Self {
        Self {
            owner,
            data: Box::new(data),
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.data.as_any().downcast_ref::<T>()
    }
}

/// Identifies a block kind for containment decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Document,
    BlockQuote,
    List,
    ListItem,
    Paragraph,
    Heading,
    FencedCode,
    IndentedCode,
    HtmlBlock,
    ThematicBreak,
    Custom(ExtensionId),
}
