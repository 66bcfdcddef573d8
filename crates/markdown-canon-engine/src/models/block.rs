use serde::Serialize;

use crate::rendering::BlockVisitor;

use super::custom::CustomBlock;
use super::inline::InlineNode;
use super::language::CodeLanguage;

/// A normalized block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    BlockQuote(BlockQuote),
    FencedCodeBlock(FencedCodeBlock),
    IndentedCodeBlock(IndentedCodeBlock),
    BulletList(BulletList),
    OrderedList(OrderedList),
    ListItem(ListItem),
    ThematicBreak,
    HtmlBlock(HtmlBlock),
    Custom(CustomBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: InlineNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    /// 1..=6.
    pub level: u8,
    pub content: InlineNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockQuote {
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FencedCodeBlock {
    /// Content without the final line terminator.
    pub literal: String,
    pub language: Option<CodeLanguage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndentedCodeBlock {
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletList {
    pub items: Vec<ListItem>,
    pub tight: bool,
    pub marker: char,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedList {
    pub items: Vec<ListItem>,
    pub tight: bool,
    pub start: u32,
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlBlock {
    /// Verbatim HTML without the final line terminator.
    pub content: String,
}

impl Block {
    /// Double dispatch into a renderer or any other visitor.
    pub fn accept<V: BlockVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Block::Paragraph(block) => visitor.visit_paragraph(block),
            Block::Heading(block) => visitor.visit_heading(block),
            Block::BlockQuote(block) => visitor.visit_block_quote(block),
            Block::FencedCodeBlock(block) => visitor.visit_fenced_code_block(block),
            Block::IndentedCodeBlock(block) => visitor.visit_indented_code_block(block),
            Block::BulletList(block) => visitor.visit_bullet_list(block),
            Block::OrderedList(block) => visitor.visit_ordered_list(block),
            Block::ListItem(block) => visitor.visit_list_item(block),
            Block::ThematicBreak => visitor.visit_thematic_break(),
            Block::HtmlBlock(block) => visitor.visit_html_block(block),
            Block::Custom(block) => visitor.visit_custom(block),
        }
    }

    /// Nested blocks of containers. Lists expose theirs through `items`.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::BlockQuote(quote) => &quote.children,
            Block::ListItem(item) => &item.children,
            Block::Custom(custom) => &custom.children,
            _ => &[],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "Paragraph",
            Block::Heading(_) => "Heading",
            Block::BlockQuote(_) => "BlockQuote",
            Block::FencedCodeBlock(_) => "FencedCodeBlock",
            Block::IndentedCodeBlock(_) => "IndentedCodeBlock",
            Block::BulletList(_) => "BulletList",
            Block::OrderedList(_) => "OrderedList",
            Block::ListItem(_) => "ListItem",
            Block::ThematicBreak => "ThematicBreak",
            Block::HtmlBlock(_) => "HtmlBlock",
            Block::Custom(_) => "Custom",
        }
    }

    /// Inline content of a paragraph or heading.
    pub fn inline_content(&self) -> Option<&InlineNode> {
        match self {
            Block::Paragraph(Paragraph { content }) | Block::Heading(Heading { content, .. }) => Some(content),
            _ => None,
        }
    }
}

impl Paragraph {
    pub fn new(content: InlineNode) -> Self {
        Self { content }
    }
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

impl BlockQuote {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}
