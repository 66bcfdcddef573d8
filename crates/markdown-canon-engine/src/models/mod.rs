//! # Normalized Document Model
//!
//! The output of processing: an immutable tree of [`Block`]s whose leaf
//! content is an [`InlineNode`]. Every block corresponds to exactly one raw
//! block; empty blocks are dropped rather than represented.

pub mod block;
pub mod custom;
pub mod inline;
pub mod language;

pub use block::{
    Block, BlockQuote, BulletList, FencedCodeBlock, Heading, HtmlBlock, IndentedCodeBlock, ListItem, OrderedList,
    Paragraph,
};
pub use custom::{CustomBlock, CustomBlockData};
pub use inline::InlineNode;
pub use language::{CodeLanguage, KnownLanguage};
