//! Block kinds. Each kind owns its delimiters and its start factory.

pub mod block_quote;
pub mod code_fence;
pub mod document;
pub mod heading;
pub mod html_block;
pub mod indented_code;
pub mod list;
pub mod paragraph;
pub mod thematic_break;

pub use block_quote::{BlockQuote, BlockQuoteStart};
pub use code_fence::{CodeFence, CodeFenceStart};
pub use document::Document;
pub use heading::{Heading, HeadingStart};
pub use html_block::{HtmlBlock, HtmlBlockStart};
pub use indented_code::{IndentedCode, IndentedCodeStart};
pub use list::{List, ListItem, ListKind, ListStart};
pub use paragraph::Paragraph;
pub use thematic_break::{ThematicBreak, ThematicBreakStart};
