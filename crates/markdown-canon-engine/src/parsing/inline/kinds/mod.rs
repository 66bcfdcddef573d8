pub mod autolink;
pub mod code_span;
pub mod emphasis;
pub mod link;

pub use autolink::Autolink;
pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use link::{InlineTarget, LinkOpen};
