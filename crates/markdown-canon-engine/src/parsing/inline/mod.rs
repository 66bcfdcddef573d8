//! # Inline Parsing
//!
//! Cursor-based inline parsing of paragraph and heading content.
//!
//! ## Architecture
//!
//! The parser walks the leaf's source once, emitting text, code spans,
//! autolinks, raw HTML and line breaks directly. `*`/`_` runs and `[`/`![`
//! openers become placeholder text nodes plus entries on the delimiter and
//! bracket stacks; a closing `]` that resolves to a destination wraps the
//! nodes after its opener in a link, and emphasis is resolved afterwards by
//! the delimiter-run algorithm.
//!
//! ## Modules
//!
//! - **`cursor`**: `Cursor` for byte-by-byte parsing
//! - **`arena`**: Index arena for the tree under construction
//! - **`delimiters`**: Delimiter/bracket stacks and `process_emphasis`
//! - **`kinds`**: Inline-specific types with owned delimiters (CodeSpan, Emphasis, LinkOpen, Autolink)
//! - **`parser`**: `parse_inline()` main entry point
//!
//! ## Raw Zone Precedence
//!
//! Code spans, autolinks and raw HTML are raw zones: `` `*not emphasis*` ``
//! parses as a single code span.

pub mod arena;
pub mod cursor;
pub mod delimiters;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
