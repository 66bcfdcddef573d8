//! # Block Parsing
//!
//! Line-at-a-time construction of the raw block tree over a stack of open
//! blocks, following the CommonMark block structure algorithm.
//!
//! ## Modules
//!
//! - **`types`**: Raw tree types (`RawNode`, `RawKind`, `InlineRun`, `CustomNode`, `BlockTag`)
//! - **`classify`**: `ParserState`, the per-line position and indentation facts
//! - **`open`**: The `BlockParser` / `BlockParserFactory` contracts extensions implement
//! - **`kinds`**: Built-in block kinds with owned delimiters and start factories
//! - **`builder`**: `BlockBuilder`, the open-block stack state machine
//!
//! ## Key Invariants
//!
//! - The builder yields exactly one `Document` root
//! - Extension factories are tried before built-ins; the first match wins
//! - Fenced code and HTML blocks are raw zones: no inline parsing inside
//! - Every node carries the byte span of its source lines

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::{BlockBuilder, BlockTree, core_factories};
pub use classify::ParserState;
pub use open::{BlockContinue, BlockParser, BlockParserFactory, BlockStart, MatchedBlock};
pub use types::{BlockTag, CustomNode, CustomNodeData, InlineRun, RawInline, RawKind, RawNode};
