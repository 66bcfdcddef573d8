//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: Renders a raw tree as an indented outline for `insta` snapshots
//! - **`invariants`**: Structural checks (single document root, leaves without
//!   children, spans in bounds and nested in their parents)

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::outline;
