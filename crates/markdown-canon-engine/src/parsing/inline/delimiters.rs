//! Delimiter and bracket stacks, and the emphasis resolution pass.

use super::arena::{Arena, NodeId, Value};
use super::kinds::Emphasis;

/// A `*` or `_` run waiting to be matched.
#[derive(Debug, Clone, Copy)]
pub struct Delimiter {
    /// Text node holding the run's remaining characters.
    pub node: NodeId,
    pub ch: u8,
    /// Characters not yet used by a match.
    pub count: usize,
    /// Run length as written, used by the rule of three.
    pub original: usize,
    pub can_open: bool,
    pub can_close: bool,
    /// Byte index of the run in the source; strictly increasing along the stack.
    pub position: usize,
}

/// An opening `[` or `![`.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    pub node: NodeId,
    pub position: usize,
    /// Index just after the opening bracket.
    pub text_start: usize,
    pub image: bool,
    /// Links cannot contain links; opening brackets before a link are deactivated.
    pub active: bool,
    /// Another bracket opened after this one, so its text cannot be a label.
    pub bracket_after: bool,
}

/// Matches openers and closers at or above `stack_bottom` (a source
/// position), wrapping the nodes between them in emphasis nodes, then
/// removes those delimiters from the stack.
pub fn process_emphasis(delimiters: &mut Vec<Delimiter>, arena: &mut Arena, stack_bottom: usize) {
    // Lower bound per (delimiter char, closer can open, original length % 3).
    let mut openers_bottom = [[[stack_bottom; 3]; 2]; 2];
    let mut ci = delimiters
        .iter()
        .position(|d| d.position >= stack_bottom)
        .unwrap_or(delimiters.len());

    while ci < delimiters.len() {
        let closer = delimiters[ci];
        if !closer.can_close {
            ci += 1;
            continue;
        }
        let bottom = &mut openers_bottom[usize::from(closer.ch == Emphasis::UNDERSCORE)]
            [usize::from(closer.can_open)][closer.original % 3];

        let mut opener_index = None;
        let mut j = ci;
        while j > 0 {
            j -= 1;
            let opener = &delimiters[j];
            if opener.position < *bottom {
                break;
            }
            if opener.ch != closer.ch || !opener.can_open {
                continue;
            }
            let odd_match = (closer.can_open || opener.can_close)
                && (opener.original + closer.original) % 3 == 0
                && !(opener.original % 3 == 0 && closer.original % 3 == 0);
            if !odd_match {
                opener_index = Some(j);
                break;
            }
        }

        let Some(oi) = opener_index else {
            *bottom = closer.position;
            if closer.can_open {
                ci += 1;
            } else {
                delimiters.remove(ci);
            }
            continue;
        };

        let opener = delimiters[oi];
        let used = if opener.count >= 2 && closer.count >= 2 { 2 } else { 1 };
        shrink(arena, opener.node, used);
        shrink(arena, closer.node, used);
        delimiters[oi].count -= used;
        delimiters[ci].count -= used;

        let ch = char::from(closer.ch);
        let wrapper = arena.alloc(if used == 2 { Value::Strong(ch) } else { Value::Emphasis(ch) });
        arena.adopt_following(opener.node, Some(closer.node), wrapper);
        arena.insert_after(opener.node, wrapper);

        // Delimiters between the pair can no longer match anything.
        delimiters.drain(oi + 1..ci);
        ci = oi + 1;
        if delimiters[oi].count == 0 {
            arena.detach(opener.node);
            delimiters.remove(oi);
            ci -= 1;
        }
        if delimiters[ci].count == 0 {
            arena.detach(closer.node);
            delimiters.remove(ci);
        }
    }

    delimiters.retain(|d| d.position < stack_bottom);
}

fn shrink(arena: &mut Arena, node: NodeId, by: usize) {
    if let Value::Text(text) = arena.value_mut(node) {
        let keep = text.len().saturating_sub(by);
        text.truncate(keep);
    }
}
