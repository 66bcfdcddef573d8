use crate::parsing::blocks::{RawKind, RawNode};

/// Panics if the tree violates a structural invariant.
///
/// `source_len` is the byte length of the parsed text.
pub fn check(source_len: usize, root: &RawNode) {
    assert!(
        matches!(root.kind, RawKind::Document),
        "root is not a Document: {}",
        root.kind_name()
    );
    check_node(source_len, root, true);
}

fn check_node(source_len: usize, node: &RawNode, is_root: bool) {
    assert!(
        node.span.start <= node.span.end && node.span.end <= source_len,
        "{} span out of bounds: {:?} (source len: {})",
        node.kind_name(),
        node.span,
        source_len
    );
    if !is_root {
        assert!(
            !matches!(node.kind, RawKind::Document),
            "nested Document at {:?}",
            node.span
        );
    }
    if node.kind.is_leaf() {
        assert!(
            node.children.is_empty(),
            "leaf {} has {} children",
            node.kind_name(),
            node.children.len()
        );
    }
    for child in &node.children {
        assert!(
            child.span.start >= node.span.start && child.span.end <= node.span.end,
            "{} span {:?} not contained in parent {} span {:?}",
            child.kind_name(),
            child.span,
            node.kind_name(),
            node.span
        );
        check_node(source_len, child, false);
    }
}
