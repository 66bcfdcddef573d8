//! Link reference definitions: `[label]: destination "title"`.
//!
//! Definitions are only recognized at the start of a paragraph. They are
//! collected into a [`ReferenceDefinitions`] table during the block phase
//! and consumed by the inline phase to resolve reference links.

use std::collections::HashMap;

use super::chars::skip_space_tab;
use super::scan::{scan_link_destination, scan_link_label, scan_link_title, skip_spaces_and_newline};

/// Resolved target of a reference label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub destination: String,
    pub title: Option<String>,
}

/// A definition found at the start of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Label as written, before normalization.
    pub label: String,
    pub reference: LinkReference,
}

/// Definitions collected for one document. The first definition of a label wins.
#[derive(Debug, Default)]
pub struct ReferenceDefinitions {
    by_label: HashMap<String, LinkReference>,
}

impl ReferenceDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a definition. Returns `false` if the label was already defined.
    pub fn add(&mut self, label: &str, reference: LinkReference) -> bool {
        let key = normalize_label(label);
        if self.by_label.contains_key(&key) {
            return false;
        }
        self.by_label.insert(key, reference);
        true
    }

    pub fn get(&self, label: &str) -> Option<&LinkReference> {
        self.by_label.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

/// Case-folds a label and collapses internal whitespace, so that
/// `[Foo  Bar]` and `[foo bar]` refer to the same definition.
pub fn normalize_label(label: &str) -> String {
    let collapsed = label.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase().to_uppercase()
}

/// Splits leading definitions off paragraph content.
///
/// Returns the definitions in source order and the remaining content.
pub fn split_definitions(content: &str) -> (Vec<Definition>, &str) {
    let mut defs = Vec::new();
    let mut rest = content;
    while let Some((def, consumed)) = scan_definition(rest) {
        defs.push(def);
        rest = &rest[consumed..];
    }
    (defs, rest)
}

/// Scans one definition at the start of `s`, returning it with the number of
/// bytes consumed (including the terminating line ending).
fn scan_definition(s: &str) -> Option<(Definition, usize)> {
    let start = skip_space_tab(s, 0);
    let (label, after_label) = scan_link_label(s, start)?;
    if label.trim().is_empty() {
        return None;
    }
    let bytes = s.as_bytes();
    if bytes.get(after_label) != Some(&b':') {
        return None;
    }
    let dest_start = skip_spaces_and_newline(s, after_label + 1);
    let (destination, after_dest) = scan_link_destination(s, dest_start)?;

    let definition = |title: Option<String>| Definition {
        label: label.to_string(),
        reference: LinkReference {
            destination: destination.clone(),
            title,
        },
    };

    // A title needs whitespace between it and the destination.
    let title_start = skip_spaces_and_newline(s, after_dest);
    if title_start > after_dest
        && let Some((title, after_title)) = scan_link_title(s, title_start)
        && let Some(end) = line_end(s, after_title)
    {
        return Some((definition(Some(title)), end));
    }

    let end = line_end(s, after_dest)?;
    Some((definition(None), end))
}

/// Index after the line ending if only spaces/tabs remain on the line.
fn line_end(s: &str, from: usize) -> Option<usize> {
    let i = skip_space_tab(s, from);
    match s.as_bytes().get(i) {
        None => Some(i),
        Some(b'\n') => Some(i + 1),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Foo  Bar", "FOO BAR")]
    #[case(" foo\nbar ", "FOO BAR")]
    #[case("ẞ", "SS")]
    fn normalizes_labels(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(label), expected);
    }

    #[test]
    fn first_definition_wins() {
        let mut defs = ReferenceDefinitions::new();
        let first = LinkReference { destination: "/one".into(), title: None };
        let second = LinkReference { destination: "/two".into(), title: None };
        assert!(defs.add("Foo", first.clone()));
        assert!(!defs.add("foo", second));
        assert_eq!(defs.get("FOO"), Some(&first));
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn splits_definitions_and_keeps_rest() {
        let (defs, rest) = split_definitions("[a]: /x \"T\"\n[b]:\n  <y z>\nText here");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].label, "a");
        assert_eq!(defs[0].reference.destination, "/x");
        assert_eq!(defs[0].reference.title.as_deref(), Some("T"));
        assert_eq!(defs[1].reference.destination, "y z");
        assert_eq!(defs[1].reference.title, None);
        assert_eq!(rest, "Text here");
    }

    #[test]
    fn title_on_next_line() {
        let (defs, rest) = split_definitions("[a]: /x\n'title'");
        assert_eq!(defs[0].reference.title.as_deref(), Some("title"));
        assert_eq!(rest, "");
    }

    #[test]
    fn invalid_title_leaves_following_line_as_text() {
        let (defs, rest) = split_definitions("[a]: /x\n\"unterminated\nmore");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].reference.title, None);
        assert_eq!(rest, "\"unterminated\nmore");
    }

    #[rstest]
    #[case("[a]: /x trailing")]
    #[case("[]: /x")]
    #[case("[a] /x")]
    #[case("[a]:")]
    fn not_definitions(#[case] input: &str) {
        let (defs, rest) = split_definitions(input);
        assert!(defs.is_empty());
        assert_eq!(rest, input);
    }
}
