//! Index arena holding the inline tree while links and emphasis are formed.
//!
//! Both constructs wrap a run of already-created siblings, so nodes need
//! parent and sibling links during parsing. The finished tree is converted
//! into owned [`RawInline`] values.

use crate::parsing::blocks::types::RawInline;

pub type NodeId = usize;

#[derive(Debug)]
pub enum Value {
    Root,
    Text(String),
    Code(String),
    Html(String),
    SoftBreak,
    HardBreak,
    Emphasis(char),
    Strong(char),
    Link {
        destination: String,
        title: Option<String>,
    },
    Image {
        destination: String,
        title: Option<String>,
    },
}

#[derive(Debug)]
struct Node {
    value: Value,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        let mut arena = Self { nodes: Vec::new() };
        arena.alloc(Value::Root);
        arena
    }

    pub fn alloc(&mut self, value: Value) -> NodeId {
        self.nodes.push(Node {
            value,
            parent: None,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
        });
        self.nodes.len() - 1
    }

    pub fn value_mut(&mut self, id: NodeId) -> &mut Value {
        &mut self.nodes[id].value
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent].last_child;
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.prev = last;
            node.next = None;
        }
        match last {
            Some(last) => self.nodes[last].next = Some(child),
            None => self.nodes[parent].first_child = Some(child),
        }
        self.nodes[parent].last_child = Some(child);
    }

    /// Inserts a detached node right after `anchor`.
    pub fn insert_after(&mut self, anchor: NodeId, new: NodeId) {
        let parent = self.nodes[anchor].parent;
        let next = self.nodes[anchor].next;
        {
            let node = &mut self.nodes[new];
            node.parent = parent;
            node.prev = Some(anchor);
            node.next = next;
        }
        self.nodes[anchor].next = Some(new);
        match next {
            Some(next) => self.nodes[next].prev = Some(new),
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent].last_child = Some(new);
                }
            }
        }
    }

    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id];
            (node.parent, node.prev, node.next)
        };
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent].first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent].last_child = prev;
                }
            }
        }
        let node = &mut self.nodes[id];
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Moves every sibling after `from` (up to, not including, `until`) into `into`.
    pub fn adopt_following(&mut self, from: NodeId, until: Option<NodeId>, into: NodeId) {
        let mut next = self.next_sibling(from);
        while let Some(id) = next {
            if Some(id) == until {
                break;
            }
            next = self.next_sibling(id);
            self.detach(id);
            self.append_child(into, id);
        }
    }

    /// Converts the children of `id` into owned inlines, merging adjacent
    /// text and dropping empty text.
    pub fn into_inlines(mut self, id: NodeId) -> Vec<RawInline> {
        self.convert_children(id)
    }

    fn convert_children(&mut self, id: NodeId) -> Vec<RawInline> {
        let mut out: Vec<RawInline> = Vec::new();
        let mut child = self.nodes[id].first_child;
        while let Some(current) = child {
            child = self.nodes[current].next;
            let value = std::mem::replace(&mut self.nodes[current].value, Value::Root);
            let inline = match value {
                Value::Root => continue,
                Value::Text(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    if let Some(RawInline::Text(previous)) = out.last_mut() {
                        previous.push_str(&text);
                        continue;
                    }
                    RawInline::Text(text)
                }
                Value::Code(code) => RawInline::Code(code),
                Value::Html(html) => RawInline::HtmlInline(html),
                Value::SoftBreak => RawInline::SoftLineBreak,
                Value::HardBreak => RawInline::HardLineBreak,
                Value::Emphasis(delimiter) => RawInline::Emphasis {
                    delimiter,
                    children: self.convert_children(current),
                },
                Value::Strong(delimiter) => RawInline::StrongEmphasis {
                    delimiter,
                    children: self.convert_children(current),
                },
                Value::Link { destination, title } => RawInline::Link {
                    destination,
                    title,
                    children: self.convert_children(current),
                },
                Value::Image { destination, title } => RawInline::Image {
                    destination,
                    title,
                    children: self.convert_children(current),
                },
            };
            out.push(inline);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(arena: &mut Arena, s: &str) -> NodeId {
        let id = arena.alloc(Value::Text(s.to_string()));
        arena.append_child(Arena::ROOT, id);
        id
    }

    #[test]
    fn adjacent_text_is_merged() {
        let mut arena = Arena::new();
        text(&mut arena, "a");
        text(&mut arena, "");
        text(&mut arena, "b");
        assert_eq!(arena.into_inlines(Arena::ROOT), vec![RawInline::Text("ab".into())]);
    }

    #[test]
    fn wrapping_siblings() {
        let mut arena = Arena::new();
        let open = text(&mut arena, "*");
        text(&mut arena, "x");
        let close = text(&mut arena, "*");
        let emph = arena.alloc(Value::Emphasis('*'));
        arena.adopt_following(open, Some(close), emph);
        arena.insert_after(open, emph);
        arena.detach(open);
        arena.detach(close);
        assert_eq!(
            arena.into_inlines(Arena::ROOT),
            vec![RawInline::Emphasis {
                delimiter: '*',
                children: vec![RawInline::Text("x".into())],
            }]
        );
    }
}
