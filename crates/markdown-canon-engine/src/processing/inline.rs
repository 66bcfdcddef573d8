use crate::models::InlineNode;
use crate::parsing::blocks::RawInline;

/// Turns parsed inlines into the simplified inline model.
///
/// The parser has already decoded entities, resolved references and dropped
/// superfluous escapes. This pass removes what has no visual representation,
/// fills empty link text with the destination, flattens image descriptions
/// and merges adjacent text.
pub struct InlineNormalizer;

impl InlineNormalizer {
    pub fn normalize(inlines: &[RawInline]) -> InlineNode {
        InlineNode::from_nodes(Self::normalize_all(inlines))
    }

    fn normalize_all(inlines: &[RawInline]) -> Vec<InlineNode> {
        let mut nodes: Vec<InlineNode> = Vec::with_capacity(inlines.len());
        for node in inlines.iter().filter_map(Self::normalize_one) {
            match (nodes.last_mut(), node) {
                (Some(InlineNode::Text(previous)), InlineNode::Text(text)) => previous.push_str(&text),
                (_, node) => nodes.push(node),
            }
        }
        nodes
    }

    fn normalize_one(inline: &RawInline) -> Option<InlineNode> {
        match inline {
            RawInline::Text(text) => (!text.is_empty()).then(|| InlineNode::Text(text.clone())),
            RawInline::Code(code) => Some(InlineNode::Code(code.clone())),
            RawInline::Emphasis { delimiter, children } => {
                let content = Self::normalize(children);
                (!content.is_empty()).then(|| InlineNode::Emphasis {
                    delimiter: *delimiter,
                    content: Box::new(content),
                })
            }
            RawInline::StrongEmphasis { delimiter, children } => {
                let content = Self::normalize(children);
                (!content.is_empty()).then(|| InlineNode::StrongEmphasis {
                    delimiter: *delimiter,
                    content: Box::new(content),
                })
            }
            RawInline::Link {
                destination,
                title,
                children,
            } => {
                let mut content = Self::normalize(children);
                if content.is_empty() {
                    if destination.is_empty() {
                        return None;
                    }
                    content = InlineNode::Text(destination.clone());
                }
                Some(InlineNode::Link {
                    destination: destination.clone(),
                    title: title.clone(),
                    content: Box::new(content),
                })
            }
            RawInline::Image {
                destination,
                title,
                children,
            } => {
                let alt = Self::normalize(children).plain_text();
                if alt.is_empty() && destination.is_empty() {
                    return None;
                }
                Some(InlineNode::Image {
                    destination: destination.clone(),
                    title: title.clone(),
                    alt,
                })
            }
            RawInline::HtmlInline(html) => {
                let html = html.trim();
                (!html.is_empty()).then(|| InlineNode::HtmlInline(html.to_string()))
            }
            RawInline::SoftLineBreak => Some(InlineNode::SoftLineBreak),
            RawInline::HardLineBreak => Some(InlineNode::HardLineBreak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> RawInline {
        RawInline::Text(s.to_string())
    }

    #[test]
    fn single_node_is_unwrapped() {
        assert_eq!(InlineNormalizer::normalize(&[text("a")]), InlineNode::Text("a".into()));
    }

    #[test]
    fn empty_emphasis_is_dropped_and_text_merged() {
        let inlines = [
            text("a"),
            RawInline::Emphasis {
                delimiter: '*',
                children: vec![text("")],
            },
            text("b"),
        ];
        assert_eq!(InlineNormalizer::normalize(&inlines), InlineNode::Text("ab".into()));
    }

    #[test]
    fn link_without_text_shows_destination() {
        let inlines = [RawInline::Link {
            destination: "https://example.com".into(),
            title: None,
            children: vec![],
        }];
        assert_eq!(
            InlineNormalizer::normalize(&inlines),
            InlineNode::Link {
                destination: "https://example.com".into(),
                title: None,
                content: Box::new(InlineNode::Text("https://example.com".into())),
            }
        );
    }

    #[test]
    fn empty_link_is_dropped() {
        let inlines = [RawInline::Link {
            destination: String::new(),
            title: Some("t".into()),
            children: vec![],
        }];
        assert!(InlineNormalizer::normalize(&inlines).is_empty());
    }

    #[test]
    fn image_alt_loses_link_markup() {
        let inlines = [RawInline::Image {
            destination: "/cat.png".into(),
            title: None,
            children: vec![
                text("a "),
                RawInline::Link {
                    destination: "/x".into(),
                    title: None,
                    children: vec![RawInline::StrongEmphasis {
                        delimiter: '*',
                        children: vec![text("cat")],
                    }],
                },
            ],
        }];
        assert_eq!(
            InlineNormalizer::normalize(&inlines),
            InlineNode::Image {
                destination: "/cat.png".into(),
                title: None,
                alt: "a cat".into(),
            }
        );
    }

    #[test]
    fn inline_html_is_trimmed() {
        assert_eq!(
            InlineNormalizer::normalize(&[RawInline::HtmlInline("<b>".into()), text("x")]),
            InlineNode::ItemsList(vec![InlineNode::HtmlInline("<b>".into()), InlineNode::Text("x".into())])
        );
    }
}
