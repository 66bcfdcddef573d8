use std::fmt::Write;

use crate::parsing::blocks::{RawInline, RawKind, RawNode};

/// Renders a raw tree as one line per block, indented by depth.
///
/// Leaf content is shown in a compact inline notation: `*x*` for emphasis,
/// `**x**` for strong, `` `x` `` for code, `[x](dest)` for links, `⏎` for
/// soft breaks and `↵` for hard breaks.
pub fn outline(root: &RawNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &RawNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let line = match &node.kind {
        RawKind::Document => "Document".to_string(),
        RawKind::BlockQuote => "BlockQuote".to_string(),
        RawKind::BulletList { tight, marker } => format!("BulletList {marker} tight={tight}"),
        RawKind::OrderedList {
            tight,
            start,
            delimiter,
        } => format!("OrderedList {start}{delimiter} tight={tight}"),
        RawKind::ListItem { spread } => {
            if *spread {
                "ListItem spread".to_string()
            } else {
                "ListItem".to_string()
            }
        }
        RawKind::Paragraph(run) => format!("Paragraph {}", inlines(&run.inlines)),
        RawKind::Heading { level, content } => format!("Heading {level} {}", inlines(&content.inlines)),
        RawKind::FencedCodeBlock { info, literal, .. } => format!("FencedCode {info:?} {literal:?}"),
        RawKind::IndentedCodeBlock { literal } => format!("IndentedCode {literal:?}"),
        RawKind::ThematicBreak => "ThematicBreak".to_string(),
        RawKind::HtmlBlock { literal } => format!("HtmlBlock {literal:?}"),
        RawKind::LinkReferenceDefinition {
            label, destination, ..
        } => format!("Definition [{label}] {destination}"),
        RawKind::Custom(custom) => format!("Custom {} {:?}", custom.owner, custom.data),
    };
    let _ = writeln!(out, "{indent}{line}");
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

fn inlines(nodes: &[RawInline]) -> String {
    nodes.iter().map(inline).collect()
}

fn inline(node: &RawInline) -> String {
    match node {
        RawInline::Text(text) => text.clone(),
        RawInline::Code(code) => format!("`{code}`"),
        RawInline::Emphasis { children, .. } => format!("*{}*", inlines(children)),
        RawInline::StrongEmphasis { children, .. } => format!("**{}**", inlines(children)),
        RawInline::Link {
            destination,
            children,
            ..
        } => format!("[{}]({destination})", inlines(children)),
        RawInline::Image {
            destination,
            children,
            ..
        } => format!("![{}]({destination})", inlines(children)),
        RawInline::HtmlInline(html) => html.clone(),
        RawInline::SoftLineBreak => "⏎".to_string(),
        RawInline::HardLineBreak => "↵".to_string(),
    }
}
