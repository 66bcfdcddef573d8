use std::any::Any;
use std::sync::Arc;

use markdown_canon_engine::parsing::blocks::{
    BlockContinue, BlockParser, BlockParserFactory, BlockStart, BlockTag, CustomNode, CustomNodeData, InlineRun,
    MatchedBlock, ParserState, RawInline, RawKind, RawNode,
};
use markdown_canon_engine::parsing::references::ReferenceDefinitions;
use markdown_canon_engine::parsing::rope::Span;
use markdown_canon_engine::{
    Block, BlockProcessorExtension, BulletList, CodeLanguage, CustomBlock, CustomBlockData, ExtensionId,
    ExtensionRegistry, FencedCodeBlock, Heading, InlineNode, KnownLanguage, ListItem, MarkdownExtension,
    MarkdownProcessor, Paragraph, ProcessError, TASK_LIST_ITEMS, TaskListItemsExtension, TaskListMarker,
    render_markdown, render_text,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const FIRST: ExtensionId = ExtensionId::new("first-banner");
const SECOND: ExtensionId = ExtensionId::new("second-banner");

/// A one-line `!! text` block owned by whichever extension claimed it.
#[derive(Debug, Clone, PartialEq)]
struct Banner {
    text: String,
}

impl CustomNodeData for Banner {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl CustomBlockData for Banner {
    fn label(&self) -> String {
        format!("Banner({})", self.text)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_data(&self, other: &dyn CustomBlockData) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}

#[derive(Debug)]
struct BannerStart(ExtensionId);

impl BlockParserFactory for BannerStart {
    fn try_start(&self, state: &ParserState, _matched: &MatchedBlock<'_>) -> Option<BlockStart> {
        if state.is_code_indent() {
            return None;
        }
        let text = state.rest().strip_prefix("!! ")?;
        let parser = BannerParser {
            owner: self.0,
            text: text.trim().to_string(),
        };
        Some(BlockStart::of(Box::new(parser)).at_index(state.line().len()))
    }
}

#[derive(Debug)]
struct BannerParser {
    owner: ExtensionId,
    text: String,
}

impl BlockParser for BannerParser {
    fn tag(&self) -> BlockTag {
        BlockTag::Custom(self.owner)
    }

    fn try_continue(&mut self, _state: &ParserState) -> Option<BlockContinue> {
        None
    }

    fn finalize(self: Box<Self>, span: Span, _definitions: &mut ReferenceDefinitions) -> Vec<RawNode> {
        let node = CustomNode::new(self.owner, Banner { text: self.text });
        vec![RawNode::new(RawKind::Custom(node), span)]
    }
}

struct BannerProcessor(ExtensionId);

impl BlockProcessorExtension for BannerProcessor {
    fn can_process(&self, node: &CustomNode) -> bool {
        node.owner == self.0
    }

    fn process_block(
        &self,
        _raw: &RawNode,
        node: &CustomNode,
        _processor: &MarkdownProcessor,
    ) -> Result<Option<CustomBlock>, ProcessError> {
        let banner = node.downcast_ref::<Banner>().ok_or_else(|| ProcessError::Extension {
            id: self.0,
            message: "not a banner".into(),
        })?;
        Ok(Some(CustomBlock::new(self.0, banner.clone(), Vec::new())))
    }
}

#[derive(Debug)]
struct BannerExtension {
    id: ExtensionId,
    with_processor: bool,
}

impl BannerExtension {
    fn new(id: ExtensionId) -> Self {
        Self {
            id,
            with_processor: true,
        }
    }

    fn grammar_only(id: ExtensionId) -> Self {
        Self {
            id,
            with_processor: false,
        }
    }
}

impl MarkdownExtension for BannerExtension {
    fn id(&self) -> ExtensionId {
        self.id
    }

    fn block_parser_factories(&self) -> Vec<Arc<dyn BlockParserFactory>> {
        vec![Arc::new(BannerStart(self.id))]
    }

    fn block_processor(&self) -> Option<Arc<dyn BlockProcessorExtension>> {
        self.with_processor
            .then(|| Arc::new(BannerProcessor(self.id)) as Arc<dyn BlockProcessorExtension>)
    }
}

fn text(s: &str) -> InlineNode {
    InlineNode::Text(s.to_string())
}

fn process(processor: &MarkdownProcessor, markdown: &str) -> Vec<Block> {
    processor.process_markdown_document(markdown).unwrap()
}

#[rstest]
#[case::inline_markup("Some *emph* and __strong__ text with `code` and a [link](/url \"t\").\n")]
#[case::quote_with_heading("> # Quoted\n> quote\n> more\n")]
#[case::nested_lists("- one\n- two\n  - nested\n  - again\n")]
#[case::loose_ordered_list("3. first\n\n4. second\n")]
#[case::fenced_code("```rust\nfn main() {}\n```\n")]
#[case::indented_code("    indented\n      more\n")]
#[case::thematic_break("a\n\n***\n\nb\n")]
#[case::html_block("<div>\nx\n</div>\n")]
#[case::hard_break("line  \nnext\n")]
#[case::image("![alt *text*](/img.png)\n")]
#[case::setext("Two\nlines\n===\n")]
#[case::task_items("- [x] Done *now*\n- [ ] Later\n")]
#[case::trailing_entity_space("a&#32;\n")]
#[case::space_before_soft_break("*b*&#32;\nc")]
#[case::tab_before_hard_break("x&#9;\\\ny\n")]
fn rendering_then_processing_is_identity(#[case] markdown: &str) {
    let processor = MarkdownProcessor::builder()
        .extension(TaskListItemsExtension)
        .build()
        .unwrap();
    let blocks = process(&processor, markdown);
    let rendered = render_markdown(processor.registry(), &blocks);
    assert_eq!(process(&processor, &rendered), blocks, "rendered as:\n{rendered}");
}

#[test]
fn references_are_resolved_in_place() {
    let processor = MarkdownProcessor::default();
    let blocks = process(&processor, "[a][ref]\n\n[ref]: /url 'T'\n");
    assert_eq!(
        blocks,
        vec![Block::Paragraph(Paragraph::new(InlineNode::Link {
            destination: "/url".into(),
            title: Some("T".into()),
            content: Box::new(text("a")),
        }))]
    );
    assert_eq!(render_markdown(processor.registry(), &blocks), "[a](/url \"T\")\n");
}

#[test]
fn code_literals_are_verbatim() {
    let processor = MarkdownProcessor::default();
    let source = "```py\n  a\\*b  \n\tc &amp; <d>\n\n```\n";
    let blocks = process(&processor, source);
    let expected = vec![Block::FencedCodeBlock(FencedCodeBlock {
        literal: "  a\\*b  \n\tc &amp; <d>\n".into(),
        language: Some(CodeLanguage::Known(KnownLanguage::Python)),
    })];
    assert_eq!(blocks, expected);

    let rendered = render_markdown(processor.registry(), &blocks);
    assert_eq!(process(&processor, &rendered), expected);
    assert_eq!(render_text(processor.registry(), &blocks), "  a\\*b  \n\tc &amp; <d>\n");
}

#[test]
fn task_items_are_rewritten() {
    let processor = MarkdownProcessor::builder()
        .extension(TaskListItemsExtension)
        .build()
        .unwrap();
    let marker = |checked| Block::Custom(CustomBlock::new(TASK_LIST_ITEMS, TaskListMarker { checked }, vec![]));
    let paragraph = |s: &str| Block::Paragraph(Paragraph::new(text(s)));

    assert_eq!(
        process(&processor, "- [x] done\n- [ ] todo\n- [y] no\n"),
        vec![Block::BulletList(BulletList {
            items: vec![
                ListItem::new(vec![marker(true), paragraph("done")]),
                ListItem::new(vec![marker(false), paragraph("todo")]),
                ListItem::new(vec![paragraph("[y] no")]),
            ],
            tight: true,
            marker: '-',
        })]
    );
}

#[test]
fn task_items_need_the_extension() {
    let blocks = process(&MarkdownProcessor::default(), "- [x] done\n");
    assert_eq!(
        blocks,
        vec![Block::BulletList(BulletList {
            items: vec![ListItem::new(vec![Block::Paragraph(Paragraph::new(text("[x] done")))])],
            tight: true,
            marker: '-',
        })]
    );
}

#[rstest]
#[case("1 * 2 = [x] a_b <c> \\ ~ & &amp; (y)!")]
#[case("# not a heading")]
#[case("- not a list")]
#[case("10. not a list either")]
#[case("`tick` and *star*")]
#[case("~~paired~~ and ~single")]
fn escaped_text_parses_back(#[case] literal: &str) {
    let processor = MarkdownProcessor::default();
    let blocks = vec![Block::Paragraph(Paragraph::new(text(literal)))];
    let rendered = render_markdown(processor.registry(), &blocks);
    assert_eq!(process(&processor, &rendered), blocks, "rendered as:\n{rendered}");
}

#[test]
fn headings_deeper_than_six_are_dropped() {
    let processor = MarkdownProcessor::default();
    let heading = |level| {
        RawNode::new(
            RawKind::Heading {
                level,
                content: InlineRun {
                    source: "x".into(),
                    inlines: vec![RawInline::Text("x".into())],
                },
            },
            Span::new(0, 1),
        )
    };
    let document = RawNode::with_children(RawKind::Document, Span::new(0, 1), vec![heading(6), heading(7)]);
    assert_eq!(
        processor.process_children(&document).unwrap(),
        vec![Block::Heading(Heading {
            level: 6,
            content: text("x"),
        })]
    );
}

#[test]
fn first_registered_extension_wins_the_line() {
    let processor = MarkdownProcessor::builder()
        .extension(BannerExtension::new(FIRST))
        .extension(BannerExtension::new(SECOND))
        .build()
        .unwrap();

    let raw = processor.parse_raw("!! hello\n").unwrap();
    let owners: Vec<_> = raw
        .children
        .iter()
        .filter_map(|child| match &child.kind {
            RawKind::Custom(node) => Some(node.owner),
            _ => None,
        })
        .collect();
    assert_eq!(owners, vec![FIRST]);

    assert_eq!(
        process(&processor, "!! hello\n"),
        vec![Block::Custom(CustomBlock::new(
            FIRST,
            Banner {
                text: "hello".into()
            },
            vec![]
        ))]
    );
}

#[test]
fn extension_blocks_start_before_core_blocks() {
    let processor = MarkdownProcessor::builder()
        .extension(BannerExtension::new(FIRST))
        .build()
        .unwrap();
    let blocks = process(&processor, "para\n!! interrupts\n");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], Block::Paragraph(Paragraph::new(text("para"))));
    assert!(matches!(&blocks[1], Block::Custom(block) if block.extension == FIRST));
}

#[test]
fn unclaimed_custom_nodes_are_dropped() {
    let processor = MarkdownProcessor::builder()
        .extension(BannerExtension::grammar_only(FIRST))
        .build()
        .unwrap();
    assert_eq!(
        process(&processor, "!! gone\n\nkept\n"),
        vec![Block::Paragraph(Paragraph::new(text("kept")))]
    );
}

#[test]
fn duplicate_extensions_are_rejected() {
    let err = MarkdownProcessor::builder()
        .extension(BannerExtension::new(FIRST))
        .extension(BannerExtension::grammar_only(FIRST))
        .build()
        .unwrap_err();
    assert!(matches!(err, ProcessError::DuplicateExtension { id } if id == FIRST));

    let err = ExtensionRegistry::new([
        Arc::new(TaskListItemsExtension) as Arc<dyn MarkdownExtension>,
        Arc::new(TaskListItemsExtension),
    ])
    .unwrap_err();
    assert_eq!(err.to_string(), "Extension registered twice: task-list-items");
}

#[test]
fn processor_is_shared_between_threads() {
    let processor = MarkdownProcessor::builder()
        .extension(TaskListItemsExtension)
        .build()
        .unwrap();
    let source = "# Title\n\n- [x] one\n- two\n";
    let expected = process(&processor, source);

    let shared = &processor;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || shared.process_markdown_document(source).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// Shapes that CommonMark cannot re-read as the same tree.

#[test]
fn adjacent_lists_with_one_marker_merge() {
    let processor = MarkdownProcessor::default();
    let blocks = process(&processor, "- a\n\n[r]: /u\n- b\n");
    assert!(matches!(
        blocks.as_slice(),
        [Block::BulletList(first), Block::BulletList(second)] if first.tight && second.tight
    ));

    let rendered = render_markdown(processor.registry(), &blocks);
    assert_eq!(rendered, "- a\n\n- b\n");
    assert!(matches!(
        process(&processor, &rendered).as_slice(),
        [Block::BulletList(merged)] if !merged.tight && merged.items.len() == 2
    ));
}

#[test]
fn emphasis_opening_with_same_delimiter_regroups() {
    let processor = MarkdownProcessor::default();
    let blocks = process(&processor, "***a*b*\n");
    let rendered = render_markdown(processor.registry(), &blocks);
    assert_eq!(rendered, "\\***a*b*\n");
    assert_ne!(process(&processor, &rendered), blocks);
}

#[test]
fn html_at_line_start_opens_html_block() {
    let processor = MarkdownProcessor::default();
    let blocks = process(&processor, "[r]: /u\n<k>\n\n<k>\n");
    assert!(matches!(
        blocks.as_slice(),
        [Block::Paragraph(Paragraph { content: InlineNode::HtmlInline(html) }), Block::HtmlBlock(_)] if html == "<k>"
    ));

    let rendered = render_markdown(processor.registry(), &blocks);
    assert!(matches!(
        process(&processor, &rendered).as_slice(),
        [Block::HtmlBlock(_), Block::HtmlBlock(_)] | [Block::HtmlBlock(_)]
    ));
}
