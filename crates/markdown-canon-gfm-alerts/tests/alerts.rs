use insta::assert_snapshot;
use markdown_canon_engine::{
    Block, CustomBlock, InlineNode, MarkdownProcessor, Paragraph, TaskListItemsExtension, render_markdown, render_text,
};
use markdown_canon_gfm_alerts::{Alert, AlertKind, GFM_ALERTS, GitHubAlertExtension};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn processor() -> MarkdownProcessor {
    MarkdownProcessor::builder()
        .extension(TaskListItemsExtension)
        .extension(GitHubAlertExtension)
        .build()
        .unwrap()
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph(Paragraph::new(InlineNode::Text(text.into())))
}

fn alert(kind: AlertKind, children: Vec<Block>) -> Block {
    Block::Custom(CustomBlock::new(GFM_ALERTS, Alert { kind }, children))
}

#[test]
fn warning_round_trip() {
    let processor = processor();
    let blocks = processor
        .process_markdown_document("> [!WARNING]\n> Be careful\n")
        .unwrap();
    assert_eq!(blocks, vec![alert(AlertKind::Warning, vec![paragraph("Be careful")])]);
    assert_eq!(
        render_text(processor.registry(), &blocks),
        "\u{26A0}\u{FE0F} Warning: Be careful\n"
    );
    assert_eq!(
        render_markdown(processor.registry(), &blocks),
        "> [!WARNING]\n> Be careful\n"
    );
}

#[rstest]
#[case("> [!note]\n> x\n", AlertKind::Note, "\u{2139}\u{FE0F} Note: x\n")]
#[case("> [!TIP]\n> x\n", AlertKind::Tip, "\u{1F4A1} Tip: x\n")]
#[case("> [!Important]\n> x\n", AlertKind::Important, "\u{26A0}\u{FE0F} Important! x\n")]
#[case("> [!CAUTION]\n> x\n", AlertKind::Caution, "\u{1F6D1} Caution! x\n")]
fn every_kind_has_a_premise(#[case] source: &str, #[case] kind: AlertKind, #[case] text: &str) {
    let processor = processor();
    let blocks = processor.process_markdown_document(source).unwrap();
    assert_eq!(blocks, vec![alert(kind, vec![paragraph("x")])]);
    assert_eq!(render_text(processor.registry(), &blocks), text);
}

#[test]
fn alert_ends_where_quote_would() {
    let blocks = processor()
        .process_markdown_document("> [!NOTE]\n> one\n\nafter\n")
        .unwrap();
    assert_eq!(
        blocks,
        vec![alert(AlertKind::Note, vec![paragraph("one")]), paragraph("after")]
    );
}

#[test]
fn lazy_lines_continue_the_paragraph() {
    let blocks = processor()
        .process_markdown_document("> [!TIP]\n> one\ntwo\n")
        .unwrap();
    assert_eq!(
        blocks,
        vec![alert(
            AlertKind::Tip,
            vec![Block::Paragraph(Paragraph::new(InlineNode::ItemsList(vec![
                InlineNode::Text("one".into()),
                InlineNode::SoftLineBreak,
                InlineNode::Text("two".into()),
            ])))]
        )]
    );
}

#[test]
fn alerts_hold_other_blocks() {
    let processor = processor();
    let source = "> [!NOTE]\n> # Title\n>\n> - [x] done\n> > quoted\n";
    let blocks = processor.process_markdown_document(source).unwrap();
    let [Block::Custom(custom)] = blocks.as_slice() else {
        panic!("expected a single alert, got {blocks:?}");
    };
    let kinds: Vec<_> = custom.children.iter().map(Block::kind_name).collect();
    assert_eq!(kinds, ["Heading", "BulletList", "BlockQuote"]);
    assert_snapshot!(render_markdown(processor.registry(), &blocks), @r"
    > [!NOTE]
    > # Title
    >
    > - [x] done
    >
    > > quoted
    ");
}

#[test]
fn nested_alert_line_closes_the_outer_one() {
    let blocks = processor()
        .process_markdown_document("> [!NOTE]\n> > [!TIP]\n> > inner\n")
        .unwrap();
    assert!(matches!(blocks.as_slice(), [Block::Custom(_), Block::Custom(_)]));
}

#[test]
fn without_extension_it_is_a_quote() {
    let blocks = MarkdownProcessor::default()
        .process_markdown_document("> [!WARNING]\n> Be careful\n")
        .unwrap();
    let [Block::BlockQuote(quote)] = blocks.as_slice() else {
        panic!("expected a block quote, got {blocks:?}");
    };
    assert_eq!(quote.children.len(), 1);
}

#[test]
fn indented_code_is_not_an_alert() {
    let blocks = processor().process_markdown_document("    > [!NOTE]\n").unwrap();
    assert!(matches!(blocks.as_slice(), [Block::IndentedCodeBlock(_)]));
}

#[test]
fn markdown_output_parses_back() {
    let processor = processor();
    let source = "> [!CAUTION]\n> Mind the *gap*\n>\n> ```sh\n> rm -rf /\n> ```\n";
    let blocks = processor.process_markdown_document(source).unwrap();
    let markdown = render_markdown(processor.registry(), &blocks);
    assert_eq!(processor.process_markdown_document(&markdown).unwrap(), blocks);
}
