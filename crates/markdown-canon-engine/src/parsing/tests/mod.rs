//! Block structure tests for the grammar engine.
//!
//! Each case parses a document, checks the tree invariants and compares an
//! outline of the raw tree against an inline `insta` snapshot.

use insta::assert_snapshot;
use rstest::rstest;

use crate::extensions::ExtensionRegistry;
use crate::parsing::blocks::{RawKind, RawNode};
use crate::parsing::parse_document;
use crate::parsing::snapshot::{invariants, outline};

fn parse(text: &str) -> RawNode {
    let document = parse_document(text, &ExtensionRegistry::empty()).unwrap();
    invariants(text.len(), &document);
    document
}

fn outline_of(text: &str) -> String {
    outline(&parse(text))
}

#[test]
fn paragraphs_and_breaks() {
    assert_snapshot!(outline_of("a\nb\n\nc  \nd\n"), @r"
    Document
      Paragraph a⏎b
      Paragraph c↵d
    ");
}

#[test]
fn atx_and_setext_headings() {
    assert_snapshot!(outline_of("# One #\nTwo\n===\n\n###### Six\n####### Seven\n"), @r"
    Document
      Heading 1 One
      Heading 1 Two
      Heading 6 Six
      Paragraph ####### Seven
    ");
}

#[test]
fn block_quote_with_lazy_continuation() {
    assert_snapshot!(outline_of("> a\nb\n> > c\n"), @r"
    Document
      BlockQuote
        Paragraph a⏎b
        BlockQuote
          Paragraph c
    ");
}

#[test]
fn fenced_code_keeps_literal() {
    assert_snapshot!(outline_of("```rust\nfn x() {}\n  *no* &amp;\n```\n~~~\nopen\n"), @r#"
    Document
      FencedCode "rust" "fn x() {}\n  *no* &amp;\n"
      FencedCode "" "open\n"
    "#);
}

#[test]
fn indented_code_drops_trailing_blank_lines() {
    assert_snapshot!(outline_of("    a\n\n    b\n\n\npara\n"), @r#"
    Document
      IndentedCode "a\n\nb\n"
      Paragraph para
    "#);
}

#[test]
fn indented_code_cannot_interrupt_paragraph() {
    assert_snapshot!(outline_of("a\n    b\n"), @r"
    Document
      Paragraph a⏎b
    ");
}

#[test]
fn tight_and_loose_lists() {
    assert_snapshot!(outline_of("- a\n- b\n\n1) c\n\n2) d\n"), @r"
    Document
      BulletList - tight=true
        ListItem
          Paragraph a
        ListItem
          Paragraph b
      OrderedList 1) tight=false
        ListItem
          Paragraph c
        ListItem
          Paragraph d
    ");
}

#[test]
fn nested_lists() {
    assert_snapshot!(outline_of("* a\n  + b\n* c\n"), @r"
    Document
      BulletList * tight=true
        ListItem
          Paragraph a
          BulletList + tight=true
            ListItem
              Paragraph b
        ListItem
          Paragraph c
    ");
}

#[test]
fn only_one_starts_list_inside_paragraph() {
    assert_snapshot!(outline_of("a\n2. b\n1. c\n"), @r"
    Document
      Paragraph a⏎2. b
      OrderedList 1. tight=true
        ListItem
          Paragraph c
    ");
}

#[test]
fn thematic_break_beats_list() {
    assert_snapshot!(outline_of("* * *\n- a\n"), @r"
    Document
      ThematicBreak
      BulletList - tight=true
        ListItem
          Paragraph a
    ");
}

#[test]
fn html_blocks() {
    assert_snapshot!(outline_of("<div>\n*x*\n</div>\n\n<!-- c -->\ntext\n"), @r#"
    Document
      HtmlBlock "<div>\n*x*\n</div>"
      HtmlBlock "<!-- c -->"
      Paragraph text
    "#);
}

#[test]
fn definitions_leave_the_paragraph() {
    assert_snapshot!(outline_of("[Foo]: /url \"t\"\n[foo]: /other\nsee [FOO]\n"), @r"
    Document
      Definition [Foo] /url
      Definition [foo] /other
      Paragraph see [FOO](/url)
    ");
}

#[test]
fn inline_content_is_parsed() {
    assert_snapshot!(outline_of("*a* **b** `c` [d](/e) ![f](/g)\n"), @r"
    Document
      Paragraph *a* **b** `c` [d](/e) ![f](/g)
    ");
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("> \n>\n")]
#[case("-\n-\n")]
#[case("```\n")]
#[case("\t\tcode\n")]
#[case("a\r\nb\r\n")]
#[case("[x]: <>\n")]
#[case("> - > - a\n>   b\n")]
fn invariants_hold(#[case] text: &str) {
    parse(text);
}

#[test]
fn crlf_is_a_line_ending() {
    let document = parse("a\r\nb\r\n");
    let [paragraph] = document.children.as_slice() else {
        panic!("expected one block");
    };
    let RawKind::Paragraph(run) = &paragraph.kind else {
        panic!("expected paragraph");
    };
    assert_eq!(run.source, "a\nb");
}
