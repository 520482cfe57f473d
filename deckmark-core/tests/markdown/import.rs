//! Import tests for Markdown (Markdown → runs)

use crate::common::describe_runs;
use deckmark_core::format::Format;
use deckmark_core::formats::markdown::MarkdownFormat;
use deckmark_core::transforms::markdown_to_runs;
use insta::assert_snapshot;

#[test]
fn test_paragraph_with_emphasis() {
    let flat = markdown_to_runs("a *b* **c** ***d***\n");
    assert_snapshot!(describe_runs(&flat.runs), @r#"
    "a "|1|0|1
    "b"|4|0|1
    " "|1|0|1
    "c"|2|0|1
    " "|1|0|1
    "d"|6|0|1
    "#);
}

#[test]
fn test_nested_list_levels() {
    let flat = markdown_to_runs("- one\n  - two\n- three\n\nafter\n");
    assert_snapshot!(describe_runs(&flat.runs), @r#"
    "one"|1|1|1
    "two"|1|2|2
    "three"|1|1|3
    "after"|1|0|4
    "#);
}

#[test]
fn test_loose_list_item_counts_its_paragraph() {
    let flat = markdown_to_runs("- one\n\n- two\n");
    let ids: Vec<usize> = flat.runs.iter().map(|r| r.paragraph_id).collect();
    // Item id, then the paragraph inside it.
    assert_eq!(ids, vec![2, 4]);
    assert!(flat.runs.iter().all(|r| r.indentation_level == 1));
}

#[test]
fn test_hard_break_stays_in_paragraph() {
    let flat = markdown_to_runs("one\\\ntwo\n");
    assert_snapshot!(describe_runs(&flat.runs), @r#"
    "one\n"|1|0|1
    "two"|1|0|1
    "#);
}

#[test]
fn test_heading_and_code_are_reported_but_kept() {
    let flat = markdown_to_runs("# Title\n\nuse `x` here\n");

    let texts: Vec<&str> = flat.runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Title", "use ", "x", " here"]);

    let kinds: Vec<&str> = flat.diagnostics.iter().map(|d| d.kind.as_str()).collect();
    assert_eq!(kinds, vec!["heading", "code"]);
}

#[test]
fn test_link_text_flows_through() {
    let flat = markdown_to_runs("see [docs](https://example.com)\n");
    let texts: Vec<&str> = flat.runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["see ", "docs"]);
    assert_eq!(flat.diagnostics.len(), 1);
    assert_eq!(flat.diagnostics[0].kind, "link");
}

#[test]
fn test_format_trait_metadata() {
    assert_eq!(MarkdownFormat.name(), "markdown");
    assert_eq!(MarkdownFormat.file_extensions(), &["md", "markdown"]);
    assert!(MarkdownFormat.parse("").unwrap().children.is_empty());
}
