//! End-to-end scenarios: markdown → scheduled ops → memory backend.

use crate::common::{apply_markdown, describe};
use deckmark_core::common::compile::{CompileOptions, OffsetUnit, StyleMode};
use deckmark_core::ir::ops::EditOp;
use deckmark_core::transforms::compile_markdown;
use insta::assert_snapshot;

#[test]
fn plain_paragraph_is_a_single_insert() {
    let ops = compile_markdown("just some words", &CompileOptions::default());
    assert_eq!(
        ops,
        vec![EditOp::InsertText {
            at: 0,
            text: "just some words".to_string()
        }]
    );
}

#[test]
fn bold_word_in_paragraph() {
    let ops = compile_markdown("a **b** c", &CompileOptions::default());
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "a "
    insert_text 2 "b"
    insert_text 3 " c"
    set_style 2..3 bold=true italic=false
    "#);

    let buffer = apply_markdown("a **b** c", &CompileOptions::default());
    assert_eq!(buffer.text(), "a b c");
    assert_eq!(buffer.style_at(2), Some((true, false)));
    assert_eq!(buffer.style_at(3), Some((false, false)));
}

#[test]
fn two_item_list_is_one_bullet_range() {
    let ops = compile_markdown("- x\n- y", &CompileOptions::default());
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "x\n"
    insert_text 2 "y"
    set_bullet_list 0..3
    "#);

    let buffer = apply_markdown("- x\n- y", &CompileOptions::default());
    assert_eq!(buffer.bullet_ranges(), vec![0..3]);
    assert_snapshot!(buffer.render_outline(), @r"
    - x
    - y
    ");
}

#[test]
fn nested_item_gets_one_tab_left_out_of_the_range() {
    let ops = compile_markdown("- a\n  - b", &CompileOptions::default());
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "a\n"
    insert_text 2 "\tb"
    set_bullet_list 0..4
    "#);

    let buffer = apply_markdown("- a\n  - b", &CompileOptions::default());
    let levels: Vec<Option<usize>> = buffer.paragraphs().iter().map(|p| p.bullet).collect();
    assert_eq!(levels, vec![Some(0), Some(1)]);
}

#[test]
fn short_item_after_nested_one_stays_bulleted() {
    let ops = compile_markdown("- a\n  - b\n- c", &CompileOptions::default());
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "a\n"
    insert_text 2 "\tb\n"
    insert_text 5 "c"
    set_bullet_list 0..5
    "#);

    let buffer = apply_markdown("- a\n  - b\n- c", &CompileOptions::default());
    assert_snapshot!(buffer.render_outline(), @r"
    - a
      - b
    - c
    ");
}

#[test]
fn nested_siblings_are_all_bulleted() {
    let source = "- a\n  - b\n  - c\n  - d\n- e";
    let buffer = apply_markdown(source, &CompileOptions::default());
    let levels: Vec<Option<usize>> = buffer.paragraphs().iter().map(|p| p.bullet).collect();
    assert_eq!(levels, vec![Some(0), Some(1), Some(1), Some(1), Some(0)]);
    assert_eq!(buffer.bullet_ranges(), vec![0..buffer.len()]);
}

#[test]
fn list_between_paragraphs() {
    let source = "Intro with *style*\n\n- first\n- second **bold**\n\nOutro";
    let buffer = apply_markdown(source, &CompileOptions::default());
    assert_snapshot!(buffer.render_outline(), @r"
    Intro with *style*
    - first
    - second **bold**
    Outro
    ");
}

#[test]
fn explicit_style_mode_resets_plain_runs() {
    let options = CompileOptions {
        style_mode: Some(StyleMode::Explicit),
        ..Default::default()
    };
    let ops = compile_markdown("a *b*", &options);
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "a "
    insert_text 2 "b"
    set_style 0..2 bold=false italic=false
    set_style 2..3 bold=false italic=true
    "#);
}

#[test]
fn paragraph_indents_follow_levels() {
    let options = CompileOptions {
        paragraph_indent: true,
        ..Default::default()
    };
    let ops = compile_markdown("- a\n  - b", &options);
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "a\n"
    insert_text 2 "\tb"
    set_paragraph_indent 0..2 18/36
    set_paragraph_indent 2..5 54/72
    set_bullet_list 0..4
    "#);

    let buffer = apply_markdown("- a\n  - b", &options);
    let indents: Vec<Option<(f64, f64)>> =
        buffer.paragraphs().iter().map(|p| p.indent).collect();
    assert_eq!(indents, vec![Some((18.0, 36.0)), Some((54.0, 72.0))]);
}

#[test]
fn utf16_offsets_count_surrogate_pairs() {
    let options = CompileOptions {
        offset_unit: OffsetUnit::Utf16,
        ..Default::default()
    };
    let ops = compile_markdown("🎉 **go**", &options);
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "🎉 "
    insert_text 3 "go"
    set_style 3..5 bold=true italic=false
    "#);
}

#[test]
fn replacing_clears_first() {
    use deckmark_core::registry::FormatRegistry;
    use deckmark_core::transforms::compile_source;

    let ops = compile_source(
        &FormatRegistry::default(),
        "new",
        "markdown",
        &CompileOptions::default(),
        true,
    )
    .unwrap();
    assert_snapshot!(describe(&ops), @r#"
    delete_all
    insert_text 0 "new"
    "#);
}
