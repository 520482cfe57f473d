//! Outline format through the whole pipeline.

use crate::common::{describe, CONTAINER};
use deckmark_core::backend::{dispatch, MemoryBackend};
use deckmark_core::common::compile::CompileOptions;
use deckmark_core::registry::FormatRegistry;
use deckmark_core::transforms::compile_source;
use insta::assert_snapshot;

fn outline_ops(source: &str) -> Vec<deckmark_core::ir::ops::EditOp> {
    let registry = FormatRegistry::default();
    compile_source(
        &registry,
        source,
        "outline",
        &CompileOptions::default(),
        false,
    )
    .unwrap()
}

#[test]
fn test_outline_compiles_like_markdown_lists() {
    let ops = outline_ops("Intro **now**\n- one\n  - two\n");
    assert_snapshot!(describe(&ops), @r#"
    insert_text 0 "Intro "
    insert_text 6 "now\n"
    insert_text 10 "one\n"
    insert_text 14 "\ttwo"
    set_style 0..6 bold=false italic=false
    set_style 6..10 bold=true italic=false
    set_style 10..14 bold=false italic=false
    set_style 14..18 bold=false italic=false
    set_bullet_list 10..17
    "#);
}

#[test]
fn test_outline_applies_to_memory() {
    let ops = outline_ops("Intro **now**\n- one\n  - two\n");
    let mut backend = MemoryBackend::with_container(CONTAINER);
    dispatch(&mut backend, CONTAINER, &ops, 2).unwrap();

    let buffer = backend.buffer(CONTAINER).unwrap();
    assert_snapshot!(buffer.render_outline(), @r"
    Intro **now**
    - one
      - two
    ");
}
