//! Shared helpers for the integration tests.

use deckmark_core::backend::memory::Buffer;
use deckmark_core::backend::{dispatch, MemoryBackend};
use deckmark_core::common::compile::CompileOptions;
use deckmark_core::ir::ops::EditOp;
use deckmark_core::ir::runs::StyledRun;
use deckmark_core::transforms::compile_markdown;

pub const CONTAINER: &str = "body";

/// One line per op, compact enough for inline snapshots.
pub fn describe(ops: &[EditOp]) -> String {
    ops.iter()
        .map(|op| match op {
            EditOp::DeleteAll => "delete_all".to_string(),
            EditOp::InsertText { at, text } => format!("insert_text {at} {text:?}"),
            EditOp::SetStyle {
                range,
                bold,
                italic,
            } => format!(
                "set_style {}..{} bold={bold} italic={italic}",
                range.start, range.end
            ),
            EditOp::SetBulletList { range } => {
                format!("set_bullet_list {}..{}", range.start, range.end)
            }
            EditOp::SetParagraphIndent {
                range,
                first_line_indent,
                body_indent,
            } => format!(
                "set_paragraph_indent {}..{} {first_line_indent}/{body_indent}",
                range.start, range.end
            ),
            EditOp::Raw { kind, .. } => format!("raw {kind}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `text|style|level|paragraph` per run.
pub fn describe_runs(runs: &[StyledRun]) -> String {
    runs.iter()
        .map(|r| {
            format!(
                "{:?}|{}|{}|{}",
                r.text,
                r.style.to_byte(),
                r.indentation_level,
                r.paragraph_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compiles markdown and applies it to a fresh in-memory container.
pub fn apply_markdown(source: &str, options: &CompileOptions) -> Buffer {
    let ops = compile_markdown(source, options);
    let mut backend = MemoryBackend::with_container(CONTAINER);
    dispatch(&mut backend, CONTAINER, &ops, 0).expect("memory backend accepts compiled ops");
    backend
        .buffer(CONTAINER)
        .expect("container exists")
        .clone()
}
