//! Invariants of the compiler and scheduler over arbitrary run sequences.

use deckmark_core::backend::{dispatch, MemoryBackend};
use deckmark_core::common::compile::{compile, CompileOptions, OffsetUnit, StyleMode};
use deckmark_core::common::schedule::schedule;
use deckmark_core::ir::ops::EditOp;
use deckmark_core::ir::runs::StyledRun;
use deckmark_core::style::StyleTag;
use proptest::prelude::*;

/// Runs with non-decreasing paragraph ids, as the flattener produces them.
fn runs_strategy() -> impl Strategy<Value = Vec<StyledRun>> {
    prop::collection::vec(
        (any::<bool>(), "[a-zé ]{0,4}", 0u8..8, 0usize..5),
        0..24,
    )
    .prop_map(|specs| {
        let mut paragraph_id = 1;
        specs
            .into_iter()
            .map(|(new_paragraph, text, style, level)| {
                if new_paragraph {
                    paragraph_id += 1;
                }
                StyledRun::new(text, StyleTag::from_byte(style), level, paragraph_id)
            })
            .collect()
    })
}

fn options_strategy() -> impl Strategy<Value = CompileOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(explicit, indent, utf16)| {
        CompileOptions {
            style_mode: Some(if explicit {
                StyleMode::Explicit
            } else {
                StyleMode::Emphasized
            }),
            paragraph_indent: indent,
            offset_unit: if utf16 {
                OffsetUnit::Utf16
            } else {
                OffsetUnit::CodePoints
            },
        }
    })
}

fn inserts(ops: &[EditOp]) -> Vec<(usize, &str)> {
    ops.iter()
        .filter_map(|op| match op {
            EditOp::InsertText { at, text } => Some((*at, text.as_str())),
            _ => None,
        })
        .collect()
}

/// Number of maximal stretches of consecutive list runs.
fn list_stretches(runs: &[StyledRun]) -> usize {
    let mut count = 0;
    let mut in_list = false;
    for run in runs {
        if run.is_list() && !in_list {
            count += 1;
        }
        in_list = run.is_list();
    }
    count
}

proptest! {
    #[test]
    fn insert_offsets_are_prefix_sums(runs in runs_strategy(), options in options_strategy()) {
        let compilation = compile(&runs, &options);
        let mut expected = 0;
        for (at, text) in inserts(&compilation.ops) {
            prop_assert_eq!(at, expected);
            expected += options.offset_unit.measure(text);
        }
        prop_assert_eq!(compilation.cursor, expected);
    }

    #[test]
    fn every_run_is_inserted_once(runs in runs_strategy()) {
        let compilation = compile(&runs, &CompileOptions::default());
        let inserted = inserts(&compilation.ops);
        prop_assert_eq!(inserted.len(), runs.len());
        for (run, (_, text)) in runs.iter().zip(inserted) {
            prop_assert!(text.trim_start_matches('\t').starts_with(run.text.as_str()));
        }
    }

    #[test]
    fn ranges_stay_inside_the_buffer(runs in runs_strategy(), options in options_strategy()) {
        let compilation = compile(&runs, &options);
        for op in &compilation.ops {
            if let Some(range) = op.range() {
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= compilation.cursor);
            }
        }
    }

    #[test]
    fn bullet_ranges_close_once_and_never_overlap(runs in runs_strategy()) {
        let compilation = compile(&runs, &CompileOptions::default());
        let bullets: Vec<_> = compilation
            .ops
            .iter()
            .filter_map(|op| match op {
                EditOp::SetBulletList { range } => Some(range.clone()),
                _ => None,
            })
            .collect();

        prop_assert_eq!(bullets.len(), list_stretches(&runs));
        for pair in bullets.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn schedule_orders_by_priority_and_is_stable(runs in runs_strategy(), options in options_strategy()) {
        let ops = compile(&runs, &options).ops;
        let scheduled = schedule(ops.clone());

        prop_assert_eq!(scheduled.len(), ops.len());
        for pair in scheduled.windows(2) {
            prop_assert!(pair[0].priority() <= pair[1].priority());
        }
        for priority in 0..=4u8 {
            let before: Vec<&EditOp> = ops.iter().filter(|op| op.priority() == priority).collect();
            let after: Vec<&EditOp> = scheduled.iter().filter(|op| op.priority() == priority).collect();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn memory_backend_accepts_scheduled_ops(runs in runs_strategy()) {
        let compilation = compile(&runs, &CompileOptions::default());
        let ops = schedule(compilation.ops);
        let mut backend = MemoryBackend::with_container("box");

        prop_assert!(dispatch(&mut backend, "box", &ops, 3).is_ok());
        let buffer = backend.buffer("box").unwrap();
        prop_assert_eq!(buffer.len(), compilation.cursor);
    }
}
