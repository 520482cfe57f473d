//! Compiles a styled-run sequence into positioned edit operations.
//!
//! # The High-Level Concept
//!
//! The target is a single text box that starts empty and only ever grows at its end. Every run
//! therefore lands at the current end of the buffer, and every range we hand out afterwards is
//! expressed in absolute offsets of that growing buffer. A running `cursor` (characters committed
//! so far) is all the state needed to place inserts and styles. Lists need a little more: a
//! bullet range spans several runs, so it is opened on the first list run and closed when the
//! text returns to body level or the document ends.
//!
//! # The Algorithm
//!
//! For each run `i`, in order:
//!
//! 1. **Indentation marker:** a run that starts a paragraph at level `L ≥ 2` is prefixed with
//!    `L - 1` tab characters. The bullet renderer turns leading tabs into nesting, so this is how
//!    second-level bullets are produced. The tabs are counted against the open list.
//! 2. **Paragraph separator:** when run `i + 1` exists and belongs to another paragraph, `"\n"`
//!    is appended. Paragraphs are separated exactly once and the last run gets nothing.
//! 3. **Insert:** `InsertText` at `cursor`; `cursor` advances by the text length.
//! 4. **Style:** `SetStyle` over `[start, end)` according to [`StyleMode`].
//! 5. **Indent (optional):** `SetParagraphIndent` over the run for list runs.
//! 6. **List bracketing:** a list run opens a list if none is open and moves the list end to
//!    `end - tabs`. A body run, or the last run, closes the open list with one `SetBulletList`
//!    and its tab count goes with it.
//!
//! The bullet range starts at the raw offset of the list's first char, and its length counts
//! visible chars only: every marker tab of the list, at any depth, is left out. Backends read
//! leading tabs as nesting markers rather than text (see [`crate::backend::memory`]).

use crate::ir::ops::EditOp;
use crate::ir::runs::StyledRun;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// When a run gets a `SetStyle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleMode {
    /// Only bold or italic runs are styled.
    #[default]
    Emphasized,
    /// Every run with a tag is styled, explicit Normal included. Untagged runs still are not.
    Explicit,
}

/// Unit in which offsets are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    /// Unicode scalar values.
    #[default]
    CodePoints,
    /// UTF-16 code units, as indexed by the Slides API.
    Utf16,
}

impl OffsetUnit {
    pub fn measure(self, text: &str) -> usize {
        match self {
            OffsetUnit::CodePoints => text.chars().count(),
            OffsetUnit::Utf16 => text.encode_utf16().count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOptions {
    /// `None` leaves the choice to the source format (see [`crate::format::Format::style_mode`]);
    /// compiling runs directly then means [`StyleMode::Emphasized`].
    pub style_mode: Option<StyleMode>,
    pub paragraph_indent: bool,
    pub offset_unit: OffsetUnit,
}

/// The compiled operation list and the final cursor (total characters inserted).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
    pub ops: Vec<EditOp>,
    pub cursor: usize,
}

/// First-line and body indent, in points, for a list level.
pub fn indent_for_level(level: usize) -> (f64, f64) {
    match level {
        1 => (18.0, 36.0),
        2 => (54.0, 72.0),
        _ => (0.0, level as f64 * 36.0),
    }
}

/// Number of tab markers a paragraph at `level` starts with.
fn marker_tabs(level: usize) -> usize {
    level.saturating_sub(1)
}

#[derive(Debug)]
struct OpenList {
    start: usize,
    end: usize,
    /// Marker tabs inserted since the list opened.
    tabs: usize,
}

struct Compiler<'a> {
    options: &'a CompileOptions,
    cursor: usize,
    open_list: Option<OpenList>,
    ops: Vec<EditOp>,
}

impl<'a> Compiler<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Compiler {
            options,
            cursor: 0,
            open_list: None,
            ops: Vec::new(),
        }
    }

    fn emit_run(&mut self, run: &StyledRun, prev: Option<&StyledRun>, next: Option<&StyledRun>) {
        let starts_paragraph = prev.map_or(true, |p| p.paragraph_id != run.paragraph_id);
        let tabs = if starts_paragraph {
            marker_tabs(run.indentation_level)
        } else {
            0
        };

        let mut text = "\t".repeat(tabs);
        text.push_str(&run.text);
        if next.is_some_and(|n| n.paragraph_id != run.paragraph_id) {
            text.push('\n');
        }

        let start = self.cursor;
        let end = start + self.options.offset_unit.measure(&text);
        self.ops.push(EditOp::InsertText { at: start, text });
        self.cursor = end;

        self.style(run, start, end);

        if self.options.paragraph_indent && run.is_list() {
            let (first_line_indent, body_indent) = indent_for_level(run.indentation_level);
            let range = self.checked_range(start, end);
            self.ops.push(EditOp::SetParagraphIndent {
                range,
                first_line_indent,
                body_indent,
            });
        }

        if run.is_list() {
            let list = self.open_list.get_or_insert_with(|| OpenList {
                start,
                end: start,
                tabs: 0,
            });
            list.tabs += tabs;
            list.end = end - list.tabs;
            if next.is_none() {
                self.close_list();
            }
        } else {
            self.close_list();
        }
    }

    fn style(&mut self, run: &StyledRun, start: usize, end: usize) {
        let decoded = run.style.decode();
        let wanted = match self.options.style_mode.unwrap_or_default() {
            StyleMode::Emphasized => decoded.is_emphasized(),
            StyleMode::Explicit => decoded.is_explicit(),
        };
        if wanted {
            let range = self.checked_range(start, end);
            self.ops.push(EditOp::SetStyle {
                range,
                bold: decoded.bold,
                italic: decoded.italic,
            });
        }
    }

    fn close_list(&mut self) {
        if let Some(list) = self.open_list.take() {
            let range = self.checked_range(list.start, list.end);
            self.ops.push(EditOp::SetBulletList { range });
        }
    }

    /// Every emitted range goes through here: `start <= end <= cursor` must hold.
    fn checked_range(&self, start: usize, end: usize) -> Range<usize> {
        debug_assert!(
            start <= end && end <= self.cursor,
            "range {start}..{end} escapes the buffer (cursor at {})",
            self.cursor
        );
        let end = end.min(self.cursor);
        start.min(end)..end
    }

    fn finish(mut self) -> Compilation {
        self.close_list();
        Compilation {
            ops: self.ops,
            cursor: self.cursor,
        }
    }
}

/// Compiles runs into edit operations against an empty buffer.
///
/// The result is in emission order; pass it through [`crate::common::schedule::schedule`]
/// before applying it.
pub fn compile(runs: &[StyledRun], options: &CompileOptions) -> Compilation {
    let mut compiler = Compiler::new(options);
    for (i, run) in runs.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| &runs[p]);
        compiler.emit_run(run, prev, runs.get(i + 1));
    }
    let compilation = compiler.finish();
    tracing::debug!(
        runs = runs.len(),
        ops = compilation.ops.len(),
        cursor = compilation.cursor,
        "compiled runs"
    );
    compilation
}

/// Compiles runs that replace whatever the buffer holds: a `DeleteAll` comes first.
pub fn compile_replacement(runs: &[StyledRun], options: &CompileOptions) -> Compilation {
    let mut compilation = compile(runs, options);
    compilation.ops.insert(0, EditOp::DeleteAll);
    compilation
}
