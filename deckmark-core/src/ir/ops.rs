//! Edit operations against a remote, append-only text buffer.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One instruction for the text-buffer backend.
///
/// Offsets are absolute character positions in the target buffer as it stands right before the
/// operation runs. Inserts only ever append, so no range ends past what has been inserted so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Clears everything in the container. Only used when replacing existing content.
    DeleteAll,
    InsertText {
        at: usize,
        text: String,
    },
    SetStyle {
        range: Range<usize>,
        bold: bool,
        italic: bool,
    },
    SetBulletList {
        range: Range<usize>,
    },
    /// Indents are in points.
    SetParagraphIndent {
        range: Range<usize>,
        first_line_indent: f64,
        body_indent: f64,
    },
    /// A backend request passed through untouched.
    Raw {
        kind: String,
        payload: serde_json::Value,
    },
}

impl EditOp {
    /// Apply-order priority: deletes, then inserts, then styles, then paragraph-level ops.
    pub fn priority(&self) -> u8 {
        match self {
            EditOp::DeleteAll => 0,
            EditOp::InsertText { .. } => 1,
            EditOp::SetStyle { .. } => 2,
            EditOp::SetBulletList { .. } | EditOp::SetParagraphIndent { .. } => 3,
            EditOp::Raw { .. } => 4,
        }
    }

    /// The character range the operation addresses, if it addresses one.
    pub fn range(&self) -> Option<Range<usize>> {
        match self {
            EditOp::SetStyle { range, .. }
            | EditOp::SetBulletList { range }
            | EditOp::SetParagraphIndent { range, .. } => Some(range.clone()),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            EditOp::DeleteAll => "delete_all",
            EditOp::InsertText { .. } => "insert_text",
            EditOp::SetStyle { .. } => "set_style",
            EditOp::SetBulletList { .. } => "set_bullet_list",
            EditOp::SetParagraphIndent { .. } => "set_paragraph_indent",
            EditOp::Raw { kind, .. } => kind,
        }
    }
}
