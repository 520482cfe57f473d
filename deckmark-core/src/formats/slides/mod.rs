//! Slides API request encoding
//!
//! Maps [`EditOp`]s onto the request bodies of the Slides `presentations.batchUpdate` call.
//! Offsets pass through unchanged, so they must already be in the unit the API indexes by
//! (see [`OffsetUnit`](crate::common::compile::OffsetUnit)).
//!
//! | Edit op                | Request                    |
//! |------------------------|----------------------------|
//! | `DeleteAll`            | `deleteText` (type `ALL`)  |
//! | `InsertText`           | `insertText`               |
//! | `SetStyle`             | `updateTextStyle`          |
//! | `SetBulletList`        | `createParagraphBullets`   |
//! | `SetParagraphIndent`   | `updateParagraphStyle`     |
//! | `Raw`                  | `{kind: payload}` verbatim |

use crate::ir::ops::EditOp;
use serde::Serialize;
use std::ops::Range;

pub const DEFAULT_BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";

/// Encoding settings that are not part of the edit ops themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidesOptions {
    pub bullet_preset: String,
}

impl Default for SlidesOptions {
    fn default() -> Self {
        SlidesOptions {
            bullet_preset: DEFAULT_BULLET_PRESET.to_string(),
        }
    }
}

/// One entry of a `batchUpdate` request list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Request {
    Known(KnownRequest),
    Raw(serde_json::Map<String, serde_json::Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KnownRequest {
    DeleteText(DeleteText),
    InsertText(InsertText),
    UpdateTextStyle(UpdateTextStyle),
    CreateParagraphBullets(CreateParagraphBullets),
    UpdateParagraphStyle(UpdateParagraphStyle),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteText {
    pub object_id: String,
    pub text_range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    pub object_id: String,
    pub insertion_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub object_id: String,
    pub text_range: TextRange,
    pub style: TextStyle,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub object_id: String,
    pub text_range: TextRange,
    pub bullet_preset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyle {
    pub object_id: String,
    pub text_range: TextRange,
    pub style: ParagraphStyle,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextRange {
    All,
    #[serde(rename_all = "camelCase")]
    FixedRange {
        start_index: usize,
        end_index: usize,
    },
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        TextRange::FixedRange {
            start_index: range.start,
            end_index: range.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub indent_first_line: Dimension,
    pub indent_start: Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: &'static str,
}

impl Dimension {
    pub fn pt(magnitude: f64) -> Self {
        Dimension {
            magnitude,
            unit: "PT",
        }
    }
}

/// Body of one `batchUpdate` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchUpdate {
    pub requests: Vec<Request>,
}

/// Encodes a single op addressed to `container_id`.
pub fn encode(container_id: &str, op: &EditOp, options: &SlidesOptions) -> Request {
    let object_id = container_id.to_string();
    let known = match op {
        EditOp::DeleteAll => KnownRequest::DeleteText(DeleteText {
            object_id,
            text_range: TextRange::All,
        }),
        EditOp::InsertText { at, text } => KnownRequest::InsertText(InsertText {
            object_id,
            insertion_index: *at,
            text: text.clone(),
        }),
        EditOp::SetStyle {
            range,
            bold,
            italic,
        } => KnownRequest::UpdateTextStyle(UpdateTextStyle {
            object_id,
            text_range: range.clone().into(),
            style: TextStyle {
                bold: *bold,
                italic: *italic,
            },
            fields: "bold,italic".to_string(),
        }),
        EditOp::SetBulletList { range } => {
            KnownRequest::CreateParagraphBullets(CreateParagraphBullets {
                object_id,
                text_range: range.clone().into(),
                bullet_preset: options.bullet_preset.clone(),
            })
        }
        EditOp::SetParagraphIndent {
            range,
            first_line_indent,
            body_indent,
        } => KnownRequest::UpdateParagraphStyle(UpdateParagraphStyle {
            object_id,
            text_range: range.clone().into(),
            style: ParagraphStyle {
                indent_first_line: Dimension::pt(*first_line_indent),
                indent_start: Dimension::pt(*body_indent),
            },
            fields: "indentStart,indentFirstLine".to_string(),
        }),
        EditOp::Raw { kind, payload } => {
            let mut raw = serde_json::Map::new();
            raw.insert(kind.clone(), payload.clone());
            return Request::Raw(raw);
        }
    };
    Request::Known(known)
}

/// Encodes a batch of ops as one `batchUpdate` body.
pub fn encode_batch(container_id: &str, ops: &[EditOp], options: &SlidesOptions) -> BatchUpdate {
    BatchUpdate {
        requests: ops
            .iter()
            .map(|op| encode(container_id, op, options))
            .collect(),
    }
}
