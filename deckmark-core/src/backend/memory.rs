//! In-memory text containers that execute edit ops the way the Slides API does.
//!
//! Offsets are in chars (Unicode scalar values), matching
//! [`OffsetUnit::CodePoints`](crate::common::compile::OffsetUnit). Paragraph-level ops
//! (bullets, indents) touch every paragraph that overlaps their range, newline included.
//!
//! Leading tabs are nesting markers. A bullet range starts at a raw offset but its length counts
//! visible chars, so the markers inside it do not shorten what it covers. A bulleted paragraph's
//! nesting level is its count of leading tabs. The remote strips those tabs when it creates the
//! bullets; here they stay in the text, so offsets of later ops in the same batch do not move.

use super::Backend;
use crate::error::BackendError;
use crate::ir::ops::EditOp;
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    bold: bool,
    italic: bool,
    bullet: bool,
    indent: Option<(f64, f64)>,
}

impl Cell {
    fn plain(ch: char) -> Self {
        Cell {
            ch,
            bold: false,
            italic: false,
            bullet: false,
            indent: None,
        }
    }
}

/// A paragraph of a [`Buffer`] as seen by a reader.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Char range, trailing newline included.
    pub range: Range<usize>,
    /// Text without the trailing newline.
    pub text: String,
    /// Nesting level when bulleted.
    pub bullet: Option<usize>,
    /// First-line and body indent in points.
    pub indent: Option<(f64, f64)>,
}

/// One text container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }

    /// Bold and italic flags of the char at `offset`.
    pub fn style_at(&self, offset: usize) -> Option<(bool, bool)> {
        self.cells.get(offset).map(|c| (c.bold, c.italic))
    }

    pub fn paragraphs(&self) -> Vec<Paragraph> {
        self.paragraph_ranges()
            .into_iter()
            .map(|range| {
                let cells = &self.cells[range.clone()];
                let first = cells[0];
                let text: String = cells.iter().map(|c| c.ch).filter(|&ch| ch != '\n').collect();
                let bullet = first
                    .bullet
                    .then(|| text.chars().take_while(|&ch| ch == '\t').count());
                Paragraph {
                    range,
                    text,
                    bullet,
                    indent: first.indent,
                }
            })
            .collect()
    }

    /// Merged char ranges of consecutive bulleted paragraphs.
    pub fn bullet_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for paragraph in self.paragraphs().into_iter().filter(|p| p.bullet.is_some()) {
            match ranges.last_mut() {
                Some(last) if last.end == paragraph.range.start => last.end = paragraph.range.end,
                _ => ranges.push(paragraph.range),
            }
        }
        ranges
    }

    /// Renders the buffer back as a markdown-like outline.
    ///
    /// Bulleted paragraphs become `- ` lines indented two spaces per nesting level, with their
    /// leading tabs dropped. Bold spans are wrapped in `**`, italic spans in `*`.
    pub fn render_outline(&self) -> String {
        let mut lines = Vec::new();
        for paragraph in self.paragraphs() {
            let mut cells = &self.cells[paragraph.range.clone()];
            if let Some(Cell { ch: '\n', .. }) = cells.last() {
                cells = &cells[..cells.len() - 1];
            }
            let mut line = String::new();
            if let Some(level) = paragraph.bullet {
                cells = &cells[level..];
                line.push_str(&"  ".repeat(level));
                line.push_str("- ");
            }
            line.push_str(&render_spans(cells));
            lines.push(line);
        }
        lines.join("\n")
    }

    fn paragraph_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.ch == '\n' {
                ranges.push(start..i + 1);
                start = i + 1;
            }
        }
        if start < self.cells.len() {
            ranges.push(start..self.cells.len());
        }
        ranges
    }

    fn check(&self, op: &EditOp, start: usize, end: usize) -> Result<(), BackendError> {
        if start > end || end > self.cells.len() {
            return Err(BackendError::RangeOutOfBounds {
                op: op.kind_name().to_string(),
                start,
                end,
                len: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Raw span starting at `range.start` that holds `range.len()` visible chars.
    fn visible_span(&self, range: &Range<usize>) -> Range<usize> {
        let mut remaining = range.len();
        let mut end = range.start;
        let mut line_start = end == 0 || self.cells[end - 1].ch == '\n';
        while remaining > 0 && end < self.cells.len() {
            let ch = self.cells[end].ch;
            end += 1;
            if line_start && ch == '\t' {
                continue;
            }
            line_start = ch == '\n';
            remaining -= 1;
        }
        range.start..end
    }

    /// Cells of every paragraph that overlaps `range`.
    fn paragraph_cells(&mut self, range: &Range<usize>) -> impl Iterator<Item = &mut Cell> {
        let span = self
            .paragraph_ranges()
            .into_iter()
            .filter(|p| p.start < range.end && range.start < p.end)
            .fold(None, |acc: Option<Range<usize>>, p| match acc {
                Some(acc) => Some(acc.start..p.end),
                None => Some(p),
            })
            .unwrap_or(0..0);
        self.cells[span].iter_mut()
    }

    fn apply(&mut self, op: &EditOp) -> Result<(), BackendError> {
        match op {
            EditOp::DeleteAll => self.cells.clear(),
            EditOp::InsertText { at, text } => {
                self.check(op, *at, *at)?;
                let inserted: Vec<Cell> = text.chars().map(Cell::plain).collect();
                self.cells.splice(*at..*at, inserted);
            }
            EditOp::SetStyle {
                range,
                bold,
                italic,
            } => {
                self.check(op, range.start, range.end)?;
                for cell in &mut self.cells[range.clone()] {
                    cell.bold = *bold;
                    cell.italic = *italic;
                }
            }
            EditOp::SetBulletList { range } => {
                self.check(op, range.start, range.end)?;
                let span = self.visible_span(range);
                for cell in self.paragraph_cells(&span) {
                    cell.bullet = true;
                }
            }
            EditOp::SetParagraphIndent {
                range,
                first_line_indent,
                body_indent,
            } => {
                self.check(op, range.start, range.end)?;
                let indent = Some((*first_line_indent, *body_indent));
                for cell in self.paragraph_cells(range) {
                    cell.indent = indent;
                }
            }
            EditOp::Raw { kind, .. } => {
                return Err(BackendError::Rejected(format!(
                    "raw request '{kind}' is not supported in memory"
                )));
            }
        }
        Ok(())
    }
}

fn render_spans(cells: &[Cell]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < cells.len() {
        let (bold, italic) = (cells[i].bold, cells[i].italic);
        let run_len = cells[i..]
            .iter()
            .take_while(|c| c.bold == bold && c.italic == italic)
            .count();
        let marker = match (bold, italic) {
            (true, true) => "***",
            (true, false) => "**",
            (false, true) => "*",
            (false, false) => "",
        };
        out.push_str(marker);
        out.extend(cells[i..i + run_len].iter().map(|c| c.ch));
        out.push_str(marker);
        i += run_len;
    }
    out
}

/// Backend keeping every container in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    containers: BTreeMap<String, Buffer>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend holding one empty container.
    pub fn with_container(container_id: &str) -> Self {
        let mut backend = Self::new();
        backend.create_container(container_id);
        backend
    }

    /// Adds an empty container. An existing one is left as it is.
    pub fn create_container(&mut self, container_id: &str) {
        self.containers
            .entry(container_id.to_string())
            .or_default();
    }

    pub fn buffer(&self, container_id: &str) -> Option<&Buffer> {
        self.containers.get(container_id)
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn apply(&mut self, container_id: &str, ops: &[EditOp]) -> Result<(), BackendError> {
        let buffer = self
            .containers
            .get_mut(container_id)
            .ok_or_else(|| BackendError::UnknownContainer(container_id.to_string()))?;
        ops.iter().try_for_each(|op| buffer.apply(op))
    }
}
