//! Dry-run backend that writes Slides `batchUpdate` bodies instead of sending them.

use super::Backend;
use crate::error::BackendError;
use crate::formats::slides::{encode_batch, SlidesOptions};
use crate::ir::ops::EditOp;
use std::io::Write;

/// Writes each applied batch as one JSON line (`{"requests":[...]}`) to `sink`.
pub struct SlidesRequestWriter<W: Write> {
    sink: W,
    options: SlidesOptions,
}

impl<W: Write> SlidesRequestWriter<W> {
    pub fn new(sink: W, options: SlidesOptions) -> Self {
        SlidesRequestWriter { sink, options }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Backend for SlidesRequestWriter<W> {
    fn name(&self) -> &str {
        "slides-writer"
    }

    fn apply(&mut self, container_id: &str, ops: &[EditOp]) -> Result<(), BackendError> {
        let body = encode_batch(container_id, ops, &self.options);
        serde_json::to_writer(&mut self.sink, &body)
            .map_err(|e| BackendError::Io(e.to_string()))?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}
