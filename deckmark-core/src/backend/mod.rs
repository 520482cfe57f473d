//! Backends that execute edit operations against a text container.
//!
//! The compiler only ever produces an ordered op list; a [`Backend`] is whatever applies it.
//! [`dispatch`] is the one place that talks to a backend: it splits the list into sequential
//! batches, applies them in order, and stops at the first batch that fails.
//!
//! A failed batch is never retried. Re-applying `DeleteAll` and inserts against a buffer that
//! already took part of the batch would duplicate content, so the error goes back to the caller
//! together with how far the dispatch got.

pub mod memory;
pub mod slides;

pub use memory::MemoryBackend;
pub use slides::SlidesRequestWriter;

use crate::common::schedule::batches;
use crate::error::{BackendError, DispatchError};
use crate::ir::ops::EditOp;

/// Executes ordered edit ops against a named container.
pub trait Backend {
    fn name(&self) -> &str;

    /// Applies `ops` in order as one logical batch.
    ///
    /// No atomicity is required: on error, ops before the failing one may already be applied.
    fn apply(&mut self, container_id: &str, ops: &[EditOp]) -> Result<(), BackendError>;
}

/// What a successful [`dispatch`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatched {
    pub batches: usize,
    pub ops: usize,
}

/// Applies `ops` to `container_id` in batches of `batch_size` (0 means a single batch).
///
/// `ops` must already be scheduled.
pub fn dispatch<B: Backend + ?Sized>(
    backend: &mut B,
    container_id: &str,
    ops: &[EditOp],
    batch_size: usize,
) -> Result<Dispatched, DispatchError> {
    let mut done = Dispatched::default();
    for (index, batch) in batches(ops, batch_size).into_iter().enumerate() {
        if let Err(source) = backend.apply(container_id, batch) {
            tracing::error!(
                backend = backend.name(),
                container = container_id,
                batch = index,
                applied_ops = done.ops,
                error = %source,
                "batch failed"
            );
            return Err(DispatchError {
                batch: index,
                applied_ops: done.ops,
                source,
            });
        }
        done.batches += 1;
        done.ops += batch.len();
        tracing::debug!(
            backend = backend.name(),
            container = container_id,
            batch = index,
            ops = batch.len(),
            "batch applied"
        );
    }
    Ok(done)
}
