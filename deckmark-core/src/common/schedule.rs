//! Orders compiled operations for the backend and splits them into batches.
//!
//! The backend needs deletes before inserts, inserts before styles, and styles before
//! paragraph-level operations. Within a priority the compiler's order is kept: inserts must run
//! left to right for their offsets to hold. No offsets are recomputed here; everything is assumed
//! to be computed against an empty buffer, or one a leading `DeleteAll` just cleared.

use crate::ir::ops::EditOp;

/// Stable sort of `ops` by [`EditOp::priority`].
pub fn schedule(mut ops: Vec<EditOp>) -> Vec<EditOp> {
    ops.sort_by_key(EditOp::priority);
    ops
}

/// Splits an ordered op list into sequential batches of at most `size` ops.
///
/// A size of 0 means "everything in one batch". An empty list yields no batches.
pub fn batches(ops: &[EditOp], size: usize) -> Vec<&[EditOp]> {
    if ops.is_empty() {
        return Vec::new();
    }
    if size == 0 {
        return vec![ops];
    }
    ops.chunks(size).collect()
}
