//! Error types for the pipeline boundaries
//!
//! Flattening, compiling and scheduling are total and never fail. Errors only come from
//! looking up formats, reading structured input, and the backend.

use thiserror::Error;

/// Errors from format lookup and parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
}

/// Error reported by a backend while applying a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("container '{0}' does not exist")]
    UnknownContainer(String),
    #[error("{op}: range {start}..{end} is outside the buffer (length {len})")]
    RangeOutOfBounds {
        op: String,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io(err.to_string())
    }
}

/// A dispatch stopped at a failed batch. Earlier batches stay applied.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("batch {batch} failed after {applied_ops} ops were applied: {source}")]
pub struct DispatchError {
    pub batch: usize,
    pub applied_ops: usize,
    #[source]
    pub source: BackendError,
}

/// Errors while planning the edits for a slide.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("slide {slide}: no {role} placeholder")]
    MissingPlaceholder { slide: usize, role: &'static str },
    #[error("cover: no {0} placeholder")]
    MissingCoverPlaceholder(&'static str),
    #[error("invalid presentation: {0}")]
    InvalidPresentation(String),
}
