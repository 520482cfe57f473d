//! Intermediate representations shared by the pipeline stages.
//!
//! markdown → [`nodes::Document`] → [`runs::StyledRun`] sequence → [`ops::EditOp`] list.

pub mod nodes;
pub mod ops;
pub mod runs;
