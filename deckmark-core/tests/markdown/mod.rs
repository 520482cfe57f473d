//! Markdown format tests
//!
//! Markdown → document tree → styled runs.

mod import;
