//! The passes between a parsed document and an ordered edit list.
//!
//! [`flatten`] turns the tree into runs, [`compile`] turns runs into positioned edits, and
//! [`schedule`] puts the edits in the order the backend needs.

pub mod compile;
pub mod flatten;
pub mod schedule;
