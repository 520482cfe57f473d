//! Format implementations
//!
//! Source formats (`markdown`, `outline`) parse text into the document tree; `slides` encodes
//! edit ops for the Slides API.

pub mod markdown;
pub mod outline;
pub mod slides;

pub use markdown::MarkdownFormat;
pub use outline::OutlineFormat;
