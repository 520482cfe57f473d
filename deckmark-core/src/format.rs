//! Format trait definition
//!
//! A format turns source text into the document tree the pipeline consumes. Parsing itself is
//! always delegated to the format's own library; implementations only map that library's AST
//! onto [`Node`](crate::ir::nodes::Node).

use crate::common::compile::StyleMode;
use crate::error::FormatError;
use crate::ir::nodes::Document;

/// Trait for source formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, FormatError> {
///         // Map the source onto the document tree
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "outline")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Which runs get a style update when the options leave it open.
    fn style_mode(&self) -> StyleMode {
        StyleMode::Emphasized
    }

    /// Parse source text into a document tree
    fn parse(&self, source: &str) -> Result<Document, FormatError>;
}
