//! Markdown format implementation
//!
//! Markdown is parsed with `comrak` and mapped onto the document tree. The mapping is
//! deliberately narrow; only the kinds the flattener understands are mapped to dedicated nodes.
//!
//! # Element Mapping Table
//!
//! | Markdown                 | Tree node                | Notes                                       |
//! |--------------------------|--------------------------|---------------------------------------------|
//! | Paragraph                | `Paragraph`              | `TextBlock` inside a tight list item        |
//! | List (- or 1.)           | `List`                   | Ordered flag kept                           |
//! | List item                | `ListItem`               |                                             |
//! | *italic* / _italic_      | `Emphasis { level: 1 }`  |                                             |
//! | **bold** / __bold__      | `Emphasis { level: 2 }`  |                                             |
//! | Text                     | `Text`                   |                                             |
//! | Soft break               | `Text(" ")`              |                                             |
//! | Hard break               | `hard_line_break` flag   | Set on the preceding text leaf              |
//! | Heading                  | `Other` → `Paragraph`    | Text kept as its own paragraph, warned      |
//! | Code span / code block   | `Other` → text           | Literal kept, warned                        |
//! | Anything else            | `Other`                  | Children kept, warned                       |
//!
//! # Tight Lists
//!
//! comrak wraps the text of every list item in a paragraph, tight or not. In a tight list that
//! paragraph is mapped to a `TextBlock` so each item owns exactly one paragraph id.

pub mod parser;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_markdown(source))
    }
}
