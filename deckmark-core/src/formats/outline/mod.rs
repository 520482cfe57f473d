//! Outline format implementation
//!
//! A plain-text outline where structure comes from line prefixes only:
//!
//! ```text
//! Intro line with **bold** words
//! - first point
//!   - nested point
//! ```
//!
//! Every non-blank line is one paragraph. `- ` opens a list item; each two spaces of leading
//! indentation before the dash go one level deeper. `**...**` spans are bold. An unclosed `**`
//! is kept as literal text.
//!
//! Outlines style every run explicitly: plain text gets `bold=false` so it resets whatever
//! style the target box had.

use crate::common::compile::StyleMode;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Document, Node};

/// Format implementation for line-based outlines
pub struct OutlineFormat;

impl Format for OutlineFormat {
    fn name(&self) -> &str {
        "outline"
    }

    fn description(&self) -> &str {
        "Line-based outline with dash bullets"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "outline"]
    }

    fn style_mode(&self) -> StyleMode {
        StyleMode::Explicit
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_outline(source))
    }
}

/// Parse an outline into a document tree
pub fn parse_outline(source: &str) -> Document {
    let mut children = Vec::new();
    for line in source.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (level, body) = split_marker(line);
        let inline = parse_inline(&collapse_whitespace(body));
        children.push(nest(level, inline));
    }
    Document::new(children)
}

/// Returns the list level of a line (0 for plain text) and the text after its marker.
fn split_marker(line: &str) -> (usize, &str) {
    let trimmed = line.trim_start_matches(' ');
    let indent = line.len() - trimmed.len();
    match trimmed.strip_prefix("- ") {
        Some(rest) => (indent / 2 + 1, rest),
        None => (0, line),
    }
}

fn nest(level: usize, inline: Vec<Node>) -> Node {
    if level == 0 {
        return Node::paragraph(inline);
    }
    let mut node = Node::bullet_list(vec![vec![Node::TextBlock { children: inline }]]);
    for _ in 1..level {
        node = Node::bullet_list(vec![vec![node]]);
    }
    node
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else {
            break;
        };
        if open > 0 {
            nodes.push(Node::text(&rest[..open]));
        }
        if close > 0 {
            nodes.push(Node::bold(vec![Node::text(&after[..close])]));
        }
        rest = &after[close + 2..];
    }
    if !rest.is_empty() {
        nodes.push(Node::text(rest));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::flatten::flatten;

    #[test]
    fn test_plain_lines_are_paragraphs() {
        let doc = parse_outline("first\n\nsecond\n");
        assert_eq!(
            doc.children,
            vec![
                Node::paragraph(vec![Node::text("first")]),
                Node::paragraph(vec![Node::text("second")]),
            ]
        );
    }

    #[test]
    fn test_bold_spans() {
        assert_eq!(
            parse_inline("a **b** c"),
            vec![
                Node::text("a "),
                Node::bold(vec![Node::text("b")]),
                Node::text(" c"),
            ]
        );
    }

    #[test]
    fn test_unclosed_bold_is_literal() {
        assert_eq!(parse_inline("a **b"), vec![Node::text("a **b")]);
    }

    #[test]
    fn test_whitespace_collapses() {
        let doc = parse_outline("a   \t b\n");
        assert_eq!(doc.children, vec![Node::paragraph(vec![Node::text("a b")])]);
    }

    #[test]
    fn test_dash_levels() {
        let doc = parse_outline("- one\n  - two\n    - three\nbody\n");
        let runs = flatten(&doc).runs;
        let levels: Vec<(&str, usize)> = runs
            .iter()
            .map(|r| (r.text.as_str(), r.indentation_level))
            .collect();
        assert_eq!(
            levels,
            vec![("one", 1), ("two", 2), ("three", 3), ("body", 0)]
        );
    }

    #[test]
    fn test_each_line_gets_its_own_paragraph() {
        let doc = parse_outline("- one\n  - two\n");
        let ids: Vec<usize> = flatten(&doc).runs.iter().map(|r| r.paragraph_id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
