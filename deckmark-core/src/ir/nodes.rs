//! Document tree handed to the flattener.
//!
//! This is the narrow node-kind contract the rest of the pipeline depends on. Markdown parsers
//! map into it (see `formats::markdown`); anything they cannot express as one of the recognized
//! kinds is carried as [`Node::Other`] so its children still flow through.

use serde::Serialize;

/// A node of the parsed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Paragraph {
        children: Vec<Node>,
    },
    /// Inline container that does not start a paragraph (the body of a tight list item).
    TextBlock {
        children: Vec<Node>,
    },
    List {
        ordered: bool,
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    /// Level 1 is italic, level 2 is bold.
    Emphasis {
        level: u8,
        children: Vec<Node>,
    },
    Text {
        literal: String,
        hard_line_break: bool,
    },
    /// Any node kind the flattener does not recognize.
    Other {
        #[serde(rename = "other_kind")]
        kind: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(literal: impl Into<String>) -> Self {
        Node::Text {
            literal: literal.into(),
            hard_line_break: false,
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    pub fn italic(children: Vec<Node>) -> Self {
        Node::Emphasis { level: 1, children }
    }

    pub fn bold(children: Vec<Node>) -> Self {
        Node::Emphasis { level: 2, children }
    }

    pub fn bullet_list(items: Vec<Vec<Node>>) -> Self {
        Node::List {
            ordered: false,
            children: items
                .into_iter()
                .map(|children| Node::ListItem { children })
                .collect(),
        }
    }

    /// Name of the node kind, as used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::TextBlock { .. } => "text_block",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "list_item",
            Node::Emphasis { .. } => "emphasis",
            Node::Text { .. } => "text",
            Node::Other { kind, .. } => kind,
        }
    }
}

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }
}
