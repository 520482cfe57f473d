//! Markdown parsing (Markdown → document tree)
//!
//! Pipeline: Markdown string → Comrak AST → document tree

use crate::ir::nodes::{Document, Node};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options as ComrakOptions};

/// Parse a Markdown string into a document tree
pub fn parse_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);
    Document::new(convert_children(root, false))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options
}

/// Converts the children of `node`. `in_tight_list` is true when `node` is a tight list or an
/// item of one.
fn convert_children<'a>(node: &'a AstNode<'a>, in_tight_list: bool) -> Vec<Node> {
    let mut out = Vec::new();
    for child in node.children() {
        if matches!(child.data.borrow().value, NodeValue::LineBreak) {
            match out.last_mut() {
                Some(Node::Text {
                    hard_line_break, ..
                }) => *hard_line_break = true,
                _ => out.push(Node::Text {
                    literal: String::new(),
                    hard_line_break: true,
                }),
            }
            continue;
        }
        out.push(convert_node(child, in_tight_list));
    }
    out
}

fn convert_node<'a>(node: &'a AstNode<'a>, in_tight_list: bool) -> Node {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Paragraph if in_tight_list => Node::TextBlock {
            children: convert_children(node, false),
        },
        NodeValue::Paragraph => Node::Paragraph {
            children: convert_children(node, false),
        },
        NodeValue::List(list) => Node::List {
            ordered: matches!(list.list_type, ListType::Ordered),
            children: convert_children(node, list.tight),
        },
        NodeValue::Item(_) => Node::ListItem {
            children: convert_children(node, in_tight_list),
        },
        NodeValue::Emph => Node::Emphasis {
            level: 1,
            children: convert_children(node, false),
        },
        NodeValue::Strong => Node::Emphasis {
            level: 2,
            children: convert_children(node, false),
        },
        NodeValue::Text(text) => Node::text(text.clone()),
        NodeValue::SoftBreak => Node::text(" "),
        NodeValue::LineBreak => Node::Text {
            literal: String::new(),
            hard_line_break: true,
        },
        NodeValue::Heading(_) => Node::Other {
            kind: "heading".to_string(),
            children: vec![Node::paragraph(convert_children(node, false))],
        },
        NodeValue::CodeBlock(code_block) => Node::Other {
            kind: "code_block".to_string(),
            children: vec![Node::paragraph(vec![Node::text(
                code_block.literal.trim_end_matches('\n'),
            )])],
        },
        NodeValue::Code(code) => Node::Other {
            kind: "code".to_string(),
            children: vec![Node::text(code.literal.clone())],
        },
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) | NodeValue::ThematicBreak => {
            Node::Other {
                kind: data.value.xml_node_name().to_string(),
                children: Vec::new(),
            }
        }
        other => Node::Other {
            kind: other.xml_node_name().to_string(),
            children: convert_children(node, false),
        },
    }
}
