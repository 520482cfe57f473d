//! Flattens a document tree into a sequence of styled runs.
//!
//! # The High-Level Concept
//!
//! The compiler downstream only understands a flat list of text spans, each tagged with the
//! style, list depth and paragraph it belongs to. Walking the tree depth-first in reading order
//! and emitting one run per text leaf gives exactly that, as long as the walk carries the
//! surrounding style and depth down to the leaves.
//!
//! # The Algorithm
//!
//! 1. **Initialization:**
//!    - Start with an empty run list and a paragraph counter at 0
//!    - The root context is Normal style, level 0, paragraph 0
//!
//! 2. **Entering Containers:**
//!    - Paragraphs and list items take the next paragraph id from the counter
//!    - List items also deepen the indentation level, for their subtree only
//!    - Emphasis adds italic (level 1) or bold (level 2) for its subtree only
//!
//! 3. **Handling Leaves:**
//!    - Each text node becomes one run with the current context, plus `"\n"` on a hard break
//!
//! 4. **Unknown Nodes:**
//!    - Reported as a [`Diagnostic`] (and logged), then walked through for their children
//!
//! The context is a small `Copy` value handed down by value, so a sibling subtree can never see
//! a style or level change made inside another one. The paragraph counter is the only thing that
//! flows across siblings, and it lives in the walker owned by a single [`flatten`] call.

use crate::ir::nodes::{Document, Node};
use crate::ir::runs::StyledRun;
use crate::style::StyleTag;
use serde::Serialize;

/// Non-fatal report about a node the flattener could not represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: String,
    pub paragraph_id: usize,
    pub message: String,
}

/// Runs produced from a document, plus anything worth telling the caller about.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Flattened {
    pub runs: Vec<StyledRun>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy)]
struct Context {
    style: StyleTag,
    level: usize,
    paragraph_id: usize,
}

impl Context {
    fn root() -> Self {
        Context {
            style: StyleTag::encode(false, false),
            level: 0,
            paragraph_id: 0,
        }
    }
}

#[derive(Default)]
struct Walker {
    last_paragraph_id: usize,
    out: Flattened,
}

impl Walker {
    fn next_paragraph_id(&mut self) -> usize {
        self.last_paragraph_id += 1;
        self.last_paragraph_id
    }

    fn walk(&mut self, node: &Node, ctx: Context) {
        match node {
            Node::Paragraph { children } => {
                let ctx = Context {
                    paragraph_id: self.next_paragraph_id(),
                    ..ctx
                };
                self.walk_children(children, ctx);
            }
            Node::ListItem { children } => {
                let ctx = Context {
                    level: ctx.level + 1,
                    paragraph_id: self.next_paragraph_id(),
                    ..ctx
                };
                self.walk_children(children, ctx);
            }
            Node::TextBlock { children } | Node::List { children, .. } => {
                self.walk_children(children, ctx);
            }
            Node::Emphasis { level, children } => {
                let style = match level {
                    1 => ctx.style.with_emphasis(false, true),
                    2 => ctx.style.with_emphasis(true, false),
                    _ => {
                        self.report(node, ctx, format!("emphasis level {level} has no style"));
                        ctx.style
                    }
                };
                self.walk_children(children, Context { style, ..ctx });
            }
            Node::Text {
                literal,
                hard_line_break,
            } => {
                let mut text = literal.clone();
                if *hard_line_break {
                    text.push('\n');
                }
                self.out.runs.push(StyledRun {
                    text,
                    style: ctx.style,
                    indentation_level: ctx.level,
                    paragraph_id: ctx.paragraph_id,
                });
            }
            Node::Other { kind, children } => {
                self.report(
                    node,
                    ctx,
                    format!("node kind {kind} may not be rendered correctly"),
                );
                self.walk_children(children, ctx);
            }
        }
    }

    fn walk_children(&mut self, children: &[Node], ctx: Context) {
        for child in children {
            self.walk(child, ctx);
        }
    }

    fn report(&mut self, node: &Node, ctx: Context, message: String) {
        tracing::warn!(kind = node.kind_name(), paragraph = ctx.paragraph_id, "{message}");
        self.out.diagnostics.push(Diagnostic {
            kind: node.kind_name().to_string(),
            paragraph_id: ctx.paragraph_id,
            message,
        });
    }
}

/// Flattens `document` into styled runs in reading order.
pub fn flatten(document: &Document) -> Flattened {
    let mut walker = Walker::default();
    walker.walk_children(&document.children, Context::root());
    walker.out
}
