//! Functional pipeline entry points
//!
//! Each function runs a prefix of the pipeline in one call so callers (the CLI, the deck
//! planner's tests, other tools) do not have to wire parse → flatten → compile → schedule by
//! hand.
//!
//! # Example
//!
//! ```ignore
//! use deckmark_core::transforms::compile_markdown;
//! use deckmark_core::common::compile::CompileOptions;
//!
//! let ops = compile_markdown("a **b** c", &CompileOptions::default());
//! assert_eq!(ops.len(), 4);
//! ```

use crate::common::compile::{compile, compile_replacement, CompileOptions};
use crate::common::flatten::{flatten, Flattened};
use crate::common::schedule::schedule;
use crate::error::FormatError;
use crate::formats::markdown::parser::parse_markdown;
use crate::ir::ops::EditOp;
use crate::registry::FormatRegistry;

/// Markdown source to styled runs.
pub fn markdown_to_runs(source: &str) -> Flattened {
    flatten(&parse_markdown(source))
}

/// Markdown source to scheduled ops against an empty buffer.
pub fn compile_markdown(source: &str, options: &CompileOptions) -> Vec<EditOp> {
    schedule(compile(&markdown_to_runs(source).runs, options).ops)
}

/// Source in any registered format to scheduled ops.
///
/// The format's own style mode applies unless `options` sets one. With `replace` set the ops
/// start by clearing the container.
pub fn compile_source(
    registry: &FormatRegistry,
    source: &str,
    format: &str,
    options: &CompileOptions,
    replace: bool,
) -> Result<Vec<EditOp>, FormatError> {
    let format = registry.get(format)?;
    let runs = flatten(&format.parse(source)?).runs;
    let options = CompileOptions {
        style_mode: options.style_mode.or(Some(format.style_mode())),
        ..options.clone()
    };
    let compilation = if replace {
        compile_replacement(&runs, &options)
    } else {
        compile(&runs, &options)
    };
    Ok(schedule(compilation.ops))
}
