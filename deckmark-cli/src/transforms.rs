//! CLI-specific transforms
//!
//! This module defines all the views available through `deckmark inspect`.
//! Each transform is a stage + format combination (e.g., "runs-simple", "ops-json").
//!
//! ## Transform Pipeline
//!
//! 1. **Parsing** - Source → document tree
//!    - `tree-json`: The tree as JSON
//!
//! 2. **Flattening** - Tree → styled runs
//!    - `runs-json`: Runs plus diagnostics as JSON
//!    - `runs-simple`: One line per run
//!
//! 3. **Compiling** - Runs → edit ops
//!    - `ops-json`: Ops in emission order
//!    - `ops-scheduled-json`: Ops in apply order
//!
//! 4. **Encoding** - Ops → Slides requests
//!    - `requests-json`: The `batchUpdate` body

use deckmark_core::common::compile::{compile, compile_replacement, CompileOptions};
use deckmark_core::common::flatten::flatten;
use deckmark_core::common::schedule::schedule;
use deckmark_core::formats::slides::{encode_batch, SlidesOptions};
use deckmark_core::ir::ops::EditOp;
use deckmark_core::ir::runs::StyledRun;
use deckmark_core::registry::FormatRegistry;
use serde::Serialize;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "tree-json",
    "runs-json",
    "runs-simple",
    "ops-json",
    "ops-scheduled-json",
    "requests-json",
];

pub const DEFAULT_TRANSFORM: &str = "runs-simple";

/// Everything a transform needs besides the source text.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// Source format name, as registered in the [`FormatRegistry`].
    pub format: String,
    pub compile: CompileOptions,
    pub slides: SlidesOptions,
    pub container_id: String,
    pub replace: bool,
}

impl Default for TransformContext {
    fn default() -> Self {
        TransformContext {
            format: "markdown".to_string(),
            compile: CompileOptions::default(),
            slides: SlidesOptions::default(),
            container_id: "body".to_string(),
            replace: false,
        }
    }
}

/// Execute a named transform on a source file
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("- a\n- b", "ops-json", &TransformContext::default())?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    context: &TransformContext,
) -> Result<String, String> {
    let registry = FormatRegistry::default();
    let format = registry
        .get(&context.format)
        .map_err(|e| format!("Transform failed: {e}"))?;
    let doc = format
        .parse(source)
        .map_err(|e| format!("Transform failed: {e}"))?;
    let options = CompileOptions {
        style_mode: context.compile.style_mode.or(Some(format.style_mode())),
        ..context.compile.clone()
    };

    if transform_name == "tree-json" {
        return to_json(&doc);
    }

    let flat = flatten(&doc);
    let ops = || compile_ops(&flat.runs, &options, context.replace);
    match transform_name {
        "runs-json" => to_json(&flat),
        "runs-simple" => Ok(runs_to_simple(&flat.runs)),
        "ops-json" => to_json(&ops()),
        "ops-scheduled-json" => to_json(&schedule(ops())),
        "requests-json" => {
            let ops = schedule(ops());
            to_json(&encode_batch(&context.container_id, &ops, &context.slides))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn compile_ops(runs: &[StyledRun], options: &CompileOptions, replace: bool) -> Vec<EditOp> {
    let compilation = if replace {
        compile_replacement(runs, options)
    } else {
        compile(runs, options)
    };
    compilation.ops
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| format!("JSON serialization failed: {e}"))
}

/// `P<paragraph> L<level> <style> "text"`, one run per line.
fn runs_to_simple(runs: &[StyledRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let decoded = run.style.decode();
        let style = match (decoded.bold, decoded.italic) {
            (true, true) => "bold+italic",
            (true, false) => "bold",
            (false, true) => "italic",
            (false, false) if decoded.normal => "normal",
            (false, false) => "-",
        };
        out.push_str(&format!(
            "P{} L{} {} {:?}\n",
            run.paragraph_id, run.indentation_level, style, run.text
        ));
    }
    out
}
