//! Flat run sequence produced by the flattener.

use crate::style::StyleTag;
use serde::Serialize;

/// A contiguous span of text sharing one style and one nesting context.
///
/// Runs come out in reading order. `paragraph_id` never decreases along a sequence, and two runs
/// share it exactly when they belong to the same source paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub style: StyleTag,
    /// 0 is body text, 1 the first bullet level, 2 the nested level, and so on.
    pub indentation_level: usize,
    pub paragraph_id: usize,
}

impl StyledRun {
    pub fn new(
        text: impl Into<String>,
        style: StyleTag,
        indentation_level: usize,
        paragraph_id: usize,
    ) -> Self {
        StyledRun {
            text: text.into(),
            style,
            indentation_level,
            paragraph_id,
        }
    }

    pub fn is_list(&self) -> bool {
        self.indentation_level > 0
    }
}
