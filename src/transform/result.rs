//! Transform results.

use super::{GridSnap, ScaleMode, Transform};
use crate::model::Canvas;
use serde::{Deserialize, Serialize};

/// Counters from one geometry transform pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Slides walked.
    pub slides: u32,

    /// Elements visited.
    pub elements: usize,

    /// Elements whose position was transformed.
    pub moved: usize,

    /// Elements whose size was transformed.
    pub resized: usize,

    /// Text runs whose font size was scaled.
    pub text_runs_scaled: usize,

    /// Elements with at least one value snapped to the grid.
    pub snapped: usize,

    /// Sub-steps skipped for a missing capability or an out-of-range
    /// value.
    pub skipped: usize,
}

impl TransformStats {
    /// Whether every visited element kept all capability sub-steps.
    pub fn is_clean(&self) -> bool {
        self.skipped == 0
    }
}

/// Everything one resize run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeSummary {
    /// Canvas before the transform.
    pub source: Canvas,

    /// Canvas after the transform.
    pub target: Canvas,

    /// Scale mode that derived the transform.
    pub mode: ScaleMode,

    /// The applied transform descriptor.
    pub transform: Transform,

    /// Grid alignment, when enabled.
    pub grid: Option<GridSnap>,

    /// Element counters.
    pub stats: TransformStats,
}
