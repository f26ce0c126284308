//! Resize options and configuration.

use super::{GridSnap, ScaleMode};
use crate::model::Canvas;

/// Options for resizing a presentation.
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    /// Target canvas dimensions.
    pub target: Canvas,

    /// How to derive the scale factors.
    pub mode: ScaleMode,

    /// Grid alignment applied after scaling, when set.
    pub grid: Option<GridSnap>,
}

impl ResizeOptions {
    /// Create new resize options with defaults: a 36 x 48 inch target,
    /// fit mode, no grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target canvas.
    pub fn with_target(mut self, target: Canvas) -> Self {
        self.target = target;
        self
    }

    /// Set the target canvas from dimensions in inches.
    pub fn target_inches(mut self, width: f64, height: f64) -> Self {
        self.target = Canvas::from_inches(width, height);
        self
    }

    /// Set the scale mode.
    pub fn with_mode(mut self, mode: ScaleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Scale to cover the whole target.
    pub fn fill(mut self) -> Self {
        self.mode = ScaleMode::Fill;
        self
    }

    /// Scale each axis independently.
    pub fn stretch(mut self) -> Self {
        self.mode = ScaleMode::Stretch;
        self
    }

    /// Enable grid alignment with the given grid.
    pub fn with_grid(mut self, grid: GridSnap) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Enable grid alignment with the default 0.1 inch cell.
    pub fn snap_to_grid(mut self) -> Self {
        self.grid = Some(GridSnap::default());
        self
    }

    /// Disable grid alignment.
    pub fn without_grid(mut self) -> Self {
        self.grid = None;
        self
    }
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            target: Canvas::from_inches(36.0, 48.0),
            mode: ScaleMode::Fit,
            grid: None,
        }
    }
}
