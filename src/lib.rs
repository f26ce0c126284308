//! # repptx
//!
//! Geometry-preserving PowerPoint resizing library for Rust.
//!
//! This library rescales .pptx presentations to a new canvas size,
//! moving and resizing every slide element so the layout survives the
//! change of dimensions. Everything it does not touch is written back
//! byte for byte.
//!
//! ## Quick Start
//!
//! ```no_run
//! use repptx::{resize_file, ResizeOptions};
//!
//! fn main() -> repptx::Result<()> {
//!     // Rescale a deck to a 36 x 48 inch poster canvas
//!     let options = ResizeOptions::new().target_inches(36.0, 48.0);
//!     let summary = resize_file("deck.pptx", "poster.pptx", &options)?;
//!     println!("{} slides, {} elements moved", summary.stats.slides, summary.stats.moved);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Four scale modes**: fit, fill, stretch, independent
//! - **Layout preservation**: positions, sizes, and font sizes rescale together
//! - **Lossless round-trip**: untouched XML, media, and themes pass through unchanged
//! - **Grid alignment**: optional snapping of results to a layout grid
//! - **Capability-aware**: elements without explicit geometry are skipped, not broken

pub mod detect;
pub mod error;
pub mod model;
pub mod package;
pub mod transform;
pub mod units;

// Re-export commonly used types
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_presentation, PackageFormat,
};
pub use error::{Error, Result};
pub use model::{
    Canvas, CoreProperties, Document, DocumentInfo, Element, ElementKind, EmuExtent, EmuPoint,
    Slide, TextRun,
};
pub use package::{read_bytes, read_file, write_bytes, write_file};
pub use transform::{
    resize, GridSnap, ResizeOptions, ResizeSummary, ScaleMode, Transform, TransformStats,
};

use std::path::Path;

/// Resize a presentation file and write the result to a new file.
///
/// # Arguments
///
/// * `input` - Path to the source .pptx file
/// * `output` - Path the resized presentation is written to
/// * `options` - Target canvas, scale mode and grid settings
///
/// # Example
///
/// ```no_run
/// use repptx::{resize_file, ResizeOptions};
///
/// let options = ResizeOptions::new().target_inches(36.0, 48.0);
/// let summary = resize_file("deck.pptx", "poster.pptx", &options).unwrap();
/// println!("scaled by {:.2}", summary.transform.scale_x);
/// ```
pub fn resize_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ResizeOptions,
) -> Result<ResizeSummary> {
    let mut document = read_file(input)?;
    let summary = resize(&mut document, options)?;
    write_file(&document, output)?;
    Ok(summary)
}

/// Resize a presentation held in memory.
///
/// Returns the resized package bytes together with the summary.
///
/// # Example
///
/// ```no_run
/// use repptx::{resize_bytes, ResizeOptions};
///
/// let data = std::fs::read("deck.pptx").unwrap();
/// let (resized, _summary) = resize_bytes(&data, &ResizeOptions::default()).unwrap();
/// std::fs::write("poster.pptx", resized).unwrap();
/// ```
pub fn resize_bytes(data: &[u8], options: &ResizeOptions) -> Result<(Vec<u8>, ResizeSummary)> {
    let mut document = read_bytes(data)?;
    let summary = resize(&mut document, options)?;
    let bytes = write_bytes(&document)?;
    Ok((bytes, summary))
}

/// Load a presentation and return its structural summary.
///
/// # Example
///
/// ```no_run
/// use repptx::inspect_file;
///
/// let info = inspect_file("deck.pptx").unwrap();
/// println!("{} slides on a {} canvas", info.slide_count, info.canvas);
/// ```
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<DocumentInfo> {
    let document = read_file(path)?;
    Ok(document.info())
}

/// Builder for configuring and running presentation resizes.
///
/// # Example
///
/// ```no_run
/// use repptx::Repptx;
///
/// let summary = Repptx::new()
///     .target_inches(36.0, 48.0)
///     .stretch()
///     .snap_to_grid()
///     .resize("deck.pptx", "poster.pptx")?;
/// # Ok::<(), repptx::Error>(())
/// ```
pub struct Repptx {
    options: ResizeOptions,
}

impl Repptx {
    /// Create a new Repptx builder with the default 36 x 48 inch target.
    pub fn new() -> Self {
        Self {
            options: ResizeOptions::default(),
        }
    }

    /// Set the target canvas in inches.
    pub fn target_inches(mut self, width: f64, height: f64) -> Self {
        self.options = self.options.target_inches(width, height);
        self
    }

    /// Set the target canvas in EMU.
    pub fn with_target(mut self, target: Canvas) -> Self {
        self.options = self.options.with_target(target);
        self
    }

    /// Set the scale mode.
    pub fn with_mode(mut self, mode: ScaleMode) -> Self {
        self.options = self.options.with_mode(mode);
        self
    }

    /// Scale uniformly to cover the target canvas.
    pub fn fill(mut self) -> Self {
        self.options = self.options.fill();
        self
    }

    /// Scale each axis independently to fill the target exactly.
    pub fn stretch(mut self) -> Self {
        self.options = self.options.stretch();
        self
    }

    /// Snap results to the default 0.1 inch grid.
    pub fn snap_to_grid(mut self) -> Self {
        self.options = self.options.snap_to_grid();
        self
    }

    /// Snap results to a custom grid.
    pub fn with_grid(mut self, grid: GridSnap) -> Self {
        self.options = self.options.with_grid(grid);
        self
    }

    /// Disable grid snapping.
    pub fn without_grid(mut self) -> Self {
        self.options = self.options.without_grid();
        self
    }

    /// Resize a presentation file.
    pub fn resize<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        input: P,
        output: Q,
    ) -> Result<ResizeSummary> {
        resize_file(input, output, &self.options)
    }

    /// Resize a presentation held in memory.
    pub fn resize_bytes(self, data: &[u8]) -> Result<(Vec<u8>, ResizeSummary)> {
        resize_bytes(data, &self.options)
    }
}

impl Default for Repptx {
    fn default() -> Self {
        Self::new()
    }
}
