//! Scale computation and geometry transformation.

mod apply;
mod grid;
mod options;
mod result;
mod scale;

pub use apply::apply;
pub use grid::GridSnap;
pub use options::ResizeOptions;
pub use result::{ResizeSummary, TransformStats};
pub use scale::{ScaleMode, Transform};

use crate::error::Result;
use crate::model::Document;

/// Resize a loaded document in place.
///
/// Computes the transform from the document's current canvas and the
/// options, then applies it to every slide. The returned summary holds
/// the transform descriptor and per-element counters.
pub fn resize(document: &mut Document, options: &ResizeOptions) -> Result<ResizeSummary> {
    let source = document.canvas;
    let transform = Transform::compute(source, options.target, options.mode)?;
    let stats = apply(document, &transform, options.target, options.grid)?;
    Ok(ResizeSummary {
        source,
        target: options.target,
        mode: options.mode,
        transform,
        grid: options.grid,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Canvas;
    use crate::package::Package;

    #[test]
    fn test_resize_empty_document_updates_canvas() {
        let mut doc = crate::model::Document::new(
            Canvas::from_inches(10.0, 10.0),
            Vec::new(),
            None,
            Package { parts: Vec::new() },
        );
        let options = ResizeOptions::new();
        let summary = resize(&mut doc, &options).unwrap();

        assert_eq!(doc.canvas, Canvas::from_inches(36.0, 48.0));
        assert_eq!(summary.source, Canvas::from_inches(10.0, 10.0));
        assert_eq!(summary.target, doc.canvas);
        assert!((summary.transform.scale_x - 3.6).abs() < 1e-9);
        assert_eq!(summary.stats.slides, 0);
    }

    #[test]
    fn test_resize_rejects_degenerate_source() {
        let mut doc = crate::model::Document::new(
            Canvas::new(0, 914_400),
            Vec::new(),
            None,
            Package { parts: Vec::new() },
        );
        assert!(resize(&mut doc, &ResizeOptions::new()).is_err());
    }
}
