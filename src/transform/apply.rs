//! Geometry transformer: applies one transform descriptor to every
//! element of a document.

use super::{GridSnap, Transform, TransformStats};
use crate::error::Result;
use crate::model::{Canvas, Document, Element, EmuExtent, EmuPoint};
use log::{debug, warn};

/// Apply a transform to the whole document, slide by slide, element by
/// element, in document order.
///
/// The canvas is set to `target` before any element is touched. Each
/// element then goes through up to four independent sub-steps: move,
/// resize, font scaling and grid snapping. A missing capability or an
/// out-of-range value skips that sub-step with a warning and the walk
/// continues; only an invalid target aborts.
pub fn apply(
    document: &mut Document,
    transform: &Transform,
    target: Canvas,
    grid: Option<GridSnap>,
) -> Result<TransformStats> {
    target.validate()?;

    let font_scale = transform.font_scale();
    let slide_total = document.slides.len();
    let mut stats = TransformStats::default();

    document.canvas = target;

    for (index, slide) in document.slides.iter_mut().enumerate() {
        let slide_num = index + 1;
        debug!("transforming slide {slide_num}/{slide_total}");
        stats.slides += 1;
        for element in slide.elements_mut() {
            stats.elements += 1;
            transform_element(element, transform, font_scale, grid, slide_num, &mut stats);
        }
    }
    Ok(stats)
}

fn transform_element(
    element: &mut Element,
    transform: &Transform,
    font_scale: f64,
    grid: Option<GridSnap>,
    slide_num: usize,
    stats: &mut TransformStats,
) {
    let kind = element.kind;
    let label = element.name.clone().unwrap_or_else(|| "unnamed".to_string());

    match element.anchor() {
        Some(anchor) => {
            let x = scale_value(anchor.x, transform.scale_x, transform.offset_x);
            let y = scale_value(anchor.y, transform.scale_y, transform.offset_y);
            match (x, y) {
                (Some(x), Some(y)) => {
                    element.set_anchor(EmuPoint { x, y });
                    stats.moved += 1;
                }
                _ => {
                    warn!("slide {slide_num}: {kind} '{label}' position out of range, not moved");
                    stats.skipped += 1;
                }
            }
        }
        None => {
            warn!("slide {slide_num}: {kind} '{label}' has no explicit position, not moved");
            stats.skipped += 1;
        }
    }

    match element.extent() {
        Some(extent) => {
            let cx = scale_value(extent.cx, transform.scale_x, 0.0);
            let cy = scale_value(extent.cy, transform.scale_y, 0.0);
            match (cx, cy) {
                (Some(cx), Some(cy)) => {
                    element.set_extent(EmuExtent { cx, cy });
                    stats.resized += 1;
                }
                _ => {
                    warn!("slide {slide_num}: {kind} '{label}' size out of range, not resized");
                    stats.skipped += 1;
                }
            }
        }
        None => {
            warn!("slide {slide_num}: {kind} '{label}' has no explicit size, not resized");
            stats.skipped += 1;
        }
    }

    // Kinds without a text frame skip this without comment.
    if let Some(runs) = element.text_runs() {
        let sizes: Vec<u32> = runs.iter().map(|r| r.font_size).collect();
        for (index, size) in sizes.into_iter().enumerate() {
            match scale_font(size, font_scale) {
                Some(scaled) => {
                    element.set_font_size(index, scaled);
                    stats.text_runs_scaled += 1;
                }
                None => {
                    warn!(
                        "slide {slide_num}: {kind} '{label}' run {} font size out of range, \
                         left at {size}",
                        index + 1
                    );
                    stats.skipped += 1;
                }
            }
        }
    }

    if let Some(grid) = grid {
        let mut snapped = false;
        if let Some(anchor) = element.anchor() {
            element.set_anchor(EmuPoint {
                x: grid.snap(anchor.x),
                y: grid.snap(anchor.y),
            });
            snapped = true;
        }
        if let Some(extent) = element.extent() {
            element.set_extent(EmuExtent {
                cx: grid.snap(extent.cx),
                cy: grid.snap(extent.cy),
            });
            snapped = true;
        }
        if snapped {
            stats.snapped += 1;
        }
    }
}

/// Scale one coordinate, truncating toward zero at the integer
/// conversion. `None` when the result leaves the representable range.
fn scale_value(value: i64, scale: f64, offset: f64) -> Option<i64> {
    let result = value as f64 * scale + offset;
    if result.is_finite() && result >= i64::MIN as f64 && result <= i64::MAX as f64 {
        Some(result as i64)
    } else {
        None
    }
}

/// Scale a font size in hundredths of a point, truncating.
fn scale_font(centipoints: u32, factor: f64) -> Option<u32> {
    let result = centipoints as f64 * factor;
    if result.is_finite() && (0.0..=u32::MAX as f64).contains(&result) {
        Some(result as u32)
    } else {
        None
    }
}
