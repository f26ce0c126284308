//! Scale calculation: source canvas, target canvas and a mode in,
//! transform descriptor out.

use crate::error::{Error, Result};
use crate::model::Canvas;
use serde::{Deserialize, Serialize};

/// How source canvas dimensions map onto the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Uniform scale so all content fits inside the target; content is
    /// centered and margins may remain.
    #[default]
    Fit,
    /// Uniform scale so content covers the whole target; content is
    /// centered and may extend beyond the bounds.
    Fill,
    /// Independent horizontal and vertical scales filling the target
    /// exactly. Aspect ratio is not preserved.
    Stretch,
    /// Legacy profile: always scales the axes independently, like
    /// [`Stretch`](Self::Stretch). Exists so the historical
    /// grid-aligned workflow keeps its name.
    Independent,
}

impl ScaleMode {
    /// Whether this mode scales both axes by the same factor.
    pub fn is_uniform(&self) -> bool {
        matches!(self, ScaleMode::Fit | ScaleMode::Fill)
    }
}

impl std::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScaleMode::Fit => "fit",
            ScaleMode::Fill => "fill",
            ScaleMode::Stretch => "stretch",
            ScaleMode::Independent => "independent",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for ScaleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fit" => Ok(ScaleMode::Fit),
            "fill" => Ok(ScaleMode::Fill),
            "stretch" => Ok(ScaleMode::Stretch),
            "independent" => Ok(ScaleMode::Independent),
            other => Err(Error::Other(format!(
                "unknown scale mode '{other}' (expected fit, fill, stretch or independent)"
            ))),
        }
    }
}

/// The transform descriptor: per-axis scale factors plus centering
/// offsets in EMU.
///
/// Computed once per document and applied unchanged to every element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Horizontal offset in EMU, applied after scaling.
    pub offset_x: f64,
    /// Vertical offset in EMU, applied after scaling.
    pub offset_y: f64,
}

impl Transform {
    /// The transform that leaves geometry unchanged.
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Derive the transform taking `source` to `target` under `mode`.
    ///
    /// Fails fast with [`Error::InvalidCanvas`] when any dimension is
    /// not strictly positive; nothing is computed past that point.
    pub fn compute(source: Canvas, target: Canvas, mode: ScaleMode) -> Result<Self> {
        source.validate()?;
        target.validate()?;

        let width_scale = target.width as f64 / source.width as f64;
        let height_scale = target.height as f64 / source.height as f64;

        let transform = match mode {
            ScaleMode::Stretch | ScaleMode::Independent => Self {
                scale_x: width_scale,
                scale_y: height_scale,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            ScaleMode::Fit => Self::uniform(source, target, width_scale.min(height_scale)),
            ScaleMode::Fill => Self::uniform(source, target, width_scale.max(height_scale)),
        };
        Ok(transform)
    }

    /// Uniform scale with offsets centering the scaled source in the
    /// target.
    fn uniform(source: Canvas, target: Canvas, scale: f64) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            offset_x: (target.width as f64 - source.width as f64 * scale) / 2.0,
            offset_y: (target.height as f64 - source.height as f64 * scale) / 2.0,
        }
    }

    /// The factor applied to font sizes: the smaller axis scale, so
    /// text stays legible under non-uniform stretching.
    pub fn font_scale(&self) -> f64 {
        self.scale_x.min(self.scale_y)
    }

    /// Whether both axes scale by the same factor.
    pub fn is_uniform(&self) -> bool {
        self.scale_x == self.scale_y
    }
}
