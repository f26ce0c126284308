//! Document-level types.

use super::Slide;
use crate::error::{Error, Result};
use crate::package::Package;
use crate::units;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slide canvas dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in EMU.
    pub width: i64,
    /// Height in EMU.
    pub height: i64,
}

impl Canvas {
    /// Create a canvas from EMU dimensions.
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Create a canvas from dimensions in inches, truncating to EMU.
    pub fn from_inches(width: f64, height: f64) -> Self {
        Self {
            width: units::emu_from_inches(width),
            height: units::emu_from_inches(height),
        }
    }

    /// Whether both dimensions are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Width in inches.
    pub fn width_inches(&self) -> f64 {
        units::inches_from_emu(self.width)
    }

    /// Height in inches.
    pub fn height_inches(&self) -> f64 {
        units::inches_from_emu(self.height)
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} x {:.2} in ({} x {} EMU)",
            self.width_inches(),
            self.height_inches(),
            self.width,
            self.height
        )
    }
}

/// A loaded presentation.
#[derive(Debug, Clone)]
pub struct Document {
    /// Slide canvas dimensions.
    pub canvas: Canvas,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,

    /// Core document properties, when the package carries them.
    pub properties: Option<CoreProperties>,

    /// The backing package, every part in original order.
    pub(crate) package: Package,
}

impl Document {
    pub(crate) fn new(
        canvas: Canvas,
        slides: Vec<Slide>,
        properties: Option<CoreProperties>,
        package: Package,
    ) -> Self {
        Self {
            canvas,
            slides,
            properties,
            package,
        }
    }

    /// Get the number of slides in the document.
    pub fn slide_count(&self) -> u32 {
        self.slides.len() as u32
    }

    /// Get a slide by number (1-indexed).
    pub fn get_slide(&self, slide_num: u32) -> Option<&Slide> {
        if slide_num == 0 {
            return None;
        }
        self.slides.get((slide_num - 1) as usize)
    }

    /// Total number of elements across all slides.
    pub fn element_count(&self) -> usize {
        self.slides.iter().map(|s| s.element_count()).sum()
    }

    /// Check if the document has any slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of parts in the backing package.
    pub fn part_count(&self) -> usize {
        self.package.part_count()
    }

    /// Summarize the document for display or JSON output.
    pub fn info(&self) -> DocumentInfo {
        let text_element_count = self
            .slides
            .iter()
            .flat_map(|s| s.elements())
            .filter(|e| e.text_runs().is_some())
            .count();
        let properties = self.properties.clone().unwrap_or_default();
        DocumentInfo {
            canvas: self.canvas,
            width_inches: self.canvas.width_inches(),
            height_inches: self.canvas.height_inches(),
            slide_count: self.slide_count(),
            element_count: self.element_count(),
            text_element_count,
            part_count: self.part_count(),
            title: properties.title,
            creator: properties.creator,
            created: properties.created,
            modified: properties.modified,
        }
    }
}

/// Core document properties from docProps/core.xml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreProperties {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Last person to modify the document
    pub last_modified_by: Option<String>,

    /// Revision number
    pub revision: Option<u32>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl CoreProperties {
    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject.is_none()
            && self.creator.is_none()
            && self.keywords.is_none()
            && self.last_modified_by.is_none()
            && self.revision.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}

/// Summary of a loaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Canvas dimensions in EMU.
    pub canvas: Canvas,

    /// Canvas width in inches.
    pub width_inches: f64,

    /// Canvas height in inches.
    pub height_inches: f64,

    /// Number of slides.
    pub slide_count: u32,

    /// Total elements across all slides.
    pub element_count: usize,

    /// Elements that can carry text.
    pub text_element_count: usize,

    /// Parts in the package.
    pub part_count: usize,

    /// Document title, when present.
    pub title: Option<String>,

    /// Document author, when present.
    pub creator: Option<String>,

    /// Creation date, when present.
    pub created: Option<DateTime<Utc>>,

    /// Last modification date, when present.
    pub modified: Option<DateTime<Utc>>,
}
