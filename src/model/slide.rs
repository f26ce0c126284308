//! Slide types.

use super::Element;

/// A single slide: an ordered sequence of transformable elements
/// interleaved with raw XML the transform never touches.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Package part name, e.g. `ppt/slides/slide1.xml`.
    pub part_name: String,

    /// Alternating raw and element segments, in document order.
    pub(crate) segments: Vec<SlideSegment>,
}

/// One span of a slide part.
#[derive(Debug, Clone)]
pub(crate) enum SlideSegment {
    /// Bytes copied through verbatim on save.
    Raw(Vec<u8>),
    /// A transformable element.
    Element(Element),
}

impl Slide {
    pub(crate) fn new(part_name: String, segments: Vec<SlideSegment>) -> Self {
        Self {
            part_name,
            segments,
        }
    }

    /// Elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.segments.iter().filter_map(|s| match s {
            SlideSegment::Element(e) => Some(e),
            SlideSegment::Raw(_) => None,
        })
    }

    /// Mutable view of the elements, in document order.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.segments.iter_mut().filter_map(|s| match s {
            SlideSegment::Element(e) => Some(e),
            SlideSegment::Raw(_) => None,
        })
    }

    /// Number of elements on the slide.
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Whether any element on the slide changed since load.
    pub fn is_dirty(&self) -> bool {
        self.elements().any(|e| e.is_dirty())
    }
}
