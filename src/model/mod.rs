//! Document model types for presentation geometry.
//!
//! This module defines the in-memory representation that bridges package
//! reading and geometry transformation. Elements keep the raw XML of
//! their subtrees alongside typed geometry capabilities, so a save
//! reproduces everything the transform did not touch byte-for-byte.

mod document;
mod element;
mod slide;

pub use document::{Canvas, CoreProperties, Document, DocumentInfo};
pub use element::{Element, ElementKind, EmuExtent, EmuPoint, TextRun};
pub use slide::Slide;

pub(crate) use slide::SlideSegment;
