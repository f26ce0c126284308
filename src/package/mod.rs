//! Presentation package reading and writing.
//!
//! A .pptx file is an OPC package: a ZIP archive of XML parts. This module
//! loads the package into memory, exposes the parts the transform needs
//! (presentation canvas, slides, core properties), and writes the package
//! back with every untouched byte preserved.

mod reader;
mod writer;

pub use reader::{read_bytes, read_file};
pub use writer::{write_bytes, write_file};

/// All parts of a loaded package, in original archive order.
#[derive(Debug, Clone)]
pub(crate) struct Package {
    pub(crate) parts: Vec<PackagePart>,
}

/// A single package part: archive entry name plus raw bytes.
#[derive(Debug, Clone)]
pub(crate) struct PackagePart {
    pub(crate) name: String,
    pub(crate) data: Vec<u8>,
}

impl Package {
    /// Look up a part by exact name.
    pub(crate) fn part(&self, name: &str) -> Option<&PackagePart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Number of parts in the package.
    pub(crate) fn part_count(&self) -> usize {
        self.parts.len()
    }
}
