//! Presentation format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Presentation package information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFormat {
    /// Number of parts in the package.
    pub part_count: usize,
    /// Whether the package carries core document properties.
    pub has_core_properties: bool,
}

impl std::fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OOXML presentation ({} parts)", self.part_count)
    }
}

/// ZIP local file header magic: PK\x03\x04
pub(crate) const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Package part that marks an OOXML presentation.
pub(crate) const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Package part holding core document properties.
pub(crate) const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Detect presentation format from a file path.
///
/// # Arguments
/// * `path` - Path to the .pptx file
///
/// # Returns
/// * `Ok(PackageFormat)` if the file is a valid presentation package
/// * `Err(Error::UnknownFormat)` if the file is not one
///
/// # Example
/// ```no_run
/// use repptx::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("deck.pptx").unwrap();
/// println!("Parts: {}", format.part_count);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PackageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 4];
    file.read_exact(&mut header)
        .map_err(|_| Error::UnknownFormat)?;
    if !header.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    file.rewind()?;
    probe_archive(file)
}

/// Detect presentation format from bytes.
///
/// The full package bytes are required: detection opens the ZIP central
/// directory and probes for the presentation part.
///
/// # Returns
/// * `Ok(PackageFormat)` if the data is a valid presentation package
/// * `Err(Error::UnknownFormat)` if it is not one
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PackageFormat> {
    if !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    probe_archive(Cursor::new(data))
}

/// Open the archive and look for the presentation part.
fn probe_archive<R: Read + Seek>(reader: R) -> Result<PackageFormat> {
    let archive = zip::ZipArchive::new(reader).map_err(|_| Error::UnknownFormat)?;
    let mut has_presentation = false;
    let mut has_core_properties = false;
    for name in archive.file_names() {
        if name == PRESENTATION_PART {
            has_presentation = true;
        } else if name == CORE_PROPERTIES_PART {
            has_core_properties = true;
        }
    }
    if !has_presentation {
        return Err(Error::UnknownFormat);
    }
    Ok(PackageFormat {
        part_count: archive.len(),
        has_core_properties,
    })
}

/// Check if a file is a valid presentation package.
pub fn is_presentation<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a valid presentation package.
pub fn is_presentation_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
