//! Error types for repptx library.

use std::io;
use thiserror::Error;

/// Result type alias for repptx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during presentation processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as a PowerPoint presentation.
    #[error("Unknown file format: not a valid PowerPoint presentation")]
    UnknownFormat,

    /// Error at the ZIP container level.
    #[error("Package error: {0}")]
    Package(String),

    /// Error parsing XML inside a package part.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// A slide relationship id could not be resolved to a part.
    #[error("Unresolved relationship: {0}")]
    MissingRelationship(String),

    /// The canvas dimensions are not strictly positive.
    #[error("Invalid canvas dimensions: {width} x {height} EMU (both must be positive)")]
    InvalidCanvas { width: i64, height: i64 },

    /// The grid cell size is not strictly positive.
    #[error("Invalid grid cell size: {0} EMU (must be positive)")]
    InvalidGrid(i64),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
