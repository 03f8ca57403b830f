//! Error types shared by the extraction, hashing and export boundaries.

/// Errors surfaced by library operations.
///
/// Extraction itself never returns this type directly: each tag source
/// failure is captured in [`Extraction`](crate::exif::Extraction) so callers
/// can tell a degraded read apart from an image that simply carries no
/// metadata.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not an image format any reader recognizes.
    #[error("Unrecognized image format")]
    UnrecognizedFormat,

    /// The EXIF block exists but could not be parsed.
    #[error("EXIF parse failed: {0}")]
    Exif(String),

    /// An embedded XMP/IPTC/ICC segment could not be read.
    #[error("Segment read failed: {0}")]
    Segment(String),

    /// Decoding or encoding raster data failed.
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// A finished temporary file could not be moved into place.
    #[error("Failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, Error>;
