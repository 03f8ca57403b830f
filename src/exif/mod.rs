//! Metadata extraction.
//!
//! Two readers sit behind the [`TagSource`] trait:
//!
//! - the standard reader, which only knows the fixed vocabulary in [`standard`]
//! - the directory reader, which reports every `(directory, tag, description)`
//!   it finds across EXIF IFDs, maker notes, XMP, IPTC and ICC blocks
//!
//! [`extract`] combines them into a three-tier [`MetadataRecord`](crate::record::MetadataRecord).
//! [`NomExifSource`] is the bundled implementation (nom-exif for EXIF,
//! img-parts for the other segments).

mod directory;
mod extract;
mod segments;
mod source;
pub mod standard;

pub use directory::{DirectoryClass, classify};
pub use extract::{
    EMBEDDED_THUMBNAIL, Extraction, ExtractionStatus, GPS_LAT_DECIMAL, GPS_LONG_DECIMAL, SourceFailure, SourceKind,
    extract,
};
pub use source::{DirectoryTag, NomExifSource, StandardTags, TagSource};
