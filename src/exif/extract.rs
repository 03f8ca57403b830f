use serde::Serialize;

use super::directory::{DirectoryClass, classify};
use super::source::{DirectoryTag, TagSource};
use super::standard::STANDARD_TAGS;
use crate::record::{BASIC_PREFIX, DEEP_PREFIX, MetadataRecord, TagMap};

pub const GPS_LAT_DECIMAL: &str = "EXIF:GPS_LAT_DECIMAL";
pub const GPS_LONG_DECIMAL: &str = "EXIF:GPS_LONG_DECIMAL";
pub const EMBEDDED_THUMBNAIL: &str = "EXIF:Embedded Thumbnail";

/// A short maker-tier key filled from the first directory tag whose name
/// matches one of `aliases` (case-insensitive).
struct ConvenienceField {
    key: &'static str,
    aliases: &'static [&'static str],
}

const CONVENIENCE_FIELDS: &[ConvenienceField] = &[
    ConvenienceField {
        key: "Lens Model",
        aliases: &["Lens Model", "LensModel"],
    },
    ConvenienceField {
        key: "Shutter Count",
        aliases: &["Shutter Count", "ShutterCount", "ImageCount"],
    },
    ConvenienceField {
        key: "Camera Serial Number",
        aliases: &["Serial Number", "SerialNumber", "BodySerialNumber"],
    },
    ConvenienceField {
        key: "Owner Name",
        aliases: &["Owner Name", "OwnerName", "CameraOwnerName"],
    },
];

/// Which reader a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    Standard,
    Directory,
}

/// A reader that could not be used for this image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: SourceKind,
    pub message: String,
}

/// Overall outcome of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionStatus {
    /// Both readers ran. The record may still be empty if the image has no metadata.
    Complete,
    /// One reader failed; the record holds what the other produced.
    Partial,
    /// Neither reader could read the input: not an image, or corrupt.
    Unreadable,
}

/// Result of [`extract`]: the three-tier record plus any reader failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub record: MetadataRecord,
    pub failures: Vec<SourceFailure>,
}

impl ExtractionStatus {
    pub fn from_failures(failures: &[SourceFailure]) -> Self {
        let failed = |kind| failures.iter().any(|f| f.source == kind);
        match (failed(SourceKind::Standard), failed(SourceKind::Directory)) {
            (false, false) => Self::Complete,
            (true, true) => Self::Unreadable,
            _ => Self::Partial,
        }
    }
}

impl Extraction {
    pub fn status(&self) -> ExtractionStatus {
        ExtractionStatus::from_failures(&self.failures)
    }
}

/// Read both tag sources and sort every tag into the basic, maker-specific
/// and deep tiers.
///
/// Never fails: a source that errors contributes nothing and is listed in
/// [`Extraction::failures`].
pub fn extract(bytes: &[u8], source: &dyn TagSource) -> Extraction {
    let mut failures = Vec::new();
    let mut basic = TagMap::new();
    let mut maker = TagMap::new();
    let mut deep = TagMap::new();

    match source.read_standard(bytes) {
        Ok(standard) => {
            for tag in STANDARD_TAGS {
                if let Some(value) = standard.get(tag.name) {
                    basic.insert(format!("{BASIC_PREFIX}{}", tag.name), value.to_string());
                }
            }

            if let Some((lat, lon)) = standard.lat_long {
                basic.insert(GPS_LAT_DECIMAL.to_string(), format!("{lat:.6}"));
                basic.insert(GPS_LONG_DECIMAL.to_string(), format!("{lon:.6}"));
            }

            if let Some((width, height)) = standard.thumbnail {
                basic.insert(EMBEDDED_THUMBNAIL.to_string(), format!("YES ({width}x{height})"));
            }
        }
        Err(e) => {
            log::warn!("Standard tag reader failed: {e}");
            failures.push(SourceFailure {
                source: SourceKind::Standard,
                message: e.to_string(),
            });
        }
    }

    match source.read_directories(bytes) {
        Ok(tags) => {
            for tag in &tags {
                let value = tag.description.clone().unwrap_or_default();
                match classify(&tag.directory) {
                    DirectoryClass::MakerSpecific => {
                        maker.insert(format!("{}:{}", tag.directory, tag.name), value);
                    }
                    DirectoryClass::Descriptive => {
                        deep.insert(deep_key(tag), value);
                    }
                    DirectoryClass::Other => {
                        if !basic.contains_key(&format!("{BASIC_PREFIX}{}", tag.name)) {
                            deep.insert(deep_key(tag), value);
                        }
                    }
                }
            }

            for field in CONVENIENCE_FIELDS {
                if let Some(value) = find_by_name(&tags, field.aliases) {
                    maker.insert(field.key.to_string(), value.to_string());
                }
            }
        }
        Err(e) => {
            log::warn!("Directory tag reader failed: {e}");
            failures.push(SourceFailure {
                source: SourceKind::Directory,
                message: e.to_string(),
            });
        }
    }

    log::debug!(
        "Extracted {} basic, {} maker-specific, {} deep tags",
        basic.len(),
        maker.len(),
        deep.len()
    );

    Extraction {
        record: MetadataRecord::from_tiers(basic, maker, deep),
        failures,
    }
}

fn deep_key(tag: &DirectoryTag) -> String {
    format!("{DEEP_PREFIX}{}: {}", tag.directory, tag.name)
}

/// First tag in reader order whose name matches any alias and has a value.
fn find_by_name<'a>(tags: &'a [DirectoryTag], aliases: &[&str]) -> Option<&'a str> {
    tags.iter()
        .filter(|t| aliases.iter().any(|a| t.name.eq_ignore_ascii_case(a)))
        .find_map(|t| t.description.as_deref())
}
