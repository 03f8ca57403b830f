//! Seven-line "quick intel" summary of an analyzed file.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::exif::{GPS_LAT_DECIMAL, GPS_LONG_DECIMAL};
use crate::pipeline::mime_type;
use crate::record::TagMap;

pub const UNKNOWN: &str = "Unknown";
pub const NO_DOCUMENT_ID: &str = "SYSTEM_GEN_NULL";
pub const NO_SIGNAL: &str = "NO SIGNAL";

const DOCUMENT_ID_MARKERS: &[&str] = &["DOCUMENTID", "UNIQUEID", "INSTANCEID"];

/// Plain file facts supplied by whoever opened the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: Option<String>,
    pub size: Option<u64>,
    pub mime: Option<String>,
}

impl FileInfo {
    /// File name, size on disk and extension-derived MIME type.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
            size: Some(metadata.len()),
            mime: mime_type(path).map(str::to_string),
        })
    }
}

/// Human-readable byte count: `"1.50 MB"`, `"2.00 KB"` or `"512 Bytes"`.
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    match size {
        s if s >= MB => format!("{:.2} MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.2} KB", s as f64 / KB as f64),
        s => format!("{s} Bytes"),
    }
}

/// Ordered `(label, value)` summary of the most telling fields.
///
/// ```rust
/// use exif_forensics::intel::{FileInfo, quick_intel};
/// use exif_forensics::record::TagMap;
///
/// let mut tags = TagMap::new();
/// tags.insert("EXIF:Make".into(), "Canon".into());
///
/// let info = FileInfo { name: Some("IMG_0001.jpg".into()), size: Some(2048), mime: None };
/// let intel = quick_intel(&tags, &info);
/// assert_eq!(intel[2], ("Size".to_string(), "2.00 KB".to_string()));
/// assert_eq!(intel[5], ("Manufacturer".to_string(), "Canon".to_string()));
/// ```
pub fn quick_intel(tags: &TagMap, info: &FileInfo) -> Vec<(String, String)> {
    let document_id = tags
        .iter()
        .find(|(k, _)| {
            let upper = k.to_uppercase();
            DOCUMENT_ID_MARKERS.iter().any(|m| upper.contains(m))
        })
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| NO_DOCUMENT_ID.to_string());

    let coordinates = match (tags.get(GPS_LAT_DECIMAL), tags.get(GPS_LONG_DECIMAL)) {
        (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
        _ => NO_SIGNAL.to_string(),
    };

    let either = |primary: &str, fallback: &str| {
        tags.get(primary)
            .or_else(|| tags.get(fallback))
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    vec![
        ("Display File Name".to_string(), info.name.clone().unwrap_or_else(|| UNKNOWN.to_string())),
        ("Document ID".to_string(), document_id),
        ("Size".to_string(), info.size.map(format_size).unwrap_or_else(|| UNKNOWN.to_string())),
        ("MIME Format".to_string(), info.mime.clone().unwrap_or_else(|| UNKNOWN.to_string())),
        ("Coordinates".to_string(), coordinates),
        ("Manufacturer".to_string(), either("EXIF:Make", "DEEP:Exif IFD0: Make")),
        ("System Model".to_string(), either("EXIF:Model", "DEEP:Exif IFD0: Model")),
    ]
}
