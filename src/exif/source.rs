use nom_exif::*;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Cursor;

use super::directory::{ICC_DIRECTORY, IPTC_DIRECTORY, XMP_DIRECTORY};
use super::segments::{self, Segments};
use super::standard::{self, STANDARD_TAGS, TAG_THUMBNAIL_LENGTH, TAG_THUMBNAIL_OFFSET};
use crate::error::{Error, Result};

/// Values read through the standard (narrow) tag vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardTags {
    values: HashMap<String, String>,
    /// Decimal latitude/longitude, when derivable.
    pub lat_long: Option<(f64, f64)>,
    /// Pixel dimensions of the embedded preview image, when present.
    pub thumbnail: Option<(u32, u32)>,
}

impl StandardTags {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value of a standard tag by its vocabulary name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.lat_long.is_none() && self.thumbnail.is_none()
    }
}

/// One tag reported by the directory-based (broad) reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryTag {
    pub directory: String,
    pub name: String,
    pub description: Option<String>,
}

impl DirectoryTag {
    pub fn new(directory: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// The two metadata readers the extractor consumes.
///
/// Implement this trait to plug in a different metadata library. Either call
/// may fail independently; the extractor records the failure and carries on
/// with whatever the other call produced.
pub trait TagSource: Send + Sync {
    /// Read the fixed standard vocabulary.
    fn read_standard(&self, bytes: &[u8]) -> Result<StandardTags>;
    /// Read every `(directory, tag, description)` the broad reader knows about.
    fn read_directories(&self, bytes: &[u8]) -> Result<Vec<DirectoryTag>>;
}

/// [`TagSource`] backed by `nom-exif` for EXIF and `img-parts` for the
/// XMP, IPTC and ICC segments.
///
/// `nom-exif` does not decode the MakerNote blob, so no manufacturer
/// maker-note directories are reported. The maker-specific tier only gets
/// convenience fields found in standard EXIF (lens, body serial, owner).
#[derive(Debug, Clone, Copy, Default)]
pub struct NomExifSource;

/// One parsed EXIF entry with its value already rendered.
struct RawEntry {
    ifd: usize,
    code: u16,
    tag: Option<ExifTag>,
    value: Option<String>,
}

/// Parsed EXIF block.
struct ParsedExif {
    entries: Vec<RawEntry>,
    gps: Option<GPSInfo>,
}

impl NomExifSource {
    pub fn new() -> Self {
        Self
    }

    fn parse_exif(bytes: &[u8]) -> Result<Option<ParsedExif>> {
        match Self::parse_media(bytes) {
            // nom-exif does not know every container (PNG, WebP); the EXIF
            // block inside is still a plain TIFF structure it can read.
            Err(Error::UnrecognizedFormat) => match segments::locate(bytes)?.exif {
                Some(tiff) => Ok(Self::parse_media(&tiff).unwrap_or(None)),
                None => Ok(None),
            },
            other => other,
        }
    }

    fn parse_media(bytes: &[u8]) -> Result<Option<ParsedExif>> {
        let mut parser = MediaParser::new();
        let ms = MediaSource::seekable(Cursor::new(bytes.to_vec())).map_err(|e| {
            log::debug!("nom-exif rejected input: {e}");
            Error::UnrecognizedFormat
        })?;

        if !ms.has_exif() {
            return Ok(None);
        }

        let iter: ExifIter = match parser.parse(ms) {
            Ok(iter) => iter,
            Err(e) => {
                log::debug!("No EXIF data found: {e}");
                return Ok(None);
            }
        };

        // Parse GPS info before iterating (iteration consumes the entries)
        let gps = iter.parse_gps_info().ok().flatten();

        let entries = iter
            .map(|entry| RawEntry {
                ifd: entry.ifd_index(),
                code: entry.tag_code(),
                tag: entry.tag(),
                value: entry.get_value().and_then(entry_to_string),
            })
            .collect();

        Ok(Some(ParsedExif { entries, gps }))
    }
}

impl TagSource for NomExifSource {
    fn read_standard(&self, bytes: &[u8]) -> Result<StandardTags> {
        let mut tags = StandardTags::default();
        let Some(exif) = Self::parse_exif(bytes)? else {
            return Ok(tags);
        };

        for std_tag in STANDARD_TAGS {
            let wanted_ifd = std_tag.group.ifd_index();
            let found = exif
                .entries
                .iter()
                .find(|e| e.ifd == wanted_ifd && e.code == std_tag.code && e.value.is_some());
            if let Some(RawEntry { value: Some(value), .. }) = found {
                tags.insert(std_tag.name, value.clone());
            }
        }

        if let Some(gps) = &exif.gps {
            tags.lat_long = Some((
                latlng_to_decimal(&gps.latitude, gps.latitude_ref),
                latlng_to_decimal(&gps.longitude, gps.longitude_ref),
            ));
        }

        tags.thumbnail = thumbnail_dimensions(bytes, &tags);
        Ok(tags)
    }

    fn read_directories(&self, bytes: &[u8]) -> Result<Vec<DirectoryTag>> {
        let exif = Self::parse_exif(bytes);
        let blocks = segments::locate(bytes);

        let (exif, blocks) = match (exif, blocks) {
            (Err(e), Err(_)) => return Err(e),
            (exif, blocks) => (exif.ok().flatten(), blocks.ok()),
        };

        let mut tags = Vec::new();

        if let Some(exif) = exif {
            for entry in exif.entries {
                let name = entry_name(&entry);
                let directory = exif_directory(entry.ifd, &name);
                tags.push(DirectoryTag {
                    directory,
                    name,
                    description: entry.value,
                });
            }
        }

        if let Some(Segments { xmp, iptc, icc, .. }) = blocks {
            if let Some(xmp) = xmp {
                tags.extend(
                    segments::xmp_properties(&xmp)
                        .into_iter()
                        .map(|(name, value)| DirectoryTag::new(XMP_DIRECTORY, name, value)),
                );
            }
            if let Some(iptc) = iptc {
                tags.extend(
                    segments::iptc_datasets(&iptc)
                        .into_iter()
                        .map(|(name, value)| DirectoryTag::new(IPTC_DIRECTORY, name, value)),
                );
            }
            if let Some(icc) = icc {
                tags.extend(
                    segments::icc_fields(&icc)
                        .into_iter()
                        .map(|(name, value)| DirectoryTag::new(ICC_DIRECTORY, name, value)),
                );
            }
        }

        log::debug!("Directory reader produced {} tags", tags.len());
        Ok(tags)
    }
}

/// Standard-table name when the entry is part of the standard vocabulary,
/// so both readers agree on it; otherwise nom-exif's name for the code.
fn entry_name(entry: &RawEntry) -> String {
    if let Some(std_tag) = standard::by_code(entry.ifd, entry.code) {
        return std_tag.name.to_string();
    }
    entry
        .tag
        .map(|t| t.to_string())
        .unwrap_or_else(|| format!("Unknown tag (0x{:04x})", entry.code))
}

/// Directory label for an EXIF entry.
fn exif_directory(ifd: usize, name: &str) -> String {
    if name.starts_with("GPS") {
        return "GPS".to_string();
    }
    match ifd {
        0 => "Exif IFD0".to_string(),
        1 => "Exif Thumbnail".to_string(),
        n => format!("Exif IFD{n}"),
    }
}

/// Decode the IFD1 JPEG preview just far enough to learn its size.
fn thumbnail_dimensions(bytes: &[u8], tags: &StandardTags) -> Option<(u32, u32)> {
    let offset: usize = tags.get(TAG_THUMBNAIL_OFFSET)?.trim().parse().ok()?;
    let length: usize = tags.get(TAG_THUMBNAIL_LENGTH)?.trim().parse().ok()?;
    let tiff = segments::locate(bytes).ok()?.exif?;
    let preview = tiff.get(offset..offset.checked_add(length)?)?;

    image::ImageReader::new(Cursor::new(preview))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Convert an EntryValue to an Option<String>.
fn entry_to_string(val: &EntryValue) -> Option<String> {
    let s = val.to_string();
    let s = s.trim().trim_matches('"').trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to decimal degrees.
fn latlng_to_decimal(latlng: &LatLng, reference: char) -> f64 {
    let ratio = |r: &URational| if r.1 == 0 { 0.0 } else { r.0 as f64 / r.1 as f64 };
    let degrees = ratio(&latlng.0);
    let minutes = ratio(&latlng.1);
    let seconds = ratio(&latlng.2);

    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;

    if reference == 'S' || reference == 'W' {
        coord = -coord;
    }

    coord
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_directory_labels() {
        assert_eq!(exif_directory(0, "Make"), "Exif IFD0");
        assert_eq!(exif_directory(1, "ImageWidth"), "Exif Thumbnail");
        assert_eq!(exif_directory(0, "GPSLatitude"), "GPS");
        assert_eq!(exif_directory(3, "Foo"), "Exif IFD3");
    }

    #[test]
    fn entry_names_follow_standard_table() {
        let entry = |ifd, code, tag| RawEntry { ifd, code, tag, value: None };

        assert_eq!(entry_name(&entry(0, 0x0132, Some(ExifTag::ModifyDate))), "DateTime");
        assert_eq!(entry_name(&entry(1, 0x0201, Some(ExifTag::ThumbnailOffset))), "JPEGInterchangeFormat");
        assert_eq!(entry_name(&entry(0, 0x0201, Some(ExifTag::ThumbnailOffset))), "ThumbnailOffset");
        assert_eq!(entry_name(&entry(0, 0xBEEF, None)), "Unknown tag (0xbeef)");
    }

    #[test]
    fn standard_tags_lookup() {
        let mut tags = StandardTags::default();
        assert!(tags.is_empty());
        tags.insert("Make", "Canon");
        assert_eq!(tags.get("Make"), Some("Canon"));
        assert_eq!(tags.get("Model"), None);
        assert!(!tags.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_both_reads() {
        let source = NomExifSource::new();
        assert!(source.read_standard(b"garbage").is_err());
        assert!(source.read_directories(b"garbage").is_err());
    }

    #[test]
    fn plain_png_has_no_tags() {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let source = NomExifSource::new();
        let dirs = source.read_directories(&png).unwrap();
        assert!(dirs.is_empty());
    }
}
