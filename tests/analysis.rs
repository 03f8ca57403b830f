use exif_forensics::categorize::categorize;
use exif_forensics::config::Config;
use exif_forensics::exif::{DirectoryTag, ExtractionStatus, NomExifSource, StandardTags, TagSource};
use exif_forensics::export::{export_report, strip_metadata};
use exif_forensics::forensic::{RISK_SCORE_KEY, TAMPERING_ALERT_KEY};
use exif_forensics::intel::{FileInfo, quick_intel};
use exif_forensics::pipeline::{analyze_bytes, analyze_path};
use exif_forensics::search::filter;
use exif_forensics::{Error, Result};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::io::Cursor;
use tempfile::TempDir;

/// Canon body, GPS fix, saved from Photoshop.
struct EditedCanon;

impl TagSource for EditedCanon {
    fn read_standard(&self, _bytes: &[u8]) -> Result<StandardTags> {
        let mut tags = StandardTags::default();
        tags.insert("Make", "Canon");
        tags.insert("Model", "Canon EOS R5");
        tags.insert("Software", "Adobe Photoshop 2023");
        tags.insert("GPSLatitudeRef", "N");
        tags.insert("GPSLatitude", "48/1, 51/1, 29/1");
        tags.insert("GPSLongitudeRef", "E");
        tags.insert("GPSLongitude", "2/1, 17/1, 40/1");
        tags.lat_long = Some((48.858056, 2.294444));
        Ok(tags)
    }

    fn read_directories(&self, _bytes: &[u8]) -> Result<Vec<DirectoryTag>> {
        Ok(vec![
            DirectoryTag::new("Exif IFD0", "Make", "Canon"),
            DirectoryTag::new("Exif IFD0", "Orientation", "Horizontal (normal)"),
        ])
    }
}

struct Broken;

impl TagSource for Broken {
    fn read_standard(&self, _bytes: &[u8]) -> Result<StandardTags> {
        Err(Error::UnrecognizedFormat)
    }

    fn read_directories(&self, _bytes: &[u8]) -> Result<Vec<DirectoryTag>> {
        Err(Error::UnrecognizedFormat)
    }
}

/// Big-endian TIFF with IFD0 holding Make and Software.
fn tiff_block(make: &str, software: &str) -> Vec<u8> {
    let make = format!("{make}\0");
    let software = format!("{software}\0");
    let data_start: u32 = 8 + 2 + 2 * 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&42u16.to_be_bytes());
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());

    let mut offset = data_start;
    for (tag, value) in [(0x010Fu16, &make), (0x0131u16, &software)] {
        tiff.extend_from_slice(&tag.to_be_bytes());
        tiff.extend_from_slice(&2u16.to_be_bytes());
        tiff.extend_from_slice(&(value.len() as u32).to_be_bytes());
        tiff.extend_from_slice(&offset.to_be_bytes());
        offset += value.len() as u32;
    }
    tiff.extend_from_slice(&0u32.to_be_bytes());
    tiff.extend_from_slice(make.as_bytes());
    tiff.extend_from_slice(software.as_bytes());
    tiff
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 120, 150]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg)
        .unwrap();
    out
}

fn with_exif(tiff: Vec<u8>) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(encode_jpeg(32, 24))).unwrap();
    jpeg.set_exif(Some(Bytes::from(tiff)));
    jpeg.encoder().bytes().to_vec()
}

fn jpeg_with_exif(make: &str, software: &str) -> Vec<u8> {
    with_exif(tiff_block(make, software))
}

/// One big-endian IFD entry: tag, field type, count, raw value bytes.
struct Field(u16, u16, u32, Vec<u8>);

fn ascii(tag: u16, text: &str) -> Field {
    let bytes = format!("{text}\0").into_bytes();
    Field(tag, 2, bytes.len() as u32, bytes)
}

fn short(tag: u16, value: u16) -> Field {
    Field(tag, 3, 1, value.to_be_bytes().to_vec())
}

fn long(tag: u16, value: u32) -> Field {
    Field(tag, 4, 1, value.to_be_bytes().to_vec())
}

fn dms(tag: u16, deg: u32, min: u32, sec: u32) -> Field {
    let bytes = [deg, min, sec].iter().flat_map(|v| [v.to_be_bytes(), 1u32.to_be_bytes()].concat()).collect();
    Field(tag, 5, 3, bytes)
}

fn ifd_len(fields: &[Field]) -> u32 {
    2 + 12 * fields.len() as u32 + 4
}

fn out_of_line_len(fields: &[Field]) -> u32 {
    fields.iter().filter(|f| f.3.len() > 4).map(|f| f.3.len().next_multiple_of(2) as u32).sum()
}

fn write_ifd(out: &mut Vec<u8>, data: &mut Vec<u8>, data_start: u32, fields: &[Field], next: u32) {
    out.extend_from_slice(&(fields.len() as u16).to_be_bytes());
    for Field(tag, kind, count, bytes) in fields {
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&kind.to_be_bytes());
        out.extend_from_slice(&count.to_be_bytes());
        if bytes.len() <= 4 {
            let mut inline = bytes.clone();
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&(data_start + data.len() as u32).to_be_bytes());
            data.extend_from_slice(bytes);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    out.extend_from_slice(&next.to_be_bytes());
}

/// TIFF with IFD0 (Make, DateTime, GPS pointer), a GPS IFD at
/// 48°51'29"N 2°17'40"W and an IFD1 holding a JPEG preview.
fn camera_tiff(thumbnail: &[u8]) -> Vec<u8> {
    let mut ifd0 = vec![
        ascii(0x010F, "Canon"),
        ascii(0x0132, "2024:01:01 10:00:00"),
        long(0x8825, 0),
    ];
    let gps = vec![
        ascii(0x0001, "N"),
        dms(0x0002, 48, 51, 29),
        ascii(0x0003, "W"),
        dms(0x0004, 2, 17, 40),
    ];
    let mut ifd1 = vec![
        short(0x0103, 6),
        long(0x0201, 0),
        long(0x0202, thumbnail.len() as u32),
    ];

    let gps_at = 8 + ifd_len(&ifd0);
    let ifd1_at = gps_at + ifd_len(&gps);
    let data_start = ifd1_at + ifd_len(&ifd1);
    let thumb_at = data_start + out_of_line_len(&ifd0) + out_of_line_len(&gps) + out_of_line_len(&ifd1);
    ifd0[2] = long(0x8825, gps_at);
    ifd1[1] = long(0x0201, thumb_at);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&42u16.to_be_bytes());
    tiff.extend_from_slice(&8u32.to_be_bytes());

    let mut data = Vec::new();
    write_ifd(&mut tiff, &mut data, data_start, &ifd0, ifd1_at);
    write_ifd(&mut tiff, &mut data, data_start, &gps, 0);
    write_ifd(&mut tiff, &mut data, data_start, &ifd1, 0);
    tiff.extend_from_slice(&data);
    tiff.extend_from_slice(thumbnail);
    tiff
}

// ── end-to-end scenario ──────────────────────────────────────────────

#[test]
fn edited_canon_with_gps() {
    let analysis = analyze_bytes(b"", &EditedCanon, None);

    assert_eq!(analysis.status(), ExtractionStatus::Complete);
    assert_eq!(analysis.forensic.risk_score, 50);

    let alert = analysis.forensic.tampering_alert.as_deref().unwrap();
    assert!(alert.contains("Photoshop"));

    let deep = analysis.record.deep();
    assert_eq!(deep[RISK_SCORE_KEY], "50/100");
    assert_eq!(deep[TAMPERING_ALERT_KEY], alert);

    let categories = categorize(&analysis.merged());
    let gps = categories.iter().find(|c| c.title.contains("GPS")).unwrap();
    let software = categories.iter().find(|c| c.title.contains("SOFTWARE")).unwrap();
    assert!(!gps.is_empty());
    assert!(!software.is_empty());
    assert!(software.tags.contains_key("EXIF:Software"));
}

#[test]
fn basic_make_not_duplicated_in_deep() {
    let analysis = analyze_bytes(b"", &EditedCanon, None);
    assert!(analysis.record.basic().contains_key("EXIF:Make"));
    assert!(!analysis.record.deep().keys().any(|k| k.ends_with(": Make")));
    assert!(analysis.record.deep().contains_key("DEEP:Exif IFD0: Orientation"));
}

#[test]
fn every_tag_lands_in_exactly_one_category() {
    let merged = analyze_bytes(b"", &EditedCanon, Some("00ff".into())).merged();
    let categories = categorize(&merged);
    let total: usize = categories.iter().map(|c| c.tags.len()).sum();
    assert_eq!(total, merged.len());
}

#[test]
fn search_and_intel_over_analysis() {
    let analysis = analyze_bytes(b"", &EditedCanon, None);
    let merged = analysis.merged();

    assert_eq!(filter(&merged, ""), merged);
    let location = filter(&merged, "location");
    assert!(location.contains_key("EXIF:GPS_LAT_DECIMAL"));
    assert!(location.contains_key("EXIF:GPSLongitude"));

    let info = FileInfo {
        name: Some("IMG_0420.JPG".into()),
        size: Some(3 * 1024 * 1024),
        mime: Some("image/jpeg".into()),
    };
    let intel = quick_intel(&merged, &info);
    assert_eq!(intel[2].1, "3.00 MB");
    assert_eq!(intel[4].1, "48.858056, 2.294444");
    assert_eq!(intel[5].1, "Canon");
    assert_eq!(intel[6].1, "Canon EOS R5");
}

#[test]
fn unreadable_input_is_flagged_not_empty() {
    let analysis = analyze_bytes(b"junk", &Broken, None);
    assert_eq!(analysis.status(), ExtractionStatus::Unreadable);
    assert_eq!(analysis.failures.len(), 2);
    assert!(analysis.record.basic().is_empty());
}

// ── real files ───────────────────────────────────────────────────────

#[test]
fn jpeg_exif_read_through_nom_exif() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edited.jpg");
    std::fs::write(&path, jpeg_with_exif("Canon", "Adobe Photoshop 2023")).unwrap();

    let analysis = analyze_path(&path, &NomExifSource::new(), &Config::default()).unwrap();
    assert_eq!(analysis.status(), ExtractionStatus::Complete);
    assert_eq!(analysis.record.basic()["EXIF:Make"], "Canon");
    assert!(analysis.forensic.tampering_alert.as_deref().unwrap().contains("Photoshop"));
    assert!(analysis.forensic.risk_score >= 15);
    assert_eq!(analysis.forensic.content_hash.as_ref().map(String::len), Some(64));
}

#[test]
fn camera_file_gps_thumbnail_and_tiers() {
    let bytes = with_exif(camera_tiff(&encode_jpeg(16, 8)));
    let analysis = analyze_bytes(&bytes, &NomExifSource::new(), None);
    assert_eq!(analysis.status(), ExtractionStatus::Complete);

    let basic = analysis.record.basic();
    assert_eq!(basic["EXIF:Make"], "Canon");
    assert_eq!(basic["EXIF:GPS_LAT_DECIMAL"], "48.858056");
    assert_eq!(basic["EXIF:GPS_LONG_DECIMAL"], "-2.294444");
    assert_eq!(basic["EXIF:Embedded Thumbnail"], "YES (16x8)");
    assert!(basic.contains_key("EXIF:DateTime"));
    assert!(basic.contains_key("EXIF:GPSLatitude"));
    assert!(basic.contains_key("EXIF:JPEGInterchangeFormat"));

    let deep = analysis.record.deep();
    for key in basic.keys() {
        let name = key.trim_start_matches("EXIF:");
        assert!(
            !deep.keys().any(|k| k.ends_with(&format!(": {name}"))),
            "{name} is in both basic and deep"
        );
    }
    assert!(!deep.keys().any(|k| k.ends_with(": ModifyDate") || k.ends_with(": ThumbnailOffset")));
    assert!(deep.contains_key("DEEP:Exif Thumbnail: Compression"));

    assert_eq!(analysis.forensic.risk_score, 35);
}

#[test]
fn stripped_copy_has_no_metadata() {
    let dir = TempDir::new().unwrap();
    let source = jpeg_with_exif("Nikon", "Snapseed");

    let cleaned = strip_metadata(&source, Some("image/jpeg"), dir.path()).unwrap();
    let analysis = analyze_path(&cleaned, &NomExifSource::new(), &Config::default()).unwrap();

    assert!(analysis.record.basic().is_empty());
    assert!(analysis.forensic.tampering_alert.is_none());
    assert_eq!(analysis.forensic.risk_score, 0);
}

#[test]
fn report_lists_every_tag() {
    let dir = TempDir::new().unwrap();
    let merged = analyze_bytes(b"", &EditedCanon, None).merged();

    let path = export_report(&merged, dir.path()).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    for (key, value) in &merged {
        assert!(text.contains(&format!("{key} : {value}")), "{key} missing");
    }
}
