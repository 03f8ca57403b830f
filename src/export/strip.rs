use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::{timestamp_millis, write_atomic};
use crate::error::Result;

pub const JPEG_QUALITY: u8 = 95;

/// Decode `bytes` and re-encode the raster alone.
///
/// Re-encoding from pixels drops every metadata segment (EXIF, XMP, IPTC,
/// ICC). JPEG output is flattened to RGB.
pub fn encode_clean(bytes: &[u8], png: bool) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    let mut out = Vec::new();

    if png {
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    } else {
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    }

    Ok(out)
}

/// Write a metadata-free copy of `bytes` to `dir/Exif_Removed_<millis>.<ext>`.
///
/// PNG is kept when `mime` names it; anything else becomes JPEG.
pub fn strip_metadata(bytes: &[u8], mime: Option<&str>, dir: &Path) -> Result<PathBuf> {
    let png = mime.is_some_and(|m| m.to_lowercase().contains("png"));
    let extension = if png { "png" } else { "jpg" };

    let clean = encode_clean(bytes, png).inspect_err(|e| {
        log::warn!("Could not re-encode image: {e}");
    })?;

    let file_name = format!("Exif_Removed_{}.{extension}", timestamp_millis());
    write_atomic(dir, &file_name, &clean)
}
