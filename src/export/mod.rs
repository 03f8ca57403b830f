//! Artifacts written for the user: a paginated text report and a
//! metadata-free copy of the image.
//!
//! Both go through [`write_atomic`], so a failed export never leaves a
//! partial file in the output directory.

mod report;
mod strip;

pub use report::{LINES_PER_PAGE, PAGE_BREAK, export_report, render_report};
pub use strip::{JPEG_QUALITY, encode_clean, strip_metadata};

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::Result;

/// Write `contents` to `dir/file_name` via a temporary file in `dir`.
pub(crate) fn write_atomic(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    let target = dir.join(file_name);
    tmp.persist(&target)?;
    log::info!("Wrote {}", target.display());
    Ok(target)
}

/// Milliseconds since the epoch, used to name exported files.
pub(crate) fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
