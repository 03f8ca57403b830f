use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::{timestamp_millis, write_atomic};
use crate::error::Result;
use crate::record::TagMap;

/// Entry lines per page before a break is inserted.
pub const LINES_PER_PAGE: usize = 45;
/// Form feed; monospaced printers and pagers start a new page on it.
pub const PAGE_BREAK: char = '\x0c';

const TITLE: &str = "EXIF FORENSIC REPORT";
const SEPARATOR: &str = "====================================";

/// Render `tags` as a monospaced text report.
///
/// A header (title, generation time, separator) is followed by one
/// `key : value` line per tag, with a page break after every
/// [`LINES_PER_PAGE`] lines.
pub fn render_report(tags: &TagMap) -> String {
    let mut out = String::new();
    let generated = chrono::Local::now().format("%a %b %d %H:%M:%S %Z %Y");
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "Generated: {generated}");
    let _ = writeln!(out, "{SEPARATOR}");

    for (line, (key, value)) in tags.iter().enumerate() {
        let value = if value.trim().is_empty() { "EMPTY" } else { value.as_str() };
        let _ = writeln!(out, "{key} : {value}");
        if (line + 1) % LINES_PER_PAGE == 0 {
            out.push(PAGE_BREAK);
            out.push('\n');
        }
    }

    out
}

/// Render and write the report to `dir/Forensic_Report_<millis>.txt`.
pub fn export_report(tags: &TagMap, dir: &Path) -> Result<PathBuf> {
    let file_name = format!("Forensic_Report_{}.txt", timestamp_millis());
    write_atomic(dir, &file_name, render_report(tags).as_bytes()).inspect_err(|e| {
        log::warn!("Report export failed: {e}");
    })
}
