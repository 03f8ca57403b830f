use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use walkdir::WalkDir;

use crate::categorize::{RiskCategory, categorize};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::exif::{self, ExtractionStatus, NomExifSource, SourceFailure, TagSource};
use crate::forensic::{ForensicReport, content_hash};
use crate::record::{MetadataRecord, TagMap};
use crate::search;

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "tif", "tiff",
    // HEIF containers
    "heic", "heif", "avif",
    // RAW formats with a TIFF/ISOBMFF EXIF block
    "cr3", "cr2", "dng", "nef", "arw", "raf", "orf", "rw2", "pef", "srw",
];

/// MIME type for a supported image extension.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "avif" => "image/avif",
        "cr2" => "image/x-canon-cr2",
        "cr3" => "image/x-canon-cr3",
        "dng" => "image/x-adobe-dng",
        "nef" => "image/x-nikon-nef",
        "arw" => "image/x-sony-arw",
        "raf" => "image/x-fuji-raf",
        "orf" => "image/x-olympus-orf",
        "rw2" => "image/x-panasonic-rw2",
        "pef" => "image/x-pentax-pef",
        "srw" => "image/x-samsung-srw",
        _ => return None,
    };
    Some(mime)
}

/// The finished analysis of one image.
///
/// Built in one pass by [`analyze_bytes`] and never modified afterwards.
/// Categories and search results are computed from it on demand.
///
/// # Example
///
/// ```rust,no_run
/// use exif_forensics::config::Config;
/// use exif_forensics::exif::NomExifSource;
/// use exif_forensics::pipeline::analyze_path;
/// use std::path::Path;
///
/// let analysis = analyze_path(Path::new("photo.jpg"), &NomExifSource::new(), &Config::default())?;
/// println!("Risk score: {}/100", analysis.forensic.risk_score);
/// for category in analysis.categories().iter().filter(|c| !c.is_empty()) {
///     println!("{} ({} tags)", category.title, category.tags.len());
/// }
/// # Ok::<(), exif_forensics::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Extracted tiers with the `FORENSIC:` entries in `deep`.
    pub record: MetadataRecord,
    pub failures: Vec<SourceFailure>,
    pub forensic: ForensicReport,
}

impl Analysis {
    pub fn status(&self) -> ExtractionStatus {
        ExtractionStatus::from_failures(&self.failures)
    }

    /// All tiers in one map.
    pub fn merged(&self) -> TagMap {
        self.record.merged()
    }

    pub fn categories(&self) -> Vec<RiskCategory> {
        categorize(&self.merged())
    }

    pub fn search(&self, query: &str) -> TagMap {
        search::filter(&self.merged(), query)
    }
}

/// Collect supported image files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively. Only files with supported image extensions are included.
///
/// # Example
///
/// ```rust,no_run
/// use exif_forensics::pipeline::collect_images;
/// use std::path::PathBuf;
///
/// let images = collect_images(&[
///     PathBuf::from("photo.jpg"),       // single file
///     PathBuf::from("./photos/"),        // entire directory
/// ], true);
/// println!("Found {} images", images.len());
/// ```
pub fn collect_images(paths: &[PathBuf], follow_links: bool) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                images.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(follow_links)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported_image(p) {
                    images.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    images
}

/// Check if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Extract, score and inject the forensic fields as one unit.
///
/// `content_hash` is attached as-is; pass `None` when hashing was skipped
/// or failed.
pub fn analyze_bytes(bytes: &[u8], source: &dyn TagSource, content_hash: Option<String>) -> Analysis {
    let extraction = exif::extract(bytes, source);
    let forensic = ForensicReport::assess(&extraction.record, content_hash);
    let record = forensic.inject(&extraction.record);

    Analysis {
        record,
        failures: extraction.failures,
        forensic,
    }
}

/// Analyze the image at `path`.
///
/// The file is read once for metadata and streamed a second time for the
/// hash. Only failing to read the file at all is an error; a hash failure
/// leaves [`ForensicReport::content_hash`] empty.
pub fn analyze_path(path: &Path, source: &dyn TagSource, config: &Config) -> Result<Analysis> {
    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let hash = if config.analysis.compute_hash {
        match File::open(path).map_err(Error::from).and_then(|f| content_hash(BufReader::new(f))) {
            Ok(hash) => Some(hash),
            Err(e) => {
                log::warn!("Could not hash {}: {e}", path.display());
                None
            }
        }
    } else {
        None
    };

    let analysis = analyze_bytes(&bytes, source, hash);
    if analysis.status() != ExtractionStatus::Complete {
        log::warn!("{}: extraction {:?}", path.display(), analysis.status());
    }
    Ok(analysis)
}

/// Run [`analyze_path`] with the bundled [`NomExifSource`] on the blocking
/// thread pool.
///
/// Dropping the handle abandons the result; the run itself completes in the
/// background.
pub fn analyze_in_background(path: PathBuf, config: Config) -> JoinHandle<Result<Analysis>> {
    tokio::task::spawn_blocking(move || analyze_path(&path, &NomExifSource::new(), &config))
}
