//! # exif-forensics
//!
//! Privacy and forensic review of image metadata: pull every EXIF, maker-note,
//! XMP, IPTC and ICC field out of an image, score how much it gives away, flag
//! signs of editing, and group the findings into risk categories.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_forensics::config::Config;
//! use exif_forensics::exif::NomExifSource;
//! use exif_forensics::pipeline::{analyze_path, collect_images};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!     let source = NomExifSource::new();
//!
//!     for path in collect_images(&[PathBuf::from("./photos")], config.analysis.follow_links) {
//!         let analysis = analyze_path(&path, &source, &config)?;
//!         println!("{}: risk {}/100", path.display(), analysis.forensic.risk_score);
//!
//!         if let Some(alert) = &analysis.forensic.tampering_alert {
//!             println!("  {alert}");
//!         }
//!         for category in analysis.categories().iter().filter(|c| !c.is_empty()) {
//!             println!("  {} [{}]: {} tags", category.title, category.risk_level, category.tags.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! Each stage is a plain function over a [`record::TagMap`], so a front end can
//! re-run categorization and search on every keystroke without touching the file:
//!
//! ```rust,no_run
//! use exif_forensics::categorize::categorize;
//! use exif_forensics::exif::{NomExifSource, extract};
//! use exif_forensics::forensic::ForensicReport;
//! use exif_forensics::search::filter;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let extraction = extract(&bytes, &NomExifSource::new());
//! println!("status: {:?}", extraction.status());
//!
//! let report = ForensicReport::assess(&extraction.record, None);
//! let record = report.inject(&extraction.record);
//!
//! let hits = filter(&record.merged(), "location");
//! for category in categorize(&hits) {
//!     if !category.is_empty() {
//!         println!("{}: {:?}", category.title, category.tags);
//!     }
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`exif`]: tag sources and the three-tier extractor
//! - [`record`]: the three-tier [`MetadataRecord`](record::MetadataRecord)
//! - [`forensic`]: risk score, tampering alert, SHA-256
//! - [`categorize`]: fixed and overflow risk categories
//! - [`search`]: normalized, synonym-expanded, fuzzy tag filter
//! - [`intel`]: seven-line quick summary
//! - [`export`]: text report and metadata-stripped copy
//! - [`pipeline`]: file collection and one-shot analysis
//! - [`config`]: configuration types and loading/saving

pub mod categorize;
pub mod config;
pub mod error;
pub mod exif;
pub mod export;
pub mod forensic;
pub mod intel;
pub mod pipeline;
pub mod record;
pub mod search;

pub use error::{Error, Result};
