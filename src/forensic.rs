//! Forensic scoring: a bounded privacy risk score, a tampering heuristic on
//! the `Software` tag, and a streaming SHA-256 of the raw file.
//!
//! The rule weights are a fixed heuristic and are reproduced exactly.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Read;

use crate::error::Result;
use crate::exif::standard::TAG_SOFTWARE;
use crate::record::{BASIC_PREFIX, MetadataRecord, TagMap};

pub const RISK_SCORE_KEY: &str = "FORENSIC: Risk Score";
pub const TAMPERING_ALERT_KEY: &str = "FORENSIC: Tampering Alert";
pub const CONTENT_HASH_KEY: &str = "FORENSIC: SHA-256 Hash";

pub const MAX_RISK_SCORE: u8 = 100;

const HASH_BUFFER_SIZE: usize = 8192;

/// Editing tools that trigger the tampering alert.
const TAMPERING_TOOLS: &[&str] = &["photoshop", "snapseed", "lightroom"];

/// Editing tools that add to the risk score.
const SCORED_TOOLS: &[&str] = &["photoshop", "adobe", "snapseed"];

/// One additive rule: `weight` applies once if any key contains any keyword.
struct RiskRule {
    keywords: &'static [&'static str],
    weight: u8,
    /// Also match the keywords against the standard `Software` value.
    checks_software: bool,
}

const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        keywords: &["gps"],
        weight: 35,
        checks_software: false,
    },
    RiskRule {
        keywords: &["serial"],
        weight: 20,
        checks_software: false,
    },
    RiskRule {
        keywords: &["owner", "artist"],
        weight: 15,
        checks_software: false,
    },
    RiskRule {
        keywords: SCORED_TOOLS,
        weight: 15,
        checks_software: true,
    },
    RiskRule {
        keywords: &["xmp", "history"],
        weight: 10,
        checks_software: false,
    },
];

fn software_key() -> String {
    format!("{BASIC_PREFIX}{TAG_SOFTWARE}")
}

/// Additive privacy risk score in `0..=100`.
///
/// Every rule whose keywords appear (case-insensitively) in any key adds its
/// weight once. The editing-tool rule also fires when the standard `Software`
/// value names one of the tools.
///
/// ```rust
/// use exif_forensics::forensic::risk_score;
/// use exif_forensics::record::TagMap;
///
/// let mut tags = TagMap::new();
/// tags.insert("EXIF:GPSLatitude".into(), "48/1, 51/1, 29/1".into());
/// tags.insert("EXIF:Software".into(), "Adobe Photoshop 2023".into());
/// assert_eq!(risk_score(&tags), 50);
/// ```
pub fn risk_score(tags: &TagMap) -> u8 {
    let keys: Vec<String> = tags.keys().map(|k| k.to_lowercase()).collect();
    let software = tags.get(&software_key()).map(|v| v.to_lowercase());

    let total: u32 = RISK_RULES
        .iter()
        .filter(|rule| {
            let by_key = keys.iter().any(|k| rule.keywords.iter().any(|kw| k.contains(kw)));
            let by_software = rule.checks_software
                && software
                    .as_deref()
                    .is_some_and(|s| rule.keywords.iter().any(|kw| s.contains(kw)));
            by_key || by_software
        })
        .map(|rule| u32::from(rule.weight))
        .sum();

    total.min(u32::from(MAX_RISK_SCORE)) as u8
}

/// Alert text when the standard `Software` value names a known editing tool.
///
/// Only `EXIF:Software` is consulted.
pub fn tampering_alert(tags: &TagMap) -> Option<String> {
    let software = tags.get(&software_key())?;
    let lower = software.to_lowercase();
    TAMPERING_TOOLS
        .iter()
        .any(|tool| lower.contains(tool))
        .then(|| format!("Possible Editing Detected: {software}"))
}

/// SHA-256 of everything `reader` yields, as lowercase hex.
pub fn content_hash<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// The forensic fields computed for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForensicReport {
    pub risk_score: u8,
    pub tampering_alert: Option<String>,
    /// Absent when hashing was skipped or failed.
    pub content_hash: Option<String>,
}

impl ForensicReport {
    /// Score `record` and attach an already computed hash.
    pub fn assess(record: &MetadataRecord, content_hash: Option<String>) -> Self {
        let merged = record.merged();
        Self {
            risk_score: risk_score(&merged),
            tampering_alert: tampering_alert(&merged),
            content_hash,
        }
    }

    /// The `FORENSIC:` deep-tier entries. Absent fields produce no entry.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![(RISK_SCORE_KEY.to_string(), format!("{}/{MAX_RISK_SCORE}", self.risk_score))];
        if let Some(alert) = &self.tampering_alert {
            entries.push((TAMPERING_ALERT_KEY.to_string(), alert.clone()));
        }
        if let Some(hash) = &self.content_hash {
            entries.push((CONTENT_HASH_KEY.to_string(), hash.clone()));
        }
        entries
    }

    /// A copy of `record` with the forensic entries in its deep tier.
    pub fn inject(&self, record: &MetadataRecord) -> MetadataRecord {
        record.with_deep_entries(self.entries())
    }
}
