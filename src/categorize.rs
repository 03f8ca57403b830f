//! Partition of a merged tag set into risk categories.
//!
//! Each tag lands in exactly one category: the first fixed category whose
//! predicate matches the uppercased key, otherwise an `AUTO:` overflow
//! category named after the key's namespace.

use serde::Serialize;

use crate::record::TagMap;

/// First id handed to overflow categories.
pub const DYNAMIC_ID_BASE: u32 = 100;

const UNKNOWN_GROUP: &str = "UNKNOWN";
const UNCLASSIFIED: &str = "UNCLASSIFIED METADATA";
const UNCLASSIFIED_COLOR: u32 = 0x888888;

/// A named group of tags with a risk label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskCategory {
    pub id: u32,
    pub title: String,
    pub risk_level: String,
    /// Display colour as `0xRRGGBB`.
    pub color: u32,
    pub tags: TagMap,
}

impl RiskCategory {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// How a front end lists an analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    /// Grouped by [`categorize`], empty categories hidden.
    #[default]
    Categorized,
    /// Every tag in one flat list.
    Complete,
}

/// Key test applied to the uppercased key.
struct Predicate {
    equals: &'static [&'static str],
    contains: &'static [&'static str],
}

impl Predicate {
    fn matches(&self, key: &str) -> bool {
        self.equals.contains(&key) || self.contains.iter().any(|needle| key.contains(needle))
    }
}

struct FixedCategory {
    id: u32,
    title: &'static str,
    risk_level: &'static str,
    color: u32,
    predicate: Predicate,
}

const fn contains(needles: &'static [&'static str]) -> Predicate {
    Predicate {
        equals: &[],
        contains: needles,
    }
}

// Evaluated in order; the first match wins.
const FIXED_CATEGORIES: &[FixedCategory] = &[
    FixedCategory {
        id: 1,
        title: "FORENSIC INTELLIGENCE",
        risk_level: "CRITICAL SECURITY SIGNALS",
        color: 0xFF00FF,
        predicate: contains(&["FORENSIC", "SHA-256", "RISK"]),
    },
    FixedCategory {
        id: 2,
        title: "GPS / LOCATION DATA",
        risk_level: "EXTREME RISK (STALKING)",
        color: 0xFF0000,
        predicate: contains(&["GPS", "LATITUDE", "LONGITUDE", "POSITION", "ALTITUDE"]),
    },
    FixedCategory {
        id: 3,
        title: "DEVICE IDENTIFICATION",
        risk_level: "HIGH RISK (FINGERPRINTING)",
        color: 0xFF4400,
        predicate: Predicate {
            equals: &["MAKE", "MODEL"],
            contains: &["SERIALNUMBER", "SERIAL NUMBER", "CAMERAID", "DEVICE", "LENS"],
        },
    },
    FixedCategory {
        id: 4,
        title: "DATE & TIME METADATA",
        risk_level: "HIGH RISK (RECONSTRUCTION)",
        color: 0xFF8800,
        predicate: contains(&[
            "DATETIME",
            "CREATEDATE",
            "MODIFYDATE",
            "DATE ORIGINAL",
            "SUBSEC",
            "DATESTAMP",
            "TIMESTAMP",
        ]),
    },
    FixedCategory {
        id: 5,
        title: "SOFTWARE / HISTORY",
        risk_level: "MEDIUM RISK (TAMPERING)",
        color: 0xFFFF00,
        predicate: contains(&[
            "SOFTWARE",
            "CREATORTOOL",
            "ADOBE",
            "PHOTOSHOP",
            "SNAPSEED",
            "PROCESSING",
            "HISTORY",
        ]),
    },
    FixedCategory {
        id: 6,
        title: "OWNER / AUTHOR INFO",
        risk_level: "MEDIUM RISK (IDENTITY LEAK)",
        color: 0x00FFCC,
        predicate: Predicate {
            equals: &["ARTIST"],
            contains: &["OWNERNAME", "COPYRIGHT", "AUTHOR", "BY-LINE"],
        },
    },
    FixedCategory {
        id: 7,
        title: "THUMBNAIL EMBEDDED DATA",
        risk_level: "LOW RISK (HIDDEN COPY)",
        color: 0x00CCFF,
        predicate: contains(&["THUMBNAIL", "PREVIEWIMAGE", "PREVIEW IMAGE"]),
    },
    FixedCategory {
        id: 8,
        title: "UNIQUE FILE IDENTIFIERS",
        risk_level: "LOW RISK (TRACKING)",
        color: 0x0088FF,
        predicate: contains(&["UNIQUEID", "DOCUMENTID", "INSTANCEID"]),
    },
    FixedCategory {
        id: 9,
        title: "NETWORK / SOURCE",
        risk_level: "LOW RISK (INFRASTRUCTURE)",
        color: 0x8844FF,
        predicate: contains(&["HOSTCOMPUTER", "NETWORK", "TRANSMISSION"]),
    },
    FixedCategory {
        id: 10,
        title: "CAMERA SETTINGS",
        risk_level: "STRICTLY FORENSIC",
        color: 0x00FF00,
        predicate: contains(&[
            "EXPOSURE",
            "FNUMBER",
            "F-NUMBER",
            "ISO",
            "FLASH",
            "FOCAL",
            "APERTURE",
            "SHUTTER",
        ]),
    },
];

/// Index into [`FIXED_CATEGORIES`] of the first predicate matching `key`.
fn fixed_slot(key: &str) -> Option<usize> {
    let upper = key.to_uppercase();
    FIXED_CATEGORIES.iter().position(|c| c.predicate.matches(&upper))
}

/// Overflow group name for a key: text before the first `:`, trimmed.
fn overflow_group(key: &str) -> &str {
    let group = key.split(':').next().unwrap_or_default().trim();
    if group.is_empty() { UNKNOWN_GROUP } else { group }
}

/// Partition `tags` into the ten fixed categories followed by one overflow
/// category per leftover namespace, in discovery order.
///
/// All ten fixed categories are always returned, empty or not. The union of
/// every category's tags equals `tags`.
///
/// ```rust
/// use exif_forensics::categorize::categorize;
/// use exif_forensics::record::TagMap;
///
/// let mut tags = TagMap::new();
/// tags.insert("EXIF:GPSLatitude".into(), "48/1".into());
/// tags.insert("ICC Profile: Rendering Intent".into(), "Perceptual".into());
///
/// let categories = categorize(&tags);
/// assert_eq!(categories.len(), 11);
/// assert_eq!(categories[1].tags.len(), 1);
/// assert_eq!(categories[10].title, "AUTO: ICC PROFILE");
/// ```
pub fn categorize(tags: &TagMap) -> Vec<RiskCategory> {
    let mut fixed: Vec<TagMap> = vec![TagMap::new(); FIXED_CATEGORIES.len()];
    let mut overflow: Vec<(String, TagMap)> = Vec::new();

    for (key, value) in tags {
        match fixed_slot(key) {
            Some(slot) => {
                fixed[slot].insert(key.clone(), value.clone());
            }
            None => {
                let group = overflow_group(key);
                let index = match overflow.iter().position(|(name, _)| name == group) {
                    Some(i) => i,
                    None => {
                        overflow.push((group.to_string(), TagMap::new()));
                        overflow.len() - 1
                    }
                };
                overflow[index].1.insert(key.clone(), value.clone());
            }
        }
    }

    let fixed = FIXED_CATEGORIES.iter().zip(fixed).map(|(def, tags)| RiskCategory {
        id: def.id,
        title: format!("{}. {}", def.id, def.title),
        risk_level: def.risk_level.to_string(),
        color: def.color,
        tags,
    });

    let dynamic = overflow.into_iter().enumerate().map(|(index, (group, tags))| RiskCategory {
        id: DYNAMIC_ID_BASE + index as u32,
        title: format!("AUTO: {}", group.to_uppercase()),
        risk_level: UNCLASSIFIED.to_string(),
        color: UNCLASSIFIED_COLOR,
        tags,
    });

    fixed.chain(dynamic).collect()
}
