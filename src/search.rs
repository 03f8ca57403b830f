//! Free-text filtering over a merged tag set.

use crate::record::TagMap;

/// Canonical concepts and the literal terms they expand to.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("location", &["gps", "latitude", "longitude", "coords"]),
    ("device", &["make", "model", "serial", "camera"]),
    ("edited", &["photoshop", "snapseed", "tampering"]),
    ("hash", &["sha", "sha256", "fingerprint"]),
    ("forensic", &["risk", "payload", "evidence"]),
];

/// Lowercase and strip spaces, underscores, hyphens and colons.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | ':'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A parsed search query: the normalized text plus its synonym expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw.trim());
        let mut terms = Vec::new();
        if !normalized.is_empty() {
            terms.push(normalized.clone());
            for (concept, related) in SYNONYMS {
                if normalized.contains(concept) {
                    terms.extend(related.iter().map(|t| normalize(t)));
                }
            }
        }
        Self {
            raw: raw.to_string(),
            terms,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The query itself followed by any synonym terms, all normalized.
    /// Empty for a blank query.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_blank(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether a tag passes this query. A blank query matches everything.
    pub fn matches(&self, key: &str, value: &str) -> bool {
        if self.is_blank() {
            return true;
        }
        let key = normalize(key);
        let value = normalize(value);
        self.terms.iter().any(|term| {
            key.contains(term.as_str()) || value.contains(term.as_str()) || fuzzy_match(term, &key, &value)
        })
    }
}

/// Any overlapping two-character window of `term` found in key or value.
fn fuzzy_match(term: &str, key: &str, value: &str) -> bool {
    let chars: Vec<char> = term.chars().collect();
    if chars.len() < 2 {
        return false;
    }
    chars.windows(2).any(|pair| {
        let token: String = pair.iter().collect();
        key.contains(&token) || value.contains(&token)
    })
}

/// The subset of `tags` matching `query`, in input order.
///
/// A blank query returns `tags` unchanged. Matching is deliberately loose:
/// besides substring hits on the normalized key or value, any two-character
/// slice of a query term is enough.
///
/// ```rust
/// use exif_forensics::record::TagMap;
/// use exif_forensics::search::filter;
///
/// let mut tags = TagMap::new();
/// tags.insert("EXIF:GPSLatitude".into(), "48/1".into());
/// tags.insert("EXIF:Make".into(), "Canon".into());
///
/// assert_eq!(filter(&tags, "  "), tags);
/// assert!(filter(&tags, "location").contains_key("EXIF:GPSLatitude"));
/// ```
pub fn filter(tags: &TagMap, query: &str) -> TagMap {
    let query = SearchQuery::new(query);
    if query.is_blank() {
        return tags.clone();
    }
    tags.iter()
        .filter(|(k, v)| query.matches(k, v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
