use serde::Serialize;
use std::collections::BTreeMap;

/// Qualified tag key → display value.
pub type TagMap = BTreeMap<String, String>;

/// Prefix for tags read through the standard vocabulary.
pub const BASIC_PREFIX: &str = "EXIF:";
/// Prefix for tags placed in the deep tier by the directory reader.
pub const DEEP_PREFIX: &str = "DEEP:";

/// Metadata of one analyzed image, split into three tiers.
///
/// - `basic`: standard vocabulary, keyed `EXIF:<name>`
/// - `maker_specific`: manufacturer note blocks (`<Directory>:<name>`) plus
///   the synthesized convenience fields (lens, shutter count, serial, owner)
/// - `deep`: descriptive/provenance blocks and every other directory tag not
///   already in `basic` (`DEEP:<Directory>: <name>`), plus the `FORENSIC:` fields
///
/// Blank values never survive construction. A record is built once per
/// image and only read afterwards; [`with_deep_entries`](Self::with_deep_entries)
/// returns a new record rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataRecord {
    basic: TagMap,
    maker_specific: TagMap,
    deep: TagMap,
}

impl MetadataRecord {
    pub fn from_tiers(basic: TagMap, maker_specific: TagMap, deep: TagMap) -> Self {
        Self {
            basic: drop_blank(basic),
            maker_specific: drop_blank(maker_specific),
            deep: drop_blank(deep),
        }
    }

    pub fn basic(&self) -> &TagMap {
        &self.basic
    }

    pub fn maker_specific(&self) -> &TagMap {
        &self.maker_specific
    }

    pub fn deep(&self) -> &TagMap {
        &self.deep
    }

    /// Union of all tiers. On a key collision the later tier wins
    /// (basic, then maker-specific, then deep).
    pub fn merged(&self) -> TagMap {
        let mut all = self.basic.clone();
        all.extend(self.maker_specific.iter().map(|(k, v)| (k.clone(), v.clone())));
        all.extend(self.deep.iter().map(|(k, v)| (k.clone(), v.clone())));
        all
    }

    /// Total number of entries across the three tiers.
    pub fn len(&self) -> usize {
        self.basic.len() + self.maker_specific.len() + self.deep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of this record with extra entries merged into the deep tier.
    pub fn with_deep_entries<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut deep = self.deep.clone();
        deep.extend(entries);
        Self::from_tiers(self.basic.clone(), self.maker_specific.clone(), deep)
    }
}

fn drop_blank(map: TagMap) -> TagMap {
    map.into_iter().filter(|(_, v)| !v.trim().is_empty()).collect()
}
