/// How a metadata directory's tags are tiered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryClass {
    /// Proprietary manufacturer note block.
    MakerSpecific,
    /// XMP, IPTC or ICC blocks.
    Descriptive,
    /// Anything else (EXIF IFDs, GPS, container headers, ...).
    Other,
}

pub const XMP_DIRECTORY: &str = "XMP";
pub const IPTC_DIRECTORY: &str = "IPTC";
pub const ICC_DIRECTORY: &str = "ICC Profile";

// Directory identifiers are matched exactly; readers must emit these names.
const DIRECTORY_CLASSES: &[(&str, DirectoryClass)] = &[
    ("Canon Makernote", DirectoryClass::MakerSpecific),
    ("Nikon Makernote", DirectoryClass::MakerSpecific),
    ("Sony Makernote", DirectoryClass::MakerSpecific),
    ("Olympus Makernote", DirectoryClass::MakerSpecific),
    ("Panasonic Makernote", DirectoryClass::MakerSpecific),
    ("Fujifilm Makernote", DirectoryClass::MakerSpecific),
    (XMP_DIRECTORY, DirectoryClass::Descriptive),
    (IPTC_DIRECTORY, DirectoryClass::Descriptive),
    (ICC_DIRECTORY, DirectoryClass::Descriptive),
];

/// Classify a directory by its identifier.
pub fn classify(directory: &str) -> DirectoryClass {
    DIRECTORY_CLASSES
        .iter()
        .find(|(name, _)| *name == directory)
        .map(|(_, class)| *class)
        .unwrap_or(DirectoryClass::Other)
}
