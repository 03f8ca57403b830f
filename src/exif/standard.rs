//! The standard tag vocabulary.
//!
//! Every name the `basic` tier can hold is listed here with the IFD group and
//! tag code it is read from. The extractor walks this table in order; nothing
//! is discovered at runtime. Bump [`STANDARD_TABLE_VERSION`] whenever an entry
//! is added, removed or renamed.

/// Version of [`STANDARD_TAGS`].
pub const STANDARD_TABLE_VERSION: u32 = 1;

/// Which IFD a standard tag lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfdGroup {
    /// IFD0 together with its Exif sub-IFD.
    Primary,
    /// GPS sub-IFD.
    Gps,
    /// IFD1, the embedded thumbnail.
    Thumbnail,
}

impl IfdGroup {
    /// Index nom-exif reports for entries of this group. Sub-IFDs share
    /// their parent's index.
    pub fn ifd_index(self) -> usize {
        match self {
            IfdGroup::Primary | IfdGroup::Gps => 0,
            IfdGroup::Thumbnail => 1,
        }
    }
}

/// One entry in the standard vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct StandardTag {
    pub name: &'static str,
    pub group: IfdGroup,
    pub code: u16,
}

const fn primary(name: &'static str, code: u16) -> StandardTag {
    StandardTag { name, group: IfdGroup::Primary, code }
}

const fn gps(name: &'static str, code: u16) -> StandardTag {
    StandardTag { name, group: IfdGroup::Gps, code }
}

const fn thumb(name: &'static str, code: u16) -> StandardTag {
    StandardTag { name, group: IfdGroup::Thumbnail, code }
}

pub const TAG_SOFTWARE: &str = "Software";
pub const TAG_MAKE: &str = "Make";
pub const TAG_MODEL: &str = "Model";
pub const TAG_THUMBNAIL_OFFSET: &str = "JPEGInterchangeFormat";
pub const TAG_THUMBNAIL_LENGTH: &str = "JPEGInterchangeFormatLength";

pub const STANDARD_TAGS: &[StandardTag] = &[
    // IFD0 (TIFF)
    primary("NewSubfileType", 0x00FE),
    primary("SubfileType", 0x00FF),
    primary("ImageWidth", 0x0100),
    primary("ImageLength", 0x0101),
    primary("BitsPerSample", 0x0102),
    primary("Compression", 0x0103),
    primary("PhotometricInterpretation", 0x0106),
    primary("ImageDescription", 0x010E),
    primary(TAG_MAKE, 0x010F),
    primary(TAG_MODEL, 0x0110),
    primary("StripOffsets", 0x0111),
    primary("Orientation", 0x0112),
    primary("SamplesPerPixel", 0x0115),
    primary("RowsPerStrip", 0x0116),
    primary("StripByteCounts", 0x0117),
    primary("XResolution", 0x011A),
    primary("YResolution", 0x011B),
    primary("PlanarConfiguration", 0x011C),
    primary("ResolutionUnit", 0x0128),
    primary("TransferFunction", 0x012D),
    primary(TAG_SOFTWARE, 0x0131),
    primary("DateTime", 0x0132),
    primary("Artist", 0x013B),
    primary("WhitePoint", 0x013E),
    primary("PrimaryChromaticities", 0x013F),
    primary("YCbCrCoefficients", 0x0211),
    primary("YCbCrSubSampling", 0x0212),
    primary("YCbCrPositioning", 0x0213),
    primary("ReferenceBlackWhite", 0x0214),
    primary("Xmp", 0x02BC),
    primary("Copyright", 0x8298),
    primary("DNGVersion", 0xC612),
    primary("DefaultCropSize", 0xC620),
    // Exif sub-IFD
    primary("ExposureTime", 0x829A),
    primary("FNumber", 0x829D),
    primary("ExposureProgram", 0x8822),
    primary("SpectralSensitivity", 0x8824),
    primary("PhotographicSensitivity", 0x8827),
    primary("OECF", 0x8828),
    primary("SensitivityType", 0x8830),
    primary("StandardOutputSensitivity", 0x8831),
    primary("RecommendedExposureIndex", 0x8832),
    primary("ISOSpeed", 0x8833),
    primary("ISOSpeedLatitudeyyy", 0x8834),
    primary("ISOSpeedLatitudezzz", 0x8835),
    primary("ExifVersion", 0x9000),
    primary("DateTimeOriginal", 0x9003),
    primary("DateTimeDigitized", 0x9004),
    primary("OffsetTime", 0x9010),
    primary("OffsetTimeOriginal", 0x9011),
    primary("OffsetTimeDigitized", 0x9012),
    primary("ComponentsConfiguration", 0x9101),
    primary("CompressedBitsPerPixel", 0x9102),
    primary("ShutterSpeedValue", 0x9201),
    primary("ApertureValue", 0x9202),
    primary("BrightnessValue", 0x9203),
    primary("ExposureBiasValue", 0x9204),
    primary("MaxApertureValue", 0x9205),
    primary("SubjectDistance", 0x9206),
    primary("MeteringMode", 0x9207),
    primary("LightSource", 0x9208),
    primary("Flash", 0x9209),
    primary("FocalLength", 0x920A),
    primary("SubjectArea", 0x9214),
    primary("MakerNote", 0x927C),
    primary("UserComment", 0x9286),
    primary("SubSecTime", 0x9290),
    primary("SubSecTimeOriginal", 0x9291),
    primary("SubSecTimeDigitized", 0x9292),
    primary("FlashpixVersion", 0xA000),
    primary("ColorSpace", 0xA001),
    primary("PixelXDimension", 0xA002),
    primary("PixelYDimension", 0xA003),
    primary("RelatedSoundFile", 0xA004),
    primary("FlashEnergy", 0xA20B),
    primary("SpatialFrequencyResponse", 0xA20C),
    primary("FocalPlaneXResolution", 0xA20E),
    primary("FocalPlaneYResolution", 0xA20F),
    primary("FocalPlaneResolutionUnit", 0xA210),
    primary("SubjectLocation", 0xA214),
    primary("ExposureIndex", 0xA215),
    primary("SensingMethod", 0xA217),
    primary("FileSource", 0xA300),
    primary("SceneType", 0xA301),
    primary("CFAPattern", 0xA302),
    primary("CustomRendered", 0xA401),
    primary("ExposureMode", 0xA402),
    primary("WhiteBalance", 0xA403),
    primary("DigitalZoomRatio", 0xA404),
    primary("FocalLengthIn35mmFilm", 0xA405),
    primary("SceneCaptureType", 0xA406),
    primary("GainControl", 0xA407),
    primary("Contrast", 0xA408),
    primary("Saturation", 0xA409),
    primary("Sharpness", 0xA40A),
    primary("DeviceSettingDescription", 0xA40B),
    primary("SubjectDistanceRange", 0xA40C),
    primary("ImageUniqueID", 0xA420),
    primary("CameraOwnerName", 0xA430),
    primary("BodySerialNumber", 0xA431),
    primary("LensSpecification", 0xA432),
    primary("LensMake", 0xA433),
    primary("LensModel", 0xA434),
    primary("LensSerialNumber", 0xA435),
    primary("Gamma", 0xA500),
    // GPS sub-IFD
    gps("GPSVersionID", 0x0000),
    gps("GPSLatitudeRef", 0x0001),
    gps("GPSLatitude", 0x0002),
    gps("GPSLongitudeRef", 0x0003),
    gps("GPSLongitude", 0x0004),
    gps("GPSAltitudeRef", 0x0005),
    gps("GPSAltitude", 0x0006),
    gps("GPSTimeStamp", 0x0007),
    gps("GPSSatellites", 0x0008),
    gps("GPSStatus", 0x0009),
    gps("GPSMeasureMode", 0x000A),
    gps("GPSDOP", 0x000B),
    gps("GPSSpeedRef", 0x000C),
    gps("GPSSpeed", 0x000D),
    gps("GPSTrackRef", 0x000E),
    gps("GPSTrack", 0x000F),
    gps("GPSImgDirectionRef", 0x0010),
    gps("GPSImgDirection", 0x0011),
    gps("GPSMapDatum", 0x0012),
    gps("GPSDestLatitudeRef", 0x0013),
    gps("GPSDestLatitude", 0x0014),
    gps("GPSDestLongitudeRef", 0x0015),
    gps("GPSDestLongitude", 0x0016),
    gps("GPSDestBearingRef", 0x0017),
    gps("GPSDestBearing", 0x0018),
    gps("GPSDestDistanceRef", 0x0019),
    gps("GPSDestDistance", 0x001A),
    gps("GPSProcessingMethod", 0x001B),
    gps("GPSAreaInformation", 0x001C),
    gps("GPSDateStamp", 0x001D),
    gps("GPSDifferential", 0x001E),
    gps("GPSHPositioningError", 0x001F),
    // IFD1
    thumb("ThumbnailImageWidth", 0x0100),
    thumb("ThumbnailImageLength", 0x0101),
    thumb("ThumbnailOrientation", 0x0112),
    thumb(TAG_THUMBNAIL_OFFSET, 0x0201),
    thumb(TAG_THUMBNAIL_LENGTH, 0x0202),
];

/// The standard tag stored at `code` in IFD `ifd`, if any.
pub fn by_code(ifd: usize, code: u16) -> Option<&'static StandardTag> {
    STANDARD_TAGS
        .iter()
        .find(|t| t.group.ifd_index() == ifd && t.code == code)
}
