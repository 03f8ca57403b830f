use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::{Bytes, DynImage, ImageEXIF, ImageICC};

use crate::error::{Error, Result};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const XMP_HEADER: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
const PNG_XMP_KEYWORD: &[u8] = b"XML:com.adobe.xmp";
const IPTC_HEADER: &[u8] = b"Photoshop 3.0\0";
const IPTC_8BIM: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

/// Raw metadata blocks found in an image container.
#[derive(Debug, Default)]
pub struct Segments {
    /// TIFF-structured EXIF data (starting at the byte-order mark).
    pub exif: Option<Bytes>,
    /// XMP packet text.
    pub xmp: Option<String>,
    /// APP13 "Photoshop 3.0" segment contents.
    pub iptc: Option<Bytes>,
    /// ICC profile bytes.
    pub icc: Option<Bytes>,
}

/// Locate the EXIF, XMP, IPTC and ICC blocks of a JPEG, PNG or WebP file.
pub fn locate(bytes: &[u8]) -> Result<Segments> {
    let data = Bytes::copy_from_slice(bytes);

    if bytes.starts_with(&[0xFF, 0xD8]) {
        let jpeg = Jpeg::from_bytes(data).map_err(|e| Error::Segment(e.to_string()))?;
        return Ok(Segments {
            exif: jpeg.exif(),
            xmp: find_jpeg_xmp(&jpeg),
            iptc: find_jpeg_iptc(&jpeg),
            icc: jpeg.icc_profile(),
        });
    }

    if bytes.starts_with(PNG_SIGNATURE) {
        let png = Png::from_bytes(data).map_err(|e| Error::Segment(e.to_string()))?;
        return Ok(Segments {
            exif: png.exif(),
            xmp: find_png_xmp(&png),
            iptc: None,
            icc: png.icc_profile(),
        });
    }

    match DynImage::from_bytes(data) {
        Ok(Some(image)) => Ok(Segments {
            exif: image.exif(),
            icc: image.icc_profile(),
            ..Default::default()
        }),
        Ok(None) => Err(Error::UnrecognizedFormat),
        Err(e) => Err(Error::Segment(e.to_string())),
    }
}

/// Find the XMP APP1 segment in a JPEG and return its packet text.
fn find_jpeg_xmp(jpeg: &Jpeg) -> Option<String> {
    jpeg.segments()
        .iter()
        .find(|s| s.marker() == 0xE1 && s.contents().starts_with(XMP_HEADER))
        .map(|s| String::from_utf8_lossy(&s.contents()[XMP_HEADER.len()..]).into_owned())
}

/// Find the APP13 Photoshop segment carrying IPTC-IIM.
fn find_jpeg_iptc(jpeg: &Jpeg) -> Option<Bytes> {
    jpeg.segments()
        .iter()
        .find(|s| s.marker() == 0xED && s.contents().starts_with(IPTC_HEADER))
        .map(|s| s.contents().clone())
}

/// Find an uncompressed XMP iTXt chunk in a PNG.
///
/// iTXt layout: keyword NUL, compression flag, compression method,
/// language tag NUL, translated keyword NUL, text.
fn find_png_xmp(png: &Png) -> Option<String> {
    png.chunks().iter().find_map(|chunk| {
        if chunk.kind() != *b"iTXt" {
            return None;
        }
        let contents = chunk.contents();
        let rest = contents.strip_prefix(PNG_XMP_KEYWORD)?.strip_prefix(b"\0")?;
        let (&compressed, rest) = rest.split_first()?;
        if compressed != 0 {
            log::debug!("Skipping compressed XMP iTXt chunk");
            return None;
        }
        let rest = rest.get(1..)?;
        let lang_end = rest.iter().position(|&b| b == 0)?;
        let rest = &rest[lang_end + 1..];
        let translated_end = rest.iter().position(|&b| b == 0)?;
        Some(String::from_utf8_lossy(&rest[translated_end + 1..]).into_owned())
    })
}

// ============================================================================
// XMP
// ============================================================================

/// Flatten an XMP packet into `(qualified name, value)` properties.
///
/// Attributes and leaf text are attributed to the nearest enclosing element
/// outside the `rdf`/`x`/`xml` namespaces. Repeated properties (array items,
/// history events) are joined with `"; "`. A trailing `XMP Value Count`
/// entry records how many distinct properties were found.
pub fn xmp_properties(xml: &str) -> Vec<(String, String)> {
    let mut props: Vec<(String, String)> = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        push_text(&mut props, &stack, &rest[..lt]);
        rest = &rest[lt..];

        let skip_to = if rest.starts_with("<?") {
            Some("?>")
        } else if rest.starts_with("<!--") {
            Some("-->")
        } else if rest.starts_with("<!") {
            Some(">")
        } else {
            None
        };
        if let Some(end) = skip_to {
            match rest.find(end) {
                Some(pos) => {
                    rest = &rest[pos + end.len()..];
                    continue;
                }
                None => break,
            }
        }

        let Some(gt) = find_tag_end(rest) else { break };
        let tag = &rest[1..gt];
        rest = &rest[gt + 1..];

        if let Some(closing) = tag.strip_prefix('/') {
            let closing = closing.trim();
            if let Some(pos) = stack.iter().rposition(|open| *open == closing) {
                stack.truncate(pos);
            }
            continue;
        }

        let self_closing = tag.ends_with('/');
        let body = tag.trim_end_matches('/');
        let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
        let name = &body[..name_end];

        for (attr, value) in attributes(&body[name_end..]) {
            if is_property(attr) {
                push_property(&mut props, attr, &decode_entities(value));
            }
        }

        if !self_closing {
            stack.push(name);
        }
    }

    if !props.is_empty() {
        let count = props.len();
        props.push(("XMP Value Count".to_string(), count.to_string()));
    }
    props
}

/// Position of the `>` closing the tag at the start of `s`, ignoring quoted `>`.
fn find_tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse `name="value"` pairs from the attribute part of a start tag.
fn attributes(mut s: &str) -> Vec<(&str, &str)> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        let Some(eq) = s.find('=') else { break };
        let name = s[..eq].trim();
        let after = s[eq + 1..].trim_start();
        let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            break;
        };
        let value_start = &after[1..];
        let Some(close) = value_start.find(quote) else { break };
        attrs.push((name, &value_start[..close]));
        s = &value_start[close + 1..];
    }
    attrs
}

fn is_property(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => {
            !local.is_empty() && !matches!(prefix, "rdf" | "x" | "xml" | "xmlns")
        }
        None => false,
    }
}

fn push_text(props: &mut Vec<(String, String)>, stack: &[&str], text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if let Some(owner) = stack.iter().rev().find(|name| is_property(name)) {
        push_property(props, owner, &decode_entities(text));
    }
}

fn push_property(props: &mut Vec<(String, String)>, name: &str, value: &str) {
    match props.iter_mut().find(|(existing, _)| existing == name) {
        Some((_, existing)) => {
            existing.push_str("; ");
            existing.push_str(value);
        }
        None => props.push((name.to_string(), value.to_string())),
    }
}

/// Undo XML character escaping.
fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

// ============================================================================
// IPTC-IIM (APP13 / Photoshop 3.0)
// ============================================================================

/// Decode the IPTC-IIM datasets carried in an APP13 segment.
pub fn iptc_datasets(app13: &[u8]) -> Vec<(String, String)> {
    let Some(iim) = photoshop_resource(app13, IPTC_RESOURCE_ID) else {
        return Vec::new();
    };

    let mut datasets: Vec<(String, String)> = Vec::new();
    let mut pos = 0;
    while pos + 5 <= iim.len() {
        if iim[pos] != 0x1C {
            break;
        }
        let record = iim[pos + 1];
        let dataset = iim[pos + 2];
        let len = u16::from_be_bytes([iim[pos + 3], iim[pos + 4]]) as usize;
        // Extended-length datasets (high bit set) are not used for text fields.
        if len & 0x8000 != 0 {
            break;
        }
        let start = pos + 5;
        let Some(raw) = iim.get(start..start + len) else { break };

        let value = if raw.len() == 2 && matches!((record, dataset), (1, 0) | (2, 0)) {
            u16::from_be_bytes([raw[0], raw[1]]).to_string()
        } else {
            String::from_utf8_lossy(raw)
                .chars()
                .filter(|c| !c.is_control())
                .collect::<String>()
                .trim()
                .to_string()
        };
        push_property(&mut datasets, &iptc_name(record, dataset), &value);

        pos = start + len;
    }
    datasets
}

/// Walk the 8BIM resource blocks after the Photoshop header and return the
/// payload of `wanted`.
fn photoshop_resource(data: &[u8], wanted: u16) -> Option<&[u8]> {
    let mut pos = IPTC_HEADER.len();
    while pos + 12 <= data.len() {
        if &data[pos..pos + 4] != IPTC_8BIM {
            break;
        }
        let resource_id = u16::from_be_bytes([data[pos + 4], data[pos + 5]]);
        // Pascal string: 1 byte length + string, padded to even
        let pascal_len = data[pos + 6] as usize;
        let pascal_padded = if (pascal_len + 1) % 2 == 0 { pascal_len + 1 } else { pascal_len + 2 };
        let data_start = pos + 6 + pascal_padded;
        let len_bytes = data.get(data_start..data_start + 4)?;
        let data_len = u32::from_be_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
        let payload_start = data_start + 4;
        let payload_end = payload_start.checked_add(data_len)?;

        if resource_id == wanted {
            return data.get(payload_start..payload_end);
        }

        pos = if data_len % 2 == 0 { payload_end } else { payload_end + 1 };
    }
    None
}

fn iptc_name(record: u8, dataset: u8) -> String {
    let name = match (record, dataset) {
        (1, 0) => "Envelope Record Version",
        (1, 90) => "Coded Character Set",
        (2, 0) => "Application Record Version",
        (2, 5) => "Object Name",
        (2, 15) => "Category",
        (2, 20) => "Supplemental Category(s)",
        (2, 25) => "Keywords",
        (2, 40) => "Special Instructions",
        (2, 55) => "Date Created",
        (2, 60) => "Time Created",
        (2, 62) => "Digital Date Created",
        (2, 63) => "Digital Time Created",
        (2, 65) => "Originating Program",
        (2, 70) => "Program Version",
        (2, 80) => "By-line",
        (2, 85) => "By-line Title",
        (2, 90) => "City",
        (2, 92) => "Sub-location",
        (2, 95) => "Province/State",
        (2, 100) => "Country/Primary Location Code",
        (2, 101) => "Country/Primary Location Name",
        (2, 103) => "Original Transmission Reference",
        (2, 105) => "Headline",
        (2, 110) => "Credit",
        (2, 115) => "Source",
        (2, 116) => "Copyright Notice",
        (2, 120) => "Caption/Abstract",
        (2, 122) => "Caption Writer/Editor",
        _ => return format!("Unknown tag ({record}:{dataset})"),
    };
    name.to_string()
}

// ============================================================================
// ICC profile
// ============================================================================

/// Describe an ICC profile from its 128-byte header and `desc` tag.
pub fn icc_fields(profile: &[u8]) -> Vec<(String, String)> {
    if profile.len() < 128 {
        return Vec::new();
    }

    let mut fields: Vec<(String, String)> = Vec::new();
    let mut push = |name: &str, value: String| {
        if !value.is_empty() {
            fields.push((name.to_string(), value));
        }
    };

    push("Profile Size", read_u32(profile, 0).map(|v| v.to_string()).unwrap_or_default());
    push("CMM Type", signature(profile, 4));
    push("Version", format!("{}.{}.{}", profile[8], profile[9] >> 4, profile[9] & 0x0F));
    push("Class", profile_class(&signature(profile, 12)));
    push("Color space", signature(profile, 16));
    push("Profile Connection Space", signature(profile, 20));
    push("Profile Date/Time", profile_date(profile));
    push("Signature", signature(profile, 36));
    push("Primary Platform", platform(&signature(profile, 40)));
    push("Device manufacturer", signature(profile, 48));
    push("Device model", signature(profile, 52));
    push(
        "Rendering Intent",
        read_u32(profile, 64).map(rendering_intent).unwrap_or_default(),
    );
    push("Profile Creator", signature(profile, 80));
    if let Some(count) = tag_table_len(profile) {
        push("Tag Count", count.to_string());
    }
    push("Profile Description", profile_description(profile).unwrap_or_default());

    fields
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let b = data.get(at..at + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let b = data.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Four-character signature with padding and NULs removed.
fn signature(data: &[u8], at: usize) -> String {
    data.get(at..at + 4)
        .map(|b| {
            b.iter()
                .filter(|&&c| c != 0)
                .map(|&c| c as char)
                .collect::<String>()
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

fn profile_class(sig: &str) -> String {
    match sig {
        "scnr" => "Input Device",
        "mntr" => "Display Device",
        "prtr" => "Output Device",
        "link" => "DeviceLink",
        "spac" => "ColorSpace Conversion",
        "abst" => "Abstract",
        "nmcl" => "Named Color",
        other => other,
    }
    .to_string()
}

fn platform(sig: &str) -> String {
    match sig {
        "APPL" => "Apple Computer, Inc.",
        "MSFT" => "Microsoft Corporation",
        "SGI" => "Silicon Graphics, Inc.",
        "SUNW" => "Sun Microsystems, Inc.",
        other => other,
    }
    .to_string()
}

fn rendering_intent(intent: u32) -> String {
    match intent {
        0 => "Perceptual".to_string(),
        1 => "Media-Relative Colorimetric".to_string(),
        2 => "Saturation".to_string(),
        3 => "ICC-Absolute Colorimetric".to_string(),
        other => format!("Unknown ({other})"),
    }
}

fn profile_date(profile: &[u8]) -> String {
    let parts: Option<Vec<u16>> = (0..6).map(|i| read_u16(profile, 24 + i * 2)).collect();
    match parts.as_deref() {
        Some([0, ..]) | None => String::new(),
        Some(&[y, mo, d, h, mi, s]) => format!("{y:04}:{mo:02}:{d:02} {h:02}:{mi:02}:{s:02}"),
        Some(_) => String::new(),
    }
}

/// Declared tag count, clamped to the 12-byte entries that fit in `profile`.
fn tag_table_len(profile: &[u8]) -> Option<usize> {
    let declared = read_u32(profile, 128)? as usize;
    Some(declared.min(profile.len().saturating_sub(132) / 12))
}

/// Text of the `desc` tag (v2 `desc` type or first record of a v4 `mluc`).
fn profile_description(profile: &[u8]) -> Option<String> {
    let count = tag_table_len(profile)?;
    let (offset, size) = (0..count).find_map(|i| {
        let entry = 132 + i * 12;
        if profile.get(entry..entry + 4)? == b"desc" {
            Some((read_u32(profile, entry + 4)? as usize, read_u32(profile, entry + 8)? as usize))
        } else {
            None
        }
    })?;
    let tag = profile.get(offset..offset.checked_add(size)?)?;

    match tag.get(0..4)? {
        b"desc" => {
            let len = read_u32(tag, 8)? as usize;
            let text = tag.get(12..12 + len)?;
            let text = String::from_utf8_lossy(text);
            Some(text.trim_end_matches('\0').trim().to_string())
        }
        b"mluc" => {
            let len = read_u32(tag, 20)? as usize;
            let start = read_u32(tag, 24)? as usize;
            let raw = tag.get(start..start + len)?;
            let units: Vec<u16> = raw.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])).collect();
            Some(String::from_utf16_lossy(&units).trim_end_matches('\0').trim().to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── XMP ──────────────────────────────────────────────────────────

    const SAMPLE_XMP: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="Adobe XMP Core 7.0">
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
<rdf:Description rdf:about=""
  xmlns:xmp="http://ns.adobe.com/xap/1.0/"
  xmlns:xmpMM="http://ns.adobe.com/xap/1.0/mm/"
  xmlns:stEvt="http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"
  xmlns:dc="http://purl.org/dc/elements/1.1/"
  xmp:CreatorTool="Adobe Photoshop 24.0 (Windows)"
  xmpMM:DocumentID="adobe:docid:photoshop:1234">
  <dc:creator><rdf:Seq><rdf:li>Jane &amp; Co</rdf:li></rdf:Seq></dc:creator>
  <dc:subject><rdf:Bag><rdf:li>beach</rdf:li><rdf:li>sunset</rdf:li></rdf:Bag></dc:subject>
  <xmpMM:History><rdf:Seq>
    <rdf:li stEvt:action="created" stEvt:softwareAgent="Adobe Photoshop"/>
    <rdf:li stEvt:action="saved"/>
  </rdf:Seq></xmpMM:History>
</rdf:Description>
</rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

    fn lookup<'a>(props: &'a [(String, String)], name: &str) -> Option<&'a str> {
        props.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn xmp_attributes_become_properties() {
        let props = xmp_properties(SAMPLE_XMP);
        assert_eq!(lookup(&props, "xmp:CreatorTool"), Some("Adobe Photoshop 24.0 (Windows)"));
        assert_eq!(lookup(&props, "xmpMM:DocumentID"), Some("adobe:docid:photoshop:1234"));
    }

    #[test]
    fn xmp_namespace_and_rdf_attributes_skipped() {
        let props = xmp_properties(SAMPLE_XMP);
        assert!(props.iter().all(|(k, _)| !k.starts_with("xmlns") && !k.starts_with("rdf:")));
        assert!(lookup(&props, "x:xmptk").is_none());
    }

    #[test]
    fn xmp_array_items_joined() {
        let props = xmp_properties(SAMPLE_XMP);
        assert_eq!(lookup(&props, "dc:creator"), Some("Jane & Co"));
        assert_eq!(lookup(&props, "dc:subject"), Some("beach; sunset"));
        assert_eq!(lookup(&props, "stEvt:action"), Some("created; saved"));
    }

    #[test]
    fn xmp_value_count_appended() {
        let props = xmp_properties(SAMPLE_XMP);
        let (last_key, last_value) = props.last().unwrap();
        assert_eq!(last_key, "XMP Value Count");
        assert_eq!(last_value, &(props.len() - 1).to_string());
    }

    #[test]
    fn xmp_garbage_yields_nothing() {
        assert!(xmp_properties("not xml at all").is_empty());
        assert!(xmp_properties("<unterminated").is_empty());
    }

    // ── IPTC ─────────────────────────────────────────────────────────

    fn app13_with(iim: &[u8]) -> Vec<u8> {
        let mut data = IPTC_HEADER.to_vec();
        data.extend_from_slice(IPTC_8BIM);
        data.extend_from_slice(&IPTC_RESOURCE_ID.to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(&(iim.len() as u32).to_be_bytes());
        data.extend_from_slice(iim);
        if iim.len() % 2 != 0 {
            data.push(0);
        }
        data
    }

    fn dataset(record: u8, id: u8, value: &[u8]) -> Vec<u8> {
        let mut out = vec![0x1C, record, id];
        out.extend_from_slice(&(value.len() as u16).to_be_bytes());
        out.extend_from_slice(value);
        out
    }

    #[test]
    fn iptc_named_datasets() {
        let mut iim = dataset(2, 0, &[0, 4]);
        iim.extend(dataset(2, 80, b"Jane Doe"));
        iim.extend(dataset(2, 25, b"beach"));
        iim.extend(dataset(2, 25, b"sunset"));
        iim.extend(dataset(2, 116, b"(c) 2024"));

        let tags = iptc_datasets(&app13_with(&iim));
        assert_eq!(lookup(&tags, "Application Record Version"), Some("4"));
        assert_eq!(lookup(&tags, "By-line"), Some("Jane Doe"));
        assert_eq!(lookup(&tags, "Keywords"), Some("beach; sunset"));
        assert_eq!(lookup(&tags, "Copyright Notice"), Some("(c) 2024"));
    }

    #[test]
    fn iptc_unknown_dataset_named_by_number() {
        let tags = iptc_datasets(&app13_with(&dataset(2, 200, b"x")));
        assert_eq!(lookup(&tags, "Unknown tag (2:200)"), Some("x"));
    }

    #[test]
    fn iptc_truncated_input_is_tolerated() {
        let mut data = app13_with(&dataset(2, 80, b"Jane Doe"));
        data.truncate(data.len() - 3);
        assert!(iptc_datasets(&data).is_empty());
        assert!(iptc_datasets(b"Photoshop 3.0\0").is_empty());
    }

    // ── ICC ──────────────────────────────────────────────────────────

    fn icc_profile() -> Vec<u8> {
        let desc_text = b"sRGB IEC61966-2.1\0";
        let mut desc = b"desc\0\0\0\0".to_vec();
        desc.extend_from_slice(&(desc_text.len() as u32).to_be_bytes());
        desc.extend_from_slice(desc_text);

        let mut p = vec![0u8; 144];
        p[4..8].copy_from_slice(b"lcms");
        p[8] = 2;
        p[9] = 0x10;
        p[12..16].copy_from_slice(b"mntr");
        p[16..20].copy_from_slice(b"RGB ");
        p[20..24].copy_from_slice(b"XYZ ");
        for (i, v) in [2024u16, 5, 17, 10, 30, 0].iter().enumerate() {
            p[24 + i * 2..26 + i * 2].copy_from_slice(&v.to_be_bytes());
        }
        p[36..40].copy_from_slice(b"acsp");
        p[40..44].copy_from_slice(b"APPL");
        p[48..52].copy_from_slice(b"GOOG");
        p[128..132].copy_from_slice(&1u32.to_be_bytes());
        p[132..136].copy_from_slice(b"desc");
        p[136..140].copy_from_slice(&144u32.to_be_bytes());
        p[140..144].copy_from_slice(&(desc.len() as u32).to_be_bytes());
        p.extend_from_slice(&desc);
        let total = p.len() as u32;
        p[0..4].copy_from_slice(&total.to_be_bytes());
        p
    }

    #[test]
    fn icc_header_fields() {
        let fields = icc_fields(&icc_profile());
        assert_eq!(lookup(&fields, "CMM Type"), Some("lcms"));
        assert_eq!(lookup(&fields, "Version"), Some("2.1.0"));
        assert_eq!(lookup(&fields, "Class"), Some("Display Device"));
        assert_eq!(lookup(&fields, "Color space"), Some("RGB"));
        assert_eq!(lookup(&fields, "Profile Date/Time"), Some("2024:05:17 10:30:00"));
        assert_eq!(lookup(&fields, "Primary Platform"), Some("Apple Computer, Inc."));
        assert_eq!(lookup(&fields, "Device manufacturer"), Some("GOOG"));
        assert_eq!(lookup(&fields, "Rendering Intent"), Some("Perceptual"));
        assert_eq!(lookup(&fields, "Profile Description"), Some("sRGB IEC61966-2.1"));
    }

    #[test]
    fn icc_zeroed_fields_omitted() {
        let fields = icc_fields(&icc_profile());
        assert!(lookup(&fields, "Device model").is_none());
        assert!(lookup(&fields, "Profile Creator").is_none());
    }

    #[test]
    fn icc_tag_count_clamped_to_profile() {
        let mut p = icc_profile();
        p.truncate(144);
        p[128..132].copy_from_slice(&u32::MAX.to_be_bytes());
        p[132..136].copy_from_slice(b"rXYZ");

        let start = std::time::Instant::now();
        let fields = icc_fields(&p);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(lookup(&fields, "Tag Count"), Some("1"));
        assert!(lookup(&fields, "Profile Description").is_none());
    }

    #[test]
    fn icc_short_profile_ignored() {
        assert!(icc_fields(&[0u8; 64]).is_empty());
    }

    // ── locate ───────────────────────────────────────────────────────

    #[test]
    fn locate_rejects_unknown_bytes() {
        assert!(matches!(locate(b"definitely not an image"), Err(Error::UnrecognizedFormat)));
    }
}
