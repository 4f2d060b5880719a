//! Encoding detection and transcoding for byte input.
//!
//! Implements BOM sniffing and XML declaration encoding detection per
//! XML 1.0 Section 4.3.3 and Appendix F, bridging to `encoding_rs` for
//! character encoding conversion. Used by [`crate::Document::parse_bytes`];
//! the save path always writes UTF-8 and names that encoding in the XML
//! declaration it emits.

use std::fmt;

/// An error that occurs during encoding detection or transcoding.
#[derive(Debug, Clone)]
pub struct EncodingError {
    /// A human-readable description of the encoding error.
    pub message: String,
}

impl EncodingError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoding error: {}", self.message)
    }
}

impl std::error::Error for EncodingError {}

/// Detects the encoding of an XML byte stream by inspecting the Byte Order Mark.
///
/// Returns a tuple of (encoding name, number of BOM bytes to skip). The
/// encoding name is an IANA charset name suitable for `encoding_rs`.
///
/// Per XML 1.0 Appendix F:
/// - `EF BB BF` -> UTF-8
/// - `FE FF`    -> UTF-16 BE
/// - `FF FE`    -> UTF-16 LE
/// - No BOM     -> UTF-8 (default per XML spec)
///
/// # Examples
///
/// ```
/// use xylo::encoding::detect_encoding;
///
/// let (enc, skip) = detect_encoding(b"\xEF\xBB\xBFhello");
/// assert_eq!(enc, "UTF-8");
/// assert_eq!(skip, 3);
/// ```
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> (&'static str, usize) {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        ("UTF-8", 3)
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        ("UTF-16BE", 2)
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        ("UTF-16LE", 2)
    } else {
        ("UTF-8", 0)
    }
}

/// Transcodes a byte slice from the named encoding into a UTF-8 `String`.
///
/// Uses `encoding_rs::Encoding::for_label` to look up the encoding by its
/// IANA name (case-insensitive).
///
/// # Errors
///
/// Returns `EncodingError` if the encoding name is not recognized or the
/// input contains malformed byte sequences.
pub fn transcode(bytes: &[u8], encoding_name: &str) -> Result<String, EncodingError> {
    let encoding = encoding_rs::Encoding::for_label(encoding_name.as_bytes())
        .ok_or_else(|| EncodingError::new(format!("unsupported encoding: {encoding_name}")))?;

    let (result, _used_encoding, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(EncodingError::new(format!(
            "malformed byte sequence for encoding {encoding_name}"
        )));
    }
    Ok(result.into_owned())
}

/// Decodes raw XML bytes into a UTF-8 string, detecting the encoding.
///
/// The detection pipeline from XML 1.0 Section 4.3.3:
///
/// 1. Sniff the BOM and determine the initial encoding.
/// 2. If UTF-8 (or no BOM), validate the bytes directly.
/// 3. Otherwise transcode using `encoding_rs`.
/// 4. Check the XML declaration's `encoding=` attribute; if it names a
///    different encoding than the BOM indicated, re-decode from the
///    original bytes with the declared encoding.
///
/// # Errors
///
/// Returns `EncodingError` if the bytes contain invalid sequences for the
/// detected encoding or the declared encoding is unsupported.
///
/// # Examples
///
/// ```
/// use xylo::encoding::decode_to_utf8;
///
/// let xml = b"<?xml version=\"1.0\"?><root/>";
/// let result = decode_to_utf8(xml).unwrap();
/// assert!(result.contains("<root/>"));
/// ```
pub fn decode_to_utf8(bytes: &[u8]) -> Result<String, EncodingError> {
    let (bom_encoding, bom_skip) = detect_encoding(bytes);
    let content = &bytes[bom_skip..];

    if bom_encoding == "UTF-8" {
        if let Ok(s) = std::str::from_utf8(content) {
            // Valid UTF-8; honor a declaration naming some other encoding
            // (unusual but permitted for ASCII-compatible single-byte sets).
            if let Some(declared) = declared_encoding(s) {
                if !is_utf8_label(&declared) {
                    return transcode(content, &declared);
                }
            }
            return Ok(s.to_string());
        }
        // Not valid UTF-8 and no BOM. The XML declaration is required to be
        // ASCII-compatible, so scan the raw bytes for an encoding= attribute
        // and transcode with whatever it names.
        if let Some(declared) = declared_encoding_from_bytes(content) {
            return transcode(content, &declared);
        }
        return Err(EncodingError::new("input is not valid UTF-8"));
    }

    let initial_text = transcode(content, bom_encoding)?;

    if let Some(declared) = declared_encoding(&initial_text) {
        let declared_upper = declared.to_ascii_uppercase();
        let bom_upper = bom_encoding.to_ascii_uppercase();

        // "UTF-16" is compatible with both byte orders; the BOM decides.
        let effectively_same = declared_upper == bom_upper
            || (declared_upper == "UTF-16"
                && (bom_upper == "UTF-16BE" || bom_upper == "UTF-16LE"));

        if !effectively_same {
            return transcode(content, &declared);
        }
    }

    Ok(initial_text)
}

fn is_utf8_label(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    upper == "UTF-8" || upper == "UTF8" || upper == "US-ASCII" || upper == "ASCII"
}

/// Extracts the `encoding` attribute value from an XML declaration, if any.
///
/// A lightweight scan, not a full parse: finds `encoding="..."` or
/// `encoding='...'` inside a leading `<?xml ... ?>`.
fn declared_encoding(text: &str) -> Option<String> {
    let decl_end = text.find("?>")?;
    let decl = &text[..decl_end];
    if !decl.starts_with("<?xml") {
        return None;
    }

    let enc_pos = decl.find("encoding")?;
    let after = decl[enc_pos + "encoding".len()..].trim_start();
    let after = after.strip_prefix('=')?.trim_start();
    let quote = after.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let value = &after[1..];
    let end = value.find(quote)?;
    Some(value[..end].to_string())
}

/// Extracts the `encoding` attribute from raw bytes treated as ASCII.
///
/// Fallback for input that is not valid UTF-8 and has no BOM; the XML
/// declaration itself is always ASCII-compatible.
fn declared_encoding_from_bytes(bytes: &[u8]) -> Option<String> {
    let limit = bytes.len().min(200);
    let scan = &bytes[..limit];
    if !scan.starts_with(b"<?xml") {
        return None;
    }
    let decl_end = scan.windows(2).position(|w| w == b"?>")?;
    let ascii: String = scan[..decl_end + 2]
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
        .collect();
    declared_encoding(&ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_utf8_bom() {
        let (enc, skip) = detect_encoding(b"\xEF\xBB\xBF<root/>");
        assert_eq!((enc, skip), ("UTF-8", 3));
    }

    #[test]
    fn test_detect_utf16_boms() {
        assert_eq!(detect_encoding(b"\xFE\xFF\x00<"), ("UTF-16BE", 2));
        assert_eq!(detect_encoding(b"\xFF\xFE<\x00"), ("UTF-16LE", 2));
    }

    #[test]
    fn test_detect_no_bom_defaults_utf8() {
        assert_eq!(detect_encoding(b"<root/>"), ("UTF-8", 0));
    }

    #[test]
    fn test_transcode_latin1() {
        // 0xE9 is 'é' in ISO-8859-1
        let result = transcode(b"caf\xE9", "ISO-8859-1").unwrap();
        assert_eq!(result, "café");
    }

    #[test]
    fn test_transcode_unknown_encoding() {
        assert!(transcode(b"x", "NO-SUCH-ENCODING").is_err());
    }

    #[test]
    fn test_decode_plain_utf8() {
        let result = decode_to_utf8(b"<?xml version=\"1.0\"?><root/>").unwrap();
        assert!(result.contains("<root/>"));
    }

    #[test]
    fn test_decode_utf16le() {
        let text = "<?xml version=\"1.0\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let result = decode_to_utf8(&bytes).unwrap();
        assert!(result.contains("<a/>"));
    }

    #[test]
    fn test_decode_declared_latin1_without_bom() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a v=\"caf\xE9\"/>";
        let result = decode_to_utf8(bytes).unwrap();
        assert!(result.contains("café"));
    }

    #[test]
    fn test_declared_encoding_extraction() {
        assert_eq!(
            declared_encoding("<?xml version=\"1.0\" encoding='ISO-8859-1'?><a/>"),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(declared_encoding("<?xml version=\"1.0\"?><a/>"), None);
        assert_eq!(declared_encoding("<a/>"), None);
    }
}
