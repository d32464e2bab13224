//! Character encoding detection for byte input
//!
//! Documents read from files arrive as bytes. Before parsing, they are
//! decoded to UTF-8 using the first charset found by this cascade:
//!
//! 1. **Byte order mark**: UTF-8, UTF-16LE or UTF-16BE BOM
//! 2. **HTML meta tags**: `<meta charset>` or `<meta http-equiv="Content-Type">`
//!    within the first 1024 bytes
//! 3. **Default to UTF-8**
//!
//! # Examples
//!
//! ```rust
//! use html_to_plaintext::charset::detect_encoding;
//!
//! let html = b"<html><head><meta charset=\"ISO-8859-1\"></head></html>";
//! assert_eq!(detect_encoding(html).name(), "windows-1252");
//!
//! assert_eq!(detect_encoding(b"<p>No charset</p>").name(), "UTF-8");
//! ```

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::RenderError;

/// Maximum bytes to scan for meta charset tags (first 1024 bytes)
const META_SCAN_LIMIT: usize = 1024;

/// Detect the encoding of an HTML byte stream
///
/// Unknown charset labels in meta tags are ignored and detection falls
/// through to the UTF-8 default.
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    if let Some(label) = extract_charset_from_html(html)
        && let Some(encoding) = Encoding::for_label(label.as_bytes())
    {
        return encoding;
    }

    UTF_8
}

/// Decode HTML bytes to UTF-8 text
///
/// A BOM is stripped. Bytes that are invalid for the detected encoding are
/// reported as [`RenderError::Encoding`] rather than silently replaced.
pub fn decode_html(html: &[u8]) -> Result<Cow<'_, str>, RenderError> {
    let encoding = detect_encoding(html);
    log::debug!("Decoding {} bytes as {}", html.len(), encoding.name());

    let (without_bom, bom_len) = match Encoding::for_bom(html) {
        Some((_, len)) => (&html[len..], len),
        None => (html, 0),
    };

    if encoding == UTF_8 {
        return std::str::from_utf8(without_bom).map(Cow::Borrowed).map_err(|e| {
            RenderError::Encoding(format!(
                "Invalid UTF-8 at byte position {}: {}",
                e.valid_up_to() + bom_len,
                e
            ))
        });
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(without_bom)
        .ok_or_else(|| {
            RenderError::Encoding(format!(
                "Invalid byte sequence for charset '{}'",
                encoding.name()
            ))
        })
}

/// Extract the charset label declared by an HTML meta tag
///
/// # Supported Formats
///
/// - HTML5: `<meta charset="UTF-8">`
/// - HTML4: `<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">`
///
/// ```rust
/// use html_to_plaintext::charset::extract_charset_from_html;
///
/// let html = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\">";
/// assert_eq!(extract_charset_from_html(html), Some("ISO-8859-1".to_string()));
/// assert_eq!(extract_charset_from_html(b"<p>plain</p>"), None);
/// ```
pub fn extract_charset_from_html(html: &[u8]) -> Option<String> {
    let scan_limit = std::cmp::min(html.len(), META_SCAN_LIMIT);
    // Lossy conversion is fine: meta tags are ASCII
    let html_str = String::from_utf8_lossy(&html[..scan_limit]);

    static HTML5_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html5_regex =
        HTML5_REGEX.get_or_init(|| Regex::new(r#"(?i)<meta\s+charset\s*=\s*"?([^";>\s]+)"?"#).ok());

    if let Some(caps) = html5_regex.as_ref()?.captures(&html_str)
        && let Some(m) = caps.get(1)
    {
        return Some(m.as_str().to_string());
    }

    static HTML4_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html4_regex = HTML4_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)<meta\s+http-equiv\s*=\s*"?Content-Type"?\s+content\s*=\s*"?[^">]*charset\s*=\s*([^";>\s]+)"?"#,
        )
        .ok()
    });

    html4_regex
        .as_ref()?
        .captures(&html_str)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detect_utf8_bom() {
        let html = b"\xEF\xBB\xBF<p>text</p>";
        assert_eq!(detect_encoding(html), UTF_8);
        assert_eq!(decode_html(html).unwrap(), "<p>text</p>");
    }

    #[test]
    fn test_detect_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<p>hi</p>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&bytes), encoding_rs::UTF_16LE);
        assert_eq!(decode_html(&bytes).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_bom_takes_priority_over_meta() {
        let html = b"\xEF\xBB\xBF<meta charset=\"ISO-8859-1\"><p>x</p>";
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn test_meta_charset_html5() {
        let html = b"<html><head><meta charset=\"windows-1252\"></head></html>";
        assert_eq!(detect_encoding(html), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_meta_charset_html4() {
        let html = b"<meta http-equiv=Content-Type content=\"text/html; charset=Shift_JIS\">";
        assert_eq!(extract_charset_from_html(html), Some("Shift_JIS".to_string()));
        assert_eq!(detect_encoding(html), encoding_rs::SHIFT_JIS);
    }

    #[test]
    fn test_meta_charset_case_insensitive() {
        let html = b"<HTML><HEAD><META CHARSET=\"UTF-8\"></HEAD></HTML>";
        assert_eq!(extract_charset_from_html(html), Some("UTF-8".to_string()));
    }

    #[test]
    fn test_unknown_label_defaults_to_utf8() {
        let html = b"<meta charset=\"x-unknown-test\"><p>x</p>";
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn test_meta_beyond_scan_limit_is_ignored() {
        let mut html = vec![b' '; META_SCAN_LIMIT + 100];
        html.extend_from_slice(b"<meta charset=\"ISO-8859-1\">");
        assert_eq!(extract_charset_from_html(&html), None);
    }

    #[test]
    fn test_decode_latin1_declared_in_meta() {
        let html = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
        let decoded = decode_html(html).expect("Should transcode ISO-8859-1 input");
        assert!(decoded.contains("Café"));
    }

    #[test]
    fn test_decode_invalid_utf8_is_an_error() {
        let html = b"<p>\xC3\x28</p>";
        match decode_html(html) {
            Err(RenderError::Encoding(message)) => assert!(message.contains("byte position 3")),
            other => panic!("Expected Encoding error, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_meta_label_is_extracted_verbatim(
            label in prop::sample::select(vec!["utf-8", "ISO-8859-1", "windows-1252", "Shift_JIS", "big5"]),
            use_html4_syntax in any::<bool>(),
        ) {
            let html = if use_html4_syntax {
                format!(r#"<html><head><meta http-equiv="Content-Type" content="text/html; charset={label}"></head></html>"#)
            } else {
                format!(r#"<html><head><meta charset="{label}"></head></html>"#)
            };
            prop_assert_eq!(extract_charset_from_html(html.as_bytes()), Some(label.to_string()));
        }
    }
}
