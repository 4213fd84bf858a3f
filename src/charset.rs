//! Best-effort conversion of text file bytes to UTF-8 with `\n` line endings.
//!
//! The work is split into three stages that can be used on their own:
//! [`detect_charset`], [`convert_to_utf8`] and [`normalize_line_endings`].
//! [`normalize`] chains them and never fails: when detection or conversion
//! fails the original bytes go through line-ending normalization as if they
//! were UTF-8, so invalid sequences come out as U+FFFD.

use chardetng::EncodingDetector;
use content_inspector::ContentType;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use std::borrow::Cow;
use thiserror::Error;
#[cfg(feature = "logging")]
use tracing;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("content looks binary")]
    BinaryContent,
    #[error("unsupported encoding {0}")]
    Unsupported(&'static str),
    #[error("malformed {0} input")]
    Malformed(&'static str),
}

/// Guesses the encoding of `bytes`.
///
/// Byte order marks are honoured first. Valid UTF-8 is taken as UTF-8,
/// anything else goes to a statistical detector.
pub fn detect_charset(bytes: &[u8]) -> Result<&'static Encoding, NormalizeError> {
    match content_inspector::inspect(bytes) {
        ContentType::BINARY => return Err(NormalizeError::BinaryContent),
        ContentType::UTF_8 | ContentType::UTF_8_BOM => {
            if std::str::from_utf8(bytes).is_ok() {
                return Ok(UTF_8);
            }
        }
        ContentType::UTF_16LE => return Ok(UTF_16LE),
        ContentType::UTF_16BE => return Ok(UTF_16BE),
        ContentType::UTF_32LE => return Err(NormalizeError::Unsupported("UTF-32LE")),
        ContentType::UTF_32BE => return Err(NormalizeError::Unsupported("UTF-32BE")),
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    Ok(detector.guess(None, true))
}

/// Decodes `bytes` from `encoding` and re-encodes them as UTF-8.
///
/// UTF-8 input is returned untouched. A BOM matching `encoding` is dropped.
pub fn convert_to_utf8<'a>(
    bytes: &'a [u8],
    encoding: &'static Encoding,
) -> Result<Cow<'a, [u8]>, NormalizeError> {
    if encoding == UTF_8 {
        return Ok(Cow::Borrowed(bytes));
    }
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(NormalizeError::Malformed(encoding.name()));
    }
    Ok(Cow::Owned(text.into_owned().into_bytes()))
}

/// Reads `bytes` as UTF-8 (lossy) and turns every `\r\n` into `\n`.
///
/// A run of `\r` directly before `\n` is dropped as a whole, so the output
/// never contains `\r\n`. A lone `\r` is left alone.
pub fn normalize_line_endings(bytes: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(bytes);
    let mut out = Vec::with_capacity(text.len());
    for &b in text.as_bytes() {
        if b == b'\n' {
            while out.last() == Some(&b'\r') {
                out.pop();
            }
        }
        out.push(b);
    }
    out
}

/// Detects, converts and normalizes line endings. Failures are logged, not returned.
pub fn normalize(bytes: &[u8]) -> Vec<u8> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let converted = match detect_charset(bytes).and_then(|enc| {
        #[cfg(feature = "logging")]
        if enc != UTF_8 {
            tracing::debug!("Converting {} bytes from {} to UTF-8", bytes.len(), enc.name());
        }
        convert_to_utf8(bytes, enc)
    }) {
        Ok(converted) => converted,
        Err(_err) => {
            #[cfg(feature = "logging")]
            tracing::warn!("Charset normalization failed, keeping original bytes: {}", _err);
            Cow::Borrowed(bytes)
        }
    };
    normalize_line_endings(&converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_unchanged() {
        assert!(normalize(b"").is_empty());
    }

    #[test]
    fn test_crlf_becomes_lf() {
        assert_eq!(normalize(b"line1\r\nline2"), b"line1\nline2");
        assert_eq!(normalize(b"a\r\nb\nc\r\n\r\n"), b"a\nb\nc\n\n");
    }

    #[test]
    fn test_repeated_cr_before_lf_leaves_no_crlf() {
        assert_eq!(normalize_line_endings(b"a\r\r\nb"), b"a\nb");
        assert_eq!(normalize_line_endings(b"a\r\r\r\nb\r\n"), b"a\nb\n");
        let out = normalize(b"x\r\r\ny\n\r\r\r\nz\rw");
        assert!(!out.windows(2).any(|w| w == b"\r\n"));
        assert_eq!(out, b"x\ny\n\nz\rw");
    }

    #[test]
    fn test_lone_cr_preserved() {
        assert_eq!(normalize_line_endings(b"a\rb\r\n"), b"a\rb\n");
    }

    #[test]
    fn test_canonical_input_is_idempotent() {
        let input = "plain ascii\nand ünïcödé\n".as_bytes();
        let once = normalize(input);
        assert_eq!(once, input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_utf8_detected_without_conversion() {
        let input = "héllo wörld".as_bytes();
        assert_eq!(detect_charset(input).unwrap(), UTF_8);
        assert!(matches!(convert_to_utf8(input, UTF_8).unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_utf16le_with_bom_is_converted() {
        let mut input = vec![0xFF, 0xFE];
        for unit in "a\r\nb".encode_utf16() {
            input.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_charset(&input).unwrap(), UTF_16LE);
        assert_eq!(normalize(&input), b"a\nb");
    }

    #[test]
    fn test_legacy_single_byte_text_is_converted() {
        let input = b"Le caf\xe9 est tr\xe8s bon, d\xe9j\xe0 pr\xeat pour la f\xeate.\r\nMerci \xe0 vous.\r\n";
        let out = normalize(input);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('é'));
        assert!(!text.contains("\r\n"));
        assert!(!text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_truncated_utf16_is_malformed() {
        let err = convert_to_utf8(b"\xff\xfea", UTF_16LE).unwrap_err();
        assert_eq!(err, NormalizeError::Malformed("UTF-16LE"));
    }

    // Failed detection still runs the lossy UTF-8 pass, so bytes that are not
    // UTF-8 are replaced rather than preserved.
    #[test]
    fn test_failed_detection_falls_back_to_lossy_utf8() {
        let input = b"ab\0cd\r\nef\xff";
        assert_eq!(detect_charset(input), Err(NormalizeError::BinaryContent));
        let out = normalize(input);
        assert_eq!(String::from_utf8(out).unwrap(), "ab\0cd\nef\u{FFFD}");
    }
}
