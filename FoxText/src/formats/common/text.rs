//! Text encoding helpers and null-terminated strings
//!
//! Conversions are strict: malformed input or characters the target encoding
//! cannot represent are reported as [`Error::Encoding`] instead of being
//! replaced, so a round-trip never silently changes game text.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use std::io::Write;

/// Width in bytes of one code unit (and of the NUL terminator)
#[must_use]
pub fn unit_width(encoding: &'static Encoding) -> usize {
    if encoding == UTF_16LE || encoding == UTF_16BE {
        2
    } else {
        1
    }
}

/// Decode bytes under `encoding`, without BOM sniffing
///
/// # Errors
/// Returns [`Error::Encoding`] if the bytes are malformed for the encoding.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| Error::Encoding {
            encoding: encoding.name(),
            message: format!("malformed byte sequence in {} bytes", bytes.len()),
        })
}

/// Encode text under `encoding`
///
/// `encoding_rs` only decodes UTF-16, so both UTF-16 variants are encoded here
/// directly.
///
/// # Errors
/// Returns [`Error::Encoding`] if a character cannot be represented.
pub fn encode_text(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>> {
    if encoding == UTF_16LE {
        return Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }

    let (bytes, used, unmappable) = encoding.encode(text);
    if used != encoding {
        return Err(Error::Encoding {
            encoding: encoding.name(),
            message: "encoding is decode-only".to_string(),
        });
    }
    if unmappable {
        return Err(Error::Encoding {
            encoding: encoding.name(),
            message: format!("unmappable character in {text:?}"),
        });
    }
    Ok(bytes.into_owned())
}

/// Read a null-terminated string from the start of `data`
///
/// Scans code units until a NUL unit and decodes what precedes it.
/// Returns the string and the number of bytes consumed, terminator included.
///
/// # Errors
/// Returns [`Error::TruncatedStream`] if no terminator is found and
/// [`Error::Encoding`] if the bytes cannot be decoded.
pub fn read_null_terminated_string(
    data: &[u8],
    encoding: &'static Encoding,
) -> Result<(String, usize)> {
    let width = unit_width(encoding);
    let end = if width == 2 {
        data.chunks_exact(2)
            .position(|unit| unit == [0, 0])
            .map(|index| index * 2)
    } else {
        data.iter().position(|&byte| byte == 0)
    }
    .ok_or(Error::TruncatedStream {
        context: "null-terminated string",
    })?;

    let text = decode_text(&data[..end], encoding)?;
    Ok((text, end + width))
}

/// Write `text` followed by a single NUL unit
///
/// Returns the number of bytes written.
///
/// # Errors
/// Returns [`Error::InteriorNul`] if the text already contains a NUL,
/// [`Error::Encoding`] if it cannot be encoded, or [`Error::Io`] on write failure.
pub fn write_null_terminated_string<W: Write>(
    writer: &mut W,
    text: &str,
    encoding: &'static Encoding,
) -> Result<usize> {
    if text.contains('\0') {
        return Err(Error::InteriorNul);
    }
    let bytes = encode_text(text, encoding)?;
    let width = unit_width(encoding);
    writer.write_all(&bytes)?;
    writer.write_all(&[0u8; 2][..width])?;
    Ok(bytes.len() + width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_8, WINDOWS_1252};

    #[test]
    fn test_read_utf8_string() {
        let data = b"hello\0world\0";
        let (text, consumed) = read_null_terminated_string(data, UTF_8).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(consumed, 6);

        let (text, _) = read_null_terminated_string(&data[consumed..], UTF_8).unwrap();
        assert_eq!(text, "world");
    }

    #[test]
    fn test_read_empty_string() {
        let (text, consumed) = read_null_terminated_string(b"\0", UTF_8).unwrap();
        assert!(text.is_empty());
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_missing_terminator() {
        let err = read_null_terminated_string(b"abc", UTF_8).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { .. }));
    }

    #[test]
    fn test_utf16_terminator_is_two_bytes() {
        // "A" followed by U+0100, whose low byte is zero
        let data = [0x41, 0x00, 0x00, 0x01, 0x00, 0x00];
        let (text, consumed) = read_null_terminated_string(&data, UTF_16LE).unwrap();
        assert_eq!(text, "A\u{100}");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn test_write_appends_single_nul() {
        let mut out = Vec::new();
        let written = write_null_terminated_string(&mut out, "key", UTF_8).unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, b"key\0");

        let mut wide = Vec::new();
        write_null_terminated_string(&mut wide, "k", UTF_16LE).unwrap();
        assert_eq!(wide, vec![0x6B, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_interior_nul_rejected() {
        let mut out = Vec::new();
        let err = write_null_terminated_string(&mut out, "a\0b", UTF_8).unwrap_err();
        assert!(matches!(err, Error::InteriorNul));
        assert!(out.is_empty());
    }

    #[test]
    fn test_shift_jis_round_trip() {
        let bytes = encode_text("こんにちは", SHIFT_JIS).unwrap();
        assert_eq!(bytes.len(), 10);
        assert_eq!(decode_text(&bytes, SHIFT_JIS).unwrap(), "こんにちは");
    }

    #[test]
    fn test_unmappable_character() {
        let err = encode_text("日本", WINDOWS_1252).unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));
    }

    #[test]
    fn test_malformed_utf8() {
        let err = decode_text(&[0xFF, 0xFE, 0x41], UTF_8).unwrap_err();
        assert!(matches!(err, Error::Encoding { encoding: "UTF-8", .. }));
    }
}
