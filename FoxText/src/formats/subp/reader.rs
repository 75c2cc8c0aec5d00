//! Subp entry reading

use super::{
    LINE_DELIMITER, SUBP_HEADER_SIZE, SUBP_MAGIC, SubpEntry, SubpLine, SubpOptions, SubpTiming,
};
use crate::error::{Error, Result};
use crate::formats::common::decode_text;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Fixed header fields of one entry
#[derive(Debug, Clone, Copy)]
struct SubpHeader {
    line_count: u8,
    priority: u8,
    text_len: u16,
    text_len_copy: u16,
    unknown: u16,
    flags: u16,
}

fn read_header<R: Read>(reader: &mut R) -> Result<SubpHeader> {
    let mut raw = [0u8; SUBP_HEADER_SIZE];
    reader
        .read_exact(&mut raw)
        .map_err(|e| Error::from_io(e, "Subp header"))?;

    let mut fields = &raw[..];
    let magic = fields.read_u16::<LittleEndian>()?;
    if magic != SUBP_MAGIC {
        return Err(Error::InvalidSubpMagic(magic));
    }

    Ok(SubpHeader {
        line_count: fields.read_u8()?,
        priority: fields.read_u8()?,
        text_len: fields.read_u16::<LittleEndian>()?,
        text_len_copy: fields.read_u16::<LittleEndian>()?,
        unknown: fields.read_u16::<LittleEndian>()?,
        flags: fields.read_u16::<LittleEndian>()?,
    })
}

impl SubpTiming {
    /// Read one 8-byte timing record
    ///
    /// # Errors
    /// Returns [`Error::TruncatedStream`] if fewer than 8 bytes remain.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let start = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::from_io(e, "Subp timing record"))?;
        let end = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::from_io(e, "Subp timing record"))?;
        Ok(Self { start, end })
    }
}

impl SubpEntry {
    /// Read one entry from the current position of `reader`
    ///
    /// The entry bytes do not carry the subtitle id, so `subtitle_id` is left
    /// at 0; see [`SubpEntry::read_with_id`].
    ///
    /// Lines are paired positionally with the `$`-separated text segments.
    /// Unless [`SubpOptions::strict_line_count`] is set, a line without a
    /// segment gets empty text and surplus segments are dropped.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedStream`] if the input ends early,
    /// [`Error::InvalidSubpMagic`] if the header is not a Subp header,
    /// [`Error::Encoding`] if the text cannot be decoded, and
    /// [`Error::SubpLineCountMismatch`] in strict mode.
    pub fn read<R: Read>(reader: &mut R, options: &SubpOptions) -> Result<Self> {
        let header = read_header(reader)?;
        tracing::debug!(
            "Subp header: lines={} priority={} text={} bytes unknown={:#06x} flags={:#06x}",
            header.line_count,
            header.priority,
            header.text_len,
            header.unknown,
            header.flags
        );
        if header.text_len != header.text_len_copy {
            tracing::warn!(
                "Subp length fields differ ({} vs {}), using the first",
                header.text_len,
                header.text_len_copy
            );
        }

        let line_count = usize::from(header.line_count);
        let timings = (0..line_count)
            .map(|_| SubpTiming::read(reader))
            .collect::<Result<Vec<_>>>()?;

        let mut blob = vec![0u8; usize::from(header.text_len)];
        reader
            .read_exact(&mut blob)
            .map_err(|e| Error::from_io(e, "Subp text"))?;
        let decoded = decode_text(&blob, options.encoding)?;
        let text = decoded.trim_end_matches('\0');

        let segments: Vec<&str> = text.split(LINE_DELIMITER).collect();
        let consistent = segments.len() == line_count || (line_count == 0 && text.is_empty());
        if !consistent {
            if options.strict_line_count {
                return Err(Error::SubpLineCountMismatch {
                    expected: line_count,
                    found: segments.len(),
                });
            }
            if segments.len() > line_count {
                tracing::warn!(
                    "Subp text has {} segments for {} lines, dropping the rest",
                    segments.len(),
                    line_count
                );
            }
        }

        let lines = timings
            .into_iter()
            .enumerate()
            .map(|(i, timing)| SubpLine {
                text: segments.get(i).copied().unwrap_or_default().to_string(),
                timing,
            })
            .collect();

        Ok(Self {
            subtitle_id: 0,
            priority: header.priority,
            lines,
        })
    }

    /// Read one entry whose id is known from the container index
    ///
    /// # Errors
    /// Same as [`SubpEntry::read`].
    pub fn read_with_id<R: Read>(
        reader: &mut R,
        subtitle_id: u32,
        options: &SubpOptions,
    ) -> Result<Self> {
        let mut entry = Self::read(reader, options)?;
        entry.subtitle_id = subtitle_id;
        Ok(entry)
    }

    /// Parse one entry from the start of `data`
    ///
    /// # Errors
    /// Same as [`SubpEntry::read`].
    pub fn from_bytes(data: &[u8], options: &SubpOptions) -> Result<Self> {
        let mut reader = data;
        Self::read(&mut reader, options)
    }
}
