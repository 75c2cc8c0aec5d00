//! Lang file reading and parsing
//!
//! Parsing is done in two phases over a fully materialized buffer: the
//! index table is collected first, then every pair is resolved against
//! pool-relative cursors. No stream position is saved or restored.

use super::header::parse_lang_header;
use super::{HEADER_SIZE, INDEX_RECORD_SIZE, LANG_VERSION, LangEntry, LangFile};
use crate::error::{Error, Result};
use crate::formats::common::{Endianness, read_null_terminated_string};
use encoding_rs::UTF_8;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Read a Lang file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and any error
/// of [`parse_lang_bytes`] if its content is malformed.
pub fn read_lang<P: AsRef<Path>>(path: P) -> Result<LangFile> {
    let path = path.as_ref();
    tracing::info!("Reading Lang file: {:?}", path);

    let mut file = File::open(path)?;
    read_lang_from(&mut file)
}

/// Read a Lang table from the current position of a stream
///
/// The remainder of the stream is loaded into memory. Pool offsets are
/// resolved relative to the position the header was read from.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, and any error of
/// [`parse_lang_bytes`] if the content is malformed.
pub fn read_lang_from<R: Read>(reader: &mut R) -> Result<LangFile> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    parse_lang_bytes(&buffer)
}

/// Parse a Lang table from bytes
///
/// # Errors
///
/// Returns [`Error::UnknownEndianMarker`] if the byte order cannot be detected,
/// [`Error::InvalidOffset`] if a table or string offset points outside the data,
/// [`Error::TruncatedStream`] if the data ends inside a structure, and
/// [`Error::Encoding`] if a string is not valid UTF-8.
pub fn parse_lang_bytes(data: &[u8]) -> Result<LangFile> {
    let header = parse_lang_header(data)?;
    if header.version != LANG_VERSION {
        tracing::warn!("Unexpected Lang version {} (expected {})", header.version, LANG_VERSION);
    }

    // The index table always follows the fixed header; the stored size is informational
    if header.header_size as usize != HEADER_SIZE {
        tracing::warn!(
            "Lang header size field is {} (expected {}), ignoring it",
            header.header_size,
            HEADER_SIZE
        );
    }

    let order = header.endianness;
    let pairs = read_index_table(data, order, header.entry_count)?;

    let keys = Pool::new(data, header.key_pool_offset);
    let values = Pool::new(data, header.value_pool_offset);

    let mut entries = Vec::with_capacity(pairs.len());
    for (key_offset, value_offset) in pairs {
        let (key, _) = read_null_terminated_string(keys.at(key_offset)?, UTF_8)?;

        let mut value_data = values.at(value_offset)?;
        // Type tag; every known file stores 1 and nothing depends on it
        let _value_type = order
            .read_u16(&mut value_data)
            .map_err(|e| Error::from_io(e, "Lang value type tag"))?;
        let (value, _) = read_null_terminated_string(value_data, UTF_8)?;

        entries.push(LangEntry { key, value });
    }

    tracing::debug!("Parsed {} Lang entries", entries.len());

    Ok(LangFile {
        endianness: order,
        entries,
    })
}

/// Collect every `(key offset, value offset)` pair of the index table
///
/// `data` must hold at least a full header.
fn read_index_table(data: &[u8], order: Endianness, entry_count: u32) -> Result<Vec<(u32, u32)>> {
    let start = HEADER_SIZE;

    // Checked before allocating so a corrupt count cannot reserve huge buffers
    let table_len = (entry_count as usize)
        .checked_mul(INDEX_RECORD_SIZE)
        .filter(|&len| len <= data.len() - start)
        .ok_or(Error::TruncatedStream {
            context: "Lang index table",
        })?;

    let mut cursor = Cursor::new(&data[start..start + table_len]);
    let mut pairs = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        let key_offset = order
            .read_u32(&mut cursor)
            .map_err(|e| Error::from_io(e, "Lang index table"))?;
        let value_offset = order
            .read_u32(&mut cursor)
            .map_err(|e| Error::from_io(e, "Lang index table"))?;
        pairs.push((key_offset, value_offset));
    }

    Ok(pairs)
}

/// A string pool addressed by offsets relative to its start
struct Pool<'a> {
    data: &'a [u8],
    start: u64,
}

impl<'a> Pool<'a> {
    fn new(data: &'a [u8], start: u32) -> Self {
        Self {
            data,
            start: u64::from(start),
        }
    }

    /// Bytes from `start + offset` to the end of the data
    fn at(&self, offset: u32) -> Result<&'a [u8]> {
        let position = self.start + u64::from(offset);
        usize::try_from(position)
            .ok()
            .filter(|&pos| pos < self.data.len())
            .map(|pos| &self.data[pos..])
            .ok_or(Error::InvalidOffset {
                offset: position,
                len: self.data.len(),
            })
    }
}
