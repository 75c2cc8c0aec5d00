//! Lang file writing
//!
//! Both pools are built first so every offset is known, then the header,
//! index table and pools are assembled into one buffer. Output is always
//! little-endian with the current magic and version.

use super::header::LangHeader;
use super::{HEADER_SIZE, INDEX_RECORD_SIZE, LangFile, VALUE_TYPE_TAG};
use crate::error::{Error, Result};
use crate::formats::common::{Endianness, write_null_terminated_string};
use encoding_rs::UTF_8;
use std::io::Write;
use std::path::Path;

/// Pool-relative offsets of one written entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOffsets {
    /// Offset of the key, relative to the key pool start
    pub key_offset: u32,
    /// Offset of the value's type tag, relative to the value pool start
    pub value_offset: u32,
}

/// Where everything landed in a serialized table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangLayout {
    /// Key pool start, relative to the header start
    pub key_pool_offset: u32,
    /// Value pool start, relative to the header start
    pub value_pool_offset: u32,
    /// One record per entry, in entry order
    pub entries: Vec<EntryOffsets>,
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::OffsetOverflow {
        value: value as u64,
    })
}

/// Write a Lang file to disk
///
/// The table is assembled in memory and written to a temporary file next to
/// `path`, which then replaces `path` in a single rename.
///
/// # Errors
/// Returns an error if serialization or any file operation fails.
pub fn write_lang<P: AsRef<Path>>(path: P, lang: &LangFile) -> Result<()> {
    let path = path.as_ref();
    tracing::info!("Writing Lang file: {:?} ({} entries)", path, lang.entries.len());

    let bytes = serialize_lang(lang)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Serialize a Lang table into a writer
///
/// Nothing is written if serialization fails.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_lang_to<W: Write>(writer: &mut W, lang: &LangFile) -> Result<()> {
    let bytes = serialize_lang(lang)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Serialize a Lang table to bytes
///
/// # Errors
/// Returns [`Error::InteriorNul`] if a key or value contains a NUL character
/// and [`Error::OffsetOverflow`] if the table exceeds 32-bit offsets.
pub fn serialize_lang(lang: &LangFile) -> Result<Vec<u8>> {
    serialize_lang_with_layout(lang).map(|(bytes, _)| bytes)
}

/// Serialize a Lang table and report where each string was placed
///
/// # Errors
/// Same as [`serialize_lang`].
pub fn serialize_lang_with_layout(lang: &LangFile) -> Result<(Vec<u8>, LangLayout)> {
    let entry_count = to_u32(lang.entries.len())?;

    let mut key_pool = Vec::new();
    let mut key_offsets = Vec::with_capacity(lang.entries.len());
    for entry in &lang.entries {
        key_offsets.push(to_u32(key_pool.len())?);
        write_null_terminated_string(&mut key_pool, &entry.key, UTF_8)?;
    }

    let mut value_pool = Vec::new();
    let mut value_offsets = Vec::with_capacity(lang.entries.len());
    for entry in &lang.entries {
        value_offsets.push(to_u32(value_pool.len())?);
        Endianness::LittleEndian.write_u16(&mut value_pool, VALUE_TYPE_TAG)?;
        write_null_terminated_string(&mut value_pool, &entry.value, UTF_8)?;
    }

    let index_len = lang.entries.len() * INDEX_RECORD_SIZE;
    let key_pool_offset = to_u32(HEADER_SIZE + index_len)?;
    let value_pool_offset = to_u32(HEADER_SIZE + index_len + key_pool.len())?;
    // The last value must still be addressable with a 32-bit offset
    to_u32(HEADER_SIZE + index_len + key_pool.len() + value_pool.len())?;

    let header = LangHeader::for_write(entry_count, key_pool_offset, value_pool_offset);

    let mut output =
        Vec::with_capacity(HEADER_SIZE + index_len + key_pool.len() + value_pool.len());
    output.extend_from_slice(&header.to_bytes());

    let entries: Vec<EntryOffsets> = key_offsets
        .into_iter()
        .zip(value_offsets)
        .map(|(key_offset, value_offset)| EntryOffsets {
            key_offset,
            value_offset,
        })
        .collect();
    let order = Endianness::LittleEndian;
    for offsets in &entries {
        order.write_u32(&mut output, offsets.key_offset)?;
        order.write_u32(&mut output, offsets.value_offset)?;
    }

    output.extend_from_slice(&key_pool);
    output.extend_from_slice(&value_pool);

    tracing::debug!(
        "Serialized {} Lang entries ({} key bytes, {} value bytes)",
        entry_count,
        key_pool.len(),
        value_pool.len()
    );

    let layout = LangLayout {
        key_pool_offset,
        value_pool_offset,
        entries,
    };
    Ok((output, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::lang::{LANG_MAGIC, LangEntry};
    use pretty_assertions::assert_eq;

    fn sample() -> LangFile {
        let mut lang = LangFile::new();
        lang.entries.push(LangEntry::new("menu_start", "Start"));
        lang.entries.push(LangEntry::new("menu_quit", "Quit"));
        lang
    }

    #[test]
    fn test_exact_bytes() {
        let mut lang = LangFile::new();
        lang.entries.push(LangEntry::new("k", "v"));
        let bytes = serialize_lang(&lang).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&LANG_MAGIC.to_le_bytes());
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(b"LE\0\0");
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&32u32.to_le_bytes());
        expected.extend_from_slice(&40u32.to_le_bytes());
        expected.extend_from_slice(&42u32.to_le_bytes());
        expected.extend_from_slice(&0u32.to_le_bytes());
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"k\0");
        expected.extend_from_slice(&[1, 0, b'v', 0]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_layout_points_at_strings() {
        let (bytes, layout) = serialize_lang_with_layout(&sample()).unwrap();
        assert_eq!(layout.key_pool_offset, 48);
        assert_eq!(layout.entries.len(), 2);

        for (offsets, entry) in layout.entries.iter().zip(&sample().entries) {
            let key_at = (layout.key_pool_offset + offsets.key_offset) as usize;
            assert!(bytes[key_at..].starts_with(entry.key.as_bytes()));

            let value_at = (layout.value_pool_offset + offsets.value_offset) as usize;
            assert_eq!(&bytes[value_at..value_at + 2], &[1, 0]);
            assert!(bytes[value_at + 2..].starts_with(entry.value.as_bytes()));
        }
    }

    #[test]
    fn test_empty_table() {
        let (bytes, layout) = serialize_lang_with_layout(&LangFile::new()).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(layout.key_pool_offset, 32);
        assert_eq!(layout.value_pool_offset, 32);
    }

    #[test]
    fn test_interior_nul_fails_without_output() {
        let mut lang = sample();
        lang.entries[1].value = "bad\0value".to_string();

        let mut out = Vec::new();
        let err = write_lang_to(&mut out, &lang).unwrap_err();
        assert!(matches!(err, Error::InteriorNul));
        assert!(out.is_empty());
    }
}
