//! Lang header decoding and encoding

use super::{BIG_ENDIAN_MARKER, HEADER_SIZE, LANG_MAGIC, LITTLE_ENDIAN_MARKER};
use crate::error::{Error, Result};
use crate::formats::common::Endianness;

/// Byte offset of the endianness marker within the header
const MARKER_OFFSET: usize = 8;

/// Decoded Lang header
///
/// All fields are decoded in the byte order named by `endianness`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LangHeader {
    pub magic: u32,
    pub version: u32,
    pub endianness: Endianness,
    pub entry_count: u32,
    /// Offset of the index table, relative to the header start
    pub header_size: u32,
    /// Offset of the key pool, relative to the header start
    pub key_pool_offset: u32,
    /// Offset of the value pool, relative to the header start
    pub value_pool_offset: u32,
    pub padding: u32,
}

impl LangHeader {
    /// Header for a freshly written little-endian file
    pub(super) fn for_write(entry_count: u32, key_pool_offset: u32, value_pool_offset: u32) -> Self {
        Self {
            magic: LANG_MAGIC,
            version: super::LANG_VERSION,
            endianness: Endianness::LittleEndian,
            entry_count,
            header_size: HEADER_SIZE as u32,
            key_pool_offset,
            value_pool_offset,
            padding: 0,
        }
    }

    /// Raw value of the marker field for this header's byte order
    #[must_use]
    pub fn marker(&self) -> u32 {
        match self.endianness {
            Endianness::LittleEndian => LITTLE_ENDIAN_MARKER,
            Endianness::BigEndian => BIG_ENDIAN_MARKER,
        }
    }

    /// Encode the header in its own byte order
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let order = self.endianness;
        let encode = |value: u32| match order {
            Endianness::LittleEndian => value.to_le_bytes(),
            Endianness::BigEndian => value.to_be_bytes(),
        };

        let fields = [
            encode(self.magic),
            encode(self.version),
            // The marker is stored as its raw bytes regardless of byte order
            self.marker().to_le_bytes(),
            encode(self.entry_count),
            encode(self.header_size),
            encode(self.key_pool_offset),
            encode(self.value_pool_offset),
            encode(self.padding),
        ];

        let mut bytes = [0u8; HEADER_SIZE];
        for (slot, field) in bytes.chunks_exact_mut(4).zip(fields) {
            slot.copy_from_slice(&field);
        }
        bytes
    }
}

/// Detect the byte order from the raw marker field
fn detect_endianness(marker: u32) -> Result<Endianness> {
    match marker {
        LITTLE_ENDIAN_MARKER => Ok(Endianness::LittleEndian),
        BIG_ENDIAN_MARKER => Ok(Endianness::BigEndian),
        other => Err(Error::UnknownEndianMarker(other)),
    }
}

/// Decode the fixed 32-byte header at the start of `data`
///
/// The whole header is taken as raw bytes first and the byte order is
/// determined from the marker before any field is interpreted, so fields
/// preceding the marker are decoded the same way as those after it.
///
/// # Errors
/// Returns [`Error::TruncatedStream`] if fewer than 32 bytes are available and
/// [`Error::UnknownEndianMarker`] if the marker matches neither sentinel.
pub fn parse_lang_header(data: &[u8]) -> Result<LangHeader> {
    let raw: &[u8; HEADER_SIZE] = data
        .get(..HEADER_SIZE)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(Error::TruncatedStream {
            context: "Lang header",
        })?;

    let field = |index: usize| -> [u8; 4] {
        let start = index * 4;
        [raw[start], raw[start + 1], raw[start + 2], raw[start + 3]]
    };

    let marker = u32::from_le_bytes(field(MARKER_OFFSET / 4));
    let endianness = detect_endianness(marker)?;
    let decode = |index: usize| endianness.u32_from_bytes(field(index));

    let header = LangHeader {
        magic: decode(0),
        version: decode(1),
        endianness,
        entry_count: decode(3),
        header_size: decode(4),
        key_pool_offset: decode(5),
        value_pool_offset: decode(6),
        padding: decode(7),
    };

    tracing::debug!(
        "Lang header: magic={:#010X} version={} {:?} entries={} keys@{:#x} values@{:#x}",
        header.magic,
        header.version,
        header.endianness,
        header.entry_count,
        header.key_pool_offset,
        header.value_pool_offset
    );

    Ok(header)
}
