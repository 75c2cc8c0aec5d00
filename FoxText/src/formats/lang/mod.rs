//! Lang key/value string table format
//!
//! A 32-byte header, an index table of `(key offset, value offset)` pairs, a
//! key pool of null-terminated strings and a value pool where each string is
//! preceded by a 16-bit type tag. Offsets in the index table are relative to
//! the start of their pool; pool offsets in the header are relative to the
//! start of the header.
//!
//! Files may be stored in either byte order. The marker at header offset 8
//! is always interpreted as a little-endian `u32` to tell them apart.

mod editor;
mod header;
mod reader;
mod writer;

pub use editor::MergeResult;
pub use header::{LangHeader, parse_lang_header};
pub use reader::{parse_lang_bytes, read_lang, read_lang_from};
pub use writer::{
    EntryOffsets, LangLayout, serialize_lang, serialize_lang_with_layout, write_lang,
    write_lang_to,
};

use crate::formats::common::Endianness;
use serde::{Deserialize, Serialize};

/// Magic number written to new files ("LANG" read as little-endian)
pub const LANG_MAGIC: u32 = 0x474E_414C;

/// Format version written to new files
pub const LANG_VERSION: u32 = 2;

/// Marker value identifying a little-endian file ("LE")
pub const LITTLE_ENDIAN_MARKER: u32 = 0x0000_454C;

/// Marker value identifying a big-endian file ("BE")
pub const BIG_ENDIAN_MARKER: u32 = 0x0000_4542;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 32;

/// Size of one `(key offset, value offset)` index record
pub const INDEX_RECORD_SIZE: usize = 8;

/// Type tag written before every value string
pub const VALUE_TYPE_TAG: u16 = 1;

/// A single key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LangEntry {
    pub key: String,
    pub value: String,
}

impl LangEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A Lang string table
///
/// Entry order is significant: it is the order of the on-disk index table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LangFile {
    /// Byte order the file was read with. Writing always produces little-endian.
    pub endianness: Endianness,
    pub entries: Vec<LangEntry>,
}

impl LangFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table tagged with the given byte order
    #[must_use]
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            endianness,
            entries: Vec::new(),
        }
    }
}
