//! Error types for `FoxText`

use thiserror::Error;

/// The error type for `FoxText` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from stream or file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a complete structure could be read.
    #[error("unexpected end of stream while reading {context}")]
    TruncatedStream {
        /// What was being read when the data ran out.
        context: &'static str,
    },

    // ==================== Offset Errors ====================
    /// A stored offset points outside the available data.
    #[error("offset {offset:#x} is outside the data ({len} bytes)")]
    InvalidOffset {
        /// The resolved absolute offset.
        offset: u64,
        /// Length of the data the offset was resolved against.
        len: usize,
    },

    /// A computed offset, size or count does not fit its 32-bit field.
    #[error("value {value} does not fit in a 32-bit field")]
    OffsetOverflow {
        /// The value that overflowed.
        value: u64,
    },

    // ==================== Lang Format Errors ====================
    /// The Lang endianness marker matched neither known sentinel.
    #[error("unknown endianness marker: {0:#010X}")]
    UnknownEndianMarker(u32),

    /// A string contains a NUL character and cannot be null-terminated.
    #[error("string contains an interior NUL character")]
    InteriorNul,

    // ==================== Subp Format Errors ====================
    /// The Subp entry does not start with the expected magic.
    #[error("invalid Subp magic: expected 0x4C01, found {0:#06X}")]
    InvalidSubpMagic(u16),

    /// A Subp entry holds more lines than its 8-bit count can store.
    #[error("subtitle has {count} lines (maximum 255)")]
    LineCountOverflow {
        /// The number of lines in the entry.
        count: usize,
    },

    /// The encoded subtitle text does not fit its 16-bit length field.
    #[error("encoded subtitle text is {len} bytes (maximum 65535)")]
    SubpTextTooLong {
        /// Encoded length including the terminator.
        len: usize,
    },

    /// A subtitle line contains the `$` line delimiter.
    #[error("subtitle line {index} contains the '$' line delimiter")]
    SubpDelimiterInLine {
        /// Index of the offending line.
        index: usize,
    },

    /// The number of text segments differs from the number of timing records.
    #[error("subtitle declares {expected} lines but its text has {found} segments")]
    SubpLineCountMismatch {
        /// Line count from the header.
        expected: usize,
        /// Segments found after splitting the text.
        found: usize,
    },

    // ==================== Encoding Errors ====================
    /// Text could not be converted to or from the requested encoding.
    #[error("{encoding} encoding error: {message}")]
    Encoding {
        /// Name of the encoding involved.
        encoding: &'static str,
        /// Description of what failed.
        message: String,
    },

    /// An encoding label was not recognized.
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
}

impl Error {
    /// Map an IO error to [`Error::TruncatedStream`] when it signals end of input.
    pub(crate) fn from_io(err: std::io::Error, context: &'static str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::TruncatedStream { context }
        } else {
            Error::Io(err)
        }
    }
}

/// A specialized Result type for `FoxText` operations.
pub type Result<T> = std::result::Result<T, Error>;
