//! Subp subtitle entry format
//!
//! One entry is a 12-byte header, one 8-byte timing record per line and a
//! text blob holding every line joined with `$` and terminated by a NUL.
//! Everything is little-endian. The text encoding is not recorded in the
//! entry and must be supplied by the caller through [`SubpOptions`].
//!
//! ```text
//! [magic:2][lineCount:1][priority:1][lenA:2][lenB:2][unknown:2][flags:2]
//! lineCount x [start:4][end:4]
//! lenA bytes of text
//! ```

mod index;
mod options;
mod reader;
mod writer;

pub use index::write_subp_entries;
pub use options::SubpOptions;

use serde::{Deserialize, Serialize};

/// Magic number at the start of every entry
pub const SUBP_MAGIC: u16 = 0x4C01;

/// Size of the fixed entry header
pub const SUBP_HEADER_SIZE: usize = 12;

/// Size of one timing record
pub const TIMING_SIZE: usize = 8;

/// Size of one index record
pub const INDEX_SIZE: usize = 8;

/// Separator between lines in the text blob
pub const LINE_DELIMITER: char = '$';

/// Most lines an entry can hold (the count is stored in one byte)
pub const MAX_LINES: usize = u8::MAX as usize;

/// Display window of one subtitle line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubpTiming {
    pub start: u32,
    pub end: u32,
}

/// One displayed line and its timing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubpLine {
    pub text: String,
    pub timing: SubpTiming,
}

impl SubpLine {
    pub fn new(text: impl Into<String>, timing: SubpTiming) -> Self {
        Self {
            text: text.into(),
            timing,
        }
    }
}

/// A subtitle cue made of up to 255 timed lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubpEntry {
    /// Identifier used by the container index; not part of the entry bytes
    pub subtitle_id: u32,
    pub priority: u8,
    pub lines: Vec<SubpLine>,
}

impl SubpEntry {
    #[must_use]
    pub fn new(subtitle_id: u32, priority: u8) -> Self {
        Self {
            subtitle_id,
            priority,
            lines: Vec::new(),
        }
    }

    /// Append a line
    #[must_use]
    pub fn with_line(mut self, text: impl Into<String>, timing: SubpTiming) -> Self {
        self.lines.push(SubpLine::new(text, timing));
        self
    }

    /// Line texts in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

/// Location of an entry inside its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubpIndex {
    pub subtitle_id: u32,
    /// Absolute byte position of the entry within the container stream
    pub offset: u32,
}
