//! Subp entry writing

use super::{
    LINE_DELIMITER, MAX_LINES, SUBP_HEADER_SIZE, SUBP_MAGIC, SubpEntry, SubpOptions, SubpTiming,
    TIMING_SIZE,
};
use crate::error::{Error, Result};
use crate::formats::common::encode_text;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

impl SubpTiming {
    /// Write one 8-byte timing record
    ///
    /// # Errors
    /// Returns [`Error::Io`] if writing fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.start)?;
        writer.write_u32::<LittleEndian>(self.end)?;
        Ok(())
    }
}

impl SubpEntry {
    /// Encode the `$`-joined, NUL-terminated text blob
    fn encode_lines(&self, options: &SubpOptions) -> Result<Vec<u8>> {
        for (index, line) in self.lines.iter().enumerate() {
            if line.text.contains(LINE_DELIMITER) {
                return Err(Error::SubpDelimiterInLine { index });
            }
            if line.text.contains('\0') {
                return Err(Error::InteriorNul);
            }
        }

        let mut joined = self
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("$");
        joined.push('\0');
        encode_text(&joined, options.encoding)
    }

    /// Serialize this entry to bytes
    ///
    /// # Errors
    /// Returns [`Error::LineCountOverflow`] for more than 255 lines,
    /// [`Error::SubpDelimiterInLine`] or [`Error::InteriorNul`] for text that
    /// cannot be stored, [`Error::Encoding`] for unencodable text, and
    /// [`Error::SubpTextTooLong`] if the encoded text exceeds 65535 bytes.
    pub fn to_bytes(&self, options: &SubpOptions) -> Result<Vec<u8>> {
        if self.lines.len() > MAX_LINES {
            return Err(Error::LineCountOverflow {
                count: self.lines.len(),
            });
        }
        let line_count = self.lines.len() as u8;

        let text = self.encode_lines(options)?;
        let text_len = u16::try_from(text.len())
            .map_err(|_| Error::SubpTextTooLong { len: text.len() })?;

        let mut output =
            Vec::with_capacity(SUBP_HEADER_SIZE + self.lines.len() * TIMING_SIZE + text.len());
        output.write_u16::<LittleEndian>(SUBP_MAGIC)?;
        output.write_u8(line_count)?;
        output.write_u8(self.priority)?;
        output.write_u16::<LittleEndian>(text_len)?;
        output.write_u16::<LittleEndian>(text_len)?;
        output.write_u16::<LittleEndian>(0)?;
        output.write_u16::<LittleEndian>(0)?;

        for line in &self.lines {
            line.timing.write(&mut output)?;
        }
        output.extend_from_slice(&text);

        Ok(output)
    }

    /// Write this entry at the current position of `writer`
    ///
    /// The entry is validated and encoded before anything is written.
    ///
    /// # Errors
    /// Same as [`SubpEntry::to_bytes`], plus [`Error::Io`] if writing fails.
    pub fn write<W: Write>(&self, writer: &mut W, options: &SubpOptions) -> Result<()> {
        let bytes = self.to_bytes(options)?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}
