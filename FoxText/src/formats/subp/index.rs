//! Container index records for Subp entries

use super::{SubpEntry, SubpIndex, SubpOptions};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, Write};

impl SubpIndex {
    /// Read one 8-byte `[subtitleId][offset]` record
    ///
    /// # Errors
    /// Returns [`Error::TruncatedStream`] if fewer than 8 bytes remain.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let subtitle_id = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::from_io(e, "Subp index record"))?;
        let offset = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::from_io(e, "Subp index record"))?;
        Ok(Self {
            subtitle_id,
            offset,
        })
    }

    /// Write one 8-byte `[subtitleId][offset]` record
    ///
    /// # Errors
    /// Returns [`Error::Io`] if writing fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.subtitle_id)?;
        writer.write_u32::<LittleEndian>(self.offset)?;
        Ok(())
    }
}

impl SubpEntry {
    /// Capture this entry's id and the current stream position
    ///
    /// Only meaningful when called immediately before [`SubpEntry::write`] on
    /// the same stream.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the position cannot be queried and
    /// [`Error::OffsetOverflow`] if it does not fit in 32 bits.
    pub fn index<S: Seek>(&self, stream: &mut S) -> Result<SubpIndex> {
        let position = stream.stream_position()?;
        let offset =
            u32::try_from(position).map_err(|_| Error::OffsetOverflow { value: position })?;
        Ok(SubpIndex {
            subtitle_id: self.subtitle_id,
            offset,
        })
    }
}

/// Write entries back to back, returning the index of each
///
/// Each index is captured right before its entry is written, so offsets are
/// absolute positions in `writer`.
///
/// # Errors
/// Returns the first error from [`SubpEntry::index`] or [`SubpEntry::write`].
/// Entries before the failing one remain written.
pub fn write_subp_entries<W: Write + Seek>(
    writer: &mut W,
    entries: &[SubpEntry],
    options: &SubpOptions,
) -> Result<Vec<SubpIndex>> {
    let mut indices = Vec::with_capacity(entries.len());
    for entry in entries {
        indices.push(entry.index(writer)?);
        entry.write(writer, options)?;
    }
    tracing::debug!("Wrote {} Subp entries", indices.len());
    Ok(indices)
}
