//! Byte-order aware integer reading and writing
//!
//! Formats pick their byte order at runtime (the Lang header carries a
//! marker), so the order is a value rather than a type parameter. Each
//! operation dispatches to `byteorder`'s `LE`/`BE` implementations.

use byteorder::{BE, LE, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// Byte order of a binary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    LittleEndian,
    BigEndian,
}

impl Endianness {
    /// Read a 16-bit unsigned integer in this byte order
    pub fn read_u16<R: Read>(self, reader: &mut R) -> io::Result<u16> {
        match self {
            Endianness::LittleEndian => reader.read_u16::<LE>(),
            Endianness::BigEndian => reader.read_u16::<BE>(),
        }
    }

    /// Read a 32-bit unsigned integer in this byte order
    pub fn read_u32<R: Read>(self, reader: &mut R) -> io::Result<u32> {
        match self {
            Endianness::LittleEndian => reader.read_u32::<LE>(),
            Endianness::BigEndian => reader.read_u32::<BE>(),
        }
    }

    /// Write a 16-bit unsigned integer in this byte order
    pub fn write_u16<W: Write>(self, writer: &mut W, value: u16) -> io::Result<()> {
        match self {
            Endianness::LittleEndian => writer.write_u16::<LE>(value),
            Endianness::BigEndian => writer.write_u16::<BE>(value),
        }
    }

    /// Write a 32-bit unsigned integer in this byte order
    pub fn write_u32<W: Write>(self, writer: &mut W, value: u32) -> io::Result<()> {
        match self {
            Endianness::LittleEndian => writer.write_u32::<LE>(value),
            Endianness::BigEndian => writer.write_u32::<BE>(value),
        }
    }

    /// Decode a raw 4-byte field in this byte order
    #[must_use]
    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::LittleEndian => u32::from_le_bytes(bytes),
            Endianness::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// Reverse the byte order of a 32-bit value
#[must_use]
pub fn flip_u32(value: u32) -> u32 {
    value.swap_bytes()
}

/// Reverse the byte order of a 16-bit value
#[must_use]
pub fn flip_u16(value: u16) -> u16 {
    value.swap_bytes()
}
