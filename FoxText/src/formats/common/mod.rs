//! Primitives shared by the Lang and Subp codecs

pub mod endian;
pub mod text;

pub use endian::{Endianness, flip_u16, flip_u32};
pub use text::{
    decode_text, encode_text, read_null_terminated_string, unit_width,
    write_null_terminated_string,
};
