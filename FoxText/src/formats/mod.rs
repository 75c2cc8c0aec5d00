//! Binary localization formats
//!
//! Both codecs build on the primitives in [`common`]; they do not depend on
//! each other.

pub mod common;
pub mod lang;
pub mod subp;

// Re-export common types for convenience
pub use common::Endianness;

// Re-export main model types
pub use lang::{LangEntry, LangFile, parse_lang_bytes, read_lang, serialize_lang, write_lang};
pub use subp::{SubpEntry, SubpIndex, SubpLine, SubpOptions, SubpTiming};
