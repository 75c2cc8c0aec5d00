//! # FoxText
//!
//! Readers and writers for the binary text formats of a game localization
//! pipeline.
//!
//! ## Supported Formats
//!
//! - **Lang** - Key/value string tables, little- or big-endian
//! - **Subp** - Subtitle entries with per-line display timings
//!
//! ## Quick Start
//!
//! ### Editing a Lang table
//!
//! ```no_run
//! use foxtext::formats::lang::{read_lang, write_lang};
//!
//! let mut table = read_lang("ui.lng")?;
//! table.insert("menu_start", "Commencer");
//! write_lang("ui_fr.lng", &table)?;
//! # Ok::<(), foxtext::Error>(())
//! ```
//!
//! ### Round-tripping a subtitle entry
//!
//! ```
//! use foxtext::prelude::*;
//!
//! let entry = SubpEntry::new(1001, 3)
//!     .with_line("Hello", SubpTiming { start: 0, end: 90 })
//!     .with_line("World", SubpTiming { start: 90, end: 180 });
//!
//! let options = SubpOptions::new();
//! let bytes = entry.to_bytes(&options)?;
//! let read = SubpEntry::read_with_id(&mut &bytes[..], 1001, &options)?;
//! assert_eq!(read, entry);
//! # Ok::<(), foxtext::Error>(())
//! ```

pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::common::Endianness;
    pub use crate::formats::lang::{
        LangEntry, LangFile, LangHeader, LangLayout, parse_lang_bytes, parse_lang_header,
        read_lang, serialize_lang, serialize_lang_with_layout, write_lang,
    };
    pub use crate::formats::subp::{
        SubpEntry, SubpIndex, SubpLine, SubpOptions, SubpTiming, write_subp_entries,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
