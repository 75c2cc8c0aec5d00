//! Options for reading and writing Subp entries

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8};

/// Settings shared by Subp reads and writes.
///
/// # Example
///
/// ```
/// use foxtext::formats::subp::SubpOptions;
///
/// // UTF-8, lenient line counts
/// let options = SubpOptions::new();
///
/// // Japanese subtitles, rejecting entries whose text and timings disagree
/// let options = SubpOptions::for_label("shift_jis")?
///     .with_strict_line_count(true);
/// # Ok::<(), foxtext::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubpOptions {
    /// Encoding of the text blob
    pub encoding: &'static Encoding,

    /// Fail when the number of `$`-separated segments differs from the
    /// number of timing records.
    /// Default: false (missing lines are read as empty, extras are dropped)
    pub strict_line_count: bool,
}

impl Default for SubpOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SubpOptions {
    /// UTF-8 text with lenient line counts
    #[must_use]
    pub fn new() -> Self {
        Self {
            encoding: UTF_8,
            strict_line_count: false,
        }
    }

    /// Options using the encoding named by a WHATWG label
    /// (e.g. `"utf-8"`, `"shift_jis"`, `"utf-16le"`)
    ///
    /// # Errors
    /// Returns [`Error::UnknownEncoding`] if the label is not recognized.
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
        Ok(Self::new().with_encoding(encoding))
    }

    /// Set the text encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set whether line count mismatches are errors.
    #[must_use]
    pub fn with_strict_line_count(mut self, strict: bool) -> Self {
        self.strict_line_count = strict;
        self
    }
}
