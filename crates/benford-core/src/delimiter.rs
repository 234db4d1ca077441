//! Column delimiter policy.
//!
//! The expected delimiter is a pure function of the upload's file extension:
//! `.csv` files are semicolon separated, everything else is tab separated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extension that selects the semicolon delimiter.
pub const CSV_EXTENSION: &str = ".csv";

/// Column delimiter derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `;` used by `.csv` uploads.
    Semicolon,
    /// `\t` used by every other upload.
    Tab,
}

impl Delimiter {
    /// Resolve the delimiter for a dotted extension such as `".csv"`.
    ///
    /// Total: unknown and empty extensions fall back to [`Delimiter::Tab`].
    pub fn for_extension(extension: &str) -> Self {
        if extension == CSV_EXTENSION {
            Delimiter::Semicolon
        } else {
            Delimiter::Tab
        }
    }

    /// The delimiter as a single byte.
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }
}

impl fmt::Display for Delimiter {
    /// Renders the delimiter escaped and quoted, e.g. `'\t'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.byte().escape_ascii())
    }
}

/// The data format of one upload: its extension tag and derived delimiter.
///
/// The delimiter is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFormat {
    extension: String,
    delimiter: Delimiter,
}

impl DataFormat {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let delimiter = Delimiter::for_extension(&extension);
        Self {
            extension,
            delimiter,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }
}

impl Default for DataFormat {
    fn default() -> Self {
        Self::new("")
    }
}
