//! Per-format decoders from raw bytes to template values.
//!
//! [`Format`] is a closed set: each namespace resolves to exactly one
//! variant once, and every decode goes through [`Format::decode`]. The
//! decoders themselves live in [`csv`], [`json`] and [`yaml`] and are pure
//! functions over byte slices.
//!
//! | Format | File candidates | Decoded shape |
//! |--------|-----------------|---------------|
//! | [`Format::Text`] | never | string (descriptor taken verbatim) |
//! | [`Format::Csv`] | `*.csv` | array of record objects |
//! | [`Format::Json`] | `*.json` | any JSON value |
//! | [`Format::Yaml`] | `*.yml`, `*.yaml` | any JSON-compatible value |

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::constants::{CSV_EXTENSIONS, JSON_EXTENSIONS, YAML_EXTENSIONS};
use crate::core::TmplxError;

pub use self::csv::{CsvMode, CsvOptions};

/// The decoder a namespace uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Identity: the descriptor itself is the value.
    Text,
    /// CSV records, decoded with the given options.
    Csv(CsvOptions),
    /// A JSON document.
    Json,
    /// A YAML document.
    Yaml,
}

impl Format {
    /// Whether descriptors of this format are only ever literal strings.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Format::Text)
    }

    /// File extensions (without dot) that mark a descriptor as a file candidate.
    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Text => &[],
            Format::Csv(_) => CSV_EXTENSIONS,
            Format::Json => JSON_EXTENSIONS,
            Format::Yaml => YAML_EXTENSIONS,
        }
    }

    /// Whether `descriptor` ends in one of this format's file extensions.
    ///
    /// This is only a pre-filter: the resolver still checks that the path
    /// exists before reading it, so inline content that happens to end in
    /// `.json` stays inline content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tmplx_cli::binding::formats::Format;
    ///
    /// assert!(Format::Json.is_file_candidate("config/app.JSON"));
    /// assert!(!Format::Json.is_file_candidate("app.yml"));
    /// assert!(!Format::Text.is_file_candidate("notes.txt"));
    /// ```
    #[must_use]
    pub fn is_file_candidate(&self, descriptor: &str) -> bool {
        Path::new(descriptor)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().iter().any(|known| ext.eq_ignore_ascii_case(known)))
    }

    /// Decode raw bytes into a template value.
    ///
    /// # Errors
    ///
    /// - the format's decode error for malformed input
    /// - [`TmplxError::UnsupportedFormat`] for [`Format::Text`], whose values
    ///   never pass through byte decoding
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, TmplxError> {
        match self {
            Format::Csv(options) => csv::decode(bytes, options),
            Format::Json => json::decode(bytes),
            Format::Yaml => yaml::decode(bytes),
            Format::Text => Err(TmplxError::UnsupportedFormat {
                format: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Text => "text",
            Format::Csv(_) => "csv",
            Format::Json => "json",
            Format::Yaml => "yaml",
        };
        f.write_str(name)
    }
}
