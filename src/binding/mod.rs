//! Data extraction and namespace binding.
//!
//! This is the heart of tmplx: it turns the references given on the command
//! line into the data tree a template is rendered against.
//!
//! # Pipeline
//!
//! For every `key=descriptor` token of a namespace:
//!
//! 1. [`split_reference`] splits the token at its first `=`
//! 2. [`SourceResolver`] turns the descriptor into content: stdin (via the
//!    [`StdinArbiter`]), a file, or the descriptor itself
//! 3. the namespace's [`Format`] decodes the content
//! 4. [`NamespaceBinder`] stores the value under the key, later tokens
//!    replacing earlier ones
//!
//! [`DataTree::assemble`] finally combines the five namespaces.
//!
//! # Namespaces
//!
//! | Namespace | Flag | Format | Value per key |
//! |-----------|------|--------|---------------|
//! | `Env` | process environment | text | string |
//! | `Var` | `--var` | text | string |
//! | `CSV` | `--csv` | CSV | list of records |
//! | `JSON` | `--json` | JSON | any value |
//! | `YML` | `--yml` | YAML | any value |
//!
//! # Concurrency
//!
//! Binding is strictly sequential. The stdin arbiter is a single `&mut`
//! owner threaded through every binder call, so no locking is involved.

pub mod binder;
pub mod formats;
pub mod model;
pub mod reference;
pub mod source;
pub mod stdin;

use std::fmt;

pub use binder::{Bindings, NamespaceBinder};
pub use formats::{CsvMode, CsvOptions, Format};
pub use model::{DataTree, EnvSnapshot, References};
pub use reference::split_reference;
pub use source::{Resolved, Source, SourceResolver};
pub use stdin::{StdinArbiter, StdinPolicy};

use crate::constants::{NAMESPACE_CSV, NAMESPACE_ENV, NAMESPACE_JSON, NAMESPACE_VAR, NAMESPACE_YML};

/// One of the five top-level data categories exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Process environment captured at start-up
    Env,
    /// `--var` references
    Var,
    /// `--csv` references
    Csv,
    /// `--json` references
    Json,
    /// `--yml` references
    Yml,
}

impl Namespace {
    /// All namespaces, in binding order.
    pub const ALL: [Namespace; 5] =
        [Namespace::Var, Namespace::Csv, Namespace::Json, Namespace::Yml, Namespace::Env];

    /// Key of this namespace in the rendered data tree.
    #[must_use]
    pub const fn root_key(self) -> &'static str {
        match self {
            Namespace::Env => NAMESPACE_ENV,
            Namespace::Var => NAMESPACE_VAR,
            Namespace::Csv => NAMESPACE_CSV,
            Namespace::Json => NAMESPACE_JSON,
            Namespace::Yml => NAMESPACE_YML,
        }
    }

    /// Command-line flag name (without dashes) used in diagnostics.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Namespace::Env => "env",
            Namespace::Var => "var",
            Namespace::Csv => "csv",
            Namespace::Json => "json",
            Namespace::Yml => "yml",
        }
    }

    /// The decoder for this namespace.
    #[must_use]
    pub const fn format(self, csv_options: CsvOptions) -> Format {
        match self {
            Namespace::Env | Namespace::Var => Format::Text,
            Namespace::Csv => Format::Csv(csv_options),
            Namespace::Json => Format::Json,
            Namespace::Yml => Format::Yaml,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_key())
    }
}
