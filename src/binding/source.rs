//! Resolution of descriptors into raw content.
//!
//! A descriptor is classified in a fixed order, and the first match wins:
//!
//! 1. exactly `-` → standard input, through the [`StdinArbiter`]
//! 2. a file candidate for the namespace's format that exists as a regular
//!    file → the file's bytes
//! 3. anything else → the descriptor itself as inline content
//!
//! Textual namespaces (`Var`, `Env`) skip the first two steps: their
//! descriptor is always the final string value.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::formats::Format;
use super::stdin::StdinArbiter;
use crate::constants::STDIN_SENTINEL;
use crate::core::TmplxError;

/// Where a descriptor's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// The `-` sentinel.
    Stdin,
    /// An existing file path.
    File(&'a Path),
    /// The descriptor text itself.
    Inline(&'a str),
}

impl<'a> Source<'a> {
    /// Classify `descriptor` for a namespace decoded with `format`.
    ///
    /// This touches the filesystem (an existence check) but never reads.
    #[must_use]
    pub fn classify(descriptor: &'a str, format: &Format) -> Self {
        if format.is_textual() {
            return Source::Inline(descriptor);
        }
        if descriptor == STDIN_SENTINEL {
            return Source::Stdin;
        }
        if format.is_file_candidate(descriptor) {
            let path = Path::new(descriptor);
            if path.is_file() {
                return Source::File(path);
            }
            warn!("'{}' looks like a {} file but does not exist, using it as inline content", descriptor, format);
        }
        Source::Inline(descriptor)
    }
}

/// Raw content produced by resolving a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// Final string value for textual namespaces.
    Literal(&'a str),
    /// Bytes still to be decoded by the namespace's format.
    Bytes(Cow<'a, [u8]>),
}

/// Turns descriptors into content, drawing on the invocation's stdin arbiter.
#[derive(Debug)]
pub struct SourceResolver<'s> {
    stdin: &'s mut StdinArbiter,
}

impl<'s> SourceResolver<'s> {
    /// Create a resolver that routes `-` through `stdin`.
    pub fn new(stdin: &'s mut StdinArbiter) -> Self {
        Self {
            stdin,
        }
    }

    /// Resolve the descriptor of reference `key` for a namespace decoded with
    /// `format`.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::StdinAlreadyClaimed`] / [`TmplxError::StdinRead`] from
    ///   the arbiter
    /// - [`TmplxError::FileRead`] if a file could not be read
    pub fn resolve<'d>(
        &mut self,
        key: &str,
        descriptor: &'d str,
        format: &Format,
    ) -> Result<Resolved<'d>, TmplxError> {
        if format.is_textual() {
            return Ok(Resolved::Literal(descriptor));
        }

        match Source::classify(descriptor, format) {
            Source::Stdin => {
                debug!("Resolving '{}' from stdin", key);
                let bytes = self.stdin.read(key)?;
                Ok(Resolved::Bytes(Cow::Owned(bytes.to_vec())))
            }
            Source::File(path) => {
                debug!("Resolving '{}' from file {}", key, path.display());
                let bytes = fs::read(path).map_err(|e| TmplxError::FileRead {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Resolved::Bytes(Cow::Owned(bytes)))
            }
            Source::Inline(text) => {
                debug!("Resolving '{}' from inline content ({} bytes)", key, text.len());
                Ok(Resolved::Bytes(Cow::Borrowed(text.as_bytes())))
            }
        }
    }
}
