//! Arbitration of the single, read-once standard input stream.
//!
//! Standard input can be drained exactly once per process, yet several
//! references (`--csv a=-`, `--json b=-`, a template argument `-`) may ask
//! for it. The [`StdinArbiter`] owns the stream for one invocation and
//! applies one [`StdinPolicy`] to every request:
//!
//! - [`StdinPolicy::Cached`] (default): the first request drains the stream
//!   to end-of-stream and caches the bytes; every later request receives the
//!   same bytes without touching the stream again.
//! - [`StdinPolicy::Exclusive`]: the first request claims and drains the
//!   stream; any later request fails with
//!   [`TmplxError::StdinAlreadyClaimed`] naming both keys.
//!
//! There is no timeout: if the producer never closes the stream the first
//! read blocks until the process is interrupted.

use std::fmt;
use std::io::{self, Read};

use tracing::{debug, trace};

use crate::core::TmplxError;

/// How repeated requests for stdin are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdinPolicy {
    /// Drain once, hand the cached bytes to every request.
    #[default]
    Cached,
    /// Allow exactly one request per invocation.
    Exclusive,
}

/// Single owner of standard input for one invocation.
///
/// Construct it once, before any binding, and pass it by `&mut` to every
/// component that may resolve the `-` sentinel.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tmplx_cli::binding::{StdinArbiter, StdinPolicy};
///
/// let mut arbiter = StdinArbiter::from_reader(StdinPolicy::Cached, Cursor::new("a,b\n1,2"));
/// let first = arbiter.read("rows").unwrap().to_vec();
/// let second = arbiter.read("other").unwrap().to_vec();
/// assert_eq!(first, second);
/// ```
pub struct StdinArbiter {
    policy: StdinPolicy,
    input: Option<Box<dyn Read>>,
    cache: Option<Vec<u8>>,
    claimed_by: Option<String>,
    failure: Option<String>,
}

impl StdinArbiter {
    /// Create an arbiter over the process's standard input.
    #[must_use]
    pub fn new(policy: StdinPolicy) -> Self {
        Self::from_reader(policy, io::stdin())
    }

    /// Create an arbiter over an arbitrary reader standing in for stdin.
    pub fn from_reader(policy: StdinPolicy, reader: impl Read + 'static) -> Self {
        Self {
            policy,
            input: Some(Box::new(reader)),
            cache: None,
            claimed_by: None,
            failure: None,
        }
    }

    /// The policy this arbiter applies.
    #[must_use]
    pub const fn policy(&self) -> StdinPolicy {
        self.policy
    }

    /// Whether the underlying stream has already been drained.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.cache.is_some()
    }

    /// Request the content of stdin on behalf of `key`.
    ///
    /// The first request blocks until end-of-stream.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::StdinAlreadyClaimed`] for a second request under
    ///   [`StdinPolicy::Exclusive`]
    /// - [`TmplxError::StdinRead`] if draining the stream fails; later
    ///   requests report the same failure and nothing is claimed
    pub fn read(&mut self, key: &str) -> Result<&[u8], TmplxError> {
        if self.policy == StdinPolicy::Exclusive {
            if let Some(claimed_by) = &self.claimed_by {
                return Err(TmplxError::StdinAlreadyClaimed {
                    key: key.to_string(),
                    claimed_by: claimed_by.clone(),
                });
            }
        }
        if self.cache.is_none() {
            let bytes = self.drain()?;
            debug!("Read {} bytes from stdin for '{}'", bytes.len(), key);
            self.cache = Some(bytes);
        } else {
            trace!("Serving cached stdin content to '{}'", key);
        }

        if self.claimed_by.is_none() {
            self.claimed_by = Some(key.to_string());
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    fn drain(&mut self) -> Result<Vec<u8>, TmplxError> {
        if let Some(reason) = &self.failure {
            return Err(TmplxError::StdinRead {
                reason: reason.clone(),
            });
        }

        let mut bytes = Vec::new();
        if let Some(input) = self.input.as_mut() {
            if let Err(e) = input.read_to_end(&mut bytes) {
                let reason = e.to_string();
                self.failure = Some(reason.clone());
                return Err(TmplxError::StdinRead {
                    reason,
                });
            }
        }
        self.input = None;
        Ok(bytes)
    }
}

impl fmt::Debug for StdinArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdinArbiter")
            .field("policy", &self.policy)
            .field("drained", &self.is_drained())
            .field("claimed_by", &self.claimed_by)
            .field("failure", &self.failure)
            .finish()
    }
}
