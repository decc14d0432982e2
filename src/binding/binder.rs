//! Binding of `key=descriptor` references into one namespace.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, trace};

use super::Namespace;
use super::formats::CsvOptions;
use super::reference::split_reference;
use super::source::{Resolved, SourceResolver};
use super::stdin::StdinArbiter;
use crate::core::TmplxError;

/// Values bound into a single namespace, keyed by reference key.
pub type Bindings = BTreeMap<String, Value>;

/// Binds reference tokens of every namespace for one invocation.
///
/// Tokens are processed strictly in the order given: for each one the key
/// is split off, the descriptor resolved and the content decoded with the
/// namespace's format. A later token with the same key replaces the earlier
/// value. The first failure aborts the whole namespace.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use serde_json::json;
/// use tmplx_cli::binding::{CsvOptions, Namespace, NamespaceBinder, StdinArbiter, StdinPolicy};
///
/// let mut stdin = StdinArbiter::from_reader(StdinPolicy::Cached, Cursor::new("a,b\n1,2"));
/// let mut binder = NamespaceBinder::new(&mut stdin, CsvOptions::default());
///
/// let csv = binder.bind(&["data=-"], Namespace::Csv).unwrap();
/// assert_eq!(csv["data"], json!([{"a": "1", "b": "2"}]));
/// ```
#[derive(Debug)]
pub struct NamespaceBinder<'s> {
    resolver: SourceResolver<'s>,
    csv_options: CsvOptions,
}

impl<'s> NamespaceBinder<'s> {
    /// Create a binder drawing stdin from `stdin` and decoding CSV with
    /// `csv_options`.
    pub fn new(stdin: &'s mut StdinArbiter, csv_options: CsvOptions) -> Self {
        Self {
            resolver: SourceResolver::new(stdin),
            csv_options,
        }
    }

    /// Bind `tokens` into `namespace`.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::MalformedReference`] for a token without `=`
    /// - [`TmplxError::Binding`] wrapping any resolution or decode failure,
    ///   naming the namespace, key and descriptor
    pub fn bind<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        namespace: Namespace,
    ) -> Result<Bindings, TmplxError> {
        let format = namespace.format(self.csv_options);
        let mut bindings = Bindings::new();

        for token in tokens {
            let (key, descriptor) = split_reference(token.as_ref())?;

            let value = self
                .resolver
                .resolve(key, descriptor, &format)
                .and_then(|resolved| match resolved {
                    Resolved::Literal(text) => Ok(Value::String(text.to_string())),
                    Resolved::Bytes(bytes) => {
                        trace!("Decoding {} bytes for '{}' as {}", bytes.len(), key, format);
                        format.decode(&bytes)
                    }
                })
                .map_err(|e| e.for_reference(namespace.flag(), key, descriptor))?;

            if bindings.insert(key.to_string(), value).is_some() {
                debug!("{} key '{}' given again, keeping the later value", namespace, key);
            }
        }

        debug!("Bound {} key(s) into {}", bindings.len(), namespace);
        Ok(bindings)
    }
}
