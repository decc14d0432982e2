//! Splitting of `key=descriptor` reference tokens.

use crate::constants::REFERENCE_SEPARATOR;
use crate::core::TmplxError;

/// Split a reference token at its first `=`.
///
/// Everything after the first separator is the descriptor, including any
/// further `=` characters. The key may be empty (`=value` is accepted).
///
/// # Errors
///
/// Returns [`TmplxError::MalformedReference`] if the token has no `=`.
///
/// # Examples
///
/// ```rust
/// use tmplx_cli::binding::split_reference;
///
/// let (key, value) = split_reference("query=a=b").unwrap();
/// assert_eq!(key, "query");
/// assert_eq!(value, "a=b");
///
/// assert!(split_reference("bad").is_err());
/// ```
pub fn split_reference(token: &str) -> Result<(&str, &str), TmplxError> {
    token.split_once(REFERENCE_SEPARATOR).ok_or_else(|| TmplxError::MalformedReference {
        token: token.to_string(),
    })
}
