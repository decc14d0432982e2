//! JSON decoding into a generic value tree.

use serde_json::Value;

use crate::core::TmplxError;

/// Decode any JSON document (object, array or scalar).
///
/// # Errors
///
/// Returns [`TmplxError::JsonDecode`] for malformed input. Empty or
/// whitespace-only input is malformed.
pub fn decode(bytes: &[u8]) -> Result<Value, TmplxError> {
    if bytes.trim_ascii().is_empty() {
        return Err(TmplxError::JsonDecode {
            reason: "empty input".to_string(),
        });
    }
    serde_json::from_slice(bytes).map_err(|e| TmplxError::JsonDecode {
        reason: e.to_string(),
    })
}
