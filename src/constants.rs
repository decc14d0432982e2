//! Global constants used throughout the tmplx codebase.
//!
//! This module contains the sentinel values, namespace names, file
//! extensions and environment variable names that are shared between the
//! binding layer, the renderer and the CLI. Defining them centrally keeps
//! the contract with templates in one discoverable place.

/// Descriptor value meaning "read this reference from standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Separator between key and descriptor in a `key=descriptor` token.
pub const REFERENCE_SEPARATOR: char = '=';

/// Root key under which captured environment variables are exposed.
pub const NAMESPACE_ENV: &str = "Env";

/// Root key under which `--var` values are exposed.
pub const NAMESPACE_VAR: &str = "Var";

/// Root key under which `--csv` record lists are exposed.
pub const NAMESPACE_CSV: &str = "CSV";

/// Root key under which `--json` documents are exposed.
pub const NAMESPACE_JSON: &str = "JSON";

/// Root key under which `--yml` documents are exposed.
pub const NAMESPACE_YML: &str = "YML";

/// File extensions treated as CSV file candidates.
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// File extensions treated as JSON file candidates.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// File extensions treated as YAML file candidates.
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// CSV field separator.
pub const CSV_DELIMITER: u8 = b',';

/// CSV full-line comment marker.
pub const CSV_COMMENT: u8 = b'#';

/// Maximum number of characters of a descriptor echoed back in error messages.
///
/// Inline literals can be arbitrarily large documents; diagnostics only need
/// enough of them to identify the offending flag.
pub const MAX_DESCRIPTOR_DISPLAY_LEN: usize = 60;

/// Name under which an `--eval` template is registered with the engine.
pub const EVAL_TEMPLATE_NAME: &str = "eval";

/// Name under which a template read from stdin is registered with the engine.
pub const STDIN_TEMPLATE_NAME: &str = "stdin";

/// Environment variable selecting the exclusive-claim stdin policy.
pub const ENV_EXCLUSIVE_STDIN: &str = "TMPLX_EXCLUSIVE_STDIN";

/// Environment variable enabling CSV type-hint detection.
pub const ENV_CSV_TYPED: &str = "TMPLX_CSV_TYPED";

/// Environment variable enabling the permissive CSV decode mode.
pub const ENV_CSV_LENIENT: &str = "TMPLX_CSV_LENIENT";
