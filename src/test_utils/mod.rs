//! Test utilities for tmplx
//!
//! Shared by the unit tests and, through the `test-utils` feature, by the
//! integration tests under `tests/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use tmplx_cli::test_utils::{SAMPLE_CSV, init_test_logging};
//!
//! init_test_logging(None);
//! std::fs::write("people.csv", SAMPLE_CSV).unwrap();
//! ```

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Two people with a name and an age column.
pub const SAMPLE_CSV: &str = "name,age\nAlice,30\nBob,25\n";

/// The same people with a type-hint row.
pub const SAMPLE_TYPED_CSV: &str = "name,age,active\nstring,int,bool\nAlice,30,true\nBob,25,false\n";

/// A nested JSON document.
pub const SAMPLE_JSON: &str = r#"{"server": {"host": "localhost", "port": 8080}, "debug": true}"#;

/// A YAML document with a list.
pub const SAMPLE_YAML: &str = "replicas: 2\nimages:\n  - web\n  - worker\n";

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=tmplx_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
