//! Integration test suite for tmplx
//!
//! These tests run the compiled `tmplx` binary end to end: arguments in,
//! rendered text on stdout, diagnostics on stderr, exit status.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: templates, partials and every namespace
//! - **formats**: CSV, JSON and YAML decoding through the CLI
//! - **stdin**: sharing and exclusive claims of standard input
//! - **errors**: failure reporting and exit codes

#[path = "../common/mod.rs"]
mod common;

mod errors;
mod formats;
mod render;
mod stdin;
