//! tmplx - render templates with data from the command line
//!
//! tmplx binds data given as `key=descriptor` flags into a tree of five
//! namespaces and renders a [Tera](https://keats.github.io/tera/) template
//! against it.
//!
//! # Architecture Overview
//!
//! ```text
//! argv ──► cli::Cli ──► binding::NamespaceBinder ──► binding::DataTree ──► templating::TemplateRenderer ──► stdout
//!                              │
//!                              ├─ reference   (split key=descriptor)
//!                              ├─ source      (stdin / file / inline)
//!                              │    └─ stdin  (StdinArbiter)
//!                              └─ formats     (csv / json / yaml)
//! ```
//!
//! # Core Modules
//!
//! - [`binding`] - reference splitting, stdin arbitration, descriptor
//!   resolution, format decoding and namespace binding
//! - [`templating`] - template loading and Tera rendering
//! - [`cli`] - argument parsing and orchestration of one invocation
//! - [`core`] - error types and user-facing error presentation
//! - [`constants`] - sentinel, namespace names, extensions and env names
//!
//! # Descriptors
//!
//! | Descriptor | Meaning |
//! |------------|---------|
//! | `-` | read standard input |
//! | `data.csv` (existing file with the flag's extension) | read the file |
//! | anything else | the descriptor is the content |
//!
//! `--var` and environment values are always literal strings.
//!
//! # Example
//!
//! ```bash
//! $ printf 'name,age\nAlice,30\n' | tmplx --csv people=- \
//!     -e '{% for p in CSV.people %}{{ p.name }} is {{ p.age }}{% endfor %}'
//! Alice is 30
//! ```

pub mod binding;
pub mod cli;
pub mod constants;
pub mod core;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
