//! Template loading and rendering.
//!
//! Rendering is delegated to [Tera](https://keats.github.io/tera/). This
//! module only decides which templates take part in a render
//! ([`TemplateSet`]) and hands the assembled [`DataTree`](crate::binding::DataTree)
//! to the engine ([`TemplateRenderer`]).
//!
//! # Template Syntax
//!
//! Data is reachable through the five namespace roots:
//!
//! ```text
//! {{ Var.greeting }}, {{ Env.HOME }}
//! {% for row in CSV.people %}{{ row.name }} is {{ row.age }}{% endfor %}
//! {{ JSON.config.server.port }} / {{ YML.values.replicas }}
//! ```
//!
//! Additional template files are partials, included by file name:
//!
//! ```text
//! {% include "header.txt" %}
//! ```

pub mod loader;
pub mod renderer;

pub use loader::{TemplateSet, TemplateSource};
pub use renderer::{TemplateRenderer, format_tera_error};
