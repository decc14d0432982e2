//! Template rendering engine with Tera.
//!
//! This module provides the [`TemplateRenderer`] that registers a
//! [`TemplateSet`] with Tera, renders the entry template against a
//! [`DataTree`] and turns Tera's nested errors into [`TmplxError`]s with
//! readable messages and variable suggestions.

use std::sync::LazyLock;

use regex::Regex;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};
use tracing::debug;

use super::loader::TemplateSet;
use crate::binding::{DataTree, Namespace};
use crate::core::TmplxError;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of suggestions attached to a missing variable.
const MAX_SUGGESTIONS: usize = 3;

/// How deep into the data tree candidate paths are collected.
const SUGGESTION_PATH_DEPTH: usize = 4;

/// Template renderer wrapping a Tera instance.
///
/// Autoescaping follows Tera's defaults: templates whose name ends in
/// `.html`, `.htm` or `.xml` are HTML-escaped, everything else is rendered
/// verbatim.
pub struct TemplateRenderer {
    tera: Tera,
    entry: String,
}

impl TemplateRenderer {
    /// Register all templates of `templates` with a fresh Tera instance.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::NoTemplate`] for an empty set
    /// - [`TmplxError::TemplateRender`] if any template fails to parse or
    ///   includes a template that is not part of the set
    pub fn new(templates: &TemplateSet) -> Result<Self, TmplxError> {
        let entry = templates.entry().ok_or(TmplxError::NoTemplate)?.name.clone();

        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().map(|t| (t.name.as_str(), t.content.as_str())))
            .map_err(|e| TmplxError::TemplateRender {
                name: entry.clone(),
                reason: format_tera_error(&e),
            })?;

        debug!("Registered {} template(s), entry point '{}'", templates.len(), entry);
        Ok(Self {
            tera,
            entry,
        })
    }

    /// Name of the template that [`render`](Self::render) renders.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Render the entry template against `data`.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::VariableNotFound`] when the template uses a path that
    ///   is not in `data`, with similar existing paths as suggestions
    /// - [`TmplxError::TemplateRender`] for every other engine failure
    pub fn render(&self, data: &DataTree) -> Result<String, TmplxError> {
        for namespace in Namespace::ALL {
            debug!("Context {}: {} key(s)", namespace, data.namespace(namespace).len());
        }

        let context = TeraContext::from_serialize(data).map_err(|e| TmplxError::TemplateRender {
            name: self.entry.clone(),
            reason: format_tera_error(&e),
        })?;

        self.tera
            .render(&self.entry, &context)
            .map_err(|e| self.parse_tera_error(&e, data))
    }

    fn parse_tera_error(&self, error: &tera::Error, data: &DataTree) -> TmplxError {
        let message = format_tera_error(error);

        if let Some(variable) = extract_variable_name(&message) {
            let suggestions = find_similar_paths(&variable, &data.paths(SUGGESTION_PATH_DEPTH));
            return TmplxError::VariableNotFound {
                variable,
                suggestions,
            };
        }

        TmplxError::TemplateRender {
            name: self.entry.clone(),
            reason: message,
        }
    }
}

/// Flatten a Tera error and its sources into a single line.
///
/// Tera nests the useful message (e.g. the parse position) in the source
/// chain while the top-level error only says which template failed.
#[must_use]
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    messages
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(": ")
}

/// Matches Tera's "Variable `foo` not found" message.
static VARIABLE_NOT_FOUND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Variable `([^`]+)` not found").ok());

/// Extract the variable name from a "Variable `foo` not found" message.
fn extract_variable_name(message: &str) -> Option<String> {
    VARIABLE_NOT_FOUND
        .as_ref()?
        .captures(message).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Up to [`MAX_SUGGESTIONS`] paths close to `target`, closest first.
fn find_similar_paths(target: &str, available: &[String]) -> Vec<String> {
    let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<_> = available
        .iter()
        .map(|path| (levenshtein(target, path), path))
        .filter(|(distance, _)| *distance <= limit)
        .collect();

    scored.sort();
    scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, path)| path.clone()).collect()
}
