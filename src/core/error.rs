//! Error handling for tmplx
//!
//! This module provides the error taxonomy for the binding layer and the
//! renderer, together with [`ErrorContext`] for presenting failures to users
//! with details and suggestions.
//!
//! # Error Categories
//!
//! ## Reference parsing
//! - [`TmplxError::MalformedReference`] - a `key=value` token lacks `=`
//!
//! ## Input acquisition
//! - [`TmplxError::StdinAlreadyClaimed`] - a second exclusive claim on stdin
//! - [`TmplxError::StdinRead`] - draining stdin failed
//! - [`TmplxError::FileRead`] - a resolved file could not be read
//!
//! ## Decoding
//! - [`TmplxError::CsvDecode`], [`TmplxError::JsonDecode`], [`TmplxError::YamlDecode`]
//! - [`TmplxError::UnsupportedFormat`] - a format tag reached the wrong dispatch
//!
//! ## Binding
//! - [`TmplxError::Binding`] - wraps any of the above with the namespace, key
//!   and descriptor of the failing flag
//!
//! ## Rendering
//! - [`TmplxError::NoTemplate`], [`TmplxError::TemplateRead`],
//!   [`TmplxError::TemplateRender`], [`TmplxError::VariableNotFound`]
//!
//! # Error Propagation
//!
//! Library code returns `Result<T, TmplxError>`. The CLI works in
//! `anyhow::Result` and converts whatever reaches `main` through
//! [`user_friendly_error`], which downcasts back to [`TmplxError`] where
//! possible.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::MAX_DESCRIPTOR_DISPLAY_LEN;

/// The main error type for tmplx operations
///
/// Every variant carries owned strings rather than source errors so the
/// type stays `Clone` and can be re-wrapped with binding context without
/// losing information.
///
/// # Examples
///
/// ```rust
/// use tmplx_cli::core::TmplxError;
///
/// let error = TmplxError::MalformedReference {
///     token: "bad".to_string(),
/// };
/// assert!(error.to_string().contains("bad"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TmplxError {
    /// A reference token contained no `=` separator.
    #[error("flag arguments should be `name=value`, given '{token}'")]
    MalformedReference {
        /// The token exactly as given on the command line
        token: String,
    },

    /// Standard input was claimed a second time under the exclusive policy.
    #[error("stdin is already claimed by '{claimed_by}', cannot also read it for '{key}'")]
    StdinAlreadyClaimed {
        /// The key whose claim was rejected
        key: String,
        /// The key that holds the existing claim
        claimed_by: String,
    },

    /// Draining standard input failed.
    #[error("unable to read stdin data: {reason}")]
    StdinRead {
        /// Underlying I/O error message
        reason: String,
    },

    /// A descriptor resolved to a file that could not be read.
    #[error("unable to read file '{path}': {reason}")]
    FileRead {
        /// Path of the file
        path: String,
        /// Underlying I/O error message
        reason: String,
    },

    /// CSV input could not be decoded.
    #[error("unable to parse bytes into CSV format: {reason}")]
    CsvDecode {
        /// What was wrong with the input
        reason: String,
    },

    /// JSON input could not be decoded.
    #[error("unable to parse bytes into JSON format: {reason}")]
    JsonDecode {
        /// What was wrong with the input
        reason: String,
    },

    /// YAML input could not be decoded.
    #[error("unable to parse bytes into YAML format: {reason}")]
    YamlDecode {
        /// What was wrong with the input
        reason: String,
    },

    /// A format tag reached a dispatch that does not handle it.
    ///
    /// Unreachable through the CLI; kept so dispatch code never panics.
    #[error("unsupported format type: '{format}'")]
    UnsupportedFormat {
        /// The offending format tag
        format: String,
    },

    /// A single `key=descriptor` reference failed to bind.
    #[error("--{namespace} {key}={descriptor}: {source}")]
    Binding {
        /// Flag name of the namespace (`var`, `csv`, `json`, `yml`, `env`)
        namespace: String,
        /// Key of the failing reference
        key: String,
        /// Abbreviated descriptor of the failing reference
        descriptor: String,
        /// The underlying failure
        source: Box<TmplxError>,
    },

    /// Neither an inline template nor a template file was given.
    #[error("unable to find template file or eval argument")]
    NoTemplate,

    /// A template file could not be read.
    #[error("unable to read template '{path}': {reason}")]
    TemplateRead {
        /// Path of the template file
        path: String,
        /// Underlying I/O error message
        reason: String,
    },

    /// The template engine rejected or failed to render a template.
    #[error("could not render template '{name}': {reason}")]
    TemplateRender {
        /// Name the template was registered under
        name: String,
        /// Flattened engine error chain
        reason: String,
    },

    /// Writing rendered output failed.
    #[error("unable to write rendered output: {reason}")]
    OutputWrite {
        /// Underlying I/O error message
        reason: String,
    },

    /// Any failure that did not originate in tmplx itself.
    #[error("{reason}")]
    Other {
        /// The full error chain
        reason: String,
    },

    /// A template referenced a path that does not exist in the data tree.
    #[error("template variable not found: '{variable}'")]
    VariableNotFound {
        /// The variable path as written in the template
        variable: String,
        /// Similar paths present in the data tree
        suggestions: Vec<String>,
    },
}

impl TmplxError {
    /// Wrap this error with the namespace, key and descriptor of the reference
    /// that produced it.
    ///
    /// Already wrapped errors are returned unchanged so the innermost (most
    /// specific) binding context wins.
    #[must_use]
    pub fn for_reference(self, namespace: &str, key: &str, descriptor: &str) -> Self {
        if matches!(self, TmplxError::Binding { .. }) {
            return self;
        }
        TmplxError::Binding {
            namespace: namespace.to_string(),
            key: key.to_string(),
            descriptor: abbreviate(descriptor),
            source: Box::new(self),
        }
    }

    /// The error at the bottom of any [`TmplxError::Binding`] wrapping.
    #[must_use]
    pub fn root_cause(&self) -> &TmplxError {
        match self {
            TmplxError::Binding { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Shorten a descriptor for display, marking the cut with an ellipsis.
///
/// Newlines are escaped so multi-line inline literals stay on one line.
#[must_use]
pub fn abbreviate(descriptor: &str) -> String {
    let escaped = descriptor.replace('\n', "\\n");
    if escaped.chars().count() <= MAX_DESCRIPTOR_DISPLAY_LEN {
        return escaped;
    }
    let mut short: String = escaped.chars().take(MAX_DESCRIPTOR_DISPLAY_LEN).collect();
    short.push('…');
    short
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` pairs a [`TmplxError`] with optional details and a
/// suggestion. It is what `main` prints before exiting with status 1.
///
/// # Examples
///
/// ```rust
/// use tmplx_cli::core::{ErrorContext, TmplxError};
///
/// let context = ErrorContext::new(TmplxError::NoTemplate)
///     .with_suggestion("Pass a template file or use --eval");
/// assert!(context.to_string().contains("Suggestion"));
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying tmplx error
    pub error: TmplxError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: TmplxError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// Known [`TmplxError`]s get tailored hints; anything else is reported as
/// [`TmplxError::Other`] carrying the full `anyhow` chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(tmplx_error) = error.downcast_ref::<TmplxError>() {
        return create_error_context(tmplx_error.clone());
    }

    ErrorContext::new(TmplxError::Other {
        reason: format!("{error:#}"),
    })
}

fn create_error_context(error: TmplxError) -> ErrorContext {
    match error.root_cause() {
        TmplxError::MalformedReference { .. } => ErrorContext::new(error)
            .with_suggestion("Write references as key=value, e.g. --var name=value or --csv rows=data.csv"),

        TmplxError::StdinAlreadyClaimed { .. } => ErrorContext::new(error)
            .with_details("Only one reference may read stdin when --exclusive-stdin is set")
            .with_suggestion("Drop --exclusive-stdin to share the cached stdin content, or read the other data from a file"),

        TmplxError::FileRead { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the file exists and is readable"),

        TmplxError::CsvDecode { .. } => ErrorContext::new(error)
            .with_details("Every row must have as many fields as the header row")
            .with_suggestion("Fix the CSV input, or pass --csv-lenient to treat undecodable CSV as an empty list"),

        TmplxError::JsonDecode { .. } => ErrorContext::new(error)
            .with_suggestion("Check the JSON syntax; empty input is not a valid JSON document"),

        TmplxError::YamlDecode { .. } => ErrorContext::new(error)
            .with_suggestion("Check the YAML syntax; empty input is not a valid YAML document"),

        TmplxError::NoTemplate => ErrorContext::new(error)
            .with_suggestion("Pass a template file as argument or an inline template with --eval"),

        TmplxError::VariableNotFound { suggestions, .. } if !suggestions.is_empty() => {
            let hint = format!("Did you mean: {}?", suggestions.join(", "));
            ErrorContext::new(error).with_suggestion(hint)
        }

        TmplxError::VariableNotFound { .. } => ErrorContext::new(error)
            .with_details("Data is available under Env, Var, CSV, JSON and YML"),

        _ => ErrorContext::new(error),
    }
}
