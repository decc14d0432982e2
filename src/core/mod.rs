//! Core types shared by every tmplx module.
//!
//! At the moment this is the error taxonomy and its user-facing presentation;
//! see [`error`] for details.

pub mod error;

pub use error::{ErrorContext, TmplxError, abbreviate, user_friendly_error};
