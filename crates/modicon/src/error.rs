//! Error types for Modicon operations.
//!
//! This module provides the main error type [`ModiconError`] which wraps
//! the failures that can stop an icon from being produced at all. Problems
//! inside an annotation never end up here unless strict mode asks for it;
//! they are carried as diagnostics next to the rendered icon.

use std::io;

use thiserror::Error;

use modicon_parser::error::ParseError;

use crate::source::SourceError;

/// The main error type for Modicon operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the annotation text the diagnostics were
/// raised against, so that their spans can be shown in context.
#[derive(Debug, Error)]
pub enum ModiconError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Model source error: {0}")]
    Source(#[from] SourceError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<crate::export::Error> for ModiconError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ModiconError {
    /// Create a new `Parse` error with the associated annotation text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
