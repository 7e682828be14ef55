//! Export of composed icons.
//!
//! This module provides the [`Exporter`] trait that turns a
//! [`ComposedIcon`] into an output file. It is the final stage of the
//! Modicon pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Annotation text (per class)
//!     ↓ parse
//! ClassGraphics
//!     ↓ compose (inheritance)
//! ComposedIcon
//!     ↓ export (this module)
//! SVG file + descriptor
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`ModiconError::Export`] at the crate
//! boundary.
//!
//! [`ModiconError::Export`]: crate::ModiconError::Export

/// SVG export backend.
pub mod svg;

use crate::{compose::ComposedIcon, icon::SvgDescriptor};

/// Abstraction for icon export backends.
pub trait Exporter {
    /// Exports a composed icon to the backend's output format.
    ///
    /// Returns a descriptor of the written file: its path and the size of
    /// the drawing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the icon cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_icon(&mut self, icon: &ComposedIcon) -> Result<SvgDescriptor, Error>;
}

/// Errors that can occur during icon export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
