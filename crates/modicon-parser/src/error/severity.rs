//! Diagnostic severity.

use std::fmt;

/// How serious a diagnostic is.
///
/// Nothing the parser reports is fatal: an [`Severity::Error`] means some
/// content (a shape, a placement) was dropped, a [`Severity::Warning`] means
/// the input was degraded but still produced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Content was discarded.
    Error,
    /// Content was kept in a degraded form.
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
