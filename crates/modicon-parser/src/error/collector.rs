//! Accumulates diagnostics while an annotation is read.

use log::{error, warn};

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics so one malformed field never aborts the whole icon.
///
/// Every emitted diagnostic is also written to the log: errors at `error`
/// level, warnings at `warn` level.
///
/// # Example
///
/// ```
/// # use modicon_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode};
/// # use modicon_parser::Span;
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(
///     Diagnostic::warning("unterminated string")
///         .with_code(ErrorCode::E001)
///         .with_label(Span::new(12..20), "string starts here"),
/// );
///
/// assert!(!collector.has_errors());
/// assert_eq!(collector.into_diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            error!(code:? = diagnostic.code(); "{}", diagnostic.message());
            self.has_errors = true;
        } else {
            warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record every diagnostic from `diagnostics`.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Every diagnostic collected so far, warnings included.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// `Err` with every diagnostic if any of them is an error.
    ///
    /// Warnings alone do not fail; they are dropped on success.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

impl From<Vec<Diagnostic>> for DiagnosticCollector {
    /// Wrap already-logged diagnostics without logging them again.
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        let has_errors = diagnostics.iter().any(|d| d.severity().is_error());
        Self {
            diagnostics,
            has_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_finishes_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.is_empty());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_warnings_only_finish_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unresolved bitmap").with_code(ErrorCode::E200));
        collector.emit(Diagnostic::warning("unterminated string"));
        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_errors_keep_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::error("invalid number")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("unbalanced delimiters"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "invalid number");
    }

    #[test]
    fn test_collector_from_diagnostics() {
        let collector = DiagnosticCollector::from(vec![
            Diagnostic::warning("a"),
            Diagnostic::error("b"),
        ]);
        assert!(collector.has_errors());
        assert_eq!(collector.diagnostics().len(), 2);
    }
}
