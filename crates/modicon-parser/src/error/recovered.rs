//! Values produced alongside the diagnostics raised while recovering them.

use crate::error::{Diagnostic, DiagnosticCollector, ParseError};

/// A parse result that always carries a value.
///
/// Whatever went wrong along the way is kept in `diagnostics`; the value is
/// the best reading of the input that could be made.
#[derive(Debug, Clone)]
pub struct Recovered<T> {
    value: T,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Recovered<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// A value read without any problem.
    pub fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Recovered<U> {
        Recovered {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Move the diagnostics into `collector` and return the value.
    pub fn report(self, collector: &mut DiagnosticCollector) -> T {
        collector.extend(self.diagnostics);
        self.value
    }

    /// The value, or every diagnostic if any of them is an error.
    pub fn into_result(self) -> Result<T, ParseError> {
        if self.has_errors() {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.value)
        }
    }
}
