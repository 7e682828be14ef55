//! Labeled spans attached to diagnostics.

use crate::span::Span;

/// A message pinned to a range of the annotation text.
///
/// A diagnostic usually carries one primary label marking the offending
/// field, and optionally secondary labels for context such as the enclosing
/// shape constructor.
///
/// ```text
/// error[E100]: invalid number in `Rectangle` field 7
///   |
/// 1 | Rectangle(true, {0,0}, 0, {0,0,0}, {0,0,0}, LinePattern.Solid, FillPattern.None, thick, ...)
///   | ^^^^^^^^^                                                                          ----- expected a number
///   | in this shape
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_kinds() {
        let field = Label::primary(Span::new(40..45), "expected a number");
        assert!(field.is_primary());
        assert_eq!(field.span(), Span::new(40..45));
        assert_eq!(field.message(), "expected a number");

        let shape = Label::secondary(Span::new(0..9), "in this shape");
        assert!(shape.is_secondary());
        assert!(!shape.is_primary());
    }
}
