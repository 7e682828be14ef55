//! Bridge from Modicon errors and annotation diagnostics to miette reports.
//!
//! Annotation diagnostics carry spans into the annotation text they were
//! raised on; they are rendered as source snippets. Every other error is
//! reported as a plain message with a `modicon::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use modicon::ModiconError;
use modicon_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// One annotation diagnostic together with the annotation it points into.
pub struct AnnotationReport<'a> {
    diag: &'a Diagnostic,
    annotation: &'a str,
}

impl<'a> AnnotationReport<'a> {
    pub fn new(diag: &'a Diagnostic, annotation: &'a str) -> Self {
        Self { diag, annotation }
    }
}

impl fmt::Debug for AnnotationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnnotationReport").field(self.diag).finish()
    }
}

impl fmt::Display for AnnotationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for AnnotationReport<'_> {}

impl MietteDiagnostic for AnnotationReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = self.diag.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = self.diag.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.annotation as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }
        Some(Box::new(labels.iter().map(|label| {
            let text = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, span)
            } else {
                LabeledSpan::new_with_span(text, span)
            }
        })))
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Something the CLI can hand to a miette report handler.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An annotation diagnostic, shown against its annotation.
    Annotation(AnnotationReport<'a>),
    /// Any other failure.
    Error(&'a ModiconError),
}

impl Reportable<'_> {
    fn error_code(err: &ModiconError) -> Option<&'static str> {
        match err {
            ModiconError::Io(_) => Some("modicon::io"),
            ModiconError::Parse { .. } => None,
            ModiconError::Source(_) => Some("modicon::source"),
            ModiconError::Export(_) => Some("modicon::export"),
            ModiconError::Serialize(_) => Some("modicon::serialize"),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Annotation(report) => fmt::Display::fmt(report, f),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Annotation(_) => None,
            Reportable::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Annotation(report) => report.code(),
            Reportable::Error(err) => {
                Self::error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Annotation(report) => report.severity(),
            Reportable::Error(_) => None,
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Annotation(report) => report.help(),
            Reportable::Error(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Annotation(report) => report.source_code(),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Annotation(report) => report.labels(),
            Reportable::Error(_) => None,
        }
    }
}

/// Split an error into separately rendered reports.
///
/// A [`ModiconError::Parse`] gives one report per diagnostic; anything
/// else gives a single report.
pub fn to_reportables(err: &ModiconError) -> Vec<Reportable<'_>> {
    match err {
        ModiconError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Annotation(AnnotationReport::new(diag, src)))
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}

/// Render one diagnostic against its annotation, as shown on the terminal.
pub fn render_diagnostic(diag: &Diagnostic, annotation: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    miette::GraphicalReportHandler::new()
        .render_report(&mut out, &AnnotationReport::new(diag, annotation))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use modicon::SourceError;
    use modicon_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_parse_error_gives_one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("unknown shape constructor `Triangle`")
                .with_code(ErrorCode::E104)
                .with_label(Span::new(0..8), "here"),
            Diagnostic::warning("could not find bitmap file `a.png`")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(10..15), "referenced here")
                .with_help("the raw file name is kept as the image reference"),
        ];
        let err = ModiconError::new_parse_error(ParseError::from(diags), "Triangle, a.png");

        let reports = to_reportables(&err);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].to_string(), "unknown shape constructor `Triangle`");
        assert_eq!(reports[0].code().unwrap().to_string(), "E104");
        assert_eq!(reports[1].severity(), Some(MietteSeverity::Warning));
        assert!(reports[1].help().is_some());
    }

    #[test]
    fn test_other_errors_get_a_code() {
        let err = ModiconError::Source(SourceError::UnknownClass("Lib.X".to_string()));

        let reports = to_reportables(&err);
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0], Reportable::Error(_)));
        assert_eq!(reports[0].to_string(), "Model source error: unknown class `Lib.X`");
        assert_eq!(reports[0].code().unwrap().to_string(), "modicon::source");
        assert!(reports[0].source_code().is_none());
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("malformed shape")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");

        let report = AnnotationReport::new(&diag, "some annotation");
        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_render_diagnostic_shows_source() {
        let diag = Diagnostic::warning("malformed placement annotation")
            .with_label(Span::new(1..10), "could not read this placement");
        let rendered = render_diagnostic(&diag, "{Placement(error)}").unwrap();
        assert!(rendered.contains("malformed placement annotation"));
        assert!(rendered.contains("could not read this placement"));
    }
}
