//! Diagnostics for annotation parsing.
//!
//! Annotation text comes from a model compiler and is usually well formed,
//! but icon libraries in the wild contain plenty of oddities. Parsing never
//! fails outright: each problem becomes a [`Diagnostic`] with an
//! [`ErrorCode`] and a span into the annotation string, and the parser
//! carries on with whatever it could recover. Callers that prefer a hard
//! failure turn the collected diagnostics into a [`ParseError`] with
//! [`DiagnosticCollector::finish`].
//!
//! # Example
//!
//! ```
//! # use modicon_parser::error::{Diagnostic, ErrorCode};
//! # use modicon_parser::Span;
//! let diag = Diagnostic::error("missing field 10 of `Rectangle`")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(0..60), "this constructor has only 9 fields")
//!     .with_help("a Rectangle needs 11 positional fields");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod recovered;
mod severity;

pub(crate) use parse_error::Result;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use recovered::Recovered;
pub use severity::Severity;
