//! Error codes for annotation diagnostics.
//!
//! Codes are grouped by the stage that raises them:
//! - `E0xx` - structural splitting and string decoding
//! - `E1xx` - shape fields
//! - `E2xx` - external resources
//! - `E3xx` - icon header and component annotations

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structural Errors (E0xx)
    // =========================================================================
    /// Unterminated string.
    ///
    /// A quoted string runs to the end of the input without a closing quote.
    E001,

    /// Unbalanced delimiters.
    ///
    /// A `{` or `(` is never closed, or a closing delimiter appears with no
    /// matching opener.
    E002,

    /// Expected a quoted string.
    ///
    /// A list of strings contained an element that is not quoted.
    E003,

    // =========================================================================
    // Shape Field Errors (E1xx)
    // =========================================================================
    /// Invalid number.
    ///
    /// A field that must hold a number could not be read as one.
    E100,

    /// Missing field.
    ///
    /// A shape constructor has fewer positional arguments than its grammar
    /// requires.
    E101,

    /// Invalid enumeration literal.
    ///
    /// A pattern, arrow, smooth, style or alignment token is not one of the
    /// known literals.
    E102,

    /// Malformed tuple.
    ///
    /// A point, extent, color or list field does not have the expected
    /// `{...}` shape.
    E103,

    /// Unknown shape constructor.
    ///
    /// The shape is not one of `Line`, `Rectangle`, `Polygon`, `Ellipse`,
    /// `Text` or `Bitmap`.
    E104,

    // =========================================================================
    // Resource Errors (E2xx)
    // =========================================================================
    /// Unresolved bitmap.
    ///
    /// A bitmap file name could not be resolved to an existing file.
    E200,

    /// Unreadable bitmap.
    ///
    /// A bitmap file exists but could not be read.
    E201,

    // =========================================================================
    // Annotation Errors (E3xx)
    // =========================================================================
    /// Malformed coordinate system.
    ///
    /// A coordinate system header field is not numeric; the default is used.
    E300,

    /// Malformed placement.
    ///
    /// A component placement annotation could not be read.
    E301,

    /// Malformed component record.
    ///
    /// A component list entry does not have enough fields.
    E302,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string",
            ErrorCode::E002 => "unbalanced delimiters",
            ErrorCode::E003 => "expected a quoted string",
            ErrorCode::E100 => "invalid number",
            ErrorCode::E101 => "missing field",
            ErrorCode::E102 => "invalid enumeration literal",
            ErrorCode::E103 => "malformed tuple",
            ErrorCode::E104 => "unknown shape constructor",
            ErrorCode::E200 => "unresolved bitmap",
            ErrorCode::E201 => "unreadable bitmap",
            ErrorCode::E300 => "malformed coordinate system",
            ErrorCode::E301 => "malformed placement",
            ErrorCode::E302 => "malformed component record",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
