//! Top-level splitting of annotation expressions.
//!
//! Annotation values arrive as one flat string such as
//!
//! ```text
//! {-100,-100,100,100,true,0.1,2,2,{Rectangle(true, {0,0}, 0, ...), Text(...)}}
//! ```
//!
//! The functions here cut such a string into its top-level elements without
//! being confused by commas inside nested groups or inside quoted strings.
//! Every element is a [`Segment`] that remembers where it sits in the
//! original input, so diagnostics raised further down can point back at it.
//!
//! Malformed input never panics. When the nesting cannot be followed (an
//! unterminated string, an unbalanced delimiter) the splitter stops, keeps
//! the elements it had completed, and reports a warning.

use std::ops::Range;

use log::debug;

use crate::{
    error::{Diagnostic, ErrorCode, Recovered},
    span::Span,
};

/// A slice of annotation text together with its position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    text: &'a str,
    span: Span,
}

impl<'a> Segment<'a> {
    /// The whole of `text`, starting at offset zero.
    pub fn root(text: &'a str) -> Self {
        Self {
            text,
            span: Span::new(0..text.len()),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The segment without surrounding whitespace.
    pub fn trim(&self) -> Segment<'a> {
        let start = self.text.len() - self.text.trim_start().len();
        let end = self.text.trim_end().len().max(start);
        self.sub(start..end)
    }

    /// A sub-slice, addressed relative to this segment.
    pub(crate) fn sub(&self, range: Range<usize>) -> Segment<'a> {
        Segment {
            text: &self.text[range.clone()],
            span: self.span.slice(range),
        }
    }

    /// The content between `open` and its matching `close`, if that pair
    /// encloses the whole (trimmed) segment.
    ///
    /// `{a},{b}` starts with `{` and ends with `}`, but the braces do not
    /// match each other, so it is not stripped.
    pub fn strip_delimiters(&self, open: char, close: char) -> Option<Segment<'a>> {
        let trimmed = self.trim();
        let last = trimmed.text.len().checked_sub(1)?;
        find_matching(trimmed.text.as_bytes(), ascii(open), ascii(close))
            .filter(|&end| end == last)
            .map(|end| trimmed.sub(1..end))
    }

    /// The content of a brace-enclosed segment, or the trimmed segment itself
    /// when it is not brace-enclosed.
    ///
    /// When the opening brace is never matched (an unterminated string or a
    /// missing `}` inside), the outer braces are still removed so that the
    /// elements before the damage can be recovered.
    pub fn unbraced(&self) -> Segment<'a> {
        let trimmed = self.trim();
        let bytes = trimmed.text.as_bytes();
        if bytes.first() != Some(&b'{') {
            return trimmed;
        }
        match find_matching(bytes, b'{', b'}') {
            Some(end) if end == bytes.len() - 1 => trimmed.sub(1..end),
            Some(_) => trimmed,
            None => {
                let end = if bytes.len() > 1 && bytes.ends_with(b"}") {
                    bytes.len() - 1
                } else {
                    bytes.len()
                };
                trimmed.sub(1..end)
            }
        }
    }
}

/// Split a brace-delimited list into its top-level elements.
///
/// The outer braces are optional. Elements are trimmed; an empty list gives
/// no elements.
///
/// # Example
///
/// ```
/// use modicon_parser::splitter::{Segment, split_list};
///
/// let input = r#"{{"a"}, {"b"}}"#;
/// let split = split_list(Segment::root(input));
/// let texts: Vec<_> = split.value().iter().map(|s| s.text()).collect();
/// assert_eq!(texts, [r#"{"a"}"#, r#"{"b"}"#]);
/// assert!(split.is_clean());
/// ```
pub fn split_list(segment: Segment<'_>) -> Recovered<Vec<Segment<'_>>> {
    split_delimited(segment.unbraced(), '{', '}')
}

/// Split `segment` on commas that sit outside any `open`/`close` nesting and
/// outside quoted strings.
///
/// Unlike [`split_list`] the input is taken as is: no outer delimiters are
/// removed.
pub fn split_delimited(
    segment: Segment<'_>,
    open: char,
    close: char,
) -> Recovered<Vec<Segment<'_>>> {
    let bytes = segment.text.as_bytes();
    let (open, close) = (ascii(open), ascii(close));

    let mut items = Vec::new();
    let mut openers = Vec::new();
    let mut begin = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' | b'\'' => match skip_string(bytes, pos) {
                Some(end) => {
                    pos = end;
                    continue;
                }
                None => {
                    let at = segment.sub(pos..bytes.len());
                    return Recovered::new(items, vec![unterminated_string(at.span())]);
                }
            },
            b',' if openers.is_empty() => {
                items.push(segment.sub(begin..pos).trim());
                begin = pos + 1;
            }
            b if b == open => openers.push(pos),
            b if b == close => {
                if openers.pop().is_none() {
                    let at = segment.sub(pos..pos + 1);
                    return Recovered::new(items, vec![unexpected_close(at.span(), close)]);
                }
            }
            _ => {}
        }
        pos += 1;
    }

    if let Some(&opened) = openers.first() {
        let at = segment.sub(opened..opened + 1);
        return Recovered::new(items, vec![unclosed(at.span(), open)]);
    }

    let tail = segment.sub(begin..bytes.len()).trim();
    if !(items.is_empty() && tail.is_blank()) {
        items.push(tail);
    }
    Recovered::clean(items)
}

/// The top-level `{...}` groups of a list of lists.
///
/// Elements that are not themselves brace groups are skipped.
///
/// ```
/// use modicon_parser::splitter::{Segment, split_groups};
///
/// let groups = split_groups(Segment::root(r#"{{"Real","x"}, {"Pin","p"}}"#));
/// assert_eq!(groups.value().len(), 2);
/// assert_eq!(groups.value()[1].text(), r#"{"Pin","p"}"#);
/// ```
pub fn split_groups(segment: Segment<'_>) -> Recovered<Vec<Segment<'_>>> {
    split_list(segment).map(|items| {
        items
            .into_iter()
            .filter(|item| {
                let is_group = item.strip_delimiters('{', '}').is_some();
                if !is_group {
                    debug!(element = item.text(); "Skipping non-group element");
                }
                is_group
            })
            .collect()
    })
}

/// Decode a double-quoted string.
///
/// Text that does not start with a quote is returned trimmed and otherwise
/// untouched, so unevaluated expressions survive as written.
///
/// ```
/// use modicon_parser::splitter::{Segment, unquote};
///
/// let text = unquote(Segment::root(r#""line\nbreak \"quoted\"""#));
/// assert_eq!(text.value(), "line\nbreak \"quoted\"");
/// ```
pub fn unquote(segment: Segment<'_>) -> Recovered<String> {
    let trimmed = segment.trim();
    let Some(body) = trimmed.text.strip_prefix('"') else {
        return Recovered::clean(trimmed.text.to_string());
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => match decode_escape(escaped) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(escaped);
                    }
                },
                None => break,
            },
            '"' => {
                let next = chars.peek().map(|&(_, next)| next);
                if is_embedded_quote(next.filter(char::is_ascii).map(|c| c as u8)) {
                    out.push('"');
                } else {
                    return Recovered::clean(out);
                }
            }
            _ => out.push(c),
        }
    }

    Recovered::new(out, vec![unterminated_string(trimmed.span())])
}

/// Decode a brace-delimited list of quoted strings such as `{"a", "b"}`.
///
/// Elements that are not quoted are kept verbatim with a warning.
pub fn unquote_list(segment: Segment<'_>) -> Recovered<Vec<String>> {
    let (items, mut diagnostics) = split_list(segment).into_parts();
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        if !item.text.starts_with('"') {
            diagnostics.push(
                Diagnostic::warning(format!("expected a quoted string, found `{}`", item.text))
                    .with_code(ErrorCode::E003)
                    .with_label(item.span(), "not quoted"),
            );
        }
        let (value, item_diagnostics) = unquote(item).into_parts();
        diagnostics.extend(item_diagnostics);
        values.push(value);
    }
    Recovered::new(values, diagnostics)
}

/// Index of the delimiter closing the `open` at `bytes[0]`, or `None` when it
/// is never closed.
fn find_matching(bytes: &[u8], open: u8, close: u8) -> Option<usize> {
    if bytes.first() != Some(&open) {
        return None;
    }
    let mut depth = 0usize;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' | b'\'' => {
                pos = skip_string(bytes, pos)?;
                continue;
            }
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Find the end of the quoted string starting at `start`.
///
/// Returns the index just past the closing quote, or `None` when the input
/// ends first. Backslash escapes are skipped over.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => {
                if quote == b'"' && is_embedded_quote(bytes.get(pos + 1).copied()) {
                    pos += 1;
                    continue;
                }
                return Some(pos + 1);
            }
            _ => pos += 1,
        }
    }
    None
}

/// Compatibility shim for producers that emit an unescaped `"` inside a
/// string value.
///
/// A double quote that is followed by anything other than a separator
/// (`,`, `}`, `)`, `]`, whitespace or the end of input) is read as a literal
/// quote belonging to the string instead of its terminator. This is not part
/// of the annotation grammar proper; it only keeps such strings intact.
fn is_embedded_quote(next: Option<u8>) -> bool {
    match next {
        None => false,
        Some(b',' | b'}' | b')' | b']') => false,
        Some(b) => !b.is_ascii_whitespace(),
    }
}

fn decode_escape(escaped: char) -> Option<char> {
    Some(match escaped {
        '\'' => '\'',
        '"' => '"',
        '?' => '?',
        '\\' => '\\',
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        _ => return None,
    })
}

fn ascii(delimiter: char) -> u8 {
    debug_assert!(delimiter.is_ascii(), "delimiters must be ASCII");
    delimiter as u8
}

fn unterminated_string(span: Span) -> Diagnostic {
    Diagnostic::warning("unterminated string")
        .with_code(ErrorCode::E001)
        .with_label(span, "string starts here and never ends")
        .with_help("elements after this point were dropped")
}

fn unexpected_close(span: Span, close: u8) -> Diagnostic {
    Diagnostic::warning(format!("unexpected `{}`", close as char))
        .with_code(ErrorCode::E002)
        .with_label(span, "no matching opening delimiter")
        .with_help("elements after this point were dropped")
}

fn unclosed(span: Span, open: u8) -> Diagnostic {
    Diagnostic::warning(format!("unclosed `{}`", open as char))
        .with_code(ErrorCode::E002)
        .with_label(span, "opened here and never closed")
        .with_help("the incomplete last element was dropped")
}
