//! File names and display labels derived from class names.

/// A file-system safe name for a class, without extension.
///
/// Operator classes such as `Modelica.Blocks.Math.'*'` contain characters
/// that cannot appear in file names; they are spelled out.
///
/// ```
/// use modicon::node_to_file_name;
///
/// assert_eq!(node_to_file_name("Lib.'/'"), "Lib.'Division'");
/// assert_eq!(node_to_file_name("Lib.'<>'"), "Lib.'x3Cx3E'");
/// ```
pub fn node_to_file_name(class_name: &str) -> String {
    class_name
        .replace('/', "Division")
        .replace('*', "Multiplication")
        .replace('<', "x3C")
        .replace('>', "x3E")
}

/// The last component of a dotted class name.
///
/// A trailing quoted identifier is kept whole, dots included.
///
/// ```
/// use modicon::last_word_after_dot;
///
/// assert_eq!(last_word_after_dot("Modelica.Electrical.Analog.Basic.Resistor"), "Resistor");
/// assert_eq!(last_word_after_dot("Lib.Ops.'a.b'"), "'a.b'");
/// ```
pub fn last_word_after_dot(class_name: &str) -> &str {
    let name = class_name.trim();
    if let Some(quoted) = trailing_quoted(name) {
        return quoted;
    }
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// The trailing `'...'` identifier of `name`, if it ends with one.
fn trailing_quoted(name: &str) -> Option<&str> {
    let body = name.strip_suffix('\'')?;
    let bytes = body.as_bytes();
    let open = (0..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'\'' && (i == 0 || bytes[i - 1] != b'\\'))?;
    Some(&name[open..])
}
