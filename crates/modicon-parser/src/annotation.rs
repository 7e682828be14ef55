//! Class-level annotations: the icon header, component placements and the
//! component list.

use log::{debug, info};

use modicon_core::{
    geometry::{Extent, Point},
    graphics::{ClassGraphics, CoordinateSystem, Transformation},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Recovered},
    resolve::ParseContext,
    shape::parse_shape,
    splitter::{Segment, split_delimited, split_groups, split_list, unquote_list},
    value,
};

/// Number of coordinate-system fields ahead of the shape list.
const HEADER_FIELDS: usize = 8;

/// Parse an icon annotation of the form
/// `{x1, y1, x2, y2, preserveAspectRatio, initialScale, gridX, gridY, {shapes}}`.
///
/// Fewer than eight header fields keep the default coordinate system; a
/// missing shape list gives an icon without graphics. Shapes that cannot be
/// read are left out.
///
/// # Example
///
/// ```
/// use modicon_parser::{ParseContext, parse_icon};
///
/// let source = "{-100,-100,100,100,true,0.1,2,2,{Rectangle(true, {0,0}, 0, {0,0,0}, \
///     {255,255,255}, LinePattern.Solid, FillPattern.Solid, 0.25, BorderPattern.None, \
///     {{-100,-100},{100,100}}, 0)}}";
/// let icon = parse_icon(source, &ParseContext::new());
/// assert!(icon.is_clean());
/// assert_eq!(icon.value().graphics().len(), 1);
/// ```
pub fn parse_icon(source: &str, ctx: &ParseContext<'_>) -> Recovered<ClassGraphics> {
    let mut diagnostics = DiagnosticCollector::new();
    let fields = split_list(Segment::root(source)).report(&mut diagnostics);

    let coordinate_system = if fields.len() >= HEADER_FIELDS {
        coordinate_system(&fields, &mut diagnostics)
    } else {
        if !fields.is_empty() {
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "icon header has {} fields, expected at least {HEADER_FIELDS}",
                    fields.len()
                ))
                .with_code(ErrorCode::E300)
                .with_label(Segment::root(source).span(), "in this annotation")
                .with_help("the default coordinate system is used"),
            );
        }
        CoordinateSystem::default()
    };

    let mut graphics = Vec::new();
    if let Some(shapes) = fields.get(HEADER_FIELDS) {
        let shapes = split_delimited(shapes.unbraced(), '(', ')').report(&mut diagnostics);
        for shape in shapes {
            if let Some(object) = parse_shape(shape, ctx, &mut diagnostics) {
                graphics.push(object);
            }
        }
    }

    info!(shapes = graphics.len(), diagnostics = diagnostics.diagnostics().len(); "Parsed icon");
    Recovered::new(
        ClassGraphics::new(coordinate_system, graphics),
        diagnostics.into_diagnostics(),
    )
}

fn coordinate_system(
    fields: &[Segment<'_>],
    diagnostics: &mut DiagnosticCollector,
) -> CoordinateSystem {
    let mut number = |index: usize, name: &str| {
        let field = fields[index];
        let parsed = value::parse_number(field.text());
        if parsed.is_none() {
            diagnostics.emit(malformed_header(field, name));
        }
        parsed
    };

    let x1 = number(0, "extent");
    let y1 = number(1, "extent");
    let x2 = number(2, "extent");
    let y2 = number(3, "extent");
    let initial_scale = number(5, "initialScale");
    let grid_x = number(6, "grid");
    let grid_y = number(7, "grid");

    let mut coordinate_system = CoordinateSystem::default();
    if let (Some(x1), Some(y1), Some(x2), Some(y2)) = (x1, y1, x2, y2) {
        coordinate_system = coordinate_system
            .with_extent(Extent::new(Point::new(x1, y1), Point::new(x2, y2)));
    }
    match value::parse_bool(fields[4].text()) {
        Some(preserve) => {
            coordinate_system = coordinate_system.with_preserve_aspect_ratio(preserve);
        }
        None => diagnostics.emit(malformed_header(fields[4], "preserveAspectRatio")),
    }
    if let Some(scale) = initial_scale {
        coordinate_system = coordinate_system.with_initial_scale(scale);
    }
    if let (Some(x), Some(y)) = (grid_x, grid_y) {
        coordinate_system = coordinate_system.with_grid((x, y));
    }
    coordinate_system
}

fn malformed_header(field: Segment<'_>, name: &str) -> Diagnostic {
    Diagnostic::warning(format!("malformed `{name}` in icon header: `{}`", field.text()))
        .with_code(ErrorCode::E300)
        .with_label(field.span(), "not a valid value")
        .with_help("the default value is used")
}

/// Where a component's icon sits in its parent's drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    visible: bool,
    transformation: Transformation,
}

impl Placement {
    pub fn new(visible: bool, transformation: Transformation) -> Self {
        Self {
            visible,
            transformation,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn transformation(&self) -> Transformation {
        self.transformation
    }
}

/// Read the `Placement(...)` record from one component's annotations.
///
/// The record is
/// `Placement(visible, originX, originY, x1, y1, x2, y2, rotation, ...)`;
/// a `-` origin or rotation means unset and falls back to zero. Returns
/// `None` when there is no placement or the record is `Placement(error)`.
///
/// ```
/// use modicon_parser::parse_placement;
///
/// let placement = parse_placement("{Placement(true,-,-,-110,-10,-90,10,-,-,-,-,-,-,)}");
/// let placement = placement.value().unwrap();
/// assert_eq!(placement.transformation().rotation(), 0.0);
/// assert_eq!(placement.transformation().extent().first().x(), -110.0);
/// ```
pub fn parse_placement(annotations: &str) -> Recovered<Option<Placement>> {
    let mut diagnostics = DiagnosticCollector::new();
    let records = split_delimited(Segment::root(annotations).unbraced(), '(', ')')
        .report(&mut diagnostics);

    let Some(record) = records
        .iter()
        .find(|record| record.text().starts_with("Placement"))
    else {
        debug!("Component has no placement");
        return Recovered::new(None, diagnostics.into_diagnostics());
    };

    let call = record.sub("Placement".len()..record.text().len());
    let Some(arguments) = call.strip_delimiters('(', ')') else {
        diagnostics.emit(malformed_placement(*record, "expected `Placement(...)`"));
        return Recovered::new(None, diagnostics.into_diagnostics());
    };
    if arguments.text().trim().eq_ignore_ascii_case("error") {
        debug!("Component placement is an error record");
        return Recovered::new(None, diagnostics.into_diagnostics());
    }

    let values = split_list(arguments).report(&mut diagnostics);
    let placement = placement_values(&values);
    if placement.is_none() {
        diagnostics.emit(malformed_placement(
            *record,
            "expected visibility, origin, extent and rotation",
        ));
    }
    Recovered::new(placement, diagnostics.into_diagnostics())
}

fn placement_values(values: &[Segment<'_>]) -> Option<Placement> {
    let field = |index: usize| values.get(index).map(|segment| segment.text());
    let number = |index: usize| value::parse_number(field(index)?);
    let unset_or_number = |index: usize| match field(index)? {
        "-" | "" => Some(0.0),
        text => value::parse_number(text),
    };

    let visible = field(0)?.contains("true");
    let origin = Point::new(unset_or_number(1)?, unset_or_number(2)?);
    let extent = Extent::new(
        Point::new(number(3)?, number(4)?),
        Point::new(number(5)?, number(6)?),
    );
    let rotation = unset_or_number(7)?;
    Some(Placement::new(
        visible,
        Transformation::new(origin, extent, rotation),
    ))
}

fn malformed_placement(record: Segment<'_>, help: &str) -> Diagnostic {
    Diagnostic::warning("malformed placement annotation")
        .with_code(ErrorCode::E301)
        .with_label(record.span(), "could not read this placement")
        .with_help(help.to_string())
}

/// Index of the variability flag in a component record.
const VARIABILITY_FIELD: usize = 8;

/// One entry of a class's component list.
///
/// The compiler reports each component as a record of quoted strings:
/// `{"Type", "name", "comment", "public", "false", "false", "false",
/// "false", "parameter", "none", "unspecified", "{}"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    fields: Vec<String>,
}

impl ComponentInfo {
    pub fn class_name(&self) -> &str {
        &self.fields[0]
    }

    pub fn name(&self) -> &str {
        &self.fields[1]
    }

    pub fn comment(&self) -> &str {
        &self.fields[2]
    }

    /// The variability flag, empty when the record is too short to have one.
    pub fn variability(&self) -> &str {
        self.fields
            .get(VARIABILITY_FIELD)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_parameter(&self) -> bool {
        self.variability() == "parameter"
    }

    /// Every field of the record, in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Parse a component list `{{...}, {...}}`.
///
/// Records with fewer than three fields are skipped with a warning; the
/// returned list keeps the order of the input.
pub fn parse_components(source: &str) -> Recovered<Vec<ComponentInfo>> {
    let mut diagnostics = DiagnosticCollector::new();
    let groups = split_groups(Segment::root(source)).report(&mut diagnostics);

    let mut components = Vec::with_capacity(groups.len());
    for group in groups {
        let fields = unquote_list(group).report(&mut diagnostics);
        if fields.len() < 3 {
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "component record has {} fields, expected at least 3",
                    fields.len()
                ))
                .with_code(ErrorCode::E302)
                .with_label(group.span(), "skipped"),
            );
            continue;
        }
        components.push(ComponentInfo { fields });
    }

    debug!(components = components.len(); "Parsed component list");
    Recovered::new(components, diagnostics.into_diagnostics())
}

/// Split a class's component annotation list into one entry per component,
/// in component order.
pub fn split_component_annotations(source: &str) -> Recovered<Vec<&str>> {
    split_list(Segment::root(source)).map(|items| items.iter().map(|s| s.text()).collect())
}
