//! Positional grammar of the graphics primitives.
//!
//! Every primitive is written as a constructor call with positional
//! arguments, e.g.
//!
//! ```text
//! Rectangle(true, {0,0}, 0, {0,0,127}, {255,255,255}, LinePattern.Solid,
//!           FillPattern.Solid, 0.25, BorderPattern.None, {{-100,-100},{100,100}}, 0)
//! ```
//!
//! The first three arguments (`visible`, `origin`, `rotation`) are shared by
//! all primitives; closed shapes follow them with five filled-shape fields
//! (`lineColor`, `fillColor`, `linePattern`, `fillPattern`,
//! `lineThickness`). The remaining arguments are specific to each
//! constructor.
//!
//! `visible`, `rotation` and a text's `textString` may also hold a dynamic
//! selector `{value, expression}`; only the static value is used.

use std::str::FromStr;

use log::{debug, trace};

use modicon_core::{
    color::Color,
    geometry::{Extent, Point},
    graphics::{
        Arrow, Bitmap, BorderPattern, Ellipse, FillPattern, FilledShape, GraphicItem,
        GraphicsObject, Line, LinePattern, Polygon, Rectangle, Smooth, Text, TextAlignment,
        TextStyle, TokenError,
    },
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    resolve::{ParseContext, resolve_bitmap},
    splitter::{Segment, split_delimited, split_list, unquote},
    value,
};

/// Parse one shape of an icon's graphics list.
///
/// Returns `None` when a recognized constructor has a field that cannot be
/// read; that shape is dropped and an error diagnostic is emitted. Blank
/// input gives [`GraphicsObject::Empty`], an unrecognized constructor gives
/// [`GraphicsObject::Unknown`].
pub fn parse_shape(
    segment: Segment<'_>,
    ctx: &ParseContext<'_>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<GraphicsObject> {
    let segment = segment.trim();
    if segment.is_blank() || segment.unbraced().is_blank() {
        trace!("Empty shape");
        return Some(GraphicsObject::Empty);
    }

    let Some(fields) = Fields::split(segment, diagnostics) else {
        diagnostics.emit(unknown_constructor(segment, segment.text()));
        return Some(GraphicsObject::Unknown(segment.text().to_string()));
    };

    let parsed = match fields.name() {
        "Line" => parse_line(&fields).map(GraphicsObject::Line),
        "Rectangle" => parse_rectangle(&fields).map(GraphicsObject::Rectangle),
        "Polygon" => parse_polygon(&fields).map(GraphicsObject::Polygon),
        "Ellipse" => parse_ellipse(&fields).map(GraphicsObject::Ellipse),
        "Text" => parse_text(&fields, diagnostics).map(GraphicsObject::Text),
        "Bitmap" => parse_bitmap(&fields, ctx, diagnostics).map(GraphicsObject::Bitmap),
        name => {
            diagnostics.emit(unknown_constructor(fields.constructor, name));
            return Some(GraphicsObject::Unknown(segment.text().to_string()));
        }
    };

    match parsed {
        Ok(object) => {
            debug!(kind = object.kind(); "Parsed shape");
            Some(object)
        }
        Err(diagnostic) => {
            let help = format!("the `{}` was dropped", fields.name());
            diagnostics.emit(diagnostic.with_help(help));
            None
        }
    }
}

fn unknown_constructor(at: Segment<'_>, name: &str) -> Diagnostic {
    Diagnostic::error(format!("unknown shape constructor `{name}`"))
        .with_code(ErrorCode::E104)
        .with_label(at.span(), "not a graphics primitive")
        .with_help("expected Line, Rectangle, Polygon, Ellipse, Text or Bitmap")
}

/// The positional arguments of one constructor call.
struct Fields<'a> {
    constructor: Segment<'a>,
    whole: Segment<'a>,
    values: Vec<Segment<'a>>,
}

impl<'a> Fields<'a> {
    /// Cut `Name(arg, ...)` into its name and arguments, or `None` when the
    /// text is not a call.
    fn split(segment: Segment<'a>, diagnostics: &mut DiagnosticCollector) -> Option<Self> {
        let open = segment.text().find('(')?;
        let constructor = segment.sub(0..open).trim();
        let is_name = !constructor.is_blank()
            && constructor
                .text()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !is_name {
            return None;
        }

        let call = segment.sub(open..segment.text().len());
        let arguments = call.strip_delimiters('(', ')').unwrap_or_else(|| {
            let rest = call.sub(1..call.text().len());
            rest.text()
                .strip_suffix(')')
                .map_or(rest, |inner| rest.sub(0..inner.len()))
        });
        let values = split_delimited(arguments, '{', '}').report(diagnostics);

        Some(Self {
            constructor,
            whole: segment,
            values,
        })
    }

    fn name(&self) -> &'a str {
        self.constructor.text()
    }

    fn get(&self, index: usize) -> Result<Segment<'a>> {
        self.values.get(index).copied().ok_or_else(|| {
            Diagnostic::error(format!("missing field {} of `{}`", index + 1, self.name()))
                .with_code(ErrorCode::E101)
                .with_label(
                    self.whole.span(),
                    format!("this constructor has only {} fields", self.values.len()),
                )
        })
    }

    fn invalid(
        &self,
        index: usize,
        field: Segment<'_>,
        code: ErrorCode,
        expected: &str,
    ) -> Diagnostic {
        Diagnostic::error(format!(
            "invalid field {} of `{}`: `{}`",
            index + 1,
            self.name(),
            field.text()
        ))
        .with_code(code)
        .with_label(field.span(), format!("expected {expected}"))
        .with_secondary_label(self.constructor.span(), "in this shape")
    }

    fn read<T>(
        &self,
        index: usize,
        parse: impl FnOnce(&str) -> Option<T>,
        code: ErrorCode,
        expected: &str,
    ) -> Result<T> {
        let field = self.get(index)?;
        parse(field.text()).ok_or_else(|| self.invalid(index, field, code, expected))
    }

    /// The field, with a dynamic selector reduced to its static value.
    fn get_static(&self, index: usize) -> Result<Segment<'a>> {
        Ok(static_value(self.get(index)?))
    }

    fn number(&self, index: usize) -> Result<f64> {
        self.read(index, value::parse_number, ErrorCode::E100, "a number")
    }

    fn optional_number(&self, index: usize, default: f64) -> Result<f64> {
        if index < self.values.len() {
            self.number(index)
        } else {
            Ok(default)
        }
    }

    fn point(&self, index: usize) -> Result<Point> {
        self.read(index, value::parse_point, ErrorCode::E103, "a point `{x, y}`")
    }

    fn extent(&self, index: usize) -> Result<Extent> {
        self.read(
            index,
            value::parse_extent,
            ErrorCode::E103,
            "an extent `{{x1, y1}, {x2, y2}}`",
        )
    }

    fn points(&self, index: usize) -> Result<Vec<Point>> {
        self.read(
            index,
            value::parse_points,
            ErrorCode::E103,
            "a point list `{{x, y}, ...}`",
        )
    }

    fn color(&self, index: usize) -> Result<Color> {
        let field = self.get(index)?;
        value::parse_triple(field.text())
            .and_then(Color::from_channels)
            .ok_or_else(|| self.invalid(index, field, ErrorCode::E103, "a color `{r, g, b}`"))
    }

    /// A color where a negative channel means "not set".
    fn optional_color(&self, index: usize) -> Result<Option<Color>> {
        self.read(index, value::parse_triple, ErrorCode::E103, "a color `{r, g, b}`")
            .map(Color::from_channels)
    }

    fn token<T: FromStr<Err = TokenError>>(&self, index: usize) -> Result<T> {
        let field = self.get(index)?;
        field.text().parse().map_err(|err: TokenError| {
            let expected = format!("a `{}` literal", err.kind());
            self.invalid(index, field, ErrorCode::E102, &expected)
        })
    }

    fn tokens<T: FromStr<Err = TokenError>>(&self, index: usize) -> Result<Vec<T>> {
        let field = self.get(index)?;
        let items = split_list(field).into_parts().0;
        items
            .iter()
            .map(|item| {
                item.text().parse().map_err(|err: TokenError| {
                    let expected = format!("a `{}` literal", err.kind());
                    self.invalid(index, *item, ErrorCode::E102, &expected)
                })
            })
            .collect()
    }

    fn visible(&self, index: usize) -> Result<bool> {
        Ok(self.get_static(index)?.text().contains("true"))
    }

    fn static_number(&self, index: usize) -> Result<f64> {
        let field = self.get_static(index)?;
        value::parse_number(field.text())
            .ok_or_else(|| self.invalid(index, field, ErrorCode::E100, "a number"))
    }

    fn string(&self, index: usize, diagnostics: &mut DiagnosticCollector) -> Result<String> {
        Ok(unquote(self.get(index)?).report(diagnostics))
    }

    fn static_string(
        &self,
        index: usize,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String> {
        Ok(unquote(self.get_static(index)?).report(diagnostics))
    }
}

/// Reduce a `{value, expression}` dynamic selector to `value`.
fn static_value(field: Segment<'_>) -> Segment<'_> {
    if field.text().starts_with('{') {
        if let Some(first) = split_list(field).into_parts().0.first() {
            return *first;
        }
    }
    field
}

fn graphic_item(fields: &Fields<'_>) -> Result<GraphicItem> {
    Ok(GraphicItem {
        visible: fields.visible(0)?,
        origin: fields.point(1)?,
        rotation: fields.static_number(2)?,
    })
}

fn filled_shape(fields: &Fields<'_>) -> Result<FilledShape> {
    Ok(FilledShape {
        line_color: fields.color(3)?,
        fill_color: fields.color(4)?,
        line_pattern: fields.token::<LinePattern>(5)?,
        fill_pattern: fields.token::<FillPattern>(6)?,
        line_thickness: fields.number(7)?,
    })
}

fn parse_line(fields: &Fields<'_>) -> Result<Line> {
    let arrows = fields.tokens::<Arrow>(7)?;
    let arrow = match arrows.as_slice() {
        [start, end] => [*start, *end],
        _ => {
            let field = fields.get(7)?;
            return Err(fields.invalid(7, field, ErrorCode::E103, "two arrows `{start, end}`"));
        }
    };

    Ok(Line {
        item: graphic_item(fields)?,
        points: fields.points(3)?,
        color: fields.color(4)?,
        pattern: fields.token(5)?,
        thickness: fields.number(6)?,
        arrow,
        arrow_size: fields.number(8)?,
        smooth: fields.token::<Smooth>(9)?,
    })
}

fn parse_rectangle(fields: &Fields<'_>) -> Result<Rectangle> {
    Ok(Rectangle {
        item: graphic_item(fields)?,
        filled: filled_shape(fields)?,
        border_pattern: fields.token::<BorderPattern>(8)?,
        extent: fields.extent(9)?,
        radius: fields.number(10)?,
    })
}

fn parse_polygon(fields: &Fields<'_>) -> Result<Polygon> {
    Ok(Polygon {
        item: graphic_item(fields)?,
        filled: filled_shape(fields)?,
        points: fields.points(8)?,
        smooth: fields.token(9)?,
    })
}

fn parse_ellipse(fields: &Fields<'_>) -> Result<Ellipse> {
    Ok(Ellipse {
        item: graphic_item(fields)?,
        filled: filled_shape(fields)?,
        extent: fields.extent(8)?,
        start_angle: fields.optional_number(9, 0.0)?,
        end_angle: fields.optional_number(10, 360.0)?,
    })
}

fn parse_text(fields: &Fields<'_>, diagnostics: &mut DiagnosticCollector) -> Result<Text> {
    Ok(Text {
        item: graphic_item(fields)?,
        filled: filled_shape(fields)?,
        extent: fields.extent(8)?,
        text_string: fields.static_string(9, diagnostics)?,
        font_size: fields.number(10)?,
        text_color: fields.optional_color(11)?,
        font_name: fields.string(12, diagnostics)?,
        text_style: fields.tokens::<TextStyle>(13)?,
        horizontal_alignment: fields.token::<TextAlignment>(14)?,
    })
}

fn parse_bitmap(
    fields: &Fields<'_>,
    ctx: &ParseContext<'_>,
    diagnostics: &mut DiagnosticCollector,
) -> Result<Bitmap> {
    let item = graphic_item(fields)?;
    let extent = fields.extent(3)?;
    let file_field = fields.get(4)?;
    let file_name = unquote(file_field).report(diagnostics);
    let image_source = match fields.values.get(5) {
        Some(source) => Some(unquote(*source).report(diagnostics)),
        None => None,
    };

    let href = resolve_bitmap(&file_name, image_source.as_deref(), file_field.span(), ctx)
        .report(diagnostics);

    Ok(Bitmap { item, extent, href })
}
