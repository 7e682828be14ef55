//! SVG emission for each graphics primitive.

use log::{trace, warn};
use svg::{
    Document,
    node::{Node, element as svg_element},
};

use modicon_core::{
    apply_stroke,
    draw::{FillDefinition, SphereStyle, StrokeDefinition},
    geometry::{Bounds, Point},
    graphics::{
        Arrow, Bitmap, BorderPattern, Ellipse, FilledShape, GraphicItem, GraphicsObject, Line,
        Polygon, Rectangle, Smooth,
    },
};

use super::{
    RenderState, Svg,
    markers::{self, LineEnd},
};
use crate::transform::is_quarter_turn;

/// Degrees between samples of a drawn arc.
const ARC_STEP: f64 = 5.0;

/// What one graphics object contributes to the document.
#[derive(Default)]
pub(super) struct ShapeOutput {
    definitions: Vec<Box<dyn Node>>,
    element: Option<Box<dyn Node>>,
}

impl ShapeOutput {
    pub(super) fn new(element: impl Into<Box<dyn Node>>) -> Self {
        Self {
            definitions: Vec::new(),
            element: Some(element.into()),
        }
    }

    pub(super) fn with_definitions(
        mut self,
        definitions: impl IntoIterator<Item = Box<dyn Node>>,
    ) -> Self {
        self.definitions.extend(definitions);
        self
    }

    pub(super) fn is_empty(&self) -> bool {
        self.element.is_none()
    }

    /// Add the definitions, then the element.
    pub(super) fn append_to(self, mut document: Document) -> Document {
        if !self.definitions.is_empty() {
            let defs = self
                .definitions
                .into_iter()
                .fold(svg_element::Definitions::new(), |defs, definition| {
                    defs.add(definition)
                });
            document = document.add(defs);
        }
        match self.element {
            Some(element) => document.add(element),
            None => document,
        }
    }
}

impl Svg {
    pub(super) fn render_object(&self, state: &mut RenderState, object: &GraphicsObject) -> ShapeOutput {
        if !object.is_drawable() {
            trace!(kind = object.kind(); "Skipping object");
            return ShapeOutput::default();
        }
        match object {
            GraphicsObject::Line(line) => render_line(state, line),
            GraphicsObject::Rectangle(rect) => render_rectangle(state, rect),
            GraphicsObject::Polygon(polygon) => render_polygon(state, polygon),
            GraphicsObject::Ellipse(ellipse) => render_ellipse(state, ellipse),
            GraphicsObject::Text(text) => self.render_text(state, text),
            GraphicsObject::Bitmap(bitmap) => render_bitmap(state, bitmap),
            GraphicsObject::Empty | GraphicsObject::Unknown(_) => ShapeOutput::default(),
        }
    }
}

/// `x,y x,y ...` for `points` attributes.
pub(super) fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cubic path through the midpoints of consecutive points, each interior
/// point acting as the control point.
///
/// Needs at least three points.
pub(super) fn bezier_path(points: &[Point], closed: bool) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut segments = vec![format!("M {} {} C", first.x(), first.y())];
    let mut joint = *first;
    for window in points.windows(3) {
        let [previous, control, next] = [window[0], window[1], window[2]];
        let start = previous.midpoint(control);
        joint = control.midpoint(next);
        segments.push(cubic(start, control, joint));
    }
    let last = rest.last().copied().unwrap_or(*first);
    segments.push(cubic(joint, last, last));
    let mut data = segments.join(" ");
    if closed {
        data.push_str(" Z");
    }
    data
}

fn cubic(first: Point, second: Point, end: Point) -> String {
    format!(
        "{} {} {} {} {} {}",
        first.x(),
        first.y(),
        second.x(),
        second.y(),
        end.x(),
        end.y()
    )
}

fn border_stroke(filled: &FilledShape) -> StrokeDefinition {
    StrokeDefinition::new(filled.line_color, filled.line_thickness, filled.line_pattern)
}

/// Set the `fill` of a closed shape. Patterned fills also return the paint
/// server they reference.
pub(super) fn apply_fill<T: Node>(
    mut element: T,
    state: &mut RenderState,
    filled: &FilledShape,
    sphere: SphereStyle,
) -> (T, Option<Box<dyn Node>>) {
    let fill = FillDefinition::resolve(
        filled.fill_pattern,
        filled.line_color,
        filled.fill_color,
        sphere,
    );
    if !fill.needs_definition() {
        element.assign("fill", fill.fill_value(""));
        return (element, None);
    }
    let id = state.ids.next_id("fill");
    element.assign("fill", fill.fill_value(&id));
    let definition = fill.to_svg_definition(&id);
    (element, definition)
}

/// Fill an already stroked shape and wrap it up.
fn finish_filled<T: Node>(
    element: T,
    state: &mut RenderState,
    filled: &FilledShape,
    sphere: SphereStyle,
) -> ShapeOutput {
    let (element, definition) = apply_fill(element, state, filled, sphere);
    ShapeOutput::new(element).with_definitions(definition)
}

fn render_line(state: &mut RenderState, line: &Line) -> ShapeOutput {
    if line.points.is_empty() {
        return ShapeOutput::default();
    }
    let points = state.projection.points(&line.item, &line.points);
    let stroke = StrokeDefinition::new(line.color, line.thickness, line.pattern);

    if line.smooth == Smooth::Bezier && points.len() >= 3 {
        let path = svg_element::Path::new()
            .set("d", bezier_path(&points, false))
            .set("fill", "none");
        line_with_markers(state, apply_stroke!(path, &stroke), line)
    } else {
        let polyline = svg_element::Polyline::new()
            .set("points", point_list(&points))
            .set("fill", "none");
        line_with_markers(state, apply_stroke!(polyline, &stroke), line)
    }
}

fn line_with_markers<T: Node>(state: &mut RenderState, mut element: T, line: &Line) -> ShapeOutput {
    let mut definitions: Vec<Box<dyn Node>> = Vec::new();
    for (arrow, end) in line.arrow.iter().zip([LineEnd::Start, LineEnd::End]) {
        if *arrow == Arrow::None {
            continue;
        }
        let id = state.ids.next_id(end.id_prefix());
        let Some(marker) = markers::arrow_marker(&id, *arrow, end, line.color) else {
            continue;
        };
        element.assign(end.attribute(), format!("url(#{id})"));
        definitions.push(Box::new(marker));
    }
    ShapeOutput {
        definitions,
        element: Some(Box::new(element)),
    }
}

fn render_polygon(state: &mut RenderState, polygon: &Polygon) -> ShapeOutput {
    if polygon.points.is_empty() {
        return ShapeOutput::default();
    }
    let points = state.projection.points(&polygon.item, &polygon.points);
    let stroke = border_stroke(&polygon.filled);
    if polygon.smooth == Smooth::Bezier && points.len() >= 3 {
        let path = svg_element::Path::new().set("d", bezier_path(&points, true));
        finish_filled(apply_stroke!(path, &stroke), state, &polygon.filled, SphereStyle::Round)
    } else {
        let shape = svg_element::Polygon::new().set("points", point_list(&points));
        finish_filled(apply_stroke!(shape, &stroke), state, &polygon.filled, SphereStyle::Round)
    }
}

fn render_rectangle(state: &mut RenderState, rect: &Rectangle) -> ShapeOutput {
    let angle = state.projection.angle(&rect.item);
    let corners = rect.extent.corners().map(|c| state.projection.point(&rect.item, c));
    let stroke = border_stroke(&rect.filled);

    if is_quarter_turn(angle) {
        let bounds = Bounds::from_corners(corners[0], corners[2]);
        let radius = rect.radius * state.projection.scale(&rect.item);
        let mut shape = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height());
        if radius > 0.0 {
            shape = shape.set("rx", radius).set("ry", radius);
        }
        finish_rectangle(apply_stroke!(shape, &stroke), state, rect)
    } else {
        let shape = svg_element::Polygon::new().set("points", point_list(&corners));
        finish_rectangle(apply_stroke!(shape, &stroke), state, rect)
    }
}

/// Fill a stroked rectangle and apply its border effect.
fn finish_rectangle<T: Node>(element: T, state: &mut RenderState, rect: &Rectangle) -> ShapeOutput {
    let (mut element, fill) = apply_fill(element, state, &rect.filled, SphereStyle::Boxy);
    let mut definitions: Vec<Box<dyn Node>> = fill.into_iter().collect();

    match rect.border_pattern {
        BorderPattern::None => {}
        BorderPattern::Raised => {
            let id = state.ids.next_id("raised");
            element.assign("filter", format!("url(#{id})"));
            definitions.push(Box::new(markers::raised_filter(&id)));
        }
        BorderPattern::Sunken | BorderPattern::Engraved => {
            warn!(border_pattern = rect.border_pattern.as_str(); "Border pattern is not supported");
        }
    }

    ShapeOutput {
        definitions,
        element: Some(Box::new(element)),
    }
}

/// A point of the ellipse inscribed in `bounds`, at `degrees`.
fn ellipse_point(bounds: Bounds, degrees: f64) -> Point {
    let center = bounds.center();
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(
        center.x() + bounds.width() / 2.0 * cos,
        center.y() + bounds.height() / 2.0 * sin,
    )
}

/// Local points along the arc from `start` to `end` degrees.
fn arc_points(bounds: Bounds, start: f64, end: f64) -> Vec<Point> {
    let sweep = end - start;
    let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| ellipse_point(bounds, start + sweep * i as f64 / steps as f64))
        .collect()
}

/// Closed path from `center` along `arc` and back.
fn sector_path(center: Point, arc: &[Point]) -> String {
    std::iter::once(format!("M {} {}", center.x(), center.y()))
        .chain(arc.iter().map(|point| format!("L {} {}", point.x(), point.y())))
        .chain(std::iter::once("Z".to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_ellipse(state: &mut RenderState, ellipse: &Ellipse) -> ShapeOutput {
    let bounds = ellipse.extent.bounds();
    let item = &ellipse.item;
    let stroke = border_stroke(&ellipse.filled);

    if ellipse.is_full_sweep() {
        if is_quarter_turn(state.projection.angle(item)) {
            let corners = ellipse.extent.corners().map(|c| state.projection.point(item, c));
            let device = Bounds::from_corners(corners[0], corners[2]);
            let shape = svg_element::Ellipse::new()
                .set("cx", device.center().x())
                .set("cy", device.center().y())
                .set("rx", device.width() / 2.0)
                .set("ry", device.height() / 2.0);
            return finish_filled(apply_stroke!(shape, &stroke), state, &ellipse.filled, SphereStyle::Round);
        }
        let mut outline = arc_points(bounds, 0.0, 360.0);
        outline.pop();
        let points = state.projection.points(item, &outline);
        let shape = svg_element::Polygon::new().set("points", point_list(&points));
        return finish_filled(apply_stroke!(shape, &stroke), state, &ellipse.filled, SphereStyle::Round);
    }

    // A partial sweep is drawn as a sector closed through the center.
    let center = state.projection.point(item, bounds.center());
    let arc = state
        .projection
        .points(item, &arc_points(bounds, ellipse.start_angle, ellipse.end_angle));
    let shape = svg_element::Path::new().set("d", sector_path(center, &arc));
    finish_filled(apply_stroke!(shape, &stroke), state, &ellipse.filled, SphereStyle::Round)
}

/// An upright box of the shape's local size centered on its projected
/// extent, as `(top_left, width, height, angle)`.
pub(super) fn upright_box(
    state: &RenderState,
    item: &GraphicItem,
    bounds: Bounds,
) -> (Point, f64, f64, f64) {
    let scale = state.projection.scale(item);
    let center = state.projection.point(item, bounds.center());
    let (width, height) = (bounds.width() * scale, bounds.height() * scale);
    let origin = Point::new(center.x() - width / 2.0, center.y() - height / 2.0);
    (origin, width, height, state.projection.angle(item))
}

/// `rotate(...)` about `center`, or `None` for no rotation.
pub(super) fn rotation_transform(angle: f64, center: Point) -> Option<String> {
    let angle = angle.rem_euclid(360.0);
    if angle.abs() < 1e-9 || (angle - 360.0).abs() < 1e-9 {
        return None;
    }
    Some(format!("rotate({angle} {} {})", center.x(), center.y()))
}

fn render_bitmap(state: &mut RenderState, bitmap: &Bitmap) -> ShapeOutput {
    let (origin, width, height, angle) = upright_box(state, &bitmap.item, bitmap.extent.bounds());
    let mut image = svg_element::Image::new()
        .set("x", origin.x())
        .set("y", origin.y())
        .set("width", width)
        .set("height", height)
        .set("href", bitmap.href.as_str());
    let center = Point::new(origin.x() + width / 2.0, origin.y() + height / 2.0);
    if let Some(transform) = rotation_transform(angle, center) {
        image = image.set("transform", transform);
    }
    ShapeOutput::new(image)
}
