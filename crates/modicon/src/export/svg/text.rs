//! Text emission.

use svg::node::{self, element as svg_element};

use modicon_core::{
    draw::SphereStyle,
    geometry::Point,
    graphics::{FillPattern, Text, TextAlignment, TextStyle},
};

use super::{
    RenderState, Svg,
    shapes::{ShapeOutput, apply_fill, rotation_transform},
};

/// Turn a device angle so text never reads upside down.
///
/// Returns the angle to draw at and whether the text was turned around.
fn upright(angle: f64) -> (f64, bool) {
    let angle = angle.rem_euclid(360.0);
    if angle > 90.0 + 1e-9 && angle <= 270.0 + 1e-9 {
        (angle - 180.0, true)
    } else {
        (angle, false)
    }
}

fn text_anchor(alignment: TextAlignment, turned: bool) -> &'static str {
    match (alignment, turned) {
        (TextAlignment::Center, _) => "middle",
        (TextAlignment::Left, false) | (TextAlignment::Right, true) => "start",
        (TextAlignment::Right, false) | (TextAlignment::Left, true) => "end",
    }
}

impl Svg {
    pub(super) fn render_text(&self, state: &mut RenderState, text: &Text) -> ShapeOutput {
        let item = &text.item;
        let bounds = text.extent.bounds();

        // Horizontally aligned texts hang off the near or far edge, at mid height.
        let anchor_x = match text.horizontal_alignment {
            TextAlignment::Left => bounds.min_x(),
            TextAlignment::Center => bounds.center().x(),
            TextAlignment::Right => bounds.max_x(),
        };
        let anchor = state
            .projection
            .point(item, Point::new(anchor_x, bounds.center().y()));
        let (angle, turned) = upright(state.projection.angle(item));

        let font_size = if text.font_size == 0.0 {
            bounds.height() * state.projection.scale(item)
        } else {
            text.font_size
        };
        let font_family = if text.font_name.is_empty() {
            self.default_font.as_str()
        } else {
            text.font_name.as_str()
        };

        let mut element = svg_element::Text::new("")
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("font-family", font_family)
            .set("font-size", font_size)
            .set("dominant-baseline", "middle")
            .set("text-anchor", text_anchor(text.horizontal_alignment, turned))
            .add(node::Text::new(text.text_string.as_str()));

        if text.has_style(TextStyle::Bold) {
            element = element.set("font-weight", "bold");
        }
        if text.has_style(TextStyle::Italic) {
            element = element.set("font-style", "italic");
        }
        if text.has_style(TextStyle::UnderLine) {
            element = element.set("text-decoration", "underline");
        }
        if let Some(transform) = rotation_transform(angle, anchor) {
            element = element.set("transform", transform);
        }

        // Text is never stroked. Without a fill pattern it is painted in
        // the line color.
        if text.filled.fill_pattern == FillPattern::None {
            return ShapeOutput::new(element.set("fill", text.filled.line_color));
        }
        let (element, definition) = apply_fill(element, state, &text.filled, SphereStyle::Round);
        ShapeOutput::new(element).with_definitions(definition)
    }
}
