//! Stroke definitions.
//!
//! Modelica line patterns are turned into SVG `stroke-dasharray` values built
//! from three base units (dot, dash and space) scaled by the line thickness.
//! Widths are written in millimeters.
//!
//! | Pattern      | Dash array                         |
//! |--------------|------------------------------------|
//! | `None`       | no stroke at all                   |
//! | `Solid`      | none                               |
//! | `Dash`       | dash, space                        |
//! | `Dot`        | dot, space                         |
//! | `DashDot`    | dash, space, dot, space            |
//! | `DashDotDot` | dash, space, dot, space, dot, space|
//!
//! # Example
//!
//! ```
//! use modicon_core::{color::Color, draw::StrokeDefinition, graphics::LinePattern};
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::rgb(0, 0, 255), 0.5, LinePattern::Dash);
//! assert_eq!(stroke.dash_array_value().as_deref(), Some("8,4"));
//!
//! let line = svg_element::Polyline::new().set("points", "0,0 10,10");
//! let line = modicon_core::apply_stroke!(line, &stroke);
//! ```

use crate::{color::Color, graphics::LinePattern};

/// Length of a dot at thickness 1.
pub const DOT_SIZE: f64 = 4.0;
/// Length of a dash at thickness 1.
pub const DASH_SIZE: f64 = 16.0;
/// Length of a gap at thickness 1.
pub const SPACE_SIZE: f64 = 8.0;

/// A resolved stroke: color, thickness and line pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    thickness: f64,
    pattern: LinePattern,
}

impl StrokeDefinition {
    pub fn new(color: Color, thickness: f64, pattern: LinePattern) -> Self {
        Self {
            color,
            thickness,
            pattern,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Thickness in millimeters.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn pattern(&self) -> LinePattern {
        self.pattern
    }

    /// `false` for [`LinePattern::None`], which draws no stroke.
    pub fn is_visible(&self) -> bool {
        self.pattern != LinePattern::None
    }

    /// The `stroke-width` attribute value, e.g. `0.25mm`.
    pub fn width_value(&self) -> String {
        format!("{}mm", self.thickness)
    }

    /// Dash and gap lengths for the pattern, or `None` for continuous or
    /// invisible strokes.
    pub fn dash_array(&self) -> Option<Vec<f64>> {
        let (dot, dash, space) = (
            DOT_SIZE * self.thickness,
            DASH_SIZE * self.thickness,
            SPACE_SIZE * self.thickness,
        );
        match self.pattern {
            LinePattern::None | LinePattern::Solid => None,
            LinePattern::Dash => Some(vec![dash, space]),
            LinePattern::Dot => Some(vec![dot, space]),
            LinePattern::DashDot => Some(vec![dash, space, dot, space]),
            LinePattern::DashDotDot => Some(vec![dash, space, dot, space, dot, space]),
        }
    }

    /// The `stroke-dasharray` attribute value, if the pattern has one.
    pub fn dash_array_value(&self) -> Option<String> {
        self.dash_array().map(|lengths| {
            lengths
                .iter()
                .map(|length| length.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

/// Apply stroke attributes to an SVG element.
///
/// Invisible strokes set `stroke="none"`. Otherwise color, width and (for
/// patterned lines) the dash array are applied.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        if stroke.is_visible() {
            let mut elem = $element
                .set("stroke", stroke.color())
                .set("stroke-width", stroke.width_value());

            if let Some(dasharray) = stroke.dash_array_value() {
                elem = elem.set("stroke-dasharray", dasharray);
            }

            elem
        } else {
            $element.set("stroke", "none")
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(pattern: LinePattern, thickness: f64) -> StrokeDefinition {
        StrokeDefinition::new(Color::BLACK, thickness, pattern)
    }

    #[test]
    fn test_dash_arrays_scale_with_thickness() {
        assert_eq!(stroke(LinePattern::Dash, 1.0).dash_array(), Some(vec![16.0, 8.0]));
        assert_eq!(stroke(LinePattern::Dot, 0.5).dash_array(), Some(vec![2.0, 4.0]));
        assert_eq!(
            stroke(LinePattern::DashDot, 0.25).dash_array(),
            Some(vec![4.0, 2.0, 1.0, 2.0])
        );
        assert_eq!(
            stroke(LinePattern::DashDotDot, 2.0).dash_array(),
            Some(vec![32.0, 16.0, 8.0, 16.0, 8.0, 16.0])
        );
    }

    #[test]
    fn test_solid_and_none_have_no_dash_array() {
        assert_eq!(stroke(LinePattern::Solid, 1.0).dash_array(), None);
        assert_eq!(stroke(LinePattern::None, 1.0).dash_array(), None);
    }

    #[test]
    fn test_visibility() {
        assert!(stroke(LinePattern::Solid, 0.25).is_visible());
        assert!(!stroke(LinePattern::None, 0.25).is_visible());
    }

    #[test]
    fn test_attribute_values() {
        let s = stroke(LinePattern::DashDot, 0.25);
        assert_eq!(s.width_value(), "0.25mm");
        assert_eq!(s.dash_array_value().as_deref(), Some("4,2,1,2"));
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        use svg::node::element as svg_element;

        let visible = stroke(LinePattern::Dash, 1.0);
        let rect = crate::apply_stroke!(svg_element::Rectangle::new(), &visible).to_string();
        assert!(rect.contains(r#"stroke="rgb(0,0,0)""#));
        assert!(rect.contains(r#"stroke-width="1mm""#));
        assert!(rect.contains(r#"stroke-dasharray="16,8""#));

        let hidden = stroke(LinePattern::None, 1.0);
        let rect = crate::apply_stroke!(svg_element::Rectangle::new(), &hidden).to_string();
        assert!(rect.contains(r#"stroke="none""#));
        assert!(!rect.contains("stroke-width"));
    }
}
