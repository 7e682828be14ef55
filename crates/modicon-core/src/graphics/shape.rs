//! Shape records parsed from icon annotations.
//!
//! Each record mirrors one Modelica graphics primitive. Fields are public:
//! the records are plain data produced by the parser and consumed by the
//! renderer.

use crate::{
    color::Color,
    geometry::{Extent, Point},
    graphics::pattern::{
        Arrow, BorderPattern, FillPattern, LinePattern, Smooth, TextAlignment, TextStyle,
    },
};

/// Fields shared by every graphics primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicItem {
    pub visible: bool,
    pub origin: Point,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f64,
}

impl Default for GraphicItem {
    fn default() -> Self {
        Self {
            visible: true,
            origin: Point::default(),
            rotation: 0.0,
        }
    }
}

/// Border and interior styling of closed shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledShape {
    pub line_color: Color,
    pub fill_color: Color,
    pub line_pattern: LinePattern,
    pub fill_pattern: FillPattern,
    /// Border thickness in millimeters.
    pub line_thickness: f64,
}

impl Default for FilledShape {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_pattern: LinePattern::Solid,
            fill_pattern: FillPattern::None,
            line_thickness: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub item: GraphicItem,
    pub points: Vec<Point>,
    pub color: Color,
    pub pattern: LinePattern,
    /// Line thickness in millimeters.
    pub thickness: f64,
    /// Arrow heads at the first and last point.
    pub arrow: [Arrow; 2],
    pub arrow_size: f64,
    pub smooth: Smooth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub item: GraphicItem,
    pub filled: FilledShape,
    pub border_pattern: BorderPattern,
    pub extent: Extent,
    /// Corner radius.
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub item: GraphicItem,
    pub filled: FilledShape,
    pub points: Vec<Point>,
    pub smooth: Smooth,
}

impl Polygon {
    /// The axis-aligned box of the point sequence.
    ///
    /// A polygon carries no extent of its own; it is always derived from the
    /// points, so a repeated closing point makes no difference.
    pub fn extent(&self) -> Option<Extent> {
        Extent::enclosing(self.points.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub item: GraphicItem,
    pub filled: FilledShape,
    pub extent: Extent,
    /// Start of the drawn arc in degrees.
    pub start_angle: f64,
    /// End of the drawn arc in degrees.
    pub end_angle: f64,
}

impl Ellipse {
    /// `true` when the arc covers the whole ellipse.
    pub fn is_full_sweep(&self) -> bool {
        let sweep = (self.end_angle - self.start_angle).abs();
        sweep == 0.0 || sweep >= 360.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub item: GraphicItem,
    pub filled: FilledShape,
    pub extent: Extent,
    pub text_string: String,
    /// Font size in points; `0` fits the text to the extent height.
    pub font_size: f64,
    /// Explicit text color, `None` when the annotation leaves it unset.
    pub text_color: Option<Color>,
    /// Font family, empty for the renderer default.
    pub font_name: String,
    pub text_style: Vec<TextStyle>,
    pub horizontal_alignment: TextAlignment,
}

impl Text {
    pub fn has_style(&self, style: TextStyle) -> bool {
        self.text_style.contains(&style)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub item: GraphicItem,
    pub extent: Extent,
    /// Image reference: a `data:` URL, or the raw URI when it could not be
    /// resolved.
    pub href: String,
}
