//! Fill definitions.
//!
//! A [`FillDefinition`] resolves a Modelica fill pattern against a shape's line
//! and fill colors. Flat fills are written directly into the `fill` attribute;
//! hatches and gradients need a paint server in the document's `<defs>`, built
//! by [`FillDefinition::to_svg_definition`] and referenced by id.

use svg::node::{
    Node,
    element::{self as svg_element, LinearGradient, RadialGradient, Stop},
};

use crate::{color::Color, graphics::FillPattern};

/// A small repeating tile used for hatched fills.
///
/// The tile is a background square in the fill color with a few strokes in
/// the line color drawn over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatchTile {
    size: f64,
    stroke_width: f64,
    strokes: &'static [&'static str],
}

impl HatchTile {
    const HORIZONTAL: Self = Self::new(5.0, 2.0, &["M0,0 L5,0"]);
    const VERTICAL: Self = Self::new(5.0, 2.0, &["M0,0 L0,5"]);
    const CROSS: Self = Self::new(5.0, 2.0, &["M0,0 L5,0", "M0,0 L0,5"]);
    const FORWARD: Self = Self::new(7.0, 1.0, &["M0,0 l7,7", "M6,-1 l3,3", "M-1,6 l3,3"]);
    const BACKWARD: Self = Self::new(7.0, 1.0, &["M7,0 l-7,7", "M1,-1 l-7,7", "M8,6 l-7,7"]);
    const CROSS_DIAG: Self = Self::new(8.0, 1.0, &["M0,0 l8,8", "M8,0 l-8,8"]);

    const fn new(size: f64, stroke_width: f64, strokes: &'static [&'static str]) -> Self {
        Self {
            size,
            stroke_width,
            strokes,
        }
    }

    /// Edge length of the square tile.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Path data of the hatch strokes.
    pub fn strokes(&self) -> &'static [&'static str] {
        self.strokes
    }
}

/// How a radial (sphere) gradient is approximated for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SphereStyle {
    /// Round shapes: a soft highlight from a 9-step color ramp.
    Round,
    /// Boxy shapes: a plain two-stop radial gradient.
    Boxy,
}

/// Direction of a cylinder gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CylinderAxis {
    /// Shading varies top to bottom.
    Horizontal,
    /// Shading varies left to right.
    Vertical,
}

/// A resolved fill.
#[derive(Debug, Clone, PartialEq)]
pub enum FillDefinition {
    None,
    Solid(Color),
    Hatch {
        tile: HatchTile,
        background: Color,
        line: Color,
    },
    Cylinder {
        axis: CylinderAxis,
        stops: Vec<(f64, Color)>,
    },
    Sphere {
        style: SphereStyle,
        stops: Vec<(f64, Color)>,
    },
}

impl FillDefinition {
    /// Resolve `pattern` with the shape's colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use modicon_core::{
    ///     color::Color,
    ///     draw::{FillDefinition, SphereStyle},
    ///     graphics::FillPattern,
    /// };
    ///
    /// let fill = FillDefinition::resolve(
    ///     FillPattern::Solid,
    ///     Color::BLACK,
    ///     Color::WHITE,
    ///     SphereStyle::Round,
    /// );
    /// assert_eq!(fill, FillDefinition::Solid(Color::WHITE));
    /// assert!(!fill.needs_definition());
    /// ```
    pub fn resolve(pattern: FillPattern, line: Color, fill: Color, sphere: SphereStyle) -> Self {
        let hatch = |tile| Self::Hatch {
            tile,
            background: fill,
            line,
        };
        match pattern {
            FillPattern::None => Self::None,
            FillPattern::Solid => Self::Solid(fill),
            FillPattern::Horizontal => hatch(HatchTile::HORIZONTAL),
            FillPattern::Vertical => hatch(HatchTile::VERTICAL),
            FillPattern::Cross => hatch(HatchTile::CROSS),
            FillPattern::Forward => hatch(HatchTile::FORWARD),
            FillPattern::Backward => hatch(HatchTile::BACKWARD),
            FillPattern::CrossDiag => hatch(HatchTile::CROSS_DIAG),
            FillPattern::HorizontalCylinder => Self::cylinder(CylinderAxis::Horizontal, line, fill),
            FillPattern::VerticalCylinder => Self::cylinder(CylinderAxis::Vertical, line, fill),
            FillPattern::Sphere => Self::sphere(sphere, line, fill),
        }
    }

    fn cylinder(axis: CylinderAxis, line: Color, fill: Color) -> Self {
        Self::Cylinder {
            axis,
            stops: vec![(0.0, line), (0.3, fill), (0.7, fill), (1.0, line)],
        }
    }

    fn sphere(style: SphereStyle, line: Color, fill: Color) -> Self {
        let stops = match style {
            SphereStyle::Round => {
                let ramp = line.gradient(fill, 9);
                vec![(0.0, ramp[10]), (0.45, ramp[8]), (0.7, ramp[6]), (1.0, ramp[0])]
            }
            SphereStyle::Boxy => vec![(0.0, fill), (1.0, line)],
        };
        Self::Sphere { style, stops }
    }

    /// `true` if the fill references a paint server in `<defs>`.
    pub fn needs_definition(&self) -> bool {
        !matches!(self, Self::None | Self::Solid(_))
    }

    /// The `fill` attribute value. `id` names the paint server, if any.
    pub fn fill_value(&self, id: &str) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Solid(color) => color.to_string(),
            _ => format!("url(#{id})"),
        }
    }

    /// Build the paint server for this fill, or `None` for flat fills.
    pub fn to_svg_definition(&self, id: &str) -> Option<Box<dyn Node>> {
        match self {
            Self::None | Self::Solid(_) => None,
            Self::Hatch {
                tile,
                background,
                line,
            } => {
                let mut pattern = svg_element::Pattern::new()
                    .set("id", id)
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", tile.size())
                    .set("height", tile.size())
                    .set("patternUnits", "userSpaceOnUse")
                    .add(
                        svg_element::Rectangle::new()
                            .set("x", 0)
                            .set("y", 0)
                            .set("width", tile.size())
                            .set("height", tile.size())
                            .set("fill", *background),
                    );
                for stroke in tile.strokes() {
                    pattern = pattern.add(
                        svg_element::Path::new()
                            .set("d", *stroke)
                            .set("stroke", *line)
                            .set("stroke-width", tile.stroke_width()),
                    );
                }
                Some(Box::new(pattern))
            }
            Self::Cylinder { axis, stops } => {
                let (x2, y2) = match axis {
                    CylinderAxis::Horizontal => ("0%", "100%"),
                    CylinderAxis::Vertical => ("100%", "0%"),
                };
                let mut gradient = LinearGradient::new()
                    .set("id", id)
                    .set("x1", "0%")
                    .set("y1", "0%")
                    .set("x2", x2)
                    .set("y2", y2);
                for stop in stops {
                    gradient = gradient.add(gradient_stop(*stop));
                }
                Some(Box::new(gradient))
            }
            Self::Sphere { style, stops } => {
                let radius = match style {
                    SphereStyle::Round => "55%",
                    SphereStyle::Boxy => "0.9",
                };
                let mut gradient = RadialGradient::new()
                    .set("id", id)
                    .set("cx", "50%")
                    .set("cy", "50%")
                    .set("r", radius)
                    .set("fx", "50%")
                    .set("fy", "50%");
                for stop in stops {
                    gradient = gradient.add(gradient_stop(*stop));
                }
                Some(Box::new(gradient))
            }
        }
    }
}

fn gradient_stop((offset, color): (f64, Color)) -> Stop {
    Stop::new()
        .set("offset", offset)
        .set("stop-color", color)
        .set("stop-opacity", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: Color = Color::rgb(0, 0, 0);
    const FILL: Color = Color::rgb(200, 100, 50);

    #[test]
    fn test_flat_fills() {
        let none = FillDefinition::resolve(FillPattern::None, LINE, FILL, SphereStyle::Round);
        assert_eq!(none.fill_value("x"), "none");
        assert!(none.to_svg_definition("x").is_none());

        let solid = FillDefinition::resolve(FillPattern::Solid, LINE, FILL, SphereStyle::Round);
        assert_eq!(solid.fill_value("x"), "rgb(200,100,50)");
    }

    #[test]
    fn test_hatch_tiles() {
        let fill = FillDefinition::resolve(FillPattern::Forward, LINE, FILL, SphereStyle::Round);
        let FillDefinition::Hatch { tile, .. } = fill else {
            panic!("Expected hatch fill");
        };
        assert_eq!(tile.size(), 7.0);
        assert_eq!(tile.stroke_width(), 1.0);
        assert_eq!(tile.strokes().len(), 3);

        let cross = FillDefinition::resolve(FillPattern::Cross, LINE, FILL, SphereStyle::Round);
        let FillDefinition::Hatch { tile, .. } = cross else {
            panic!("Expected hatch fill");
        };
        assert_eq!(tile.size(), 5.0);
        assert_eq!(tile.stroke_width(), 2.0);
        assert_eq!(tile.strokes().len(), 2);
    }

    #[test]
    fn test_hatch_definition_markup() {
        let fill = FillDefinition::resolve(FillPattern::CrossDiag, LINE, FILL, SphereStyle::Boxy);
        assert_eq!(fill.fill_value("fill-3"), "url(#fill-3)");

        let markup = fill.to_svg_definition("fill-3").unwrap().to_string();
        assert!(markup.contains(r#"id="fill-3""#));
        assert!(markup.contains(r#"patternUnits="userSpaceOnUse""#));
        assert!(markup.contains(r#"fill="rgb(200,100,50)""#));
        assert!(markup.contains("M8,0 l-8,8"));
    }

    #[test]
    fn test_cylinder_stops() {
        let fill = FillDefinition::resolve(
            FillPattern::HorizontalCylinder,
            LINE,
            FILL,
            SphereStyle::Round,
        );
        assert_eq!(
            fill,
            FillDefinition::Cylinder {
                axis: CylinderAxis::Horizontal,
                stops: vec![(0.0, LINE), (0.3, FILL), (0.7, FILL), (1.0, LINE)],
            }
        );

        let markup = fill.to_svg_definition("g").unwrap().to_string();
        assert!(markup.contains(r#"x2="0%""#));
        assert!(markup.contains(r#"y2="100%""#));
    }

    #[test]
    fn test_round_sphere_uses_ramp() {
        let fill = FillDefinition::resolve(FillPattern::Sphere, LINE, FILL, SphereStyle::Round);
        let FillDefinition::Sphere { stops, .. } = fill else {
            panic!("Expected sphere fill");
        };
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[0], (0.0, FILL));
        assert_eq!(stops[1], (0.45, Color::rgb(160, 80, 40)));
        assert_eq!(stops[2], (0.7, Color::rgb(120, 60, 30)));
        assert_eq!(stops[3], (1.0, LINE));
    }

    #[test]
    fn test_boxy_sphere() {
        let fill = FillDefinition::resolve(FillPattern::Sphere, LINE, FILL, SphereStyle::Boxy);
        let markup = fill.to_svg_definition("s").unwrap().to_string();
        assert!(markup.contains(r#"r="0.9""#));
    }
}
