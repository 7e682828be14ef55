//! The parsed icon model.
//!
//! A class icon is a [`ClassGraphics`]: a [`CoordinateSystem`] plus an ordered
//! list of [`GraphicsObject`]s. Objects later in the list are drawn on top of
//! earlier ones.
//!
//! # Example
//!
//! ```
//! use modicon_core::graphics::{ClassGraphics, CoordinateSystem, GraphicsObject};
//!
//! let icon = ClassGraphics::new(CoordinateSystem::default(), vec![GraphicsObject::Empty]);
//! assert_eq!(icon.graphics().len(), 1);
//! assert_eq!(icon.coordinate_system().initial_scale(), 0.1);
//! ```

mod pattern;
mod shape;

pub use pattern::{
    Arrow, BorderPattern, FillPattern, LinePattern, Smooth, TextAlignment, TextStyle, TokenError,
};
pub use shape::{Bitmap, Ellipse, FilledShape, GraphicItem, Line, Polygon, Rectangle, Text};

use serde::Serialize;

use crate::geometry::{Extent, Point};

/// One drawable primitive of an icon.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsObject {
    Line(Line),
    Rectangle(Rectangle),
    Polygon(Polygon),
    Ellipse(Ellipse),
    Text(Text),
    Bitmap(Bitmap),
    /// An empty shape entry; draws nothing.
    Empty,
    /// A constructor that is not understood, kept verbatim; draws nothing.
    Unknown(String),
}

impl GraphicsObject {
    /// The shared graphic item fields, if this is a drawable primitive.
    pub fn item(&self) -> Option<&GraphicItem> {
        match self {
            Self::Line(line) => Some(&line.item),
            Self::Rectangle(rect) => Some(&rect.item),
            Self::Polygon(polygon) => Some(&polygon.item),
            Self::Ellipse(ellipse) => Some(&ellipse.item),
            Self::Text(text) => Some(&text.item),
            Self::Bitmap(bitmap) => Some(&bitmap.item),
            Self::Empty | Self::Unknown(_) => None,
        }
    }

    /// `true` if the object contributes to the drawing.
    pub fn is_drawable(&self) -> bool {
        self.item().is_some_and(|item| item.visible)
    }

    /// The constructor name of this object.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line(_) => "Line",
            Self::Rectangle(_) => "Rectangle",
            Self::Polygon(_) => "Polygon",
            Self::Ellipse(_) => "Ellipse",
            Self::Text(_) => "Text",
            Self::Bitmap(_) => "Bitmap",
            Self::Empty => "Empty",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// The extent of the object in its local coordinates.
    ///
    /// Polygons derive theirs from their points; lines have none.
    pub fn extent(&self) -> Option<Extent> {
        match self {
            Self::Rectangle(rect) => Some(rect.extent),
            Self::Ellipse(ellipse) => Some(ellipse.extent),
            Self::Text(text) => Some(text.extent),
            Self::Bitmap(bitmap) => Some(bitmap.extent),
            Self::Polygon(polygon) => polygon.extent(),
            Self::Line(_) | Self::Empty | Self::Unknown(_) => None,
        }
    }

    /// The point sequence of lines and polygons.
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Line(line) => &line.points,
            Self::Polygon(polygon) => &polygon.points,
            _ => &[],
        }
    }
}

/// The logical drawing area an icon is authored in.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystem {
    extent: Extent,
    preserve_aspect_ratio: bool,
    initial_scale: f64,
    grid: (f64, f64),
}

impl CoordinateSystem {
    pub fn new(
        extent: Extent,
        preserve_aspect_ratio: bool,
        initial_scale: f64,
        grid: (f64, f64),
    ) -> Self {
        Self {
            extent,
            preserve_aspect_ratio,
            initial_scale,
            grid,
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn preserve_aspect_ratio(&self) -> bool {
        self.preserve_aspect_ratio
    }

    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    pub fn grid(&self) -> (f64, f64) {
        self.grid
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_preserve_aspect_ratio(mut self, preserve: bool) -> Self {
        self.preserve_aspect_ratio = preserve;
        self
    }

    pub fn with_initial_scale(mut self, scale: f64) -> Self {
        self.initial_scale = scale;
        self
    }

    pub fn with_grid(mut self, grid: (f64, f64)) -> Self {
        self.grid = grid;
        self
    }
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self {
            extent: Extent::unit_icon(),
            preserve_aspect_ratio: true,
            initial_scale: 0.1,
            grid: (2.0, 2.0),
        }
    }
}

/// The icon of a single class, without inherited graphics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassGraphics {
    coordinate_system: CoordinateSystem,
    graphics: Vec<GraphicsObject>,
}

impl ClassGraphics {
    pub fn new(coordinate_system: CoordinateSystem, graphics: Vec<GraphicsObject>) -> Self {
        Self {
            coordinate_system,
            graphics,
        }
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coordinate_system
    }

    pub fn graphics(&self) -> &[GraphicsObject] {
        &self.graphics
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }
}

/// Position, size and rotation of a component icon inside a parent drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transformation {
    origin: Point,
    extent: Extent,
    rotation: f64,
}

impl Transformation {
    pub fn new(origin: Point, extent: Extent, rotation: f64) -> Self {
        Self {
            origin,
            extent,
            rotation,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Counter-clockwise rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}
