//! Coordinate transforms from annotation space to SVG device space.
//!
//! A point goes through up to three steps:
//!
//! 1. **Shape step**: the shape's own rotation about its origin,
//!    `p' = origin + R(rotation) * p`.
//! 2. **Placement step** (component icons only): the class's coordinate
//!    system is mapped onto the placement extent, axes mirrored when the
//!    extent corners are reversed, then rotated about the placement origin.
//! 3. **Device step**: the Y axis is flipped and the drawing is moved so
//!    that its top-left corner is at `(0, 0)`.
//!
//! [`Transform`] does the first two steps; [`Viewport`] does the last.
//! [`Projection`] chains them for the renderer.

use log::debug;

use modicon_core::{
    geometry::{Bounds, Extent, Point},
    graphics::{CoordinateSystem, GraphicItem, GraphicsObject, Transformation},
};

/// Shape and placement steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    coordinate_extent: Extent,
    placement: Option<Transformation>,
}

impl Transform {
    /// A transform for icons authored in `coordinate_system`.
    pub fn new(coordinate_system: &CoordinateSystem) -> Self {
        Self {
            coordinate_extent: coordinate_system.extent(),
            placement: None,
        }
    }

    /// Place the icon inside a parent drawing.
    pub fn with_placement(mut self, placement: Option<Transformation>) -> Self {
        self.placement = placement;
        self
    }

    pub fn placement(&self) -> Option<Transformation> {
        self.placement
    }

    /// Rotate `point` about the shape's origin.
    pub fn shape_point(item: &GraphicItem, point: Point) -> Point {
        item.origin.add_point(point.rotate(item.rotation))
    }

    /// Map a point of the icon's coordinate system into the parent drawing.
    ///
    /// The identity when there is no placement.
    pub fn place(&self, point: Point) -> Point {
        let Some(placement) = self.placement else {
            return point;
        };
        let from = self.coordinate_extent;
        let to = placement.extent();

        let axis = |value: f64, from_center: f64, from_size: f64, to_center: f64, to_size: f64, flipped: bool| {
            let scale = if from_size == 0.0 { 1.0 } else { to_size / from_size };
            let offset = (value - from_center) * scale;
            to_center + if flipped { -offset } else { offset }
        };
        let mapped = Point::new(
            axis(
                point.x(),
                from.center().x(),
                from.width(),
                to.center().x(),
                to.width(),
                to.is_flipped_x(),
            ),
            axis(
                point.y(),
                from.center().y(),
                from.height(),
                to.center().y(),
                to.height(),
                to.is_flipped_y(),
            ),
        );

        mapped.rotate(placement.rotation()).add_point(placement.origin())
    }

    /// Shape step followed by placement step.
    pub fn apply(&self, item: &GraphicItem, point: Point) -> Point {
        self.place(Self::shape_point(item, point))
    }

    /// The logical bounds of everything `graphics` draws.
    ///
    /// Each visible shape contributes its transformed extent corners, points
    /// and origin. Returns `None` when nothing is drawn.
    pub fn measure<'a>(&self, graphics: impl IntoIterator<Item = &'a GraphicsObject>) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |point: Point| {
            bounds = Some(match bounds {
                Some(bounds) => bounds.include(point),
                None => Bounds::from_point(point),
            });
        };

        for object in graphics {
            if !object.is_drawable() {
                continue;
            }
            let Some(item) = object.item() else {
                continue;
            };
            if let Some(extent) = object.extent() {
                for corner in extent.corners() {
                    include(self.apply(item, corner));
                }
            }
            for point in object.points() {
                include(self.apply(item, *point));
            }
            include(self.place(item.origin));
        }

        bounds
    }

    /// The transformed corners of the coordinate-system extent.
    pub fn frame(&self) -> Bounds {
        let corners = self.coordinate_extent.corners().map(|corner| self.place(corner));
        Bounds::from_corners(corners[0], corners[2])
            .include(corners[1])
            .include(corners[3])
    }
}

/// The device step: the visible area of the drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min_x: f64,
    max_y: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    /// A viewport showing exactly `bounds`.
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self {
            min_x: bounds.min_x(),
            max_y: bounds.max_y(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    /// Measure `graphics` and size the viewport to fit.
    ///
    /// An empty drawing shows the coordinate system. With `frame` set the
    /// coordinate system is always shown in full.
    pub fn fit<'a>(
        transform: &Transform,
        graphics: impl IntoIterator<Item = &'a GraphicsObject>,
        frame: bool,
    ) -> Self {
        let bounds = match (transform.measure(graphics), frame) {
            (Some(bounds), false) => bounds,
            (Some(bounds), true) => bounds.merge(&transform.frame()),
            (None, _) => transform.frame(),
        };
        let viewport = Self::from_bounds(bounds);
        debug!(width = viewport.width, height = viewport.height; "Measured drawing");
        viewport
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Flip Y and move the top-left corner of the drawing to `(0, 0)`.
    pub fn to_device(&self, point: Point) -> Point {
        Point::new(point.x() - self.min_x, self.max_y - point.y())
    }
}

/// All three steps, as used while rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    transform: Transform,
    viewport: Viewport,
}

impl Projection {
    pub fn new(transform: Transform, viewport: Viewport) -> Self {
        Self {
            transform,
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// A shape-local point in device space.
    pub fn point(&self, item: &GraphicItem, point: Point) -> Point {
        self.viewport.to_device(self.transform.apply(item, point))
    }

    pub fn points(&self, item: &GraphicItem, points: &[Point]) -> Vec<Point> {
        points.iter().map(|point| self.point(item, *point)).collect()
    }

    /// The device-space direction of the shape's local X axis, in degrees.
    ///
    /// Positive angles turn clockwise on screen, as SVG `rotate` expects.
    pub fn angle(&self, item: &GraphicItem) -> f64 {
        let start = self.point(item, Point::default());
        let end = self.point(item, Point::new(1.0, 0.0));
        let direction = end.sub_point(start);
        direction.y().atan2(direction.x()).to_degrees()
    }

    /// Device length of one unit along the shape's local X axis.
    pub fn scale(&self, item: &GraphicItem) -> f64 {
        let start = self.point(item, Point::default());
        let end = self.point(item, Point::new(1.0, 0.0));
        let direction = end.sub_point(start);
        direction.x().hypot(direction.y())
    }

    /// `true` when the local X axis of the shape is drawn mirrored.
    pub fn is_mirrored(&self, item: &GraphicItem) -> bool {
        let origin = self.point(item, Point::default());
        let x = self.point(item, Point::new(1.0, 0.0)).sub_point(origin);
        let y = self.point(item, Point::new(0.0, 1.0)).sub_point(origin);
        // Device space flips Y, so an unmirrored shape has a negative cross product.
        x.x() * y.y() - x.y() * y.x() > 0.0
    }
}

/// `true` if `degrees` is a whole number of quarter turns.
pub fn is_quarter_turn(degrees: f64) -> bool {
    let turns = degrees / 90.0;
    (turns - turns.round()).abs() < 1e-9
}
