//! Geometric primitives for icon coordinates.
//!
//! Annotation coordinates live in a Cartesian system with the origin at the
//! center of the icon and Y increasing upward. Conversion to SVG device space
//! happens in the renderer; the types here are agnostic of orientation.
//!
//! - [`Point`]: a 2D position with basic vector math
//! - [`Extent`]: two diagonal corners exactly as written in an annotation
//! - [`Bounds`]: a normalized axis-aligned bounding box

use serde::Serialize;

/// A 2D point in annotation coordinate space.
///
/// # Examples
///
/// ```
/// # use modicon_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Rotate counter-clockwise about the coordinate origin by `degrees`.
    ///
    /// ```
    /// # use modicon_core::geometry::Point;
    /// let p = Point::new(1.0, 0.0).rotate(90.0);
    /// assert!((p.x() - 0.0).abs() < 1e-12);
    /// assert!((p.y() - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotate(self, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate counter-clockwise about `center` by `degrees`.
    pub fn rotate_about(self, center: Point, degrees: f64) -> Self {
        self.sub_point(center).rotate(degrees).add_point(center)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Two diagonal corners of a box, in the order they were written.
///
/// Annotations may give the corners in either diagonal order; a reversed order
/// signals a mirrored axis for placements. Use [`Extent::bounds`] for the
/// normalized box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Extent {
    first: Point,
    second: Point,
}

impl Extent {
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    /// The default Modelica extent `{{-100,-100},{100,100}}`.
    pub fn unit_icon() -> Self {
        Self::new(Point::new(-100.0, -100.0), Point::new(100.0, 100.0))
    }

    /// Smallest extent enclosing all `points`, or `None` if there are none.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        Bounds::from_points(points).map(|bounds| Self::new(bounds.min(), bounds.max()))
    }

    pub fn first(self) -> Point {
        self.first
    }

    pub fn second(self) -> Point {
        self.second
    }

    /// `true` when the second corner lies left of the first.
    pub fn is_flipped_x(self) -> bool {
        self.second.x < self.first.x
    }

    /// `true` when the second corner lies below the first.
    pub fn is_flipped_y(self) -> bool {
        self.second.y < self.first.y
    }

    pub fn bounds(self) -> Bounds {
        Bounds::from_corners(self.first, self.second)
    }

    pub fn width(self) -> f64 {
        (self.second.x - self.first.x).abs()
    }

    pub fn height(self) -> f64 {
        (self.second.y - self.first.y).abs()
    }

    pub fn center(self) -> Point {
        self.first.midpoint(self.second)
    }

    /// All four corners, starting at `first` and going around the box.
    pub fn corners(self) -> [Point; 4] {
        [
            self.first,
            Point::new(self.second.x, self.first.y),
            self.second,
            Point::new(self.first.x, self.second.y),
        ]
    }
}

/// A normalized axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Create bounds from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Bounds of all `points`, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points
            .into_iter()
            .fold(None, |acc: Option<Bounds>, point| {
                Some(match acc {
                    Some(bounds) => bounds.include(point),
                    None => Bounds::from_point(point),
                })
            })
    }

    pub fn min(self) -> Point {
        self.min
    }

    pub fn max(self) -> Point {
        self.max
    }

    pub fn min_x(self) -> f64 {
        self.min.x
    }

    pub fn min_y(self) -> f64 {
        self.min.y
    }

    pub fn max_x(self) -> f64 {
        self.max.x
    }

    pub fn max_y(self) -> f64 {
        self.max.y
    }

    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Grow the bounds so that they contain `point`.
    pub fn include(self, point: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(point.x), self.min.y.min(point.y)),
            max: Point::new(self.max.x.max(point.x), self.max.y.max(point.y)),
        }
    }

    /// Merges this bounds with another, returning the smallest box containing both.
    pub fn merge(&self, other: &Self) -> Self {
        self.include(other.min).include(other.max)
    }
}
