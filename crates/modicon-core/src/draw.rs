//! Visual definitions shared by the renderer.
//!
//! - [`StrokeDefinition`] and the [`apply_stroke!`](crate::apply_stroke!) macro
//!   for line patterns
//! - [`FillDefinition`] for flat, hatched and gradient fills

mod fill;
mod stroke;

pub use fill::{CylinderAxis, FillDefinition, HatchTile, SphereStyle};
pub use stroke::{DASH_SIZE, DOT_SIZE, SPACE_SIZE, StrokeDefinition};
