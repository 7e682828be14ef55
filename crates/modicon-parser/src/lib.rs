//! # Modicon Parser
//!
//! Reads the textual graphical annotations a Modelica compiler reports for a
//! class and turns them into the structured model of
//! [`modicon_core::graphics`].
//!
//! ## Pipeline
//!
//! 1. **Split** - [`splitter`] cuts brace-delimited, quote-aware
//!    expressions into top-level fields, remembering where each came from.
//! 2. **Read values** - numbers, points, extents and colors are read field
//!    by field.
//! 3. **Build shapes** - each constructor's positional arguments become a
//!    [`GraphicsObject`](modicon_core::graphics::GraphicsObject).
//!
//! Nothing here fails hard. Each entry point returns a
//! [`Recovered`](error::Recovered) value carrying the best reading of the
//! input plus every diagnostic raised on the way.
//!
//! ## Usage
//!
//! ```
//! use modicon_parser::{ParseContext, parse_icon};
//!
//! let annotation = "{-100,-100,100,100,true,0.1,2,2,{Ellipse(true, {0,0}, 0, \
//!     {0,0,0}, {255,0,0}, LinePattern.Solid, FillPattern.Solid, 0.25, \
//!     {{-50,-50},{50,50}}, 0, 360)}}";
//!
//! let icon = parse_icon(annotation, &ParseContext::new());
//! assert!(icon.is_clean());
//! assert_eq!(icon.value().graphics().len(), 1);
//! ```

pub mod error;
pub mod splitter;
pub mod value;

mod annotation;
mod resolve;
mod shape;
mod span;

pub use annotation::{
    ComponentInfo, Placement, parse_components, parse_icon, parse_placement,
    split_component_annotations,
};
pub use resolve::{ParseContext, UriResolver};
pub use shape::parse_shape;
pub use span::Span;
