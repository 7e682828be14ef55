use std::{fmt, fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use modicon_core::{color::Color, graphics::Transformation};

use crate::{
    compose::ComposedIcon,
    config::{RenderConfig, StyleConfig},
    export,
    icon::SvgDescriptor,
    transform::{Projection, Transform, Viewport},
};

mod markers;
mod shapes;
mod text;

/// Builder for [`Svg`] exporters.
///
/// # Example
///
/// ```
/// use modicon::{config::AppConfig, export::svg::SvgBuilder};
///
/// let config = AppConfig::default();
/// let svg = SvgBuilder::new("Resistor.svg")
///     .with_style(config.style())
///     .with_render(config.render())
///     .build()
///     .expect("valid style");
/// ```
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    file_name: String,
    style: StyleConfig,
    render: RenderConfig,
    placement: Option<Transformation>,
}

impl SvgBuilder {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            style: StyleConfig::default(),
            render: RenderConfig::default(),
            placement: None,
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn with_render(mut self, render: &RenderConfig) -> Self {
        self.render = render.clone();
        self
    }

    /// Draw the icon as placed inside a parent drawing.
    pub fn with_placement(mut self, placement: Option<Transformation>) -> Self {
        self.placement = placement;
        self
    }

    /// Build the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the configured background color
    /// is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let background = self
            .style
            .background_color()
            .map_err(export::Error::Render)?;

        Ok(Svg {
            file_name: self.file_name,
            background,
            default_font: self.render.default_font().to_string(),
            frame: self.render.frame_coordinate_system(),
            placement: self.placement,
        })
    }
}

/// SVG exporter for composed icons.
#[derive(Debug)]
pub struct Svg {
    file_name: String,
    background: Option<Color>,
    default_font: String,
    frame: bool,
    placement: Option<Transformation>,
}

/// An icon rendered to an in-memory SVG document.
#[derive(Debug)]
pub struct RenderedSvg {
    document: Document,
    width: f64,
    height: f64,
}

impl RenderedSvg {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl fmt::Display for RenderedSvg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)
    }
}

/// Hands out element ids, unique within one render.
#[derive(Debug, Default)]
struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next);
        self.next += 1;
        id
    }
}

/// Per-render state shared by the shape emitters.
struct RenderState {
    projection: Projection,
    ids: IdGenerator,
}

impl Svg {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Render `icon` to an SVG document.
    ///
    /// The drawing is measured first; shapes are then emitted bottom to
    /// top, each preceded by the definitions it references.
    pub fn render_icon(&self, icon: &ComposedIcon) -> RenderedSvg {
        let transform = Transform::new(&icon.coordinate_system()).with_placement(self.placement);
        let viewport = Viewport::fit(&transform, icon.graphics(), self.frame);
        let (width, height) = (viewport.width(), viewport.height());

        let mut document = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(color) = self.background {
            document = document.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color),
            );
        }

        let mut state = RenderState {
            projection: Projection::new(transform, viewport),
            ids: IdGenerator::default(),
        };
        let mut emitted = 0;
        for object in icon.graphics() {
            let output = self.render_object(&mut state, object);
            if output.is_empty() {
                continue;
            }
            emitted += 1;
            document = output.append_to(document);
        }

        debug!(shapes = emitted, width, height; "SVG document rendered");
        RenderedSvg {
            document,
            width,
            height,
        }
    }

    /// Writes an SVG document to the exporter's file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_icon(&mut self, icon: &ComposedIcon) -> Result<SvgDescriptor, export::Error> {
        let rendered = self.render_icon(icon);
        self.write_document(rendered.document())?;
        Ok(SvgDescriptor::new(
            self.file_name.clone(),
            rendered.width(),
            rendered.height(),
        ))
    }
}
