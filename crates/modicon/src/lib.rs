//! Modicon - Modelica class icons rendered to SVG.
//!
//! A Modelica compiler reports a class's icon as a textual graphical
//! annotation. Modicon parses those annotations, stacks the icons of every
//! class the class extends beneath its own, and renders the result to SVG
//! with the class's coordinate system mapped onto the drawing.
//!
//! The compiler is reached through the [`ModelSource`] trait;
//! [`ModelCatalog`] is an in-memory implementation that can be loaded from
//! TOML.

pub mod compose;
pub mod config;
pub mod export;
pub mod icon;
pub mod source;
pub mod transform;

mod error;
mod naming;

pub use modicon_core::{color, geometry, graphics};

pub use error::ModiconError;
pub use naming::{last_word_after_dot, node_to_file_name};
pub use source::{CatalogClass, ModelCatalog, ModelSource, SourceError};

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};

use modicon_core::graphics::Transformation;
use modicon_parser::error::DiagnosticCollector;

use compose::ComposedIcon;
use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use icon::{
    Connector, IconDescriptor, IconDiagnostic, NodeType, Parameter, PlacementDescriptor,
    SvgDescriptor,
};

/// Builder for composing and rendering class icons.
///
/// # Examples
///
/// ```rust
/// use modicon::{CatalogClass, IconBuilder, ModelCatalog};
///
/// let catalog = ModelCatalog::new().with_class(
///     "Lib.Box",
///     CatalogClass::new("{-100,-100,100,100,true,0.1,2,2,{Rectangle(true, {0,0}, 0, \
///         {0,0,0}, {255,255,255}, LinePattern.Solid, FillPattern.Solid, 0.25, \
///         BorderPattern.None, {{-100,-100},{100,100}}, 0)}}"),
/// );
///
/// let builder = IconBuilder::default();
/// let icon = builder.compose(&catalog, "Lib.Box").expect("known class");
/// let svg = builder.render_svg(&icon).expect("valid style");
/// assert!(svg.contains(r#"viewBox="0 0 200 200""#));
/// ```
#[derive(Debug, Default)]
pub struct IconBuilder {
    config: AppConfig,
    strict: bool,
}

impl IconBuilder {
    /// Create a new icon builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Fail on error diagnostics instead of rendering what could be read.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse the icons of `class_name` and everything it extends.
    ///
    /// # Errors
    ///
    /// Returns [`ModiconError::Source`] if the model source cannot answer,
    /// and, in strict mode, [`ModiconError::Parse`] for the first layer with
    /// error diagnostics.
    pub fn compose<S: ModelSource>(
        &self,
        source: &S,
        class_name: &str,
    ) -> Result<ComposedIcon, ModiconError> {
        let icon = compose::compose(source, class_name)?;

        if self.strict {
            for layer in icon.layers().iter().filter(|layer| layer.has_errors()) {
                DiagnosticCollector::from(layer.diagnostics().to_vec())
                    .finish()
                    .map_err(|err| ModiconError::new_parse_error(err, layer.annotation()))?;
            }
        }

        Ok(icon)
    }

    /// Render a composed icon to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ModiconError::Export`] if the configured style is invalid.
    pub fn render_svg(&self, icon: &ComposedIcon) -> Result<String, ModiconError> {
        self.render(icon, None)
    }

    /// Render a composed icon as placed inside a parent drawing.
    ///
    /// # Errors
    ///
    /// Returns [`ModiconError::Export`] if the configured style is invalid.
    pub fn render_placed(
        &self,
        icon: &ComposedIcon,
        placement: Transformation,
    ) -> Result<String, ModiconError> {
        self.render(icon, Some(placement))
    }

    fn render(
        &self,
        icon: &ComposedIcon,
        placement: Option<Transformation>,
    ) -> Result<String, ModiconError> {
        let file_name = icon
            .class_layer()
            .map(|layer| format!("{}.svg", node_to_file_name(layer.class_name())))
            .unwrap_or_default();
        let svg = SvgBuilder::new(file_name)
            .with_style(self.config.style())
            .with_render(self.config.render())
            .with_placement(placement)
            .build()?;
        Ok(svg.render_icon(icon).to_string())
    }

    /// Compose, render and describe `class_name`, writing its SVG files
    /// into `out_dir`.
    ///
    /// # Errors
    ///
    /// See [`IconBuilder::compose`] and [`IconBuilder::assemble`].
    pub fn build_icon<S: ModelSource>(
        &self,
        source: &S,
        class_name: &str,
        out_dir: &Path,
    ) -> Result<IconDescriptor, ModiconError> {
        let icon = self.compose(source, class_name)?;
        self.assemble(source, &icon, out_dir)
    }

    /// Write an already composed icon and the icons of its connectors into
    /// `out_dir`, and describe them.
    ///
    /// Components are listed for every layer of the icon, bottom to top.
    /// A connector class used several times is rendered once.
    ///
    /// # Errors
    ///
    /// Returns [`ModiconError::Source`] if the model source cannot answer,
    /// and [`ModiconError::Export`] if an SVG file cannot be written.
    pub fn assemble<S: ModelSource>(
        &self,
        source: &S,
        icon: &ComposedIcon,
        out_dir: &Path,
    ) -> Result<IconDescriptor, ModiconError> {
        let Some(class_name) = icon.class_layer().map(|layer| layer.class_name()) else {
            return Err(ModiconError::Export(
                "cannot describe an icon without layers".into(),
            ));
        };
        info!(class = class_name; "Assembling icon");
        let svg = self.export(icon, class_name, out_dir)?;

        let mut rendered: IndexMap<String, SvgDescriptor> = IndexMap::new();
        let mut connectors = Vec::new();
        let mut parameters = Vec::new();
        for layer in icon.layers() {
            for (component, placement) in icon::class_components(source, layer.class_name())? {
                if source.is_connector(component.class_name())? {
                    let svg = if self.config.render().connectors() {
                        Some(self.connector_svg(
                            source,
                            component.class_name(),
                            out_dir,
                            &mut rendered,
                        )?)
                    } else {
                        None
                    };
                    connectors.push(Connector::new(
                        &component,
                        svg,
                        placement.map(PlacementDescriptor::from),
                    ));
                } else if component.is_parameter() {
                    parameters.push(Parameter::from(&component));
                }
            }
        }

        let diagnostics = icon
            .layers()
            .iter()
            .flat_map(|layer| {
                layer
                    .diagnostics()
                    .iter()
                    .map(|diagnostic| IconDiagnostic::new(layer.class_name(), diagnostic))
            })
            .collect::<Vec<_>>();
        if !diagnostics.is_empty() {
            warn!(class = class_name, diagnostics = diagnostics.len(); "Icon rendered with diagnostics");
        }

        let node_type = NodeType::from_restriction(&source.class_restriction(class_name)?);
        debug!(
            class = class_name,
            connectors = connectors.len(),
            parameters = parameters.len();
            "Icon assembled"
        );
        Ok(IconDescriptor::new(class_name, node_type, svg)
            .with_connectors(connectors)
            .with_parameters(parameters)
            .with_diagnostics(diagnostics))
    }

    /// The icon of a connector class, rendered on first use.
    fn connector_svg<S: ModelSource>(
        &self,
        source: &S,
        class_name: &str,
        out_dir: &Path,
        rendered: &mut IndexMap<String, SvgDescriptor>,
    ) -> Result<SvgDescriptor, ModiconError> {
        if let Some(svg) = rendered.get(class_name) {
            return Ok(svg.clone());
        }
        let icon = self.compose(source, class_name)?;
        let svg = self.export(&icon, class_name, out_dir)?;
        rendered.insert(class_name.to_string(), svg.clone());
        Ok(svg)
    }

    fn export(
        &self,
        icon: &ComposedIcon,
        class_name: &str,
        out_dir: &Path,
    ) -> Result<SvgDescriptor, ModiconError> {
        let path = out_dir.join(format!("{}.svg", node_to_file_name(class_name)));
        let mut exporter = SvgBuilder::new(path.to_string_lossy())
            .with_style(self.config.style())
            .with_render(self.config.render())
            .build()?;
        Ok(exporter.export_icon(icon)?)
    }
}
