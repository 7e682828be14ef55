//! Configuration types for Modicon icon rendering.
//!
//! This module provides configuration structures that control how icons are
//! rendered and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining render and style settings.
//! - [`RenderConfig`] - Controls fonts, viewport framing and connector output.
//! - [`StyleConfig`] - Controls visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use modicon::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.render().default_font(), "Verdana");
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use modicon_core::color::Color;

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render and style configurations.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// How icons are turned into SVG documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font family for text that does not name one.
    default_font: String,

    /// Always include the class's coordinate-system extent in the viewport,
    /// even when the shapes cover less of it.
    frame_coordinate_system: bool,

    /// Render an icon for every connector component.
    connectors: bool,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    ///
    /// # Arguments
    ///
    /// * `default_font` - Font family used when a text leaves it empty.
    /// * `frame_coordinate_system` - Whether the viewport always covers the coordinate system.
    /// * `connectors` - Whether connector components get their own icons.
    pub fn new(default_font: impl Into<String>, frame_coordinate_system: bool, connectors: bool) -> Self {
        Self {
            default_font: default_font.into(),
            frame_coordinate_system,
            connectors,
        }
    }

    pub fn default_font(&self) -> &str {
        &self.default_font
    }

    pub fn frame_coordinate_system(&self) -> bool {
        self.frame_coordinate_system
    }

    pub fn connectors(&self) -> bool {
        self.connectors
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_font: "Verdana".to_string(),
            frame_coordinate_system: false,
            connectors: true,
        }
    }
}

/// Visual styling configuration for rendered icons.
///
/// Controls appearance options such as background color. Fields that are
/// not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for icons, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a [`StyleConfig`] with the given background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
