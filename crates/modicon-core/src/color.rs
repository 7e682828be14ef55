//! Color handling for Modicon icons
//!
//! Modelica annotations describe colors as integer RGB triples. This module
//! provides the [`Color`] type holding such a triple, formatted for SVG as
//! `rgb(r,g,b)`. CSS color strings (used by configuration) are parsed through
//! the `DynamicColor` type from the color crate.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from its red, green and blue channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a new `Color` from a CSS color string
    /// such as "#ff0000", "rgb(255, 0, 0)" or "red".
    ///
    /// Any alpha component is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use modicon_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red, Color::rgb(255, 0, 0));
    /// assert_eq!(Color::new("blue").unwrap().to_string(), "rgb(0,0,255)");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let color = DynamicColor::from_str(color_str)
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::rgb(rgba.r, rgba.g, rgba.b))
    }

    /// Create a color from annotation channel values.
    ///
    /// Returns `None` when any channel is negative, which is how the
    /// annotation producer marks an unset color (`{-1,-1,-1}`). Channels above
    /// 255 saturate.
    pub fn from_channels(channels: [f64; 3]) -> Option<Self> {
        if channels.iter().any(|c| *c < 0.0 || c.is_nan()) {
            return None;
        }
        let [red, green, blue] = channels.map(|c| c.min(255.0) as u8);
        Some(Self::rgb(red, green, blue))
    }

    pub fn red(self) -> u8 {
        self.red
    }

    pub fn green(self) -> u8 {
        self.green
    }

    pub fn blue(self) -> u8 {
        self.blue
    }

    /// Interpolate linearly from `self` to `stop`.
    ///
    /// The result always starts with `self` and ends with `stop`, with
    /// `mid_points` evenly spaced colors in between (`mid_points + 2` colors in
    /// total). Intermediate channels are truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use modicon_core::color::Color;
    ///
    /// let ramp = Color::BLACK.gradient(Color::rgb(10, 20, 30), 1);
    /// assert_eq!(ramp, vec![Color::BLACK, Color::rgb(5, 10, 15), Color::rgb(10, 20, 30)]);
    /// ```
    pub fn gradient(self, stop: Color, mid_points: usize) -> Vec<Color> {
        let steps = (mid_points + 1) as f64;
        let channel = |start: u8, end: u8, i: usize| {
            let delta = (f64::from(end) - f64::from(start)) / steps;
            (f64::from(start) + i as f64 * delta) as u8
        };

        let mut colors = Vec::with_capacity(mid_points + 2);
        colors.push(self);
        colors.extend((1..=mid_points).map(|i| {
            Color::rgb(
                channel(self.red, stop.red, i),
                channel(self.green, stop.green, i),
                channel(self.blue, stop.blue, i),
            )
        }));
        colors.push(stop);
        colors
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
