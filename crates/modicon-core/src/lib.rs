//! Modicon Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Modicon parser and
//! renderer. It includes:
//!
//! - **Colors**: RGB colors with CSS parsing support ([`color::Color`])
//! - **Geometry**: Points, extents and bounding boxes ([`geometry`] module)
//! - **Graphics**: The parsed icon model ([`graphics`] module)
//! - **Draw**: Stroke and fill definitions for SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod graphics;
