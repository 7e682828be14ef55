//! Command-line argument definitions for the Modicon CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the model catalog and the classes to
//! render, the output directory, the configuration file and the logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the Modicon icon renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the model catalog (TOML)
    #[arg(help = "Path to the model catalog")]
    pub catalog: String,

    /// Fully qualified names of the classes to render
    #[arg(required = true, help = "Classes to render")]
    pub classes: Vec<String>,

    /// Directory receiving the SVG files and the icon index
    #[arg(short, long, default_value = "out")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fail when an icon annotation contains errors
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
