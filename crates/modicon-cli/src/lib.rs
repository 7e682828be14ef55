//! CLI logic for the Modicon icon renderer.
//!
//! Reads a model catalog, renders the requested classes and their
//! connectors to SVG files, and writes an `icons.json` index describing
//! them.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{info, warn};

use modicon::{IconBuilder, ModiconError, compose::ComposedIcon};

/// Name of the descriptor index written next to the SVG files.
pub const INDEX_FILE: &str = "icons.json";

/// Run the Modicon CLI application
///
/// Every class named in `args` is composed with its base classes,
/// rendered into the output directory together with its connectors, and
/// described in the index file.
///
/// # Errors
///
/// Returns `ModiconError` for:
/// - File I/O errors
/// - Configuration or catalog loading errors
/// - Unknown classes
/// - Annotation errors in strict mode
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ModiconError> {
    info!(
        catalog_path = args.catalog,
        output_dir = args.output,
        classes = args.classes.len();
        "Rendering icons"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let catalog = config::load_catalog(&args.catalog)?;

    let out_dir = Path::new(&args.output);
    fs::create_dir_all(out_dir)?;

    let builder = IconBuilder::new(app_config).with_strict(args.strict);
    let mut descriptors = Vec::with_capacity(args.classes.len());
    for class_name in &args.classes {
        let icon = builder.compose(&catalog, class_name)?;
        report_diagnostics(&icon);
        descriptors.push(builder.assemble(&catalog, &icon, out_dir)?);
    }

    let index = out_dir.join(INDEX_FILE);
    fs::write(&index, serde_json::to_string_pretty(&descriptors)?)?;

    info!(index_file = index.display().to_string(); "Icons exported successfully");

    Ok(())
}

/// Log every diagnostic raised while parsing `icon`, against its annotation.
fn report_diagnostics(icon: &ComposedIcon) {
    for layer in icon.layers() {
        for diag in layer.diagnostics() {
            match error_adapter::render_diagnostic(diag, layer.annotation()) {
                Ok(report) => warn!(class = layer.class_name(); "{report}"),
                Err(_) => warn!(class = layer.class_name(); "{diag}"),
            }
        }
    }
}
