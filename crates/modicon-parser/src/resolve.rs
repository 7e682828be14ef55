//! Resolution of bitmap references into embeddable data URLs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::Engine as _;
use log::{debug, info};

use crate::{
    error::{Diagnostic, ErrorCode, Recovered},
    span::Span,
};

const DATA_URL_PREFIX: &str = "data:image;base64,";

/// Maps resource URIs (`modelica://...`, `file://...`) to local files.
///
/// This is normally backed by the model compiler, which knows where each
/// library lives on disk.
pub trait UriResolver {
    /// The local file a URI refers to, or `None` when it cannot be resolved.
    fn uri_to_filename(&self, uri: &str) -> Option<PathBuf>;
}

/// Everything the parser needs beyond the annotation text itself.
#[derive(Clone, Copy, Default)]
pub struct ParseContext<'a> {
    base_dir: Option<&'a Path>,
    resolver: Option<&'a dyn UriResolver>,
}

impl<'a> ParseContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory of the class declaration, used to resolve relative bitmap
    /// file names.
    pub fn with_base_dir(mut self, base_dir: &'a Path) -> Self {
        self.base_dir = Some(base_dir);
        self
    }

    pub fn with_resolver(mut self, resolver: &'a dyn UriResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn base_dir(&self) -> Option<&'a Path> {
        self.base_dir
    }

    pub fn resolver(&self) -> Option<&'a dyn UriResolver> {
        self.resolver
    }
}

/// Turn a bitmap's `fileName` / `imageSource` pair into an `href`.
///
/// An inline `imageSource` wins and is used as is. Otherwise the file is
/// looked up through the resolver, then relative to the base directory, and
/// embedded as base64. When nothing can be read the raw file name is kept
/// and a warning is returned.
pub fn resolve_bitmap(
    file_name: &str,
    image_source: Option<&str>,
    span: Span,
    ctx: &ParseContext<'_>,
) -> Recovered<String> {
    if let Some(source) = image_source.filter(|source| !source.is_empty()) {
        debug!(bytes = source.len(); "Using inline bitmap data");
        return Recovered::clean(format!("{DATA_URL_PREFIX}{source}"));
    }

    let mut diagnostics = Vec::new();
    for path in candidates(file_name, ctx) {
        if !path.is_file() {
            continue;
        }
        match fs::read(&path) {
            Ok(bytes) => {
                info!(file = path.display().to_string(); "Embedding bitmap");
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                return Recovered::new(format!("{DATA_URL_PREFIX}{encoded}"), diagnostics);
            }
            Err(err) => {
                let message = format!("could not read bitmap file `{}`: {err}", path.display());
                diagnostics.push(
                    Diagnostic::warning(message)
                        .with_code(ErrorCode::E201)
                        .with_label(span, "referenced here"),
                );
            }
        }
    }

    diagnostics.push(
        Diagnostic::warning(format!("could not find bitmap file `{file_name}`"))
            .with_code(ErrorCode::E200)
            .with_label(span, "referenced here")
            .with_help("the raw file name is kept as the image reference"),
    );
    Recovered::new(file_name.to_string(), diagnostics)
}

fn candidates(file_name: &str, ctx: &ParseContext<'_>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if file_name.is_empty() {
        return paths;
    }
    if let Some(path) = ctx.resolver().and_then(|r| r.uri_to_filename(file_name)) {
        paths.push(path);
    }
    if let Some((base_dir, relative)) = ctx.base_dir().zip(relative_path(file_name)) {
        paths.push(base_dir.join(relative));
    }
    paths
}

/// The part of a resource URI that is joined with the class directory.
///
/// `modelica://Library/path` loses its library segment and `file://` its
/// scheme. Anything else is taken as a relative path.
fn relative_path(file_name: &str) -> Option<&str> {
    if let Some(rest) = file_name.strip_prefix("modelica://") {
        return rest.split_once('/').map(|(_, relative)| relative);
    }
    Some(file_name.strip_prefix("file://").unwrap_or(file_name))
}
