//! The model compiler as seen by the icon pipeline.
//!
//! Everything Modicon knows about a Modelica class comes through
//! [`ModelSource`]: the raw annotation text, the inheritance list and the
//! component records. Answers are the compiler's own textual output; they
//! are parsed here, not by the source.
//!
//! [`ModelCatalog`] is an in-memory source that can be deserialized from a
//! file, which is how the command line tool and the tests provide models.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

use modicon_parser::UriResolver;

/// A failed query against a [`ModelSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("unknown class `{0}`")]
    UnknownClass(String),

    #[error("class `{class_name}` has no base class {index} (it has {count})")]
    NoSuchBaseClass {
        class_name: String,
        index: usize,
        count: usize,
    },

    #[error("model source unavailable: {0}")]
    Unavailable(String),
}

/// Queries the icon pipeline makes against a Modelica compiler.
///
/// Annotation and component answers are returned verbatim, in the textual
/// form the compiler prints them.
pub trait ModelSource: UriResolver {
    /// The `Icon` annotation of a class, e.g.
    /// `{-100,-100,100,100,true,0.1,2,2,{Rectangle(...)}}`.
    fn icon_annotation(&self, class_name: &str) -> Result<String, SourceError>;

    /// Number of direct base classes.
    fn inheritance_count(&self, class_name: &str) -> Result<usize, SourceError>;

    /// The `n`th direct base class, counting from 1.
    fn nth_inherited_class(&self, class_name: &str, n: usize) -> Result<String, SourceError>;

    /// The component list, `{{"Type","name","comment",...}, ...}`.
    fn components(&self, class_name: &str) -> Result<String, SourceError>;

    /// One annotation list per component, in component order.
    fn component_annotations(&self, class_name: &str) -> Result<String, SourceError>;

    fn is_connector(&self, class_name: &str) -> Result<bool, SourceError>;

    /// The directory of the file declaring the class, used to find bitmaps
    /// given by relative file names.
    fn class_directory(&self, class_name: &str) -> Result<Option<PathBuf>, SourceError>;

    /// The class restriction keyword (`model`, `package`, `connector`, ...).
    fn class_restriction(&self, class_name: &str) -> Result<String, SourceError> {
        Ok(if self.is_connector(class_name)? {
            "connector".to_string()
        } else {
            "model".to_string()
        })
    }
}

/// One class of a [`ModelCatalog`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogClass {
    icon: String,
    extends: Vec<String>,
    components: String,
    component_annotations: String,
    connector: bool,
    restriction: Option<String>,
    directory: Option<PathBuf>,
}

impl CatalogClass {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            ..Self::default()
        }
    }

    pub fn with_extends(mut self, extends: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extends = extends.into_iter().map(Into::into).collect();
        self
    }

    /// Set the component list and the matching component annotations.
    pub fn with_components(
        mut self,
        components: impl Into<String>,
        annotations: impl Into<String>,
    ) -> Self {
        self.components = components.into();
        self.component_annotations = annotations.into();
        self
    }

    pub fn with_connector(mut self, connector: bool) -> Self {
        self.connector = connector;
        self
    }

    /// Set the restriction keyword reported for the class.
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.restriction = Some(restriction.into());
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// An in-memory [`ModelSource`].
///
/// Classes are keyed by their full name. Relative class directories and
/// resource paths are resolved against the catalog root.
///
/// # Example
///
/// ```
/// use modicon::{CatalogClass, ModelCatalog, ModelSource};
///
/// let catalog = ModelCatalog::new()
///     .with_class("Lib.Base", CatalogClass::new("{}"))
///     .with_class("Lib.Derived", CatalogClass::new("{}").with_extends(["Lib.Base"]));
///
/// assert_eq!(catalog.inheritance_count("Lib.Derived").unwrap(), 1);
/// assert_eq!(catalog.nth_inherited_class("Lib.Derived", 1).unwrap(), "Lib.Base");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    classes: BTreeMap<String, CatalogClass>,

    /// Resource URI to file path.
    #[serde(default)]
    resources: BTreeMap<String, PathBuf>,

    #[serde(skip)]
    root: Option<PathBuf>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory that relative paths in the catalog are resolved against.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>, class: CatalogClass) -> Self {
        self.classes.insert(class_name.into(), class);
        self
    }

    pub fn with_resource(mut self, uri: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.resources.insert(uri.into(), path.into());
        self
    }

    /// Names of every class, sorted.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    fn class(&self, class_name: &str) -> Result<&CatalogClass, SourceError> {
        self.classes
            .get(class_name)
            .ok_or_else(|| SourceError::UnknownClass(class_name.to_string()))
    }

    fn rooted(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// The directory of a top-level library, for `modelica://` URIs.
    fn library_directory(&self, library: &str) -> Option<PathBuf> {
        let class = self.classes.get(library)?;
        class.directory.as_deref().map(|dir| self.rooted(dir))
    }
}

impl UriResolver for ModelCatalog {
    fn uri_to_filename(&self, uri: &str) -> Option<PathBuf> {
        if let Some(path) = self.resources.get(uri) {
            trace!(uri; "Resource listed in catalog");
            return Some(self.rooted(path));
        }
        if let Some(rest) = uri.strip_prefix("modelica://") {
            let (library, relative) = rest.split_once('/')?;
            return self
                .library_directory(library)
                .map(|dir| dir.join(relative));
        }
        if let Some(path) = uri.strip_prefix("file://") {
            return Some(self.rooted(Path::new(path)));
        }
        debug!(uri; "Cannot resolve resource URI");
        None
    }
}

impl ModelSource for ModelCatalog {
    fn icon_annotation(&self, class_name: &str) -> Result<String, SourceError> {
        Ok(self.class(class_name)?.icon.clone())
    }

    fn inheritance_count(&self, class_name: &str) -> Result<usize, SourceError> {
        Ok(self.class(class_name)?.extends.len())
    }

    fn nth_inherited_class(&self, class_name: &str, n: usize) -> Result<String, SourceError> {
        let extends = &self.class(class_name)?.extends;
        n.checked_sub(1)
            .and_then(|index| extends.get(index))
            .cloned()
            .ok_or_else(|| SourceError::NoSuchBaseClass {
                class_name: class_name.to_string(),
                index: n,
                count: extends.len(),
            })
    }

    fn components(&self, class_name: &str) -> Result<String, SourceError> {
        Ok(self.class(class_name)?.components.clone())
    }

    fn component_annotations(&self, class_name: &str) -> Result<String, SourceError> {
        Ok(self.class(class_name)?.component_annotations.clone())
    }

    fn is_connector(&self, class_name: &str) -> Result<bool, SourceError> {
        // Built-in types such as `Real` are never listed.
        Ok(self
            .classes
            .get(class_name)
            .is_some_and(|class| class.connector))
    }

    fn class_directory(&self, class_name: &str) -> Result<Option<PathBuf>, SourceError> {
        Ok(self
            .class(class_name)?
            .directory
            .as_deref()
            .map(|dir| self.rooted(dir)))
    }

    fn class_restriction(&self, class_name: &str) -> Result<String, SourceError> {
        let class = self.class(class_name)?;
        Ok(match &class.restriction {
            Some(restriction) => restriction.clone(),
            None if class.connector => "connector".to_string(),
            None => "model".to_string(),
        })
    }
}
