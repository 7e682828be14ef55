//! Inheritance composition.
//!
//! A class's icon is drawn on top of the icons of everything it extends.
//! [`base_classes`] walks the inheritance graph depth-first, each class
//! once, and [`compose`] parses every icon in render order: the deepest
//! ancestors first, the class itself last.

use std::path::PathBuf;

use indexmap::IndexSet;
use log::{debug, info, trace};

use modicon_core::graphics::{ClassGraphics, CoordinateSystem, GraphicsObject};
use modicon_parser::{ParseContext, error::Diagnostic, parse_icon};

use crate::source::{ModelSource, SourceError};

/// One class's own contribution to a composed icon.
#[derive(Debug, Clone)]
pub struct ClassLayer {
    class_name: String,
    annotation: String,
    graphics: ClassGraphics,
    diagnostics: Vec<Diagnostic>,
}

impl ClassLayer {
    /// Parse `annotation` as the icon of `class_name`.
    pub fn parse(
        class_name: impl Into<String>,
        annotation: impl Into<String>,
        ctx: &ParseContext<'_>,
    ) -> Self {
        let class_name = class_name.into();
        let annotation = annotation.into();
        let (graphics, diagnostics) = parse_icon(&annotation, ctx).into_parts();
        debug!(
            class = class_name,
            shapes = graphics.graphics().len(),
            diagnostics = diagnostics.len();
            "Parsed class icon"
        );
        Self {
            class_name,
            annotation,
            graphics,
            diagnostics,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The annotation text the diagnostics' spans refer to.
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn graphics(&self) -> &ClassGraphics {
        &self.graphics
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }
}

/// The icon of a class together with everything it inherits.
#[derive(Debug, Clone, Default)]
pub struct ComposedIcon {
    layers: Vec<ClassLayer>,
}

impl ComposedIcon {
    /// Build from layers already in render order.
    pub fn from_layers(layers: Vec<ClassLayer>) -> Self {
        Self { layers }
    }

    /// Layers in render order.
    pub fn layers(&self) -> &[ClassLayer] {
        &self.layers
    }

    /// The composed class itself, drawn last.
    pub fn class_layer(&self) -> Option<&ClassLayer> {
        self.layers.last()
    }

    /// The coordinate system of the class itself.
    ///
    /// This is the extent a placement maps from. Inherited layers keep
    /// their own coordinates; they share the class's drawing area.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.class_layer()
            .map(|layer| layer.graphics().coordinate_system().clone())
            .unwrap_or_default()
    }

    /// Every graphics object, bottom to top.
    pub fn graphics(&self) -> impl Iterator<Item = &GraphicsObject> {
        self.layers
            .iter()
            .flat_map(|layer| layer.graphics().graphics())
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.graphics().is_empty())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.layers.iter().flat_map(|layer| layer.diagnostics())
    }

    pub fn has_errors(&self) -> bool {
        self.layers.iter().any(ClassLayer::has_errors)
    }
}

/// A class whose base classes are being visited.
struct Frame {
    class_name: String,
    next: usize,
    count: usize,
}

/// Every class `class_name` inherits from, directly or not, in discovery
/// order.
///
/// For each class, its bases are visited in declaration order and each
/// unseen base is descended into before the next sibling. A class reachable
/// through several paths, or through a cycle, is listed once; the root
/// itself is never listed.
pub fn base_classes<S: ModelSource>(
    source: &S,
    class_name: &str,
) -> Result<Vec<String>, SourceError> {
    let mut visited = IndexSet::new();
    visited.insert(class_name.to_string());

    let mut stack = vec![Frame {
        class_name: class_name.to_string(),
        next: 1,
        count: source.inheritance_count(class_name)?,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.next > frame.count {
            stack.pop();
            continue;
        }
        let index = frame.next;
        frame.next += 1;

        let base = source.nth_inherited_class(&frame.class_name, index)?;
        if base.is_empty() || !visited.insert(base.clone()) {
            trace!(class = frame.class_name, base; "Skipping base class");
            continue;
        }
        let count = source.inheritance_count(&base)?;
        stack.push(Frame {
            class_name: base,
            next: 1,
            count,
        });
    }

    Ok(visited.into_iter().skip(1).collect())
}

/// The classes whose icons make up `class_name`'s icon, bottom to top.
pub fn render_order<S: ModelSource>(
    source: &S,
    class_name: &str,
) -> Result<Vec<String>, SourceError> {
    let mut order = base_classes(source, class_name)?;
    order.reverse();
    order.push(class_name.to_string());
    Ok(order)
}

/// Parse the icons of `class_name` and its ancestors.
///
/// Each class is parsed on its own, with bitmaps resolved against that
/// class's directory and the source's URI mapping.
pub fn compose<S: ModelSource>(source: &S, class_name: &str) -> Result<ComposedIcon, SourceError> {
    let order = render_order(source, class_name)?;
    info!(class = class_name, layers = order.len(); "Composing icon");

    let mut layers = Vec::with_capacity(order.len());
    for name in order {
        let annotation = source.icon_annotation(&name)?;
        let directory: Option<PathBuf> = source.class_directory(&name)?;

        let mut ctx = ParseContext::new().with_resolver(source);
        if let Some(dir) = directory.as_deref() {
            ctx = ctx.with_base_dir(dir);
        }
        layers.push(ClassLayer::parse(name, annotation, &ctx));
    }

    Ok(ComposedIcon::from_layers(layers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CatalogClass, ModelCatalog};

    fn class(extends: &[&str]) -> CatalogClass {
        CatalogClass::new("").with_extends(extends.iter().copied())
    }

    #[test]
    fn test_render_order_deepest_first() {
        // C extends A; A extends B.
        let catalog = ModelCatalog::new()
            .with_class("C", class(&["A"]))
            .with_class("A", class(&["B"]))
            .with_class("B", class(&[]));

        assert_eq!(base_classes(&catalog, "C").unwrap(), ["A", "B"]);
        assert_eq!(render_order(&catalog, "C").unwrap(), ["B", "A", "C"]);
    }

    #[test]
    fn test_diamond_visits_shared_base_once() {
        let catalog = ModelCatalog::new()
            .with_class("D", class(&["L", "R"]))
            .with_class("L", class(&["Top"]))
            .with_class("R", class(&["Top", "Extra"]))
            .with_class("Top", class(&[]))
            .with_class("Extra", class(&[]));

        assert_eq!(
            base_classes(&catalog, "D").unwrap(),
            ["L", "Top", "R", "Extra"]
        );
        assert_eq!(
            render_order(&catalog, "D").unwrap(),
            ["Extra", "R", "Top", "L", "D"]
        );
    }

    #[test]
    fn test_cycles_terminate() {
        let catalog = ModelCatalog::new()
            .with_class("A", class(&["B"]))
            .with_class("B", class(&["A", "B", ""]));

        assert_eq!(base_classes(&catalog, "A").unwrap(), ["B"]);
    }

    #[test]
    fn test_unknown_base_is_an_error() {
        let catalog = ModelCatalog::new().with_class("A", class(&["Missing"]));
        assert_eq!(
            base_classes(&catalog, "A"),
            Err(SourceError::UnknownClass("Missing".to_string()))
        );
    }

    #[test]
    fn test_compose_uses_class_coordinate_system() {
        let catalog = ModelCatalog::new()
            .with_class(
                "Base",
                CatalogClass::new(
                    "{-100,-100,100,100,true,0.1,2,2,{Rectangle(true, {0,0}, 0, {0,0,0}, \
                     {0,0,0}, LinePattern.Solid, FillPattern.None, 0.25, BorderPattern.None, \
                     {{-10,-10},{10,10}}, 0)}}",
                ),
            )
            .with_class(
                "Derived",
                CatalogClass::new("{-50,-20,50,20,true,0.1,2,2,{}}").with_extends(["Base"]),
            );

        let icon = compose(&catalog, "Derived").unwrap();
        let names: Vec<_> = icon.layers().iter().map(ClassLayer::class_name).collect();
        assert_eq!(names, ["Base", "Derived"]);
        assert_eq!(icon.graphics().count(), 1);
        assert_eq!(icon.coordinate_system().extent().width(), 100.0);
        assert!(!icon.has_errors());
    }
}
