//! Integration tests for the IconBuilder API.

use std::{cell::Cell, fs, path::PathBuf};

use float_cmp::assert_approx_eq;

use modicon::{
    CatalogClass, IconBuilder, ModelCatalog, ModelSource, ModiconError, SourceError,
    color::Color,
    config::{AppConfig, RenderConfig, StyleConfig},
    geometry::{Extent, Point},
    graphics::Transformation,
    icon::NodeType,
};
use modicon_parser::UriResolver;

const HEADER: &str = "-100,-100,100,100,true,0.1,2,2";

fn icon(shapes: &str) -> String {
    format!("{{{HEADER},{{{shapes}}}}}")
}

fn line(red: u8) -> String {
    format!(
        "Line(true, {{0,0}}, 0, {{{{-{red},0}},{{{red},0}}}}, {{{red},0,0}}, LinePattern.Solid, \
         0.25, {{Arrow.None, Arrow.None}}, 3, Smooth.None)"
    )
}

/// The value of attribute `name` on the first `element` in `svg`.
fn attribute<'a>(svg: &'a str, element: &str, name: &str) -> &'a str {
    let start = svg
        .find(&format!("<{element} "))
        .unwrap_or_else(|| panic!("no <{element}> in {svg}"));
    let tag = &svg[start..start + svg[start..].find('>').unwrap()];
    let key = format!(" {name}=\"");
    let value = &tag[tag.find(&key).unwrap_or_else(|| panic!("no {name} in {tag}")) + key.len()..];
    &value[..value.find('"').unwrap()]
}

#[test]
fn test_render_order_follows_inheritance() {
    // C extends A, A extends B.
    let catalog = ModelCatalog::new()
        .with_class("B", CatalogClass::new(icon(&line(10))))
        .with_class("A", CatalogClass::new(icon(&line(20))).with_extends(["B"]))
        .with_class("C", CatalogClass::new(icon(&line(30))).with_extends(["A"]));

    let builder = IconBuilder::default();
    let composed = builder.compose(&catalog, "C").unwrap();
    let names: Vec<_> = composed.layers().iter().map(|l| l.class_name()).collect();
    assert_eq!(names, ["B", "A", "C"]);

    let svg = builder.render_svg(&composed).unwrap();
    let position = |red: u8| {
        svg.find(&format!("rgb({red},0,0)"))
            .unwrap_or_else(|| panic!("no shape of class with red {red}"))
    };
    assert!(position(10) < position(20));
    assert!(position(20) < position(30));
}

fn numbers(value: &str) -> Vec<f64> {
    value
        .split([' ', ','])
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().unwrap())
        .collect()
}

#[test]
fn test_placed_icon_is_flipped_and_rotated() {
    let catalog = ModelCatalog::new().with_class(
        "Arrow",
        CatalogClass::new(icon(
            "Line(true, {0,0}, 0, {{-100,0},{100,50}}, {0,0,0}, LinePattern.Solid, \
             0.25, {Arrow.None, Arrow.None}, 3, Smooth.None)",
        )),
    );
    let builder = IconBuilder::default();
    let composed = builder.compose(&catalog, "Arrow").unwrap();

    // Reversed x corners mirror the icon; the placement then turns it a
    // quarter counter-clockwise.
    let placement = Transformation::new(
        Point::new(0.0, 0.0),
        Extent::new(Point::new(10.0, -10.0), Point::new(-10.0, 10.0)),
        90.0,
    );
    let svg = builder.render_placed(&composed, placement).unwrap();

    let view_box = numbers(attribute(&svg, "svg", "viewBox"));
    let expected_view_box = [0.0, 0.0, 5.0, 20.0];
    for (actual, expected) in view_box.iter().zip(expected_view_box) {
        assert_approx_eq!(f64, *actual, expected, epsilon = 1e-9);
    }
    assert_eq!(view_box.len(), 4);

    let points = numbers(attribute(&svg, "polyline", "points"));
    let expected_points = [5.0, 0.0, 0.0, 20.0];
    assert_eq!(points.len(), 4);
    for (actual, expected) in points.iter().zip(expected_points) {
        assert_approx_eq!(f64, *actual, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_unplaced_icon_keeps_its_own_coordinates() {
    let catalog = ModelCatalog::new().with_class(
        "Arrow",
        CatalogClass::new(icon(
            "Line(true, {0,0}, 0, {{-100,0},{100,50}}, {0,0,0}, LinePattern.Solid, \
             0.25, {Arrow.None, Arrow.None}, 3, Smooth.None)",
        )),
    );
    let builder = IconBuilder::default();
    let svg = builder
        .render_svg(&builder.compose(&catalog, "Arrow").unwrap())
        .unwrap();

    assert_eq!(attribute(&svg, "svg", "viewBox"), "0 0 200 50");
    assert_eq!(attribute(&svg, "polyline", "points"), "0,50 200,0");
}

#[test]
fn test_unknown_class_is_a_source_error() {
    let result = IconBuilder::default().compose(&ModelCatalog::new(), "Nope");
    assert!(matches!(
        result,
        Err(ModiconError::Source(SourceError::UnknownClass(name))) if name == "Nope"
    ));
}

#[test]
fn test_rectangle_attributes_read_back() {
    let catalog = ModelCatalog::new().with_class(
        "Box",
        CatalogClass::new(icon(
            "Rectangle(true, {0,0}, 0, {12,34,56}, {200,100,0}, LinePattern.Solid, \
             FillPattern.Solid, 0.5, BorderPattern.None, {{60,-40},{-60,40}}, 5)",
        )),
    );
    let config = AppConfig::new(
        RenderConfig::new("Verdana", true, true),
        StyleConfig::default(),
    );
    let builder = IconBuilder::new(config);
    let svg = builder
        .render_svg(&builder.compose(&catalog, "Box").unwrap())
        .unwrap();

    assert_eq!(Color::new(attribute(&svg, "rect", "stroke")).unwrap(), Color::rgb(12, 34, 56));
    assert_eq!(Color::new(attribute(&svg, "rect", "fill")).unwrap(), Color::rgb(200, 100, 0));

    let thickness: f64 = attribute(&svg, "rect", "stroke-width")
        .strip_suffix("mm")
        .unwrap()
        .parse()
        .unwrap();
    assert_approx_eq!(f64, thickness, 0.5);

    let number = |name: &str| -> f64 { attribute(&svg, "rect", name).parse().unwrap() };
    // The viewport is the coordinate system: x from -100, y down from 100.
    assert_approx_eq!(f64, number("x") - 100.0, -60.0);
    assert_approx_eq!(f64, 100.0 - number("y"), 40.0);
    assert_approx_eq!(f64, number("width"), 120.0);
    assert_approx_eq!(f64, number("height"), 80.0);
    assert_approx_eq!(f64, number("rx"), 5.0);
}

/// A catalog that counts URI lookups.
struct CountingSource {
    catalog: ModelCatalog,
    lookups: Cell<usize>,
}

impl CountingSource {
    fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            lookups: Cell::new(0),
        }
    }
}

impl UriResolver for CountingSource {
    fn uri_to_filename(&self, uri: &str) -> Option<PathBuf> {
        self.lookups.set(self.lookups.get() + 1);
        self.catalog.uri_to_filename(uri)
    }
}

impl ModelSource for CountingSource {
    fn icon_annotation(&self, class_name: &str) -> Result<String, SourceError> {
        self.catalog.icon_annotation(class_name)
    }

    fn inheritance_count(&self, class_name: &str) -> Result<usize, SourceError> {
        self.catalog.inheritance_count(class_name)
    }

    fn nth_inherited_class(&self, class_name: &str, n: usize) -> Result<String, SourceError> {
        self.catalog.nth_inherited_class(class_name, n)
    }

    fn components(&self, class_name: &str) -> Result<String, SourceError> {
        self.catalog.components(class_name)
    }

    fn component_annotations(&self, class_name: &str) -> Result<String, SourceError> {
        self.catalog.component_annotations(class_name)
    }

    fn is_connector(&self, class_name: &str) -> Result<bool, SourceError> {
        self.catalog.is_connector(class_name)
    }

    fn class_directory(&self, class_name: &str) -> Result<Option<PathBuf>, SourceError> {
        self.catalog.class_directory(class_name)
    }
}

#[test]
fn test_inline_bitmap_skips_resolution() {
    let source = CountingSource::new(ModelCatalog::new().with_class(
        "Picture",
        CatalogClass::new(icon(
            r#"Bitmap(true, {0,0}, 0, {{-50,-50},{50,50}}, "modelica://Lib/a.png", "iVBORw0KGgo=")"#,
        )),
    ));
    let builder = IconBuilder::default();
    let svg = builder
        .render_svg(&builder.compose(&source, "Picture").unwrap())
        .unwrap();

    assert_eq!(source.lookups.get(), 0);
    assert_eq!(attribute(&svg, "image", "href"), "data:image;base64,iVBORw0KGgo=");
}

#[test]
fn test_unresolved_bitmap_keeps_uri() {
    let source = CountingSource::new(ModelCatalog::new().with_class(
        "Picture",
        CatalogClass::new(icon(
            r#"Bitmap(true, {0,0}, 0, {{-50,-50},{50,50}}, "modelica://Nowhere/missing.png")"#,
        )),
    ));
    let builder = IconBuilder::default();
    let composed = builder.compose(&source, "Picture").unwrap();
    let svg = builder.render_svg(&composed).unwrap();

    assert!(source.lookups.get() >= 1);
    assert_eq!(attribute(&svg, "image", "href"), "modelica://Nowhere/missing.png");
    assert_eq!(attribute(&svg, "image", "width"), "100");
    assert!(!composed.has_errors());
    assert_eq!(composed.diagnostics().count(), 1);
}

#[test]
fn test_bitmap_embedded_from_class_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logo.png"), b"png").unwrap();

    let catalog = ModelCatalog::new().with_class(
        "Picture",
        CatalogClass::new(icon(
            r#"Bitmap(true, {0,0}, 0, {{-50,-50},{50,50}}, "logo.png")"#,
        ))
        .with_directory(dir.path()),
    );
    let builder = IconBuilder::default();
    let svg = builder
        .render_svg(&builder.compose(&catalog, "Picture").unwrap())
        .unwrap();
    assert_eq!(attribute(&svg, "image", "href"), "data:image;base64,cG5n");
}

const COMPONENTS: &str = r#"{{"Lib.Pin", "p", "Positive pin", "public", "false", "false", "false", "false", "", "none", "unspecified"}, {"Lib.Pin", "n", "Negative pin", "public", "false", "false", "false", "false", "", "none", "unspecified"}}"#;
const ANNOTATIONS: &str = "{{Placement(true,-,-,-110,-10,-90,10,-,-,-,-,-,-,)}, {Placement(true,-,-,110,-10,90,10,-,-,-,-,-,-,)}}";
const PARAMETERS: &str = r#"{{"Real", "R", "Resistance", "public", "false", "false", "false", "false", "parameter", "none", "unspecified"}}"#;

fn library() -> ModelCatalog {
    ModelCatalog::new()
        .with_class("Lib", CatalogClass::new("").with_restriction("package"))
        .with_class(
            "Lib.Pin",
            CatalogClass::new(icon(
                "Rectangle(true, {0,0}, 0, {0,0,255}, {0,0,255}, LinePattern.Solid, \
                 FillPattern.Solid, 0.25, BorderPattern.None, {{-100,-100},{100,100}}, 0)",
            ))
            .with_connector(true),
        )
        .with_class(
            "Lib.OnePort",
            CatalogClass::new(icon(&line(40))).with_components(COMPONENTS, ANNOTATIONS),
        )
        .with_class(
            "Lib.Resistor",
            CatalogClass::new(icon(&line(50)))
                .with_extends(["Lib.OnePort"])
                .with_components(PARAMETERS, "{{}}"),
        )
}

#[test]
fn test_connectors_and_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = IconBuilder::default()
        .build_icon(&library(), "Lib.Resistor", dir.path())
        .unwrap();

    assert_eq!(descriptor.display_label(), "Resistor");
    assert_eq!(descriptor.node_type(), NodeType::Component);
    assert!(dir.path().join("Lib.Resistor.svg").is_file());
    assert!(dir.path().join("Lib.Pin.svg").is_file());

    let connectors = descriptor.connectors();
    assert_eq!(connectors.len(), 2);
    assert_eq!(connectors[0].name(), "p");
    assert_eq!(connectors[0].svg(), connectors[1].svg());
    assert_eq!(connectors[1].placement().unwrap().top_right().x(), 90.0);

    let parameters = descriptor.parameters();
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].name(), "R");
    assert_eq!(parameters[0].class_name(), "Real");

    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["id"], "Lib.Resistor");
    assert_eq!(json["svg"]["width"], 100.0);
    assert_eq!(json["svg"]["height"], 0.0);
    assert_eq!(json["connectors"][0]["svg"]["width"], 200.0);
    assert_eq!(json["connectors"][1]["placement"]["bottomLeft"]["x"], 110.0);
    assert_eq!(json["parameters"][0]["displayLabel"], "R");
}

#[test]
fn test_connector_rendering_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::new(
        RenderConfig::new("Verdana", false, false),
        StyleConfig::default(),
    );
    let descriptor = IconBuilder::new(config)
        .build_icon(&library(), "Lib.OnePort", dir.path())
        .unwrap();

    assert_eq!(descriptor.connectors().len(), 2);
    assert!(descriptor.connectors().iter().all(|c| c.svg().is_none()));
    assert!(!dir.path().join("Lib.Pin.svg").exists());
}

#[test]
fn test_package_is_a_collection() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = IconBuilder::default()
        .build_icon(&library(), "Lib", dir.path())
        .unwrap();
    assert_eq!(descriptor.node_type(), NodeType::Collection);
    assert_eq!(descriptor.svg().width(), 200.0);
}

#[test]
fn test_strict_mode_rejects_unknown_shapes() {
    let catalog = ModelCatalog::new().with_class(
        "Odd",
        CatalogClass::new(icon(&format!("{}, Triangle(1, 2, 3)", line(10)))),
    );

    let lenient = IconBuilder::default();
    let dir = tempfile::tempdir().unwrap();
    let descriptor = lenient.build_icon(&catalog, "Odd", dir.path()).unwrap();
    assert_eq!(descriptor.diagnostics().len(), 1);
    assert_eq!(descriptor.diagnostics()[0].class_name(), "Odd");

    let strict = IconBuilder::default().with_strict(true);
    match strict.compose(&catalog, "Odd") {
        Err(ModiconError::Parse { err, src }) => {
            assert_eq!(err.diagnostics().len(), 1);
            assert!(src.contains("Triangle"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}
