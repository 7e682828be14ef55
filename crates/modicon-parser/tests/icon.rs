use std::fs;

use modicon_core::{
    color::Color,
    geometry::{Extent, Point},
    graphics::{Arrow, GraphicsObject, LinePattern, TextStyle},
};
use modicon_parser::{
    ParseContext, parse_components, parse_icon, parse_placement,
    error::{ErrorCode, Severity},
    splitter::{Segment, split_list, unquote},
};

/// The icon of a resistor as the compiler reports it.
const RESISTOR: &str = r#"{-100.0,-100.0,100.0,100.0,true,0.1,2.0,2.0,{Rectangle(true, {0.0, 0.0}, 0, {0, 0, 255}, {255, 255, 255}, LinePattern.Solid, FillPattern.Solid, 0.25, BorderPattern.None, {{-70.0, 30.0}, {70.0, -30.0}}, 0), Line(true, {0.0, 0.0}, 0, {{-90.0, 0.0}, {-70.0, 0.0}}, {0, 0, 255}, LinePattern.Solid, 0.25, {Arrow.None, Arrow.None}, 3, Smooth.None), Line(true, {0.0, 0.0}, 0, {{70.0, 0.0}, {90.0, 0.0}}, {0, 0, 255}, LinePattern.Solid, 0.25, {Arrow.None, Arrow.Filled}, 3, Smooth.None), Text(true, {0.0, 0.0}, 0, {0, 0, 255}, {0, 0, 0}, LinePattern.Solid, FillPattern.None, 0.25, {{-150.0, 90.0}, {150.0, 50.0}}, "%name", 0, {-1, -1, -1}, "", {TextStyle.Bold}, TextAlignment.Center)}}"#;

#[test]
fn test_resistor_icon() {
    let icon = parse_icon(RESISTOR, &ParseContext::new());
    assert!(icon.is_clean(), "unexpected diagnostics: {:?}", icon.diagnostics());

    let graphics = icon.value().graphics();
    let kinds: Vec<_> = graphics.iter().map(GraphicsObject::kind).collect();
    assert_eq!(kinds, ["Rectangle", "Line", "Line", "Text"]);

    let GraphicsObject::Line(lead) = &graphics[2] else {
        panic!("Expected Line");
    };
    assert_eq!(lead.points, [Point::new(70.0, 0.0), Point::new(90.0, 0.0)]);
    assert_eq!(lead.color, Color::rgb(0, 0, 255));
    assert_eq!(lead.pattern, LinePattern::Solid);
    assert_eq!(lead.arrow, [Arrow::None, Arrow::Filled]);

    let GraphicsObject::Text(label) = &graphics[3] else {
        panic!("Expected Text");
    };
    assert_eq!(label.text_string, "%name");
    assert_eq!(label.text_color, None);
    assert!(label.has_style(TextStyle::Bold));
    assert!(label.font_name.is_empty());
}

#[test]
fn test_malformed_shapes_are_reported_and_skipped() {
    let source = "{-100,-100,100,100,true,0.1,2,2,{\
        Polygon(true, {0,0}, 0, {0,0,0}, {0,0,0}, LinePattern.Solid, FillPattern.None, 0.25, {{0,0},{10,0},{10,10}}, Smooth.None), \
        Ellipse(true, {0,0}, 0, {0,0,0}, {0,0,0}, LinePattern.Wavy, FillPattern.None, 0.25, {{-10,-10},{10,10}}), \
        Triangle(1, 2, 3), \
        Line(true, {0,0}, 0, {{0,0},{1,1}}, {0,0,0}, LinePattern.Solid, 0.25, {Arrow.None}, 3, Smooth.None)}}";

    let icon = parse_icon(source, &ParseContext::new());
    let graphics = icon.value().graphics();
    assert_eq!(graphics.len(), 2);
    assert!(matches!(graphics[0], GraphicsObject::Polygon(_)));
    assert_eq!(graphics[1], GraphicsObject::Unknown("Triangle(1, 2, 3)".to_string()));

    let codes: Vec<_> = icon.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, [ErrorCode::E102, ErrorCode::E104, ErrorCode::E103]);
    assert!(icon.diagnostics().iter().all(|d| d.severity() == Severity::Error));

    // Every primary label points back into the annotation text.
    for diagnostic in icon.diagnostics() {
        let label = &diagnostic.labels()[0];
        assert!(label.span().end() <= source.len());
    }
    let wavy = &icon.diagnostics()[0].labels()[0];
    assert_eq!(&source[wavy.span().range()], "LinePattern.Wavy");
}

#[test]
fn test_unbalanced_icon_keeps_header() {
    let source = "{-200,-100,200,100,false,0.1,2,2,{Rectangle(true, {0,0}, 0, {0,0,0}, \
        {0,0,0}, LinePattern.Solid, FillPattern.None, 0.25, BorderPattern.None, \
        {{-10,-10},{10,10}}, 0)}";

    let icon = parse_icon(source, &ParseContext::new());
    assert!(!icon.has_errors());
    assert_eq!(icon.diagnostics()[0].code(), Some(ErrorCode::E002));

    let cs = icon.value().coordinate_system();
    assert_eq!(
        cs.extent(),
        Extent::new(Point::new(-200.0, -100.0), Point::new(200.0, 100.0))
    );
    assert!(!cs.preserve_aspect_ratio());
    assert!(icon.value().is_empty());
}

#[test]
fn test_bitmap_relative_to_base_dir() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("logo.png"), b"png").expect("Failed to write bitmap");

    let source = r#"{-100,-100,100,100,true,0.1,2,2,{Bitmap(true, {0,0}, 0, {{-50,-50},{50,50}}, "logo.png", ""), Bitmap(true, {0,0}, 0, {{-50,-50},{50,50}}, "modelica://Lib/missing.png")}}"#;
    let ctx = ParseContext::new().with_base_dir(dir.path());
    let icon = parse_icon(source, &ctx);

    let hrefs: Vec<_> = icon
        .value()
        .graphics()
        .iter()
        .map(|object| match object {
            GraphicsObject::Bitmap(bitmap) => bitmap.href.as_str(),
            other => panic!("Expected Bitmap, got {}", other.kind()),
        })
        .collect();
    assert_eq!(hrefs, ["data:image;base64,cG5n", "modelica://Lib/missing.png"]);

    assert_eq!(icon.diagnostics().len(), 1);
    assert_eq!(icon.diagnostics()[0].code(), Some(ErrorCode::E200));
    assert!(icon.into_result().is_ok());
}

#[test]
fn test_quoted_braces_do_not_split() {
    let list = split_list(Segment::root(r#"{{"a"}, {"b"}}"#)).into_parts().0;
    let texts: Vec<_> = list.iter().map(|s| s.text()).collect();
    assert_eq!(texts, [r#"{"a"}"#, r#"{"b"}"#]);

    let tricky = split_list(Segment::root(r#"{"x, {y}", "}"}"#)).into_parts().0;
    let values: Vec<_> = tricky
        .iter()
        .map(|s| unquote(*s).into_parts().0)
        .collect();
    assert_eq!(values, ["x, {y}", "}"]);
}

#[test]
fn test_component_annotations() {
    let components = parse_components(
        r#"{{"Modelica.Electrical.Analog.Interfaces.PositivePin","p","Positive pin", "public", "false", "false", "false", "false", "unspecified", "none", "unspecified","{}"}}"#,
    );
    let components = components.value();
    assert_eq!(components.len(), 1);
    assert_eq!(
        components[0].class_name(),
        "Modelica.Electrical.Analog.Interfaces.PositivePin"
    );

    let placement = parse_placement("{Placement(true,-,-,-110,-10,-90,10,-,-,-,-,-,-,)}");
    let transformation = placement.value().expect("Expected placement").transformation();
    assert_eq!(
        transformation.extent(),
        Extent::new(Point::new(-110.0, -10.0), Point::new(-90.0, 10.0))
    );
}
