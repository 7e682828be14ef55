use std::fs;

use tempfile::tempdir;

use modicon_cli::{Args, INDEX_FILE, run};

const CATALOG: &str = r#"
[classes."Lib"]
restriction = "package"
directory = "Lib"

[classes."Lib.Pin"]
connector = true
icon = '{-100,-100,100,100,true,0.1,2,2,{Rectangle(true, {0,0}, 0, {0,0,255}, {0,0,255}, LinePattern.Solid, FillPattern.Solid, 0.25, BorderPattern.None, {{-100,-100},{100,100}}, 0)}}'

[classes."Lib.OnePort"]
icon = '{-100,-100,100,100,true,0.1,2,2,{Line(true, {0,0}, 0, {{-90,0},{90,0}}, {0,0,255}, LinePattern.Solid, 0.25, {Arrow.None, Arrow.None}, 3, Smooth.None)}}'
components = '{{"Lib.Pin", "p", "", "public", "false", "false", "false", "false", "", "none", "unspecified"}, {"Lib.Pin", "n", "", "public", "false", "false", "false", "false", "", "none", "unspecified"}}'
component_annotations = '{{Placement(true,-,-,-110,-10,-90,10,-,-,-,-,-,-,)}, {Placement(true,-,-,110,-10,90,10,-,-,-,-,-,-,)}}'

[classes."Lib.Resistor"]
extends = ["Lib.OnePort"]
icon = '{-100,-100,100,100,true,0.1,2,2,{Rectangle(true, {0,0}, 0, {0,0,255}, {255,255,255}, LinePattern.Solid, FillPattern.Solid, 0.25, BorderPattern.None, {{-70,30},{70,-30}}, 0), Text(true, {0,0}, 0, {0,0,255}, {0,0,0}, LinePattern.Solid, FillPattern.None, 0.25, {{-150,90},{150,50}}, "%name", 0, {-1,-1,-1}, "", {}, TextAlignment.Center), Bitmap(true, {0,0}, 0, {{-20,-20},{20,20}}, "modelica://Lib/Resources/logo.png")}}'
components = '{{"Real", "R", "Resistance", "public", "false", "false", "false", "false", "parameter", "none", "unspecified"}}'
component_annotations = '{{}}'

[classes."Lib.Broken"]
icon = '{-100,-100,100,100,true,0.1,2,2,{Triangle(1, 2, 3)}}'
"#;

fn args(catalog: &str, output: &str, classes: &[&str], strict: bool) -> Args {
    Args {
        catalog: catalog.to_string(),
        classes: classes.iter().map(|c| c.to_string()).collect(),
        output: output.to_string(),
        config: None,
        strict,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_library() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let resources = temp_dir.path().join("Lib").join("Resources");
    fs::create_dir_all(&resources).unwrap();
    fs::write(resources.join("logo.png"), b"png").unwrap();

    let catalog_path = temp_dir.path().join("catalog.toml");
    fs::write(&catalog_path, CATALOG).unwrap();
    let out_dir = temp_dir.path().join("out");

    run(&args(
        &catalog_path.to_string_lossy(),
        &out_dir.to_string_lossy(),
        &["Lib", "Lib.Resistor"],
        false,
    ))
    .expect("library renders");

    let resistor = fs::read_to_string(out_dir.join("Lib.Resistor.svg")).unwrap();
    assert!(resistor.starts_with("<svg"));
    assert!(resistor.contains("%name"));
    assert!(resistor.contains("data:image;base64,cG5n"));
    assert!(out_dir.join("Lib.Pin.svg").is_file());
    assert!(out_dir.join("Lib.svg").is_file());

    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(INDEX_FILE)).unwrap()).unwrap();
    assert_eq!(index[0]["nodeType"], "collection");
    assert_eq!(index[1]["displayLabel"], "Resistor");
    assert_eq!(index[1]["connectors"].as_array().unwrap().len(), 2);
    assert_eq!(index[1]["parameters"][0]["displayLabel"], "R");
}

#[test]
fn e2e_smoke_test_strict_mode() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let catalog_path = temp_dir.path().join("catalog.toml");
    fs::write(&catalog_path, CATALOG).unwrap();
    let catalog = catalog_path.to_string_lossy();

    let lenient_out = temp_dir.path().join("lenient");
    run(&args(&catalog, &lenient_out.to_string_lossy(), &["Lib.Broken"], false))
        .expect("errors are tolerated by default");
    assert!(lenient_out.join("Lib.Broken.svg").is_file());

    let strict_out = temp_dir.path().join("strict");
    let err = run(&args(&catalog, &strict_out.to_string_lossy(), &["Lib.Broken"], true))
        .expect_err("strict mode rejects unknown shapes");
    assert!(matches!(err, modicon::ModiconError::Parse { .. }));
}

#[test]
fn e2e_smoke_test_unknown_class() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let catalog_path = temp_dir.path().join("catalog.toml");
    fs::write(&catalog_path, CATALOG).unwrap();

    let result = run(&args(
        &catalog_path.to_string_lossy(),
        &temp_dir.path().join("out").to_string_lossy(),
        &["Lib.Missing"],
        false,
    ));
    assert!(result.is_err());
}
