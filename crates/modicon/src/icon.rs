//! Descriptors of rendered icons.
//!
//! An [`IconDescriptor`] is what a caller embeds in a larger response: the
//! class's rendered SVG, an icon for each connector it declares or inherits
//! with the connector's placement, and its parameters. All descriptors
//! serialize to JSON with camel-case keys.

use log::{debug, warn};
use serde::Serialize;

use modicon_core::geometry::Point;
use modicon_parser::{
    ComponentInfo, Placement, error::Diagnostic, parse_components, parse_placement,
    split_component_annotations,
};

use crate::source::{ModelSource, SourceError};

/// A rendered SVG file and its size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgDescriptor {
    path: String,
    width: f64,
    height: f64,
}

impl SvgDescriptor {
    pub fn new(path: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Where a connector sits in its parent's icon.
///
/// The corners keep the order they were written in; a reversed pair means
/// the connector is mirrored along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDescriptor {
    visible: bool,
    origin: Point,
    bottom_left: Point,
    top_right: Point,
    rotation: f64,
}

impl PlacementDescriptor {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    pub fn top_right(&self) -> Point {
        self.top_right
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

impl From<Placement> for PlacementDescriptor {
    fn from(placement: Placement) -> Self {
        let transformation = placement.transformation();
        let extent = transformation.extent();
        Self {
            visible: placement.visible(),
            origin: transformation.origin(),
            bottom_left: extent.first(),
            top_right: extent.second(),
            rotation: transformation.rotation(),
        }
    }
}

/// A connector component and its own icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    svg: Option<SvgDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placement: Option<PlacementDescriptor>,
}

impl Connector {
    pub fn new(
        component: &ComponentInfo,
        svg: Option<SvgDescriptor>,
        placement: Option<PlacementDescriptor>,
    ) -> Self {
        Self {
            id: component.class_name().to_string(),
            name: component.name().to_string(),
            svg,
            placement,
        }
    }

    /// The connector's class.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The component's instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The connector's icon, `None` when connector rendering is disabled.
    pub fn svg(&self) -> Option<&SvgDescriptor> {
        self.svg.as_ref()
    }

    pub fn placement(&self) -> Option<&PlacementDescriptor> {
        self.placement.as_ref()
    }
}

/// A parameter component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    id: String,
    display_label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    comment: String,
}

impl Parameter {
    /// The parameter's type.
    pub fn class_name(&self) -> &str {
        &self.id
    }

    /// The parameter's instance name.
    pub fn name(&self) -> &str {
        &self.display_label
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl From<&ComponentInfo> for Parameter {
    fn from(component: &ComponentInfo) -> Self {
        Self {
            id: component.class_name().to_string(),
            display_label: component.name().to_string(),
            comment: component.comment().to_string(),
        }
    }
}

/// How a class is shown in a library tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A package, holding other classes.
    Collection,
    Component,
}

impl NodeType {
    /// The node type for a class restriction such as `package` or `model`.
    pub fn from_restriction(restriction: &str) -> Self {
        if restriction.trim() == "package" {
            Self::Collection
        } else {
            Self::Component
        }
    }
}

/// One diagnostic raised while parsing a layer of the icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDiagnostic {
    class_name: String,
    severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    message: String,
}

impl IconDiagnostic {
    pub fn new(class_name: impl Into<String>, diagnostic: &Diagnostic) -> Self {
        Self {
            class_name: class_name.into(),
            severity: diagnostic.severity().to_string(),
            code: diagnostic.code().map(|code| code.as_str()),
            message: diagnostic.message().to_string(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    pub fn code(&self) -> Option<&str> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Everything rendered for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    id: String,
    display_label: String,
    node_type: NodeType,
    svg: SvgDescriptor,
    connectors: Vec<Connector>,
    parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<IconDiagnostic>,
}

impl IconDescriptor {
    pub fn new(id: impl Into<String>, node_type: NodeType, svg: SvgDescriptor) -> Self {
        let id = id.into();
        Self {
            display_label: crate::naming::last_word_after_dot(&id).to_string(),
            id,
            node_type,
            svg,
            connectors: Vec::new(),
            parameters: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_connectors(mut self, connectors: Vec<Connector>) -> Self {
        self.connectors = connectors;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<IconDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The full class name.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn svg(&self) -> &SvgDescriptor {
        &self.svg
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn diagnostics(&self) -> &[IconDiagnostic] {
        &self.diagnostics
    }
}

/// A class's components, each with its placement if it has one.
///
/// Components without a matching annotation entry, or whose placement
/// cannot be read, get no placement.
pub fn class_components<S: ModelSource>(
    source: &S,
    class_name: &str,
) -> Result<Vec<(ComponentInfo, Option<Placement>)>, SourceError> {
    let components_text = source.components(class_name)?;
    let (components, diagnostics) = parse_components(&components_text).into_parts();
    if !diagnostics.is_empty() {
        warn!(class = class_name, diagnostics = diagnostics.len(); "Component list read with problems");
    }
    if components.is_empty() {
        return Ok(Vec::new());
    }

    let annotations_text = source.component_annotations(class_name)?;
    let (annotations, _) = split_component_annotations(&annotations_text).into_parts();
    if annotations.len() != components.len() {
        warn!(
            class = class_name,
            components = components.len(),
            annotations = annotations.len();
            "Component annotations do not match the component list"
        );
    }

    let listed = components
        .into_iter()
        .enumerate()
        .map(|(index, component)| {
            let placement = annotations
                .get(index)
                .and_then(|annotation| *parse_placement(annotation).value());
            (component, placement)
        })
        .collect::<Vec<_>>();
    debug!(class = class_name, components = listed.len(); "Listed components");
    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CatalogClass, ModelCatalog};

    const COMPONENTS: &str = r#"{{"Pin", "p", "Positive pin", "public", "false", "false", "false", "false", "", "none", "unspecified"}, {"Real", "R", "Resistance", "public", "false", "false", "false", "false", "parameter", "none", "unspecified"}, {"Pin", "n", "", "public", "false", "false", "false", "false", "", "none", "unspecified"}}"#;
    const ANNOTATIONS: &str = "{{Placement(true,-,-,-110,-10,-90,10,-,-,-,-,-,-,)}, {}, {Placement(true,-,-,110,-10,90,10,90,-,-,-,-,-,)}}";

    fn catalog() -> ModelCatalog {
        ModelCatalog::new().with_class(
            "Resistor",
            CatalogClass::new("").with_components(COMPONENTS, ANNOTATIONS),
        )
    }

    #[test]
    fn test_components_are_paired_with_placements() {
        let components = class_components(&catalog(), "Resistor").unwrap();
        assert_eq!(components.len(), 3);

        let (pin, placement) = &components[0];
        assert_eq!(pin.name(), "p");
        let placement = PlacementDescriptor::from(placement.unwrap());
        assert_eq!(placement.bottom_left(), Point::new(-110.0, -10.0));
        assert_eq!(placement.rotation(), 0.0);

        assert!(components[1].1.is_none());
        let mirrored = PlacementDescriptor::from(components[2].1.unwrap());
        assert_eq!(mirrored.rotation(), 90.0);
        assert_eq!(mirrored.top_right(), Point::new(90.0, 10.0));
    }

    #[test]
    fn test_missing_annotations_leave_placement_empty() {
        let catalog = ModelCatalog::new().with_class(
            "Resistor",
            CatalogClass::new("").with_components(COMPONENTS, "{}"),
        );
        let components = class_components(&catalog, "Resistor").unwrap();
        assert_eq!(components.len(), 3);
        assert!(components.iter().all(|(_, placement)| placement.is_none()));
    }

    #[test]
    fn test_node_type_from_restriction() {
        assert_eq!(NodeType::from_restriction("package"), NodeType::Collection);
        assert_eq!(NodeType::from_restriction("model"), NodeType::Component);
        assert_eq!(NodeType::from_restriction("connector"), NodeType::Component);
    }

    #[test]
    fn test_descriptor_json() {
        let components = class_components(&catalog(), "Resistor").unwrap();
        let (pin, placement) = &components[0];
        let descriptor = IconDescriptor::new(
            "Modelica.Electrical.Analog.Basic.Resistor",
            NodeType::Component,
            SvgDescriptor::new("Resistor.svg", 200.0, 100.0),
        )
        .with_connectors(vec![Connector::new(
            pin,
            Some(SvgDescriptor::new("Pin.svg", 20.0, 20.0)),
            placement.map(PlacementDescriptor::from),
        )])
        .with_parameters(vec![Parameter::from(&components[1].0)]);

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["displayLabel"], "Resistor");
        assert_eq!(json["nodeType"], "component");
        assert_eq!(json["svg"]["width"], 200.0);
        assert_eq!(json["connectors"][0]["id"], "Pin");
        assert_eq!(json["connectors"][0]["placement"]["bottomLeft"]["x"], -110.0);
        assert_eq!(json["parameters"][0]["displayLabel"], "R");
        assert_eq!(json["parameters"][0]["comment"], "Resistance");
        assert!(json.get("diagnostics").is_none());
    }
}
