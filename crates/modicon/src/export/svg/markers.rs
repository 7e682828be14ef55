//! Arrow markers and border effects.

use svg::node::element::{
    Filter, FilterEffectComposite, FilterEffectGaussianBlur, FilterEffectPointLight,
    FilterEffectSpecularLighting, Marker, Path,
};

use modicon_core::{color::Color, graphics::Arrow};

/// Which end of a line a marker sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineEnd {
    Start,
    End,
}

impl LineEnd {
    pub(super) fn attribute(self) -> &'static str {
        match self {
            Self::Start => "marker-start",
            Self::End => "marker-end",
        }
    }

    pub(super) fn id_prefix(self) -> &'static str {
        match self {
            Self::Start => "arrow-start",
            Self::End => "arrow-end",
        }
    }
}

/// Path data of an arrow head in a 10x10 marker box, and whether it is
/// filled. Start heads point left, end heads point right.
fn arrow_head(arrow: Arrow, end: LineEnd) -> Option<(&'static str, bool)> {
    let head = match (arrow, end) {
        (Arrow::None, _) => return None,
        (Arrow::Filled, LineEnd::Start) => ("M 10 0 L 0 5 L 10 10 z", true),
        (Arrow::Filled, LineEnd::End) => ("M 0 0 L 10 5 L 0 10 z", true),
        (Arrow::Open, LineEnd::Start) => ("M 10 0 L 0 5 L 10 10", false),
        (Arrow::Open, LineEnd::End) => ("M 0 0 L 10 5 L 0 10", false),
        (Arrow::Half, LineEnd::Start) => ("M 10 0 L 0 5", false),
        (Arrow::Half, LineEnd::End) => ("M 0 0 L 10 5", false),
    };
    Some(head)
}

/// The marker for one arrow end, or `None` for [`Arrow::None`].
pub(super) fn arrow_marker(id: &str, arrow: Arrow, end: LineEnd, color: Color) -> Option<Marker> {
    let (data, filled) = arrow_head(arrow, end)?;
    let ref_x = match end {
        LineEnd::Start => 10,
        LineEnd::End => 0,
    };

    let path = Path::new().set("d", data);
    let path = if filled {
        path.set("fill", color)
    } else {
        path.set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 1.5)
    };

    Some(
        Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", ref_x)
            .set("refY", 5)
            .set("markerWidth", 4)
            .set("markerHeight", 3)
            .set("orient", "auto")
            .add(path),
    )
}

/// A specular lighting filter giving a shape a raised border.
pub(super) fn raised_filter(id: &str) -> Filter {
    Filter::new()
        .set("id", id)
        .set("filterUnits", "objectBoundingBox")
        .set("x", -0.1)
        .set("y", -0.1)
        .set("width", 1.2)
        .set("height", 1.2)
        .add(
            FilterEffectGaussianBlur::new()
                .set("in", "SourceAlpha")
                .set("stdDeviation", 5)
                .set("result", "alpha_blur"),
        )
        .add(
            FilterEffectSpecularLighting::new()
                .set("in", "alpha_blur")
                .set("surfaceScale", 5)
                .set("specularConstant", 1)
                .set("specularExponent", 20)
                .set("lighting-color", "#FFFFFF")
                .set("result", "spec_light")
                .add(
                    FilterEffectPointLight::new()
                        .set("x", -5000)
                        .set("y", -10000)
                        .set("z", 10000),
                ),
        )
        .add(
            FilterEffectComposite::new()
                .set("in", "spec_light")
                .set("in2", "SourceAlpha")
                .set("operator", "in")
                .set("result", "spec_light"),
        )
        .add(
            FilterEffectComposite::new()
                .set("in", "SourceGraphic")
                .set("in2", "spec_light")
                .set("operator", "out")
                .set("result", "spec_light_fill"),
        )
}
