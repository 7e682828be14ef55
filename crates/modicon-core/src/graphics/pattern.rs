//! Enumeration tokens used by graphical annotations.
//!
//! Annotation producers write enumeration literals fully qualified
//! (`LinePattern.Dash`); hand-written annotations often omit the type prefix.
//! Every token type here accepts both spellings through [`FromStr`].

use std::{fmt, str::FromStr};

use thiserror::Error;

/// An enumeration literal that does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} `{token}`")]
pub struct TokenError {
    kind: &'static str,
    token: String,
}

impl TokenError {
    /// The enumeration type that was expected.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The offending literal.
    pub fn token(&self) -> &str {
        &self.token
    }
}

macro_rules! annotation_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the unqualified literal name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl FromStr for $name {
            type Err = TokenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let bare = s
                    .strip_prefix(concat!($kind, "."))
                    .unwrap_or(s);
                match bare {
                    $(stringify!($variant) => Ok(Self::$variant),)+
                    _ => Err(TokenError {
                        kind: $kind,
                        token: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}", $kind, self.as_str())
            }
        }
    };
}

annotation_enum! {
    /// Stroke pattern of lines and shape borders.
    #[derive(Default)]
    LinePattern, "LinePattern" {
        None,
        #[default]
        Solid,
        Dash,
        Dot,
        DashDot,
        DashDotDot,
    }
}

annotation_enum! {
    /// Interior pattern of filled shapes.
    #[derive(Default)]
    FillPattern, "FillPattern" {
        #[default]
        None,
        Solid,
        Horizontal,
        Vertical,
        Cross,
        Forward,
        Backward,
        CrossDiag,
        HorizontalCylinder,
        VerticalCylinder,
        Sphere,
    }
}

annotation_enum! {
    /// Three-dimensional border effect of rectangles.
    #[derive(Default)]
    BorderPattern, "BorderPattern" {
        #[default]
        None,
        Raised,
        Sunken,
        Engraved,
    }
}

annotation_enum! {
    /// Arrow head drawn at one end of a line.
    #[derive(Default)]
    Arrow, "Arrow" {
        #[default]
        None,
        Open,
        Filled,
        Half,
    }
}

annotation_enum! {
    /// Curve interpolation of point sequences.
    #[derive(Default)]
    Smooth, "Smooth" {
        #[default]
        None,
        Bezier,
    }
}

annotation_enum! {
    /// Emphasis applied to a text string.
    TextStyle, "TextStyle" {
        Bold,
        Italic,
        UnderLine,
    }
}

annotation_enum! {
    #[derive(Default)]
    TextAlignment, "TextAlignment" {
        Left,
        #[default]
        Center,
        Right,
    }
}
