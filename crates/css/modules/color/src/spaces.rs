//! CSS Color Module Level 4 — §4 Color spaces and their channel ranges.
//! Spec: <https://www.w3.org/TR/css-color-4/#color-syntax>
//!
//! The registry is built explicitly by whoever composes the resolver; nothing
//! here registers itself at load time.

use core::f64::consts::PI;
use css_syntax::{NodeKind, ValueNode};

/// How one channel of a space reads numbers and percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChannelKind {
    /// A linear channel. `100%` maps to `percent_reference`; a bare number is
    /// divided by `number_divisor` (255 for legacy rgb, 1 elsewhere).
    Linear {
        percent_reference: f64,
        number_divisor: f64,
    },
    /// A hue in degrees; accepts numbers and `<angle>` dimensions.
    Hue,
}

impl ChannelKind {
    const fn linear(percent_reference: f64) -> Self {
        Self::Linear {
            percent_reference,
            number_divisor: 1.0,
        }
    }

    /// Read a channel value from a node, or `None` if the node is not valid here.
    pub fn read(self, node: &ValueNode) -> Option<f64> {
        match (self, &node.kind) {
            (
                Self::Linear {
                    number_divisor, ..
                },
                NodeKind::Number(value),
            ) => Some(value / number_divisor),
            (
                Self::Linear {
                    percent_reference, ..
                },
                NodeKind::Percentage(percent),
            ) => Some(percent * percent_reference / 100.0),
            (Self::Hue, NodeKind::Number(degrees)) => Some(*degrees),
            (Self::Hue, NodeKind::Dimension { value, unit }) => angle_to_degrees(*value, unit),
            _ => None,
        }
    }
}

/// Convert an `<angle>` to degrees.
/// Spec: <https://www.w3.org/TR/css-values-4/#angles>
fn angle_to_degrees(value: f64, unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "deg" => Some(value),
        "grad" => Some(value * 360.0 / 400.0),
        "rad" => Some(value * 180.0 / PI),
        "turn" => Some(value * 360.0),
        _ => None,
    }
}

/// A named coordinate system with three channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSpace {
    /// Identifier used in canonical colors, e.g. `srgb` or `oklch`.
    pub id: &'static str,
    pub channels: [ChannelKind; 3],
}

const SRGB_LEGACY: ColorSpace = ColorSpace {
    id: "srgb",
    channels: [ChannelKind::Linear {
        percent_reference: 1.0,
        number_divisor: 255.0,
    }; 3],
};

const fn rgb_like(id: &'static str) -> ColorSpace {
    ColorSpace {
        id,
        channels: [ChannelKind::linear(1.0); 3],
    }
}

const fn hue_first(id: &'static str) -> ColorSpace {
    ColorSpace {
        id,
        channels: [
            ChannelKind::Hue,
            ChannelKind::linear(100.0),
            ChannelKind::linear(100.0),
        ],
    }
}

const fn lab_like(id: &'static str, lightness: f64, axes: f64) -> ColorSpace {
    ColorSpace {
        id,
        channels: [
            ChannelKind::linear(lightness),
            ChannelKind::linear(axes),
            ChannelKind::linear(axes),
        ],
    }
}

const fn lch_like(id: &'static str, lightness: f64, chroma: f64) -> ColorSpace {
    ColorSpace {
        id,
        channels: [
            ChannelKind::linear(lightness),
            ChannelKind::linear(chroma),
            ChannelKind::Hue,
        ],
    }
}

/// Registry of color spaces reachable from functional notations and `color()`.
#[derive(Clone, Debug, Default)]
pub struct ColorSpaces {
    functions: Vec<(&'static str, ColorSpace)>,
    predefined: Vec<(&'static str, ColorSpace)>,
}

impl ColorSpaces {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every space CSS Color 4 defines.
    pub fn standard() -> Self {
        let mut spaces = Self::new();
        for name in ["rgb", "rgba"] {
            spaces.register_function(name, SRGB_LEGACY);
        }
        for name in ["hsl", "hsla"] {
            spaces.register_function(name, hue_first("hsl"));
        }
        spaces.register_function("hwb", hue_first("hwb"));
        spaces.register_function("lab", lab_like("lab", 100.0, 125.0));
        spaces.register_function("lch", lch_like("lch", 100.0, 150.0));
        spaces.register_function("oklab", lab_like("oklab", 1.0, 0.4));
        spaces.register_function("oklch", lch_like("oklch", 1.0, 0.4));

        spaces.register_predefined("srgb", rgb_like("srgb"));
        spaces.register_predefined("srgb-linear", rgb_like("srgb-linear"));
        spaces.register_predefined("display-p3", rgb_like("p3"));
        spaces.register_predefined("a98-rgb", rgb_like("a98rgb"));
        spaces.register_predefined("prophoto-rgb", rgb_like("prophoto"));
        spaces.register_predefined("rec2020", rgb_like("rec2020"));
        spaces.register_predefined("xyz", rgb_like("xyz-d65"));
        spaces.register_predefined("xyz-d65", rgb_like("xyz-d65"));
        spaces.register_predefined("xyz-d50", rgb_like("xyz-d50"));
        spaces
    }

    /// Make `name(…)` parse into `space`. Later registrations win.
    pub fn register_function(&mut self, name: &'static str, space: ColorSpace) {
        self.functions.retain(|(existing, _)| *existing != name);
        self.functions.push((name, space));
    }

    /// Make `color(name …)` parse into `space`. Later registrations win.
    pub fn register_predefined(&mut self, name: &'static str, space: ColorSpace) {
        self.predefined.retain(|(existing, _)| *existing != name);
        self.predefined.push((name, space));
    }

    /// The space behind a functional notation such as `oklch`.
    pub fn for_function(&self, name: &str) -> Option<&ColorSpace> {
        Self::lookup(&self.functions, name)
    }

    /// The space behind a `color()` space argument such as `display-p3`.
    pub fn for_predefined(&self, name: &str) -> Option<&ColorSpace> {
        Self::lookup(&self.predefined, name)
    }

    fn lookup<'reg>(
        entries: &'reg [(&'static str, ColorSpace)],
        name: &str,
    ) -> Option<&'reg ColorSpace> {
        entries
            .iter()
            .find(|(registered, _)| registered.eq_ignore_ascii_case(name))
            .map(|(_, space)| space)
    }
}
