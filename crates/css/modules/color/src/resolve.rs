//! CSS Color Module Level 4 — Resolving authored colors into canonical values.
//! Spec: <https://www.w3.org/TR/css-color-4/#resolving-color-values>

use crate::keywords::{BLACK_KEYWORDS, NAMED_COLORS};
use crate::spaces::{ChannelKind, ColorSpace, ColorSpaces};
use css_syntax::{NodeKind, ValueError, ValueNode, parse_value_nodes, references_custom_property};
use css_values_units::{canonical_number, format_number};
use csscolorparser::Color as ParsedColor;
use serde::{Serialize, Serializer};

/// One color channel: a number, or the explicit `none` of CSS Color 4.
///
/// `none` is a missing component and is deliberately distinct from `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Channel {
    Value(f64),
    None,
}

impl Channel {
    fn canonical_text(self) -> String {
        match self {
            Self::Value(value) => format_number(value),
            Self::None => "none".to_owned(),
        }
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::None => serializer.serialize_str("none"),
        }
    }
}

/// A color in a named space: three channels plus alpha.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub color_space: &'static str,
    pub components: [Channel; 3],
    pub alpha: f64,
}

impl Color {
    fn srgb(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            color_space: "srgb",
            components: [
                Channel::Value(canonical_number(red)),
                Channel::Value(canonical_number(green)),
                Channel::Value(canonical_number(blue)),
            ],
            alpha: canonical_number(alpha),
        }
    }

    /// Opaque black in sRGB.
    pub fn black() -> Self {
        Self::srgb(0.0, 0.0, 0.0, 1.0)
    }

    /// Fully transparent black in sRGB.
    pub fn transparent() -> Self {
        Self::srgb(0.0, 0.0, 0.0, 0.0)
    }

    /// Canonical text such as `srgb 0 0 1 / 1`, independent of authored spelling.
    pub fn canonical_text(&self) -> String {
        let [first, second, third] = self.components;
        format!(
            "{} {} {} {} / {}",
            self.color_space,
            first.canonical_text(),
            second.canonical_text(),
            third.canonical_text(),
            format_number(self.alpha)
        )
    }
}

/// Resolves authored color text against an explicitly built space registry.
#[derive(Clone, Debug)]
pub struct ColorResolver {
    spaces: ColorSpaces,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new(ColorSpaces::standard())
    }
}

impl ColorResolver {
    pub const fn new(spaces: ColorSpaces) -> Self {
        Self { spaces }
    }

    /// Resolve color text into a canonical color.
    ///
    /// `transparent` is transparent black. CSS-wide keywords and `currentcolor`
    /// become opaque black since no cascade is available. Missing alpha is `1`.
    ///
    /// # Errors
    /// `Indeterminate` when the text references `var()`, `ColorUnparseable` for
    /// anything the registry cannot read.
    pub fn resolve(&self, text: &str) -> Result<Color, ValueError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Color::transparent());
        }
        if BLACK_KEYWORDS.contains(trimmed) {
            return Ok(Color::black());
        }
        if references_custom_property(trimmed) {
            return Err(ValueError::Indeterminate);
        }
        let nodes = parse_value_nodes(trimmed);
        let [node] = nodes.as_slice() else {
            return Err(ValueError::ColorUnparseable);
        };
        self.resolve_node(node).ok_or_else(|| {
            log::trace!("no color space can read `{trimmed}`");
            ValueError::ColorUnparseable
        })
    }

    fn resolve_node(&self, node: &ValueNode) -> Option<Color> {
        match &node.kind {
            NodeKind::Hash(hex) => parse_hex(hex),
            NodeKind::Identifier(name) if NAMED_COLORS.contains(name) => named_color(name),
            NodeKind::Function { name, children } if name.eq_ignore_ascii_case("color") => {
                let (space_node, channels) = children.split_first()?;
                let space = self.spaces.for_predefined(space_node.identifier()?)?;
                read_channels(space, channels)
            }
            NodeKind::Function { name, children } => {
                read_channels(self.spaces.for_function(name)?, children)
            }
            _ => None,
        }
    }
}

/// Decode `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` byte-exactly.
fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|digit| {
            digit
                .to_digit(16)
                .and_then(|value| u8::try_from(value).ok())
        })
        .collect::<Option<_>>()?;
    let bytes: Vec<u8> = match digits.len() {
        3 | 4 => digits.iter().map(|nibble| nibble * 17).collect(),
        6 | 8 => digits
            .chunks(2)
            .map(|pair| pair.iter().fold(0_u8, |acc, nibble| acc * 16 + nibble))
            .collect(),
        _ => return None,
    };
    let channel = |index: usize| bytes.get(index).map(|byte| f64::from(*byte) / 255.0);
    Some(Color::srgb(
        channel(0)?,
        channel(1)?,
        channel(2)?,
        channel(3).unwrap_or(1.0),
    ))
}

/// Look up a `<named-color>` through `csscolorparser`'s table.
fn named_color(name: &str) -> Option<Color> {
    let parsed: ParsedColor = name.parse().ok()?;
    let [red, green, blue, alpha] = parsed.to_rgba8();
    Some(Color::srgb(
        f64::from(red) / 255.0,
        f64::from(green) / 255.0,
        f64::from(blue) / 255.0,
        f64::from(alpha) / 255.0,
    ))
}

/// Read three channels and an optional alpha from function arguments.
///
/// Accepts both the modern `a b c / alpha` form and the legacy comma form,
/// where a fourth value is the alpha.
fn read_channels(space: &ColorSpace, arguments: &[ValueNode]) -> Option<Color> {
    let mut components: Vec<&ValueNode> = Vec::with_capacity(4);
    let mut alpha: Option<&ValueNode> = None;
    let mut after_slash = false;
    for argument in arguments {
        match argument.kind {
            NodeKind::Operator(',') => {}
            NodeKind::Operator('/') if !after_slash => after_slash = true,
            _ if after_slash => {
                if alpha.replace(argument).is_some() {
                    return None;
                }
            }
            _ => components.push(argument),
        }
    }
    if alpha.is_none() && !after_slash && components.len() == 4 {
        alpha = components.pop();
    }
    let [first, second, third] = components.as_slice() else {
        return None;
    };
    let read = |kind: ChannelKind, node: &ValueNode| -> Option<Channel> {
        if node.identifier().is_some_and(|name| name.eq_ignore_ascii_case("none")) {
            return Some(Channel::None);
        }
        kind.read(node)
            .map(|value| Channel::Value(canonical_number(value)))
    };
    let [first_kind, second_kind, third_kind] = space.channels;
    Some(Color {
        color_space: space.id,
        components: [
            read(first_kind, *first)?,
            read(second_kind, *second)?,
            read(third_kind, *third)?,
        ],
        alpha: match alpha {
            Some(node) => read_alpha(node)?,
            None if after_slash => return None,
            None => 1.0,
        },
    })
}

/// `<alpha-value>`: a number or percentage, clamped to `[0, 1]`; `none` is `0`.
fn read_alpha(node: &ValueNode) -> Option<f64> {
    let alpha = match &node.kind {
        NodeKind::Number(value) => *value,
        NodeKind::Percentage(percent) => percent / 100.0,
        NodeKind::Identifier(name) if name.eq_ignore_ascii_case("none") => 0.0,
        _ => return None,
    };
    Some(canonical_number(alpha.clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> Result<Color, ValueError> {
        ColorResolver::default().resolve(text)
    }

    fn values(color: &Color) -> [Option<f64>; 3] {
        color.components.map(|channel| match channel {
            Channel::Value(value) => Some(value),
            Channel::None => None,
        })
    }

    #[test]
    fn keywords_resolve_to_black() {
        assert_eq!(resolve("transparent"), Ok(Color::transparent()));
        assert_eq!(resolve("TRANSPARENT"), Ok(Color::transparent()));
        for keyword in ["currentcolor", "currentColor", "inherit", "initial", "unset", "revert", "revert-layer"] {
            assert_eq!(resolve(keyword), Ok(Color::black()), "{keyword}");
        }
    }

    #[test]
    fn hex_and_named_colors_share_canonical_values() {
        assert_eq!(resolve("#000"), Ok(Color::black()));
        assert_eq!(resolve("#000000ff"), Ok(Color::black()));
        assert_eq!(resolve("blue").map(|color| values(&color)), Ok([Some(0.0), Some(0.0), Some(1.0)]));
        assert_eq!(resolve("#808080"), resolve("rgb(128 128 128)"));
        assert_eq!(resolve("#808080"), resolve("rgba(128, 128, 128, 1)"));
        assert_eq!(resolve("RED"), resolve("#f00"));
        assert_eq!(resolve("#ff000080").map(|color| color.alpha), Ok(128.0 / 255.0));
    }

    #[test]
    fn functional_notations_keep_their_space() {
        let hsl = resolve("hsl(1, 20%, 30%)");
        assert_eq!(hsl.as_ref().map(|color| color.color_space), Ok("hsl"));
        assert_eq!(hsl.as_ref().map(values), Ok([Some(1.0), Some(20.0), Some(30.0)]));

        let oklch = resolve("oklch(70% 0.1 120deg / 50%)");
        assert_eq!(oklch.as_ref().map(|color| color.color_space), Ok("oklch"));
        assert_eq!(oklch.as_ref().map(values), Ok([Some(0.7), Some(0.1), Some(120.0)]));
        assert_eq!(oklch.as_ref().map(|color| color.alpha), Ok(0.5));

        let p3 = resolve("color(display-p3 -0.6112 1.0079 -0.2192)");
        assert_eq!(p3.as_ref().map(|color| color.color_space), Ok("p3"));
        assert_eq!(p3.as_ref().map(values), Ok([Some(-0.6112), Some(1.0079), Some(-0.2192)]));

        let rgb = resolve("rgb(100 100 100 / 0.2)");
        assert_eq!(rgb.as_ref().map(|color| color.alpha), Ok(0.2));
    }

    #[test]
    fn none_is_not_zero() {
        let color = resolve("lch(50% none 120)");
        assert_eq!(color.as_ref().map(values), Ok([Some(50.0), None, Some(120.0)]));
        assert_ne!(resolve("lch(50% none 120)"), resolve("lch(50% 0 120)"));
        assert_eq!(resolve("rgb(0 0 0 / none)").map(|color| color.alpha), Ok(0.0));
    }

    #[test]
    fn var_references_are_indeterminate() {
        assert_eq!(resolve("var(--brand)"), Err(ValueError::Indeterminate));
        assert_eq!(resolve("var(--x, rgb(0 0 0))"), Err(ValueError::Indeterminate));
        assert_eq!(resolve("rgb(var(--r) 0 0)"), Err(ValueError::Indeterminate));
    }

    #[test]
    fn unparseable_colors_never_panic() {
        for text in ["", "foo", "#12", "#ggg", "rgb(1 2)", "rgb(calc(1) 2 3)", "steps(4)", "canvas", "red blue", "rgb(1 2 3 /)", "color(unknown 1 2 3)"] {
            assert_eq!(resolve(text), Err(ValueError::ColorUnparseable), "{text}");
        }
    }

    #[test]
    fn canonical_text_is_spelling_independent() {
        let first = resolve("#FFF").map(|color| color.canonical_text());
        let second = resolve("white").map(|color| color.canonical_text());
        assert_eq!(first, second);
        assert_eq!(first, Ok("srgb 1 1 1 / 1".to_owned()));
    }
}
