//! The token model and its interchange serialization (`$type`, `$value`, `$extensions`).

use crate::config::TokenConfig;
use css_backgrounds_borders::ShadowRecord;
use css_color::Color;
use css_easing::CubicBezier;
use css_images::GradientStop;
use css_values_units::{Dimension, format_number};
use serde::ser::{SerializeMap as _, SerializeSeq as _};
use serde::{Serialize, Serializer};

/// Canonical value of a token, or the raw text when nothing canonical exists.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Color(Color),
    Dimension(Dimension),
    Number(f64),
    Shadow(Vec<ShadowRecord>),
    Gradient(Vec<GradientStop>),
    FontFamily(Vec<String>),
    CubicBezier(CubicBezier),
    Duration(Dimension),
    /// Raw authored text passed through verbatim.
    Unparsed(String),
}

impl TokenValue {
    /// The `$type` tag; unparsed values have none.
    pub const fn type_tag(&self) -> Option<&'static str> {
        match self {
            Self::Color(_) => Some("color"),
            Self::Dimension(_) => Some("dimension"),
            Self::Number(_) => Some("number"),
            Self::Shadow(_) => Some("shadow"),
            Self::Gradient(_) => Some("gradient"),
            Self::FontFamily(_) => Some("fontFamily"),
            Self::CubicBezier(_) => Some("cubicBezier"),
            Self::Duration(_) => Some("duration"),
            Self::Unparsed(_) => None,
        }
    }

    /// Text the token id is derived from: the type tag plus the canonical
    /// value, or the raw text for unparsed values.
    pub fn identity_key(&self) -> String {
        let canonical = match self {
            Self::Color(color) => color.canonical_text(),
            Self::Dimension(dimension) | Self::Duration(dimension) => dimension.canonical_text(),
            Self::Number(number) => format_number(*number),
            Self::Shadow(layers) => layers
                .iter()
                .map(ShadowRecord::canonical_text)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Gradient(stops) => stops
                .iter()
                .map(GradientStop::canonical_text)
                .collect::<Vec<_>>()
                .join(", "),
            Self::FontFamily(families) => format!("{families:?}"),
            Self::CubicBezier(points) => points
                .iter()
                .map(|point| format_number(*point))
                .collect::<Vec<_>>()
                .join(","),
            Self::Unparsed(raw) => return raw.clone(),
        };
        match self.type_tag() {
            Some(tag) => format!("{tag}:{canonical}"),
            None => canonical,
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Color(color) => color.serialize(serializer),
            Self::Dimension(dimension) | Self::Duration(dimension) => dimension.serialize(serializer),
            Self::Number(number) => serializer.serialize_f64(*number),
            // A lone layer is an object; several layers are a list.
            Self::Shadow(layers) => match layers.as_slice() {
                [layer] => layer.serialize(serializer),
                _ => layers.serialize(serializer),
            },
            Self::Gradient(stops) => stops.serialize(serializer),
            Self::FontFamily(families) => families.serialize(serializer),
            Self::CubicBezier(points) => {
                let mut seq = serializer.serialize_seq(Some(points.len()))?;
                for point in points {
                    seq.serialize_element(point)?;
                }
                seq.end()
            }
            Self::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

/// One output token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub id: String,
    pub value: TokenValue,
    /// The last raw string merged into this token.
    pub authored_as: String,
    pub usage_count: usize,
    /// Originating properties; only color tokens carry these.
    pub css_properties: Option<Vec<String>>,
}

impl Token {
    /// Fold a token with the same id into this one.
    ///
    /// The canonical value is kept, counts are summed, properties are unioned
    /// in first-seen order, and `authored_as` becomes the newer raw string.
    pub fn absorb(&mut self, newer: Self) {
        self.usage_count += newer.usage_count;
        self.authored_as = newer.authored_as;
        if let Some(added) = newer.css_properties {
            let known = self.css_properties.get_or_insert_with(Vec::new);
            for property in added {
                if !known.contains(&property) {
                    known.push(property);
                }
            }
        }
    }

    /// A serializable view using the configured extension namespace.
    pub const fn with_config<'tok>(&'tok self, config: &'tok TokenConfig) -> ConfiguredToken<'tok> {
        ConfiguredToken {
            token: self,
            config,
        }
    }
}

/// A token paired with the settings it serializes under.
pub struct ConfiguredToken<'tok> {
    token: &'tok Token,
    config: &'tok TokenConfig,
}

impl Serialize for ConfiguredToken<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(tag) = self.token.value.type_tag() {
            map.serialize_entry("$type", tag)?;
        }
        map.serialize_entry("$value", &self.token.value)?;
        map.serialize_entry(
            "$extensions",
            &Extensions {
                token: self.token,
                config: self.config,
            },
        )?;
        map.end()
    }
}

struct Extensions<'tok> {
    token: &'tok Token,
    config: &'tok TokenConfig,
}

impl Serialize for Extensions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(
            &self.config.extension_key("css-authored-as"),
            &self.token.authored_as,
        )?;
        map.serialize_entry(
            &self.config.extension_key("usage-count"),
            &self.token.usage_count,
        )?;
        if let Some(properties) = &self.token.css_properties {
            map.serialize_entry(&self.config.extension_key("css-properties"), properties)?;
        }
        map.end()
    }
}
