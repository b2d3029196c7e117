//! CSS Backgrounds and Borders Module Level 3 — §7.1 Drop shadows: the `box-shadow` property
//! Spec: <https://www.w3.org/TR/css-backgrounds-3/#box-shadow>

use core::mem;
use css_color::{COLOR_FUNCTIONS, Color, ColorResolver, is_color_identifier};
use css_syntax::{NodeKind, ValueError, ValueNode, parse_value_nodes};
use css_values_units::Dimension;
use serde::Serialize;

/// One complete shadow layer. Every field is populated.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowRecord {
    pub color: Color,
    pub offset_x: Dimension,
    pub offset_y: Dimension,
    pub blur: Dimension,
    pub spread: Dimension,
    pub inset: bool,
}

impl ShadowRecord {
    /// Canonical text of the layer, e.g. `srgb 0 0 0 / 1 2px 4px 0px 0px`.
    pub fn canonical_text(&self) -> String {
        let mut text = format!(
            "{} {} {} {} {}",
            self.color.canonical_text(),
            self.offset_x.canonical_text(),
            self.offset_y.canonical_text(),
            self.blur.canonical_text(),
            self.spread.canonical_text()
        );
        if self.inset {
            text.push_str(" inset");
        }
        text
    }
}

/// A layer while its nodes are being read.
#[derive(Default)]
struct LayerBuilder {
    color: Option<Color>,
    /// offset-x, offset-y, blur, spread; filled in that order.
    lengths: [Option<Dimension>; 4],
    inset: bool,
}

impl LayerBuilder {
    /// Set the color unless one is already set. `resolve` only runs when the
    /// slot is empty; a failed resolution leaves it empty.
    fn offer_color(&mut self, resolve: impl FnOnce() -> Option<Color>) {
        if self.color.is_none() {
            self.color = resolve();
        }
    }

    /// Fill the next empty length slot. A fifth length is dropped.
    fn push_length(&mut self, length: Dimension) {
        if let Some(slot) = self.lengths.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(length);
        }
    }

    fn finish(self) -> ShadowRecord {
        let [offset_x, offset_y, blur, spread] = self
            .lengths
            .map(|length| length.unwrap_or_else(Dimension::zero));
        ShadowRecord {
            color: self.color.unwrap_or_else(Color::black),
            offset_x,
            offset_y,
            blur,
            spread,
            inset: self.inset,
        }
    }
}

/// Whether a node may carry a shadow color.
fn is_color_candidate(node: &ValueNode) -> bool {
    match &node.kind {
        NodeKind::Identifier(name) => is_color_identifier(name),
        NodeKind::Function { name, .. } => {
            COLOR_FUNCTIONS.contains(name) || name.eq_ignore_ascii_case("var")
        }
        NodeKind::Hash(_) => true,
        NodeKind::Dimension { .. }
        | NodeKind::Number(_)
        | NodeKind::Percentage(_)
        | NodeKind::Operator(_)
        | NodeKind::QuotedString(_)
        | NodeKind::Other => false,
    }
}

/// Split a `box-shadow` value into complete layers.
///
/// Nodes are classified by kind, not position, so `#000 2px 4px` and
/// `2px 4px #000` give the same layer. Within a layer the first color that
/// resolves wins; lengths fill offset-x, offset-y, blur and spread in order.
/// Missing lengths are `0px`, a missing color is opaque black.
///
/// # Errors
/// `StructuralReject` when the value has fewer than two nodes.
pub fn destructure_shadow(
    text: &str,
    resolver: &ColorResolver,
) -> Result<Vec<ShadowRecord>, ValueError> {
    let nodes = parse_value_nodes(text);
    if nodes.len() < 2 {
        return Err(ValueError::StructuralReject);
    }

    let mut layers = Vec::new();
    let mut layer = LayerBuilder::default();
    for node in &nodes {
        match &node.kind {
            NodeKind::Operator(',') => {
                layers.push(mem::take(&mut layer).finish());
            }
            NodeKind::Identifier(name) if name.eq_ignore_ascii_case("inset") => layer.inset = true,
            NodeKind::Dimension { value, unit } => layer.push_length(Dimension::new(*value, unit)),
            NodeKind::Number(_) if node.is_zero_number() => layer.push_length(Dimension::zero()),
            _ if is_color_candidate(node) => {
                layer.offer_color(|| resolver.resolve(node.text(text)).ok());
            }
            _ => {}
        }
    }
    layers.push(layer.finish());
    log::trace!("box-shadow `{text}` has {} layer(s)", layers.len());
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shadow(text: &str) -> Result<Vec<ShadowRecord>, ValueError> {
        let _ = env_logger::builder().is_test(true).try_init();
        destructure_shadow(text, &ColorResolver::default())
    }

    fn px(value: f64) -> Dimension {
        Dimension::new(value, "px")
    }

    fn resolve(text: &str) -> Color {
        ColorResolver::default()
            .resolve(text)
            .unwrap_or_else(|_| Color::transparent())
    }

    #[test]
    fn missing_fields_are_completed() {
        assert_eq!(
            shadow("2px 4px #000"),
            Ok(vec![ShadowRecord {
                color: Color::black(),
                offset_x: px(2.0),
                offset_y: px(4.0),
                blur: Dimension::zero(),
                spread: Dimension::zero(),
                inset: false,
            }])
        );
        assert_eq!(
            shadow("2px 4px").map(|layers| layers.into_iter().map(|layer| layer.color).collect::<Vec<_>>()),
            Ok(vec![Color::black()])
        );
    }

    #[test]
    fn field_order_does_not_matter() {
        assert_eq!(shadow("#000 2px 4px 6px 8px"), shadow("2px 4px 6px 8px #000"));
        assert_eq!(shadow("inset 1px 1px red"), shadow("1px 1px red inset"));
    }

    #[test]
    fn splits_layers_on_commas() {
        let layers = shadow("2px 4px 6px 8px #000, 0 0 0 0 #fff inset").unwrap_or_default();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.first().map(|layer| layer.inset), Some(false));
        assert_eq!(layers.get(1).map(|layer| layer.inset), Some(true));
        assert_eq!(layers.get(1).map(|layer| layer.color.clone()), Some(resolve("#fff")));
        assert_eq!(layers.get(1).map(|layer| layer.spread.clone()), Some(Dimension::zero()));
    }

    #[test]
    fn fifth_length_is_dropped() {
        let layers = shadow("1px 2px 3px 4px 5px red");
        assert_eq!(
            layers.map(|layers| layers.into_iter().map(|layer| layer.spread).collect::<Vec<_>>()),
            Ok(vec![px(4.0)])
        );
    }

    #[test]
    fn first_resolved_color_wins() {
        let layers = shadow("1px 1px red blue");
        assert_eq!(
            layers.map(|layers| layers.into_iter().map(|layer| layer.color).collect::<Vec<_>>()),
            Ok(vec![resolve("red")])
        );
        let layers = shadow("1px 1px var(--shadow) rgb(0 0 255)");
        assert_eq!(
            layers.map(|layers| layers.into_iter().map(|layer| layer.color).collect::<Vec<_>>()),
            Ok(vec![resolve("blue")])
        );
    }

    #[test]
    fn keeps_authored_units_and_signs() {
        let layers = shadow("-1REM 0.5em 0 2px rgba(0, 0, 0, 0.5)").unwrap_or_default();
        let layer = layers.first();
        assert_eq!(layer.map(|layer| layer.offset_x.clone()), Some(Dimension::new(-1.0, "rem")));
        assert_eq!(layer.map(|layer| layer.offset_y.clone()), Some(Dimension::new(0.5, "em")));
        assert_eq!(layer.map(|layer| layer.blur.clone()), Some(Dimension::zero()));
        assert_eq!(layer.map(|layer| layer.color.alpha), Some(0.5));
    }

    #[test]
    fn too_short_values_are_rejected() {
        assert_eq!(shadow(""), Err(ValueError::StructuralReject));
        assert_eq!(shadow("none"), Err(ValueError::StructuralReject));
        assert_eq!(shadow("var(--shadow)"), Err(ValueError::StructuralReject));
    }

    #[test]
    fn canonical_text_names_every_field() {
        let text = shadow("0 0 0 0 #fff inset").map(|layers| {
            layers.iter().map(ShadowRecord::canonical_text).collect::<Vec<_>>()
        });
        assert_eq!(text, Ok(vec!["srgb 1 1 1 / 1 0px 0px 0px 0px inset".to_owned()]));
    }
}
