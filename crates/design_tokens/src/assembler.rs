//! Token assembly: one pass per category from occurrence maps to token maps.
//!
//! Colors and every other category fail differently. A color that cannot be
//! resolved is dropped unless it references `var()`, in which case it is kept
//! as an unparsed token in the `unknown` group. Every other category keeps
//! any value it cannot destructure as an unparsed token.

use crate::analysis::StylesheetValues;
use crate::identity::{TokenMap, token_id};
use crate::occurrences::{RawValue, ValueOccurrences};
use crate::output::DesignTokens;
use crate::token::{Token, TokenValue};
use css_backgrounds_borders::destructure_shadow;
use css_color::{ColorResolver, group_colors};
use css_easing::destructure_easing;
use css_fonts::destructure_font_family;
use css_images::destructure_gradient;
use css_syntax::{ValueError, references_custom_property};
use css_values_units::{LineHeight, resolve_duration, resolve_font_size, resolve_line_height};

/// Builds token maps from authored values. Holds the color resolver and its
/// space registry for the lifetime of the composing application.
#[derive(Clone, Debug, Default)]
pub struct TokenAssembler {
    resolver: ColorResolver,
}

impl TokenAssembler {
    pub const fn new(resolver: ColorResolver) -> Self {
        Self { resolver }
    }

    /// Assemble every category of a stylesheet.
    pub fn assemble(&self, values: &StylesheetValues) -> DesignTokens {
        let tokens = DesignTokens {
            color: self.colors(&values.colors),
            font_size: assemble_category(&values.font_sizes, "fontSize", |raw| {
                resolve_font_size(raw).map(TokenValue::Dimension)
            }),
            font_family: assemble_category(&values.font_families, "fontFamily", |raw| {
                destructure_font_family(raw).map(TokenValue::FontFamily)
            }),
            line_height: assemble_category(&values.line_heights, "lineHeight", |raw| {
                resolve_line_height(raw).map(|line_height| match line_height {
                    LineHeight::Number(number) => TokenValue::Number(number),
                    LineHeight::Dimension(dimension) => TokenValue::Dimension(dimension),
                })
            }),
            gradient: assemble_category(&values.gradients, "gradient", |raw| {
                destructure_gradient(raw, &self.resolver).map(TokenValue::Gradient)
            }),
            box_shadow: assemble_category(&values.box_shadows, "boxShadow", |raw| {
                destructure_shadow(raw, &self.resolver).map(TokenValue::Shadow)
            }),
            radius: assemble_category(&values.radii, "radius", |raw| {
                Ok(TokenValue::Unparsed(raw.to_owned()))
            }),
            duration: assemble_category(&values.durations, "duration", |raw| {
                resolve_duration(raw).map(TokenValue::Duration)
            }),
            easing: assemble_category(&values.easings, "easing", |raw| {
                destructure_easing(raw).map(TokenValue::CubicBezier)
            }),
        };
        log::info!(
            "assembled {} tokens ({})",
            tokens.len(),
            tokens
                .categories()
                .iter()
                .map(|(name, map)| format!("{name}: {}", map.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        tokens
    }

    /// Group, then resolve each color; ids are prefixed with the group name.
    pub fn colors(&self, occurrences: &ValueOccurrences) -> TokenMap {
        let mut map = TokenMap::new();
        let groups = group_colors(
            occurrences.iter().map(|raw| raw.text.as_str()),
            &self.resolver,
        );
        for (group, members) in groups {
            for raw in members.into_iter().filter_map(|text| occurrences.get(text)) {
                let value = match self.resolver.resolve(&raw.text) {
                    Ok(color) => TokenValue::Color(color),
                    Err(_) if references_custom_property(&raw.text) => {
                        log::debug!("color `{}` references a custom property; kept unparsed", raw.text);
                        TokenValue::Unparsed(raw.text.clone())
                    }
                    Err(error) => {
                        log::debug!("dropping color `{}`: {error}", raw.text);
                        continue;
                    }
                };
                map.insert(token_from(group.as_str(), value, raw, true));
            }
        }
        map
    }
}

fn token_from(prefix: &str, value: TokenValue, raw: &RawValue, with_properties: bool) -> Token {
    Token {
        id: token_id(prefix, &value),
        value,
        authored_as: raw.text.clone(),
        usage_count: raw.count,
        css_properties: with_properties.then(|| raw.properties.clone()),
    }
}

/// Run `destructure` over every value of a category, falling back to an
/// unparsed token for anything it rejects.
pub fn assemble_category(
    occurrences: &ValueOccurrences,
    prefix: &str,
    destructure: impl Fn(&str) -> Result<TokenValue, ValueError>,
) -> TokenMap {
    let mut map = TokenMap::new();
    for raw in occurrences.iter() {
        let value = destructure(&raw.text).unwrap_or_else(|error| {
            log::debug!("{prefix} `{}` kept unparsed: {error}", raw.text);
            TokenValue::Unparsed(raw.text.clone())
        });
        map.insert(token_from(prefix, value, raw, false));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrences(values: &[(&str, usize)]) -> ValueOccurrences {
        values.iter().copied().collect()
    }

    fn assembler() -> TokenAssembler {
        let _ = env_logger::builder().is_test(true).try_init();
        TokenAssembler::default()
    }

    #[test]
    fn equivalent_colors_merge_with_summed_counts() {
        let map = assembler().colors(&occurrences(&[("#000", 2), ("black", 3), ("rgb(0 0 0)", 1)]));
        assert_eq!(map.len(), 1);
        let token = map.iter().next();
        assert_eq!(token.map(|token| token.usage_count), Some(6));
        assert_eq!(token.map(|token| token.authored_as.as_str()), Some("rgb(0 0 0)"));
        assert!(token.is_some_and(|token| token.id.starts_with("black-")));
    }

    #[test]
    fn spellings_of_one_color_share_a_group_prefix() {
        let map = assembler().colors(&occurrences(&[
            ("#000", 1),
            ("currentcolor", 2),
            ("#f00", 1),
            ("color(srgb 1 0 0)", 1),
        ]));
        let tokens: Vec<(&str, usize)> = map
            .iter()
            .map(|token| (token.id.split('-').next().unwrap_or_default(), token.usage_count))
            .collect();
        assert_eq!(tokens, vec![("black", 3), ("red", 2)]);
    }

    #[test]
    fn invalid_colors_are_dropped_but_variables_kept() {
        let map = assembler().colors(&occurrences(&[("var(--brand)", 1), ("rgb(nope)", 1), ("red", 1)]));
        let values: Vec<&TokenValue> = map.iter().map(|token| &token.value).collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.first(), Some(&&TokenValue::Unparsed("var(--brand)".to_owned())));
        assert!(map.iter().next().is_some_and(|token| token.id.starts_with("unknown-")));
    }

    #[test]
    fn other_categories_fall_back_to_unparsed() {
        let map = assemble_category(&occurrences(&[("1em", 1), ("16px", 1)]), "fontSize", |raw| {
            resolve_font_size(raw).map(TokenValue::Dimension)
        });
        let values: Vec<Option<&str>> = map.iter().map(|token| token.value.type_tag()).collect();
        assert_eq!(values, vec![None, Some("dimension")]);
    }

    #[test]
    fn unparsed_ids_come_from_the_raw_text() {
        let first = assemble_category(&occurrences(&[("4px 2px", 1)]), "radius", |raw| {
            Ok(TokenValue::Unparsed(raw.to_owned()))
        });
        let second = assemble_category(&occurrences(&[("4px  2px", 1)]), "radius", |raw| {
            Ok(TokenValue::Unparsed(raw.to_owned()))
        });
        let first_id = first.iter().next().map(|token| token.id.clone());
        let second_id = second.iter().next().map(|token| token.id.clone());
        assert_ne!(first_id, second_id);
    }
}
