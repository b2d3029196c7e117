//! The per-category token maps of one run and their JSON form.

use crate::config::TokenConfig;
use crate::identity::TokenMap;
use anyhow::Context as _;
use serde::ser::SerializeMap as _;
use serde::{Serialize, Serializer};

/// Every token of one stylesheet, one map per category.
#[derive(Clone, Debug, Default)]
pub struct DesignTokens {
    pub color: TokenMap,
    pub font_size: TokenMap,
    pub font_family: TokenMap,
    pub line_height: TokenMap,
    pub gradient: TokenMap,
    pub box_shadow: TokenMap,
    pub radius: TokenMap,
    pub duration: TokenMap,
    pub easing: TokenMap,
}

impl DesignTokens {
    /// Category names and maps, in output order.
    pub const fn categories(&self) -> [(&'static str, &TokenMap); 9] {
        [
            ("color", &self.color),
            ("font_size", &self.font_size),
            ("font_family", &self.font_family),
            ("line_height", &self.line_height),
            ("gradient", &self.gradient),
            ("box_shadow", &self.box_shadow),
            ("radius", &self.radius),
            ("duration", &self.duration),
            ("easing", &self.easing),
        ]
    }

    /// Total number of tokens across categories.
    pub fn len(&self) -> usize {
        self.categories().iter().map(|(_, map)| map.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize to a design-token JSON document.
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self, config: &TokenConfig) -> anyhow::Result<String> {
        let document = ConfiguredTokens {
            tokens: self,
            config,
        };
        let json = if config.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        json.context("failed to serialize design tokens")
    }

    /// Serialize to a `serde_json::Value`.
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_value(&self, config: &TokenConfig) -> anyhow::Result<serde_json::Value> {
        serde_json::to_value(ConfiguredTokens {
            tokens: self,
            config,
        })
        .context("failed to serialize design tokens")
    }
}

struct ConfiguredTokens<'tokens> {
    tokens: &'tokens DesignTokens,
    config: &'tokens TokenConfig,
}

impl Serialize for ConfiguredTokens<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let categories = self.tokens.categories();
        let mut map = serializer.serialize_map(Some(categories.len()))?;
        for (name, tokens) in categories {
            map.serialize_entry(name, &tokens.with_config(self.config))?;
        }
        map.end()
    }
}
