//! Content-derived token ids and the merging token map.

use crate::config::TokenConfig;
use crate::token::{Token, TokenValue};
use core::hash::Hasher as _;
use rustc_hash::{FxHashMap, FxHasher};
use serde::ser::SerializeMap as _;
use serde::{Serialize, Serializer};

/// Short deterministic hash of `key`, in base 36.
///
/// `FxHasher` output depends on pointer width, so ids differ between 32-bit
/// and 64-bit targets.
pub fn content_hash(key: &str) -> String {
    let mut hasher = FxHasher::default();
    hasher.write(key.as_bytes());
    to_base36(hasher.finish())
}

fn to_base36(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        if let Some(digit) = char::from_digit((value % 36) as u32, 36) {
            digits.push(digit);
        }
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

/// `<prefix>-<hash>` for a canonical value.
///
/// The prefix is the category (or color group), so equal values in different
/// categories get different ids.
pub fn token_id(prefix: &str, value: &TokenValue) -> String {
    format!("{prefix}-{}", content_hash(&value.identity_key()))
}

/// Tokens of one category keyed by id, in first-emitted order.
#[derive(Clone, Debug, Default)]
pub struct TokenMap {
    tokens: Vec<Token>,
    index: FxHashMap<String, usize>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token, merging it into an existing token with the same id.
    pub fn insert(&mut self, token: Token) {
        if let Some(existing) = self
            .index
            .get(&token.id)
            .and_then(|position| self.tokens.get_mut(*position))
        {
            log::trace!(
                "merging `{}` into {} ({} + {} uses)",
                token.authored_as,
                existing.id,
                existing.usage_count,
                token.usage_count
            );
            existing.absorb(token);
            return;
        }
        self.index.insert(token.id.clone(), self.tokens.len());
        self.tokens.push(token);
    }

    pub fn get(&self, id: &str) -> Option<&Token> {
        self.index
            .get(id)
            .and_then(|position| self.tokens.get(*position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// A serializable `{id: token}` view.
    pub const fn with_config<'map>(&'map self, config: &'map TokenConfig) -> ConfiguredTokenMap<'map> {
        ConfiguredTokenMap { map: self, config }
    }
}

/// A token map paired with the settings it serializes under.
pub struct ConfiguredTokenMap<'map> {
    map: &'map TokenMap,
    config: &'map TokenConfig,
}

impl Serialize for ConfiguredTokenMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.map.len()))?;
        for token in self.map.iter() {
            map.serialize_entry(&token.id, &token.with_config(self.config))?;
        }
        map.end()
    }
}
