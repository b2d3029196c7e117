//! Output settings for serialized token files.
//!
//! Settings only shape serialization. Token ids and values never depend on them.
//! They can be loaded from environment variables or constructed programmatically.

use std::env;

/// Namespace used for `$extensions` keys when none is configured.
pub const DEFAULT_EXTENSION_NAMESPACE: &str = "org.design-tokens.css";

/// Serialization settings for a token file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenConfig {
    /// Prefix of every `$extensions` key, e.g. `org.design-tokens.css`.
    pub extension_namespace: String,
    /// Whether JSON output is indented.
    pub pretty: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION_NAMESPACE, false)
    }
}

impl TokenConfig {
    /// Construct a `TokenConfig` with explicit values.
    ///
    /// A blank namespace falls back to [`DEFAULT_EXTENSION_NAMESPACE`].
    #[inline]
    #[must_use]
    pub fn new(extension_namespace: &str, pretty: bool) -> Self {
        let namespace = extension_namespace.trim();
        let namespace = if namespace.is_empty() {
            DEFAULT_EXTENSION_NAMESPACE
        } else {
            namespace
        };
        Self {
            extension_namespace: namespace.to_owned(),
            pretty,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `DESIGN_TOKENS_NAMESPACE`: extension namespace (default: `org.design-tokens.css`)
    /// - `DESIGN_TOKENS_PRETTY`: set to "1" to indent JSON output (default: compact)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let namespace = env::var("DESIGN_TOKENS_NAMESPACE").unwrap_or_default();
        let pretty = env::var("DESIGN_TOKENS_PRETTY").ok().as_deref() == Some("1");
        Self::new(&namespace, pretty)
    }

    /// Full `$extensions` key for `name`, e.g. `org.design-tokens.css.usage-count`.
    #[inline]
    pub fn extension_key(&self, name: &str) -> String {
        format!("{}.{name}", self.extension_namespace)
    }
}
