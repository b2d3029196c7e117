//! Design tokens from authored CSS.
//!
//! A stylesheet is analyzed into per-category occurrence maps, then each
//! category is destructured into canonical values, deduplicated by content id
//! and serialized in the design-token interchange shape.

#![forbid(unsafe_code)]

mod analysis;
mod assembler;
mod config;
mod identity;
mod occurrences;
mod output;
mod token;

pub use analysis::{StylesheetValues, analyze_stylesheet};
pub use assembler::{TokenAssembler, assemble_category};
pub use config::{DEFAULT_EXTENSION_NAMESPACE, TokenConfig};
pub use identity::{ConfiguredTokenMap, TokenMap, content_hash, token_id};
pub use occurrences::{RawValue, SourceLocation, ValueOccurrences};
pub use output::DesignTokens;
pub use token::{ConfiguredToken, Token, TokenValue};

/// Analyze `css` and assemble its tokens with the standard color spaces.
pub fn tokens_from_css(css: &str) -> DesignTokens {
    TokenAssembler::default().assemble(&analyze_stylesheet(css))
}
