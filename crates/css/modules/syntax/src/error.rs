//! Reasons a value cannot be turned into a canonical structure.

use core::error::Error;
use core::fmt;

/// Why a raw value was rejected by a resolver or destructurer.
///
/// None of these are fatal: callers decide whether a rejected value becomes an
/// unparsed token or is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueError {
    /// The value is the wrong shape for its category (too few nodes, not a single
    /// function, empty).
    StructuralReject,
    /// A unit, keyword or function outside the supported vocabulary.
    Unsupported,
    /// The value depends on a custom property or a computed expression.
    Indeterminate,
    /// A color could not be converted.
    ColorUnparseable,
}

impl fmt::Display for ValueError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::StructuralReject => "value has an unsupported shape",
            Self::Unsupported => "unit or keyword is not supported",
            Self::Indeterminate => "value depends on a custom property or computed expression",
            Self::ColorUnparseable => "color could not be parsed",
        };
        formatter.write_str(reason)
    }
}

impl Error for ValueError {}

/// Whether `text` calls the function `name` anywhere, ignoring ASCII case.
///
/// `name` must be lowercase and include the opening parenthesis, e.g. `"var("`.
pub fn mentions_function(text: &str, name: &str) -> bool {
    text.to_ascii_lowercase().contains(name)
}

/// Whether `text` references a custom property through `var()`.
#[inline]
pub fn references_custom_property(text: &str) -> bool {
    mentions_function(text, "var(")
}
