//! CSS Values & Units Level 3 — §7.3 Duration units: the `<time>` type
//! Spec: <https://www.w3.org/TR/css-values-3/#time>

use crate::chapter_6_dimensions::Dimension;
use css_syntax::{NodeKind, ValueError, parse_value_nodes, references_custom_property};

const MILLISECONDS_PER_SECOND: f64 = 1000.0;

/// Convert a single `<time>` to milliseconds.
///
/// `ms` and `s` are accepted in any case, and a unitless `0` is zero. Lists,
/// `var()` references and anything else are unconvertible.
pub fn convert_duration(text: &str) -> Option<f64> {
    if references_custom_property(text) {
        return None;
    }
    let nodes = parse_value_nodes(text);
    let [node] = nodes.as_slice() else {
        return None;
    };
    match &node.kind {
        NodeKind::Dimension { value, unit } if unit.eq_ignore_ascii_case("ms") => Some(*value),
        NodeKind::Dimension { value, unit } if unit.eq_ignore_ascii_case("s") => {
            Some(value * MILLISECONDS_PER_SECOND)
        }
        NodeKind::Number(value) if *value == 0.0 => Some(0.0),
        _ => None,
    }
}

/// Resolve a duration into a `{value, "ms"}` dimension.
///
/// # Errors
/// `Indeterminate` for `var()` references, `Unsupported` for anything that is
/// not a single `<time>`.
pub fn resolve_duration(text: &str) -> Result<Dimension, ValueError> {
    if references_custom_property(text) {
        return Err(ValueError::Indeterminate);
    }
    convert_duration(text)
        .map(|millis| Dimension::new(millis, "ms"))
        .ok_or(ValueError::Unsupported)
}
