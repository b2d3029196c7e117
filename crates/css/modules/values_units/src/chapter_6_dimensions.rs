//! CSS Values & Units Level 3 — §6 Dimensions (design-token subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>
//!
//! Design tokens only describe `px` and `rem` lengths. Font sizes additionally
//! accept the absolute-size keywords; line heights accept numbers, percentages
//! and `normal`.

use crate::chapter_4_numbers::{canonical_number, format_number};
use css_syntax::{NodeKind, ValueError, ValueNode, parse_value_nodes, references_custom_property};
use serde::Serialize;

/// `<absolute-size>` keywords in rem, smallest first.
/// Spec: <https://www.w3.org/TR/css-fonts-4/#absolute-size-mapping>
const ABSOLUTE_SIZES: [(&str, f64); 8] = [
    ("xx-small", 0.6),
    ("x-small", 0.75),
    ("small", 0.89),
    ("medium", 1.0),
    ("large", 1.2),
    ("x-large", 1.5),
    ("xx-large", 2.0),
    ("xxx-large", 3.0),
];

/// Used value of `line-height: normal` as a multiplier.
/// Spec: <https://www.w3.org/TR/css-inline-3/#valdef-line-height-normal>
const NORMAL_LINE_HEIGHT: f64 = 1.2;

/// A number with a lowercase unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dimension {
    pub value: f64,
    pub unit: String,
}

impl Dimension {
    /// Build a dimension; the unit is lowercased and `-0` becomes `0`.
    pub fn new(value: f64, unit: &str) -> Self {
        Self {
            value: canonical_number(value),
            unit: unit.to_ascii_lowercase(),
        }
    }

    /// The canonical zero length, `0px`.
    pub fn zero() -> Self {
        Self::new(0.0, "px")
    }

    /// Canonical text such as `16px`, independent of authored spelling.
    pub fn canonical_text(&self) -> String {
        format!("{}{}", format_number(self.value), self.unit)
    }
}

/// A resolved `line-height`: either a multiplier or an absolute length.
#[derive(Clone, Debug, PartialEq)]
pub enum LineHeight {
    Number(f64),
    Dimension(Dimension),
}

/// Look up an `<absolute-size>` keyword, ignoring ASCII case.
pub fn absolute_size_rem(keyword: &str) -> Option<f64> {
    ABSOLUTE_SIZES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(keyword))
        .map(|(_, rem)| *rem)
}

/// Whether a unit is one a design-token dimension can carry.
fn is_token_length_unit(unit: &str) -> bool {
    unit.eq_ignore_ascii_case("px") || unit.eq_ignore_ascii_case("rem")
}

/// Rejection for a function-valued length: math functions cannot be resolved
/// statically, anything else is simply not a length.
fn function_rejection(name: &str) -> ValueError {
    const MATH_FUNCTIONS: [&str; 5] = ["calc", "min", "max", "clamp", "env"];
    if MATH_FUNCTIONS
        .iter()
        .any(|math| math.eq_ignore_ascii_case(name))
    {
        ValueError::Indeterminate
    } else {
        ValueError::Unsupported
    }
}

/// The only node of a single-node value.
fn single_node(text: &str) -> Result<ValueNode, ValueError> {
    if references_custom_property(text) {
        return Err(ValueError::Indeterminate);
    }
    let mut nodes = parse_value_nodes(text);
    if nodes.len() != 1 {
        return Err(ValueError::StructuralReject);
    }
    nodes.pop().ok_or(ValueError::StructuralReject)
}

/// Resolve a `font-size` into a `px` or `rem` dimension.
///
/// Accepts unitless `0`, `px`/`rem` dimensions and the absolute-size keywords.
/// Every zero length becomes `0px` whatever its authored unit.
///
/// # Errors
/// `StructuralReject` unless the value is exactly one node, `Indeterminate` for
/// `var()` and math functions, `Unsupported` for other units and keywords.
pub fn resolve_font_size(text: &str) -> Result<Dimension, ValueError> {
    match single_node(text)?.kind {
        NodeKind::Dimension { value, .. } if value == 0.0 => Ok(Dimension::zero()),
        NodeKind::Dimension { value, unit } if is_token_length_unit(&unit) => {
            Ok(Dimension::new(value, &unit))
        }
        NodeKind::Number(value) if value == 0.0 => Ok(Dimension::zero()),
        NodeKind::Identifier(name) => absolute_size_rem(&name)
            .map(|rem| Dimension::new(rem, "rem"))
            .ok_or(ValueError::Unsupported),
        NodeKind::Function { name, .. } => Err(function_rejection(&name)),
        NodeKind::Dimension { .. }
        | NodeKind::Number(_)
        | NodeKind::Percentage(_)
        | NodeKind::Hash(_)
        | NodeKind::Operator(_)
        | NodeKind::QuotedString(_)
        | NodeKind::Other => Err(ValueError::Unsupported),
    }
}

/// Resolve a `line-height`.
///
/// Numbers are multipliers, percentages become multipliers (`120%` → `1.2`),
/// `normal` is `1.2`, and `px`/`rem` lengths stay lengths. Other length units
/// are rejected even though CSS allows them: a token cannot carry `em`.
///
/// # Errors
/// `StructuralReject` unless the value is exactly one node, `Indeterminate` for
/// `var()` and math functions, `Unsupported` for other units and keywords.
pub fn resolve_line_height(text: &str) -> Result<LineHeight, ValueError> {
    match single_node(text)?.kind {
        NodeKind::Number(value) => Ok(LineHeight::Number(canonical_number(value))),
        NodeKind::Percentage(value) => Ok(LineHeight::Number(canonical_number(value / 100.0))),
        NodeKind::Dimension { value, unit } if is_token_length_unit(&unit) => {
            if value == 0.0 {
                Ok(LineHeight::Dimension(Dimension::zero()))
            } else {
                Ok(LineHeight::Dimension(Dimension::new(value, &unit)))
            }
        }
        NodeKind::Identifier(name) if name.eq_ignore_ascii_case("normal") => {
            Ok(LineHeight::Number(NORMAL_LINE_HEIGHT))
        }
        NodeKind::Function { name, .. } => Err(function_rejection(&name)),
        NodeKind::Dimension { .. }
        | NodeKind::Identifier(_)
        | NodeKind::Hash(_)
        | NodeKind::Operator(_)
        | NodeKind::QuotedString(_)
        | NodeKind::Other => Err(ValueError::Unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f64) -> Dimension {
        Dimension::new(value, "px")
    }

    fn rem(value: f64) -> Dimension {
        Dimension::new(value, "rem")
    }

    #[test]
    fn font_size_px_and_rem() {
        assert_eq!(resolve_font_size("1px"), Ok(px(1.0)));
        assert_eq!(resolve_font_size("1.5px"), Ok(px(1.5)));
        assert_eq!(resolve_font_size(".5px"), Ok(px(0.5)));
        assert_eq!(resolve_font_size("1e2px"), Ok(px(100.0)));
        assert_eq!(resolve_font_size("1.5rem"), Ok(rem(1.5)));
        assert_eq!(resolve_font_size("16.0PX"), Ok(px(16.0)));
    }

    #[test]
    fn font_size_absolute_keywords() {
        assert_eq!(resolve_font_size("xx-small"), Ok(rem(0.6)));
        assert_eq!(resolve_font_size("x-small"), Ok(rem(0.75)));
        assert_eq!(resolve_font_size("small"), Ok(rem(0.89)));
        assert_eq!(resolve_font_size("medium"), Ok(rem(1.0)));
        assert_eq!(resolve_font_size("LARGE"), Ok(rem(1.2)));
        assert_eq!(resolve_font_size("x-large"), Ok(rem(1.5)));
        assert_eq!(resolve_font_size("xx-large"), Ok(rem(2.0)));
        assert_eq!(resolve_font_size("xxx-large"), Ok(rem(3.0)));
    }

    #[test]
    fn font_size_zero_is_always_px() {
        for zero in ["0", "0.0", "+0", "0px", "0rem", "0em", "-0px"] {
            assert_eq!(resolve_font_size(zero), Ok(Dimension::zero()), "{zero}");
        }
    }

    #[test]
    fn font_size_rejections() {
        assert_eq!(resolve_font_size(""), Err(ValueError::StructuralReject));
        assert_eq!(resolve_font_size("1"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("1.5"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("100%"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("100vh"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("1em"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("smaller"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("inherit"), Err(ValueError::Unsupported));
        assert_eq!(resolve_font_size("var(--size)"), Err(ValueError::Indeterminate));
        assert_eq!(
            resolve_font_size("calc(1rem + 2px)"),
            Err(ValueError::Indeterminate)
        );
        assert_eq!(resolve_font_size("1px 2px"), Err(ValueError::StructuralReject));
    }

    #[test]
    fn line_height_numbers_and_percentages() {
        assert_eq!(resolve_line_height("normal"), Ok(LineHeight::Number(1.2)));
        assert_eq!(resolve_line_height("1"), Ok(LineHeight::Number(1.0)));
        assert_eq!(resolve_line_height("1.0"), Ok(LineHeight::Number(1.0)));
        assert_eq!(resolve_line_height("1.1"), Ok(LineHeight::Number(1.1)));
        assert_eq!(resolve_line_height("1e2"), Ok(LineHeight::Number(100.0)));
        assert_eq!(resolve_line_height("120%"), Ok(LineHeight::Number(1.2)));
        assert_eq!(resolve_line_height("0%"), Ok(LineHeight::Number(0.0)));
        assert_eq!(resolve_line_height("1.1%"), Ok(LineHeight::Number(1.1 / 100.0)));
        assert_eq!(resolve_line_height("2e2%"), Ok(LineHeight::Number(2.0)));
    }

    #[test]
    fn line_height_lengths() {
        assert_eq!(resolve_line_height("1px"), Ok(LineHeight::Dimension(px(1.0))));
        assert_eq!(resolve_line_height("1rem"), Ok(LineHeight::Dimension(rem(1.0))));
        assert_eq!(resolve_line_height("1e2rem"), Ok(LineHeight::Dimension(rem(100.0))));
        assert_eq!(resolve_line_height("0rem"), Ok(LineHeight::Dimension(Dimension::zero())));
        assert_eq!(resolve_line_height("1em"), Err(ValueError::Unsupported));
        assert_eq!(resolve_line_height("1cm"), Err(ValueError::Unsupported));
    }

    #[test]
    fn line_height_rejections() {
        for keyword in ["inherit", "initial", "unset", "revert", "revert-layer"] {
            assert_eq!(resolve_line_height(keyword), Err(ValueError::Unsupported));
        }
        assert_eq!(
            resolve_line_height("var(--my-line-height, 1.2)"),
            Err(ValueError::Indeterminate)
        );
        assert_eq!(resolve_line_height(""), Err(ValueError::StructuralReject));
    }

    #[test]
    fn canonical_text_ignores_spelling() {
        assert_eq!(
            resolve_font_size("16px").map(|dim| dim.canonical_text()),
            resolve_font_size("16.0PX").map(|dim| dim.canonical_text())
        );
    }
}
