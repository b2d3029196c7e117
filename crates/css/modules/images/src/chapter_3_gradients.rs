//! CSS Images Module Level 3 — §3.1 Linear gradients: the `linear-gradient()` notation
//! Spec: <https://www.w3.org/TR/css-images-3/#linear-gradients>
//!
//! Only `linear-gradient()` destructures. Stop positions are spread evenly
//! over the color stops; explicit `<color-stop-length>` positions are not read.

use css_color::{Color, ColorResolver, is_color_node};
use css_syntax::{KeywordSet, ValueError, parse_value_nodes, references_custom_property};
use css_values_units::format_number;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Gradient functions that destructure into stops.
static LINEAR_GRADIENTS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["linear-gradient"]));

/// Every `<gradient>` function, used to find gradients inside declarations.
/// Spec: <https://www.w3.org/TR/css-images-4/#gradients>
pub static GRADIENT_FUNCTIONS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "linear-gradient",
        "radial-gradient",
        "conic-gradient",
        "repeating-linear-gradient",
        "repeating-radial-gradient",
        "repeating-conic-gradient",
        "-webkit-linear-gradient",
        "-webkit-radial-gradient",
        "-webkit-repeating-linear-gradient",
        "-webkit-repeating-radial-gradient",
        "-moz-linear-gradient",
        "-moz-radial-gradient",
        "-moz-repeating-linear-gradient",
        "-moz-repeating-radial-gradient",
        "-o-linear-gradient",
        "-ms-linear-gradient",
    ])
});

/// Whether `name` is any gradient function.
#[inline]
pub fn is_gradient_function(name: &str) -> bool {
    GRADIENT_FUNCTIONS.contains(name)
}

/// One color stop with a position in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: Color,
    pub position: f64,
}

impl GradientStop {
    /// Canonical text such as `srgb 0 0 1 / 1 0.5`.
    pub fn canonical_text(&self) -> String {
        format!(
            "{} {}",
            self.color.canonical_text(),
            format_number(self.position)
        )
    }
}

/// Destructure a `linear-gradient()` into evenly spaced color stops.
///
/// The value must be exactly one `linear-gradient()` with at least one
/// argument. Two stops sit at `0` and `1`; `n` stops sit at `i / (n - 1)`; a
/// single stop sits at `0`. Arguments that are not colors (angles, side
/// keywords, lengths) are skipped.
///
/// # Errors
/// `Indeterminate` when the value references `var()` anywhere,
/// `StructuralReject` for any other shape or a gradient without color stops,
/// `Unsupported` for other gradient functions, and the color's own error when
/// any color stop fails to resolve.
pub fn destructure_gradient(
    text: &str,
    resolver: &ColorResolver,
) -> Result<Vec<GradientStop>, ValueError> {
    if references_custom_property(text) {
        return Err(ValueError::Indeterminate);
    }
    let nodes = parse_value_nodes(text);
    let [node] = nodes.as_slice() else {
        return Err(ValueError::StructuralReject);
    };
    let Some((name, arguments)) = node.function() else {
        return Err(ValueError::StructuralReject);
    };
    if !LINEAR_GRADIENTS.contains(name) {
        return Err(ValueError::Unsupported);
    }
    if arguments.is_empty() {
        return Err(ValueError::StructuralReject);
    }

    let colors = arguments
        .iter()
        .filter(|argument| is_color_node(argument))
        .map(|argument| resolver.resolve(argument.text(text)))
        .collect::<Result<Vec<Color>, ValueError>>()?;
    if colors.is_empty() {
        return Err(ValueError::StructuralReject);
    }

    let last = colors.len().saturating_sub(1);
    Ok(colors
        .into_iter()
        .enumerate()
        .map(|(index, color)| GradientStop {
            color,
            position: if last == 0 {
                0.0
            } else {
                index as f64 / last as f64
            },
        })
        .collect())
}
