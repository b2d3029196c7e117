//! CSS Easing Functions Level 1 — §2 Easing functions
//! Spec: <https://www.w3.org/TR/css-easing-1/#easing-functions>

use css_syntax::{ValueError, references_custom_property};

/// Control points `[x1, y1, x2, y2]` of a cubic Bézier easing curve.
pub type CubicBezier = [f64; 4];

/// Keywords with a fixed cubic Bézier equivalent.
/// Spec: <https://www.w3.org/TR/css-easing-1/#cubic-bezier-easing-functions>
const EASING_KEYWORDS: [(&str, CubicBezier); 5] = [
    ("linear", [0.0, 0.0, 1.0, 1.0]),
    ("ease", [0.25, 0.1, 0.25, 1.0]),
    ("ease-in", [0.42, 0.0, 1.0, 1.0]),
    ("ease-out", [0.0, 0.0, 0.58, 1.0]),
    ("ease-in-out", [0.42, 0.0, 0.58, 1.0]),
];

const CUBIC_BEZIER_PREFIX: &str = "cubic-bezier(";

/// The curve behind an easing keyword, ignoring ASCII case.
pub fn keyword_easing(keyword: &str) -> Option<CubicBezier> {
    EASING_KEYWORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(keyword))
        .map(|(_, curve)| *curve)
}

/// Destructure an easing keyword or `cubic-bezier()` into four control values.
///
/// # Errors
/// `Indeterminate` for `var()` references, `Unsupported` for other easing
/// functions such as `steps()`, `StructuralReject` unless `cubic-bezier()`
/// holds exactly four finite numbers.
pub fn destructure_easing(text: &str) -> Result<CubicBezier, ValueError> {
    let easing = text.trim().to_ascii_lowercase();
    if let Some(curve) = keyword_easing(&easing) {
        return Ok(curve);
    }
    if references_custom_property(&easing) {
        return Err(ValueError::Indeterminate);
    }
    let Some(arguments) = easing.strip_prefix(CUBIC_BEZIER_PREFIX) else {
        return Err(ValueError::Unsupported);
    };
    let arguments = arguments.replacen(')', "", 1);
    let numbers = arguments
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok().filter(|number| number.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or(ValueError::StructuralReject)?;
    numbers
        .try_into()
        .map_err(|_: Vec<f64>| ValueError::StructuralReject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_fixed_curves() {
        assert_eq!(destructure_easing("linear"), Ok([0.0, 0.0, 1.0, 1.0]));
        assert_eq!(destructure_easing("ease"), Ok([0.25, 0.1, 0.25, 1.0]));
        assert_eq!(destructure_easing("ease-in"), Ok([0.42, 0.0, 1.0, 1.0]));
        assert_eq!(destructure_easing("ease-out"), Ok([0.0, 0.0, 0.58, 1.0]));
        assert_eq!(destructure_easing("ease-in-out"), Ok([0.42, 0.0, 0.58, 1.0]));
        assert_eq!(destructure_easing("  Ease-In-Out "), Ok([0.42, 0.0, 0.58, 1.0]));
    }

    #[test]
    fn cubic_bezier_needs_four_finite_numbers() {
        assert_eq!(destructure_easing("cubic-bezier(0, 0, 1, 1)"), Ok([0.0, 0.0, 1.0, 1.0]));
        assert_eq!(
            destructure_easing("CUBIC-BEZIER(0.1,0.7,1.0,0.1)"),
            Ok([0.1, 0.7, 1.0, 0.1])
        );
        assert_eq!(destructure_easing("cubic-bezier(1,2,3)"), Err(ValueError::StructuralReject));
        assert_eq!(
            destructure_easing("cubic-bezier(1,2,3,4,5)"),
            Err(ValueError::StructuralReject)
        );
        assert_eq!(
            destructure_easing("cubic-bezier(a,b,c,d)"),
            Err(ValueError::StructuralReject)
        );
        assert_eq!(
            destructure_easing("cubic-bezier(0, inf, 1, 1)"),
            Err(ValueError::StructuralReject)
        );
    }

    #[test]
    fn other_functions_and_variables_are_rejected() {
        assert_eq!(destructure_easing("steps(4,end)"), Err(ValueError::Unsupported));
        assert_eq!(destructure_easing("step-start"), Err(ValueError::Unsupported));
        assert_eq!(destructure_easing(""), Err(ValueError::Unsupported));
        assert_eq!(destructure_easing("var(--ease)"), Err(ValueError::Indeterminate));
        assert_eq!(
            destructure_easing("cubic-bezier(var(--x), 0, 1, 1)"),
            Err(ValueError::Indeterminate)
        );
    }
}
