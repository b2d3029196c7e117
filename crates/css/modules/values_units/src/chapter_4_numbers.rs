//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

/// Fold negative zero into positive zero so `-0` and `0` compare and print alike.
#[inline]
pub fn canonical_number(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Shortest round-trip text for a number, with `-0` printed as `0`.
///
/// `16`, `16.0` and `1.6e1` all print as `16`.
pub fn format_number(value: f64) -> String {
    canonical_number(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_numbers_print_alike() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number("1.6e1".parse().unwrap_or_default()), "16");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
    }
}
