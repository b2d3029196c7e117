//! Hue buckets for presenting a palette.
//!
//! Grouping only orders output; it never affects a color's canonical value.

use core::cmp::Reverse;
use crate::convert::to_rgb8;
use crate::resolve::{Color, ColorResolver};
use css_syntax::{mentions_function, references_custom_property};

/// Presentation bucket of a color, keyed by hue, saturation and lightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    White,
    Black,
    Grey,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    Pink,
    Unknown,
}

/// Upper hue bounds (exclusive, degrees) of each chromatic bucket.
const HUE_BUCKETS: [(f64, ColorGroup); 8] = [
    (22.0, ColorGroup::Red),
    (50.0, ColorGroup::Orange),
    (72.0, ColorGroup::Yellow),
    (144.0, ColorGroup::Green),
    (180.0, ColorGroup::Cyan),
    (250.0, ColorGroup::Blue),
    (300.0, ColorGroup::Magenta),
    (350.0, ColorGroup::Pink),
];

impl ColorGroup {
    /// Lowercase group name, used as the id prefix of color tokens.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Grey => "grey",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Pink => "pink",
            Self::Unknown => "unknown",
        }
    }

    /// Classify one authored color by its canonical value.
    ///
    /// Anything with `var(` or `calc(`, and anything the resolver cannot read,
    /// is `Unknown`. Spellings that resolve to the same color always share a
    /// group.
    pub fn classify(color: &str, resolver: &ColorResolver) -> Self {
        if references_custom_property(color) || mentions_function(color, "calc(") {
            return Self::Unknown;
        }
        resolver
            .resolve(color)
            .map_or(Self::Unknown, |resolved| Self::of(&resolved))
    }

    /// Bucket of a resolved color. Spaces without an sRGB conversion are
    /// `Unknown`.
    pub fn of(color: &Color) -> Self {
        let Some([red, green, blue]) = to_rgb8(color) else {
            return Self::Unknown;
        };
        let Hsl {
            hue,
            saturation,
            lightness,
        } = Hsl::from_rgb8(red, green, blue);

        if saturation < 10.0 && (lightness - 100.0).abs() < f64::EPSILON {
            Self::White
        } else if saturation < 10.0 && lightness == 0.0 {
            Self::Black
        } else if saturation < 5.0 {
            Self::Grey
        } else {
            HUE_BUCKETS
                .iter()
                .find(|(bound, _)| hue < *bound)
                .map_or(Self::Red, |(_, group)| *group)
        }
    }
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Hsl {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Hsl {
    fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        let red = f64::from(red) / 255.0;
        let green = f64::from(green) / 255.0;
        let blue = f64::from(blue) / 255.0;
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let lightness = (max + min) / 2.0;
        let delta = max - min;
        if delta == 0.0 {
            return Self {
                hue: 0.0,
                saturation: 0.0,
                lightness: lightness * 100.0,
            };
        }
        let saturation = delta / (1.0 - 2.0_f64.mul_add(lightness, -1.0).abs());
        let sector = if (max - red).abs() < f64::EPSILON {
            ((green - blue) / delta).rem_euclid(6.0)
        } else if (max - green).abs() < f64::EPSILON {
            (blue - red) / delta + 2.0
        } else {
            (red - green) / delta + 4.0
        };
        Self {
            hue: sector * 60.0,
            saturation: saturation * 100.0,
            lightness: lightness * 100.0,
        }
    }
}

/// Bucket authored colors by hue.
///
/// Buckets appear in first-seen order, then `Unknown` is moved first and the
/// rest are ordered by descending member count; ties keep first-seen order.
pub fn group_colors<'text, I>(
    colors: I,
    resolver: &ColorResolver,
) -> Vec<(ColorGroup, Vec<&'text str>)>
where
    I: IntoIterator<Item = &'text str>,
{
    let mut groups: Vec<(ColorGroup, Vec<&'text str>)> = Vec::new();
    for color in colors {
        let group = ColorGroup::classify(color, resolver);
        match groups.iter_mut().find(|(existing, _)| *existing == group) {
            Some((_, members)) => members.push(color),
            None => groups.push((group, vec![color])),
        }
    }
    groups.sort_by_key(|(group, members)| {
        (*group != ColorGroup::Unknown, Reverse(members.len()))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(color: &str) -> ColorGroup {
        ColorGroup::classify(color, &ColorResolver::default())
    }

    #[test]
    fn classifies_by_lightness_and_hue() {
        assert_eq!(classify("#fff"), ColorGroup::White);
        assert_eq!(classify("white"), ColorGroup::White);
        assert_eq!(classify("#000"), ColorGroup::Black);
        assert_eq!(classify("gray"), ColorGroup::Grey);
        assert_eq!(classify("red"), ColorGroup::Red);
        assert_eq!(classify("orange"), ColorGroup::Orange);
        assert_eq!(classify("yellow"), ColorGroup::Yellow);
        assert_eq!(classify("lime"), ColorGroup::Green);
        assert_eq!(classify("#00ffd5"), ColorGroup::Cyan);
        assert_eq!(classify("blue"), ColorGroup::Blue);
        assert_eq!(classify("#8000ff"), ColorGroup::Magenta);
        assert_eq!(classify("hsl(320, 100%, 50%)"), ColorGroup::Pink);
        assert_eq!(classify("hsl(355, 100%, 50%)"), ColorGroup::Red);
    }

    #[test]
    fn equal_canonical_colors_share_a_group() {
        assert_eq!(classify("currentcolor"), ColorGroup::Black);
        assert_eq!(classify("inherit"), ColorGroup::Black);
        assert_eq!(classify("color(srgb 1 0 0)"), ColorGroup::Red);
        assert_eq!(classify("oklch(0.62796 0.25768 29.2339)"), ColorGroup::Red);
        assert_eq!(classify("lab(100 0 0)"), ColorGroup::White);
        assert_eq!(classify("hwb(240 0% 0%)"), ColorGroup::Blue);
    }

    #[test]
    fn unresolvable_colors_are_unknown() {
        assert_eq!(classify("var(--brand)"), ColorGroup::Unknown);
        assert_eq!(classify("rgb(calc(255) 0 0)"), ColorGroup::Unknown);
        assert_eq!(classify("not-a-color"), ColorGroup::Unknown);
        assert_eq!(classify("canvas"), ColorGroup::Unknown);
        assert_eq!(classify("color(a98-rgb 1 0 0)"), ColorGroup::Unknown);
    }

    #[test]
    fn unknown_sorts_first_then_by_size() {
        let groups = group_colors(
            ["red", "#f00", "rgb(255 0 0)", "blue", "#00f", "calc(1)", "white"],
            &ColorResolver::default(),
        );
        let order: Vec<(&str, usize)> = groups
            .iter()
            .map(|(group, members)| (group.as_str(), members.len()))
            .collect();
        assert_eq!(
            order,
            vec![("unknown", 1), ("red", 3), ("blue", 2), ("white", 1)]
        );
    }

    #[test]
    fn members_keep_authored_order() {
        let groups = group_colors(["#f00", "red", "#000", "currentcolor"], &ColorResolver::default());
        assert_eq!(
            groups,
            vec![
                (ColorGroup::Red, vec!["#f00", "red"]),
                (ColorGroup::Black, vec!["#000", "currentcolor"]),
            ]
        );
    }
}
