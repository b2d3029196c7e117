//! Color vocabularies.
//! Spec: <https://www.w3.org/TR/css-color-4/#named-colors>

use css_syntax::{KeywordSet, NodeKind, ValueNode};
use once_cell::sync::Lazy;

/// `<named-color>` keywords, most frequently used first.
pub static NAMED_COLORS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "white", "black", "red", "gray", "silver", "grey", "green", "orange", "blue",
        "dimgray", "whitesmoke", "lightgray", "lightgrey", "yellow", "gold", "pink",
        "gainsboro", "magenta", "purple", "darkgray", "navy", "darkred", "teal", "maroon",
        "darkgrey", "tomato", "darkorange", "brown", "crimson", "lightyellow", "slategray",
        "salmon", "lightgreen", "lightblue", "orangered", "aliceblue", "dodgerblue", "lime",
        "darkblue", "darkgoldenrod", "skyblue", "royalblue", "darkgreen", "ivory", "olive",
        "aqua", "turquoise", "cyan", "khaki", "beige", "snow", "ghostwhite", "limegreen",
        "coral", "dimgrey", "hotpink", "midnightblue", "firebrick", "indigo", "wheat",
        "mediumblue", "lightpink", "plum", "azure", "violet", "lavender", "deepskyblue",
        "darkslategrey", "goldenrod", "cornflowerblue", "lightskyblue", "indianred",
        "yellowgreen", "saddlebrown", "palegreen", "bisque", "tan", "antiquewhite",
        "steelblue", "forestgreen", "fuchsia", "mediumaquamarine", "seagreen", "sienna",
        "deeppink", "mediumseagreen", "peru", "greenyellow", "lightgoldenrodyellow",
        "orchid", "cadetblue", "navajowhite", "lightsteelblue", "slategrey", "linen",
        "lightseagreen", "darkcyan", "lightcoral", "aquamarine", "blueviolet", "cornsilk",
        "lightsalmon", "chocolate", "lightslategray", "floralwhite", "darkturquoise",
        "darkslategray", "rebeccapurple", "burlywood", "chartreuse", "lightcyan",
        "lemonchiffon", "palevioletred", "darkslateblue", "mediumpurple", "lawngreen",
        "slateblue", "darkseagreen", "blanchedalmond", "mistyrose", "darkolivegreen",
        "seashell", "olivedrab", "peachpuff", "darkviolet", "powderblue", "darkmagenta",
        "lightslategrey", "honeydew", "palegoldenrod", "darkkhaki", "oldlace", "mintcream",
        "sandybrown", "mediumturquoise", "papayawhip", "paleturquoise", "mediumvioletred",
        "thistle", "springgreen", "moccasin", "rosybrown", "lavenderblush",
        "mediumslateblue", "darkorchid", "mediumorchid", "darksalmon", "mediumspringgreen",
    ])
});

/// `<system-color>` keywords.
/// Spec: <https://www.w3.org/TR/css-color-4/#css-system-colors>
pub static SYSTEM_COLORS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "accentcolor",
        "accentcolortext",
        "activetext",
        "buttonborder",
        "buttonface",
        "buttontext",
        "canvas",
        "canvastext",
        "field",
        "fieldtext",
        "graytext",
        "highlight",
        "highlighttext",
        "linktext",
        "mark",
        "marktext",
        "selecteditem",
        "selecteditemtext",
        "visitedtext",
    ])
});

/// Functional color notations.
pub static COLOR_FUNCTIONS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "rgba", "rgb", "hsla", "hsl", "oklch", "color", "hwb", "lch", "lab", "oklab",
    ])
});

/// Keywords that stand for opaque black when no cascade is available.
pub static BLACK_KEYWORDS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "currentcolor",
        "inherit",
        "initial",
        "unset",
        "revert",
        "revert-layer",
    ])
});

/// Whether an identifier names a color by itself (named, system, `transparent`
/// or `currentcolor`).
pub fn is_color_identifier(name: &str) -> bool {
    NAMED_COLORS.contains(name)
        || SYSTEM_COLORS.contains(name)
        || name.eq_ignore_ascii_case("transparent")
        || name.eq_ignore_ascii_case("currentcolor")
}

/// Whether a value node is a color on its own: a color identifier, a hash, or a
/// color function.
pub fn is_color_node(node: &ValueNode) -> bool {
    if let Some(name) = node.identifier() {
        return is_color_identifier(name);
    }
    if let Some((name, _)) = node.function() {
        return COLOR_FUNCTIONS.contains(name);
    }
    matches!(node.kind, NodeKind::Hash(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::parse_value_nodes;

    #[test]
    fn vocabularies_are_case_insensitive() {
        assert!(NAMED_COLORS.contains("RebeccaPurple"));
        assert!(SYSTEM_COLORS.contains("MarkText"));
        assert!(COLOR_FUNCTIONS.contains("RGBA"));
        assert!(BLACK_KEYWORDS.contains("currentColor"));
        assert!(!NAMED_COLORS.contains("inset"));
    }

    #[test]
    fn classifies_color_nodes() {
        let nodes = parse_value_nodes("#000 red oklch(0.5 0.1 20) 2px inset var(--c)");
        let flags: Vec<bool> = nodes.iter().map(is_color_node).collect();
        assert_eq!(flags, vec![true, true, true, false, false, false]);
    }
}
