//! CSS Color Module Level 4 — Color keywords, color spaces, resolution and grouping.
//! Spec: <https://www.w3.org/TR/css-color-4/>

#![forbid(unsafe_code)]

mod convert;
mod group;
mod keywords;
mod resolve;
mod spaces;

pub use group::{ColorGroup, group_colors};
pub use keywords::{
    BLACK_KEYWORDS, COLOR_FUNCTIONS, NAMED_COLORS, SYSTEM_COLORS, is_color_identifier,
    is_color_node,
};
pub use resolve::{Channel, Color, ColorResolver};
pub use spaces::{ChannelKind, ColorSpace, ColorSpaces};
