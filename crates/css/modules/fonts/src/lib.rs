//! CSS Fonts Module Level 4 — Font family lists.
//! Spec: <https://www.w3.org/TR/css-fonts-4/>

#![forbid(unsafe_code)]

pub mod chapter_2_font_family;

pub use chapter_2_font_family::{destructure_font_family, unquote};
