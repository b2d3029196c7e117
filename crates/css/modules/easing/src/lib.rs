//! CSS Easing Functions Level 1 — Keyword and cubic Bézier easing functions.
//! Spec: <https://www.w3.org/TR/css-easing-1/>

#![forbid(unsafe_code)]

pub mod chapter_2_easing_functions;

pub use chapter_2_easing_functions::{CubicBezier, destructure_easing, keyword_easing};
