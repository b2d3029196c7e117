//! CSS Backgrounds and Borders Module Level 3 — Drop shadows.
//! Spec: <https://www.w3.org/TR/css-backgrounds-3/>

#![forbid(unsafe_code)]

pub mod chapter_7_shadows;

pub use chapter_7_shadows::{ShadowRecord, destructure_shadow};
