//! CSS Values and Units Module Level 3 — Canonical numbers, lengths and times.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// One module per chapter of CSS Values & Units.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;
pub mod chapter_7_time;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::{canonical_number, format_number};
pub use chapter_6_dimensions::{
    Dimension, LineHeight, absolute_size_rem, resolve_font_size, resolve_line_height,
};
pub use chapter_7_time::{convert_duration, resolve_duration};
