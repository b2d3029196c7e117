//! CSS Images Module Level 3 — Gradients.
//! Spec: <https://www.w3.org/TR/css-images-3/>

#![forbid(unsafe_code)]

pub mod chapter_3_gradients;

pub use chapter_3_gradients::{
    GRADIENT_FUNCTIONS, GradientStop, destructure_gradient, is_gradient_function,
};
