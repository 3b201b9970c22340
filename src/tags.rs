//! Tag record model and cover-art normalization.

pub mod cover;
mod model;

pub use model::*;
