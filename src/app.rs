//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and mirrors the file list, the
//! selection and the staged tags as reported by the dispatcher.

mod model;

pub use model::*;
