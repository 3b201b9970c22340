//! User settings: schema, file/env loading and the XDG paths tagsmith uses.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;
