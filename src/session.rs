//! The editing session: which files are selected and what tags are staged.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
