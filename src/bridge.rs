//! Presentation bridge: typed commands in, typed notifications out.
//!
//! The display surface never touches the session directly. It sends a
//! `Command` and mirrors whatever `Notification`s come back.

mod dispatch;
mod types;

pub use dispatch::Dispatcher;
pub use types::{Command, Notification};
