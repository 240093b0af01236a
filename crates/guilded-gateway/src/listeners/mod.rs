//! Event listeners and text commands

mod command;
mod registry;

pub use command::{Command, CommandAction, Commands};
pub use registry::{Listener, ListenerRegistry};
