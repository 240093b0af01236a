//! Text commands
//!
//! A command is a `ChatMessageCreated` listener that fires only when the
//! message content equals the command text exactly.

use std::sync::Arc;

use crate::connection::GatewayClient;
use crate::events::payloads::ChatMessageCreated;

/// Callback run when a command matches
pub type CommandAction = Arc<dyn Fn(&GatewayClient, &ChatMessageCreated) + Send + Sync>;

/// One command text and its action
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub action: CommandAction,
}

impl Command {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&GatewayClient, &ChatMessageCreated) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }

    /// Exact, case-sensitive comparison with the message content
    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        self.name == content
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

/// Ordered batch of commands
///
/// ```ignore
/// let commands = Commands::new()
///     .command("!ping", |_, _| println!("pong"))
///     .command("!help", |_, _| println!("..."));
/// client.add_commands(commands);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Commands {
    commands: Vec<Command>,
}

impl Commands {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    #[must_use]
    pub fn command<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&GatewayClient, &ChatMessageCreated) + Send + Sync + 'static,
    {
        self.commands.push(Command::new(name, action));
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for Commands {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
