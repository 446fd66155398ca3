use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A command the bot publishes to the platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// Server-level scope commands can be published to (a guild)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Scope(pub u64);

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The bot's command set: process-wide commands plus per-scope copies
#[derive(Debug, Clone, Default)]
pub struct CommandTree {
    global: Vec<CommandSpec>,
    scoped: HashMap<Scope, Vec<CommandSpec>>,
}

impl CommandTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a global command, replacing any existing one with the same name
    pub fn register(&mut self, command: CommandSpec) {
        if let Some(existing) = self.global.iter_mut().find(|c| c.name == command.name) {
            tracing::debug!("Replacing command: {}", command.name);
            *existing = command;
        } else {
            self.global.push(command);
        }
    }

    pub fn global(&self) -> &[CommandSpec] {
        &self.global
    }

    pub fn scoped(&self, scope: Scope) -> &[CommandSpec] {
        self.scoped.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the commands of `scope` with a copy of the global set
    pub fn copy_global_to(&mut self, scope: Scope) {
        self.scoped.insert(scope, self.global.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_global_to_snapshots_the_global_set() {
        let mut tree = CommandTree::new();
        tree.register(CommandSpec::new("ping").with_description("Check the bot is alive"));
        tree.copy_global_to(Scope(7));

        tree.register(CommandSpec::new("later"));

        let names: Vec<_> = tree.scoped(Scope(7)).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ping"]);
        assert!(tree.scoped(Scope(8)).is_empty());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut tree = CommandTree::new();
        tree.register(CommandSpec::new("ping").with_description("old"));
        tree.register(CommandSpec::new("ping").with_description("new"));

        assert_eq!(tree.global(), &[CommandSpec::new("ping").with_description("new")]);
    }
}
