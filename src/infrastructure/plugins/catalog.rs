//! Plugin catalog - Static registry of the plugins compiled into the bot

use std::collections::HashMap;

use super::manifest::PluginManifest;
use crate::application::errors::PluginResult;
use crate::domain::entities::CommandSpec;

/// Plugin entry point. Runs once when its unit is loaded.
pub type EntryPoint = fn(&mut PluginHost<'_>) -> PluginResult<()>;

/// A plugin that can be selected by a unit file
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub entry: EntryPoint,
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// What an entry point is given to work with.
///
/// Commands are staged and only reach the command tree when the entry point
/// returns `Ok`.
pub struct PluginHost<'a> {
    manifest: &'a PluginManifest,
    staged: Vec<CommandSpec>,
}

impl<'a> PluginHost<'a> {
    pub fn new(manifest: &'a PluginManifest) -> Self {
        Self {
            manifest,
            staged: Vec::new(),
        }
    }

    pub fn manifest(&self) -> &PluginManifest {
        self.manifest
    }

    pub fn add_command(&mut self, command: CommandSpec) {
        self.staged.push(command);
    }

    pub fn into_commands(self) -> Vec<CommandSpec> {
        self.staged
    }
}

/// Registry of plugin descriptors keyed by name
#[derive(Debug, Default)]
pub struct PluginCatalog {
    descriptors: HashMap<String, PluginDescriptor>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, descriptor: PluginDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn register(&mut self, descriptor: PluginDescriptor) {
        if self
            .descriptors
            .insert(descriptor.name.to_string(), descriptor)
            .is_some()
        {
            tracing::warn!("Plugin descriptor '{}' registered twice", descriptor.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.descriptors.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.descriptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
