//! Plugin loader - Loads every plugin unit once per process

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use super::catalog::{PluginCatalog, PluginHost};
use super::manifest::PluginManifest;
use crate::application::errors::{panic_message, PluginError, PluginResult};
use crate::domain::entities::{CommandSpec, CommandTree};
use crate::domain::traits::{PluginSource, PluginUnit};

/// Unit file extensions recognized as plugins
const UNIT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// One-shot guard for plugin loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginLoadState {
    #[default]
    NotStarted,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOutcome {
    Success,
    Failure(String),
}

/// Diagnostic record of one load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRecord {
    pub name: String,
    pub outcome: PluginOutcome,
}

impl PluginRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == PluginOutcome::Success
    }
}

/// Plugin loader
pub struct PluginLoader {
    source: Box<dyn PluginSource>,
    excluded: HashSet<String>,
    catalog: PluginCatalog,
}

impl PluginLoader {
    pub fn new(
        source: Box<dyn PluginSource>,
        excluded: impl IntoIterator<Item = String>,
        catalog: PluginCatalog,
    ) -> Self {
        Self {
            source,
            excluded: excluded.into_iter().collect(),
            catalog,
        }
    }

    /// Load all plugin units from the source, registering their commands.
    ///
    /// Does nothing once `state` is `Done`. A failing unit is recorded and the
    /// remaining units are still attempted. `state` is `Done` afterwards
    /// whatever happened.
    pub fn load_all(
        &self,
        state: &mut PluginLoadState,
        commands: &mut CommandTree,
    ) -> Vec<PluginRecord> {
        if *state == PluginLoadState::Done {
            return Vec::new();
        }
        *state = PluginLoadState::Done;

        if !self.source.exists() {
            tracing::warn!("Plugin source not found: {}", self.source.location());
            return Vec::new();
        }

        let mut units = match self.source.list() {
            Ok(units) => units,
            Err(e) => {
                tracing::error!("Failed to list plugin source {}: {}", self.source.location(), e);
                return Vec::new();
            }
        };
        units.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        let mut records = Vec::new();
        for unit in units.iter().filter(|u| self.is_candidate(u)) {
            let name = unit.stem().to_string();
            let outcome = match self.load_unit(unit) {
                Ok(staged) => {
                    for command in staged {
                        commands.register(command);
                    }
                    tracing::info!("Loaded plugin: {}", name);
                    PluginOutcome::Success
                }
                Err(e) => {
                    tracing::warn!("Failed to load plugin {}: {}", name, e);
                    PluginOutcome::Failure(e.to_string())
                }
            };
            records.push(PluginRecord { name, outcome });
        }

        let loaded = records.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            "Plugin load finished: {} loaded, {} failed",
            loaded,
            records.len() - loaded
        );
        records
    }

    fn is_candidate(&self, unit: &PluginUnit) -> bool {
        if unit.file_name.starts_with('.') {
            return false;
        }
        if self.excluded.contains(&unit.file_name) || self.excluded.contains(unit.stem()) {
            tracing::debug!("Skipping excluded plugin unit: {}", unit.file_name);
            return false;
        }
        unit.extension()
            .is_some_and(|ext| UNIT_EXTENSIONS.contains(&ext))
    }

    /// Load a single unit, returning the commands it contributes
    fn load_unit(&self, unit: &PluginUnit) -> PluginResult<Vec<CommandSpec>> {
        let content = self
            .source
            .read(unit)
            .map_err(|e| PluginError::Load(format!("Failed to read {}: {}", unit.file_name, e)))?;
        let manifest = PluginManifest::parse(&content)?;

        let plugin_name = manifest.plugin_name(unit.stem());
        if !manifest.enabled {
            return Err(PluginError::Disabled(plugin_name.to_string()));
        }
        let descriptor = self
            .catalog
            .get(plugin_name)
            .ok_or_else(|| PluginError::UnknownPlugin(plugin_name.to_string()))?;

        let mut host = PluginHost::new(&manifest);
        let result = panic::catch_unwind(AssertUnwindSafe(|| (descriptor.entry)(&mut host)));
        match result {
            Ok(Ok(())) => Ok(host.into_commands()),
            Ok(Err(e)) => Err(PluginError::EntryPoint(e.to_string())),
            Err(payload) => Err(PluginError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}
