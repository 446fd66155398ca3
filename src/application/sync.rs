//! Command registry sync - publishes the command set once per process

use std::sync::Arc;

use crate::domain::entities::{CommandTree, Scope};
use crate::domain::traits::{CommandRegistry, EventLog};

/// One-shot guard for the remote registry sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    NotSynced,
    Synced,
}

/// Result of a [`CommandRegistrySync::sync_once`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A sync was already attempted in this process
    Skipped,
    /// Names of the commands the platform accepted
    Synced(Vec<String>),
    Failed(String),
}

pub struct CommandRegistrySync {
    registry: Arc<dyn CommandRegistry>,
    log: Arc<dyn EventLog>,
}

impl CommandRegistrySync {
    pub fn new(registry: Arc<dyn CommandRegistry>, log: Arc<dyn EventLog>) -> Self {
        Self { registry, log }
    }

    /// Copy the global commands into `scope` and push them to the platform.
    ///
    /// The state flips to `Synced` before the remote call, so a failed attempt
    /// is not retried for the rest of the process lifetime.
    pub async fn sync_once(
        &self,
        state: &mut SyncState,
        commands: &mut CommandTree,
        scope: Scope,
    ) -> SyncOutcome {
        if *state == SyncState::Synced {
            tracing::debug!("Command registry already synced, skipping");
            return SyncOutcome::Skipped;
        }
        *state = SyncState::Synced;

        commands.copy_global_to(scope);
        match self.registry.register(scope, commands.scoped(scope)).await {
            Ok(names) => {
                tracing::info!("Synced {} commands to scope {}: {:?}", names.len(), scope, names);
                SyncOutcome::Synced(names)
            }
            Err(e) => {
                self.log
                    .log_exception(&format!("command registry sync for scope {}", scope), &e)
                    .await;
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}
