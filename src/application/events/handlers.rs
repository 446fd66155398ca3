//! Built-in lifecycle and command handlers

use std::sync::Arc;

use async_trait::async_trait;

use super::dispatcher::{EventHandler, HandlerContract, LifecycleContext};
use crate::application::errors::BotError;
use crate::application::sync::{CommandRegistrySync, SyncOutcome};
use crate::domain::entities::{BotEvent, EventKind};
use crate::domain::traits::{DomainInitializer, EventLog};

/// Re-initializes puzzle data on every ready event
pub struct PuzzleDataHandler {
    initializer: Arc<dyn DomainInitializer>,
}

impl PuzzleDataHandler {
    pub fn new(initializer: Arc<dyn DomainInitializer>) -> Self {
        Self { initializer }
    }
}

#[async_trait]
impl EventHandler for PuzzleDataHandler {
    fn name(&self) -> &str {
        "puzzle-data"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        kind == EventKind::Ready
    }

    fn contract(&self) -> HandlerContract {
        HandlerContract::ReRunSafe
    }

    async fn handle(&self, _event: &BotEvent, ctx: &mut LifecycleContext<'_>) -> Result<(), BotError> {
        self.initializer.initialize(ctx.state)?;
        tracing::info!("Available puzzle slugs: {:?}", ctx.state.puzzle_slugs());
        Ok(())
    }
}

/// Publishes the command set to the target scope once per process
pub struct RegistrySyncHandler {
    sync: CommandRegistrySync,
}

impl RegistrySyncHandler {
    pub fn new(sync: CommandRegistrySync) -> Self {
        Self { sync }
    }
}

#[async_trait]
impl EventHandler for RegistrySyncHandler {
    fn name(&self) -> &str {
        "registry-sync"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        kind == EventKind::Ready
    }

    fn contract(&self) -> HandlerContract {
        HandlerContract::RunOnce
    }

    async fn handle(&self, _event: &BotEvent, ctx: &mut LifecycleContext<'_>) -> Result<(), BotError> {
        // A failed sync is logged by the sync itself and is not a handler error
        match self.sync.sync_once(ctx.sync_state, ctx.commands, ctx.scope).await {
            SyncOutcome::Synced(names) => tracing::info!("Synced guild commands: {:?}", names),
            SyncOutcome::Failed(reason) => tracing::warn!("Failed to sync command tree: {}", reason),
            SyncOutcome::Skipped => {}
        }
        Ok(())
    }
}

/// Logs every command invocation
pub struct CommandLogHandler {
    log: Arc<dyn EventLog>,
}

impl CommandLogHandler {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }
}

#[async_trait]
impl EventHandler for CommandLogHandler {
    fn name(&self) -> &str {
        "command-log"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        kind == EventKind::CommandInvoked
    }

    fn contract(&self) -> HandlerContract {
        HandlerContract::ReRunSafe
    }

    async fn handle(&self, event: &BotEvent, _ctx: &mut LifecycleContext<'_>) -> Result<(), BotError> {
        if let BotEvent::CommandInvoked { actor, command, channel, at } = event {
            self.log
                .log(&format!(
                    "`{}` used by {} in #{} at {}",
                    command,
                    actor,
                    channel,
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                ))
                .await;
        }
        Ok(())
    }
}

/// Logs failures of prefix commands
pub struct CommandErrorHandler {
    log: Arc<dyn EventLog>,
}

impl CommandErrorHandler {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }
}

#[async_trait]
impl EventHandler for CommandErrorHandler {
    fn name(&self) -> &str {
        "command-error"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        kind == EventKind::CommandFailed
    }

    fn contract(&self) -> HandlerContract {
        HandlerContract::ReRunSafe
    }

    async fn handle(&self, event: &BotEvent, _ctx: &mut LifecycleContext<'_>) -> Result<(), BotError> {
        if let BotEvent::CommandFailed { actor, command, error } = event {
            self.log
                .log_exception(&format!("command `{}` by {}", command, actor), error)
                .await;
        }
        Ok(())
    }
}

/// Logs failures of platform-native (slash) commands
pub struct InteractionErrorHandler {
    log: Arc<dyn EventLog>,
}

impl InteractionErrorHandler {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }
}

#[async_trait]
impl EventHandler for InteractionErrorHandler {
    fn name(&self) -> &str {
        "interaction-error"
    }

    fn accepts(&self, kind: EventKind) -> bool {
        kind == EventKind::InteractionFailed
    }

    fn contract(&self) -> HandlerContract {
        HandlerContract::ReRunSafe
    }

    async fn handle(&self, event: &BotEvent, _ctx: &mut LifecycleContext<'_>) -> Result<(), BotError> {
        if let BotEvent::InteractionFailed { actor, command, error } = event {
            self.log
                .log_exception(&format!("slash command `{}` by {}", command, actor), error)
                .await;
        }
        Ok(())
    }
}
