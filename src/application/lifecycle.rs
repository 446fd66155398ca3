//! Orchestrator - Drives the bot process from startup to shutdown

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;

use crate::application::errors::{BotError, ConfigError};
use crate::application::events::{EventDispatcher, LifecycleContext};
use crate::application::keys;
use crate::application::sync::SyncState;
use crate::domain::entities::{ApplicationState, BotEvent, CommandTree, Scope};
use crate::domain::traits::{Gateway, StateStore};
use crate::infrastructure::plugins::{PluginLoadState, PluginLoader, PluginRecord};

/// Name of the environment variable holding the bot token
pub const TOKEN_VAR: &str = "DISCORD_TOKEN";

/// Builds the gateway once the token is known
pub type GatewayFactory = Box<dyn FnOnce(&str) -> Box<dyn Gateway> + Send>;

/// Process lifecycle phases, in order. `Running` is re-entered from
/// `Connected` on every ready event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    StateLoad,
    PluginLoad,
    Connected,
    Running,
    Shutdown,
}

/// Why the event loop stopped without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupted,
    Disconnected,
}

pub struct Orchestrator {
    token: Option<String>,
    scope: Scope,
    store: Arc<dyn StateStore>,
    loader: PluginLoader,
    dispatcher: EventDispatcher,
    connect: Option<GatewayFactory>,
    phase: Phase,
    state: ApplicationState,
    commands: CommandTree,
    plugin_state: PluginLoadState,
    sync_state: SyncState,
}

impl Orchestrator {
    pub fn new(
        token: Option<String>,
        scope: Scope,
        store: Arc<dyn StateStore>,
        loader: PluginLoader,
        dispatcher: EventDispatcher,
        connect: GatewayFactory,
    ) -> Self {
        Self {
            token,
            scope,
            store,
            loader,
            dispatcher,
            connect: Some(connect),
            phase: Phase::Init,
            state: ApplicationState::new(),
            commands: CommandTree::new(),
            plugin_state: PluginLoadState::NotStarted,
            sync_state: SyncState::NotSynced,
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!("Lifecycle: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Run until `shutdown` resolves or the gateway goes away.
    ///
    /// A missing token fails before anything is loaded or connected.
    /// `shutdown` is watched from state load onwards; if it resolves before
    /// the gateway exists, nothing is connected. Once connected, the
    /// connection is closed on every exit path.
    pub async fn run<S>(&mut self, shutdown: S) -> Result<ShutdownReason, BotError>
    where
        S: Future<Output = ()>,
    {
        self.enter(Phase::Init);
        let token = self
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField(TOKEN_VAR.to_string()))?;

        tokio::pin!(shutdown);

        self.enter(Phase::StateLoad);
        if shutdown.as_mut().now_or_never().is_some() {
            return Ok(self.interrupted_before_connect());
        }
        let store = self.store.clone();
        self.state = tokio::select! {
            _ = shutdown.as_mut() => return Ok(self.interrupted_before_connect()),
            loaded = store.load() => loaded?,
        };
        keys::normalize_state(&mut self.state);
        tracing::info!("Normalized piece keys: {:?}", self.state.piece_slugs());

        self.enter(Phase::PluginLoad);
        let records = self.loader.load_all(&mut self.plugin_state, &mut self.commands);
        log_plugin_records(&records);
        if shutdown.as_mut().now_or_never().is_some() {
            return Ok(self.interrupted_before_connect());
        }
        tracing::info!("Plugins loaded; starting bot");

        let connect = self
            .connect
            .take()
            .ok_or_else(|| BotError::Internal("gateway already started".to_string()))?;
        let mut gateway = connect(&token);

        let result = match gateway.connect().await {
            Ok(()) => {
                self.enter(Phase::Connected);
                self.event_loop(gateway.as_mut(), shutdown.as_mut()).await
            }
            Err(e) => Err(e),
        };

        self.enter(Phase::Shutdown);
        if let Err(e) = gateway.close().await {
            tracing::warn!("Failed to close gateway cleanly: {}", e);
        }
        match &result {
            Ok(ShutdownReason::Interrupted) => tracing::info!("Interrupt received; shut down"),
            Ok(ShutdownReason::Disconnected) => tracing::info!("Gateway closed; shut down"),
            Err(e) => tracing::error!("Error while running bot: {}", e),
        }
        result
    }

    fn interrupted_before_connect(&mut self) -> ShutdownReason {
        self.enter(Phase::Shutdown);
        tracing::info!("Interrupt received before connecting; shut down");
        ShutdownReason::Interrupted
    }

    async fn event_loop<S>(
        &mut self,
        gateway: &mut dyn Gateway,
        mut shutdown: Pin<&mut S>,
    ) -> Result<ShutdownReason, BotError>
    where
        S: Future<Output = ()>,
    {
        loop {
            let event = tokio::select! {
                _ = shutdown.as_mut() => return Ok(ShutdownReason::Interrupted),
                event = gateway.next_event() => event?,
            };

            let event = match event {
                None | Some(BotEvent::Closed) => return Ok(ShutdownReason::Disconnected),
                Some(event) => event,
            };

            if let BotEvent::Ready { session_id, bot_user } = &event {
                self.enter(Phase::Connected);
                tracing::info!("Logged in as {} (id={}, session {})", bot_user, bot_user.id, session_id);
                let names: Vec<_> = self.commands.global().iter().map(|c| c.name.as_str()).collect();
                tracing::info!("Prefix commands: {:?}", names);
            }

            let mut ctx = LifecycleContext {
                state: &mut self.state,
                commands: &mut self.commands,
                sync_state: &mut self.sync_state,
                scope: self.scope,
            };
            self.dispatcher.dispatch(&event, &mut ctx).await;
            self.enter(Phase::Running);
        }
    }
}

fn log_plugin_records(records: &[PluginRecord]) {
    let loaded: Vec<_> = records
        .iter()
        .filter(|r| r.is_success())
        .map(|r| r.name.as_str())
        .collect();
    tracing::info!("Loaded plugins: {:?}", loaded);
}

#[cfg(test)]
impl Orchestrator {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn commands(&self) -> &CommandTree {
        &self.commands
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }
}
