//! Event dispatcher - Routes gateway events to registered handlers

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::application::errors::{panic_message, BotError};
use crate::application::sync::SyncState;
use crate::domain::entities::{ApplicationState, BotEvent, CommandTree, EventKind, Scope};
use crate::domain::traits::EventLog;

/// How often a handler may safely do its work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerContract {
    /// Runs on every matching event, including repeated `Ready`s
    ReRunSafe,
    /// Does its work at most once per process, guarded by orchestrator state
    RunOnce,
}

/// Mutable process state lent to handlers for one dispatch
pub struct LifecycleContext<'a> {
    pub state: &'a mut ApplicationState,
    pub commands: &'a mut CommandTree,
    pub sync_state: &'a mut SyncState,
    pub scope: Scope,
}

/// A typed event handler
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &str;

    fn accepts(&self, kind: EventKind) -> bool;

    fn contract(&self) -> HandlerContract;

    async fn handle(&self, event: &BotEvent, ctx: &mut LifecycleContext<'_>) -> Result<(), BotError>;
}

/// Runs handlers in registration order.
///
/// A handler error or panic is logged through the event log and never reaches
/// the event loop; the remaining handlers still run.
pub struct EventDispatcher {
    handlers: Vec<Box<dyn EventHandler>>,
    log: Arc<dyn EventLog>,
}

impl EventDispatcher {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self {
            handlers: Vec::new(),
            log,
        }
    }

    /// Register a handler after the existing ones
    pub fn with_handler<H: EventHandler + 'static>(mut self, handler: H) -> Self {
        tracing::debug!("Registering handler {} ({:?})", handler.name(), handler.contract());
        self.handlers.push(Box::new(handler));
        self
    }

    /// Dispatch `event` to every handler that accepts it.
    /// Returns how many handlers completed without error.
    pub async fn dispatch(&self, event: &BotEvent, ctx: &mut LifecycleContext<'_>) -> usize {
        let kind = event.kind();
        let mut succeeded = 0;

        for handler in self.handlers.iter().filter(|h| h.accepts(kind)) {
            let result = AssertUnwindSafe(handler.handle(event, &mut *ctx))
                .catch_unwind()
                .await;
            let error = match result {
                Ok(Ok(())) => {
                    succeeded += 1;
                    continue;
                }
                Ok(Err(e)) => e,
                Err(payload) => BotError::Internal(format!(
                    "handler panicked: {}",
                    panic_message(payload.as_ref())
                )),
            };
            let context = format!("handler {} on {:?}", handler.name(), kind);
            self.log.log_exception(&context, &error).await;
        }

        succeeded
    }
}

#[cfg(test)]
impl EventDispatcher {
    /// Handler names and contracts, in dispatch order
    pub fn handlers(&self) -> Vec<(String, HandlerContract)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.contract()))
            .collect()
    }
}
