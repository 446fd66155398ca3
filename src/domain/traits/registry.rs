use async_trait::async_trait;
use crate::application::errors::SyncError;
use crate::domain::entities::{CommandSpec, Scope};

/// Remote command registry of the chat platform
#[async_trait]
pub trait CommandRegistry: Send + Sync {
    /// Publish `commands` to `scope`, replacing what was there.
    /// Returns the names the platform accepted.
    async fn register(&self, scope: Scope, commands: &[CommandSpec]) -> Result<Vec<String>, SyncError>;
}
