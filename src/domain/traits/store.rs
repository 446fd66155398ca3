use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::ApplicationState;

/// Store trait - abstraction for state persistence
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<ApplicationState, StorageError>;

    /// Never called by the running core; plugins and the `normalize-data`
    /// command own persistence
    async fn save(&self, state: &ApplicationState) -> Result<(), StorageError>;
}
