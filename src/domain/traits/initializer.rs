use crate::application::errors::BotError;
use crate::domain::entities::ApplicationState;

/// Domain data setup run on every ready event. Implementations must be safe
/// to run repeatedly.
pub trait DomainInitializer: Send + Sync {
    fn initialize(&self, state: &mut ApplicationState) -> Result<(), BotError>;
}
