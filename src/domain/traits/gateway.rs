use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::BotEvent;

/// Gateway trait - connection to the chat platform
#[async_trait]
pub trait Gateway: Send {
    /// Establish the connection. A `Ready` event follows once it is usable.
    async fn connect(&mut self) -> Result<(), BotError>;

    /// Wait for the next event. `None` means the event stream ended.
    async fn next_event(&mut self) -> Result<Option<BotEvent>, BotError>;

    /// Close the connection gracefully
    async fn close(&mut self) -> Result<(), BotError>;
}
