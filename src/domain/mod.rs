//! Domain layer - Core business objects with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (ApplicationState, CommandTree, BotEvent)
//! - Traits: Abstractions for infrastructure (Gateway, StateStore, EventLog, ...)

pub mod entities;
pub mod traits;
