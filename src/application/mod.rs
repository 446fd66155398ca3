//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Keys: Slug normalization for state collections
//! - Sync: One-shot command registry sync
//! - Events: Typed event handlers and the dispatcher
//! - Lifecycle: The orchestrator driving the process
//! - Errors: Domain-specific errors

pub mod errors;
pub mod events;
pub mod keys;
pub mod lifecycle;
pub mod sync;
