//! Event handling - Typed handlers for gateway events
//!
//! Dispatch order for `Ready` is puzzle data first, then the registry sync,
//! so the first published command set already sees initialized data.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{EventDispatcher, LifecycleContext};
pub use handlers::{
    CommandErrorHandler, CommandLogHandler, InteractionErrorHandler, PuzzleDataHandler,
    RegistrySyncHandler,
};
