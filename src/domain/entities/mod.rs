//! Domain entities - Core business objects with no external dependencies

pub mod actor;
pub mod command;
pub mod event;
pub mod state;

pub use actor::Actor;
pub use command::{CommandSpec, CommandTree, Scope};
pub use event::{BotEvent, EventKind};
pub use state::{ApplicationState, Collection};
