//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod initializer;
pub mod log;
pub mod plugin_source;
pub mod registry;
pub mod store;

pub use gateway::Gateway;
pub use initializer::DomainInitializer;
pub use log::EventLog;
pub use plugin_source::{PluginSource, PluginUnit};
pub use registry::CommandRegistry;
pub use store::StateStore;
