//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: State persistence
//! - Plugins: Unit discovery and loading
//! - Adapters: Platform integrations (console gateway, Discord registry)
//! - Logging: Subscriber setup and the event log

pub mod adapters;
pub mod config;
pub mod logging;
pub mod plugins;
pub mod puzzle_data;
pub mod storage;

#[cfg(test)]
pub mod testing;
