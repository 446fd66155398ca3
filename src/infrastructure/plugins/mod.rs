//! Plugin system for puzzle-bot
//! 
//! Plugins are compiled into the bot and listed in a [`PluginCatalog`]. A
//! plugin is switched on by dropping a YAML unit file naming it into the
//! plugin directory; the loader reads those units once per process.

pub mod catalog;
pub mod loader;
pub mod manifest;
pub mod source;

pub use catalog::{PluginCatalog, PluginDescriptor, PluginHost};
pub use loader::{PluginLoadState, PluginLoader, PluginRecord};
pub use source::DirectorySource;
