//! Housekeeping commands every deployment gets

use crate::application::errors::PluginResult;
use crate::domain::entities::CommandSpec;
use crate::infrastructure::plugins::{PluginDescriptor, PluginHost};

pub const DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    name: "housekeeping",
    description: "Liveness and help commands",
    entry,
};

fn entry(host: &mut PluginHost<'_>) -> PluginResult<()> {
    host.add_command(CommandSpec::new("ping").with_description("Check the bot is alive"));
    host.add_command(CommandSpec::new("help").with_description("Show available commands"));
    host.add_command(CommandSpec::new("version").with_description("Show bot version"));
    Ok(())
}
