//! Puzzle and piece commands. Their handlers live with the gateway.

use crate::application::errors::PluginResult;
use crate::domain::entities::CommandSpec;
use crate::infrastructure::plugins::{PluginDescriptor, PluginHost};

pub const DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    name: "puzzles",
    description: "Puzzle browsing and piece collection",
    entry,
};

fn entry(host: &mut PluginHost<'_>) -> PluginResult<()> {
    // Optional prefix so several puzzle sets can share a server
    let prefix = host.manifest().setting("command-prefix")?.unwrap_or_default().to_string();

    host.add_command(
        CommandSpec::new(format!("{}puzzles", prefix)).with_description("List available puzzles"),
    );
    host.add_command(
        CommandSpec::new(format!("{}pieces", prefix)).with_description("Show your collected pieces"),
    );
    host.add_command(
        CommandSpec::new(format!("{}drop", prefix)).with_description("Claim a dropped puzzle piece"),
    );
    Ok(())
}
