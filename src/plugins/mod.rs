//! Plugins compiled into puzzle-bot

pub mod housekeeping;
pub mod puzzles;

use crate::infrastructure::plugins::PluginCatalog;

/// Catalog of every built-in plugin
pub fn builtin_catalog() -> PluginCatalog {
    PluginCatalog::new()
        .with(housekeeping::DESCRIPTOR)
        .with(puzzles::DESCRIPTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::plugins::manifest::PluginManifest;
    use crate::infrastructure::plugins::PluginHost;

    #[test]
    fn builtin_catalog_lists_all_plugins() {
        assert_eq!(builtin_catalog().names(), vec!["housekeeping", "puzzles"]);
    }

    #[test]
    fn puzzles_honours_command_prefix() {
        let manifest = PluginManifest::parse("settings:\n  command-prefix: halloween-\n").unwrap();
        let mut host = PluginHost::new(&manifest);

        (puzzles::DESCRIPTOR.entry)(&mut host).unwrap();

        let names: Vec<_> = host.into_commands().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["halloween-puzzles", "halloween-pieces", "halloween-drop"]);
    }

    #[test]
    fn puzzles_rejects_non_string_prefix() {
        let manifest = PluginManifest::parse("settings:\n  command-prefix: 3\n").unwrap();
        let mut host = PluginHost::new(&manifest);

        assert!((puzzles::DESCRIPTOR.entry)(&mut host).is_err());
    }
}
