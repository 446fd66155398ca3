//! Plugin manifest definition

use serde::{Deserialize, Serialize};
use crate::application::errors::PluginError;

/// Contents of a plugin unit file.
///
/// ```yaml
/// plugin: puzzles        # catalog entry, defaults to the file stem
/// version: "1.2"
/// enabled: true
/// settings:
///   page-size: 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginManifest {
    /// Catalog entry to load
    pub plugin: Option<String>,

    pub version: Option<String>,

    pub description: Option<String>,

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Free-form settings handed to the entry point
    #[serde(default)]
    pub settings: serde_yaml::Value,
}

fn enabled_by_default() -> bool {
    true
}

impl PluginManifest {
    pub fn parse(content: &str) -> Result<Self, PluginError> {
        // An empty unit file is a valid manifest with every default
        if content.trim().is_empty() {
            return Ok(Self {
                enabled: true,
                ..Self::default()
            });
        }
        serde_yaml::from_str(content)
            .map_err(|e| PluginError::Manifest(format!("Failed to parse manifest: {}", e)))
    }

    /// Catalog entry this manifest selects, falling back to `stem`
    pub fn plugin_name<'a>(&'a self, stem: &'a str) -> &'a str {
        self.plugin.as_deref().unwrap_or(stem)
    }

    /// Look up a string setting. A present but non-string value is an error.
    pub fn setting(&self, key: &str) -> Result<Option<&str>, PluginError> {
        match self.settings.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| PluginError::Manifest(format!("{} must be a string", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_and_sparse_manifests() {
        let empty = PluginManifest::parse("").unwrap();
        assert!(empty.enabled);
        assert_eq!(empty.plugin_name("stats"), "stats");

        let sparse = PluginManifest::parse("plugin: puzzles\n").unwrap();
        assert!(sparse.enabled);
        assert_eq!(sparse.plugin_name("stats"), "puzzles");
    }

    #[test]
    fn reads_settings() {
        let manifest =
            PluginManifest::parse("enabled: false\nsettings:\n  channel: drops\n").unwrap();
        assert!(!manifest.enabled);
        assert_eq!(manifest.setting("channel").unwrap(), Some("drops"));
        assert_eq!(manifest.setting("missing").unwrap(), None);
    }

    #[test]
    fn non_string_setting_is_an_error() {
        let manifest = PluginManifest::parse("settings:\n  page-size: 10\n").unwrap();
        assert!(matches!(manifest.setting("page-size"), Err(PluginError::Manifest(_))));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = PluginManifest::parse("plugin: [unterminated").unwrap_err();
        assert!(matches!(err, PluginError::Manifest(_)));
    }
}
