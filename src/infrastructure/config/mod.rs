//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::lifecycle::TOKEN_VAR;
use crate::domain::entities::Scope;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub discord: DiscordConfig,
    pub plugins: PluginConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    /// Never written to disk; comes from the environment or the CLI
    #[serde(skip_serializing, default)]
    pub token: Option<String>,

    /// Guild the command set is published to
    pub guild_id: u64,

    /// Application id used for the command registry. Without it the
    /// registry sync only logs what it would publish.
    #[serde(default)]
    pub application_id: Option<u64>,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    pub directory: PathBuf,

    /// Unit names (file name or stem) that are never loaded
    #[serde(default)]
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    pub path: PathBuf,
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "puzzle-bot".to_string(),
                prefix: "!".to_string(),
            },
            discord: DiscordConfig {
                token: None,
                guild_id: 1309962372269609010,
                application_id: None,
                api_base: default_api_base(),
            },
            plugins: PluginConfig {
                directory: PathBuf::from("./plugins"),
                excluded: [
                    "__init__",
                    "db_utils",
                    "preview_cache",
                    "log_utils",
                    "puzzle_composer",
                    "patch_config",
                    "constants",
                    "drop_config",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            },
            storage: StorageConfig {
                path: PathBuf::from("data.json"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Overlay environment variables. Applied once at startup.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var(TOKEN_VAR) {
            self.discord.token = Some(token);
        }

        if let Some(prefix) = var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Some(guild) = var("GUILD_ID") {
            self.discord.guild_id = guild
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("GUILD_ID: {}", guild)))?;
        }

        if let Some(app) = var("APPLICATION_ID") {
            let id = app
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("APPLICATION_ID: {}", app)))?;
            self.discord.application_id = Some(id);
        }

        Ok(())
    }

    pub fn scope(&self) -> Scope {
        Scope(self.discord.guild_id)
    }

    /// Render the config as YAML, without secrets
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_round_trip_through_yaml_without_the_token() {
        let mut config = Config::default();
        config.discord.token = Some("secret".to_string());

        let yaml = config.to_yaml().unwrap();
        assert!(!yaml.contains("secret"));

        let back = Config::parse(&yaml).unwrap();
        assert_eq!(back.discord.token, None);
        assert_eq!(back.scope(), Scope(1309962372269609010));
        assert_eq!(back.plugins.excluded, config.plugins.excluded);
        assert_eq!(back.plugins.excluded.len(), 8);
        assert!(back.plugins.excluded.iter().any(|name| name == "drop_config"));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            (TOKEN_VAR, "abc"),
            ("BOT_PREFIX", "?"),
            ("GUILD_ID", "42"),
            ("APPLICATION_ID", "7"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();

        config.apply_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.discord.token.as_deref(), Some("abc"));
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.scope(), Scope(42));
        assert_eq!(config.discord.application_id, Some(7));
    }

    #[test]
    fn invalid_guild_id_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_vars(|name| (name == "GUILD_ID").then(|| "not-a-number".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn optional_sections_default() {
        let yaml = "bot:\n  name: b\n  prefix: '!'\ndiscord:\n  guild-id: 5\nplugins:\n  directory: cogs\nstorage:\n  path: d.json\n";
        let config = Config::parse(yaml).unwrap();
        assert!(config.plugins.excluded.is_empty());
        assert_eq!(config.discord.api_base, "https://discord.com/api/v10");
        assert_eq!(config.discord.application_id, None);
    }
}
