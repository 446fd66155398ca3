//! Discord command registry over the REST API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::SyncError;
use crate::domain::entities::{CommandSpec, Scope};
use crate::domain::traits::CommandRegistry;

/// Chat input (slash) command type
const CHAT_INPUT: u8 = 1;

#[derive(Debug, Serialize)]
struct ApplicationCommand<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: u8,
}

#[derive(Debug, Deserialize)]
struct RegisteredCommand {
    name: String,
}

/// Publishes guild commands with a bulk overwrite
pub struct DiscordCommandRegistry {
    token: String,
    application_id: u64,
    api_base: String,
    client: Client,
}

impl DiscordCommandRegistry {
    pub fn new(token: impl Into<String>, application_id: u64, api_base: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            application_id,
            api_base: api_base.into(),
            client: Client::new(),
        }
    }

    fn commands_url(&self, scope: Scope) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.api_base.trim_end_matches('/'),
            self.application_id,
            scope
        )
    }
}

fn to_payload(commands: &[CommandSpec]) -> Vec<ApplicationCommand<'_>> {
    commands
        .iter()
        .map(|c| ApplicationCommand {
            name: &c.name,
            // The platform rejects empty descriptions
            description: if c.description.is_empty() { c.name.as_str() } else { c.description.as_str() },
            kind: CHAT_INPUT,
        })
        .collect()
}

#[async_trait]
impl CommandRegistry for DiscordCommandRegistry {
    async fn register(&self, scope: Scope, commands: &[CommandSpec]) -> Result<Vec<String>, SyncError> {
        let response = self
            .client
            .put(self.commands_url(scope))
            .header("Authorization", format!("Bot {}", self.token))
            .json(&to_payload(commands))
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(SyncError::Rejected(format!("{}: {}", status, error)));
        }

        let registered: Vec<RegisteredCommand> = response
            .json()
            .await
            .map_err(|e| SyncError::Network(format!("Invalid registry response: {}", e)))?;

        Ok(registered.into_iter().map(|c| c.name).collect())
    }
}

/// Registry that only logs what it would publish. Used without an application id.
#[derive(Debug, Default)]
pub struct LoggingCommandRegistry;

#[async_trait]
impl CommandRegistry for LoggingCommandRegistry {
    async fn register(&self, scope: Scope, commands: &[CommandSpec]) -> Result<Vec<String>, SyncError> {
        let names: Vec<String> = commands.iter().map(|c| c.name.clone()).collect();
        tracing::info!("Dry run: would publish {:?} to scope {}", names, scope);
        Ok(names)
    }
}
