//! Console gateway for development/testing
//!
//! Each stdin line becomes an event:
//! - `!name args` invokes a prefix command
//! - `!fail name` reports a failed prefix command
//! - `/fail name` reports a failed slash command
//! - `:reconnect` delivers another ready event
//! - `:quit` (or end of input) closes the gateway

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{Actor, BotEvent};
use crate::domain::traits::Gateway;

const CHANNEL: &str = "console";

/// Parses console lines into gateway events
pub struct EventParser {
    command_prefix: String,
    actor: Actor,
}

impl EventParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
            actor: Actor::new("0")
                .with_username("console")
                .with_display_name("Console"),
        }
    }

    /// Parse one line. Blank lines and plain chatter yield `None`.
    pub fn parse(&self, line: &str) -> Option<BotEvent> {
        let line = line.trim();
        match line {
            ":quit" => return Some(BotEvent::Closed),
            ":reconnect" => return Some(ready_event()),
            _ => {}
        }

        if let Some(rest) = line.strip_prefix('/') {
            let name = rest.strip_prefix("fail")?.trim();
            return Some(BotEvent::InteractionFailed {
                actor: self.actor.clone(),
                command: name.to_string(),
                error: CommandError::ExecutionFailed("reported from console".to_string()),
            });
        }

        let rest = line.strip_prefix(self.command_prefix.as_str())?;
        let mut parts = rest.split_whitespace();
        let name = parts.next()?;
        if name == "fail" {
            let failed = parts.next().unwrap_or_default();
            return Some(BotEvent::CommandFailed {
                actor: self.actor.clone(),
                command: failed.to_string(),
                error: CommandError::ExecutionFailed("reported from console".to_string()),
            });
        }
        Some(BotEvent::command_invoked(self.actor.clone(), name, CHANNEL))
    }
}

fn ready_event() -> BotEvent {
    BotEvent::Ready {
        session_id: uuid::Uuid::new_v4().to_string(),
        bot_user: Actor::new("console-bot").with_username("puzzle-bot"),
    }
}

/// Console gateway reading events from a line source
pub struct ConsoleGateway<R> {
    lines: Lines<R>,
    parser: EventParser,
    pending: VecDeque<BotEvent>,
    connected: bool,
}

impl ConsoleGateway<BufReader<Stdin>> {
    pub fn stdin(prefix: impl Into<String>) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), prefix)
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleGateway<R> {
    pub fn new(reader: R, prefix: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            parser: EventParser::new(prefix),
            pending: VecDeque::new(),
            connected: false,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Gateway for ConsoleGateway<R> {
    async fn connect(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting console gateway (dev mode)");
        self.connected = true;
        self.pending.push_back(ready_event());
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<BotEvent>, BotError> {
        if !self.connected {
            return Err(BotError::Gateway("not connected".to_string()));
        }
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| BotError::Gateway(format!("Failed to read console: {}", e)))?;
            let Some(line) = line else {
                return Ok(None);
            };
            if let Some(event) = self.parser.parse(&line) {
                return Ok(Some(event));
            }
        }
    }

    async fn close(&mut self) -> Result<(), BotError> {
        if self.connected {
            tracing::info!("Console gateway closed");
        }
        self.connected = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EventKind;

    #[test]
    fn parses_console_lines() {
        let parser = EventParser::new("!");

        let kinds: Vec<_> = ["!drop 3", "!fail drop", "/fail pieces", ":reconnect", ":quit", "hello", "", "/pieces"]
            .iter()
            .map(|line| parser.parse(line).map(|e| e.kind()))
            .collect();

        assert_eq!(
            kinds,
            vec![
                Some(EventKind::CommandInvoked),
                Some(EventKind::CommandFailed),
                Some(EventKind::InteractionFailed),
                Some(EventKind::Ready),
                Some(EventKind::Closed),
                None,
                None,
                None,
            ]
        );
    }

    #[test]
    fn invoked_command_carries_name_and_channel() {
        let parser = EventParser::new("!");
        match parser.parse("!drop 3") {
            Some(BotEvent::CommandInvoked { command, channel, actor, .. }) => {
                assert_eq!(command, "drop");
                assert_eq!(channel, "console");
                assert_eq!(actor.label(), "console");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn emits_ready_then_lines_then_ends() {
        let input: &[u8] = b"chatter\n!ping\n";
        let mut gateway = ConsoleGateway::new(input, "!");

        assert!(gateway.next_event().await.is_err());
        gateway.connect().await.unwrap();

        let first = gateway.next_event().await.unwrap().unwrap();
        assert_eq!(first.kind(), EventKind::Ready);
        let second = gateway.next_event().await.unwrap().unwrap();
        assert_eq!(second.kind(), EventKind::CommandInvoked);
        assert!(gateway.next_event().await.unwrap().is_none());

        gateway.close().await.unwrap();
    }
}
