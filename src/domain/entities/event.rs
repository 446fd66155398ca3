use chrono::{DateTime, Utc};

use super::actor::Actor;
use crate::application::errors::CommandError;

/// Lifecycle and command events delivered by the gateway
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// Connection established. May be delivered again after a reconnect.
    Ready { session_id: String, bot_user: Actor },

    /// A prefix command was invoked
    CommandInvoked {
        actor: Actor,
        command: String,
        channel: String,
        at: DateTime<Utc>,
    },

    /// A prefix command handler failed
    CommandFailed {
        actor: Actor,
        command: String,
        error: CommandError,
    },

    /// A platform-native (slash) command handler failed
    InteractionFailed {
        actor: Actor,
        command: String,
        error: CommandError,
    },

    /// The remote side closed the connection for good
    Closed,
}

/// Discriminant of [`BotEvent`], used for handler registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    CommandInvoked,
    CommandFailed,
    InteractionFailed,
    Closed,
}

impl BotEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BotEvent::Ready { .. } => EventKind::Ready,
            BotEvent::CommandInvoked { .. } => EventKind::CommandInvoked,
            BotEvent::CommandFailed { .. } => EventKind::CommandFailed,
            BotEvent::InteractionFailed { .. } => EventKind::InteractionFailed,
            BotEvent::Closed => EventKind::Closed,
        }
    }

    pub fn command_invoked(
        actor: Actor,
        command: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        BotEvent::CommandInvoked {
            actor,
            command: command.into(),
            channel: channel.into(),
            at: Utc::now(),
        }
    }
}
