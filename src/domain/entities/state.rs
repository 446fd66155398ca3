use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed collection that remembers insertion order.
pub type Collection = Map<String, Value>;

/// Persisted bot state shared with plugins.
///
/// Collections keep the order their keys had in the persisted file. Top-level
/// keys this core does not know about are carried in `extra` so that a save
/// never drops data owned by a plugin.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApplicationState {
    #[serde(default)]
    pub puzzles: Collection,

    #[serde(default)]
    pub pieces: Collection,

    #[serde(default)]
    pub render_flags: Collection,

    #[serde(default)]
    pub collected: Collection,

    #[serde(flatten)]
    pub extra: Collection,
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puzzle slugs in stored order
    pub fn puzzle_slugs(&self) -> Vec<&str> {
        self.puzzles.keys().map(String::as_str).collect()
    }

    /// Piece slugs in stored order
    pub fn piece_slugs(&self) -> Vec<&str> {
        self.pieces.keys().map(String::as_str).collect()
    }
}
