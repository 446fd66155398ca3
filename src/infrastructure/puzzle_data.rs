//! Puzzle data setup run on every ready event

use serde_json::Value;

use crate::application::errors::BotError;
use crate::domain::entities::ApplicationState;
use crate::domain::traits::DomainInitializer;

/// Makes sure every known puzzle has a pieces entry and a render flag.
/// Existing entries are never touched, so repeated runs are harmless.
#[derive(Debug, Default)]
pub struct PuzzleDataInitializer;

impl DomainInitializer for PuzzleDataInitializer {
    fn initialize(&self, state: &mut ApplicationState) -> Result<(), BotError> {
        let mut added = 0;
        for slug in state.puzzles.keys() {
            if !state.pieces.contains_key(slug) {
                state.pieces.insert(slug.clone(), Value::Object(Default::default()));
                added += 1;
            }
            if !state.render_flags.contains_key(slug) {
                state.render_flags.insert(slug.clone(), Value::Bool(false));
            }
        }
        if added > 0 {
            tracing::info!("Initialized piece sets for {} puzzles", added);
        }
        Ok(())
    }
}
