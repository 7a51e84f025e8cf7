//! Type definitions for the RunGame use case.

use avalon_domain::{DecisionKind, GameError, PlayerId};
use thiserror::Error;

/// Errors that can abort a game run
///
/// Provider failures never appear here: they degrade to safe defaults.
#[derive(Error, Debug)]
pub enum RunGameError {
    #[error("No decision provider configured for {0}")]
    MissingProvider(PlayerId),

    #[error("Game rule violation: {0}")]
    Game(#[from] GameError),
}

/// One prompt for one player
#[derive(Debug, Clone)]
pub(super) struct DecisionRequest {
    pub player: PlayerId,
    pub kind: DecisionKind,
    pub round_number: u32,
    pub prompt: String,
}
