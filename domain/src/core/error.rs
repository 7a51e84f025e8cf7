//! Domain error types

use crate::core::player::PlayerId;
use crate::roles::Role;
use thiserror::Error;

/// Structural errors raised by the game rules.
///
/// Every operation that returns one of these has rejected its input before
/// touching any game state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Expected {expected} players, got {actual}")]
    InvalidPlayerCount { expected: usize, actual: usize },

    #[error("Player listed twice: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("Role dealt more often than the role table allows: {0}")]
    UnexpectedRole(Role),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Quest {quest} requires a team of {expected}, got {actual}")]
    InvalidTeamSize {
        quest: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Player appears twice on the proposed team: {0}")]
    DuplicateTeamMember(PlayerId),

    #[error("{proposer} is not the current leader ({leader})")]
    NotLeader { proposer: PlayerId, leader: PlayerId },

    #[error("Incomplete ballot: missing votes from {0:?}")]
    IncompleteBallot(Vec<PlayerId>),

    #[error("Player voted more than once: {0}")]
    DuplicateVote(PlayerId),

    #[error("{0} is not on the quest team")]
    NotOnTeam(PlayerId),

    #[error("Missing quest cards from {0:?}")]
    MissingQuestCards(Vec<PlayerId>),

    #[error("Player played more than one quest card: {0}")]
    DuplicateQuestCard(PlayerId),

    #[error("Quest number out of range: {0} (valid: 1-5)")]
    InvalidQuestNumber(u8),

    #[error("Cannot {action} during the {phase} phase")]
    OutOfPhase {
        action: &'static str,
        phase: &'static str,
    },
}

impl GameError {
    /// Errors caused by a malformed team proposal
    pub fn is_invalid_proposal(&self) -> bool {
        matches!(
            self,
            GameError::InvalidTeamSize { .. }
                | GameError::DuplicateTeamMember(_)
                | GameError::NotLeader { .. }
                | GameError::UnknownPlayer(_)
        )
    }
}
