//! Progress notification port
//!
//! Defines the interface for reporting progress while a game is played.

use avalon_domain::{
    AssassinationRecord, Ballot, DecisionKind, GameReport, GameState, PlayerId, QuestOutcome,
    QuestScore, VoteTally,
};

/// Callback for progress updates during a game
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (plain lines, spinners, etc.)
pub trait GameProgressNotifier: Send + Sync {
    /// Called once roles and seating are fixed
    fn on_game_start(&self, state: &GameState);

    /// Called at the start of each proposal round
    fn on_round_start(&self, round_number: u32, quest_number: u8, leader: &PlayerId, team_size: usize);

    /// Called when the game has a result
    fn on_game_end(&self, report: &GameReport);

    // ==================== Decision Callbacks ====================

    /// Called just before a player is asked for a decision
    fn on_decision_start(&self, _player: &PlayerId, _kind: DecisionKind) {}

    /// Called when a player's decision arrived (`success` is false on fallback)
    fn on_decision_complete(&self, _player: &PlayerId, _kind: DecisionKind, _success: bool) {}

    // ==================== Reveal Callbacks ====================

    /// A public discussion message
    fn on_message(&self, _speaker: &PlayerId, _message: &str) {}

    fn on_team_proposed(&self, _leader: &PlayerId, _team: &[PlayerId]) {}

    /// The full ballot, revealed at once
    fn on_votes_revealed(&self, _ballot: &Ballot, _tally: &VoteTally) {}

    /// The quest result, revealed at once
    fn on_quest_revealed(&self, _outcome: &QuestOutcome, _score: QuestScore) {}

    fn on_assassination(&self, _record: &AssassinationRecord) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GameProgressNotifier for NoProgress {
    fn on_game_start(&self, _state: &GameState) {}
    fn on_round_start(&self, _round_number: u32, _quest_number: u8, _leader: &PlayerId, _team_size: usize) {}
    fn on_game_end(&self, _report: &GameReport) {}
}
