//! Port for persisting a game as it is played.
//!
//! The recorder receives public round records, full round records with the
//! quest cards, transcripts and private notes. Methods are synchronous and
//! non-fallible: a recording failure never affects the game.

use avalon_domain::{DecisionKind, FullRoundRecord, GameReport, PlayerId, RoundRecord};

/// Sink for everything a game produces
pub trait GameRecorder: Send + Sync {
    /// Called once, before the first round
    fn on_game_start(&self, report: &GameReport);

    /// Called when a new round begins
    fn on_round_start(&self, _round_number: u32, _quest_number: u8, _leader: &PlayerId) {}

    /// A completed round, public subset
    fn append(&self, round: &RoundRecord);

    /// A completed round including which card each team member played
    fn append_full(&self, round: &FullRoundRecord);

    /// A public discussion message, plus the full response it came from
    fn on_message(
        &self,
        _round_number: u32,
        _speaker: &PlayerId,
        _public_message: &str,
        _full_response: &str,
    ) {
    }

    /// A player's private reasoning for one decision
    fn on_private_thoughts(
        &self,
        _player: &PlayerId,
        _round_number: u32,
        _kind: DecisionKind,
        _thoughts: &str,
    ) {
    }

    /// Called once with the final report
    fn on_game_end(&self, report: &GameReport);
}

/// No-op implementation for tests and when recording is disabled.
pub struct NoGameRecorder;

impl GameRecorder for NoGameRecorder {
    fn on_game_start(&self, _report: &GameReport) {}
    fn append(&self, _round: &RoundRecord) {}
    fn append_full(&self, _round: &FullRoundRecord) {}
    fn on_game_end(&self, _report: &GameReport) {}
}
