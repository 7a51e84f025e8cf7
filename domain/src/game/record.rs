//! Append-only round records

use crate::core::player::PlayerId;
use crate::quest::{QuestCards, QuestOutcome};
use crate::vote::{Ballot, VoteResult};
use serde::Serialize;

/// Public record of one proposal attempt (Value Object)
///
/// Safe to show every player: it carries the revealed votes and the quest
/// card counts, never who played which card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub quest_number: u8,
    pub team_size_required: usize,
    pub leader: PlayerId,
    pub proposed_team: Vec<PlayerId>,
    pub votes: Ballot,
    pub vote_result: VoteResult,
    /// Counter value after this round
    pub consecutive_rejections: u8,
    /// Present only when the team was approved and the quest was run
    pub quest_outcome: Option<QuestOutcome>,
}

impl RoundRecord {
    pub fn was_approved(&self) -> bool {
        self.vote_result.is_approved()
    }
}

/// Round record including which card each team member played
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullRoundRecord {
    #[serde(flatten)]
    pub round: RoundRecord,
    pub quest_cards_played: Option<QuestCards>,
}

impl FullRoundRecord {
    pub fn public(&self) -> &RoundRecord {
        &self.round
    }
}
