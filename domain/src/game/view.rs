//! Serializable snapshots of a game

use super::record::{FullRoundRecord, RoundRecord};
use super::result::{AssassinationRecord, GameResult};
use crate::core::player::PlayerId;
use crate::quest::QuestScore;
use crate::roles::{Faction, KnowledgeMap, Role};
use serde::Serialize;
use std::collections::BTreeMap;

/// The game as every player sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicView {
    pub quest_number: u8,
    pub round_number: u32,
    pub leader: PlayerId,
    /// `None` once all quests are decided
    pub team_size_required: Option<usize>,
    pub seating_order: Vec<PlayerId>,
    pub quest_requirements: Vec<usize>,
    pub quest_score: QuestScore,
    pub consecutive_rejections: u8,
    pub proposed_team: Option<Vec<PlayerId>>,
    pub rounds: Vec<RoundRecord>,
}

impl PublicView {
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Complete account of a game, hidden information included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub seed: Option<u64>,
    pub seating_order: Vec<PlayerId>,
    pub initial_leader: PlayerId,
    pub roles: BTreeMap<PlayerId, Role>,
    pub knowledge: KnowledgeMap,
    pub rounds: Vec<FullRoundRecord>,
    pub quest_score: QuestScore,
    pub assassination: Option<AssassinationRecord>,
    pub result: Option<GameResult>,
    pub winner: Option<Faction>,
}

impl GameReport {
    /// Rounds that ended in a quest, in play order
    pub fn quests(&self) -> impl Iterator<Item = &FullRoundRecord> {
        self.rounds.iter().filter(|r| r.round.quest_outcome.is_some())
    }

    pub fn rejected_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| !r.round.was_approved()).count()
    }
}
