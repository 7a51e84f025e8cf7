//! Decision kinds requested from players

use super::parsing::{ASSASSINATE_TAG, MESSAGE_TAG, PROPOSED_TEAM_TAG, QUEST_CARD_TAG, VOTE_TAG};
use serde::{Deserialize, Serialize};

/// The kind of decision a player is asked to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// A public message during discussion
    Discussion,
    /// The leader's team proposal
    Proposal,
    Vote,
    QuestCard,
    Assassination,
}

impl DecisionKind {
    pub const ALL: [DecisionKind; 5] = [
        DecisionKind::Discussion,
        DecisionKind::Proposal,
        DecisionKind::Vote,
        DecisionKind::QuestCard,
        DecisionKind::Assassination,
    ];

    /// The response tag that carries this decision
    pub fn tag(&self) -> &'static str {
        match self {
            DecisionKind::Discussion => MESSAGE_TAG,
            DecisionKind::Proposal => PROPOSED_TEAM_TAG,
            DecisionKind::Vote => VOTE_TAG,
            DecisionKind::QuestCard => QUEST_CARD_TAG,
            DecisionKind::Assassination => ASSASSINATE_TAG,
        }
    }

    /// The decision a prompt asks for.
    ///
    /// Prompts end with their answer format, so the kind whose tag appears
    /// last wins; tags quoted earlier (in notes, for example) are ignored.
    pub fn requested_in(prompt: &str) -> Option<DecisionKind> {
        Self::ALL
            .iter()
            .filter_map(|kind| {
                prompt
                    .rfind(&format!("<{}>", kind.tag()))
                    .map(|pos| (pos, *kind))
            })
            .max_by_key(|(pos, _)| *pos)
            .map(|(_, kind)| kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::Discussion => "discussion",
            DecisionKind::Proposal => "proposal",
            DecisionKind::Vote => "vote",
            DecisionKind::QuestCard => "quest_card",
            DecisionKind::Assassination => "assassination",
        }
    }

    /// Heading used in private-notes transcripts
    pub fn display_name(&self) -> &'static str {
        match self {
            DecisionKind::Discussion => "Discussion",
            DecisionKind::Proposal => "Proposal",
            DecisionKind::Vote => "Vote",
            DecisionKind::QuestCard => "Quest",
            DecisionKind::Assassination => "Assassination",
        }
    }

    /// What happens when no usable decision comes back
    pub fn safe_default(&self) -> &'static str {
        match self {
            DecisionKind::Discussion => "empty message",
            DecisionKind::Proposal => "first seats from the seating order",
            DecisionKind::Vote => "reject",
            DecisionKind::QuestCard => "success",
            DecisionKind::Assassination => "forfeit the guess",
        }
    }
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
