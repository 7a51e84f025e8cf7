//! Quest resolution (QuestResolver)

use super::card::{QuestCard, QuestCards};
use serde::{Deserialize, Serialize};

/// Whether a quest succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestResult {
    Success,
    Fail,
}

impl std::fmt::Display for QuestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestResult::Success => write!(f, "success"),
            QuestResult::Fail => write!(f, "fail"),
        }
    }
}

/// Public outcome of a quest: card counts and the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestOutcome {
    pub success_cards: usize,
    pub fail_cards: usize,
    pub result: QuestResult,
}

/// Resolves a quest from its cards using the single-fail rule
pub struct QuestResolver;

impl QuestResolver {
    /// Any fail card fails the quest.
    ///
    /// Cards are taken as given; role legality is enforced before this point.
    pub fn decide(cards: &QuestCards) -> QuestOutcome {
        let fail_cards = cards.iter().filter(|(_, c)| *c == QuestCard::Fail).count();
        let success_cards = cards.len() - fail_cards;

        QuestOutcome {
            success_cards,
            fail_cards,
            result: if fail_cards == 0 {
                QuestResult::Success
            } else {
                QuestResult::Fail
            },
        }
    }
}
