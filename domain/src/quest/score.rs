//! Running quest score

use super::resolver::QuestResult;
use crate::roles::Faction;
use serde::{Deserialize, Serialize};

/// Quests a faction must win to end the quest phase
pub const QUESTS_TO_WIN: u8 = 3;

/// Quests won by each faction so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestScore {
    pub good: u8,
    pub evil: u8,
}

impl QuestScore {
    pub fn record(&mut self, result: QuestResult) {
        match result {
            QuestResult::Success => self.good += 1,
            QuestResult::Fail => self.evil += 1,
        }
    }

    /// The faction that has reached [`QUESTS_TO_WIN`], if any
    pub fn winner(&self) -> Option<Faction> {
        if self.good >= QUESTS_TO_WIN {
            Some(Faction::Good)
        } else if self.evil >= QUESTS_TO_WIN {
            Some(Faction::Evil)
        } else {
            None
        }
    }
}

impl std::fmt::Display for QuestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Good {} - {} Evil", self.good, self.evil)
    }
}
