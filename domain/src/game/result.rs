//! Terminal game results

use crate::core::player::PlayerId;
use crate::roles::Faction;
use serde::ser::Serializer;
use serde::Serialize;

/// Outcome of the Assassin's single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssassinationOutcome {
    MerlinSurvived,
    MerlinAssassinated,
}

impl AssassinationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssassinationOutcome::MerlinSurvived => "merlin_survived",
            AssassinationOutcome::MerlinAssassinated => "merlin_assassinated",
        }
    }
}

/// How the game ended. Finalized exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Good won three quests; the assassination decides the winner
    GoodWinsByQuests {
        assassination: AssassinationOutcome,
    },
    EvilWinsByQuests,
    EvilWinsByRejections,
}

impl GameResult {
    pub fn winner(&self) -> Faction {
        match self {
            GameResult::GoodWinsByQuests {
                assassination: AssassinationOutcome::MerlinSurvived,
            } => Faction::Good,
            _ => Faction::Evil,
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            GameResult::GoodWinsByQuests { assassination } => {
                format!("good_wins_by_quests_then_{}", assassination.as_str())
            }
            GameResult::EvilWinsByQuests => "evil_wins_by_quests".to_string(),
            GameResult::EvilWinsByRejections => "evil_wins_by_rejections".to_string(),
        }
    }

    /// One-line human description
    pub fn describe(&self) -> &'static str {
        match self {
            GameResult::GoodWinsByQuests {
                assassination: AssassinationOutcome::MerlinSurvived,
            } => "Good won three quests and Merlin survived the assassination",
            GameResult::GoodWinsByQuests {
                assassination: AssassinationOutcome::MerlinAssassinated,
            } => "Good won three quests, but the Assassin found Merlin",
            GameResult::EvilWinsByQuests => "Evil sabotaged three quests",
            GameResult::EvilWinsByRejections => "Five consecutive team proposals were rejected",
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl Serialize for GameResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

/// What happened in the assassination step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssassinationRecord {
    pub assassin: PlayerId,
    /// `None` when the Assassin produced no usable guess
    pub target: Option<PlayerId>,
    pub merlin: PlayerId,
    pub outcome: AssassinationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_strings() {
        let survived = GameResult::GoodWinsByQuests {
            assassination: AssassinationOutcome::MerlinSurvived,
        };
        assert_eq!(
            survived.to_string(),
            "good_wins_by_quests_then_merlin_survived"
        );
        assert_eq!(
            GameResult::EvilWinsByRejections.to_string(),
            "evil_wins_by_rejections"
        );
        assert_eq!(
            serde_json::to_string(&GameResult::EvilWinsByQuests).unwrap(),
            "\"evil_wins_by_quests\""
        );
    }

    #[test]
    fn test_winner() {
        assert_eq!(
            GameResult::GoodWinsByQuests {
                assassination: AssassinationOutcome::MerlinSurvived
            }
            .winner(),
            Faction::Good
        );
        assert_eq!(
            GameResult::GoodWinsByQuests {
                assassination: AssassinationOutcome::MerlinAssassinated
            }
            .winner(),
            Faction::Evil
        );
        assert_eq!(GameResult::EvilWinsByQuests.winner(), Faction::Evil);
        assert_eq!(GameResult::EvilWinsByRejections.winner(), Faction::Evil);
    }
}
