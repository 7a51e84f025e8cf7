//! Quest card value objects

use crate::core::error::GameError;
use crate::core::player::PlayerId;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A card played face-down by a quest team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestCard {
    Success,
    Fail,
}

impl QuestCard {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestCard::Success => "success",
            QuestCard::Fail => "fail",
        }
    }
}

impl std::fmt::Display for QuestCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cards played by exactly the members of a quest team, in team order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCards {
    entries: Vec<(PlayerId, QuestCard)>,
}

impl QuestCards {
    /// Build the card set, requiring exactly one card per team member
    pub fn collect(team: &[PlayerId], cards: Vec<(PlayerId, QuestCard)>) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        for (player, _) in &cards {
            if !team.contains(player) {
                return Err(GameError::NotOnTeam(player.clone()));
            }
            if !seen.insert(player.clone()) {
                return Err(GameError::DuplicateQuestCard(player.clone()));
            }
        }

        let missing: Vec<PlayerId> = team.iter().filter(|p| !seen.contains(*p)).cloned().collect();
        if !missing.is_empty() {
            return Err(GameError::MissingQuestCards(missing));
        }

        let entries = team
            .iter()
            .filter_map(|member| {
                cards
                    .iter()
                    .find(|(p, _)| p == member)
                    .map(|(p, card)| (p.clone(), *card))
            })
            .collect();

        Ok(Self { entries })
    }

    /// Replace every card played by a player `may_fail` rejects with a success
    pub fn coerce(self, may_fail: impl Fn(&PlayerId) -> bool) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(player, card)| {
                let card = if card == QuestCard::Fail && !may_fail(&player) {
                    QuestCard::Success
                } else {
                    card
                };
                (player, card)
            })
            .collect();
        Self { entries }
    }

    pub fn card_of(&self, player: &PlayerId) -> Option<QuestCard> {
        self.entries.iter().find(|(p, _)| p == player).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, QuestCard)> {
        self.entries.iter().map(|(p, c)| (p, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for QuestCards {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(p, c)| (p, c)))
    }
}
