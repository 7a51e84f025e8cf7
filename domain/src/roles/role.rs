//! Role and faction value objects

use serde::{Deserialize, Serialize};

/// The two opposing hidden factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Good,
    Evil,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Good => write!(f, "Good"),
            Faction::Evil => write!(f, "Evil"),
        }
    }
}

/// A hidden role dealt to exactly one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Good. Sees both evil players; loses the game for Good if assassinated.
    Merlin,
    /// Good. Knows nothing beyond their own allegiance.
    #[serde(rename = "Loyal Servant")]
    LoyalServant,
    /// Evil. Names the final assassination target.
    Assassin,
    /// Evil. Knows the Assassin.
    Minion,
}

impl Role {
    pub fn faction(&self) -> Faction {
        match self {
            Role::Merlin | Role::LoyalServant => Faction::Good,
            Role::Assassin | Role::Minion => Faction::Evil,
        }
    }

    pub fn is_evil(&self) -> bool {
        self.faction() == Faction::Evil
    }

    /// Only evil roles may legally play a fail card
    pub fn may_fail_quest(&self) -> bool {
        self.is_evil()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Merlin => "Merlin",
            Role::LoyalServant => "Loyal Servant",
            Role::Assassin => "Assassin",
            Role::Minion => "Minion",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
