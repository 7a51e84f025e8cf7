//! Player identifier value object

use crate::core::error::GameError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;

/// Number of seats at the table. The role table is only defined for five players.
pub const PLAYER_COUNT: usize = 5;

/// Opaque, unique identifier of a seated player (Value Object)
///
/// # Example
///
/// ```
/// use avalon_domain::PlayerId;
///
/// let alice = PlayerId::new("Alice");
/// assert_eq!(alice.as_str(), "Alice");
/// assert_eq!(alice.to_string(), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default roster used when no names are configured (`Player1`..`Player5`)
    pub fn default_roster() -> Vec<PlayerId> {
        (1..=PLAYER_COUNT)
            .map(|i| PlayerId::new(format!("Player{}", i)))
            .collect()
    }

    /// Case-insensitive lookup of a name in a roster
    ///
    /// Used by the decoding boundary, where agents tend to vary capitalization.
    pub fn find_in<'a>(name: &str, roster: &'a [PlayerId]) -> Option<&'a PlayerId> {
        let name = name.trim();
        roster
            .iter()
            .find(|p| p.0 == name)
            .or_else(|| roster.iter().find(|p| p.0.eq_ignore_ascii_case(name)))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Render a list of players as `a, b, c`
pub fn join_players(players: &[PlayerId]) -> String {
    players
        .iter()
        .map(PlayerId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that a roster has exactly [`PLAYER_COUNT`] distinct players
pub fn validate_roster(players: &[PlayerId]) -> Result<(), GameError> {
    if players.len() != PLAYER_COUNT {
        return Err(GameError::InvalidPlayerCount {
            expected: PLAYER_COUNT,
            actual: players.len(),
        });
    }
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player) {
            return Err(GameError::DuplicatePlayer(player.clone()));
        }
    }
    Ok(())
}
