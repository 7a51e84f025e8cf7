//! Vote and ballot value objects

use crate::core::error::GameError;
use crate::core::player::PlayerId;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single player's vote on a proposed team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Approve,
    Reject,
}

impl Vote {
    pub fn is_approve(&self) -> bool {
        matches!(self, Vote::Approve)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Approve => "approve",
            Vote::Reject => "reject",
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The complete set of votes for one proposal, in player-set order
///
/// A ballot can only be built when every player has voted exactly once;
/// partial ballots are a caller error.
///
/// # Example
///
/// ```
/// use avalon_domain::{Ballot, PlayerId, Vote};
///
/// let players = vec![PlayerId::new("A"), PlayerId::new("B"), PlayerId::new("C")];
/// let ballot = Ballot::collect(
///     &players,
///     vec![
///         (PlayerId::new("B"), Vote::Reject),
///         (PlayerId::new("A"), Vote::Approve),
///         (PlayerId::new("C"), Vote::Approve),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(ballot.vote_of(&PlayerId::new("B")), Some(Vote::Reject));
/// assert_eq!(ballot.vote_summary(), "[●○●]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    entries: Vec<(PlayerId, Vote)>,
}

impl Ballot {
    /// Build a ballot from votes gathered in any order.
    ///
    /// Fails on votes from outside `players`, on duplicate votes, and on
    /// missing votes.
    pub fn collect(players: &[PlayerId], votes: Vec<(PlayerId, Vote)>) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        for (player, _) in &votes {
            if !players.contains(player) {
                return Err(GameError::UnknownPlayer(player.clone()));
            }
            if !seen.insert(player.clone()) {
                return Err(GameError::DuplicateVote(player.clone()));
            }
        }

        let missing: Vec<PlayerId> = players
            .iter()
            .filter(|p| !seen.contains(*p))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(GameError::IncompleteBallot(missing));
        }

        let entries = players
            .iter()
            .filter_map(|p| {
                votes
                    .iter()
                    .find(|(voter, _)| voter == p)
                    .map(|(voter, vote)| (voter.clone(), *vote))
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn vote_of(&self, player: &PlayerId) -> Option<Vote> {
        self.entries
            .iter()
            .find(|(p, _)| p == player)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, Vote)> {
        self.entries.iter().map(|(p, v)| (p, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn approvers(&self) -> impl Iterator<Item = &PlayerId> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_approve())
            .map(|(p, _)| p)
    }

    /// Visual summary in player order (e.g. `[●●○]`)
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for (_, vote) in &self.entries {
            summary.push(if vote.is_approve() { '●' } else { '○' });
        }
        summary.push(']');
        summary
    }
}

impl Serialize for Ballot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(p, v)| (p, v)))
    }
}
