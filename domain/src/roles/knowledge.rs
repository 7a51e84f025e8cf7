//! What each player knows at game start

use crate::core::player::PlayerId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from a player to the set of players they know to be evil.
///
/// Computed once from the role assignment and never changes:
/// the two evil players know each other, Merlin knows both of them,
/// Loyal Servants know nobody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KnowledgeMap(BTreeMap<PlayerId, BTreeSet<PlayerId>>);

impl KnowledgeMap {
    pub(crate) fn new(entries: BTreeMap<PlayerId, BTreeSet<PlayerId>>) -> Self {
        Self(entries)
    }

    /// Players `player` knows to be evil. Empty for unknown players.
    pub fn known_by(&self, player: &PlayerId) -> Vec<PlayerId> {
        self.0
            .get(player)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &BTreeSet<PlayerId>)> {
        self.0.iter()
    }
}
