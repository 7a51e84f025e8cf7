//! Seating order and leader rotation (SeatingAndLeadership)
//!
//! Every operation here is a pure function of its inputs, except the two
//! random draws made by [`Seating::initialize`].

use crate::core::error::GameError;
use crate::core::player::{PlayerId, validate_roster};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Advance a leader index by one seat, wrapping around the table.
///
/// An empty table has no seats to move to and stays at 0.
pub fn rotate(leader_index: usize, player_count: usize) -> usize {
    if player_count == 0 {
        return 0;
    }
    (leader_index + 1) % player_count
}

/// The seating order rotated to start at the leader, then clockwise.
///
/// `leader_index` wraps modulo the table size.
pub fn speaking_order(seating_order: &[PlayerId], leader_index: usize) -> Vec<PlayerId> {
    if seating_order.is_empty() {
        return Vec::new();
    }
    let leader = leader_index % seating_order.len();
    let mut order = Vec::with_capacity(seating_order.len());
    order.extend_from_slice(&seating_order[leader..]);
    order.extend_from_slice(&seating_order[..leader]);
    order
}

/// A fixed seating order plus the initial leader seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seating {
    order: Vec<PlayerId>,
    initial_leader: usize,
}

impl Seating {
    /// Draw a random seating permutation and, independently, a random first leader
    pub fn initialize<R: Rng + ?Sized>(players: &[PlayerId], rng: &mut R) -> Result<Self, GameError> {
        validate_roster(players)?;

        let mut order = players.to_vec();
        order.shuffle(rng);
        let initial_leader = rng.random_range(0..order.len());

        Ok(Self {
            order,
            initial_leader,
        })
    }

    /// Fixed seating, for fixtures and replays
    pub fn fixed(order: Vec<PlayerId>, initial_leader: usize) -> Result<Self, GameError> {
        validate_roster(&order)?;
        Ok(Self {
            initial_leader: initial_leader % order.len(),
            order,
        })
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn initial_leader(&self) -> usize {
        self.initial_leader
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn player_at(&self, index: usize) -> &PlayerId {
        &self.order[index % self.order.len()]
    }

    pub fn rotate(&self, leader_index: usize) -> usize {
        rotate(leader_index, self.order.len())
    }

    pub fn speaking_order(&self, leader_index: usize) -> Vec<PlayerId> {
        speaking_order(&self.order, leader_index)
    }
}
