//! Role assignment (RoleAssigner)

use super::knowledge::KnowledgeMap;
use super::role::Role;
use crate::core::error::GameError;
use crate::core::player::{PLAYER_COUNT, PlayerId, validate_roster};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Roles dealt for a five-player game, in dealing order
pub const ROLE_TABLE: [Role; PLAYER_COUNT] = [
    Role::Merlin,
    Role::LoyalServant,
    Role::LoyalServant,
    Role::Assassin,
    Role::Minion,
];

/// An immutable bijection from players to roles
///
/// # Example
///
/// ```
/// use avalon_domain::{PlayerId, Role, RoleAssignment};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let players = PlayerId::default_roster();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let roles = RoleAssignment::assign(&players, &mut rng).unwrap();
///
/// let merlin = roles.merlin();
/// assert_eq!(roles.role_of(merlin), Some(Role::Merlin));
/// assert_eq!(roles.knowledge().known_by(merlin).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    /// Players in roster order
    #[serde(skip)]
    players: Vec<PlayerId>,
    roles: BTreeMap<PlayerId, Role>,
}

impl RoleAssignment {
    /// Deal [`ROLE_TABLE`] over a uniformly shuffled copy of the roster.
    ///
    /// Deterministic for a given RNG state. Fails if the roster is not
    /// exactly five distinct players.
    pub fn assign<R: Rng + ?Sized>(players: &[PlayerId], rng: &mut R) -> Result<Self, GameError> {
        validate_roster(players)?;

        let mut shuffled = players.to_vec();
        shuffled.shuffle(rng);

        let roles = shuffled.into_iter().zip(ROLE_TABLE).collect();
        Ok(Self {
            players: players.to_vec(),
            roles,
        })
    }

    /// Build an assignment from explicit roles (fixtures, replays).
    ///
    /// The role counts must match [`ROLE_TABLE`] exactly.
    pub fn from_roles(assigned: Vec<(PlayerId, Role)>) -> Result<Self, GameError> {
        let players: Vec<PlayerId> = assigned.iter().map(|(p, _)| p.clone()).collect();
        validate_roster(&players)?;

        let mut expected: Vec<Role> = ROLE_TABLE.to_vec();
        for (_, role) in &assigned {
            match expected.iter().position(|r| r == role) {
                Some(idx) => {
                    expected.swap_remove(idx);
                }
                None => return Err(GameError::UnexpectedRole(*role)),
            }
        }

        Ok(Self {
            players,
            roles: assigned.into_iter().collect(),
        })
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn role_of(&self, player: &PlayerId) -> Option<Role> {
        self.roles.get(player).copied()
    }

    pub fn is_evil(&self, player: &PlayerId) -> bool {
        self.role_of(player).is_some_and(|r| r.is_evil())
    }

    /// Players holding `role`, in roster order
    pub fn holders(&self, role: Role) -> Vec<&PlayerId> {
        self.players
            .iter()
            .filter(|p| self.roles.get(*p) == Some(&role))
            .collect()
    }

    pub fn merlin(&self) -> &PlayerId {
        self.single(Role::Merlin)
    }

    pub fn assassin(&self) -> &PlayerId {
        self.single(Role::Assassin)
    }

    /// Evil players in roster order
    pub fn evil_players(&self) -> Vec<&PlayerId> {
        self.players.iter().filter(|p| self.is_evil(p)).collect()
    }

    /// Initial knowledge derived from the roles
    pub fn knowledge(&self) -> KnowledgeMap {
        let evil: BTreeSet<PlayerId> = self.evil_players().into_iter().cloned().collect();

        let entries = self
            .players
            .iter()
            .map(|player| {
                let known = match self.roles[player] {
                    Role::Merlin => evil.clone(),
                    Role::Assassin | Role::Minion => {
                        evil.iter().filter(|p| *p != player).cloned().collect()
                    }
                    Role::LoyalServant => BTreeSet::new(),
                };
                (player.clone(), known)
            })
            .collect();

        KnowledgeMap::new(entries)
    }

    pub fn as_map(&self) -> &BTreeMap<PlayerId, Role> {
        &self.roles
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, Role)> {
        self.players.iter().map(|p| (p, self.roles[p]))
    }

    // Merlin and the Assassin are dealt exactly once by construction.
    fn single(&self, role: Role) -> &PlayerId {
        self.players
            .iter()
            .find(|p| self.roles.get(*p) == Some(&role))
            .unwrap_or(&self.players[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assign(seed: u64) -> RoleAssignment {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        RoleAssignment::assign(&PlayerId::default_roster(), &mut rng).unwrap()
    }

    #[test]
    fn test_role_counts_hold_for_many_seeds() {
        for seed in 0..200 {
            let roles = assign(seed);
            assert_eq!(roles.holders(Role::Merlin).len(), 1);
            assert_eq!(roles.holders(Role::Assassin).len(), 1);
            assert_eq!(roles.holders(Role::Minion).len(), 1);
            assert_eq!(roles.holders(Role::LoyalServant).len(), 2);
        }
    }

    #[test]
    fn test_assignment_is_deterministic_for_seed() {
        assert_eq!(assign(42), assign(42));
    }

    #[test]
    fn test_every_role_lands_on_different_players_across_seeds() {
        let merlins: BTreeSet<PlayerId> = (0..100).map(|s| assign(s).merlin().clone()).collect();
        assert_eq!(merlins.len(), PLAYER_COUNT);
    }

    #[test]
    fn test_rejects_wrong_player_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let players: Vec<PlayerId> = PlayerId::default_roster().into_iter().take(4).collect();
        let result = RoleAssignment::assign(&players, &mut rng);
        assert_eq!(
            result,
            Err(GameError::InvalidPlayerCount {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_knowledge_rules() {
        for seed in 0..50 {
            let roles = assign(seed);
            let knowledge = roles.knowledge();
            let assassin = roles.assassin();
            let minion = roles.holders(Role::Minion)[0];
            let merlin = roles.merlin();

            // Evil players know each other, symmetrically, and not themselves
            assert_eq!(knowledge.known_by(assassin), vec![minion.clone()]);
            assert_eq!(knowledge.known_by(minion), vec![assassin.clone()]);

            // Merlin knows exactly the evil set
            let mut evil: Vec<PlayerId> = roles.evil_players().into_iter().cloned().collect();
            evil.sort();
            assert_eq!(knowledge.known_by(merlin), evil);

            // Servants know nobody
            for servant in roles.holders(Role::LoyalServant) {
                assert!(knowledge.known_by(servant).is_empty());
            }
        }
    }

    #[test]
    fn test_from_roles_checks_counts() {
        let p = PlayerId::default_roster();
        let ok = RoleAssignment::from_roles(vec![
            (p[0].clone(), Role::Merlin),
            (p[1].clone(), Role::LoyalServant),
            (p[2].clone(), Role::LoyalServant),
            (p[3].clone(), Role::Assassin),
            (p[4].clone(), Role::Minion),
        ])
        .unwrap();
        assert_eq!(ok.merlin(), &p[0]);
        assert_eq!(ok.assassin(), &p[3]);

        let two_merlins = RoleAssignment::from_roles(vec![
            (p[0].clone(), Role::Merlin),
            (p[1].clone(), Role::Merlin),
            (p[2].clone(), Role::LoyalServant),
            (p[3].clone(), Role::Assassin),
            (p[4].clone(), Role::Minion),
        ]);
        assert_eq!(two_merlins, Err(GameError::UnexpectedRole(Role::Merlin)));
    }

    #[test]
    fn test_serializes_as_player_role_map() {
        let roles = assign(3);
        let value = serde_json::to_value(&roles).unwrap();
        let map = value["roles"].as_object().unwrap();
        assert_eq!(map.len(), PLAYER_COUNT);
    }
}
