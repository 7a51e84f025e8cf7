//! Hidden roles and the knowledge they grant
//!
//! Roles are dealt once at game start and never change. The role a player
//! holds decides what they know about others, whether they may sabotage a
//! quest, and whether they act (Assassin) or are the target (Merlin) of the
//! final assassination.

pub mod assignment;
pub mod knowledge;
pub mod role;

pub use assignment::{ROLE_TABLE, RoleAssignment};
pub use knowledge::KnowledgeMap;
pub use role::{Faction, Role};
