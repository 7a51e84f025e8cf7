//! Domain layer for avalon
//!
//! This crate contains the rules of five-player Avalon as plain data and
//! pure functions. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Roles**: Merlin and two Loyal Servants (good) against the Assassin and
//!   the Minion (evil), dealt by [`RoleAssignment`]
//! - **Table**: a fixed [`Seating`] with a rotating leader token
//! - **Rounds**: proposal, a majority [`VoteTally`], then a quest resolved by
//!   [`QuestResolver`] under the single-fail rule
//! - **Game**: [`GameState`] sequences rounds, counts rejections and quest
//!   wins, and ends in exactly one [`GameResult`]

pub mod config;
pub mod core;
pub mod decision;
pub mod game;
pub mod prompt;
pub mod quest;
pub mod roles;
pub mod table;
pub mod vote;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::GameError,
    player::{PLAYER_COUNT, PlayerId, join_players},
};
pub use decision::{DecisionKind, DecodeError};
pub use game::{
    AssassinationOutcome, AssassinationRecord, FullRoundRecord, GameReport, GameResult, GameSetup,
    GameState, MAX_CONSECUTIVE_REJECTIONS, Phase, PublicView, RoundRecord, VoteOutcome,
};
pub use prompt::{PromptContext, PromptTemplate};
pub use quest::{QuestCard, QuestCards, QuestOutcome, QuestResolver, QuestResult, QuestScore};
pub use roles::{Faction, KnowledgeMap, Role, RoleAssignment};
pub use table::{Seating, required_team_size};
pub use vote::{Ballot, Vote, VoteResult, VoteTally};
