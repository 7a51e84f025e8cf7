//! Application-level configuration.
//!
//! - [`GameConfig`]: how the game loop asks players for decisions

pub mod game_config;

pub use game_config::{GameConfig, ProposalMode};
