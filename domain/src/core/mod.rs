//! Core domain concepts shared across all subdomains.
//!
//! - [`player::PlayerId`]: opaque identifier of a seated player
//! - [`error::GameError`]: structural errors raised by the game rules

pub mod error;
pub mod player;
