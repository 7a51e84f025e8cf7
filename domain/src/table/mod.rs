//! Table layout: seating, leadership and quest requirements

pub mod quest_table;
pub mod seating;

pub use quest_table::{QUEST_COUNT, QUEST_TEAM_SIZES, required_team_size};
pub use seating::{Seating, rotate, speaking_order};
