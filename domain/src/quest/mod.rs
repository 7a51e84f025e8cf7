//! Quest execution: cards, resolution and the running score

pub mod card;
pub mod resolver;
pub mod score;

pub use card::{QuestCard, QuestCards};
pub use resolver::{QuestOutcome, QuestResolver, QuestResult};
pub use score::{QUESTS_TO_WIN, QuestScore};
