//! The game state machine and the records it emits

pub mod record;
pub mod result;
pub mod setup;
pub mod state;
pub mod view;

pub use record::{FullRoundRecord, RoundRecord};
pub use result::{AssassinationOutcome, AssassinationRecord, GameResult};
pub use setup::GameSetup;
pub use state::{GameState, MAX_CONSECUTIVE_REJECTIONS, Phase, VoteOutcome};
pub use view::{GameReport, PublicView};
