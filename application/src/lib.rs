//! Application layer for avalon
//!
//! This crate contains the game loop use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GameConfig, ProposalMode};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    decision_provider::{DecisionProvider, ProviderError},
    game_recorder::{GameRecorder, NoGameRecorder},
    progress::{GameProgressNotifier, NoProgress},
};
pub use use_cases::run_game::{RunGameError, RunGameUseCase};
