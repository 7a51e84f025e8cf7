//! Infrastructure layer for avalon
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentsConfig, FileAnthropicConfig, FileConfig,
    FileGameConfig, FileOutputConfig, FileProvidersConfig,
};
pub use logging::{FileGameRecorder, JsonlConversationLogger, game_dir_name};
pub use providers::{AnthropicProvider, ProviderFactory, ProviderKind, RandomProvider};
