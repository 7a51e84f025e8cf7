//! Configuration file loading for avalon
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./avalon.toml` or `./.avalon.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/avalon/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentsConfig, FileAnthropicConfig, FileConfig, FileGameConfig,
    FileOutputConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;
