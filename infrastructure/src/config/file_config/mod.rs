//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into application types
//! happens through the `parse_*` / `to_*` helpers, which also report
//! configuration issues.

mod agents;
mod game;
mod output;
mod providers;

pub use agents::FileAgentsConfig;
pub use game::FileGameConfig;
pub use output::FileOutputConfig;
pub use providers::{FileAnthropicConfig, FileProvidersConfig};

use avalon_domain::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when validation finds at least one error-level issue
#[derive(Debug, Error)]
#[error("invalid configuration:\n{}", list_issues(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn list_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Roster and game loop settings
    pub game: FileGameConfig,
    /// Which provider and models play the seats
    pub agents: FileAgentsConfig,
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Roster
        issues.extend(self.game.roster_issues());

        // 2. Enum parse validation
        issues.extend(self.game.to_game_config().1);
        issues.extend(self.agents.parse_provider().1);
        issues.extend(self.output.parse_format().1);

        // 3. Overrides that point nowhere
        issues.extend(self.agents.override_issues(&self.game.players));

        issues
    }

    /// Validate, failing on errors and returning the remaining warnings
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .validate()
            .into_iter()
            .partition(|i| i.severity == Severity::Error);

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }
}
