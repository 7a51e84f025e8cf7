//! Agent configuration from TOML (`[agents]` section)

use crate::providers::ProviderKind;
use crate::providers::anthropic::DEFAULT_MODEL;
use avalon_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agents]
/// provider = "anthropic"        # "anthropic" or "random"
/// model = "claude-3-haiku-20240307"
///
/// [agents.models]
/// Player3 = "claude-3-5-sonnet-latest"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub provider: String,
    /// Model for every player without an override
    pub model: String,
    /// Per-player model overrides
    pub models: BTreeMap<String, String>,
}

impl Default for FileAgentsConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default().as_str().to_string(),
            model: DEFAULT_MODEL.to_string(),
            models: BTreeMap::new(),
        }
    }
}

impl FileAgentsConfig {
    /// Parse `provider`; an unknown name is an error
    pub fn parse_provider(&self) -> (ProviderKind, Vec<ConfigIssue>) {
        match self.provider.parse::<ProviderKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "agents.provider: unknown value '{}' (expected 'anthropic' or 'random')",
                        self.provider
                    ),
                );
                (ProviderKind::default(), vec![issue])
            }
        }
    }

    /// Warn about overrides for names that are not seated
    pub fn override_issues(&self, players: &[String]) -> Vec<ConfigIssue> {
        self.models
            .keys()
            .filter(|name| !players.iter().any(|p| p.trim() == name.as_str()))
            .map(|name| {
                ConfigIssue::warning(
                    ConfigIssueCode::ModelOverrideForUnknownPlayer,
                    format!("agents.models: '{}' is not in game.players", name),
                )
            })
            .collect()
    }
}
