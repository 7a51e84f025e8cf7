//! Builds one decision provider per seat

use super::anthropic::{AnthropicProvider, DEFAULT_MODEL};
use super::random::RandomProvider;
use super::ProviderKind;
use crate::config::{FileAnthropicConfig, FileConfig};
use avalon_application::{DecisionProvider, ProviderError};
use avalon_domain::PlayerId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Assembles the agents table handed to the game loop
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    kind: ProviderKind,
    default_model: String,
    /// Per-player model overrides, keyed by player name
    models: BTreeMap<String, String>,
    anthropic: FileAnthropicConfig,
    seed: u64,
}

impl ProviderFactory {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            default_model: DEFAULT_MODEL.to_string(),
            models: BTreeMap::new(),
            anthropic: FileAnthropicConfig::default(),
            seed: 0,
        }
    }

    /// Take provider, models and credentials from the config file.
    ///
    /// An unknown provider name falls back to the default; validation
    /// reports it separately.
    pub fn from_config(config: &FileConfig) -> Self {
        let (kind, _) = config.agents.parse_provider();
        Self {
            kind,
            default_model: config.agents.model.clone(),
            models: config.agents.models.clone(),
            anthropic: config.providers.anthropic.clone(),
            seed: 0,
        }
    }

    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Use `model` for every player, dropping per-player overrides
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self.models.clear();
        self
    }

    /// Seed for the offline provider; each seat derives its own stream
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn model_for(&self, player: &PlayerId) -> &str {
        self.models
            .get(player.as_str())
            .map(String::as_str)
            .unwrap_or(&self.default_model)
    }

    pub fn build(
        &self,
        players: &[PlayerId],
    ) -> Result<BTreeMap<PlayerId, Arc<dyn DecisionProvider>>, ProviderError> {
        let mut agents: BTreeMap<PlayerId, Arc<dyn DecisionProvider>> = BTreeMap::new();

        match self.kind {
            ProviderKind::Anthropic => {
                let client = reqwest::Client::new();
                for player in players {
                    let model = self.model_for(player);
                    let provider = AnthropicProvider::from_config(&self.anthropic, model)?
                        .with_client(client.clone());
                    info!(player = %player, model, "Anthropic provider ready");
                    agents.insert(player.clone(), Arc::new(provider));
                }
            }
            ProviderKind::Random => {
                for (index, player) in players.iter().enumerate() {
                    let seed = self.seed.wrapping_add(index as u64 + 1);
                    info!(player = %player, seed, "Random provider ready");
                    agents.insert(player.clone(), Arc::new(RandomProvider::new(seed)));
                }
            }
        }

        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_build_covers_every_player() {
        let players = PlayerId::default_roster();
        let agents = ProviderFactory::new(ProviderKind::Random)
            .with_seed(4)
            .build(&players)
            .unwrap();
        assert_eq!(agents.len(), 5);
        assert!(agents.values().all(|a| a.name() == "random"));
    }

    #[test]
    fn test_model_overrides() {
        let mut config = FileConfig::default();
        config
            .agents
            .models
            .insert("Player2".to_string(), "claude-3-5-sonnet-latest".to_string());
        let factory = ProviderFactory::from_config(&config);

        assert_eq!(factory.kind(), ProviderKind::Anthropic);
        assert_eq!(factory.model_for(&PlayerId::new("Player1")), DEFAULT_MODEL);
        assert_eq!(
            factory.model_for(&PlayerId::new("Player2")),
            "claude-3-5-sonnet-latest"
        );

        let factory = factory.with_model("claude-test");
        assert_eq!(factory.model_for(&PlayerId::new("Player2")), "claude-test");
    }

    #[test]
    fn test_anthropic_with_key_builds() {
        let mut config = FileConfig::default();
        config.providers.anthropic.api_key = Some("sk-test".to_string());
        let agents = ProviderFactory::from_config(&config)
            .build(&PlayerId::default_roster())
            .unwrap();
        assert_eq!(agents[&PlayerId::new("Player1")].name(), DEFAULT_MODEL);
    }
}
