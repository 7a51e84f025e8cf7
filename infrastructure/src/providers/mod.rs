//! Decision provider adapters
//!
//! - [`AnthropicProvider`]: the Anthropic Messages API over HTTP
//! - [`RandomProvider`]: an offline player that answers with random legal moves
//! - [`ProviderFactory`]: builds one provider per player from the config

pub mod anthropic;
pub mod factory;
pub mod random;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use random::RandomProvider;

use std::str::FromStr;

/// Which backend plays the seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Anthropic,
    Random,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Random => "random",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "random" | "offline" => Ok(ProviderKind::Random),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("Anthropic".parse::<ProviderKind>(), Ok(ProviderKind::Anthropic));
        assert_eq!("offline".parse::<ProviderKind>(), Ok(ProviderKind::Random));
        assert!("copilot".parse::<ProviderKind>().is_err());
    }
}
