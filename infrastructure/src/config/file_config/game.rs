//! Game configuration from TOML (`[game]` section)

use avalon_application::{GameConfig, ProposalMode};
use avalon_domain::{ConfigIssue, ConfigIssueCode, PLAYER_COUNT, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Raw game configuration from TOML
///
/// # Example
///
/// ```toml
/// [game]
/// players = ["Alice", "Bob", "Carol", "Dave", "Eve"]
/// seed = 42                     # omit for a fresh random seed
/// discussion_turns = 3
/// proposal = "leader"           # "leader" or "seating"
/// parallel_decisions = true
/// decision_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    pub players: Vec<String>,
    pub seed: Option<u64>,
    /// Times each player speaks per round
    pub discussion_turns: usize,
    /// How teams are proposed
    pub proposal: String,
    /// Ask for votes and quest cards concurrently
    pub parallel_decisions: bool,
    pub decision_timeout_secs: u64,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            players: PlayerId::default_roster()
                .into_iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            seed: None,
            discussion_turns: 3,
            proposal: "leader".to_string(),
            parallel_decisions: true,
            decision_timeout_secs: 120,
        }
    }
}

impl FileGameConfig {
    /// Player names, trimmed
    pub fn roster(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| PlayerId::new(p.trim())).collect()
    }

    pub fn roster_issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.players.len() != PLAYER_COUNT {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::WrongPlayerCount,
                format!(
                    "game.players: expected {} players, found {}",
                    PLAYER_COUNT,
                    self.players.len()
                ),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.players {
            let name = name.trim();
            if name.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::BlankPlayerName,
                    "game.players: player names cannot be blank",
                ));
            } else if !seen.insert(name) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicatePlayer,
                    format!("game.players: '{}' appears more than once", name),
                ));
            }
        }

        issues
    }

    /// Parse `proposal`, falling back to asking the leader
    pub fn parse_proposal(&self) -> (ProposalMode, Vec<ConfigIssue>) {
        match self.proposal.parse::<ProposalMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnknownProposalMode,
                    format!(
                        "game.proposal: unknown value '{}', falling back to 'leader'",
                        self.proposal
                    ),
                );
                (ProposalMode::default(), vec![issue])
            }
        }
    }

    /// Convert into the application's [`GameConfig`]
    pub fn to_game_config(&self) -> (GameConfig, Vec<ConfigIssue>) {
        let (proposal, mut issues) = self.parse_proposal();

        if self.discussion_turns == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoDiscussion,
                "game.discussion_turns is 0: players will not talk before proposals",
            ));
        }

        let timeout = if self.decision_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "game.decision_timeout_secs cannot be 0",
            ));
            None
        } else {
            Some(Duration::from_secs(self.decision_timeout_secs))
        };

        let mut config = GameConfig::default()
            .with_discussion_turns(self.discussion_turns)
            .with_proposal(proposal)
            .with_decision_timeout(timeout);
        if !self.parallel_decisions {
            config = config.sequential();
        }

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avalon_domain::Severity;

    #[test]
    fn test_default_roster_is_valid() {
        let config = FileGameConfig::default();
        assert_eq!(config.roster(), PlayerId::default_roster());
        assert!(config.roster_issues().is_empty());
    }

    #[test]
    fn test_roster_issues() {
        let config = FileGameConfig {
            players: vec!["A".into(), "B".into(), "A".into(), " ".into()],
            ..Default::default()
        };
        let codes: Vec<ConfigIssueCode> = config.roster_issues().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::WrongPlayerCount,
                ConfigIssueCode::DuplicatePlayer,
                ConfigIssueCode::BlankPlayerName,
            ]
        );
    }

    #[test]
    fn test_to_game_config() {
        let config = FileGameConfig {
            discussion_turns: 1,
            proposal: "seating".to_string(),
            parallel_decisions: false,
            decision_timeout_secs: 30,
            ..Default::default()
        };
        let (game, issues) = config.to_game_config();
        assert!(issues.is_empty());
        assert_eq!(game.discussion_turns, 1);
        assert_eq!(game.proposal, ProposalMode::Seating);
        assert!(!game.parallel_decisions);
        assert_eq!(game.decision_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_bad_values_are_reported() {
        let config = FileGameConfig {
            discussion_turns: 0,
            proposal: "vote".to_string(),
            decision_timeout_secs: 0,
            ..Default::default()
        };
        let (game, issues) = config.to_game_config();
        assert_eq!(game.proposal, ProposalMode::Leader);
        assert_eq!(issues.len(), 3);
        assert_eq!(
            issues.iter().filter(|i| i.severity == Severity::Error).count(),
            1
        );
    }
}
