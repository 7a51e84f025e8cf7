//! Game loop parameters.
//!
//! [`GameConfig`] groups the parameters that control how
//! [`RunGameUseCase`](crate::use_cases::run_game::RunGameUseCase) drives a
//! game. The rules themselves are fixed in the domain layer; these are
//! application-layer concerns only.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// How the leader's team is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalMode {
    /// Ask the leader's provider for a team
    #[default]
    Leader,
    /// Take the first seats of the seating order without asking anyone
    Seating,
}

impl ProposalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalMode::Leader => "leader",
            ProposalMode::Seating => "seating",
        }
    }
}

impl FromStr for ProposalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leader" => Ok(ProposalMode::Leader),
            "seating" => Ok(ProposalMode::Seating),
            other => Err(format!("unknown proposal mode: {}", other)),
        }
    }
}

impl std::fmt::Display for ProposalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Game loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Discussion turns per player before each proposal.
    pub discussion_turns: usize,
    pub proposal: ProposalMode,
    /// Ask for votes and quest cards concurrently.
    pub parallel_decisions: bool,
    /// Upper bound on a single provider call. `None` waits forever.
    pub decision_timeout: Option<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            discussion_turns: 3,
            proposal: ProposalMode::Leader,
            parallel_decisions: true,
            decision_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl GameConfig {
    // ==================== Builder Methods ====================

    pub fn with_discussion_turns(mut self, turns: usize) -> Self {
        self.discussion_turns = turns;
        self
    }

    pub fn with_proposal(mut self, mode: ProposalMode) -> Self {
        self.proposal = mode;
        self
    }

    pub fn with_decision_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel_decisions = false;
        self
    }
}
