//! Configuration issues reported by validation

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the game cannot start with this configuration.
    Error,
    /// Non-fatal: the game runs but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// The roster does not have exactly five names.
    WrongPlayerCount,
    /// The same name appears twice in the roster.
    DuplicatePlayer,
    /// A roster name is empty or only whitespace.
    BlankPlayerName,
    /// `agents.provider` names no known provider.
    UnknownProvider,
    /// `game.proposal` names no known proposal mode.
    UnknownProposalMode,
    /// `output.format` names no known format.
    UnknownOutputFormat,
    /// `game.decision_timeout_secs` is zero.
    ZeroTimeout,
    /// `game.discussion_turns` is zero; players never talk.
    NoDiscussion,
    /// A per-player model override names a player not in the roster.
    ModelOverrideForUnknownPlayer,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}
