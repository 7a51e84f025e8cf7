//! Vote tallying (VoteTally)

use super::ballot::Ballot;
use serde::{Deserialize, Serialize};

/// Outcome of a proposal vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteResult {
    Approved,
    Rejected,
}

impl VoteResult {
    pub fn is_approved(&self) -> bool {
        matches!(self, VoteResult::Approved)
    }
}

impl std::fmt::Display for VoteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteResult::Approved => write!(f, "approved"),
            VoteResult::Rejected => write!(f, "rejected"),
        }
    }
}

/// Counted ballot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub approve_count: usize,
    pub reject_count: usize,
    pub result: VoteResult,
}

impl VoteTally {
    /// Count a complete ballot.
    ///
    /// Approved iff approvals strictly outnumber rejections; a tie is a
    /// rejection.
    ///
    /// ```
    /// use avalon_domain::{Ballot, PlayerId, Vote, VoteResult, VoteTally};
    ///
    /// let players = PlayerId::default_roster();
    /// let votes = players
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, p)| (p.clone(), if i < 3 { Vote::Approve } else { Vote::Reject }))
    ///     .collect();
    /// let ballot = Ballot::collect(&players, votes).unwrap();
    ///
    /// assert_eq!(VoteTally::decide(&ballot).result, VoteResult::Approved);
    /// ```
    pub fn decide(ballot: &Ballot) -> Self {
        let approve_count = ballot.approvers().count();
        let reject_count = ballot.len() - approve_count;

        let result = if approve_count > reject_count {
            VoteResult::Approved
        } else {
            VoteResult::Rejected
        };

        Self {
            approve_count,
            reject_count,
            result,
        }
    }
}
