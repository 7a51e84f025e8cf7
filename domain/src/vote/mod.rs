//! Team-approval voting
//!
//! Every player votes on every proposal. Votes are private until the whole
//! ballot is in; [`VoteTally`] then decides it by strict majority.

pub mod ballot;
pub mod tally;

pub use ballot::{Ballot, Vote};
pub use tally::{VoteResult, VoteTally};
