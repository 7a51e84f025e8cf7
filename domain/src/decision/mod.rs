//! Typed decisions and the decoding boundary for free-text responses

pub mod kind;
pub mod parsing;

pub use kind::DecisionKind;
pub use parsing::{
    DecodeError, parse_assassination_target, parse_public_message, parse_quest_card, parse_team,
    parse_vote, split_discussion,
};
