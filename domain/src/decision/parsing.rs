//! Decision decoding for free-text player responses.
//!
//! Players answer in prose and mark their decision with an XML-style tag.
//! These functions find the tag (case-insensitively) and turn its content
//! into a typed value, or report why they could not. When a response holds
//! several tags of one kind, the first one with a valid value wins.
//!
//! | Function | Tag | Value |
//! |----------|-----|-------|
//! | [`parse_public_message`] | `<MESSAGE>` | free text (never fails) |
//! | [`parse_vote`] | `<VOTE>` | `approve` / `reject` |
//! | [`parse_quest_card`] | `<QUEST_CARD>` | `success` / `fail` |
//! | [`parse_team`] | `<PROPOSED_TEAM>` | comma-separated player names |
//! | [`parse_assassination_target`] | `<ASSASSINATE>` | one player name |

use crate::core::player::PlayerId;
use crate::quest::QuestCard;
use crate::vote::Vote;
use std::collections::HashSet;
use thiserror::Error;

pub const MESSAGE_TAG: &str = "MESSAGE";
pub const VOTE_TAG: &str = "VOTE";
pub const QUEST_CARD_TAG: &str = "QUEST_CARD";
pub const PROPOSED_TEAM_TAG: &str = "PROPOSED_TEAM";
pub const ASSASSINATE_TAG: &str = "ASSASSINATE";

/// Why a response could not be turned into a decision
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("No <{0}> tag in response")]
    MissingTag(&'static str),

    #[error("Invalid <{tag}> value: {value:?}")]
    InvalidValue { tag: &'static str, value: String },

    #[error("Unknown player named in response: {0}")]
    UnknownPlayer(String),

    #[error("Team must have {expected} members, got {actual}")]
    WrongTeamSize { expected: usize, actual: usize },

    #[error("Player named twice in team: {0}")]
    DuplicateTeamMember(PlayerId),
}

/// Every closed `<TAG>...</TAG>` block in order, matched case-insensitively
fn tag_contents<'a>(response: &'a str, tag: &str) -> Vec<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `response`
    let lower = response.to_ascii_lowercase();
    let open = format!("<{}>", tag.to_ascii_lowercase());
    let close = format!("</{}>", tag.to_ascii_lowercase());

    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = lower[cursor..].find(&open) {
        let start = cursor + offset + open.len();
        let Some(len) = lower[start..].find(&close) else {
            break;
        };
        found.push(&response[start..start + len]);
        cursor = start + len + close.len();
    }
    found
}

fn extract_tag<'a>(response: &'a str, tag: &str) -> Option<&'a str> {
    tag_contents(response, tag).into_iter().next()
}

/// Decode the first tag whose content `decode` accepts.
///
/// With no valid tag, the error for the first tag is returned.
fn decode_first<T>(
    response: &str,
    tag: &'static str,
    decode: impl Fn(&str) -> Result<T, DecodeError>,
) -> Result<T, DecodeError> {
    let mut first_error = None;
    for value in tag_contents(response, tag) {
        match decode(value) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    Err(first_error.unwrap_or(DecodeError::MissingTag(tag)))
}

/// The public message of a discussion turn.
///
/// Falls back to the whole trimmed response when no tag is present.
pub fn parse_public_message(response: &str) -> String {
    extract_tag(response, MESSAGE_TAG)
        .unwrap_or(response)
        .trim()
        .to_string()
}

/// Split a discussion response into `(private, public)` parts.
///
/// The private part is everything outside the `<MESSAGE>` block.
pub fn split_discussion(response: &str) -> (String, String) {
    let public = parse_public_message(response);
    let lower = response.to_ascii_lowercase();
    let open = format!("<{}>", MESSAGE_TAG.to_ascii_lowercase());
    let close = format!("</{}>", MESSAGE_TAG.to_ascii_lowercase());

    let private = match (lower.find(&open), lower.rfind(&close)) {
        (Some(start), Some(end)) if end > start => {
            format!("{}{}", &response[..start], &response[end + close.len()..])
        }
        _ => String::new(),
    };

    (private.trim().to_string(), public)
}

/// # Examples
///
/// ```
/// use avalon_domain::decision::parse_vote;
/// use avalon_domain::Vote;
///
/// assert_eq!(parse_vote("I trust them. <vote>Approve</vote>"), Ok(Vote::Approve));
/// assert!(parse_vote("no idea").is_err());
/// ```
pub fn parse_vote(response: &str) -> Result<Vote, DecodeError> {
    decode_first(response, VOTE_TAG, |value| {
        match value.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(Vote::Approve),
            "reject" => Ok(Vote::Reject),
            _ => Err(DecodeError::InvalidValue {
                tag: VOTE_TAG,
                value: value.trim().to_string(),
            }),
        }
    })
}

pub fn parse_quest_card(response: &str) -> Result<QuestCard, DecodeError> {
    decode_first(response, QUEST_CARD_TAG, |value| {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(QuestCard::Success),
            "fail" => Ok(QuestCard::Fail),
            _ => Err(DecodeError::InvalidValue {
                tag: QUEST_CARD_TAG,
                value: value.trim().to_string(),
            }),
        }
    })
}

/// Decode a proposed team of exactly `size` distinct, seated players
pub fn parse_team(
    response: &str,
    roster: &[PlayerId],
    size: usize,
) -> Result<Vec<PlayerId>, DecodeError> {
    decode_first(response, PROPOSED_TEAM_TAG, |value| {
        let mut team = Vec::new();
        let mut seen = HashSet::new();
        for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let player = PlayerId::find_in(name, roster)
                .ok_or_else(|| DecodeError::UnknownPlayer(name.to_string()))?;
            if !seen.insert(player) {
                return Err(DecodeError::DuplicateTeamMember(player.clone()));
            }
            team.push(player.clone());
        }

        if team.len() != size {
            return Err(DecodeError::WrongTeamSize {
                expected: size,
                actual: team.len(),
            });
        }
        Ok(team)
    })
}

pub fn parse_assassination_target(
    response: &str,
    roster: &[PlayerId],
) -> Result<PlayerId, DecodeError> {
    decode_first(response, ASSASSINATE_TAG, |value| {
        PlayerId::find_in(value, roster)
            .cloned()
            .ok_or_else(|| DecodeError::UnknownPlayer(value.trim().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<PlayerId> {
        PlayerId::default_roster()
    }

    // ==================== Discussion ====================

    #[test]
    fn test_public_message_from_tag() {
        let response = "Player3 looks shifty.\n<MESSAGE>\nI think we should trust Player1.\n</MESSAGE>";
        assert_eq!(parse_public_message(response), "I think we should trust Player1.");
    }

    #[test]
    fn test_public_message_falls_back_to_whole_response() {
        assert_eq!(parse_public_message("  Hello table  "), "Hello table");
        assert_eq!(parse_public_message(""), "");
    }

    #[test]
    fn test_split_discussion() {
        let response = "Secret plan.\n<message>Hi all</message>\nMore secrets.";
        let (private, public) = split_discussion(response);
        assert_eq!(public, "Hi all");
        assert_eq!(private, "Secret plan.\n\nMore secrets.");

        let (private, public) = split_discussion("No tags at all");
        assert_eq!(public, "No tags at all");
        assert_eq!(private, "");
    }

    // ==================== Vote / Quest card ====================

    #[test]
    fn test_parse_vote() {
        assert_eq!(parse_vote("<VOTE>approve</VOTE>"), Ok(Vote::Approve));
        assert_eq!(parse_vote("thinking... <Vote> REJECT </Vote>"), Ok(Vote::Reject));
        assert_eq!(parse_vote("I approve"), Err(DecodeError::MissingTag(VOTE_TAG)));
        assert!(matches!(
            parse_vote("<VOTE>maybe</VOTE>"),
            Err(DecodeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_quest_card() {
        assert_eq!(parse_quest_card("<QUEST_CARD>fail</QUEST_CARD>"), Ok(QuestCard::Fail));
        assert_eq!(
            parse_quest_card("<quest_card>Success</quest_card>"),
            Ok(QuestCard::Success)
        );
        assert!(parse_quest_card("<QUEST_CARD>sabotage</QUEST_CARD>").is_err());
        assert!(parse_quest_card("success").is_err());
    }

    // ==================== Team ====================

    #[test]
    fn test_parse_team() {
        let team = parse_team("<PROPOSED_TEAM>Player1, player3</PROPOSED_TEAM>", &roster(), 2);
        assert_eq!(team, Ok(vec![PlayerId::new("Player1"), PlayerId::new("Player3")]));
    }

    #[test]
    fn test_parse_team_errors() {
        assert_eq!(
            parse_team("<PROPOSED_TEAM>Player1</PROPOSED_TEAM>", &roster(), 2),
            Err(DecodeError::WrongTeamSize {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            parse_team("<PROPOSED_TEAM>Player1, Bob</PROPOSED_TEAM>", &roster(), 2),
            Err(DecodeError::UnknownPlayer("Bob".to_string()))
        );
        assert_eq!(
            parse_team("<PROPOSED_TEAM>Player1, Player1</PROPOSED_TEAM>", &roster(), 2),
            Err(DecodeError::DuplicateTeamMember(PlayerId::new("Player1")))
        );
        assert_eq!(
            parse_team("Player1, Player2", &roster(), 2),
            Err(DecodeError::MissingTag(PROPOSED_TEAM_TAG))
        );
    }

    // ==================== Assassination ====================

    #[test]
    fn test_parse_assassination_target() {
        assert_eq!(
            parse_assassination_target("It must be <ASSASSINATE> player4 </ASSASSINATE>", &roster()),
            Ok(PlayerId::new("Player4"))
        );
        assert_eq!(
            parse_assassination_target("<ASSASSINATE>Nobody</ASSASSINATE>", &roster()),
            Err(DecodeError::UnknownPlayer("Nobody".to_string()))
        );
    }

    #[test]
    fn test_first_valid_tag_wins() {
        assert_eq!(
            parse_vote("<VOTE>maybe</VOTE> on reflection <VOTE>approve</VOTE>"),
            Ok(Vote::Approve)
        );
        assert_eq!(
            parse_vote("<VOTE>reject</VOTE> <VOTE>approve</VOTE>"),
            Ok(Vote::Reject)
        );
        assert_eq!(
            parse_quest_card("<QUEST_CARD>sabotage</QUEST_CARD>\n<QUEST_CARD>fail</QUEST_CARD>"),
            Ok(QuestCard::Fail)
        );
        assert_eq!(
            parse_team(
                "<PROPOSED_TEAM>Bob, Player1</PROPOSED_TEAM> <PROPOSED_TEAM>Player1, Player2</PROPOSED_TEAM>",
                &roster(),
                2
            ),
            Ok(vec![PlayerId::new("Player1"), PlayerId::new("Player2")])
        );
    }

    #[test]
    fn test_all_invalid_tags_report_the_first() {
        assert_eq!(
            parse_vote("<VOTE>maybe</VOTE> <VOTE>later</VOTE>"),
            Err(DecodeError::InvalidValue {
                tag: VOTE_TAG,
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn test_unclosed_tag_is_missing() {
        assert_eq!(parse_vote("<VOTE>approve"), Err(DecodeError::MissingTag(VOTE_TAG)));
    }
}
