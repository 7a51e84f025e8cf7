//! Offline provider that plays random legal moves
//!
//! Reads the header lines every prompt carries (`YOUR ROLE:`,
//! `YOUR IDENTITY:`, `Players:`, `Team size required:`) and answers the
//! decision the prompt asks for. Useful for demos and smoke tests without
//! an API key.

use async_trait::async_trait;
use avalon_application::{DecisionProvider, ProviderError};
use avalon_domain::{DecisionKind, Role};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

const HEADER_PATTERN: &str = r"(?m)^(YOUR ROLE|YOUR IDENTITY|Players|Team size required): *(.+?)\s*$";

const MESSAGES: &[&str] = &[
    "I have a good feeling about this team.",
    "Let's watch the votes closely this round.",
    "Someone on the last team is not who they claim to be.",
    "I would rather be on this quest myself.",
    "Nothing to add yet. Let's see the proposal.",
];

/// Chance of approving any proposed team
const APPROVE_PROBABILITY: f64 = 0.6;
/// Chance that an evil player sabotages a quest
const SABOTAGE_PROBABILITY: f64 = 0.5;

/// A player that flips coins
pub struct RandomProvider {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn answer(&self, kind: DecisionKind, header: &PromptHeader<'_>) -> Result<String, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::Other("random provider state poisoned".to_string()))?;

        let answer = match kind {
            DecisionKind::Discussion => {
                let message = MESSAGES.choose(&mut *rng).copied().unwrap_or(MESSAGES[0]);
                format!("Playing it by ear.\n<MESSAGE>{}</MESSAGE>", message)
            }
            DecisionKind::Vote => {
                let vote = if rng.random_bool(APPROVE_PROBABILITY) {
                    "approve"
                } else {
                    "reject"
                };
                format!("Gut feeling.\n<VOTE>{}</VOTE>", vote)
            }
            DecisionKind::QuestCard => {
                let card = if header.is_evil() && rng.random_bool(SABOTAGE_PROBABILITY) {
                    "fail"
                } else {
                    "success"
                };
                format!("Decided.\n<QUEST_CARD>{}</QUEST_CARD>", card)
            }
            DecisionKind::Proposal => {
                let size = header.team_size.ok_or_else(|| {
                    ProviderError::InvalidResponse("prompt has no team size".to_string())
                })?;
                let mut players = header.players.clone();
                players.shuffle(&mut *rng);
                players.truncate(size);
                format!("A fresh mix.\n<PROPOSED_TEAM>{}</PROPOSED_TEAM>", players.join(", "))
            }
            DecisionKind::Assassination => {
                let others: Vec<&str> = header
                    .players
                    .iter()
                    .copied()
                    .filter(|p| Some(*p) != header.identity)
                    .collect();
                let target = others.choose(&mut *rng).ok_or_else(|| {
                    ProviderError::InvalidResponse("prompt lists no other players".to_string())
                })?;
                format!("Eeny, meeny.\n<ASSASSINATE>{}</ASSASSINATE>", target)
            }
        };
        Ok(answer)
    }
}

#[async_trait]
impl DecisionProvider for RandomProvider {
    fn name(&self) -> &str {
        "random"
    }

    async fn respond(&self, prompt: &str) -> Result<String, ProviderError> {
        let kind = DecisionKind::requested_in(prompt).ok_or_else(|| {
            ProviderError::InvalidResponse("prompt asks for no known decision".to_string())
        })?;
        let header = PromptHeader::scan(prompt)?;
        self.answer(kind, &header)
    }
}

/// The header lines of a prompt
#[derive(Debug, Default)]
struct PromptHeader<'a> {
    role: Option<&'a str>,
    identity: Option<&'a str>,
    players: Vec<&'a str>,
    team_size: Option<usize>,
}

impl<'a> PromptHeader<'a> {
    fn scan(prompt: &'a str) -> Result<Self, ProviderError> {
        let regex = Regex::new(HEADER_PATTERN)
            .map_err(|e| ProviderError::Other(format!("invalid header pattern: {}", e)))?;

        // The first occurrence of each label is the header; later ones are quoted text.
        let mut fields: HashMap<&str, &str> = HashMap::new();
        for caps in regex.captures_iter(prompt) {
            if let (Some(label), Some(value)) = (caps.get(1), caps.get(2)) {
                fields.entry(label.as_str()).or_insert(value.as_str());
            }
        }

        Ok(Self {
            role: fields.get("YOUR ROLE").copied(),
            identity: fields.get("YOUR IDENTITY").copied(),
            players: fields
                .get("Players")
                .map(|line| line.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
                .unwrap_or_default(),
            team_size: fields
                .get("Team size required")
                .and_then(|size| size.parse().ok()),
        })
    }

    fn is_evil(&self) -> bool {
        matches!(self.role, Some(role) if role == Role::Assassin.as_str() || role == Role::Minion.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avalon_domain::{GameSetup, GameState, PlayerId, PromptContext, PromptTemplate};
    use avalon_domain::decision::{parse_assassination_target, parse_quest_card, parse_team, parse_vote};

    fn prompt_for(role: Role, build: impl FnOnce(&PromptContext<'_>) -> String) -> String {
        let state =
            GameState::from_setup(GameSetup::from_seed(&PlayerId::default_roster(), 11).unwrap())
                .unwrap();
        let view = state.public_view();
        let player = state.players()[0].clone();
        let ctx = PromptContext {
            player: &player,
            role,
            known_evil: &[],
            view: &view,
            private_notes: "",
            conversation: "",
        };
        build(&ctx)
    }

    #[test]
    fn test_scan_header() {
        let prompt = prompt_for(Role::Minion, PromptTemplate::discussion);
        let header = PromptHeader::scan(&prompt).unwrap();
        assert_eq!(header.role, Some("Minion"));
        assert_eq!(header.players.len(), 5);
        assert_eq!(header.team_size, Some(2));
        assert!(header.is_evil());
    }

    #[tokio::test]
    async fn test_answers_decode() {
        let roster = PlayerId::default_roster();
        let provider = RandomProvider::new(3);

        for _ in 0..20 {
            let vote = provider
                .respond(&prompt_for(Role::Merlin, |ctx| PromptTemplate::vote(ctx, &roster[..2])))
                .await
                .unwrap();
            assert!(parse_vote(&vote).is_ok());

            let team = provider
                .respond(&prompt_for(Role::Merlin, |ctx| PromptTemplate::proposal(ctx, 2)))
                .await
                .unwrap();
            let team = parse_team(&team, &roster, 2).unwrap();
            assert_eq!(team.len(), 2);

            let target = provider
                .respond(&prompt_for(Role::Assassin, PromptTemplate::assassination))
                .await
                .unwrap();
            assert!(parse_assassination_target(&target, &roster).is_ok());
        }
    }

    #[tokio::test]
    async fn test_good_players_always_succeed() {
        let roster = PlayerId::default_roster();
        let provider = RandomProvider::new(9);
        for _ in 0..20 {
            let card = provider
                .respond(&prompt_for(Role::LoyalServant, |ctx| {
                    PromptTemplate::quest_card(ctx, &roster[..2])
                }))
                .await
                .unwrap();
            assert_eq!(parse_quest_card(&card), Ok(avalon_domain::QuestCard::Success));
        }
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_an_error() {
        let provider = RandomProvider::new(1);
        assert!(provider.respond("hello").await.is_err());
    }
}
