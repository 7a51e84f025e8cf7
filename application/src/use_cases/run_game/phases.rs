//! Phase implementations for the RunGame use case.
//!
//! Each phase builds prompts from what the asking player may see, collects
//! the responses, and decodes them. Anything that cannot be decoded falls
//! back to the safe default for its decision kind.

use super::RunGameUseCase;
use super::memory::TableMemory;
use super::types::{DecisionRequest, RunGameError};
use crate::config::ProposalMode;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::decision_provider::{DecisionProvider, ProviderError};
use crate::ports::progress::GameProgressNotifier;
use avalon_domain::decision::{
    parse_assassination_target, parse_quest_card, parse_team, parse_vote, split_discussion,
};
use avalon_domain::{
    DecisionKind, DecodeError, GameState, PlayerId, PromptContext, PromptTemplate, PublicView,
    QuestCard, Role, Vote,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

impl RunGameUseCase {
    /// Discussion: every player speaks in speaking order, for each turn
    pub(super) async fn phase_discussion(
        &self,
        state: &GameState,
        memory: &mut TableMemory,
        progress: &dyn GameProgressNotifier,
    ) {
        let round_number = state.round_number();
        let order = state.speaking_order();
        let view = state.public_view();

        for turn in 1..=self.config.discussion_turns {
            debug!(round = round_number, turn, "Discussion turn");

            for speaker in &order {
                let conversation = memory.conversation(round_number);
                let prompt = build_prompt(state, memory, speaker, &view, &conversation, |ctx| {
                    PromptTemplate::discussion(ctx)
                });

                let request = DecisionRequest {
                    player: speaker.clone(),
                    kind: DecisionKind::Discussion,
                    round_number,
                    prompt,
                };
                let Some(response) = self.ask(request, progress).await else {
                    continue;
                };

                let (private, public) = split_discussion(&response);
                memory.add_note(speaker, round_number, DecisionKind::Discussion, &private);
                self.recorder.on_private_thoughts(
                    speaker,
                    round_number,
                    DecisionKind::Discussion,
                    &response,
                );

                if public.is_empty() {
                    continue;
                }
                memory.record_message(round_number, speaker, &public);
                self.recorder
                    .on_message(round_number, speaker, &public, &response);
                progress.on_message(speaker, &public);
            }
        }
    }

    /// Proposal: the leader names a team, or the first seats are used
    pub(super) async fn phase_proposal(
        &self,
        state: &GameState,
        memory: &mut TableMemory,
        team_size: usize,
        progress: &dyn GameProgressNotifier,
    ) -> Vec<PlayerId> {
        let fallback = seating_team(state, team_size);
        if self.config.proposal == ProposalMode::Seating {
            return fallback;
        }

        let round_number = state.round_number();
        let leader = state.current_leader().clone();
        let view = state.public_view();
        let conversation = memory.conversation(round_number);
        let prompt = build_prompt(state, memory, &leader, &view, &conversation, |ctx| {
            PromptTemplate::proposal(ctx, team_size)
        });

        let request = DecisionRequest {
            player: leader.clone(),
            kind: DecisionKind::Proposal,
            round_number,
            prompt,
        };
        let response = self.ask(request, progress).await;
        self.keep_private(memory, &leader, round_number, DecisionKind::Proposal, &response);

        decode_or(
            &leader,
            DecisionKind::Proposal,
            response.as_deref(),
            |r| parse_team(r, state.players(), team_size),
            fallback,
        )
    }

    /// Voting: every player votes privately; nothing is revealed here
    pub(super) async fn phase_voting(
        &self,
        state: &GameState,
        memory: &mut TableMemory,
        progress: &dyn GameProgressNotifier,
    ) -> Vec<(PlayerId, Vote)> {
        let round_number = state.round_number();
        let team = state.proposed_team().unwrap_or(&[]).to_vec();
        let view = state.public_view();
        let conversation = memory.conversation(round_number);

        let requests = state
            .players()
            .iter()
            .map(|player| DecisionRequest {
                player: player.clone(),
                kind: DecisionKind::Vote,
                round_number,
                prompt: build_prompt(state, memory, player, &view, &conversation, |ctx| {
                    PromptTemplate::vote(ctx, &team)
                }),
            })
            .collect();

        let mut votes = Vec::new();
        for (player, response) in self.gather(requests, progress).await {
            self.keep_private(memory, &player, round_number, DecisionKind::Vote, &response);
            let vote = decode_or(
                &player,
                DecisionKind::Vote,
                response.as_deref(),
                parse_vote,
                Vote::Reject,
            );
            votes.push((player, vote));
        }
        votes
    }

    /// Quest execution: every team member plays a card privately
    pub(super) async fn phase_quest(
        &self,
        state: &GameState,
        memory: &mut TableMemory,
        progress: &dyn GameProgressNotifier,
    ) -> Vec<(PlayerId, QuestCard)> {
        let round_number = state.round_number();
        let team = state.proposed_team().unwrap_or(&[]).to_vec();
        let view = state.public_view();
        let conversation = memory.conversation(round_number);

        let requests = team
            .iter()
            .map(|member| DecisionRequest {
                player: member.clone(),
                kind: DecisionKind::QuestCard,
                round_number,
                prompt: build_prompt(state, memory, member, &view, &conversation, |ctx| {
                    PromptTemplate::quest_card(ctx, &team)
                }),
            })
            .collect();

        let mut cards = Vec::new();
        for (player, response) in self.gather(requests, progress).await {
            self.keep_private(memory, &player, round_number, DecisionKind::QuestCard, &response);
            let card = decode_or(
                &player,
                DecisionKind::QuestCard,
                response.as_deref(),
                parse_quest_card,
                QuestCard::Success,
            );
            cards.push((player, card));
        }
        cards
    }

    /// Assassination: the Assassin names one player, exactly once
    pub(super) async fn phase_assassination(
        &self,
        state: &mut GameState,
        memory: &mut TableMemory,
        progress: &dyn GameProgressNotifier,
    ) -> Result<(), RunGameError> {
        let assassin = state.roles().assassin().clone();
        let round_number = state.round_number();
        info!(assassin = %assassin, "Assassination phase");

        let view = state.public_view();
        let transcript = memory.transcript();
        let prompt = build_prompt(state, memory, &assassin, &view, &transcript, |ctx| {
            PromptTemplate::assassination(ctx)
        });

        let request = DecisionRequest {
            player: assassin.clone(),
            kind: DecisionKind::Assassination,
            round_number,
            prompt,
        };
        let response = self.ask(request, progress).await;
        self.keep_private(
            memory,
            &assassin,
            round_number,
            DecisionKind::Assassination,
            &response,
        );

        let target = decode_or(
            &assassin,
            DecisionKind::Assassination,
            response.as_deref(),
            |r| parse_assassination_target(r, state.players()).map(Some),
            None,
        );

        let record = state.resolve_assassination(target.as_ref())?;
        info!(
            target = ?record.target.as_ref().map(PlayerId::as_str),
            merlin = %record.merlin,
            outcome = record.outcome.as_str(),
            "Assassination resolved"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "assassination",
            serde_json::to_value(&record).unwrap_or_default(),
        ));
        progress.on_assassination(&record);
        Ok(())
    }

    // ==================== Provider Calls ====================

    /// Ask one player and wait for the answer
    async fn ask(
        &self,
        request: DecisionRequest,
        progress: &dyn GameProgressNotifier,
    ) -> Option<String> {
        let provider = self.agents.get(&request.player).cloned()?;
        let player = request.player.clone();
        let kind = request.kind;

        progress.on_decision_start(&player, kind);
        let response = request_decision(
            provider,
            Arc::clone(&self.conversation_logger),
            self.config.decision_timeout,
            request,
        )
        .await;
        progress.on_decision_complete(&player, kind, response.is_some());
        response
    }

    /// Ask several players for private decisions and return every answer
    /// together, in request order
    async fn gather(
        &self,
        requests: Vec<DecisionRequest>,
        progress: &dyn GameProgressNotifier,
    ) -> Vec<(PlayerId, Option<String>)> {
        if !self.config.parallel_decisions {
            let mut responses = Vec::with_capacity(requests.len());
            for request in requests {
                let player = request.player.clone();
                let response = self.ask(request, progress).await;
                responses.push((player, response));
            }
            return responses;
        }

        let mut responses: Vec<(PlayerId, Option<String>)> =
            requests.iter().map(|r| (r.player.clone(), None)).collect();
        let mut join_set = JoinSet::new();

        for (index, request) in requests.into_iter().enumerate() {
            let Some(provider) = self.agents.get(&request.player).cloned() else {
                continue;
            };
            progress.on_decision_start(&request.player, request.kind);

            let logger = Arc::clone(&self.conversation_logger);
            let timeout = self.config.decision_timeout;
            join_set.spawn(async move {
                let kind = request.kind;
                let response = request_decision(provider, logger, timeout, request).await;
                (index, kind, response)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, kind, response)) => {
                    progress.on_decision_complete(&responses[index].0, kind, response.is_some());
                    responses[index].1 = response;
                }
                Err(e) => {
                    warn!("Decision task join error: {}", e);
                }
            }
        }

        responses
    }

    fn keep_private(
        &self,
        memory: &mut TableMemory,
        player: &PlayerId,
        round_number: u32,
        kind: DecisionKind,
        response: &Option<String>,
    ) {
        if let Some(text) = response {
            memory.add_note(player, round_number, kind, text);
            self.recorder
                .on_private_thoughts(player, round_number, kind, text);
        }
    }
}

/// Send one prompt to a provider, logging the exchange.
///
/// Returns `None` when the provider fails or times out.
async fn request_decision(
    provider: Arc<dyn DecisionProvider>,
    logger: Arc<dyn ConversationLogger>,
    timeout: Option<Duration>,
    request: DecisionRequest,
) -> Option<String> {
    logger.log(ConversationEvent::new(
        "decision_prompt",
        json!({
            "player": request.player,
            "kind": request.kind,
            "round": request.round_number,
            "provider": provider.name(),
            "prompt": request.prompt,
            "bytes": request.prompt.len(),
        }),
    ));

    let started = Instant::now();
    let call = provider.respond(&request.prompt);
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout)),
        None => call.await,
    };
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(response) => {
            debug!(
                player = %request.player,
                kind = %request.kind,
                bytes = response.len(),
                elapsed_ms,
                "Decision received"
            );
            logger.log(ConversationEvent::new(
                "decision_response",
                json!({
                    "player": request.player,
                    "kind": request.kind,
                    "round": request.round_number,
                    "response": response,
                    "bytes": response.len(),
                    "elapsed_ms": elapsed_ms,
                }),
            ));
            Some(response)
        }
        Err(e) => {
            warn!(
                player = %request.player,
                kind = %request.kind,
                error = %e,
                "Decision unavailable, using safe default: {}",
                request.kind.safe_default()
            );
            logger.log(ConversationEvent::new(
                "decision_failed",
                json!({
                    "player": request.player,
                    "kind": request.kind,
                    "round": request.round_number,
                    "error": e.to_string(),
                    "elapsed_ms": elapsed_ms,
                }),
            ));
            None
        }
    }
}

/// Build a prompt from what `player` is allowed to see
fn build_prompt(
    state: &GameState,
    memory: &TableMemory,
    player: &PlayerId,
    view: &PublicView,
    conversation: &str,
    template: impl FnOnce(&PromptContext<'_>) -> String,
) -> String {
    // Every seated player holds a role; a servant briefing reveals nothing
    let role = state.roles().role_of(player).unwrap_or(Role::LoyalServant);
    let known_evil = state.knowledge().known_by(player);

    template(&PromptContext {
        player,
        role,
        known_evil: &known_evil,
        view,
        private_notes: memory.notes(player),
        conversation,
    })
}

/// Decode a response, or fall back to `default` when there is none or it is malformed
fn decode_or<T>(
    player: &PlayerId,
    kind: DecisionKind,
    response: Option<&str>,
    decode: impl FnOnce(&str) -> Result<T, DecodeError>,
    default: T,
) -> T {
    let Some(response) = response else {
        return default;
    };
    match decode(response) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                player = %player,
                kind = %kind,
                error = %e,
                "Undecodable response, using safe default: {}",
                kind.safe_default()
            );
            default
        }
    }
}

/// The first `size` players of the seating order
pub(super) fn seating_team(state: &GameState, size: usize) -> Vec<PlayerId> {
    state.seating().order().iter().take(size).cloned().collect()
}
