//! Run Game use case
//!
//! Drives one game of Avalon from dealt roles to a final result:
//!
//! ```text
//! discussion → proposal → vote ─┬─ rejected → (next leader, same quest)
//!                               └─ approved → quest → score ─┬─ next quest
//!                                                            ├─ evil wins
//!                                                            └─ assassination
//! ```
//!
//! The [`GameState`] owned by a run is the only thing that changes game
//! state. Providers are asked for text; their answers are decoded and fed
//! to the state machine. Votes and quest cards are collected in full (in
//! parallel when configured) before any of them is applied.

mod memory;
mod phases;
mod types;

pub use types::RunGameError;

use crate::config::GameConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::decision_provider::DecisionProvider;
use crate::ports::game_recorder::{GameRecorder, NoGameRecorder};
use crate::ports::progress::{GameProgressNotifier, NoProgress};
use avalon_domain::{FullRoundRecord, GameReport, GameSetup, GameState, Phase, PlayerId, VoteOutcome};
use memory::TableMemory;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for playing a full game
pub struct RunGameUseCase {
    agents: BTreeMap<PlayerId, Arc<dyn DecisionProvider>>,
    config: GameConfig,
    recorder: Arc<dyn GameRecorder>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunGameUseCase {
    /// One provider per player
    pub fn new(agents: BTreeMap<PlayerId, Arc<dyn DecisionProvider>>) -> Self {
        Self {
            agents,
            config: GameConfig::default(),
            recorder: Arc::new(NoGameRecorder),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn GameRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, setup: GameSetup) -> Result<GameReport, RunGameError> {
        self.execute_with_progress(setup, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        setup: GameSetup,
        progress: &dyn GameProgressNotifier,
    ) -> Result<GameReport, RunGameError> {
        let mut state = GameState::from_setup(setup)?;
        if let Some(missing) = state.players().iter().find(|p| !self.agents.contains_key(*p)) {
            return Err(RunGameError::MissingProvider(missing.clone()));
        }

        info!(
            seed = ?state.seed(),
            leader = %state.current_leader(),
            "Starting game with {} players",
            state.players().len()
        );

        let opening = state.report();
        self.recorder.on_game_start(&opening);
        self.conversation_logger.log(ConversationEvent::new(
            "game_start",
            json!({
                "seed": opening.seed,
                "seating_order": opening.seating_order,
                "initial_leader": opening.initial_leader,
            }),
        ));
        progress.on_game_start(&state);

        let mut memory = TableMemory::default();
        while !state.is_finished() {
            if matches!(state.phase(), Phase::Assassination) {
                self.phase_assassination(&mut state, &mut memory, progress)
                    .await?;
            } else {
                self.play_round(&mut state, &mut memory, progress).await?;
            }
        }

        let report = state.report();
        if let Some(result) = report.result {
            info!(
                result = %result,
                winner = %result.winner(),
                score = %report.quest_score,
                "Game finished"
            );
        }
        self.recorder.on_game_end(&report);
        self.conversation_logger.log(ConversationEvent::new(
            "game_end",
            json!({
                "result": report.result,
                "winner": report.winner,
                "quest_score": report.quest_score,
            }),
        ));
        progress.on_game_end(&report);

        Ok(report)
    }

    /// One proposal attempt: discussion, proposal, vote and, if approved, the quest
    async fn play_round(
        &self,
        state: &mut GameState,
        memory: &mut TableMemory,
        progress: &dyn GameProgressNotifier,
    ) -> Result<(), RunGameError> {
        let round_number = state.round_number();
        let quest_number = state.quest_number();
        let leader = state.current_leader().clone();
        let team_size = state.required_team_size()?;

        info!(
            round = round_number,
            quest = quest_number,
            leader = %leader,
            team_size,
            "Round start"
        );
        self.recorder
            .on_round_start(round_number, quest_number, &leader);
        progress.on_round_start(round_number, quest_number, &leader, team_size);

        // Phase 1: Discussion
        self.phase_discussion(state, memory, progress).await;

        // Phase 2: Proposal
        let team = self
            .phase_proposal(state, memory, team_size, progress)
            .await;
        if let Err(e) = state.propose_team(&leader, team) {
            warn!(leader = %leader, error = %e, "Team refused by the rules, using seating order");
            state.propose_team(&leader, phases::seating_team(state, team_size))?;
        }
        if let Some(team) = state.proposed_team() {
            info!(leader = %leader, team = %avalon_domain::join_players(team), "Team proposed");
            progress.on_team_proposed(&leader, team);
        }

        // Phase 3: Voting
        let votes = self.phase_voting(state, memory, progress).await;
        match state.submit_votes(votes)? {
            VoteOutcome::Approved(tally) => {
                info!(
                    approve = tally.approve_count,
                    reject = tally.reject_count,
                    "Team approved"
                );
                if let Phase::QuestExecution { ballot, tally, .. } = state.phase() {
                    progress.on_votes_revealed(ballot, tally);
                }
            }
            VoteOutcome::Rejected {
                tally,
                round,
                game_over,
            } => {
                info!(
                    approve = tally.approve_count,
                    reject = tally.reject_count,
                    consecutive_rejections = round.round.consecutive_rejections,
                    "Team rejected"
                );
                progress.on_votes_revealed(&round.round.votes, &tally);
                self.record_round(&round);
                if game_over {
                    info!("Rejection limit reached");
                }
                return Ok(());
            }
        }

        // Phase 4: Quest
        let cards = self.phase_quest(state, memory, progress).await;
        let round = state.submit_quest_cards(cards)?;
        if let Some(outcome) = &round.round.quest_outcome {
            info!(
                quest = quest_number,
                success_cards = outcome.success_cards,
                fail_cards = outcome.fail_cards,
                result = %outcome.result,
                score = %state.score(),
                "Quest resolved"
            );
            progress.on_quest_revealed(outcome, state.score());
        }
        self.record_round(&round);

        Ok(())
    }

    fn record_round(&self, round: &FullRoundRecord) {
        self.recorder.append(round.public());
        self.recorder.append_full(round);
        self.conversation_logger.log(ConversationEvent::new(
            "round_complete",
            serde_json::to_value(round.public()).unwrap_or_default(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProposalMode;
    use crate::ports::decision_provider::ProviderError;
    use async_trait::async_trait;
    use avalon_domain::{
        AssassinationOutcome, DecisionKind, Faction, GameResult, QuestScore, Role, RoleAssignment,
        RoundRecord, Seating,
    };
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Doubles ====================

    type Script = Box<dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync>;

    struct ScriptedProvider {
        script: Script,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(script: impl Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                script: Box::new(script),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DecisionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn respond(&self, prompt: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.script)(prompt)
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl DecisionProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn respond(&self, _prompt: &str) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("<VOTE>approve</VOTE>".to_string())
        }
    }

    #[derive(Default)]
    struct MemoryRecorder {
        rounds: Mutex<Vec<RoundRecord>>,
        full_rounds: Mutex<Vec<FullRoundRecord>>,
        messages: Mutex<Vec<String>>,
        started: Mutex<bool>,
        ended: Mutex<Option<GameReport>>,
    }

    impl GameRecorder for MemoryRecorder {
        fn on_game_start(&self, _report: &GameReport) {
            *self.started.lock().unwrap() = true;
        }

        fn append(&self, round: &RoundRecord) {
            self.rounds.lock().unwrap().push(round.clone());
        }

        fn append_full(&self, round: &FullRoundRecord) {
            self.full_rounds.lock().unwrap().push(round.clone());
        }

        fn on_message(&self, _round: u32, speaker: &PlayerId, message: &str, _full: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("{}: {}", speaker, message));
        }

        fn on_game_end(&self, report: &GameReport) {
            *self.ended.lock().unwrap() = Some(report.clone());
        }
    }

    // ==================== Fixtures ====================

    fn p(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    /// A=Merlin, B/C=Servants, D=Assassin, E=Minion; seated A..E, A leads
    fn setup() -> GameSetup {
        let roles = RoleAssignment::from_roles(vec![
            (p("A"), Role::Merlin),
            (p("B"), Role::LoyalServant),
            (p("C"), Role::LoyalServant),
            (p("D"), Role::Assassin),
            (p("E"), Role::Minion),
        ])
        .unwrap();
        let seating = Seating::fixed(vec![p("A"), p("B"), p("C"), p("D"), p("E")], 0).unwrap();
        GameSetup {
            roles,
            seating,
            seed: 7,
        }
    }

    fn line_value<'a>(prompt: &'a str, prefix: &str) -> &'a str {
        prompt
            .lines()
            .find_map(|line| line.strip_prefix(prefix))
            .unwrap_or("")
            .trim()
    }

    /// A cooperative table: everyone approves, evil fails quests when
    /// `sabotage` is set, the leader proposes `team_pick` cut to size, and
    /// the Assassin names `target`.
    fn table(
        sabotage: bool,
        team_pick: &'static [&'static str],
        target: &'static str,
    ) -> impl Fn(&str) -> Result<String, ProviderError> + Send + Sync + Clone + 'static {
        move |prompt: &str| {
            let me = line_value(prompt, "YOUR IDENTITY:");
            let answer = match DecisionKind::requested_in(prompt) {
                Some(DecisionKind::Assassination) => {
                    format!("Reasoning. <ASSASSINATE>{}</ASSASSINATE>", target)
                }
                Some(DecisionKind::Proposal) => {
                    let size: usize = line_value(prompt, "Team size required:").parse().unwrap();
                    let team: Vec<&str> = team_pick.iter().copied().take(size).collect();
                    format!("<PROPOSED_TEAM>{}</PROPOSED_TEAM>", team.join(", "))
                }
                Some(DecisionKind::QuestCard) if sabotage && prompt.contains("Play FAIL") => {
                    "<QUEST_CARD>fail</QUEST_CARD>".to_string()
                }
                Some(DecisionKind::QuestCard) => "<QUEST_CARD>success</QUEST_CARD>".to_string(),
                Some(DecisionKind::Vote) => "Looks fine. <VOTE>approve</VOTE>".to_string(),
                _ => format!("(private) <MESSAGE>hello from {}</MESSAGE>", me),
            };
            Ok(answer)
        }
    }

    fn agents_from(
        script: impl Fn(&str) -> Result<String, ProviderError> + Send + Sync + Clone + 'static,
    ) -> (BTreeMap<PlayerId, Arc<dyn DecisionProvider>>, BTreeMap<PlayerId, Arc<ScriptedProvider>>) {
        let mut agents: BTreeMap<PlayerId, Arc<dyn DecisionProvider>> = BTreeMap::new();
        let mut handles = BTreeMap::new();
        for name in ["A", "B", "C", "D", "E"] {
            let provider = ScriptedProvider::new(script.clone());
            agents.insert(p(name), provider.clone());
            handles.insert(p(name), provider);
        }
        (agents, handles)
    }

    fn quick_config() -> GameConfig {
        GameConfig::default()
            .with_discussion_turns(1)
            .with_proposal(ProposalMode::Seating)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_three_successes_then_merlin_found_is_evil_win() {
        let (agents, _) = agents_from(table(false, &[], "A"));
        let recorder = Arc::new(MemoryRecorder::default());
        let use_case = RunGameUseCase::new(agents)
            .with_config(quick_config())
            .with_recorder(recorder.clone());

        let report = use_case.execute(setup()).await.unwrap();

        assert_eq!(report.quest_score, QuestScore { good: 3, evil: 0 });
        assert_eq!(
            report.result,
            Some(GameResult::GoodWinsByQuests {
                assassination: AssassinationOutcome::MerlinAssassinated
            })
        );
        assert_eq!(report.winner, Some(Faction::Evil));

        let sizes: Vec<usize> = report.rounds.iter().map(|r| r.round.team_size_required).collect();
        assert_eq!(sizes, vec![2, 3, 2]);

        let assassination = report.assassination.unwrap();
        assert_eq!(assassination.assassin, p("D"));
        assert_eq!(assassination.target, Some(p("A")));

        assert!(*recorder.started.lock().unwrap());
        assert_eq!(recorder.rounds.lock().unwrap().len(), 3);
        assert_eq!(recorder.full_rounds.lock().unwrap().len(), 3);
        assert!(recorder.ended.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_wrong_guess_is_good_win() {
        let (agents, _) = agents_from(table(false, &[], "b"));
        let report = RunGameUseCase::new(agents)
            .with_config(quick_config())
            .execute(setup())
            .await
            .unwrap();

        assert_eq!(report.winner, Some(Faction::Good));
        assert_eq!(report.assassination.unwrap().target, Some(p("B")));
    }

    #[tokio::test]
    async fn test_sequential_mode_reaches_same_result() {
        let (agents, _) = agents_from(table(false, &[], "A"));
        let report = RunGameUseCase::new(agents)
            .with_config(quick_config().sequential())
            .execute(setup())
            .await
            .unwrap();

        assert_eq!(report.winner, Some(Faction::Evil));
        assert_eq!(report.rounds.len(), 3);
    }

    #[tokio::test]
    async fn test_evil_sabotage_skips_assassination() {
        let (agents, handles) = agents_from(table(true, &["E", "A", "B"], "A"));
        let report = RunGameUseCase::new(agents)
            .with_config(
                GameConfig::default()
                    .with_discussion_turns(0)
                    .with_proposal(ProposalMode::Leader),
            )
            .execute(setup())
            .await
            .unwrap();

        assert_eq!(report.result, Some(GameResult::EvilWinsByQuests));
        assert_eq!(report.quest_score, QuestScore { good: 0, evil: 3 });
        assert!(report.assassination.is_none());

        let assassin_prompts = handles[&p("D")].prompts();
        assert!(!assassin_prompts.iter().any(|pr| pr.contains("<ASSASSINATE>")));

        // Only the Minion was on the teams; good members' cards stayed success
        for round in &report.rounds {
            let outcome = round.round.quest_outcome.unwrap();
            assert_eq!(outcome.fail_cards, 1);
        }
    }

    #[tokio::test]
    async fn test_failing_providers_fall_back_to_safe_defaults() {
        let (agents, _) =
            agents_from(|_: &str| Err(ProviderError::ConnectionError("offline".to_string())));
        let recorder = Arc::new(MemoryRecorder::default());
        let report = RunGameUseCase::new(agents)
            .with_config(quick_config())
            .with_recorder(recorder.clone())
            .execute(setup())
            .await
            .unwrap();

        // Every vote defaults to reject
        assert_eq!(report.result, Some(GameResult::EvilWinsByRejections));
        let counters: Vec<u8> = recorder
            .rounds
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.consecutive_rejections)
            .collect();
        assert_eq!(counters, vec![1, 2, 3, 4, 5]);
        assert!(recorder.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_responses_use_defaults() {
        let (agents, _) = agents_from(|_: &str| Ok("I refuse to use tags".to_string()));
        let report = RunGameUseCase::new(agents)
            .with_config(quick_config())
            .execute(setup())
            .await
            .unwrap();

        assert_eq!(report.result, Some(GameResult::EvilWinsByRejections));
        assert_eq!(report.rejected_rounds(), 5);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let mut agents: BTreeMap<PlayerId, Arc<dyn DecisionProvider>> = BTreeMap::new();
        for name in ["A", "B", "C", "D", "E"] {
            agents.insert(p(name), Arc::new(SlowProvider));
        }
        let report = RunGameUseCase::new(agents)
            .with_config(
                quick_config()
                    .with_discussion_turns(0)
                    .with_decision_timeout(Some(Duration::from_millis(20))),
            )
            .execute(setup())
            .await
            .unwrap();

        assert_eq!(report.result, Some(GameResult::EvilWinsByRejections));
    }

    #[tokio::test]
    async fn test_later_speakers_hear_earlier_messages() {
        let (agents, handles) = agents_from(table(false, &[], "A"));
        let recorder = Arc::new(MemoryRecorder::default());
        RunGameUseCase::new(agents)
            .with_config(quick_config())
            .with_recorder(recorder.clone())
            .execute(setup())
            .await
            .unwrap();

        // A leads round 1 and speaks first; B speaks second
        let b_first = &handles[&p("B")].prompts()[0];
        assert!(b_first.contains("A: hello from A"));
        let a_first = &handles[&p("A")].prompts()[0];
        assert!(a_first.contains("(Conversation just starting)"));

        let messages = recorder.messages.lock().unwrap();
        assert_eq!(messages[0], "A: hello from A");
        assert_eq!(messages[1], "B: hello from B");
    }

    #[tokio::test]
    async fn test_private_notes_feed_own_prompts_only() {
        let (agents, handles) = agents_from(table(false, &[], "A"));
        RunGameUseCase::new(agents)
            .with_config(quick_config())
            .execute(setup())
            .await
            .unwrap();

        // A's later prompts include A's own earlier vote reasoning
        let a_prompts = handles[&p("A")].prompts();
        assert!(a_prompts.iter().any(|pr| pr.contains("Round 1 - Vote Decision")));

        // B's round-1 vote prompt never contains anyone's round-1 vote
        let b_prompts = handles[&p("B")].prompts();
        let b_vote = b_prompts.iter().find(|pr| pr.contains("<VOTE>")).unwrap();
        assert!(!b_vote.contains("Looks fine."));
    }

    #[tokio::test]
    async fn test_missing_provider_is_an_error() {
        let (mut agents, _) = agents_from(table(false, &[], "A"));
        agents.remove(&p("C"));

        let result = RunGameUseCase::new(agents).execute(setup()).await;
        assert!(matches!(result, Err(RunGameError::MissingProvider(player)) if player == p("C")));
    }
}
