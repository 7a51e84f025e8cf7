//! The game state machine (GameStateMachine)
//!
//! [`GameState`] owns the quest score, the rejection counter, the leader
//! seat and the round history. The orchestrator holds the single instance
//! and advances it through transition methods; each transition validates its
//! input first and leaves the state untouched when it returns an error.
//!
//! Discussion is not a state here: its content never feeds the rules, so the
//! orchestrator runs it before calling [`GameState::propose_team`].

use super::record::{FullRoundRecord, RoundRecord};
use super::result::{AssassinationOutcome, AssassinationRecord, GameResult};
use super::setup::GameSetup;
use super::view::{GameReport, PublicView};
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::quest::{QuestCard, QuestCards, QuestOutcome, QuestResolver, QuestScore};
use crate::roles::{Faction, KnowledgeMap, RoleAssignment};
use crate::table::{QUEST_TEAM_SIZES, Seating, required_team_size};
use crate::vote::{Ballot, Vote, VoteResult, VoteTally};
use std::collections::HashSet;

/// Rejected proposals in a row that hand the game to evil
pub const MAX_CONSECUTIVE_REJECTIONS: u8 = 5;

/// Where the game currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the leader's team
    Proposal,
    /// A team is on the table; every player must vote
    Voting { team: Vec<PlayerId> },
    /// The team was approved; every member must play a card
    QuestExecution {
        team: Vec<PlayerId>,
        ballot: Ballot,
        tally: VoteTally,
    },
    /// Good has three quests; the Assassin gets one guess
    Assassination,
    Finished(GameResult),
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Proposal => "proposal",
            Phase::Voting { .. } => "voting",
            Phase::QuestExecution { .. } => "quest execution",
            Phase::Assassination => "assassination",
            Phase::Finished(_) => "finished",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of revealing a full ballot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The team goes on the quest
    Approved(VoteTally),
    /// The proposal failed; `round` has been appended to the history
    Rejected {
        tally: VoteTally,
        round: FullRoundRecord,
        game_over: bool,
    },
}

/// Authoritative state of one game (Entity)
#[derive(Debug, Clone)]
pub struct GameState {
    roles: RoleAssignment,
    knowledge: KnowledgeMap,
    seating: Seating,
    seed: Option<u64>,
    leader_index: usize,
    quest_number: u8,
    score: QuestScore,
    consecutive_rejections: u8,
    rounds: Vec<FullRoundRecord>,
    assassination: Option<AssassinationRecord>,
    phase: Phase,
}

impl GameState {
    /// Start a game from dealt roles and a seating.
    ///
    /// Both must cover the same five players.
    pub fn new(roles: RoleAssignment, seating: Seating) -> Result<Self, GameError> {
        if let Some(stranger) = seating.order().iter().find(|p| roles.role_of(p).is_none()) {
            return Err(GameError::UnknownPlayer(stranger.clone()));
        }
        if seating.len() != roles.players().len() {
            return Err(GameError::InvalidPlayerCount {
                expected: roles.players().len(),
                actual: seating.len(),
            });
        }

        Ok(Self {
            knowledge: roles.knowledge(),
            leader_index: seating.initial_leader(),
            roles,
            seating,
            seed: None,
            quest_number: 1,
            score: QuestScore::default(),
            consecutive_rejections: 0,
            rounds: Vec::new(),
            assassination: None,
            phase: Phase::Proposal,
        })
    }

    pub fn from_setup(setup: GameSetup) -> Result<Self, GameError> {
        let seed = setup.seed;
        let mut state = Self::new(setup.roles, setup.seating)?;
        state.seed = Some(seed);
        Ok(state)
    }

    // ==================== Accessors ====================

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }

    pub fn roles(&self) -> &RoleAssignment {
        &self.roles
    }

    pub fn knowledge(&self) -> &KnowledgeMap {
        &self.knowledge
    }

    pub fn seating(&self) -> &Seating {
        &self.seating
    }

    /// Players in roster order
    pub fn players(&self) -> &[PlayerId] {
        self.roles.players()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn leader_index(&self) -> usize {
        self.leader_index
    }

    pub fn current_leader(&self) -> &PlayerId {
        self.seating.player_at(self.leader_index)
    }

    pub fn speaking_order(&self) -> Vec<PlayerId> {
        self.seating.speaking_order(self.leader_index)
    }

    pub fn quest_number(&self) -> u8 {
        self.quest_number
    }

    /// 1-based number of the round in progress (or the next one)
    pub fn round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    pub fn required_team_size(&self) -> Result<usize, GameError> {
        required_team_size(self.quest_number)
    }

    pub fn score(&self) -> QuestScore {
        self.score
    }

    pub fn consecutive_rejections(&self) -> u8 {
        self.consecutive_rejections
    }

    /// Public round records, oldest first
    pub fn rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.iter().map(FullRoundRecord::public)
    }

    pub fn full_rounds(&self) -> &[FullRoundRecord] {
        &self.rounds
    }

    pub fn assassination(&self) -> Option<&AssassinationRecord> {
        self.assassination.as_ref()
    }

    /// The team currently on the table, if any
    pub fn proposed_team(&self) -> Option<&[PlayerId]> {
        match &self.phase {
            Phase::Voting { team } | Phase::QuestExecution { team, .. } => Some(team),
            _ => None,
        }
    }

    // ==================== Transitions ====================

    /// Put the leader's team on the table
    pub fn propose_team(&mut self, proposer: &PlayerId, team: Vec<PlayerId>) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Proposal) {
            return Err(self.out_of_phase("propose a team"));
        }

        let leader = self.current_leader();
        if proposer != leader {
            return Err(GameError::NotLeader {
                proposer: proposer.clone(),
                leader: leader.clone(),
            });
        }

        let expected = self.required_team_size()?;
        if team.len() != expected {
            return Err(GameError::InvalidTeamSize {
                quest: self.quest_number,
                expected,
                actual: team.len(),
            });
        }

        let mut seen = HashSet::new();
        for member in &team {
            if self.roles.role_of(member).is_none() {
                return Err(GameError::UnknownPlayer(member.clone()));
            }
            if !seen.insert(member) {
                return Err(GameError::DuplicateTeamMember(member.clone()));
            }
        }

        self.phase = Phase::Voting { team };
        Ok(())
    }

    /// Reveal the complete ballot and apply it as one batch.
    ///
    /// A rejection is recorded immediately. Reaching
    /// [`MAX_CONSECUTIVE_REJECTIONS`] ends the game; otherwise the leader
    /// token moves on and the same quest is proposed again. An approval
    /// resets the counter and moves to quest execution.
    pub fn submit_votes(&mut self, votes: Vec<(PlayerId, Vote)>) -> Result<VoteOutcome, GameError> {
        let team = match &self.phase {
            Phase::Voting { team } => team.clone(),
            _ => return Err(self.out_of_phase("submit votes")),
        };

        let ballot = Ballot::collect(self.roles.players(), votes)?;
        let tally = VoteTally::decide(&ballot);

        if tally.result.is_approved() {
            self.consecutive_rejections = 0;
            self.phase = Phase::QuestExecution {
                team,
                ballot,
                tally,
            };
            return Ok(VoteOutcome::Approved(tally));
        }

        let rejections = self.consecutive_rejections + 1;
        let round = FullRoundRecord {
            round: self.round_record(team, ballot, VoteResult::Rejected, rejections, None)?,
            quest_cards_played: None,
        };
        self.consecutive_rejections = rejections;
        self.rounds.push(round.clone());

        let game_over = self.consecutive_rejections >= MAX_CONSECUTIVE_REJECTIONS;
        if game_over {
            self.score.evil += 1;
            self.phase = Phase::Finished(GameResult::EvilWinsByRejections);
        } else {
            self.rotate_leader();
            self.phase = Phase::Proposal;
        }

        Ok(VoteOutcome::Rejected {
            tally,
            round,
            game_over,
        })
    }

    /// Reveal the team's quest cards and score the quest.
    ///
    /// Fail cards from players whose role may not fail a quest are turned
    /// into successes before counting.
    pub fn submit_quest_cards(
        &mut self,
        cards: Vec<(PlayerId, QuestCard)>,
    ) -> Result<FullRoundRecord, GameError> {
        let (team, ballot) = match &self.phase {
            Phase::QuestExecution { team, ballot, .. } => (team.clone(), ballot.clone()),
            _ => return Err(self.out_of_phase("play quest cards")),
        };

        let played = QuestCards::collect(&team, cards)?
            .coerce(|player| self.roles.role_of(player).is_some_and(|r| r.may_fail_quest()));
        let outcome = QuestResolver::decide(&played);

        let round = FullRoundRecord {
            round: self.round_record(
                team,
                ballot,
                VoteResult::Approved,
                self.consecutive_rejections,
                Some(outcome),
            )?,
            quest_cards_played: Some(played),
        };

        self.score.record(outcome.result);
        self.rounds.push(round.clone());
        self.quest_number += 1;
        self.rotate_leader();

        self.phase = match self.score.winner() {
            Some(Faction::Good) => Phase::Assassination,
            Some(Faction::Evil) => Phase::Finished(GameResult::EvilWinsByQuests),
            None => Phase::Proposal,
        };

        Ok(round)
    }

    /// Resolve the Assassin's single guess. `None` is a forfeited guess.
    pub fn resolve_assassination(
        &mut self,
        target: Option<&PlayerId>,
    ) -> Result<AssassinationRecord, GameError> {
        if !matches!(self.phase, Phase::Assassination) {
            return Err(self.out_of_phase("resolve the assassination"));
        }
        if let Some(target) = target {
            if self.roles.role_of(target).is_none() {
                return Err(GameError::UnknownPlayer(target.clone()));
            }
        }

        let merlin = self.roles.merlin().clone();
        let outcome = if target == Some(&merlin) {
            AssassinationOutcome::MerlinAssassinated
        } else {
            AssassinationOutcome::MerlinSurvived
        };

        let record = AssassinationRecord {
            assassin: self.roles.assassin().clone(),
            target: target.cloned(),
            merlin,
            outcome,
        };
        self.assassination = Some(record.clone());
        self.phase = Phase::Finished(GameResult::GoodWinsByQuests {
            assassination: outcome,
        });

        Ok(record)
    }

    // ==================== Views ====================

    /// Everything every player is allowed to see
    pub fn public_view(&self) -> PublicView {
        PublicView {
            quest_number: self.quest_number,
            round_number: self.round_number(),
            leader: self.current_leader().clone(),
            team_size_required: self.required_team_size().ok(),
            seating_order: self.seating.order().to_vec(),
            quest_requirements: QUEST_TEAM_SIZES.to_vec(),
            quest_score: self.score,
            consecutive_rejections: self.consecutive_rejections,
            proposed_team: self.proposed_team().map(<[PlayerId]>::to_vec),
            rounds: self.rounds().cloned().collect(),
        }
    }

    /// Full report including hidden information, for logs and the final summary
    pub fn report(&self) -> GameReport {
        GameReport {
            seed: self.seed,
            seating_order: self.seating.order().to_vec(),
            initial_leader: self.seating.player_at(self.seating.initial_leader()).clone(),
            roles: self.roles.as_map().clone(),
            knowledge: self.knowledge.clone(),
            rounds: self.rounds.clone(),
            quest_score: self.score,
            assassination: self.assassination.clone(),
            result: self.result(),
            winner: self.result().map(|r| r.winner()),
        }
    }

    fn round_record(
        &self,
        proposed_team: Vec<PlayerId>,
        votes: Ballot,
        vote_result: VoteResult,
        consecutive_rejections: u8,
        quest_outcome: Option<QuestOutcome>,
    ) -> Result<RoundRecord, GameError> {
        Ok(RoundRecord {
            round_number: self.round_number(),
            quest_number: self.quest_number,
            team_size_required: self.required_team_size()?,
            leader: self.current_leader().clone(),
            proposed_team,
            votes,
            vote_result,
            consecutive_rejections,
            quest_outcome,
        })
    }

    fn rotate_leader(&mut self) {
        self.leader_index = self.seating.rotate(self.leader_index);
    }

    fn out_of_phase(&self, action: &'static str) -> GameError {
        GameError::OutOfPhase {
            action,
            phase: self.phase.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    fn p(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    /// A=Merlin, B/C=Servants, D=Assassin, E=Minion; seated A..E, A leads
    fn game() -> GameState {
        let roles = RoleAssignment::from_roles(vec![
            (p("A"), Role::Merlin),
            (p("B"), Role::LoyalServant),
            (p("C"), Role::LoyalServant),
            (p("D"), Role::Assassin),
            (p("E"), Role::Minion),
        ])
        .unwrap();
        let seating = Seating::fixed(vec![p("A"), p("B"), p("C"), p("D"), p("E")], 0).unwrap();
        GameState::new(roles, seating).unwrap()
    }

    fn all(vote: Vote) -> Vec<(PlayerId, Vote)> {
        ["A", "B", "C", "D", "E"].iter().map(|n| (p(n), vote)).collect()
    }

    fn cards(team: &[PlayerId], card: QuestCard) -> Vec<(PlayerId, QuestCard)> {
        team.iter().map(|m| (m.clone(), card)).collect()
    }

    /// Propose the first N seats from the current leader, approve, play `card`
    fn play_quest(state: &mut GameState, card: QuestCard) -> FullRoundRecord {
        let size = state.required_team_size().unwrap();
        let leader = state.current_leader().clone();
        let team: Vec<PlayerId> = state.speaking_order().into_iter().take(size).collect();
        state.propose_team(&leader, team.clone()).unwrap();
        assert!(matches!(
            state.submit_votes(all(Vote::Approve)).unwrap(),
            VoteOutcome::Approved(_)
        ));
        state.submit_quest_cards(cards(&team, card)).unwrap()
    }

    fn reject_once(state: &mut GameState) -> VoteOutcome {
        let size = state.required_team_size().unwrap();
        let leader = state.current_leader().clone();
        let team: Vec<PlayerId> = state.speaking_order().into_iter().take(size).collect();
        state.propose_team(&leader, team).unwrap();
        state.submit_votes(all(Vote::Reject)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = game();
        assert_eq!(state.phase(), &Phase::Proposal);
        assert_eq!(state.quest_number(), 1);
        assert_eq!(state.round_number(), 1);
        assert_eq!(state.current_leader(), &p("A"));
        assert_eq!(state.score(), QuestScore::default());
        assert_eq!(state.consecutive_rejections(), 0);
        assert_eq!(state.knowledge().known_by(&p("A")), vec![p("D"), p("E")]);
    }

    #[test]
    fn test_new_rejects_mismatched_seating() {
        let roles = game().roles().clone();
        let seating = Seating::fixed(vec![p("A"), p("B"), p("C"), p("D"), p("Z")], 0).unwrap();
        assert_eq!(
            GameState::new(roles, seating).err(),
            Some(GameError::UnknownPlayer(p("Z")))
        );
    }

    #[test]
    fn test_invalid_proposals_leave_state_untouched() {
        let mut state = game();

        let wrong_size = state.propose_team(&p("A"), vec![p("A")]);
        assert!(matches!(wrong_size, Err(GameError::InvalidTeamSize { expected: 2, actual: 1, .. })));

        let duplicate = state.propose_team(&p("A"), vec![p("B"), p("B")]);
        assert_eq!(duplicate, Err(GameError::DuplicateTeamMember(p("B"))));

        let stranger = state.propose_team(&p("A"), vec![p("B"), p("Z")]);
        assert_eq!(stranger, Err(GameError::UnknownPlayer(p("Z"))));

        let not_leader = state.propose_team(&p("B"), vec![p("A"), p("B")]);
        assert!(matches!(not_leader, Err(GameError::NotLeader { .. })));

        assert_eq!(state.phase(), &Phase::Proposal);
        assert!(state.full_rounds().is_empty());
    }

    #[test]
    fn test_out_of_phase_operations() {
        let mut state = game();
        assert!(matches!(
            state.submit_votes(all(Vote::Approve)),
            Err(GameError::OutOfPhase { .. })
        ));
        assert!(matches!(
            state.submit_quest_cards(vec![]),
            Err(GameError::OutOfPhase { .. })
        ));
        assert!(matches!(
            state.resolve_assassination(Some(&p("A"))),
            Err(GameError::OutOfPhase { .. })
        ));
    }

    #[test]
    fn test_incomplete_ballot_is_rejected_before_mutation() {
        let mut state = game();
        state.propose_team(&p("A"), vec![p("A"), p("B")]).unwrap();

        let mut votes = all(Vote::Approve);
        votes.pop();
        assert_eq!(
            state.submit_votes(votes),
            Err(GameError::IncompleteBallot(vec![p("E")]))
        );
        assert!(matches!(state.phase(), Phase::Voting { .. }));
    }

    #[test]
    fn test_rejection_rotates_leader_and_keeps_quest() {
        let mut state = game();
        let outcome = reject_once(&mut state);

        let VoteOutcome::Rejected { round, game_over, .. } = outcome else {
            panic!("expected a rejection");
        };
        assert!(!game_over);
        assert_eq!(round.round.consecutive_rejections, 1);
        assert_eq!(round.round.quest_outcome, None);
        assert_eq!(round.round.leader, p("A"));

        assert_eq!(state.current_leader(), &p("B"));
        assert_eq!(state.quest_number(), 1);
        assert_eq!(state.round_number(), 2);
        assert_eq!(state.phase(), &Phase::Proposal);
    }

    #[test]
    fn test_four_rejections_do_not_end_the_game() {
        let mut state = game();
        for _ in 0..4 {
            reject_once(&mut state);
        }
        assert!(!state.is_finished());
        assert_eq!(state.consecutive_rejections(), 4);
    }

    #[test]
    fn test_five_rejections_end_the_game() {
        let mut state = game();
        for _ in 0..4 {
            reject_once(&mut state);
        }
        let VoteOutcome::Rejected { game_over, round, .. } = reject_once(&mut state) else {
            panic!("expected a rejection");
        };
        assert!(game_over);
        assert_eq!(round.round.consecutive_rejections, 5);
        assert_eq!(state.result(), Some(GameResult::EvilWinsByRejections));
        assert_eq!(state.full_rounds().len(), 5);
        assert_eq!(state.score().evil, 1);
    }

    #[test]
    fn test_approval_resets_counter_across_quests() {
        let mut state = game();
        reject_once(&mut state);
        reject_once(&mut state);
        let round = play_quest(&mut state, QuestCard::Success);
        assert_eq!(round.round.consecutive_rejections, 0);
        assert_eq!(state.consecutive_rejections(), 0);

        // Counter carries across a quest boundary only until an approval
        reject_once(&mut state);
        assert_eq!(state.consecutive_rejections(), 1);
        assert_eq!(state.quest_number(), 2);
    }

    #[test]
    fn test_good_cards_are_coerced_to_success() {
        let mut state = game();
        state.propose_team(&p("A"), vec![p("B"), p("C")]).unwrap();
        state.submit_votes(all(Vote::Approve)).unwrap();

        let round = state
            .submit_quest_cards(vec![(p("B"), QuestCard::Fail), (p("C"), QuestCard::Fail)])
            .unwrap();
        let outcome = round.round.quest_outcome.unwrap();
        assert_eq!(outcome.fail_cards, 0);
        assert_eq!(outcome.success_cards, 2);
        assert_eq!(state.score().good, 1);
    }

    #[test]
    fn test_evil_fail_fails_quest() {
        let mut state = game();
        state.propose_team(&p("A"), vec![p("A"), p("E")]).unwrap();
        state.submit_votes(all(Vote::Approve)).unwrap();

        let round = state
            .submit_quest_cards(vec![(p("A"), QuestCard::Success), (p("E"), QuestCard::Fail)])
            .unwrap();
        let outcome = round.round.quest_outcome.unwrap();
        assert_eq!(outcome.fail_cards, 1);
        assert_eq!(
            round.quest_cards_played.unwrap().card_of(&p("E")),
            Some(QuestCard::Fail)
        );
        assert_eq!(state.score().evil, 1);
        assert_eq!(state.quest_number(), 2);
        assert_eq!(state.current_leader(), &p("B"));
    }

    #[test]
    fn test_approved_phase_keeps_ballot_and_tally() {
        let mut state = game();
        state.propose_team(&p("A"), vec![p("A"), p("B")]).unwrap();
        let votes = vec![
            (p("A"), Vote::Approve),
            (p("B"), Vote::Approve),
            (p("C"), Vote::Approve),
            (p("D"), Vote::Reject),
            (p("E"), Vote::Reject),
        ];
        let VoteOutcome::Approved(returned) = state.submit_votes(votes).unwrap() else {
            panic!("3-2 should approve");
        };

        let Phase::QuestExecution { ballot, tally, .. } = state.phase() else {
            panic!("expected quest execution");
        };
        assert_eq!(tally, &returned);
        assert_eq!((tally.approve_count, tally.reject_count), (3, 2));
        assert_eq!(ballot.vote_of(&p("D")), Some(Vote::Reject));
    }

    #[test]
    fn test_quest_cards_must_come_from_team() {
        let mut state = game();
        state.propose_team(&p("A"), vec![p("A"), p("B")]).unwrap();
        state.submit_votes(all(Vote::Approve)).unwrap();

        let result = state.submit_quest_cards(vec![
            (p("A"), QuestCard::Success),
            (p("C"), QuestCard::Success),
        ]);
        assert_eq!(result, Err(GameError::NotOnTeam(p("C"))));
        assert!(matches!(state.phase(), Phase::QuestExecution { .. }));
    }

    #[test]
    fn test_evil_three_quests_skips_assassination() {
        let mut state = game();
        for _ in 0..3 {
            let size = state.required_team_size().unwrap();
            let leader = state.current_leader().clone();
            let mut team = vec![p("E")];
            team.extend(
                ["A", "B", "C"]
                    .iter()
                    .map(|n| p(n))
                    .take(size - 1),
            );
            state.propose_team(&leader, team.clone()).unwrap();
            state.submit_votes(all(Vote::Approve)).unwrap();
            state.submit_quest_cards(cards(&team, QuestCard::Fail)).unwrap();
        }

        assert_eq!(state.result(), Some(GameResult::EvilWinsByQuests));
        assert!(state.assassination().is_none());
        assert!(matches!(
            state.resolve_assassination(Some(&p("A"))),
            Err(GameError::OutOfPhase { .. })
        ));
    }

    #[test]
    fn test_three_successes_then_correct_guess_is_evil_win() {
        let mut state = game();
        let sizes: Vec<usize> = (0..3)
            .map(|_| play_quest(&mut state, QuestCard::Success).round.team_size_required)
            .collect();

        assert_eq!(sizes, vec![2, 3, 2]);
        assert_eq!(state.score(), QuestScore { good: 3, evil: 0 });
        assert_eq!(state.phase(), &Phase::Assassination);

        let record = state.resolve_assassination(Some(&p("A"))).unwrap();
        assert_eq!(record.outcome, AssassinationOutcome::MerlinAssassinated);
        assert_eq!(record.assassin, p("D"));
        assert_eq!(state.result().map(|r| r.winner()), Some(Faction::Evil));

        // Exactly once
        assert!(state.resolve_assassination(Some(&p("A"))).is_err());
    }

    #[test]
    fn test_wrong_or_missing_guess_is_good_win() {
        for target in [Some(p("B")), None] {
            let mut state = game();
            for _ in 0..3 {
                play_quest(&mut state, QuestCard::Success);
            }
            state.resolve_assassination(target.as_ref()).unwrap();
            assert_eq!(
                state.result(),
                Some(GameResult::GoodWinsByQuests {
                    assassination: AssassinationOutcome::MerlinSurvived
                })
            );
        }
    }

    #[test]
    fn test_assassination_target_must_be_seated() {
        let mut state = game();
        for _ in 0..3 {
            play_quest(&mut state, QuestCard::Success);
        }
        assert_eq!(
            state.resolve_assassination(Some(&p("Z"))),
            Err(GameError::UnknownPlayer(p("Z")))
        );
        assert_eq!(state.phase(), &Phase::Assassination);
    }

    #[test]
    fn test_public_view_hides_cards() {
        let mut state = game();
        play_quest(&mut state, QuestCard::Success);
        let view = serde_json::to_value(state.public_view()).unwrap();

        assert_eq!(view["quest_number"], 2);
        assert_eq!(view["team_size_required"], 3);
        assert_eq!(view["rounds"].as_array().unwrap().len(), 1);
        assert!(view["rounds"][0].get("quest_cards_played").is_none());
        assert!(view.get("roles").is_none());
    }

    #[test]
    fn test_report_includes_hidden_information() {
        let mut state = game();
        for _ in 0..3 {
            play_quest(&mut state, QuestCard::Success);
        }
        state.resolve_assassination(Some(&p("C"))).unwrap();

        let report = state.report();
        assert_eq!(report.winner, Some(Faction::Good));
        assert_eq!(report.roles.get(&p("A")), Some(&Role::Merlin));
        assert_eq!(report.rounds.len(), 3);
        assert!(report.assassination.is_some());
    }
}
