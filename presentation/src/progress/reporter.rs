//! Progress reporting for a running game

use avalon_application::ports::progress::GameProgressNotifier;
use avalon_domain::{
    AssassinationOutcome, AssassinationRecord, Ballot, DecisionKind, GameReport, GameState,
    PlayerId, QuestOutcome, QuestResult, QuestScore, VoteTally, join_players,
};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner for outstanding decisions
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
    /// Players currently being asked, with what they are asked for
    pending: Mutex<BTreeMap<PlayerId, DecisionKind>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinner: Mutex::new(None),
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn print(&self, line: String) {
        let _ = self.multi.println(line);
    }

    fn refresh(&self, pending: &BTreeMap<PlayerId, DecisionKind>) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };

        if pending.is_empty() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
            return;
        }

        let pb = spinner.get_or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.set_prefix("Waiting for");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        let names: Vec<String> = pending
            .iter()
            .map(|(player, kind)| format!("{} ({})", player, kind.display_name().to_lowercase()))
            .collect();
        pb.set_message(names.join(", "));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgressNotifier for ProgressReporter {
    fn on_game_start(&self, state: &GameState) {
        self.print(game_start_line(state));
    }

    fn on_round_start(&self, round_number: u32, quest_number: u8, leader: &PlayerId, team_size: usize) {
        self.print(round_line(round_number, quest_number, leader, team_size));
    }

    fn on_game_end(&self, _report: &GameReport) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.clear();
            self.refresh(&pending);
        }
    }

    fn on_decision_start(&self, player: &PlayerId, kind: DecisionKind) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.insert(player.clone(), kind);
            self.refresh(&pending);
        }
    }

    fn on_decision_complete(&self, player: &PlayerId, kind: DecisionKind, success: bool) {
        if !success {
            self.print(fallback_line(player, kind));
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(player);
            self.refresh(&pending);
        }
    }

    fn on_message(&self, speaker: &PlayerId, message: &str) {
        self.print(message_line(speaker, message));
    }

    fn on_team_proposed(&self, leader: &PlayerId, team: &[PlayerId]) {
        self.print(team_line(leader, team));
    }

    fn on_votes_revealed(&self, ballot: &Ballot, tally: &VoteTally) {
        self.print(votes_line(ballot, tally));
    }

    fn on_quest_revealed(&self, outcome: &QuestOutcome, score: QuestScore) {
        self.print(quest_line(outcome, score));
    }

    fn on_assassination(&self, record: &AssassinationRecord) {
        self.print(assassination_line(record));
    }
}

/// Simple text-based progress (no spinner)
pub struct ConsoleProgress;

impl GameProgressNotifier for ConsoleProgress {
    fn on_game_start(&self, state: &GameState) {
        println!("{}", game_start_line(state));
    }

    fn on_round_start(&self, round_number: u32, quest_number: u8, leader: &PlayerId, team_size: usize) {
        println!("{}", round_line(round_number, quest_number, leader, team_size));
    }

    fn on_game_end(&self, _report: &GameReport) {
        println!();
    }

    fn on_decision_complete(&self, player: &PlayerId, kind: DecisionKind, success: bool) {
        if !success {
            println!("{}", fallback_line(player, kind));
        }
    }

    fn on_message(&self, speaker: &PlayerId, message: &str) {
        println!("{}", message_line(speaker, message));
    }

    fn on_team_proposed(&self, leader: &PlayerId, team: &[PlayerId]) {
        println!("{}", team_line(leader, team));
    }

    fn on_votes_revealed(&self, ballot: &Ballot, tally: &VoteTally) {
        println!("{}", votes_line(ballot, tally));
    }

    fn on_quest_revealed(&self, outcome: &QuestOutcome, score: QuestScore) {
        println!("{}", quest_line(outcome, score));
    }

    fn on_assassination(&self, record: &AssassinationRecord) {
        println!("{}", assassination_line(record));
    }
}

// ==================== Shared Lines ====================

fn game_start_line(state: &GameState) -> String {
    format!(
        "{} {}\n   {} {}\n",
        "->".cyan(),
        "Avalon game started".bold(),
        "Seating:".dimmed(),
        join_players(state.seating().order())
    )
}

fn round_line(round_number: u32, quest_number: u8, leader: &PlayerId, team_size: usize) -> String {
    format!(
        "\n{} {} {}",
        "->".cyan(),
        format!("Round {} (Quest {})", round_number, quest_number).bold(),
        format!("leader {}, team of {}", leader, team_size).dimmed()
    )
}

fn message_line(speaker: &PlayerId, message: &str) -> String {
    format!("   {} {}", format!("{}:", speaker).yellow(), message)
}

fn team_line(leader: &PlayerId, team: &[PlayerId]) -> String {
    format!("   {} {} proposes {}", "*".cyan(), leader, join_players(team).bold())
}

fn votes_line(ballot: &Ballot, tally: &VoteTally) -> String {
    let verdict = if tally.result.is_approved() {
        "approved".green()
    } else {
        "rejected".red()
    };
    let approvers: Vec<String> = ballot.approvers().map(|p| p.to_string()).collect();
    format!(
        "   {} {} {}-{} {} (approve: {})",
        "*".cyan(),
        ballot.vote_summary(),
        tally.approve_count,
        tally.reject_count,
        verdict,
        if approvers.is_empty() {
            "nobody".to_string()
        } else {
            approvers.join(", ")
        }
    )
}

fn quest_line(outcome: &QuestOutcome, score: QuestScore) -> String {
    let result = match outcome.result {
        QuestResult::Success => "succeeded".green().bold(),
        QuestResult::Fail => "failed".red().bold(),
    };
    format!(
        "   {} Quest {} ({} success, {} fail). {}",
        "*".cyan(),
        result,
        outcome.success_cards,
        outcome.fail_cards,
        score
    )
}

fn assassination_line(record: &AssassinationRecord) -> String {
    let target = record
        .target
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "nobody".to_string());
    let outcome = match record.outcome {
        AssassinationOutcome::MerlinAssassinated => "and found Merlin".red().bold(),
        AssassinationOutcome::MerlinSurvived => "and missed".green().bold(),
    };
    format!(
        "\n{} {} strikes at {} {}",
        "->".cyan(),
        format!("The Assassin ({})", record.assassin).bold(),
        target,
        outcome
    )
}

fn fallback_line(player: &PlayerId, kind: DecisionKind) -> String {
    format!(
        "   {} {} gave no usable {} answer; using the default",
        "x".red(),
        player,
        kind.display_name().to_lowercase()
    )
}
