//! Console output formatter for game reports

use crate::output::formatter::OutputFormatter;
use avalon_domain::{
    AssassinationOutcome, AssassinationRecord, Faction, FullRoundRecord, GameReport, QuestResult,
    join_players,
};
use colored::Colorize;

/// Formats game reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors on or off for everything printed afterwards
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete report: roles, every round, the ending
    pub fn format(report: &GameReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Avalon Game Report"));
        output.push('\n');

        if let Some(seed) = report.seed {
            output.push_str(&format!("{} {}\n", "Seed:".cyan().bold(), seed));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Seating:".cyan().bold(),
            join_players(&report.seating_order)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "First leader:".cyan().bold(),
            report.initial_leader
        ));

        // Roles
        output.push_str(&Self::section_header("Roles"));
        for player in &report.seating_order {
            if let Some(role) = report.roles.get(player) {
                let label = format!("{:<16}", role.as_str());
                let label = match role.faction() {
                    Faction::Good => label.blue(),
                    Faction::Evil => label.red(),
                };
                output.push_str(&format!("  {} {}\n", label, player));
            }
        }

        // Rounds
        output.push_str(&Self::section_header("Rounds"));
        for round in &report.rounds {
            output.push_str(&Self::format_round(round));
        }

        // Assassination
        if let Some(record) = &report.assassination {
            output.push_str(&Self::section_header("Assassination"));
            output.push_str(&Self::format_assassination(record));
        }

        output.push_str(&Self::section_header("Result"));
        output.push_str(&Self::result_lines(report));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &GameReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the ending only (concise output)
    pub fn format_summary(report: &GameReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Avalon Result ===".cyan().bold()));
        output.push_str(&Self::result_lines(report));

        let quests = report.quests().count();
        output.push_str(&format!(
            "{} {} rounds, {} quests, {} rejected proposals\n",
            "Played:".dimmed(),
            report.rounds.len(),
            quests,
            report.rejected_rounds()
        ));

        if let Some(record) = &report.assassination {
            output.push_str(&Self::format_assassination(record));
        }
        if let Some(seed) = report.seed {
            output.push_str(&format!("{} {}\n", "Replay with:".dimmed(), format!("--seed {}", seed).bold()));
        }

        output
    }

    fn format_round(record: &FullRoundRecord) -> String {
        let round = record.public();
        let mut output = format!(
            "\n{}\n",
            format!(
                "── Round {} · Quest {} · Leader {} ──",
                round.round_number, round.quest_number, round.leader
            )
            .yellow()
            .bold()
        );

        output.push_str(&format!(
            "  Team ({}): {}\n",
            round.team_size_required,
            join_players(&round.proposed_team)
        ));

        let votes: Vec<String> = round
            .votes
            .iter()
            .map(|(player, vote)| format!("{} {}", player, vote.as_str()))
            .collect();
        let verdict = if round.was_approved() {
            "APPROVED".green().bold()
        } else {
            "REJECTED".red().bold()
        };
        output.push_str(&format!(
            "  Votes {}: {}  {}",
            round.votes.vote_summary(),
            votes.join(", "),
            verdict
        ));
        if !round.was_approved() {
            output.push_str(&format!(" ({} in a row)", round.consecutive_rejections));
        }
        output.push('\n');

        if let Some(outcome) = &round.quest_outcome {
            let result = match outcome.result {
                QuestResult::Success => "SUCCESS".green().bold(),
                QuestResult::Fail => "FAIL".red().bold(),
            };
            output.push_str(&format!(
                "  Quest: {} ({} success, {} fail)\n",
                result, outcome.success_cards, outcome.fail_cards
            ));
        }

        if let Some(cards) = &record.quest_cards_played {
            let played: Vec<String> = cards
                .iter()
                .map(|(player, card)| format!("{} {}", player, card))
                .collect();
            output.push_str(&format!("  {} {}\n", "Cards:".dimmed(), played.join(", ")));
        }

        output
    }

    fn format_assassination(record: &AssassinationRecord) -> String {
        let target = record
            .target
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "nobody".to_string());
        let outcome = match record.outcome {
            AssassinationOutcome::MerlinAssassinated => "Merlin assassinated".red().bold(),
            AssassinationOutcome::MerlinSurvived => "Merlin survived".green().bold(),
        };
        format!(
            "  {} named {} (Merlin was {}): {}\n",
            record.assassin, target, record.merlin, outcome
        )
    }

    fn result_lines(report: &GameReport) -> String {
        let Some(result) = report.result else {
            return format!("{}\n", "Game did not finish".yellow());
        };

        let winner = match result.winner() {
            Faction::Good => "GOOD WINS".blue().bold(),
            Faction::Evil => "EVIL WINS".red().bold(),
        };
        format!(
            "{}  {}\n{} {}\n",
            winner,
            result.describe(),
            "Quests:".cyan().bold(),
            report.quest_score
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &GameReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &GameReport) -> String {
        Self::format_json(report)
    }

    fn format_summary(&self, report: &GameReport) -> String {
        Self::format_summary(report)
    }
}
