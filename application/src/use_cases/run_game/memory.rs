//! What the table has said and what each player has privately noted.
//!
//! The game state only holds rules-relevant data. Prompts also need the
//! public conversation and each player's own earlier reasoning, which live
//! here for the duration of one game.

use avalon_domain::{DecisionKind, PlayerId};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub(super) struct TableMemory {
    /// Public messages per round, in speaking order
    conversation: BTreeMap<u32, Vec<(PlayerId, String)>>,
    notes: HashMap<PlayerId, String>,
}

impl TableMemory {
    pub fn record_message(&mut self, round_number: u32, speaker: &PlayerId, message: &str) {
        self.conversation
            .entry(round_number)
            .or_default()
            .push((speaker.clone(), message.to_string()));
    }

    /// Public conversation of one round
    pub fn conversation(&self, round_number: u32) -> String {
        self.conversation
            .get(&round_number)
            .map(|messages| format_messages(messages))
            .unwrap_or_default()
    }

    /// Every public message of the game, with round headers
    pub fn transcript(&self) -> String {
        self.conversation
            .iter()
            .map(|(round, messages)| format!("# ROUND {}\n{}", round, format_messages(messages)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn add_note(&mut self, player: &PlayerId, round_number: u32, kind: DecisionKind, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let notes = self.notes.entry(player.clone()).or_default();
        notes.push_str(&format!(
            "=== Round {} - {} Decision ===\n{}\n\n",
            round_number,
            kind.display_name(),
            text
        ));
    }

    pub fn notes(&self, player: &PlayerId) -> &str {
        self.notes.get(player).map(String::as_str).unwrap_or("")
    }
}

fn format_messages(messages: &[(PlayerId, String)]) -> String {
    messages
        .iter()
        .map(|(speaker, message)| format!("{}: {}\n", speaker, message))
        .collect()
}
