//! File-backed game recorder
//!
//! Everything a game produces goes into one directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `public_game_log.json` | what every player can see: seating, score, public rounds |
//! | `full_game_log.json` | adds roles, knowledge, quest cards and the assassination |
//! | `conversation_log.txt` | public messages under `<ROUND>n</ROUND>` headers |
//! | `full_conversation_log.txt` | private thoughts next to each public message |
//! | `<player>_private_thoughts.txt` | one player's reasoning per round and decision |
//!
//! The public log is rebuilt from [`GameRecorder::append`] and the full log
//! from [`GameRecorder::append_full`]. Each is rewritten after every round so a
//! crashed game still leaves a consistent record. Write failures are logged and
//! otherwise ignored.

use avalon_application::GameRecorder;
use avalon_domain::decision::split_discussion;
use avalon_domain::table::QUEST_TEAM_SIZES;
use avalon_domain::{
    DecisionKind, FullRoundRecord, GameReport, PlayerId, QuestScore, RoundRecord, join_players,
};
use chrono::{DateTime, Local};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const PUBLIC_LOG: &str = "public_game_log.json";
const FULL_LOG: &str = "full_game_log.json";
const CONVERSATION_LOG: &str = "conversation_log.txt";
const FULL_CONVERSATION_LOG: &str = "full_conversation_log.txt";

/// Directory name for a game started at `now`
pub fn game_dir_name(now: DateTime<Local>) -> String {
    format!("game-{}", now.format("%Y%m%d-%H%M%S"))
}

/// Game id used in every log written into `dir`: the directory's own name
pub(crate) fn game_id_for(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "game".to_string())
}

#[derive(Default)]
struct Records {
    opening: Option<GameReport>,
    public_rounds: Vec<RoundRecord>,
    full_rounds: Vec<FullRoundRecord>,
}

/// [`GameRecorder`] that writes JSON logs and text transcripts to a directory
pub struct FileGameRecorder {
    dir: PathBuf,
    game_id: String,
    records: Mutex<Records>,
}

impl FileGameRecorder {
    /// Create the directory (and parents) and a recorder writing into it.
    ///
    /// Returns `None` if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("Could not create game directory {}: {}", dir.display(), e);
            return None;
        }

        Some(Self {
            dir: dir.to_path_buf(),
            game_id: game_id_for(dir),
            records: Mutex::new(Records::default()),
        })
    }

    /// A fresh `game-<timestamp>` directory under `base`
    pub fn in_new_game_dir(base: impl AsRef<Path>) -> Option<Self> {
        Self::new(base.as_ref().join(game_dir_name(Local::now())))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn write(&self, file: &str, contents: &str) {
        let path = self.path(file);
        if let Err(e) = fs::write(&path, contents) {
            warn!("Could not write {}: {}", path.display(), e);
        }
    }

    fn append_text(&self, file: &str, text: &str) {
        let path = self.path(file);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| f.write_all(text.as_bytes()));
        if let Err(e) = result {
            warn!("Could not append to {}: {}", path.display(), e);
        }
    }

    fn write_json(&self, file: &str, value: &Value) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => self.write(file, &text),
            Err(e) => warn!("Could not serialize {}: {}", file, e),
        }
    }

    fn thoughts_file(player: &PlayerId) -> String {
        let safe: String = player
            .as_str()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{}_private_thoughts.txt", safe)
    }

    fn status(end: Option<&GameReport>) -> &'static str {
        if end.is_some() { "finished" } else { "in_progress" }
    }

    /// Rewrite the public log from the public rounds recorded so far
    fn write_public_log(&self, records: &Records, end: Option<&GameReport>) {
        let Some(opening) = end.or(records.opening.as_ref()) else {
            return;
        };
        let rounds = &records.public_rounds;
        let score = end
            .map(|r| r.quest_score)
            .unwrap_or_else(|| score_of(rounds.iter()));
        let consecutive_rejections = rounds.last().map(|r| r.consecutive_rejections).unwrap_or(0);

        self.write_json(
            PUBLIC_LOG,
            &json!({
                "game_id": self.game_id,
                "player_count": opening.seating_order.len(),
                "players": opening.seating_order,
                "quest_requirements": QUEST_TEAM_SIZES,
                "quest_score": score,
                "rounds": rounds,
                "consecutive_rejections": consecutive_rejections,
                "game_status": Self::status(end),
                "game_result": end.and_then(|r| r.result),
            }),
        );
    }

    /// Rewrite the full log, hidden information included
    fn write_full_log(&self, records: &Records, end: Option<&GameReport>) {
        let Some(opening) = end.or(records.opening.as_ref()) else {
            return;
        };
        let rounds = &records.full_rounds;
        let score = end
            .map(|r| r.quest_score)
            .unwrap_or_else(|| score_of(rounds.iter().map(|r| &r.round)));

        self.write_json(
            FULL_LOG,
            &json!({
                "game_id": self.game_id,
                "seed": opening.seed,
                "player_count": opening.seating_order.len(),
                "seating_order": opening.seating_order,
                "initial_leader": opening.initial_leader,
                "role_assignments": opening.roles,
                "initial_knowledge": opening.knowledge,
                "quest_requirements": QUEST_TEAM_SIZES,
                "quest_score": score,
                "rounds": rounds,
                "assassination_phase": end.and_then(|r| r.assassination.as_ref()),
                "game_result": end.and_then(|r| r.result),
                "winner": end.and_then(|r| r.winner),
                "game_status": Self::status(end),
            }),
        );
    }
}

fn score_of<'a>(rounds: impl Iterator<Item = &'a RoundRecord>) -> QuestScore {
    let mut score = QuestScore::default();
    for outcome in rounds.filter_map(|r| r.quest_outcome.as_ref()) {
        score.record(outcome.result);
    }
    score
}

impl GameRecorder for FileGameRecorder {
    fn on_game_start(&self, report: &GameReport) {
        let seating = join_players(&report.seating_order);

        self.append_text(
            CONVERSATION_LOG,
            &format!(
                "=== AVALON GAME START ===\n\nSeating order: {}\nInitial leader: {}\n\n",
                seating, report.initial_leader
            ),
        );
        self.append_text(
            FULL_CONVERSATION_LOG,
            &format!(
                "=== AVALON GAME START - FULL CONVERSATION LOG ===\n\n\
                 This log includes both private thoughts and public messages from all players.\n\n\
                 Seating order: {}\nInitial leader: {}\n\n",
                seating, report.initial_leader
            ),
        );
        for player in &report.seating_order {
            self.append_text(
                &Self::thoughts_file(player),
                &format!("=== {} Private Thoughts ===\n\n", player),
            );
        }

        if let Ok(mut records) = self.records.lock() {
            records.opening = Some(report.clone());
            self.write_public_log(&records, None);
            self.write_full_log(&records, None);
        }
    }

    fn on_round_start(&self, round_number: u32, quest_number: u8, leader: &PlayerId) {
        self.append_text(CONVERSATION_LOG, &format!("\n<ROUND>{}</ROUND>\n", round_number));
        let rule = "#".repeat(60);
        self.append_text(
            FULL_CONVERSATION_LOG,
            &format!(
                "\n\n{rule}\n# ROUND {} (Quest {}, leader {})\n{rule}\n",
                round_number, quest_number, leader
            ),
        );
    }

    fn append(&self, round: &RoundRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.public_rounds.push(round.clone());
            self.write_public_log(&records, None);
        }
    }

    fn append_full(&self, round: &FullRoundRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.full_rounds.push(round.clone());
            self.write_full_log(&records, None);
        }
    }

    fn on_message(
        &self,
        round_number: u32,
        speaker: &PlayerId,
        public_message: &str,
        full_response: &str,
    ) {
        self.append_text(CONVERSATION_LOG, &format!("\n{}: {}\n", speaker, public_message));

        let (private, _) = split_discussion(full_response);
        let rule = "=".repeat(60);
        let mut entry = format!("\n{rule}\n{} (Round {}):\n{rule}\n\n", speaker, round_number);
        if !private.is_empty() {
            entry.push_str(&format!("PRIVATE THOUGHTS:\n{}\n\n", private));
        }
        entry.push_str(&format!(
            "PUBLIC MESSAGE (what other players see):\n{}\n",
            public_message
        ));
        self.append_text(FULL_CONVERSATION_LOG, &entry);
    }

    fn on_private_thoughts(
        &self,
        player: &PlayerId,
        round_number: u32,
        kind: DecisionKind,
        thoughts: &str,
    ) {
        self.append_text(
            &Self::thoughts_file(player),
            &format!(
                "\n=== Round {} - {} Decision ===\n\n{}\n",
                round_number,
                kind.display_name(),
                thoughts
            ),
        );
    }

    fn on_game_end(&self, report: &GameReport) {
        if let Ok(records) = self.records.lock() {
            self.write_public_log(&records, Some(report));
            self.write_full_log(&records, Some(report));
        }
        if let Some(result) = report.result {
            self.append_text(
                CONVERSATION_LOG,
                &format!(
                    "\n=== GAME OVER ===\n{}\nFinal score: {}\n",
                    result.describe(),
                    report.quest_score
                ),
            );
        }
    }
}
