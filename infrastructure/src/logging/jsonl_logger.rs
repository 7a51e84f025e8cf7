//! Prompt/response log for one game, one JSON object per line.
//!
//! Every line carries the game id, a sequence number, the event `type`, an
//! RFC 3339 `timestamp` and the round it belongs to. Events that do not name
//! a round (the final `game_end`, for instance) are stamped with the last
//! round seen, so the file can be filtered by round without reconstructing
//! game flow.

use super::game_log::game_id_for;
use avalon_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// File name inside a game directory
pub const CONVERSATION_JSONL: &str = "conversation.jsonl";

/// Payload keys that name the round an event belongs to
const ROUND_KEYS: [&str; 2] = ["round", "round_number"];

struct Cursor {
    file: File,
    seq: u64,
    round: Option<u64>,
}

/// [`ConversationLogger`] writing `conversation.jsonl` for a single game
pub struct JsonlConversationLogger {
    game_id: String,
    path: PathBuf,
    cursor: Mutex<Cursor>,
}

impl JsonlConversationLogger {
    /// Append to `path`, stamping each line with `game_id`.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>, game_id: impl Into<String>) -> Option<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create {}: {}", parent.display(), e);
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not open conversation log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            game_id: game_id.into(),
            path: path.to_path_buf(),
            cursor: Mutex::new(Cursor {
                file,
                seq: 0,
                round: None,
            }),
        })
    }

    /// `conversation.jsonl` inside a game directory, keyed by the directory name
    pub fn in_game_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        Self::new(dir.join(CONVERSATION_JSONL), game_id_for(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }
}

fn round_of(payload: &Map<String, Value>) -> Option<u64> {
    ROUND_KEYS
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_u64))
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut cursor) = self.cursor.lock() else {
            return;
        };

        let mut record = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        if let Some(round) = round_of(&record) {
            cursor.round = Some(round);
        }
        cursor.seq += 1;

        record.insert("seq".to_string(), json!(cursor.seq));
        record.insert("game_id".to_string(), json!(self.game_id));
        record.insert("type".to_string(), json!(event.event_type));
        record.insert(
            "timestamp".to_string(),
            json!(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        record.entry("round").or_insert(json!(cursor.round));

        let mut line = match serde_json::to_string(&Value::Object(record)) {
            Ok(line) => line,
            Err(e) => {
                warn!(event = event.event_type, "Could not serialize conversation event: {}", e);
                return;
            }
        };
        line.push('\n');

        // One write per line keeps lines whole if the game is killed mid-run
        if let Err(e) = cursor.file.write_all(line.as_bytes()) {
            warn!("Could not write {}: {}", self.path.display(), e);
        }
    }
}
