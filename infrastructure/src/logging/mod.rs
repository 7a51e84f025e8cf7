//! Logging infrastructure: game records and structured conversation logs.
//!
//! - [`FileGameRecorder`] writes the per-game JSON logs, transcripts and
//!   private-thought files, implementing the
//!   [`GameRecorder`](avalon_application::GameRecorder) port.
//! - [`JsonlConversationLogger`] writes every prompt and response as JSONL,
//!   implementing the [`ConversationLogger`](avalon_application::ConversationLogger) port.

mod game_log;
mod jsonl_logger;

pub use game_log::{FileGameRecorder, game_dir_name};
pub use jsonl_logger::JsonlConversationLogger;
