//! Prompt domain
//!
//! Templates for the prompts sent to players at each decision point.

mod template;

pub use template::{PromptContext, PromptTemplate};
