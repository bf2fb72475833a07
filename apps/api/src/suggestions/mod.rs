// AI writing suggestions for wizard fields.
// All LLM calls go through llm_client; this module only builds prompts and cleans up replies.

pub mod handlers;
pub mod prompts;
pub mod suggester;

pub use suggester::{LlmSuggestionBackend, SuggestionBackend};
