// Shared prompt fragments. Features that call the LLM keep their own prompts.rs
// alongside them; this file holds fragments shared across features.

/// Keeps suggestions honest: rephrase what the user gave, never invent facts.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Never invent employers, dates, degrees, numbers or achievements that the user did not provide. \
    When the input is thin, write general phrasing the user can fill in rather than made-up specifics.";
