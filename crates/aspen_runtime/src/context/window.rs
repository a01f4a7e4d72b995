//! Rough prompt budgeting against the server's context size.
//!
//! The server does its own truncation; this only exists so an oversized
//! prompt shows up in the logs before the reply degrades.

const CHARS_PER_TOKEN: usize = 4;

/// Approximate token count at four characters per token, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Whether the prompt plus the generation budget would overflow `context_size`.
pub fn exceeds_context(prompt: &str, n_predict: u32, context_size: usize) -> bool {
    estimate_tokens(prompt) + n_predict as usize > context_size
}
