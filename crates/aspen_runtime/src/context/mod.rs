//! Prompt assembly from the retained history window

pub mod prompt;
pub mod window;

pub use prompt::{build_prompt, render_turn};
pub use window::{estimate_tokens, exceeds_context};
