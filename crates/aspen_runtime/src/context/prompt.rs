//! ChatML prompt rendering

use aspen_constant::template::{ASSISTANT_ROLE, TURN_END, TURN_START};
use aspen_core::{Role, Turn};

/// Render a single turn as `<|im_start|>{role}\n{text}<|im_end|>\n`.
pub fn render_turn(role: Role, text: &str) -> String {
    format!("{TURN_START}{}\n{text}{TURN_END}\n", role.as_str())
}

/// Build the full prompt for one exchange.
///
/// The window turns come first, in order, then the new user message, then an
/// open assistant turn for the model to complete. The same inputs always
/// produce the same string.
pub fn build_prompt(window: &[Turn], user_text: &str) -> String {
    let mut prompt = String::new();
    for turn in window {
        prompt.push_str(&render_turn(turn.role(), turn.text()));
    }
    prompt.push_str(&render_turn(Role::User, user_text));
    prompt.push_str(TURN_START);
    prompt.push_str(ASSISTANT_ROLE);
    prompt.push('\n');
    prompt
}
