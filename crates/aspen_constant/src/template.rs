//! ChatML markers expected by the Aspen model.
//!
//! A rendered turn looks like:
//!
//! ```text
//! <|im_start|>user
//! hello<|im_end|>
//! ```

pub const TURN_START: &str = "<|im_start|>";
pub const TURN_END: &str = "<|im_end|>";
pub const END_OF_TEXT: &str = "<|endoftext|>";

pub const USER_ROLE: &str = "user";
pub const ASSISTANT_ROLE: &str = "assistant";

/// Stop sequences sent with every completion request.
pub const STOP_SEQUENCES: &[&str] = &[TURN_END, END_OF_TEXT];
