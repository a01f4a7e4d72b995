//! Application metadata constants

pub const NAME: &str = "aspen";
pub const DISPLAY_NAME: &str = "Aspen 4B";
pub const ASSISTANT_LABEL: &str = "Aspen";
pub const USER_LABEL: &str = "You";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Interactive terminal chat with a local llama-server";

/// Directory name for per-user and per-project settings
pub const DATA_DIR: &str = ".aspen";
/// Env file inside DATA_DIR
pub const ENV_FILE: &str = "env";

/// Lines typed at the prompt that end the session (compared case-insensitively).
pub const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "bye"];

pub const FAREWELL: &str = "Goodbye! 👋";
