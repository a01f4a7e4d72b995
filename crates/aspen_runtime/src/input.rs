//! Line input seam for the conversation loop.

use async_trait::async_trait;

use aspen_constant::app::EXIT_KEYWORDS;

/// One thing that happened on the input side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line, without its trailing newline
    Line(String),
    /// The user pressed Ctrl+C
    Interrupt,
    /// End of input
    Closed,
    /// Reading failed
    Failed(String),
}

/// Source of user input for the conversation loop.
///
/// The terminal implementation reads stdin; tests script it.
#[async_trait]
pub trait InputSource: Send {
    /// Wait for the next input event.
    async fn next_event(&mut self) -> InputEvent;

    /// Resolves when the user interrupts while a request is in flight.
    ///
    /// Sources that cannot be interrupted should never resolve.
    async fn interrupted(&mut self);
}

/// What the loop should do with a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Blank line, prompt again
    Ignore,
    /// An exit keyword
    Exit,
    /// A message to send, trimmed
    Message(String),
}

/// Classify a raw input line.
pub fn classify_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputAction::Ignore;
    }
    if EXIT_KEYWORDS
        .iter()
        .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
    {
        return InputAction::Exit;
    }
    InputAction::Message(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(classify_input(""), InputAction::Ignore);
        assert_eq!(classify_input("   \t "), InputAction::Ignore);
    }

    #[test]
    fn test_exit_keywords_any_case() {
        for line in ["quit", "EXIT", " Bye ", "Quit\n"] {
            assert_eq!(classify_input(line), InputAction::Exit, "{line:?}");
        }
    }

    #[test]
    fn test_exit_keyword_inside_message_is_a_message() {
        assert_eq!(
            classify_input("how do I quit vim?"),
            InputAction::Message("how do I quit vim?".to_string())
        );
    }

    #[test]
    fn test_message_is_trimmed() {
        assert_eq!(
            classify_input("  Hello  "),
            InputAction::Message("Hello".to_string())
        );
    }
}
