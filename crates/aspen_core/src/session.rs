use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::turn::{Role, Turn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory conversation state for one process run.
///
/// History is append-only; the retained window handed to the prompt builder
/// is derived from it on every call and never stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    history: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            started_at: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Append a turn to the tail of History.
    pub fn append(&mut self, turn: Turn) {
        self.history.push(turn);
    }

    /// Append a completed user/assistant exchange as one unit.
    pub fn record_exchange(&mut self, user_text: impl Into<String>, assistant_text: impl Into<String>) {
        self.append(Turn::user(user_text));
        self.append(Turn::assistant(assistant_text));
    }

    /// The last `k_pairs` user/assistant pairs of History, oldest first.
    ///
    /// The window always starts on a user turn, so a pair is never split at
    /// the leading edge.
    pub fn retained_window(&self, k_pairs: usize) -> &[Turn] {
        let mut start = self.history.len().saturating_sub(k_pairs.saturating_mul(2));
        if self
            .history
            .get(start)
            .is_some_and(|turn| turn.role() == Role::Assistant)
        {
            start += 1;
        }
        &self.history[start..]
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    pub fn exchange_count(&self) -> usize {
        self.history
            .iter()
            .filter(|turn| turn.role() == Role::Assistant)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Time since the session started.
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.started_at)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_pairs(n: usize) -> Session {
        let mut session = Session::new();
        for i in 0..n {
            session.record_exchange(format!("question {i}"), format!("answer {i}"));
        }
        session
    }

    #[test]
    fn test_elapsed_since_start() {
        let mut session = Session::new();
        session.started_at = Utc::now() - chrono::Duration::seconds(90);
        let elapsed = session.elapsed().num_seconds();
        assert!((90..95).contains(&elapsed), "elapsed {elapsed}");
    }

    #[test]
    fn test_session_id_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_str());
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.turn_count(), 0);
        assert!(session.retained_window(2).is_empty());
    }

    #[test]
    fn test_record_exchange_alternates_roles() {
        let session = session_with_pairs(3);
        assert_eq!(session.turn_count(), 6);
        assert_eq!(session.exchange_count(), 3);

        for (i, turn) in session.history().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role(), expected);
        }
    }

    #[test]
    fn test_retained_window_drops_oldest_pair() {
        let session = session_with_pairs(3);
        let window = session.retained_window(2);

        assert_eq!(window.len(), 4);
        assert_eq!(window[0], Turn::user("question 1"));
        assert_eq!(window[1], Turn::assistant("answer 1"));
        assert_eq!(window[2], Turn::user("question 2"));
        assert_eq!(window[3], Turn::assistant("answer 2"));
    }

    #[test]
    fn test_retained_window_is_suffix() {
        for pairs in 0..6 {
            let session = session_with_pairs(pairs);
            for k in 0..4 {
                let window = session.retained_window(k);
                let history = session.history();
                assert_eq!(window.len(), history.len().min(2 * k));
                assert!(history.ends_with(window));
            }
        }
    }

    #[test]
    fn test_retained_window_shorter_history() {
        let session = session_with_pairs(1);
        assert_eq!(session.retained_window(2).len(), 2);
    }

    #[test]
    fn test_retained_window_never_starts_with_assistant() {
        let mut session = session_with_pairs(2);
        session.append(Turn::user("dangling"));

        let window = session.retained_window(2);
        assert_eq!(window.first().map(Turn::role), Some(Role::User));
        assert_eq!(window.len(), 3);
        assert_eq!(window[0], Turn::user("question 1"));
    }

    #[test]
    fn test_retained_window_has_no_side_effects() {
        let session = session_with_pairs(3);
        let before = session.history().to_vec();
        let _ = session.retained_window(1);
        let _ = session.retained_window(5);
        assert_eq!(session.history(), before.as_slice());
    }
}
