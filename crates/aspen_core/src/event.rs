use serde::{Deserialize, Serialize};

/// Which recoverable failure a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Timeout,
    Connection,
    Server,
    Malformed,
    EmptyContent,
}

/// Why a session stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndReason {
    UserExit,
    Interrupted,
    InputClosed,
    Fault { error: String },
}

impl EndReason {
    pub fn is_graceful(&self) -> bool {
        !matches!(self, EndReason::Fault { .. })
    }
}

/// Events emitted by the conversation loop for whatever is rendering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    DispatchStarted,

    Reply { text: String },

    Notice { kind: NoticeKind, message: String },

    SessionEnd { reason: EndReason },
}

impl ChatEvent {
    pub fn reply(text: impl Into<String>) -> Self {
        ChatEvent::Reply { text: text.into() }
    }

    pub fn notice(kind: NoticeKind, message: impl Into<String>) -> Self {
        ChatEvent::Notice {
            kind,
            message: message.into(),
        }
    }

    pub fn session_end(reason: EndReason) -> Self {
        ChatEvent::SessionEnd { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply() {
        let event = ChatEvent::reply("hi there");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"reply""#));
        assert!(json.contains("hi there"));
    }

    #[test]
    fn test_notice() {
        let event = ChatEvent::notice(NoticeKind::EmptyContent, "(No response generated)");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""kind":"empty_content""#));
    }

    #[test]
    fn test_session_end_fault() {
        let event = ChatEvent::session_end(EndReason::Fault {
            error: "stdin closed unexpectedly".to_string(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"session_end""#));
        assert!(json.contains(r#""type":"fault""#));
    }

    #[test]
    fn test_end_reason_graceful() {
        assert!(EndReason::UserExit.is_graceful());
        assert!(EndReason::Interrupted.is_graceful());
        assert!(EndReason::InputClosed.is_graceful());
        assert!(!EndReason::Fault { error: "x".into() }.is_graceful());
    }
}
