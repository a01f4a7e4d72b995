//! Diagnostics shown for failed exchanges.

use aspen_constant::app::ASSISTANT_LABEL;
use aspen_core::NoticeKind;
use aspen_llms::InferenceError;

/// Map an inference failure to its notice kind and the parenthetical shown
/// to the user.
pub fn notice_for(error: &InferenceError) -> (NoticeKind, String) {
    match error {
        InferenceError::Timeout { .. } => (
            NoticeKind::Timeout,
            format!("(Request timed out - {ASSISTANT_LABEL} is thinking too hard!)"),
        ),
        InferenceError::Connection(detail) | InferenceError::InvalidEndpoint(detail) => (
            NoticeKind::Connection,
            format!("(Connection error: {detail})"),
        ),
        InferenceError::Server { status, body } => (
            NoticeKind::Server,
            format!("(Server error {status}: {body})"),
        ),
        InferenceError::MalformedResponse(detail) => (
            NoticeKind::Malformed,
            format!("(Invalid response from server: {detail})"),
        ),
        InferenceError::EmptyContent => (
            NoticeKind::EmptyContent,
            "(No response generated)".to_string(),
        ),
    }
}
