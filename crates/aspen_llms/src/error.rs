//! Error taxonomy for inference calls.

use std::time::Duration;

use thiserror::Error;

/// Every way a completion exchange can fail.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// No response arrived within the caller's timeout.
    #[error("request timed out after {}s", .after.as_secs_f32())]
    Timeout { after: Duration },

    /// Endpoint unreachable, refused the connection, or dropped it mid-exchange.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Endpoint reachable but answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// Body is not the expected JSON shape or lacks the content field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The server answered successfully but generated nothing.
    #[error("no content generated")]
    EmptyContent,

    /// The configured endpoint URL cannot be used.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl InferenceError {
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Soft failures are neither appended to history nor treated as errors.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::EmptyContent)
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(error_chain(&err))
        } else {
            Self::Connection(error_chain(&err))
        }
    }
}

impl From<serde_json::Error> for InferenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Join an error and its sources, e.g. "error sending request: Connection refused".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, InferenceError>;
