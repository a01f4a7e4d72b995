//! Runtime error types

use aspen_llms::InferenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("inference server not reachable at {endpoint}: {source}")]
    ServerUnavailable {
        endpoint: String,
        #[source]
        source: InferenceError,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_unavailable_message() {
        let err = RuntimeError::ServerUnavailable {
            endpoint: "http://localhost:8080".to_string(),
            source: InferenceError::Connection("Connection refused".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "inference server not reachable at http://localhost:8080: connection failed: Connection refused"
        );
    }
}
