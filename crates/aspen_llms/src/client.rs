//! The inference client seam.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CompletionRequest, InferenceResponse};

/// One request/response exchange with an inference endpoint.
///
/// Implementations perform exactly one outbound call per invocation and
/// never retry on their own.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Human-readable endpoint address, used in diagnostics.
    fn endpoint(&self) -> &str;

    /// Send `request` and wait up to `timeout` for the generated text.
    ///
    /// The returned content has stop sequences stripped and surrounding
    /// whitespace trimmed. Blank content is reported as
    /// [`InferenceError::EmptyContent`](crate::InferenceError::EmptyContent).
    async fn complete(
        &self,
        request: CompletionRequest,
        timeout: Duration,
    ) -> Result<InferenceResponse>;

    /// Liveness check against the endpoint's health surface.
    async fn health(&self, timeout: Duration) -> Result<()>;
}
