//! llama-server provider implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::convert::{from_llama_body, to_llama_request};
use super::types::LlamaServerConfig;
use crate::client::InferenceClient;
use crate::error::{InferenceError, Result};
use crate::types::{CompletionRequest, InferenceResponse};

/// Longest slice of an error body carried into `InferenceError::Server`.
const MAX_ERROR_BODY: usize = 200;

/// llama-server provider
pub struct LlamaServerClient {
    config: LlamaServerConfig,
    endpoint: String,
    client: Client,
}

impl LlamaServerClient {
    /// Create a new llama-server client
    pub fn new(config: LlamaServerConfig) -> Self {
        let endpoint = config.base_url.as_str().trim_end_matches('/').to_string();
        Self {
            config,
            endpoint,
            client: Client::new(),
        }
    }

    /// Create client from a base URL such as `http://localhost:8080`
    pub fn from_url(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::new(LlamaServerConfig::new(base_url)?))
    }

    pub fn config(&self) -> &LlamaServerConfig {
        &self.config
    }
}

#[async_trait]
impl InferenceClient for LlamaServerClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn complete(
        &self,
        request: CompletionRequest,
        timeout: Duration,
    ) -> Result<InferenceResponse> {
        let url = self.config.completion_url()?;
        let body = to_llama_request(&request);
        debug!(url = %url, prompt_chars = request.prompt.len(), "Sending completion request");

        // The whole exchange, body included, must finish inside `timeout`.
        // On expiry the future is dropped and any late answer is discarded.
        let exchange = async {
            let response = self.client.post(url).json(&body).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, InferenceError>((status, text))
        };
        let (status, text) = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| InferenceError::Timeout { after: timeout })??;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        from_llama_body(status.as_u16(), &text, &request.sampling.stop)
    }

    async fn health(&self, timeout: Duration) -> Result<()> {
        let url = self.config.health_url()?;
        debug!(url = %url, "Checking server health");

        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Ok::<_, InferenceError>((status, text))
        };
        let (status, text) = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| InferenceError::Timeout { after: timeout })??;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        Ok(())
    }
}

fn status_error(status: StatusCode, body: &str) -> InferenceError {
    let body = body.trim();
    let body = match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    };
    let body = if body.is_empty() {
        status.canonical_reason().unwrap_or("no body").to_string()
    } else {
        body
    };
    InferenceError::server(status.as_u16(), body)
}
