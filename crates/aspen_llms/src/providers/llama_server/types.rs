//! llama-server wire types

use aspen_constant::server;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

/// Configuration for the llama-server provider
#[derive(Debug, Clone)]
pub struct LlamaServerConfig {
    /// Base URL, always ending in `/` (default: http://localhost:8080/)
    pub base_url: Url,
}

impl LlamaServerConfig {
    /// Create config from a base URL such as `http://localhost:8080`
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let mut url = base_url.as_ref().trim().to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        let base_url = Url::parse(&url)
            .map_err(|e| InferenceError::InvalidEndpoint(format!("{}: {}", url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(InferenceError::InvalidEndpoint(format!(
                "{}: unsupported scheme '{}'",
                url,
                base_url.scheme()
            )));
        }
        Ok(Self { base_url })
    }

    pub fn completion_url(&self) -> Result<Url> {
        self.join(server::COMPLETION_PATH)
    }

    pub fn health_url(&self) -> Result<Url> {
        self.join(server::HEALTH_PATH)
    }

    /// `host:port` of the endpoint, with the scheme's default port filled in.
    pub fn authority(&self) -> String {
        let host = self.base_url.host_str().unwrap_or("localhost");
        match self.base_url.port_or_known_default() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.base_url.port_or_known_default()
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| InferenceError::InvalidEndpoint(e.to_string()))
    }
}

/// `POST /completion` body
#[derive(Debug, Serialize)]
pub struct LlamaCompletionRequest<'a> {
    pub prompt: &'a str,
    pub n_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    pub stop: &'a [String],
}

/// `POST /completion` response (non-streaming). Only `content` is required.
#[derive(Debug, Deserialize)]
pub struct LlamaCompletionResponse {
    pub content: String,
    #[serde(default)]
    pub tokens_predicted: Option<u64>,
    #[serde(default)]
    pub tokens_evaluated: Option<u64>,
    #[serde(default)]
    pub stopping_word: Option<String>,
    #[serde(default)]
    pub timings: Option<LlamaTimings>,
}

#[derive(Debug, Deserialize)]
pub struct LlamaTimings {
    #[serde(default)]
    pub predicted_per_second: Option<f64>,
}
