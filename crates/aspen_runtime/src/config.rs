//! Chat runtime configuration

use std::str::FromStr;
use std::time::Duration;

use aspen_constant::server;
use aspen_llms::SamplingConfig;
use tracing::warn;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Base URL of the llama-server instance
    pub server_url: String,
    /// How long one completion exchange may take
    pub request_timeout: Duration,
    /// How long the pre-flight health check may take
    pub health_timeout: Duration,
    /// User/assistant pairs carried into each prompt
    pub history_pairs: usize,
    /// Context size the server was started with
    pub context_size: usize,
    /// Generation controls
    pub sampling: SamplingConfig,
}

impl ChatConfig {
    pub fn new() -> Self {
        Self {
            server_url: server::DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(server::DEFAULT_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(server::DEFAULT_HEALTH_TIMEOUT_SECS),
            history_pairs: server::DEFAULT_HISTORY_PAIRS,
            context_size: server::DEFAULT_CTX_SIZE,
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn with_history_pairs(mut self, pairs: usize) -> Self {
        self.history_pairs = pairs;
        self
    }

    pub fn with_context_size(mut self, size: usize) -> Self {
        self.context_size = size;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Values that fail to parse are logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup("ASPEN_SERVER_URL").filter(|v| !v.trim().is_empty()) {
            config.server_url = url.trim().to_string();
        }
        if let Some(timeout) = parse_secs(&lookup, "ASPEN_TIMEOUT_SECS") {
            config.request_timeout = timeout;
        }
        if let Some(timeout) = parse_secs(&lookup, "ASPEN_HEALTH_TIMEOUT_SECS") {
            config.health_timeout = timeout;
        }
        if let Some(pairs) = parse_var(&lookup, "ASPEN_HISTORY_PAIRS") {
            config.history_pairs = pairs;
        }
        if let Some(size) = parse_var(&lookup, "ASPEN_CTX_SIZE") {
            config.context_size = size;
        }
        if let Some(n) = parse_var(&lookup, "ASPEN_N_PREDICT") {
            config.sampling.max_tokens = n;
        }
        if let Some(t) = parse_var(&lookup, "ASPEN_TEMPERATURE") {
            config.sampling.temperature = t;
        }
        if let Some(p) = parse_var(&lookup, "ASPEN_TOP_P") {
            config.sampling.top_p = p;
        }
        if let Some(p) = parse_var(&lookup, "ASPEN_REPEAT_PENALTY") {
            config.sampling.repeat_penalty = p;
        }

        config
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}

/// A zero timeout would fail every request, so it is treated as unparseable.
fn parse_secs<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<u64, _>(lookup, key)? {
        0 => {
            warn!(key, value = 0, "Ignoring unparseable setting");
            None
        }
        secs => Some(Duration::from_secs(secs)),
    }
}
