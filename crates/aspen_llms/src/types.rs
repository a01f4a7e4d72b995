//! Provider-independent request/response types.

use aspen_constant::{server, template};
use serde::{Deserialize, Serialize};

/// Generation controls sent with each completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Caps generated length (`n_predict` on the wire)
    pub max_tokens: u32,
    /// Sampling randomness
    pub temperature: f32,
    /// Nucleus-sampling cutoff
    pub top_p: f32,
    /// Discourages repetition
    pub repeat_penalty: f32,
    /// Strings that truncate generation when produced
    pub stop: Vec<String>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_tokens: server::DEFAULT_N_PREDICT,
            temperature: server::DEFAULT_TEMPERATURE,
            top_p: server::DEFAULT_TOP_P,
            repeat_penalty: server::DEFAULT_REPEAT_PENALTY,
            stop: template::STOP_SEQUENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SamplingConfig {
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_repeat_penalty(mut self, repeat_penalty: f32) -> Self {
        self.repeat_penalty = repeat_penalty;
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }
}

/// A single completion call. Built fresh for every exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub sampling: SamplingConfig,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, sampling: SamplingConfig) -> Self {
        Self {
            prompt: prompt.into(),
            sampling,
        }
    }
}

/// Decoded result of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResponse {
    /// Generated text, stop sequences stripped and trimmed. Never blank.
    pub content: String,
    /// HTTP status of the exchange
    pub status: u16,
    pub tokens_predicted: Option<u64>,
    pub tokens_evaluated: Option<u64>,
    pub stopping_word: Option<String>,
    pub tokens_per_second: Option<f64>,
}

impl InferenceResponse {
    pub fn new(content: impl Into<String>, status: u16) -> Self {
        Self {
            content: content.into(),
            status,
            tokens_predicted: None,
            tokens_evaluated: None,
            stopping_word: None,
            tokens_per_second: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_defaults() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.max_tokens, 200);
        assert_eq!(sampling.temperature, 0.7);
        assert_eq!(sampling.top_p, 0.9);
        assert_eq!(sampling.repeat_penalty, 1.1);
        assert_eq!(sampling.stop, vec!["<|im_end|>", "<|endoftext|>"]);
    }

    #[test]
    fn test_sampling_builder() {
        let sampling = SamplingConfig::default()
            .with_max_tokens(64)
            .with_temperature(0.2)
            .with_top_p(0.5)
            .with_repeat_penalty(1.3)
            .with_stop(vec!["###".to_string()]);

        assert_eq!(sampling.max_tokens, 64);
        assert_eq!(sampling.temperature, 0.2);
        assert_eq!(sampling.top_p, 0.5);
        assert_eq!(sampling.repeat_penalty, 1.3);
        assert_eq!(sampling.stop, vec!["###"]);
    }
}
