//! Conversion between the generic request/response types and llama-server JSON.

use super::types::{LlamaCompletionRequest, LlamaCompletionResponse};
use crate::error::{InferenceError, Result};
use crate::types::{CompletionRequest, InferenceResponse};

pub(super) fn to_llama_request(request: &CompletionRequest) -> LlamaCompletionRequest<'_> {
    LlamaCompletionRequest {
        prompt: &request.prompt,
        n_predict: request.sampling.max_tokens,
        temperature: request.sampling.temperature,
        top_p: request.sampling.top_p,
        repeat_penalty: request.sampling.repeat_penalty,
        stop: &request.sampling.stop,
    }
}

/// Decode a successful response body.
pub(super) fn from_llama_body(status: u16, body: &str, stop: &[String]) -> Result<InferenceResponse> {
    let resp: LlamaCompletionResponse = serde_json::from_str(body)?;

    let content = strip_stop_sequences(&resp.content, stop);
    if content.is_empty() {
        return Err(InferenceError::EmptyContent);
    }

    Ok(InferenceResponse {
        content: content.to_string(),
        status,
        tokens_predicted: resp.tokens_predicted,
        tokens_evaluated: resp.tokens_evaluated,
        stopping_word: resp.stopping_word.filter(|w| !w.is_empty()),
        tokens_per_second: resp.timings.and_then(|t| t.predicted_per_second),
    })
}

/// Cut `text` at the first stop sequence it contains, then trim whitespace.
pub fn strip_stop_sequences<'a>(text: &'a str, stop: &[String]) -> &'a str {
    let end = stop
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s.as_str()))
        .min()
        .unwrap_or(text.len());
    text[..end].trim()
}
