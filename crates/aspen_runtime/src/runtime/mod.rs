//! Runtime orchestrator for the Aspen chat client.
//!
//! The Runtime owns the session and the inference client and drives one
//! conversation from the first prompt to termination.
//!
//! - **chat_loop**: the AwaitingInput / Dispatching / Rendering state machine
//! - **notice**: user-visible text for each failed exchange

mod chat_loop;
mod notice;

use std::sync::Arc;
use std::time::Instant;

use aspen_core::Session;
use aspen_llms::{CompletionRequest, InferenceClient, InferenceError};
use aspen_observability::{exchange_span, record_duration, record_error};
use tracing::{debug, info, warn, Instrument};

use crate::config::ChatConfig;
use crate::context::{build_prompt, estimate_tokens, exceeds_context};
use crate::error::{Result, RuntimeError};

pub use chat_loop::LoopState;
pub use notice::notice_for;

/// Owns one conversation.
pub struct Runtime {
    /// The current session state
    pub session: Session,
    /// Inference client for completions and health checks
    pub client: Arc<dyn InferenceClient>,
    /// Runtime configuration
    pub config: ChatConfig,
}

impl Runtime {
    /// Create a Runtime with a fresh, empty session.
    pub fn new(client: Arc<dyn InferenceClient>, config: ChatConfig) -> Self {
        Self {
            session: Session::new(),
            client,
            config,
        }
    }

    /// One-shot liveness check run before the loop starts.
    pub async fn preflight(&self) -> Result<()> {
        let endpoint = self.client.endpoint().to_string();
        debug!(%endpoint, "Probing inference server");

        self.client
            .health(self.config.health_timeout)
            .await
            .map_err(|source| RuntimeError::ServerUnavailable { endpoint, source })?;

        info!("Inference server is ready");
        Ok(())
    }

    /// Run one exchange: window, prompt, completion.
    ///
    /// On success both turns are appended to the session and the reply text
    /// is returned. On any failure the session is left untouched.
    pub async fn exchange(&mut self, user_text: &str) -> std::result::Result<String, InferenceError> {
        let exchange = self.session.exchange_count() as u64 + 1;
        let span = exchange_span!(self.session.id.as_str(), exchange);
        self.dispatch(user_text).instrument(span).await
    }

    async fn dispatch(&mut self, user_text: &str) -> std::result::Result<String, InferenceError> {
        let start = Instant::now();

        let window = self.session.retained_window(self.config.history_pairs);
        let prompt = build_prompt(window, user_text);
        debug!(
            window_turns = window.len(),
            prompt_chars = prompt.len(),
            "Prompt built"
        );

        let n_predict = self.config.sampling.max_tokens;
        if exceeds_context(&prompt, n_predict, self.config.context_size) {
            warn!(
                estimated_tokens = estimate_tokens(&prompt),
                n_predict,
                context_size = self.config.context_size,
                "Prompt plus generation budget may exceed the server context"
            );
        }

        let request = CompletionRequest::new(prompt, self.config.sampling.clone());
        let result = self
            .client
            .complete(request, self.config.request_timeout)
            .await;
        record_duration("duration_ms", start.elapsed());

        match result {
            Ok(response) => {
                debug!(
                    status = response.status,
                    tokens_predicted = ?response.tokens_predicted,
                    tokens_evaluated = ?response.tokens_evaluated,
                    stopping_word = ?response.stopping_word,
                    tokens_per_second = ?response.tokens_per_second,
                    "Completion received"
                );
                self.session
                    .record_exchange(user_text, response.content.as_str());
                Ok(response.content)
            }
            Err(err) => {
                if err.is_soft() {
                    info!("Server generated no content");
                } else {
                    record_error(&err);
                }
                Err(err)
            }
        }
    }
}
