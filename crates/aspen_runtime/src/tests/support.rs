//! Scripted collaborators for driving the conversation loop in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use aspen_core::ChatEvent;
use aspen_llms::{CompletionRequest, InferenceClient, InferenceError, InferenceResponse};

use crate::input::{InputEvent, InputSource};
use crate::render::Renderer;
use crate::{ChatConfig, Runtime};

/// Replays a fixed list of input events, then reports end of input.
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    interrupt_in_flight: bool,
}

impl ScriptedInput {
    pub fn lines(lines: &[&str]) -> Self {
        Self::events(lines.iter().map(|l| InputEvent::Line(l.to_string())).collect())
    }

    pub fn events(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into(),
            interrupt_in_flight: false,
        }
    }

    /// Fire an interrupt as soon as a request is in flight.
    pub fn with_interrupt_in_flight(mut self) -> Self {
        self.interrupt_in_flight = true;
        self
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn next_event(&mut self) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::Closed)
    }

    async fn interrupted(&mut self) {
        if !self.interrupt_in_flight {
            std::future::pending::<()>().await;
        }
    }
}

/// Collects every rendered event.
#[derive(Default)]
pub struct RecordingRenderer {
    pub events: Vec<ChatEvent>,
}

impl RecordingRenderer {
    pub fn replies(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ChatEvent::Reply { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ChatEvent::Notice { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, event: &ChatEvent) -> std::io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Fails every write, like a closed stdout.
pub struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(&mut self, _event: &ChatEvent) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ))
    }
}

/// Answers completions from a queue and records what it was asked.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<aspen_llms::Result<InferenceResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    healthy: bool,
}

impl ScriptedClient {
    pub fn new(replies: Vec<aspen_llms::Result<InferenceResponse>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            healthy: true,
        })
    }

    pub fn unhealthy() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            healthy: false,
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }
}

pub fn ok(content: &str) -> aspen_llms::Result<InferenceResponse> {
    Ok(InferenceResponse::new(content, 200))
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    fn endpoint(&self) -> &str {
        "http://scripted:8080/"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
        _timeout: Duration,
    ) -> aspen_llms::Result<InferenceResponse> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(InferenceError::EmptyContent))
    }

    async fn health(&self, _timeout: Duration) -> aspen_llms::Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(InferenceError::Connection("Connection refused".to_string()))
        }
    }
}

/// Never answers a completion.
pub struct HangingClient;

#[async_trait]
impl InferenceClient for HangingClient {
    fn endpoint(&self) -> &str {
        "http://hanging:8080/"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
        _timeout: Duration,
    ) -> aspen_llms::Result<InferenceResponse> {
        std::future::pending().await
    }

    async fn health(&self, _timeout: Duration) -> aspen_llms::Result<()> {
        Ok(())
    }
}

pub fn runtime_with(client: Arc<dyn InferenceClient>) -> Runtime {
    Runtime::new(client, ChatConfig::new())
}
