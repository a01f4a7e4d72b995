//! The conversation state machine.

use aspen_core::{ChatEvent, EndReason};
use tracing::{debug, info, warn};

use crate::input::{classify_input, InputAction, InputEvent, InputSource};
use crate::render::Renderer;

use super::{notice_for, Runtime};

/// Where the conversation loop currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    /// Holds the user message being sent
    Dispatching(String),
    /// Holds the reply to show
    Rendering(String),
    Terminated(EndReason),
}

impl LoopState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, LoopState::Terminated(_))
    }
}

impl Runtime {
    /// Drive the conversation until it terminates.
    ///
    /// The final [`ChatEvent::SessionEnd`] is rendered before returning.
    pub async fn run<I, R>(&mut self, input: &mut I, renderer: &mut R) -> EndReason
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        info!(session = %self.session.id.as_str(), "Conversation started");

        let mut state = LoopState::AwaitingInput;
        let reason = loop {
            state = self.step(state, input, renderer).await;
            if let LoopState::Terminated(reason) = state {
                break reason;
            }
        };

        if let Err(e) = renderer.render(&ChatEvent::session_end(reason.clone())) {
            warn!(error = %e, "Failed to render session end");
        }
        info!(
            exchanges = self.session.exchange_count(),
            started_at = %self.session.started_at,
            duration_secs = self.session.elapsed().num_seconds(),
            ?reason,
            "Conversation ended"
        );
        reason
    }

    /// Advance the state machine by one transition.
    pub async fn step<I, R>(&mut self, state: LoopState, input: &mut I, renderer: &mut R) -> LoopState
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        match state {
            LoopState::AwaitingInput => match input.next_event().await {
                InputEvent::Line(line) => match classify_input(&line) {
                    InputAction::Ignore => LoopState::AwaitingInput,
                    InputAction::Exit => LoopState::Terminated(EndReason::UserExit),
                    InputAction::Message(text) => LoopState::Dispatching(text),
                },
                InputEvent::Interrupt => LoopState::Terminated(EndReason::Interrupted),
                InputEvent::Closed => LoopState::Terminated(EndReason::InputClosed),
                InputEvent::Failed(error) => LoopState::Terminated(EndReason::Fault { error }),
            },

            LoopState::Dispatching(text) => {
                if let Err(e) = renderer.render(&ChatEvent::DispatchStarted) {
                    return fault(e);
                }

                // Dropping the exchange future abandons the request and leaves
                // the session untouched.
                let outcome = tokio::select! {
                    result = self.exchange(&text) => Some(result),
                    _ = input.interrupted() => None,
                };

                match outcome {
                    None => {
                        debug!("Interrupted while waiting for the server");
                        LoopState::Terminated(EndReason::Interrupted)
                    }
                    Some(Ok(reply)) => LoopState::Rendering(reply),
                    Some(Err(err)) => {
                        let (kind, message) = notice_for(&err);
                        match renderer.render(&ChatEvent::notice(kind, message)) {
                            Ok(()) => LoopState::AwaitingInput,
                            Err(e) => fault(e),
                        }
                    }
                }
            }

            LoopState::Rendering(reply) => match renderer.render(&ChatEvent::reply(reply)) {
                Ok(()) => LoopState::AwaitingInput,
                Err(e) => fault(e),
            },

            terminated @ LoopState::Terminated(_) => terminated,
        }
    }
}

fn fault(error: std::io::Error) -> LoopState {
    LoopState::Terminated(EndReason::Fault {
        error: error.to_string(),
    })
}
