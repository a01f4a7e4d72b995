use std::sync::Arc;
use std::time::Duration;

use aspen_core::{ChatEvent, EndReason, NoticeKind, Role, Turn};
use aspen_llms::InferenceError;

use super::support::{
    ok, runtime_with, BrokenRenderer, HangingClient, RecordingRenderer, ScriptedClient,
    ScriptedInput,
};
use crate::input::InputEvent;
use crate::{LoopState, RuntimeError};

#[tokio::test]
async fn test_first_exchange_records_both_turns() {
    let client = ScriptedClient::new(vec![ok("hi there")]);
    let mut runtime = runtime_with(client.clone());
    let mut input = ScriptedInput::lines(&["hello"]);
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(reason, EndReason::InputClosed);
    assert_eq!(
        client.prompts(),
        vec!["<|im_start|>user\nhello<|im_end|>\n<|im_start|>assistant\n"]
    );
    assert_eq!(
        runtime.session.history(),
        &[Turn::user("hello"), Turn::assistant("hi there")]
    );
    assert_eq!(renderer.replies(), vec!["hi there"]);
    assert_eq!(
        renderer.events,
        vec![
            ChatEvent::DispatchStarted,
            ChatEvent::reply("hi there"),
            ChatEvent::session_end(EndReason::InputClosed),
        ]
    );
}

#[tokio::test]
async fn test_history_alternates_and_window_limits_prompt() {
    let client = ScriptedClient::new(vec![ok("a1"), ok("a2"), ok("a3"), ok("a4")]);
    let mut runtime = runtime_with(client.clone());
    let mut input = ScriptedInput::lines(&["q1", "q2", "q3", "q4"]);
    let mut renderer = RecordingRenderer::default();

    runtime.run(&mut input, &mut renderer).await;

    let history = runtime.session.history();
    assert_eq!(history.len(), 8);
    for (i, turn) in history.iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(turn.role(), expected);
    }

    // Fourth prompt carries only the last two pairs.
    let prompts = client.prompts();
    let last = &prompts[3];
    assert!(!last.contains("q1"));
    assert!(!last.contains("a1"));
    for text in ["q2", "a2", "q3", "a3", "q4"] {
        assert!(last.contains(text), "missing {text}");
    }
    assert!(last.ends_with("<|im_start|>user\nq4<|im_end|>\n<|im_start|>assistant\n"));
}

#[tokio::test]
async fn test_failed_exchanges_leave_history_unchanged() {
    let client = ScriptedClient::new(vec![
        ok("first"),
        Err(InferenceError::Timeout {
            after: Duration::from_secs(60),
        }),
        Err(InferenceError::EmptyContent),
        Err(InferenceError::malformed("expected value at line 1 column 1")),
        Err(InferenceError::server(500, "Internal Server Error")),
        Err(InferenceError::Connection("Connection refused".to_string())),
    ]);
    let mut runtime = runtime_with(client.clone());
    let mut input = ScriptedInput::lines(&["one", "two", "three", "four", "five", "six"]);
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(reason, EndReason::InputClosed);
    assert_eq!(
        runtime.session.history(),
        &[Turn::user("one"), Turn::assistant("first")]
    );
    assert_eq!(
        renderer.notices(),
        vec![
            "(Request timed out - Aspen is thinking too hard!)",
            "(No response generated)",
            "(Invalid response from server: expected value at line 1 column 1)",
            "(Server error 500: Internal Server Error)",
            "(Connection error: Connection refused)",
        ]
    );
    // Every later prompt still sees only the one successful pair.
    for prompt in &client.prompts()[1..] {
        assert!(prompt.starts_with("<|im_start|>user\none<|im_end|>\n<|im_start|>assistant\nfirst<|im_end|>\n"));
    }
}

#[tokio::test]
async fn test_exit_keyword_any_case_terminates() {
    let client = ScriptedClient::new(vec![]);
    let mut runtime = runtime_with(client.clone());
    let mut input = ScriptedInput::lines(&["QUIT", "never sent"]);
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(reason, EndReason::UserExit);
    assert!(reason.is_graceful());
    assert!(client.prompts().is_empty());
    assert_eq!(
        renderer.events,
        vec![ChatEvent::session_end(EndReason::UserExit)]
    );
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let client = ScriptedClient::new(vec![ok("pong")]);
    let mut runtime = runtime_with(client.clone());
    let mut input = ScriptedInput::lines(&["", "   ", "ping", "bye"]);
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(reason, EndReason::UserExit);
    assert_eq!(client.prompts().len(), 1);
    assert_eq!(runtime.session.exchange_count(), 1);
}

#[tokio::test]
async fn test_interrupt_at_prompt_terminates() {
    let client = ScriptedClient::new(vec![]);
    let mut runtime = runtime_with(client);
    let mut input = ScriptedInput::events(vec![InputEvent::Interrupt]);
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(reason, EndReason::Interrupted);
    assert!(reason.is_graceful());
}

#[tokio::test]
async fn test_interrupt_while_dispatching_abandons_request() {
    let mut runtime = runtime_with(Arc::new(HangingClient));
    let mut input = ScriptedInput::lines(&["are you there?"]).with_interrupt_in_flight();
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(reason, EndReason::Interrupted);
    assert!(runtime.session.is_empty());
    assert_eq!(
        renderer.events,
        vec![
            ChatEvent::DispatchStarted,
            ChatEvent::session_end(EndReason::Interrupted),
        ]
    );
}

#[tokio::test]
async fn test_input_failure_is_a_fault() {
    let client = ScriptedClient::new(vec![]);
    let mut runtime = runtime_with(client);
    let mut input = ScriptedInput::events(vec![InputEvent::Failed("stream did not contain valid UTF-8".to_string())]);
    let mut renderer = RecordingRenderer::default();

    let reason = runtime.run(&mut input, &mut renderer).await;

    assert_eq!(
        reason,
        EndReason::Fault {
            error: "stream did not contain valid UTF-8".to_string()
        }
    );
    assert!(!reason.is_graceful());
}

#[tokio::test]
async fn test_render_failure_is_a_fault() {
    let client = ScriptedClient::new(vec![ok("hi")]);
    let mut runtime = runtime_with(client.clone());
    let mut input = ScriptedInput::lines(&["hello"]);

    let reason = runtime.run(&mut input, &mut BrokenRenderer).await;

    assert_eq!(
        reason,
        EndReason::Fault {
            error: "stdout closed".to_string()
        }
    );
    assert!(client.prompts().is_empty());
}

#[tokio::test]
async fn test_step_transitions() {
    let client = ScriptedClient::new(vec![Err(InferenceError::EmptyContent)]);
    let mut runtime = runtime_with(client);
    let mut input = ScriptedInput::lines(&["hello"]);
    let mut renderer = RecordingRenderer::default();

    let state = runtime
        .step(LoopState::AwaitingInput, &mut input, &mut renderer)
        .await;
    assert_eq!(state, LoopState::Dispatching("hello".to_string()));

    let state = runtime.step(state, &mut input, &mut renderer).await;
    assert_eq!(state, LoopState::AwaitingInput);
    assert_eq!(
        renderer.events.last(),
        Some(&ChatEvent::notice(NoticeKind::EmptyContent, "(No response generated)"))
    );

    let state = runtime
        .step(LoopState::Rendering("shown".to_string()), &mut input, &mut renderer)
        .await;
    assert_eq!(state, LoopState::AwaitingInput);
    assert_eq!(renderer.replies(), vec!["shown"]);

    let done = LoopState::Terminated(EndReason::UserExit);
    assert_eq!(runtime.step(done.clone(), &mut input, &mut renderer).await, done);
}

#[tokio::test]
async fn test_preflight() {
    let healthy = runtime_with(ScriptedClient::new(vec![]));
    assert!(healthy.preflight().await.is_ok());

    let down = runtime_with(ScriptedClient::unhealthy());
    match down.preflight().await {
        Err(RuntimeError::ServerUnavailable { endpoint, source }) => {
            assert_eq!(endpoint, "http://scripted:8080/");
            assert!(matches!(source, InferenceError::Connection(_)));
        }
        other => panic!("expected ServerUnavailable, got {other:?}"),
    }
}
