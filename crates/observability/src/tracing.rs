//! Utility functions for tracing

/// Create a span for one conversational exchange
///
/// # Example
///
/// ```rust
/// use aspen_observability::exchange_span;
///
/// let span = exchange_span!("3f2a…", 1u64);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! exchange_span {
    ($session_id:expr, $exchange:expr) => {
        tracing::info_span!(
            "chat.exchange",
            session.id = $session_id,
            exchange = $exchange,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// The span must declare `error` and `error.message` fields for the values
/// to be kept; the event is logged either way.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// # Example
///
/// ```rust
/// use aspen_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// // ... operation ...
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
