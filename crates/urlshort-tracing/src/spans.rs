//! Span builder helpers for urlshort instrumentation.

/// Create a tracing span for an inbound HTTP request.
///
/// Usage: `let span = request_span!(req.method(), req.uri().path());`
///
/// Fields recorded later by the response hook:
/// - `status`: the HTTP status code written to the client
/// - `latency_ms`: milliseconds from request start to response headers
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "request",
            method = %$method,
            path = %$path,
            status = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        )
    };
}
