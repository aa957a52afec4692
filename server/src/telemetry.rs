//! Logging setup and per-request tracing.

use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer,
};
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize console logging filtered by `RUST_LOG`.
pub fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Span per request carrying the method and matched route.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let matched_path = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or(request.uri().path());

        // Health checks are noisy; keep them out of info-level output
        if matched_path == "/health" {
            tracing::trace_span!("http_request")
        } else {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %matched_path,
            )
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QuietOnRequest;

impl<B> OnRequest<B> for QuietOnRequest {
    fn on_request(&mut self, _request: &Request<B>, _span: &Span) {}
}

/// Logs status and latency, at error level for 5xx.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        // Skip logging for noisy endpoints (trace-level spans)
        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
            return;
        }
        let status = response.status().as_u16();
        if status >= 500 {
            tracing::error!(
                status = %status,
                latency_ms = %latency.as_millis(),
                "request failed with server error"
            );
        } else {
            tracing::info!(
                status = %status,
                latency_ms = %latency.as_millis(),
                "request completed"
            );
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure {
    fn on_failure(&mut self, error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
        tracing::error!(
            error = %error,
            latency_ms = %latency.as_millis(),
            "request failed"
        );
    }
}

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    QuietOnRequest,
    LogResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    LogFailure,
>;

/// HTTP tracing layer wired to the handlers above.
pub fn trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(QuietOnRequest)
        .on_response(LogResponse)
        .on_failure(LogFailure)
}
