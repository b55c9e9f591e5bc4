//! Request and response observers

use std::fmt::Debug;

use crate::error::TransportError;
use crate::headers::AUTHORIZATION;
use crate::request::WireRequest;
use crate::response::WireResponse;

/// Observes traffic going through a [`crate::NetworkClient`]
///
/// Notifications are one-way: they return nothing and cannot change the
/// outcome of a call.
pub trait ResponseLogger: Debug + Send + Sync {
    /// A request is about to be dispatched
    fn log_request(&self, request: &WireRequest);

    /// A response was received, `None` when the call never reached the transport
    fn log_response(&self, response: Option<&WireResponse>, body: Option<&[u8]>);

    /// The transport failed to execute `request`
    fn log_error(&self, error: &TransportError, request: &WireRequest);
}

/// Logger used when none is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl ResponseLogger for NoopLogger {
    fn log_request(&self, _request: &WireRequest) {}

    fn log_response(&self, _response: Option<&WireResponse>, _body: Option<&[u8]>) {}

    fn log_error(&self, _error: &TransportError, _request: &WireRequest) {}
}

/// Logger emitting `tracing` events
///
/// Header values are logged except for `Authorization`, which is redacted.
/// Bodies are logged at `trace` level only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    fn header_summary(request: &WireRequest) -> String {
        request
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(AUTHORIZATION) {
                    format!("{}: <redacted>", name)
                } else {
                    format!("{}: {}", name, value)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ResponseLogger for TracingLogger {
    fn log_request(&self, request: &WireRequest) {
        tracing::debug!(
            "--> {} {} [{}]",
            request.method,
            request.url,
            Self::header_summary(request)
        );
        if let Some(body) = request.body.as_deref() {
            tracing::trace!("--> body: {}", String::from_utf8_lossy(body));
        }
    }

    fn log_response(&self, response: Option<&WireResponse>, body: Option<&[u8]>) {
        match response {
            Some(response) => tracing::debug!(
                "<-- {} ({} bytes)",
                response.status,
                response.body.len()
            ),
            None => tracing::debug!("<-- no response"),
        }
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            tracing::trace!("<-- body: {}", String::from_utf8_lossy(body));
        }
    }

    fn log_error(&self, error: &TransportError, request: &WireRequest) {
        tracing::warn!("<-- {} {} failed: {}", request.method, request.url, error);
    }
}
