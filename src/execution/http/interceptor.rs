//! HTTP Interceptor interfaces
//!
//! Interceptors observe each analyze request before it is handed to the
//! transport, the status of the response, and any error. The hooks are
//! best-effort and should avoid expensive work.

use crate::error::PerspectiveError;

/// Context passed to interceptors describing the request.
///
/// `url` is the endpoint without the query string, so it never carries the
/// API key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequestContext {
    pub url: String,
    /// Canonical names of the requested attributes.
    pub attributes: Vec<String>,
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before the request is sent. Returning an error short-circuits
    /// the call.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        _body: &serde_json::Value,
    ) -> Result<(), PerspectiveError> {
        Ok(())
    }

    /// Called when the transport produced a response, successful or not.
    fn on_response(&self, _ctx: &HttpRequestContext, _status: u16) {}

    /// Called when an error occurs during sending or classification.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &PerspectiveError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Debug, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        _body: &serde_json::Value,
    ) -> Result<(), PerspectiveError> {
        tracing::debug!(target: "perspective_client::http", url=%ctx.url, attributes=?ctx.attributes, "sending request");
        Ok(())
    }

    fn on_response(&self, ctx: &HttpRequestContext, status: u16) {
        tracing::debug!(target: "perspective_client::http", url=%ctx.url, status=%status, "response received");
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &PerspectiveError) {
        tracing::debug!(target: "perspective_client::http", url=%ctx.url, err=%error, "request error");
    }
}
