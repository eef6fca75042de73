//! HTTP transport abstraction.
//!
//! The client never talks to the network directly. It hands the final URL,
//! headers and JSON body to an [`HttpTransport`] and gets back a status,
//! headers and raw body. [`ReqwestTransport`] is the default; tests and
//! callers with special networking needs can inject their own.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::fmt;

use super::interceptor::HttpRequestContext;
use crate::error::PerspectiveError;
use crate::types::HttpConfig;

/// Transport-level request data for JSON POST requests.
#[derive(Clone)]
pub struct HttpTransportRequest {
    pub ctx: HttpRequestContext,
    /// Final URL including the `key` query parameter.
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl fmt::Debug for HttpTransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportRequest")
            .field("url", &self.ctx.url)
            .field("attributes", &self.ctx.attributes)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Custom HTTP transport for JSON requests.
///
/// Implementations report any response they receive, including non-success
/// statuses, as `Ok`; status handling belongs to the caller. `Err` is for
/// requests that produced no response at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, PerspectiveError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport with a fresh client configured from `config`.
    pub fn from_config(config: &HttpConfig) -> Result<Self, PerspectiveError> {
        super::client::build_http_client_from_config(config).map(Self::new)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, PerspectiveError> {
        // reqwest errors embed the request URL, which carries the API key.
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| PerspectiveError::from(e.without_url()))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| PerspectiveError::from(e.without_url()))?;

        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
