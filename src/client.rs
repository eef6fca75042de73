//! Perspective client
//!
//! [`PerspectiveClient`] validates a call, builds the `comments:analyze`
//! body, hands it to the configured [`HttpTransport`] and turns the reply
//! into a [`ScoreResult`]. It keeps no per-call state and can be shared
//! between tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::config::PerspectiveConfig;
use crate::defaults;
use crate::error::PerspectiveError;
use crate::execution::http::{
    HttpInterceptor, HttpRequestContext, HttpTransport, HttpTransportRequest, LoggingInterceptor,
    ReqwestTransport, classify_http_error,
};
use crate::traits::AnalysisCapability;
use crate::transformers::{AnalyzeCommentRequest, parse_body, parse_score_result};
use crate::types::{AnalyzeOptions, Attribute, HttpConfig, ScoreResult};

/// Client for the Perspective comment analysis API.
#[derive(Clone)]
pub struct PerspectiveClient {
    config: PerspectiveConfig,
    transport: Arc<dyn HttpTransport>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl std::fmt::Debug for PerspectiveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerspectiveClient")
            .field("config", &self.config)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl PerspectiveClient {
    /// Client with the default endpoint and HTTP settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PerspectiveError> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> PerspectiveClientBuilder {
        PerspectiveClientBuilder::new()
    }

    pub fn config(&self) -> &PerspectiveConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        self.config.effective_endpoint()
    }

    fn request_context(&self, attributes: &[Attribute]) -> HttpRequestContext {
        HttpRequestContext {
            url: self.endpoint().to_string(),
            attributes: attributes.iter().map(|a| a.as_str().to_string()).collect(),
        }
    }

    fn notify_error(&self, ctx: &HttpRequestContext, error: &PerspectiveError) {
        for interceptor in &self.interceptors {
            interceptor.on_error(ctx, error);
        }
    }
}

/// Remove repeated attributes, keeping the first occurrence.
fn dedup_attributes(attributes: &[Attribute]) -> Vec<Attribute> {
    let mut unique = Vec::with_capacity(attributes.len());
    for attr in attributes {
        if !unique.contains(attr) {
            unique.push(*attr);
        }
    }
    unique
}

#[async_trait]
impl AnalysisCapability for PerspectiveClient {
    async fn analyze(
        &self,
        text: &str,
        attributes: &[Attribute],
        options: Option<AnalyzeOptions>,
    ) -> Result<ScoreResult, PerspectiveError> {
        if text.is_empty() {
            return Err(PerspectiveError::InvalidInput("text is required".to_string()));
        }
        if attributes.is_empty() {
            return Err(PerspectiveError::InvalidInput(
                "at least one attribute is required".to_string(),
            ));
        }

        let options = options.unwrap_or_default();
        let attributes = dedup_attributes(attributes);
        let body = AnalyzeCommentRequest::new(text, &attributes, &options).to_json()?;
        let url = self.config.request_url()?;
        let ctx = self.request_context(&attributes);

        tracing::debug!(
            target: "perspective_client::client",
            text_len = text.len(),
            attributes = ?ctx.attributes,
            language = options.resolved_language(),
            "analyzing comment"
        );

        for interceptor in &self.interceptors {
            if let Err(err) = interceptor.on_before_send(&ctx, &body) {
                self.notify_error(&ctx, &err);
                return Err(err);
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = HttpTransportRequest {
            ctx: ctx.clone(),
            url: url.to_string(),
            headers,
            body,
        };
        let response = match self.transport.execute_json(request).await {
            Ok(response) => response,
            Err(err) => {
                self.notify_error(&ctx, &err);
                return Err(err);
            }
        };

        for interceptor in &self.interceptors {
            interceptor.on_response(&ctx, response.status);
        }

        if !response.is_success() {
            let err = classify_http_error(response.status, &response.text(), &response.headers);
            tracing::debug!(target: "perspective_client::client", status = response.status, "analysis rejected");
            self.notify_error(&ctx, &err);
            return Err(err);
        }

        let raw = match parse_body(&response.body) {
            Ok(raw) => raw,
            Err(err) => {
                self.notify_error(&ctx, &err);
                return Err(err);
            }
        };
        let result = parse_score_result(text, options.resolved_language(), &raw, &attributes);

        tracing::debug!(
            target: "perspective_client::client",
            scores = result.scores().len(),
            spans = result.span_annotations().len(),
            "analysis complete"
        );
        Ok(result)
    }
}

/// Builder for [`PerspectiveClient`].
///
/// The API key and endpoint fall back to `PERSPECTIVE_API_KEY` and
/// `PERSPECTIVE_ENDPOINT` when not set explicitly.
#[derive(Clone, Default)]
pub struct PerspectiveClientBuilder {
    api_key: Option<SecretString>,
    endpoint: Option<String>,
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn HttpTransport>>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_debug: bool,
}

impl PerspectiveClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Override the analysis endpoint. An empty string selects the default.
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Replace the whole HTTP configuration
    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Set connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client; `HttpConfig` is then ignored.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Send requests through a custom transport.
    pub fn with_http_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Add a custom HTTP interceptor
    pub fn with_http_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Enable a built-in logging interceptor for HTTP debugging (no sensitive data).
    pub const fn http_debug(mut self, enabled: bool) -> Self {
        self.http_debug = enabled;
        self
    }

    pub fn build(self) -> Result<PerspectiveClient, PerspectiveError> {
        // Priority: builder > environment variable
        let api_key = match self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => key,
            _ => std::env::var(defaults::API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from)
                .ok_or_else(|| {
                    PerspectiveError::MissingApiKey(format!(
                        "no API key given and {} is not set",
                        defaults::API_KEY_ENV
                    ))
                })?,
        };
        let endpoint = self
            .endpoint
            .or_else(|| std::env::var(defaults::ENDPOINT_ENV).ok())
            .unwrap_or_default();

        let config = PerspectiveConfig {
            api_key,
            endpoint,
            http_config: self.http_config,
        };
        config.validate()?;

        let transport: Arc<dyn HttpTransport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => Arc::new(ReqwestTransport::from_config(&config.http_config)?),
        };

        let mut interceptors = self.interceptors;
        if self.http_debug {
            interceptors.push(Arc::new(LoggingInterceptor));
        }

        tracing::debug!(target: "perspective_client::client", endpoint = config.effective_endpoint(), "client built");

        Ok(PerspectiveClient {
            config,
            transport,
            interceptors,
        })
    }
}
