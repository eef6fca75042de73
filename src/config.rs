//! Client configuration.

use secrecy::{ExposeSecret, SecretString};

use crate::defaults;
use crate::error::PerspectiveError;
use crate::types::HttpConfig;

/// Configuration for [`PerspectiveClient`](crate::client::PerspectiveClient).
#[derive(Clone)]
pub struct PerspectiveConfig {
    pub api_key: SecretString,
    /// Analysis endpoint; empty means [`defaults::ENDPOINT`].
    pub endpoint: String,
    pub http_config: HttpConfig,
}

impl std::fmt::Debug for PerspectiveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerspectiveConfig")
            .field("endpoint", &self.endpoint)
            .field("has_api_key", &!self.api_key.expose_secret().is_empty())
            .field("http_config", &self.http_config)
            .finish()
    }
}

impl PerspectiveConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            endpoint: defaults::ENDPOINT.to_string(),
            http_config: HttpConfig::default(),
        }
    }

    /// Read the key and endpoint from `PERSPECTIVE_API_KEY` and
    /// `PERSPECTIVE_ENDPOINT`.
    pub fn from_env() -> Result<Self, PerspectiveError> {
        let api_key = std::env::var(defaults::API_KEY_ENV).map_err(|_| {
            PerspectiveError::MissingApiKey(format!("{} is not set", defaults::API_KEY_ENV))
        })?;
        let mut config = Self::new(api_key);
        if let Ok(endpoint) = std::env::var(defaults::ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Endpoint actually used for requests.
    pub fn effective_endpoint(&self) -> &str {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            defaults::ENDPOINT
        } else {
            endpoint
        }
    }

    pub fn validate(&self) -> Result<(), PerspectiveError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(PerspectiveError::MissingApiKey(
                "Perspective api_key cannot be empty".to_string(),
            ));
        }
        let endpoint = self.effective_endpoint();
        let url = reqwest::Url::parse(endpoint).map_err(|e| {
            PerspectiveError::InvalidParameter(format!("Invalid endpoint '{endpoint}': {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PerspectiveError::InvalidParameter(format!(
                "Endpoint must be http(s): {endpoint}"
            )));
        }
        Ok(())
    }

    /// Endpoint URL with the API key appended as the `key` query parameter.
    pub(crate) fn request_url(&self) -> Result<reqwest::Url, PerspectiveError> {
        let endpoint = self.effective_endpoint();
        reqwest::Url::parse_with_params(endpoint, &[("key", self.api_key.expose_secret())])
            .map_err(|e| {
                PerspectiveError::InvalidParameter(format!("Invalid endpoint '{endpoint}': {e}"))
            })
    }
}
