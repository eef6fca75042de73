//! HTTP client builder utilities
//!
//! Builds the `reqwest::Client` used by the default transport from an
//! [`HttpConfig`].

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::PerspectiveError;
use crate::types::HttpConfig;

/// Build an HTTP client from HttpConfig
///
/// # Example
/// ```rust,no_run
/// use perspective_client::types::HttpConfig;
/// use perspective_client::execution::http::client::build_http_client_from_config;
///
/// let config = HttpConfig::default();
/// let client = build_http_client_from_config(&config)?;
/// # Ok::<(), perspective_client::PerspectiveError>(())
/// ```
pub fn build_http_client_from_config(
    config: &HttpConfig,
) -> Result<reqwest::Client, PerspectiveError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(read_timeout) = config.read_timeout {
        builder = builder.read_timeout(read_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| PerspectiveError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if !config.headers.is_empty() {
        builder = builder.default_headers(extra_headers(&config.headers)?);
    }

    builder
        .build()
        .map_err(|e| PerspectiveError::HttpError(format!("Failed to create HTTP client: {e}")))
}

/// Convert configured header pairs, rejecting names or values HTTP cannot carry.
fn extra_headers(
    headers: &std::collections::HashMap<String, String>,
) -> Result<HeaderMap, PerspectiveError> {
    headers
        .iter()
        .map(|(name, value)| {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                PerspectiveError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                PerspectiveError::ConfigurationError(format!(
                    "Invalid header value for '{name}': {e}"
                ))
            })?;
            Ok((header_name, header_value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config_builds() {
        let config = HttpConfig::default();
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn timeouts_can_be_disabled() {
        let config = HttpConfig {
            timeout: None,
            connect_timeout: None,
            read_timeout: None,
            ..Default::default()
        };
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn short_timeouts_build() {
        let config = HttpConfig {
            timeout: Some(Duration::from_secs(3)),
            connect_timeout: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn invalid_header_name_is_configuration_error() {
        let mut config = HttpConfig::default();
        config
            .headers
            .insert("Invalid Header Name".to_string(), "value".to_string());

        let err = build_http_client_from_config(&config).unwrap_err();
        assert!(matches!(err, PerspectiveError::ConfigurationError(_)));
    }

    #[test]
    fn invalid_proxy_is_configuration_error() {
        let config = HttpConfig {
            proxy: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = build_http_client_from_config(&config).unwrap_err();
        assert!(matches!(err, PerspectiveError::ConfigurationError(_)));
    }

    #[test]
    fn extra_headers_are_converted() {
        let mut configured = std::collections::HashMap::new();
        configured.insert("X-Goog-User-Project".to_string(), "moderation".to_string());
        let headers = extra_headers(&configured).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-goog-user-project").unwrap(), "moderation");
    }

    #[test]
    fn invalid_header_value_is_configuration_error() {
        let mut configured = std::collections::HashMap::new();
        configured.insert("X-Trace".to_string(), "line\nbreak".to_string());
        let err = extra_headers(&configured).unwrap_err();
        assert!(matches!(err, PerspectiveError::ConfigurationError(_)));
    }
}
