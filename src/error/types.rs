//! Core error types.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PerspectiveError>;

/// Coarse classification of a [`PerspectiveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad arguments or configuration detected before any network call.
    Validation,
    /// The API key was rejected.
    Authentication,
    /// The service throttled the caller.
    RateLimit,
    /// Any other 4xx response.
    Client,
    /// A 5xx response.
    Server,
    /// The request never produced an HTTP response.
    Network,
    /// The response body could not be read as JSON.
    Parsing,
}

/// Errors produced by the client.
///
/// Argument and configuration problems are reported before any network
/// activity. Missing or malformed fields inside an otherwise valid response
/// are not errors; they degrade to sentinel scores instead.
#[derive(Error, Debug, Clone)]
pub enum PerspectiveError {
    /// A call argument was rejected (empty text, no attributes, bad span range).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value was rejected.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No API key was configured and none was found in the environment.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// The HTTP layer could not be set up (proxy, headers, endpoint URL).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The service answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Generic transport failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The transport gave up waiting.
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// The connection could not be established.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The response body was not a JSON document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl PerspectiveError {
    /// Create an API error without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error carrying structured details.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code, if the error came from a response.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify the error.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_)
            | Self::InvalidParameter(_)
            | Self::MissingApiKey(_)
            | Self::ConfigurationError(_) => ErrorCategory::Validation,
            Self::ApiError { code, .. } => match *code {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::HttpError(_) | Self::TimeoutError(_) | Self::ConnectionError(_) => {
                ErrorCategory::Network
            }
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Server | ErrorCategory::Network
        )
    }

    /// 4xx response.
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    /// 5xx response.
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_categories_follow_status() {
        assert_eq!(
            PerspectiveError::api_error(401, "nope").category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            PerspectiveError::api_error(403, "nope").category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            PerspectiveError::api_error(429, "slow down").category(),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            PerspectiveError::api_error(400, "bad").category(),
            ErrorCategory::Client
        );
        assert_eq!(
            PerspectiveError::api_error(503, "down").category(),
            ErrorCategory::Server
        );
    }

    #[test]
    fn retryable_hint() {
        assert!(PerspectiveError::api_error(500, "x").is_retryable());
        assert!(PerspectiveError::api_error(429, "x").is_retryable());
        assert!(PerspectiveError::TimeoutError("x".into()).is_retryable());
        assert!(!PerspectiveError::api_error(400, "x").is_retryable());
        assert!(!PerspectiveError::InvalidInput("x".into()).is_retryable());
    }

    #[test]
    fn status_helpers() {
        let e = PerspectiveError::api_error_with_details(
            400,
            "bad",
            serde_json::json!({ "status": "INVALID_ARGUMENT" }),
        );
        assert_eq!(e.status_code(), Some(400));
        assert!(e.is_client_error());
        assert!(!e.is_server_error());
        assert_eq!(PerspectiveError::HttpError("x".into()).status_code(), None);
    }

    #[test]
    fn display_includes_code() {
        let e = PerspectiveError::api_error(400, "Perspective API error: HTTP 400 - boom");
        assert_eq!(
            e.to_string(),
            "API error 400: Perspective API error: HTTP 400 - boom"
        );
    }
}
