//! Type Conversions for PerspectiveError
//!
//! This module contains From trait implementations for converting
//! common error types into PerspectiveError.

use super::types::PerspectiveError;

impl From<reqwest::Error> for PerspectiveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PerspectiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PerspectiveError = json_err.into();
        assert!(matches!(err, PerspectiveError::JsonError(_)));
    }
}
