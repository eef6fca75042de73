//! Default Configuration Values
//!
//! This module centralizes the default values used throughout the client.

use std::time::Duration;

/// Default analysis endpoint of the Perspective API.
pub const ENDPOINT: &str = "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze";

/// Language used when a request does not specify one.
pub const LANGUAGE: &str = "en";

/// Whether requests ask the service not to retain the analyzed text.
pub const DO_NOT_STORE: bool = true;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "PERSPECTIVE_API_KEY";

/// Environment variable consulted when no endpoint is configured.
pub const ENDPOINT_ENV: &str = "PERSPECTIVE_ENDPOINT";

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Total time budget for one analyze call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum idle time between reads of the response body.
    pub const READ_TIMEOUT: Duration = Duration::from_secs(25);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("perspective-client/", env!("CARGO_PKG_VERSION"));
}
