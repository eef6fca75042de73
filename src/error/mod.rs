//! Error Handling Module
//!
//! This module provides the error type shared by every layer of the client:
//! - Core error types (`PerspectiveError`, `ErrorCategory`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use perspective_client::error::{ErrorCategory, PerspectiveError};
//!
//! let error = PerspectiveError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
