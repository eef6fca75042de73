//! # perspective-client - Typed access to the Perspective comment analysis API
//!
//! Send a piece of text, get back per-attribute probability scores
//! (toxicity, insult, threat, ...) and optional span-level annotations.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Closed attribute catalog**: the eight production attributes as an enum with
//!   case-insensitive lookup.
//! - **Immutable results**: [`ScoreResult`] is built once and never changes; a
//!   requested attribute the service did not score reads as `NaN`.
//! - **Tolerant parsing**: partial or malformed responses degrade to sentinel
//!   scores instead of failing the call.
//! - **HTTP customization**: bring your own `reqwest::Client`, transport or
//!   interceptors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use perspective_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PerspectiveClient::builder().api_key("your-api-key").build()?;
//!
//!     let result = client
//!         .analyze_attributes("you are a fool", &[Attribute::Toxicity, Attribute::Insult])
//!         .await?;
//!     if result.is_toxic(0.8) {
//!         println!("flagged: {result}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod traits;
pub mod transformers;
pub mod types;

pub use client::{PerspectiveClient, PerspectiveClientBuilder};
pub use config::PerspectiveConfig;
pub use error::{ErrorCategory, PerspectiveError, Result};
pub use traits::AnalysisCapability;
pub use types::{AnalyzeOptions, Attribute, HttpConfig, ScoreResult, ScoreResultBuilder, SpanAnnotation};

/// Everything needed for the common analyze flow.
pub mod prelude {
    pub use crate::client::{PerspectiveClient, PerspectiveClientBuilder};
    pub use crate::error::{ErrorCategory, PerspectiveError};
    pub use crate::traits::AnalysisCapability;
    pub use crate::types::{AnalyzeOptions, Attribute, ScoreResult, SpanAnnotation};
}
