//! Transformers layer
//!
//! Request bodies going out and score results coming back.

pub mod request;
pub mod response;

pub use request::AnalyzeCommentRequest;
pub use response::{parse_body, parse_score_result};
