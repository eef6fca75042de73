//! Data types: the attribute catalog, analysis results and request options.

mod attribute;
mod http;
mod options;
mod score;
mod span;

pub use attribute::Attribute;
pub use http::{HttpConfig, HttpConfigBuilder};
pub use options::AnalyzeOptions;
pub use score::{ScoreResult, ScoreResultBuilder};
pub use span::SpanAnnotation;
