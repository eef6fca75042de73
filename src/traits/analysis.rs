//! Analysis capability trait

use crate::error::PerspectiveError;
use crate::types::{AnalyzeOptions, Attribute, ScoreResult};
use async_trait::async_trait;

#[async_trait]
pub trait AnalysisCapability: Send + Sync {
    /// Score `text` on `attributes`.
    ///
    /// `None` options mean [`AnalyzeOptions::default`].
    async fn analyze(
        &self,
        text: &str,
        attributes: &[Attribute],
        options: Option<AnalyzeOptions>,
    ) -> Result<ScoreResult, PerspectiveError>;

    /// Score `text` on `attributes` with default options.
    async fn analyze_attributes(
        &self,
        text: &str,
        attributes: &[Attribute],
    ) -> Result<ScoreResult, PerspectiveError> {
        self.analyze(text, attributes, None).await
    }

    /// Score `text` for toxicity only, with default options.
    async fn toxicity(&self, text: &str) -> Result<ScoreResult, PerspectiveError> {
        self.analyze(text, &[Attribute::Toxicity], None).await
    }

    fn supported_attributes(&self) -> Vec<Attribute> {
        Attribute::ALL.to_vec()
    }
}
